use crate::registry::model::{EntryId, SoftwareDraft, SoftwareEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Version,
    Size,
    SizeUnit,
    Path,
    Description,
    Category,
    InstallMethod,
    Cracked,
    CrackInstructions,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Version => "Version",
            FormField::Size => "Size",
            FormField::SizeUnit => "Unit",
            FormField::Path => "Installer Path",
            FormField::Description => "Description",
            FormField::Category => "Category",
            FormField::InstallMethod => "Install Method",
            FormField::Cracked => "Cracked Software",
            FormField::CrackInstructions => "Crack Instructions",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FormField::Name
                | FormField::Version
                | FormField::Size
                | FormField::Path
                | FormField::Description
                | FormField::CrackInstructions
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    Create(SoftwareDraft),
    Update(SoftwareEntry),
}

/// Add/edit dialog state.
#[derive(Debug, Clone)]
pub struct EntryForm {
    pub editing: Option<EntryId>,
    pub draft: SoftwareDraft,
    pub focus: usize,
    pub error: Option<String>,
}

impl EntryForm {
    pub fn new_entry() -> Self {
        Self {
            editing: None,
            draft: SoftwareDraft::default(),
            focus: 0,
            error: None,
        }
    }

    pub fn edit(entry: &SoftwareEntry) -> Self {
        Self {
            editing: Some(entry.id),
            draft: entry.to_draft(),
            focus: 0,
            error: None,
        }
    }

    pub fn title(&self) -> &'static str {
        if self.editing.is_some() {
            " Edit Software "
        } else {
            " Add New Software "
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            "Update Software"
        } else {
            "Add Software"
        }
    }

    /// Fields in display order. Crack instructions only exist for flagged entries.
    pub fn fields(&self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::Name,
            FormField::Version,
            FormField::Size,
            FormField::SizeUnit,
            FormField::Path,
            FormField::Description,
            FormField::Category,
            FormField::InstallMethod,
            FormField::Cracked,
        ];
        if self.draft.is_cracked {
            fields.push(FormField::CrackInstructions);
        }
        fields
    }

    pub fn focused(&self) -> FormField {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields().len();
    }

    pub fn focus_prev(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    pub fn value(&self, field: FormField) -> String {
        let d = &self.draft;
        match field {
            FormField::Name => d.name.clone(),
            FormField::Version => d.version.clone(),
            FormField::Size => d.size.clone(),
            FormField::SizeUnit => d.size_unit.to_string(),
            FormField::Path => d.path.clone(),
            FormField::Description => d.description.clone(),
            FormField::Category => d.category.to_string(),
            FormField::InstallMethod => d.install_method.to_string(),
            FormField::Cracked => if d.is_cracked { "[x]" } else { "[ ]" }.to_string(),
            FormField::CrackInstructions => d.crack_instructions.clone().unwrap_or_default(),
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        let d = &mut self.draft;
        match field {
            FormField::Name => Some(&mut d.name),
            FormField::Version => Some(&mut d.version),
            FormField::Size => Some(&mut d.size),
            FormField::Path => Some(&mut d.path),
            FormField::Description => Some(&mut d.description),
            FormField::CrackInstructions => {
                Some(d.crack_instructions.get_or_insert_with(String::new))
            }
            _ => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let field = self.focused();
        if !field.is_text() {
            if c == ' ' {
                self.cycle(true);
            }
            return;
        }
        if let Some(text) = self.text_mut(field) {
            text.push(c);
        }
        self.error = None;
    }

    pub fn backspace(&mut self) {
        let field = self.focused();
        if let Some(text) = self.text_mut(field) {
            text.pop();
        }
    }

    /// Steps choice fields; toggles the flag checkbox.
    pub fn cycle(&mut self, forward: bool) {
        let field = self.focused();
        let d = &mut self.draft;
        match field {
            FormField::SizeUnit => {
                d.size_unit = if forward {
                    d.size_unit.next()
                } else {
                    d.size_unit.next().next()
                }
            }
            FormField::Category => {
                d.category = if forward {
                    d.category.next()
                } else {
                    d.category.prev()
                }
            }
            FormField::InstallMethod => d.install_method = d.install_method.toggled(),
            FormField::Cracked => d.is_cracked = !d.is_cracked,
            _ => {}
        }
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.draft.path = path.into();
        self.error = None;
    }

    pub fn submit(&mut self) -> Result<FormSubmission, String> {
        if let Err(message) = self.validate() {
            self.error = Some(message.clone());
            return Err(message);
        }
        let mut draft = self.draft.clone();
        draft.name = draft.name.trim().to_string();
        draft.version = draft.version.trim().to_string();
        draft.size = draft.size.trim().to_string();
        draft.path = draft.path.trim().to_string();
        if draft
            .crack_instructions
            .as_deref()
            .is_some_and(|text| text.trim().is_empty())
        {
            draft.crack_instructions = None;
        }
        Ok(match self.editing {
            Some(id) => FormSubmission::Update(draft.with_id(id)),
            None => FormSubmission::Create(draft),
        })
    }

    fn validate(&self) -> Result<(), String> {
        for field in [
            FormField::Name,
            FormField::Version,
            FormField::Size,
            FormField::Path,
        ] {
            if self.value(field).trim().is_empty() {
                return Err(format!("{} is required", field.label()));
            }
        }
        match self.draft.size.trim().parse::<f64>() {
            Ok(size) if size.is_finite() && size >= 0.0 => Ok(()),
            _ => Err("Size must be a non-negative number".to_string()),
        }
    }
}
