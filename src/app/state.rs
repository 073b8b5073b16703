use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use ratatui::widgets::ListState;

use super::form::EntryForm;
use crate::bridge::RequestId;
use crate::config::InstallerConfig;
use crate::registry::model::{Category, CategoryFilter, EntryId, SoftwareEntry};
use crate::registry::store::CatalogStore;
use crate::system::os::Platform;
use crate::system::picker::FilePicker;

/// Number of category tabs: `all` plus one per category.
pub const CATEGORY_TABS: usize = Category::ALL.len() + 1;

const LOG_TTL: Duration = Duration::from_secs(3);
const PROGRESS_LINGER: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Search,
    Form,
    Picker,
    ConfirmDelete,
}

#[derive(Clone)]
pub struct LogEntry {
    pub message: String,
    pub level: LogLevel,
    pub created_at: Instant,
    pub logged_at: DateTime<Local>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LogLevel {
    Success,
    Error,
    Info,
}

/// Install state shown next to an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallProgress {
    pub request: RequestId,
    pub name: String,
    pub progress: u8,
    pub outcome: Option<bool>,
    pub finished_at: Option<Instant>,
}

impl InstallProgress {
    pub fn is_running(&self) -> bool {
        self.finished_at.is_none()
    }
}

pub struct App {
    pub store: CatalogStore,
    pub installer_config: InstallerConfig,
    pub visible: Vec<SoftwareEntry>,
    pub list_state: ListState,
    pub selected_category: usize,
    pub search_input: String,
    pub mode: Mode,
    pub form: Option<EntryForm>,
    pub picker: Option<FilePicker>,
    pub pending_delete: Option<SoftwareEntry>,
    pub confirm_selected: bool,
    pub installs: HashMap<EntryId, InstallProgress>,
    pub requests: HashMap<RequestId, EntryId>,
    pub status: String,
    pub platform: Platform,
    pub logs: Vec<LogEntry>,
}

impl App {
    pub fn new(store: CatalogStore, installer_config: InstallerConfig) -> Self {
        let mut app = Self {
            store,
            installer_config,
            visible: Vec::new(),
            list_state: ListState::default(),
            selected_category: 0,
            search_input: String::new(),
            mode: Mode::Browse,
            form: None,
            picker: None,
            pending_delete: None,
            confirm_selected: false,
            installs: HashMap::new(),
            requests: HashMap::new(),
            status: "Ready. Arrows/jk move, / search, A add, E edit, D delete, I install."
                .to_string(),
            platform: Platform::detect(),
            logs: Vec::new(),
        };
        app.refresh_filter();
        app
    }

    pub fn log(&mut self, message: String, level: LogLevel) {
        let now = Instant::now();
        self.logs.retain(|l| now.duration_since(l.created_at) < LOG_TTL);
        self.logs.push(LogEntry {
            message,
            level,
            created_at: now,
            logged_at: Local::now(),
        });
        if self.logs.len() > 3 {
            self.logs.remove(0);
        }
    }

    pub fn prune_logs(&mut self) {
        let now = Instant::now();
        self.logs.retain(|l| now.duration_since(l.created_at) < LOG_TTL);
    }

    /// Drops finished installs once their result has been on screen long enough.
    pub fn prune_installs(&mut self) {
        let now = Instant::now();
        self.installs.retain(|_, install| match install.finished_at {
            Some(at) => now.duration_since(at) < PROGRESS_LINGER,
            None => true,
        });
    }

    pub fn set_status<S: Into<String>>(&mut self, message: S) {
        self.status = message.into();
    }

    pub fn category_filter(&self) -> CategoryFilter {
        match self.selected_category {
            0 => CategoryFilter::All,
            i => Category::ALL
                .get(i - 1)
                .copied()
                .map(CategoryFilter::Only)
                .unwrap_or_default(),
        }
    }

    /// Re-queries the store. A non-empty search wins over the category tab.
    pub fn refresh_filter(&mut self) {
        self.visible = if self.search_input.is_empty() {
            self.store.list_by_category(self.category_filter())
        } else {
            self.store.search(&self.search_input)
        };

        let new_idx = match self.list_state.selected() {
            Some(idx) if idx < self.visible.len() => Some(idx),
            _ if self.visible.is_empty() => None,
            Some(_) => Some(self.visible.len() - 1),
            None => Some(0),
        };
        self.list_state.select(new_idx);
    }

    pub fn select_entry(&mut self, id: &EntryId) {
        if let Some(pos) = self.visible.iter().position(|entry| entry.id == *id) {
            self.list_state.select(Some(pos));
        }
    }

    pub fn current_entry(&self) -> Option<&SoftwareEntry> {
        let idx = self.list_state.selected()?;
        self.visible.get(idx)
    }

    pub fn install_state(&self, id: &EntryId) -> Option<&InstallProgress> {
        self.installs.get(id)
    }

    pub fn move_down(&mut self) {
        if self.visible.is_empty() {
            self.list_state.select(None);
            return;
        }

        let next = match self.list_state.selected() {
            Some(i) if i + 1 < self.visible.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn move_up(&mut self) {
        if self.visible.is_empty() {
            self.list_state.select(None);
            return;
        }

        let prev = match self.list_state.selected() {
            Some(0) | None => self.visible.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.list_state.select(Some(prev));
    }

    /// Switching category abandons any search, like picking a sidebar entry.
    pub fn category_right(&mut self) {
        self.selected_category = (self.selected_category + 1) % CATEGORY_TABS;
        self.search_input.clear();
        self.refresh_filter();
    }

    pub fn category_left(&mut self) {
        self.selected_category = if self.selected_category == 0 {
            CATEGORY_TABS - 1
        } else {
            self.selected_category - 1
        };
        self.search_input.clear();
        self.refresh_filter();
    }

    pub fn running_installs(&self) -> usize {
        self.installs.values().filter(|i| i.is_running()).count()
    }
}
