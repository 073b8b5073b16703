//! Directory browser used to pick an installer artifact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    /// Lowercase extensions without the dot. `"*"` accepts every file.
    pub extensions: &'static [&'static str],
}

impl FileFilter {
    pub fn accepts(&self, path: &Path) -> bool {
        if self.extensions.contains(&"*") {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| ext.eq_ignore_ascii_case(wanted))
            })
            .unwrap_or(false)
    }
}

pub const SOFTWARE_FILTERS: [FileFilter; 2] = [
    FileFilter {
        name: "Executables",
        extensions: &["exe", "msi"],
    },
    FileFilter {
        name: "All Files",
        extensions: &["*"],
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    Selected(PathBuf),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct FilePicker {
    pub dir: PathBuf,
    pub entries: Vec<PickerEntry>,
    pub selected: usize,
    pub filter: usize,
    pub filters: &'static [FileFilter],
    pub outcome: Option<PickerOutcome>,
    pub error: Option<String>,
}

impl FilePicker {
    pub fn open(start: impl AsRef<Path>) -> Self {
        let mut picker = Self {
            dir: start.as_ref().to_path_buf(),
            entries: Vec::new(),
            selected: 0,
            filter: 0,
            filters: &SOFTWARE_FILTERS,
            outcome: None,
            error: None,
        };
        picker.refresh();
        picker
    }

    /// Starts next to `current` when it points into an existing directory,
    /// else in the home directory.
    pub fn open_near(current: &str) -> Self {
        let near = Path::new(current)
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty() && dir.is_dir())
            .map(Path::to_path_buf);
        let start = near
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::open(start)
    }

    pub fn active_filter(&self) -> &FileFilter {
        &self.filters[self.filter]
    }

    pub fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn refresh(&mut self) {
        match list_dir(&self.dir, self.active_filter()) {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(dir = %self.dir.display(), error = %err, "cannot list directory");
                self.entries = Vec::new();
                self.error = Some(err.to_string());
            }
        }
        if let Some(parent) = self.dir.parent() {
            self.entries.insert(
                0,
                PickerEntry {
                    name: "..".to_string(),
                    path: parent.to_path_buf(),
                    is_dir: true,
                },
            );
        }
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
    }

    pub fn move_down(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.entries.len();
    }

    pub fn move_up(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.entries.len() - 1
        } else {
            self.selected - 1
        };
    }

    /// Descends into a directory or picks a file.
    pub fn enter(&mut self) {
        let Some(entry) = self.entries.get(self.selected).cloned() else {
            return;
        };
        if entry.is_dir {
            self.change_dir(entry.path);
        } else {
            self.outcome = Some(PickerOutcome::Selected(entry.path));
        }
    }

    pub fn go_up(&mut self) {
        if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
            self.change_dir(parent);
        }
    }

    pub fn go_home(&mut self) {
        if let Some(home) = dirs::home_dir() {
            self.change_dir(home);
        }
    }

    pub fn cycle_filter(&mut self) {
        self.filter = (self.filter + 1) % self.filters.len();
        self.selected = 0;
        self.refresh();
    }

    pub fn cancel(&mut self) {
        self.outcome = Some(PickerOutcome::Cancelled);
    }

    /// `Some(path)` when a file was picked, `None` when cancelled or still open.
    pub fn selected_path(&self) -> Option<&Path> {
        match &self.outcome {
            Some(PickerOutcome::Selected(path)) => Some(path),
            _ => None,
        }
    }

    fn change_dir(&mut self, dir: PathBuf) {
        self.dir = dir;
        self.selected = 0;
        self.refresh();
    }
}

/// Directories first, then files accepted by `filter`, each group by name.
fn list_dir(dir: &Path, filter: &FileFilter) -> io::Result<Vec<PickerEntry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for item in fs::read_dir(dir)? {
        let item = item?;
        let path = item.path();
        let name = item.file_name().to_string_lossy().into_owned();
        if path.is_dir() {
            dirs.push(PickerEntry {
                name,
                path,
                is_dir: true,
            });
        } else if filter.accepts(&path) {
            files.push(PickerEntry {
                name,
                path,
                is_dir: false,
            });
        }
    }
    dirs.sort_by_key(|e| e.name.to_lowercase());
    files.sort_by_key(|e| e.name.to_lowercase());
    dirs.extend(files);
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("setup.exe"), b"").unwrap();
        fs::write(dir.path().join("Package.MSI"), b"").unwrap();
        fs::write(dir.path().join("readme.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("drivers")).unwrap();
        dir
    }

    fn names(picker: &FilePicker) -> Vec<&str> {
        picker.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn executables_filter_hides_other_files() {
        let dir = fixture();
        let picker = FilePicker::open(dir.path());
        assert_eq!(names(&picker), vec!["..", "drivers", "Package.MSI", "setup.exe"]);
    }

    #[test]
    fn all_files_filter_shows_everything() {
        let dir = fixture();
        let mut picker = FilePicker::open(dir.path());
        picker.cycle_filter();
        assert_eq!(picker.active_filter().name, "All Files");
        assert_eq!(
            names(&picker),
            vec!["..", "drivers", "Package.MSI", "readme.txt", "setup.exe"]
        );
    }

    #[test]
    fn entering_a_file_selects_it() {
        let dir = fixture();
        let mut picker = FilePicker::open(dir.path());
        picker.move_up();
        assert_eq!(picker.entries[picker.selected].name, "setup.exe");
        picker.enter();
        assert!(picker.is_complete());
        assert_eq!(picker.selected_path(), Some(dir.path().join("setup.exe").as_path()));
    }

    #[test]
    fn entering_a_directory_descends() {
        let dir = fixture();
        let mut picker = FilePicker::open(dir.path());
        picker.move_down();
        picker.enter();
        assert_eq!(picker.dir, dir.path().join("drivers"));
        assert!(!picker.is_complete());
        picker.go_up();
        assert_eq!(picker.dir, dir.path());
    }

    #[test]
    fn cancel_yields_no_path() {
        let dir = fixture();
        let mut picker = FilePicker::open(dir.path());
        picker.cancel();
        assert!(picker.is_complete());
        assert_eq!(picker.selected_path(), None);
    }

    #[test]
    fn unreadable_directory_reports_error() {
        let dir = fixture();
        let picker = FilePicker::open(dir.path().join("missing"));
        assert!(picker.error.is_some());
        assert_eq!(names(&picker), vec![".."]);
    }
}
