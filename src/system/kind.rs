/// Installer technology, decided once from the artifact's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallerKind {
    Exe,
    Msi,
    Unsupported,
}

impl InstallerKind {
    pub fn from_path(path: &str) -> Self {
        let lower = path.trim_end().to_ascii_lowercase();
        if lower.ends_with(".exe") {
            InstallerKind::Exe
        } else if lower.ends_with(".msi") {
            InstallerKind::Msi
        } else {
            InstallerKind::Unsupported
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InstallerKind::Exe => "executable",
            InstallerKind::Msi => "windows installer package",
            InstallerKind::Unsupported => "unsupported",
        }
    }
}
