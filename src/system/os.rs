use std::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Wsl,
    Mac,
    Windows,
    Unknown,
}

impl Platform {
    pub fn detect() -> Self {
        if cfg!(target_os = "windows") {
            return Self::Windows;
        }
        if cfg!(target_os = "macos") {
            return Self::Mac;
        }
        if is_wsl() {
            return Self::Wsl;
        }
        if cfg!(target_os = "linux") {
            return Self::Linux;
        }
        Self::Unknown
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Linux => "Linux",
            Platform::Wsl => "WSL",
            Platform::Mac => "macOS",
            Platform::Windows => "Windows",
            Platform::Unknown => "Unknown",
        }
    }

    /// Whether `.exe`/`.msi` installers can be started from here. WSL can
    /// hand them to Windows through interop.
    pub fn runs_windows_installers(&self) -> bool {
        matches!(self, Platform::Windows | Platform::Wsl)
    }
}

pub fn is_wsl() -> bool {
    if std::env::var("WSL_DISTRO_NAME").is_ok() || std::env::var("WSL_INTEROP").is_ok() {
        return true;
    }

    if let Ok(version) = fs::read_to_string("/proc/version") {
        return version.to_ascii_lowercase().contains("microsoft");
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_windows_hosts_run_installers() {
        assert!(Platform::Windows.runs_windows_installers());
        assert!(Platform::Wsl.runs_windows_installers());
        assert!(!Platform::Linux.runs_windows_installers());
        assert!(!Platform::Mac.runs_windows_installers());
    }

    #[test]
    fn detection_matches_build_target() {
        let platform = Platform::detect();
        if cfg!(target_os = "windows") {
            assert_eq!(platform, Platform::Windows);
        }
        if cfg!(target_os = "macos") {
            assert_eq!(platform, Platform::Mac);
        }
    }
}
