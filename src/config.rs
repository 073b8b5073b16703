//! Optional JSON configuration.
//!
//! Every field has a default, so an absent file, an empty object and a
//! partial object all load.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// JSON catalog that replaces the built-in example entries.
    pub catalog: Option<PathBuf>,
    pub installer: InstallerConfig,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())
            .with_context(|| format!("failed to read config {}", path.as_ref().display()))?;
        let config: AppConfig = serde_json::from_str(&raw)
            .with_context(|| format!("invalid config json in {}", path.as_ref().display()))?;
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// How installers are launched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InstallerConfig {
    /// Delay before each synthetic progress tick.
    pub progress_interval_ms: u64,
    pub exe_silent_args: Vec<String>,
    /// Interpreter that hosts `msiexec`.
    pub msi_interpreter: String,
    pub msi_interpreter_flag: String,
    pub msi_silent_args: Vec<String>,
}

impl InstallerConfig {
    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval_ms = interval.as_millis() as u64;
        self
    }
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            progress_interval_ms: 300,
            exe_silent_args: ["/S", "/silent", "/quiet", "/norestart"]
                .map(String::from)
                .to_vec(),
            msi_interpreter: "cmd.exe".to_string(),
            msi_interpreter_flag: "/c".to_string(),
            msi_silent_args: ["/quiet", "/norestart"].map(String::from).to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn partial_config_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"installer": {{"progressIntervalMs": 0, "msiInterpreter": "wine"}}}}"#
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.catalog, None);
        assert_eq!(config.installer.progress_interval(), Duration::ZERO);
        assert_eq!(config.installer.msi_interpreter, "wine");
        assert_eq!(
            config.installer.exe_silent_args,
            InstallerConfig::default().exe_silent_args
        );
    }

    #[test]
    fn missing_path_means_default() {
        assert_eq!(AppConfig::load_or_default(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn unreadable_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
