//! Domain errors for the catalog and the install invoker.

use thiserror::Error;

use crate::registry::model::EntryId;

/// Errors raised by catalog store lookups and field parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no catalog entry with id {0}")]
    NotFound(EntryId),

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("unknown size unit '{0}' (expected KB, MB or GB)")]
    UnknownSizeUnit(String),

    #[error("unknown install method '{0}' (expected normal or silent)")]
    UnknownInstallMethod(String),
}

/// Everything that can stop an installation from succeeding.
///
/// None of these escape an invocation: [`crate::system::installer::Installer::install`]
/// folds them into an [`InstallResult`](crate::system::installer::InstallResult).
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("No path provided")]
    InvalidInput,

    #[error("Unsupported file format")]
    UnsupportedFormat,

    #[error("installer exited with code {code}")]
    ProcessFailure { code: i32 },

    #[error("installer was terminated before reporting an exit code")]
    Terminated,

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl InstallError {
    /// Exit code carried by the error, if the process got far enough to report one.
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::ProcessFailure { code } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_error_messages_match_result_text() {
        assert_eq!(InstallError::InvalidInput.to_string(), "No path provided");
        assert_eq!(
            InstallError::UnsupportedFormat.to_string(),
            "Unsupported file format"
        );
        assert_eq!(
            InstallError::ProcessFailure { code: 1603 }.to_string(),
            "installer exited with code 1603"
        );
    }

    #[test]
    fn only_process_failure_carries_a_code() {
        assert_eq!(InstallError::ProcessFailure { code: 2 }.code(), Some(2));
        assert_eq!(InstallError::Terminated.code(), None);
        let spawn = InstallError::Spawn {
            program: "setup.exe".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(spawn.code(), None);
        assert!(spawn.to_string().contains("setup.exe"));
        assert!(spawn.to_string().contains("missing"));
    }
}
