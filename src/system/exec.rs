use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use which::which;

use super::kind::InstallerKind;
use crate::config::InstallerConfig;

/// A fully-resolved process invocation for one installer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl InstallCommand {
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Builds the command line for `path`, or `None` when the kind is unsupported.
pub fn command_for_kind(
    kind: InstallerKind,
    path: &str,
    silent: bool,
    config: &InstallerConfig,
) -> Option<InstallCommand> {
    match kind {
        InstallerKind::Exe => Some(InstallCommand {
            program: path.to_string(),
            args: if silent {
                config.exe_silent_args.clone()
            } else {
                Vec::new()
            },
        }),
        InstallerKind::Msi => {
            let mut args = vec![
                config.msi_interpreter_flag.clone(),
                "msiexec".to_string(),
                "/i".to_string(),
                path.to_string(),
            ];
            if silent {
                args.extend(config.msi_silent_args.iter().cloned());
            }
            Some(InstallCommand {
                program: config.msi_interpreter.clone(),
                args,
            })
        }
        InstallerKind::Unsupported => None,
    }
}

/// Runs an [`InstallCommand`] to completion.
///
/// Returns the exit code, or `None` when the process ended without one
/// (killed by a signal).
#[async_trait]
pub trait Launcher: Send + Sync {
    async fn run(&self, command: &InstallCommand) -> io::Result<Option<i32>>;
}

/// Launches real child processes with detached stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

#[async_trait]
impl Launcher for SystemLauncher {
    async fn run(&self, command: &InstallCommand) -> io::Result<Option<i32>> {
        let program = resolve_program(&command.program)?;
        tracing::debug!(program = %program.display(), args = ?command.args, "spawning installer");
        let status = Command::new(&program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await?;
        Ok(status.code())
    }
}

/// A program given with a directory is used as-is. A bare name is taken from
/// the working directory when such a file exists there, otherwise from `PATH`.
pub fn resolve_program(program: &str) -> io::Result<PathBuf> {
    let path = Path::new(program);
    if path.components().count() > 1 || path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    if path.is_file() {
        return Ok(std::env::current_dir()?.join(path));
    }
    which(program).map_err(|_| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("'{program}' was not found in the working directory or on PATH"),
        )
    })
}
