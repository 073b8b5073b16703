//! Install invoker.
//!
//! One call to [`Installer::install`] is one invocation:
//!
//! ```text
//! Idle -> Validating -> ProgressSimulating -> ProcessSpawned -> Succeeded
//!             \________________\___________________\_________-> Failed
//! ```
//!
//! Progress ticks are cosmetic. They are all emitted before the child
//! process starts and say nothing about its state.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::exec::{command_for_kind, InstallCommand, Launcher, SystemLauncher};
use super::kind::InstallerKind;
use crate::config::InstallerConfig;
use crate::error::InstallError;

pub const PROGRESS_STEP: u8 = 10;
pub const PROGRESS_MAX: u8 = 100;

/// The fixed synthetic progress sequence: 0, 10, ..., 100.
pub fn progress_ticks() -> impl Iterator<Item = u8> {
    (0..=PROGRESS_MAX).step_by(PROGRESS_STEP as usize)
}

/// Terminal outcome of an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
}

impl InstallResult {
    pub fn succeeded(code: i32) -> Self {
        Self {
            success: true,
            error: None,
            code: Some(code),
        }
    }
}

impl From<InstallError> for InstallResult {
    fn from(err: InstallError) -> Self {
        Self {
            success: false,
            code: err.code(),
            error: Some(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPhase {
    Idle,
    Validating,
    ProgressSimulating,
    ProcessSpawned,
    Succeeded,
    Failed,
}

impl InstallPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, InstallPhase::Succeeded | InstallPhase::Failed)
    }

    pub fn can_advance_to(self, next: InstallPhase) -> bool {
        use InstallPhase::*;
        match (self, next) {
            (Idle, Validating)
            | (Validating, ProgressSimulating)
            | (ProgressSimulating, ProcessSpawned)
            | (ProcessSpawned, Succeeded) => true,
            (current, Failed) => !current.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for InstallPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InstallPhase::Idle => "idle",
            InstallPhase::Validating => "validating",
            InstallPhase::ProgressSimulating => "simulating progress",
            InstallPhase::ProcessSpawned => "process spawned",
            InstallPhase::Succeeded => "succeeded",
            InstallPhase::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// Phase bookkeeping for one invocation.
#[derive(Debug)]
struct Invocation<'a> {
    path: &'a str,
    phase: InstallPhase,
}

impl<'a> Invocation<'a> {
    fn new(path: &'a str) -> Self {
        Self {
            path,
            phase: InstallPhase::Idle,
        }
    }

    fn advance(&mut self, next: InstallPhase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "invalid install transition {} -> {}",
            self.phase,
            next
        );
        tracing::debug!(path = self.path, from = %self.phase, to = %next, "install phase");
        self.phase = next;
    }
}

pub struct Installer<L = SystemLauncher> {
    launcher: L,
    config: InstallerConfig,
}

impl Installer<SystemLauncher> {
    pub fn new(config: InstallerConfig) -> Self {
        Self::with_launcher(SystemLauncher, config)
    }
}

impl<L: Launcher> Installer<L> {
    pub fn with_launcher(launcher: L, config: InstallerConfig) -> Self {
        Self { launcher, config }
    }

    /// Installs the artifact at `path`, reporting progress through `on_progress`.
    ///
    /// Never fails: every error is folded into the returned [`InstallResult`].
    pub async fn install<F>(&self, path: &str, silent: bool, mut on_progress: F) -> InstallResult
    where
        F: FnMut(u8) + Send,
    {
        let mut invocation = Invocation::new(path);
        match self
            .run(&mut invocation, path, silent, &mut on_progress)
            .await
        {
            Ok(code) => {
                invocation.advance(InstallPhase::Succeeded);
                tracing::info!(path, code, "installation finished");
                InstallResult::succeeded(code)
            }
            Err(err) => {
                invocation.advance(InstallPhase::Failed);
                tracing::warn!(path, error = %err, "installation failed");
                InstallResult::from(err)
            }
        }
    }

    async fn run<F>(
        &self,
        invocation: &mut Invocation<'_>,
        path: &str,
        silent: bool,
        on_progress: &mut F,
    ) -> Result<i32, InstallError>
    where
        F: FnMut(u8) + Send,
    {
        invocation.advance(InstallPhase::Validating);
        let command = self.prepare(path, silent)?;

        invocation.advance(InstallPhase::ProgressSimulating);
        let interval = self.config.progress_interval();
        for tick in progress_ticks() {
            if !interval.is_zero() {
                tokio::time::sleep(interval).await;
            }
            on_progress(tick);
        }

        invocation.advance(InstallPhase::ProcessSpawned);
        tracing::info!(path, command = %command.display(), "launching installer");
        let code = self
            .launcher
            .run(&command)
            .await
            .map_err(|source| InstallError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        match code {
            Some(0) => Ok(0),
            Some(code) => Err(InstallError::ProcessFailure { code }),
            None => Err(InstallError::Terminated),
        }
    }

    fn prepare(&self, path: &str, silent: bool) -> Result<InstallCommand, InstallError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(InstallError::InvalidInput);
        }
        let kind = InstallerKind::from_path(path);
        command_for_kind(kind, path, silent, &self.config).ok_or(InstallError::UnsupportedFormat)
    }
}
