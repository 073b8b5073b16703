use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::registry::model::CategoryFilter;

/// SetupHub - catalog and launch local software installers
#[derive(Parser, Debug)]
#[command(name = "setuphub")]
#[command(about = "Catalog local .exe/.msi installers and run them from a terminal UI")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON catalog to load instead of the built-in entries.
    ///
    /// Overrides the `catalog` key of the configuration file.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Log verbosity. `RUST_LOG` takes precedence when set.
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive catalog (default)
    Tui,
    /// Print catalog entries and exit
    List {
        /// Category to show, or `all`
        #[arg(long, default_value = "all")]
        category: CategoryFilter,

        /// Case-insensitive match on name or description; wins over --category
        #[arg(long)]
        search: Option<String>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Run one installer without the UI
    Install {
        /// Path to a .exe or .msi file
        path: String,

        /// Pass unattended-install flags to the installer
        #[arg(long)]
        silent: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
