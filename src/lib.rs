//! SetupHub: a catalog of local software installers with an async install
//! backend and a terminal front end.

pub mod app;
pub mod bridge;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod system;
pub mod ui;
pub mod utils;
