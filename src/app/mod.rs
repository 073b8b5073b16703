pub mod actions;
pub mod form;
pub mod state;
pub mod update;

pub use state::App;
pub use update::{handle_key, run};
