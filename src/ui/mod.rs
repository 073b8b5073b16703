pub mod components;
pub mod draw;
pub mod layout;
pub mod theme;
