pub mod exec;
pub mod installer;
pub mod kind;
pub mod os;
pub mod picker;
