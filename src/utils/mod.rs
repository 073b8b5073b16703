pub mod search;

pub use search::truncate_with_ellipsis;
