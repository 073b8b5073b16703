pub mod loader;
pub mod model;
pub mod seed;
pub mod store;

pub use model::{
    Category, CategoryFilter, EntryId, InstallMethod, SizeUnit, SoftwareDraft, SoftwareEntry,
};
pub use store::CatalogStore;
