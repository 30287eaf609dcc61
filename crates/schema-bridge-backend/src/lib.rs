//! Collaborators around the schema translator: where DSL text is fetched
//! from and stored, the warehouse that built tables are applied to, and the
//! repository regenerated models are committed back to.

pub mod apply;
pub mod error;
pub mod repository;
pub mod store;
pub mod traits;
pub mod warehouse;

pub use apply::{ApplyOutcome, ApplyReport};
pub use error::BackendError;
pub use repository::{Commit, MemoryRepository, RepositoryFile};
pub use store::{LocalResourceStore, MemoryResourceStore};
pub use traits::{RepositoryCommitter, ResourceStore, SchemaSink};
pub use warehouse::{LocalWarehouse, MemoryWarehouse};
