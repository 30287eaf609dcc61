use std::future::Future;

use schema_bridge_core::types::{Identifier, TableDescriptor};

use crate::apply::ApplyReport;
use crate::error::BackendError;
use crate::repository::RepositoryFile;

/// Text resources addressed by id: the schema repository checkout on one
/// side of the pipeline, the staging bucket on the other.
///
/// Uses RPITIT (return position impl Trait in trait) for async methods,
/// avoiding the `async-trait` crate.
pub trait ResourceStore: Send + Sync {
    /// Fetch the full text of a resource.
    ///
    /// Returns `BackendError::ResourceNotFound` if nothing is stored under
    /// `resource_id`, `BackendError::Unavailable` on transient failures.
    fn fetch_text(
        &self,
        resource_id: &str,
    ) -> impl Future<Output = Result<String, BackendError>> + Send;

    /// Store text under `resource_id`, replacing any previous content.
    fn store_text(
        &self,
        resource_id: &str,
        text: &str,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;
}

/// The warehouse side: where built table descriptors are applied.
pub trait SchemaSink: Send + Sync {
    /// Apply a table descriptor to `table_name`.
    ///
    /// Idempotent when nothing changed. Otherwise additive only: new fields
    /// are appended, existing fields are never altered or dropped. A field
    /// whose type differs from the stored one is a
    /// `BackendError::IncompatibleChange`.
    fn apply_schema(
        &self,
        table_name: &Identifier,
        table: &TableDescriptor,
    ) -> impl Future<Output = Result<ApplyReport, BackendError>> + Send;

    /// Read back the stored descriptor for `table_name`.
    ///
    /// Returns `None` if the table has never been applied.
    fn fetch_schema(
        &self,
        table_name: &Identifier,
    ) -> impl Future<Output = Result<Option<TableDescriptor>, BackendError>> + Send;
}

/// Commits regenerated model files back to the schema repository.
pub trait RepositoryCommitter: Send + Sync {
    /// Commit `files` to `branch` of `repository` as a single commit.
    fn commit_files(
        &self,
        repository: &str,
        branch: &str,
        files: &[RepositoryFile],
        message: &str,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;
}
