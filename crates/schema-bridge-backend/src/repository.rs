use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::BackendError;
use crate::traits::RepositoryCommitter;

/// A file to write in a repository commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryFile {
    /// Path relative to the repository root.
    pub path: String,
    pub contents: String,
}

impl RepositoryFile {
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// A commit recorded by [`MemoryRepository`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub repository: String,
    pub branch: String,
    pub files: Vec<RepositoryFile>,
    pub message: String,
}

/// Records commits in memory, in the order they were made.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    commits: Arc<RwLock<Vec<Commit>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every commit made so far.
    pub async fn commits(&self) -> Vec<Commit> {
        let guard = self.commits.read().await;
        guard.clone()
    }

    /// Contents of `path` as of the latest commit on `branch` that touched it.
    pub async fn file(&self, repository: &str, branch: &str, path: &str) -> Option<String> {
        let guard = self.commits.read().await;
        guard
            .iter()
            .rev()
            .filter(|c| c.repository == repository && c.branch == branch)
            .flat_map(|c| c.files.iter())
            .find(|f| f.path == path)
            .map(|f| f.contents.clone())
    }
}

impl RepositoryCommitter for MemoryRepository {
    async fn commit_files(
        &self,
        repository: &str,
        branch: &str,
        files: &[RepositoryFile],
        message: &str,
    ) -> Result<(), BackendError> {
        if files.is_empty() {
            return Err(BackendError::InvalidResourceId {
                resource: format!("{repository}@{branch}"),
                reason: "a commit needs at least one file".to_string(),
            });
        }
        let mut guard = self.commits.write().await;
        guard.push(Commit {
            repository: repository.to_string(),
            branch: branch.to_string(),
            files: files.to_vec(),
            message: message.to_string(),
        });
        tracing::info!(repository, branch, files = files.len(), "committed files");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn commits_are_recorded_in_order() {
        let repo = MemoryRepository::new();
        repo.commit_files(
            "legend/models",
            "main",
            &[RepositoryFile::new("employee.pure", "class Employee {\n}")],
            "regenerate employee",
        )
        .await
        .unwrap();
        repo.commit_files(
            "legend/models",
            "main",
            &[RepositoryFile::new(
                "employee.pure",
                "class Employee {\n  newcolumn : String;\n}",
            )],
            "add newcolumn",
        )
        .await
        .unwrap();

        let commits = repo.commits().await;
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].message, "regenerate employee");
        assert_eq!(commits[1].branch, "main");
        assert_eq!(
            repo.file("legend/models", "main", "employee.pure").await.as_deref(),
            Some("class Employee {\n  newcolumn : String;\n}")
        );
        assert!(repo.file("legend/models", "dev", "employee.pure").await.is_none());
    }

    #[tokio::test]
    async fn empty_commit_is_rejected() {
        let repo = MemoryRepository::new();
        let err = repo
            .commit_files("legend/models", "main", &[], "nothing")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::InvalidResourceId { .. }));
        assert!(repo.commits().await.is_empty());
    }
}
