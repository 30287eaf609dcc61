use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::BackendError;
use crate::traits::ResourceStore;

/// Resources stored as files under a root directory.
///
/// Resource ids are relative paths (`model/employee.pure`); ids that are
/// absolute or climb out of the root with `..` are rejected.
#[derive(Debug, Clone)]
pub struct LocalResourceStore {
    root: PathBuf,
}

impl LocalResourceStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, resource_id: &str) -> Result<PathBuf, BackendError> {
        let invalid = |reason: &str| BackendError::InvalidResourceId {
            resource: resource_id.to_string(),
            reason: reason.to_string(),
        };
        if resource_id.is_empty() {
            return Err(invalid("empty id"));
        }
        let relative = Path::new(resource_id);
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir => return Err(invalid("escapes the store root")),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid("must be a relative path"))
                }
            }
        }
        Ok(self.root.join(relative))
    }
}

impl ResourceStore for LocalResourceStore {
    async fn fetch_text(&self, resource_id: &str) -> Result<String, BackendError> {
        let path = self.resolve(resource_id)?;
        tracing::debug!(resource = resource_id, path = %path.display(), "fetching resource");
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| BackendError::from_io(resource_id, &e))
    }

    async fn store_text(&self, resource_id: &str, text: &str) -> Result<(), BackendError> {
        let path = self.resolve(resource_id)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| BackendError::from_io(resource_id, &e))?;
        }
        tracing::debug!(resource = resource_id, bytes = text.len(), "storing resource");
        tokio::fs::write(&path, text)
            .await
            .map_err(|e| BackendError::from_io(resource_id, &e))
    }
}

/// Thread-safe, in-memory resource store.
///
/// Backed by `Arc<RwLock<BTreeMap<String, String>>>`; clones share contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryResourceStore {
    inner: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemoryResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `(id, text)` pairs.
    pub fn with_resources<I, K, V>(resources: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = resources
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// Ids of every stored resource, in order.
    pub async fn ids(&self) -> Vec<String> {
        let guard = self.inner.read().await;
        guard.keys().cloned().collect()
    }
}

impl ResourceStore for MemoryResourceStore {
    async fn fetch_text(&self, resource_id: &str) -> Result<String, BackendError> {
        let guard = self.inner.read().await;
        guard
            .get(resource_id)
            .cloned()
            .ok_or_else(|| BackendError::ResourceNotFound {
                resource: resource_id.to_string(),
            })
    }

    async fn store_text(&self, resource_id: &str, text: &str) -> Result<(), BackendError> {
        let mut guard = self.inner.write().await;
        guard.insert(resource_id.to_string(), text.to_string());
        Ok(())
    }
}
