use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use schema_bridge_core::types::{Identifier, TableDescriptor};
use tokio::sync::{Mutex, RwLock};

use crate::apply::{self, ApplyReport};
use crate::error::BackendError;
use crate::traits::SchemaSink;

/// A warehouse kept as a directory of table schemas.
///
/// Each table lives in `<root>/<table>.json` in the columnar wire format.
/// Applies are serialized through a process-local lock so that concurrent
/// merges into the same table cannot lose fields.
#[derive(Debug, Clone)]
pub struct LocalWarehouse {
    root: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl LocalWarehouse {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn table_path(&self, table_name: &Identifier) -> PathBuf {
        self.root.join(format!("{table_name}.json"))
    }

    async fn load(&self, table_name: &Identifier) -> Result<Option<TableDescriptor>, BackendError> {
        let path = self.table_path(table_name);
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(BackendError::from_io(table_name.as_str(), &e)),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| BackendError::Serialization {
                resource: path.display().to_string(),
                message: e.to_string(),
            })
    }

    async fn store(&self, table: &TableDescriptor) -> Result<(), BackendError> {
        let text = serde_json::to_string_pretty(table).map_err(|e| BackendError::Serialization {
            resource: table.name.to_string(),
            message: e.to_string(),
        })?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| BackendError::from_io(self.root.display().to_string(), &e))?;
        tokio::fs::write(self.table_path(&table.name), text)
            .await
            .map_err(|e| BackendError::from_io(table.name.as_str(), &e))
    }
}

impl SchemaSink for LocalWarehouse {
    async fn apply_schema(
        &self,
        table_name: &Identifier,
        table: &TableDescriptor,
    ) -> Result<ApplyReport, BackendError> {
        let _guard = self.write_lock.lock().await;
        let incoming = renamed(table_name, table);
        let (merged, report) = match self.load(table_name).await? {
            None => (incoming.clone(), apply::created(&incoming)),
            Some(existing) => apply::merge(&existing, &incoming)?,
        };
        if report.changed() {
            self.store(&merged).await?;
        }
        tracing::info!(table = %table_name, outcome = ?report.outcome, "applied table schema");
        Ok(report)
    }

    async fn fetch_schema(
        &self,
        table_name: &Identifier,
    ) -> Result<Option<TableDescriptor>, BackendError> {
        self.load(table_name).await
    }
}

/// Thread-safe, in-memory warehouse.
///
/// Backed by `Arc<RwLock<BTreeMap<Identifier, TableDescriptor>>>`; clones
/// share tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryWarehouse {
    inner: Arc<RwLock<BTreeMap<Identifier, TableDescriptor>>>,
}

impl MemoryWarehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored table, ordered by name.
    pub async fn tables(&self) -> Vec<TableDescriptor> {
        let guard = self.inner.read().await;
        guard.values().cloned().collect()
    }
}

impl SchemaSink for MemoryWarehouse {
    async fn apply_schema(
        &self,
        table_name: &Identifier,
        table: &TableDescriptor,
    ) -> Result<ApplyReport, BackendError> {
        let incoming = renamed(table_name, table);
        let mut guard = self.inner.write().await;
        let (merged, report) = match guard.get(table_name) {
            None => (incoming.clone(), apply::created(&incoming)),
            Some(existing) => apply::merge(existing, &incoming)?,
        };
        if report.changed() {
            guard.insert(table_name.clone(), merged);
        }
        Ok(report)
    }

    async fn fetch_schema(
        &self,
        table_name: &Identifier,
    ) -> Result<Option<TableDescriptor>, BackendError> {
        let guard = self.inner.read().await;
        Ok(guard.get(table_name).cloned())
    }
}

/// The descriptor as it will be stored under `table_name`.
fn renamed(table_name: &Identifier, table: &TableDescriptor) -> TableDescriptor {
    let mut table = table.clone();
    table.name = table_name.clone();
    table
}
