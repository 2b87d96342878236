//! Loader contract: typed access to runs, task indices and task records.

pub mod paths;
pub mod r#trait;

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::LoadError;
use crate::model::{RunList, TaskIndex, TaskRecord};

pub use paths::{sanitize_task_id, ResourcePath};
pub use r#trait::DataSource;

#[derive(Clone)]
pub struct Loader {
    source: Arc<dyn DataSource>,
    base_prefix: String,
}

impl Loader {
    pub fn new(source: Arc<dyn DataSource>, base_prefix: impl Into<String>) -> Self {
        Self {
            source,
            base_prefix: base_prefix.into(),
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub async fn runs(&self) -> Result<RunList, LoadError> {
        self.load(&ResourcePath::runs()).await
    }

    pub async fn index(&self, run_id: Option<&str>) -> Result<TaskIndex, LoadError> {
        self.load(&ResourcePath::index(run_id)).await
    }

    /// Never cached: every selection re-fetches the record.
    pub async fn task(&self, run_id: Option<&str>, task_id: &str) -> Result<TaskRecord, LoadError> {
        self.load(&ResourcePath::task(run_id, task_id)).await
    }

    async fn load<T: DeserializeOwned>(&self, resource: &ResourcePath) -> Result<T, LoadError> {
        let path = resource.with_base(&self.base_prefix);
        tracing::debug!(path = %path, source = self.source.name(), "fetching resource");

        let bytes = self.source.fetch(&path).await.inspect_err(|e| {
            tracing::warn!(path = %path, error = %e, "resource load failed");
        })?;

        serde_json::from_slice(&bytes).map_err(|source| {
            tracing::warn!(path = %path, error = %source, "resource is not valid json");
            LoadError::Decode { path, source }
        })
    }
}
