use async_trait::async_trait;

use crate::error::LoadError;

/// Read-only access to the exported data tree.
///
/// `path` is already prefixed with the configured base; implementations map it
/// onto a URL or a file and report non-success as a [`LoadError`].
#[async_trait]
pub trait DataSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError>;
}
