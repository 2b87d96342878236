use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use trajview_core::error::LoadError;
use trajview_core::loader::DataSource;

/// Reads the data tree from a local directory.
pub struct FsDataSource {
    root: PathBuf,
}

impl FsDataSource {
    pub fn new(root: &str) -> Self {
        let expanded = shellexpand::tilde(root);
        Self {
            root: PathBuf::from(expanded.as_ref()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Only plain segments are accepted; `..` or a drive prefix never escapes
    /// the root.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let mut out = self.root.clone();
        for comp in Path::new(path.trim_start_matches('/')).components() {
            match comp {
                Component::Normal(seg) => out.push(seg),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(out)
    }
}

#[async_trait]
impl DataSource for FsDataSource {
    fn name(&self) -> &str {
        "fs"
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let Some(full) = self.resolve(path) else {
            tracing::warn!(path, "rejecting path outside the data root");
            return Err(LoadError::NotFound { path: path.into() });
        };
        tokio::fs::read(&full).await.map_err(|source| match source.kind() {
            ErrorKind::NotFound => LoadError::NotFound { path: path.into() },
            _ => LoadError::Io {
                path: path.into(),
                source,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data/run_a")).unwrap();
        std::fs::write(
            dir.path().join("data/run_a/index.json"),
            r#"{"tasks": []}"#,
        )
        .unwrap();
        dir
    }

    #[tokio::test]
    async fn reads_relative_to_root() {
        let dir = tree();
        let src = FsDataSource::new(dir.path().to_str().unwrap());
        let body = src.fetch("/data/run_a/index.json").await.unwrap();
        assert_eq!(body, br#"{"tasks": []}"#);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tree();
        let src = FsDataSource::new(dir.path().to_str().unwrap());
        let err = src.fetch("data/run_a/task_1.json").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn parent_segments_are_rejected() {
        let dir = tree();
        let src = FsDataSource::new(dir.path().join("data").to_str().unwrap());
        let err = src.fetch("../data/run_a/index.json").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn directory_read_is_an_io_error() {
        let dir = tree();
        let src = FsDataSource::new(dir.path().to_str().unwrap());
        let err = src.fetch("data/run_a").await.unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn expands_home() {
        let src = FsDataSource::new("~/runs");
        assert!(!src.root().starts_with("~"));
    }
}
