use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use trajview_core::error::LoadError;
use trajview_core::loader::DataSource;

/// Reads the data tree from a static file server.
pub struct HttpDataSource {
    client: Client,
    base_url: String,
}

impl HttpDataSource {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>, LoadError> {
        let url = self.url_for(path);
        let transport = |e: reqwest::Error| LoadError::Transport {
            path: path.to_string(),
            source: e.into(),
        };

        let resp = self.client.get(&url).send().await.map_err(transport)?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LoadError::NotFound { path: path.into() });
        }
        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "data request rejected");
            return Err(LoadError::Status {
                path: path.into(),
                status: status.as_u16(),
            });
        }
        let body = resp.bytes().await.map_err(transport)?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_body_on_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/data/runs.json")
            .with_status(200)
            .with_body(r#"{"runs": []}"#)
            .create_async()
            .await;

        let src = HttpDataSource::new(format!("{}/", server.url()), 1_000).unwrap();
        let body = src.fetch("data/runs.json").await.unwrap();
        assert_eq!(body, br#"{"runs": []}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn maps_404_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/data/run_a/task_9.json")
            .with_status(404)
            .create_async()
            .await;

        let src = HttpDataSource::new(server.url(), 1_000).unwrap();
        let err = src.fetch("/data/run_a/task_9.json").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.path(), "/data/run_a/task_9.json");
    }

    #[tokio::test]
    async fn other_failures_keep_the_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/data/index.json")
            .with_status(500)
            .create_async()
            .await;

        let src = HttpDataSource::new(server.url(), 1_000).unwrap();
        let err = src.fetch("data/index.json").await.unwrap_err();
        assert!(matches!(err, LoadError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let src = HttpDataSource::new("http://127.0.0.1:1", 500).unwrap();
        let err = src.fetch("data/runs.json").await.unwrap_err();
        assert!(matches!(err, LoadError::Transport { .. }));
    }
}
