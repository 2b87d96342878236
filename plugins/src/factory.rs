use std::sync::Arc;

use anyhow::Result;

use trajview_core::config::{AppConfig, SourceConfig};
use trajview_core::loader::{DataSource, Loader};

use crate::source::{FsDataSource, HttpDataSource};

pub fn build_source(cfg: &AppConfig) -> Result<Arc<dyn DataSource>> {
    match &cfg.source {
        SourceConfig::Http(http_cfg) => Ok(Arc::new(HttpDataSource::new(
            http_cfg.base_url.clone(),
            http_cfg.timeout_ms,
        )?)),
        SourceConfig::Fs(fs_cfg) => Ok(Arc::new(FsDataSource::new(&fs_cfg.root))),
    }
}

pub fn build_loader(cfg: &AppConfig) -> Result<Loader> {
    let source = build_source(cfg)?;
    tracing::info!(source = source.name(), base_prefix = %cfg.base_prefix, "data source ready");
    Ok(Loader::new(source, cfg.base_prefix.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use trajview_core::config::HttpSourceConfig;

    #[test]
    fn picks_provider_from_config() {
        let mut cfg = AppConfig::default();
        assert_eq!(build_source(&cfg).unwrap().name(), "fs");

        cfg.source = SourceConfig::Http(HttpSourceConfig::new("http://localhost:8000"));
        assert_eq!(build_source(&cfg).unwrap().name(), "http");
    }
}
