//! Subcommand handlers and the flag-to-config overrides.

pub mod cli;
pub mod join;
pub mod runs;
pub mod serve;
pub mod show;

use trajview_core::config::{AppConfig, FsSourceConfig, HttpSourceConfig, SourceConfig};

/// Command-line flags win over file and environment values.
pub fn apply_overrides(cfg: &mut AppConfig, args: &cli::Args) {
    if let Some(url) = &args.data_url {
        let timeout_ms = match &cfg.source {
            SourceConfig::Http(h) => h.timeout_ms,
            SourceConfig::Fs(_) => HttpSourceConfig::new("").timeout_ms,
        };
        cfg.source = SourceConfig::Http(HttpSourceConfig {
            base_url: url.clone(),
            timeout_ms,
        });
    }
    if let Some(dir) = &args.data_dir {
        cfg.source = SourceConfig::Fs(FsSourceConfig { root: dir.clone() });
    }
    if let Some(prefix) = &args.base_prefix {
        cfg.base_prefix = prefix.clone();
    }
    if let cli::Commands::Serve(serve) = &args.command {
        if let Some(host) = &serve.host {
            cfg.http_server.host = host.clone();
        }
        if let Some(port) = serve.port {
            cfg.http_server.port = port;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn flags_override_config() {
        let args = cli::Args::parse_from([
            "trajview",
            "serve",
            "--port",
            "9000",
            "--data-url",
            "http://localhost:8000",
            "--base-prefix",
            "/v/",
        ]);
        let mut cfg = AppConfig::default();
        apply_overrides(&mut cfg, &args);
        assert_eq!(cfg.http_server.port, 9000);
        assert_eq!(cfg.http_server.host, "127.0.0.1");
        assert_eq!(cfg.base_prefix, "/v/");
        assert!(matches!(&cfg.source, SourceConfig::Http(h) if h.base_url == "http://localhost:8000"));
    }
}
