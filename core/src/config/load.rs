use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::types::{AppConfig, FsSourceConfig, HttpSourceConfig, SourceConfig};

const LOCAL_CONFIG: &str = "trajview.toml";

/// `explicit`, else `./trajview.toml`, else `~/.trajview/config.toml`; the
/// first one that exists.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return Some(local);
    }
    dirs::home_dir()
        .map(|h| h.join(".trajview").join("config.toml"))
        .filter(|p| p.exists())
}

pub fn load_from_str(raw: &str, path: &Path) -> Result<AppConfig, ConfigError> {
    toml::from_str::<AppConfig>(raw).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// File (or defaults) with environment overrides applied on top.
pub fn load(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut cfg = match resolve_config_path(explicit) {
        Some(path) => {
            let s = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.display().to_string(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "loaded config file");
            load_from_str(&s, &path)?
        }
        None => AppConfig::default(),
    };
    apply_env(&mut cfg, |k| std::env::var(k).ok());
    Ok(cfg)
}

fn apply_env(cfg: &mut AppConfig, var: impl Fn(&str) -> Option<String>) {
    let var = |k: &str| var(k).filter(|v| !v.trim().is_empty());

    if let Some(url) = var("TRAJVIEW_DATA_URL") {
        let timeout_ms = match &cfg.source {
            SourceConfig::Http(h) => h.timeout_ms,
            SourceConfig::Fs(_) => HttpSourceConfig::new("").timeout_ms,
        };
        cfg.source = SourceConfig::Http(HttpSourceConfig {
            base_url: url,
            timeout_ms,
        });
    } else if let Some(root) = var("TRAJVIEW_DATA_DIR") {
        cfg.source = SourceConfig::Fs(FsSourceConfig { root });
    }
    if let Some(prefix) = var("TRAJVIEW_BASE_PREFIX") {
        cfg.base_prefix = prefix;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults_read_the_working_directory() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.source,
            SourceConfig::Fs(FsSourceConfig { root: ".".into() })
        );
        assert_eq!(cfg.http_server.port, 8080);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn parses_http_provider() {
        let raw = r#"
base_prefix = "/viewer/"

[source]
provider = "http"
base_url = "http://localhost:9000"

[http_server]
port = 9191

[logging]
level = "debug"
dir = "/tmp/trajview-logs"
"#;
        let cfg = load_from_str(raw, Path::new("trajview.toml")).unwrap();
        assert_eq!(
            cfg.source,
            SourceConfig::Http(HttpSourceConfig {
                base_url: "http://localhost:9000".into(),
                timeout_ms: 10_000,
            })
        );
        assert_eq!(cfg.base_prefix, "/viewer/");
        assert_eq!(cfg.http_server.port, 9191);
        assert_eq!(cfg.http_server.host, "127.0.0.1");
        assert_eq!(cfg.logging.dir.as_deref(), Some("/tmp/trajview-logs"));
    }

    #[test]
    fn unknown_provider_is_a_parse_error() {
        let err = load_from_str("[source]\nprovider = \"s3\"\n", Path::new("x.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[source]\nprovider = \"fs\"\nroot = \"~/runs\"").unwrap();
        let cfg = load(Some(file.path())).unwrap();
        assert_eq!(
            cfg.source,
            SourceConfig::Fs(FsSourceConfig {
                root: "~/runs".into()
            })
        );
    }

    #[test]
    fn missing_explicit_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn env_overrides_take_precedence() {
        let env: HashMap<&str, &str> = [
            ("TRAJVIEW_DATA_URL", "http://data.local"),
            ("TRAJVIEW_BASE_PREFIX", "/sub/"),
        ]
        .into_iter()
        .collect();
        let mut cfg = AppConfig::default();
        apply_env(&mut cfg, |k| env.get(k).map(|v| v.to_string()));
        assert!(matches!(&cfg.source, SourceConfig::Http(h) if h.base_url == "http://data.local"));
        assert_eq!(cfg.base_prefix, "/sub/");

        let mut cfg = AppConfig::default();
        apply_env(&mut cfg, |k| {
            (k == "TRAJVIEW_DATA_DIR").then(|| "/srv/runs".to_string())
        });
        assert!(matches!(&cfg.source, SourceConfig::Fs(f) if f.root == "/srv/runs"));
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut cfg = AppConfig::default();
        apply_env(&mut cfg, |_| Some("  ".to_string()));
        assert_eq!(cfg.base_prefix, "");
        assert!(matches!(cfg.source, SourceConfig::Fs(_)));
    }
}
