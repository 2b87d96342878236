use thiserror::Error;

/// Failure to obtain one resource. Always scoped to the panel that asked for it.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("not found: {path}")]
    NotFound { path: String },

    #[error("unexpected status {status} for {path}")]
    Status { path: String, status: u16 },

    #[error("transport error for {path}")]
    Transport {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("io error for {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json in {path}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub fn path(&self) -> &str {
        match self {
            LoadError::NotFound { path }
            | LoadError::Status { path, .. }
            | LoadError::Transport { path, .. }
            | LoadError::Io { path, .. }
            | LoadError::Decode { path, .. } => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error in {path}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("data source error: {0}")]
    Source(#[source] anyhow::Error),

    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Command(String),

    #[error("server error: {0}")]
    Serve(#[source] anyhow::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
