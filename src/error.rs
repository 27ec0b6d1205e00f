use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid form definition in {}: {source}", .path.display())]
    Form {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config in {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize model: {0}")]
    Json(#[from] serde_json::Error),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}
