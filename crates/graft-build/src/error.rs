use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("app manifest not found at {}", .0.display())]
    ManifestMissing(PathBuf),

    #[error("missing [package].name in {}; cannot derive a unique bundle identity", .0.display())]
    MissingPackageName(PathBuf),

    #[error("failed to parse manifest: {0}")]
    ManifestParse(String),

    #[error("failed to parse config: {0}")]
    ConfigParse(String),

    #[error("invalid pattern: {0}")]
    Pattern(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
