use std::path::PathBuf;
use thiserror::Error;

/// Failure classes of a manifest run. Every variant carries enough context
/// (offending path or modpack) to fix the source tree.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("failed to read {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognized top-level directory {dir:?} for {path}")]
    UnrecognizedCategory { dir: String, path: String },

    #[error("missing server_config.json in {modpack_root:?}")]
    MissingConfig { modpack_root: PathBuf },

    #[error("invalid server_config.json at {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("manifest validation failed for {context}: {reason}")]
    Validation { context: String, reason: String },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize manifest: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("invalid exclude pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, MapError>;
