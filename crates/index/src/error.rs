use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort corpus construction.
///
/// Problems with individual files never show up here: they are logged and the
/// file is skipped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IndexError {
    #[error("corpus directory not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("corpus path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("failed to list corpus directory {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    #[error("invalid corpus config: {0}")]
    InvalidConfig(String),
}
