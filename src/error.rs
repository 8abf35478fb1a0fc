use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use index::IndexError;
use ingest::ExtractError;
use matcher::MatchError;
use similarity::SimilarityError;

use crate::config::ConfigLoadError;

/// Errors surfaced to callers of a check.
///
/// File-system and argument problems are reported before any scoring starts.
/// Scoring problems are normally absorbed by the similarity fallback; only a
/// failure of the fallback itself becomes [`CheckError::Runtime`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// The query file or the corpus directory does not exist.
    NotFound { path: PathBuf },
    /// The corpus path is not a directory, the query format is unsupported,
    /// or an input is otherwise unusable.
    InvalidArgument(String),
    /// Reading or decoding an input failed.
    Io { path: PathBuf, message: String },
    /// Scoring failed with no fallback left.
    Runtime(String),
    /// A stage configuration is invalid.
    Config(String),
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::NotFound { path } => write!(f, "not found: {}", path.display()),
            CheckError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            CheckError::Io { path, message } => {
                write!(f, "i/o failure on {}: {message}", path.display())
            }
            CheckError::Runtime(msg) => write!(f, "originality check failed: {msg}"),
            CheckError::Config(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl Error for CheckError {}

impl From<ExtractError> for CheckError {
    fn from(value: ExtractError) -> Self {
        match value {
            ExtractError::NotFound { path } => CheckError::NotFound { path },
            ExtractError::UnsupportedFormat { .. } | ExtractError::TooLarge { .. } => {
                CheckError::InvalidArgument(value.to_string())
            }
            ExtractError::Io { path, message } | ExtractError::Decode { path, message } => {
                CheckError::Io { path, message }
            }
            ExtractError::InvalidConfig(msg) => CheckError::Config(msg),
            other => CheckError::Runtime(other.to_string()),
        }
    }
}

impl From<IndexError> for CheckError {
    fn from(value: IndexError) -> Self {
        match value {
            IndexError::NotFound { path } => CheckError::NotFound { path },
            IndexError::NotADirectory { .. } => CheckError::InvalidArgument(value.to_string()),
            IndexError::Io { path, message } => CheckError::Io { path, message },
            IndexError::InvalidConfig(msg) => CheckError::Config(msg),
            other => CheckError::Runtime(other.to_string()),
        }
    }
}

impl From<SimilarityError> for CheckError {
    fn from(value: SimilarityError) -> Self {
        match value {
            SimilarityError::InvalidConfigVersion { .. } => CheckError::Config(value.to_string()),
            other => CheckError::Runtime(other.to_string()),
        }
    }
}

impl From<MatchError> for CheckError {
    fn from(value: MatchError) -> Self {
        match value {
            MatchError::InvalidConfig(msg) => CheckError::Config(msg),
            MatchError::Similarity(err) => err.into(),
            other => CheckError::Runtime(other.to_string()),
        }
    }
}

impl From<ConfigLoadError> for CheckError {
    fn from(value: ConfigLoadError) -> Self {
        CheckError::Config(value.to_string())
    }
}
