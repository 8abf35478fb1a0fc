use thiserror::Error;

/// Errors that can occur during preprocessing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("text pattern unavailable: {0}")]
    Pattern(String),
}
