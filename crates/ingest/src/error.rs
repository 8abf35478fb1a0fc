//! Error types produced by text extraction.
//!
//! | Error | Category | Description |
//! |-------|----------|-------------|
//! | [`NotFound`](ExtractError::NotFound) | File system | Path does not exist or is not a file |
//! | [`UnsupportedFormat`](ExtractError::UnsupportedFormat) | Argument | No decoder for this format in this build |
//! | [`TooLarge`](ExtractError::TooLarge) | Argument | File exceeds `max_file_bytes` |
//! | [`Io`](ExtractError::Io) | I/O | Reading the file failed |
//! | [`Decode`](ExtractError::Decode) | I/O | The decoder rejected the file contents |
//! | [`InvalidConfig`](ExtractError::InvalidConfig) | Configuration | Unknown encoding label, zero limits |
//!
//! Errors carry the offending path and a rendered message instead of the
//! underlying `std::io::Error`, so they stay `Clone + PartialEq` for tests and
//! fan-out across worker threads.
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while extracting raw text from a file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExtractError {
    /// The path does not exist or does not point at a regular file.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// No decoder is available for this file format.
    ///
    /// PDF files produce this error unless the crate is built with the `pdf`
    /// feature; word-processor formats always do.
    #[error("unsupported file format {extension:?} for {}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The file is larger than the configured limit.
    #[error("file {} is {size} bytes, limit is {limit}", path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    /// Reading the file failed.
    #[error("failed to read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// The format decoder failed on the file contents.
    #[error("failed to decode {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    /// The extractor configuration is unusable.
    #[error("invalid extract config: {0}")]
    InvalidConfig(String),
}

impl ExtractError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        ExtractError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_include_path() {
        let err = ExtractError::NotFound {
            path: PathBuf::from("/tmp/missing.txt"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.txt");

        let err = ExtractError::UnsupportedFormat {
            path: PathBuf::from("essay.docx"),
            extension: "docx".into(),
        };
        assert!(err.to_string().contains("\"docx\""));
    }
}
