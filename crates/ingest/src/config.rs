//! Configuration for [`FileExtractor`](crate::FileExtractor).
//!
//! ```rust
//! use ingest::ExtractConfig;
//!
//! let config = ExtractConfig::default()
//!     .with_max_file_bytes(Some(1024 * 1024))
//!     .with_fallback_encodings(vec!["windows-1251".into()]);
//! config.validate().expect("valid config");
//! ```
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Default upper bound on the size of a single input file (50 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 50 * 1024 * 1024;

/// Runtime configuration for text extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Configuration schema version.
    ///
    /// Default: `1`
    pub version: u32,

    /// Files larger than this are rejected with [`ExtractError::TooLarge`]
    /// before they are read. `None` disables the check.
    ///
    /// Default: 50 MiB
    pub max_file_bytes: Option<u64>,

    /// WHATWG encoding labels tried in order when a text file is not valid
    /// UTF-8. The first encoding that decodes without malformed sequences
    /// wins; if none does, the bytes are decoded as lossy UTF-8.
    ///
    /// Default: `["windows-1251", "koi8-r", "iso-8859-5"]`
    pub fallback_encodings: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            version: 1,
            max_file_bytes: Some(DEFAULT_MAX_FILE_BYTES),
            fallback_encodings: vec![
                "windows-1251".to_string(),
                "koi8-r".to_string(),
                "iso-8859-5".to_string(),
            ],
        }
    }
}

impl ExtractConfig {
    pub fn with_max_file_bytes(mut self, limit: Option<u64>) -> Self {
        self.max_file_bytes = limit;
        self
    }

    pub fn with_fallback_encodings(mut self, labels: Vec<String>) -> Self {
        self.fallback_encodings = labels;
        self
    }

    /// Checks limits and resolves every fallback label.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.version == 0 {
            return Err(ExtractError::InvalidConfig(
                "version must be >= 1".to_string(),
            ));
        }
        if self.max_file_bytes == Some(0) {
            return Err(ExtractError::InvalidConfig(
                "max_file_bytes must be greater than zero when set".to_string(),
            ));
        }
        self.resolve_encodings().map(|_| ())
    }

    /// Resolves the fallback labels to `encoding_rs` encodings, in order.
    pub fn resolve_encodings(&self) -> Result<Vec<&'static Encoding>, ExtractError> {
        self.fallback_encodings
            .iter()
            .map(|label| {
                Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
                    ExtractError::InvalidConfig(format!("unknown encoding label {label:?}"))
                })
            })
            .collect()
    }
}
