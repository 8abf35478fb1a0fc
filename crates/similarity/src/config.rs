//! Configuration and error types for similarity scoring.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Primary scoring method.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMethod {
    /// TF-IDF weighted cosine over the corpus plus the compared pair.
    #[default]
    TfidfCosine,
    /// Intersection over union of whitespace token sets.
    Jaccard,
}

impl SimilarityMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityMethod::TfidfCosine => "tfidf_cosine",
            SimilarityMethod::Jaccard => "jaccard",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Configuration schema version.
    pub version: u32,
    /// Strategy tried first. Token-set Jaccard is always the fallback.
    pub method: SimilarityMethod,
    /// Score corpus documents on the rayon pool.
    pub use_parallel: bool,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            version: 1,
            method: SimilarityMethod::TfidfCosine,
            use_parallel: false,
        }
    }
}

impl SimilarityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: SimilarityMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn validate(&self) -> Result<(), SimilarityError> {
        if self.version < 1 {
            return Err(SimilarityError::InvalidConfigVersion {
                version: self.version,
            });
        }
        Ok(())
    }
}

/// Errors returned by similarity strategies and the engine.
///
/// `EmptyVocabulary` and `NonFinite` are recoverable: the engine answers them
/// with its fallback strategy. `Runtime` is what remains when the fallback
/// fails too.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SimilarityError {
    #[error("empty vocabulary: no document contains a term of two or more word characters")]
    EmptyVocabulary,

    #[error("{strategy} produced a non-finite score")]
    NonFinite { strategy: &'static str },

    #[error("tokenizer pattern failed to compile: {0}")]
    Tokenizer(String),

    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("similarity failed: {primary}; fallback also failed: {fallback}")]
    Runtime { primary: String, fallback: String },
}
