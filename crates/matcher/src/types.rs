use serde::{Deserialize, Serialize};
use similarity::SimilarityError;
use thiserror::Error;

/// Kind of overlap a [`Match`] records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Identical run of whitespace tokens.
    Exact,
    /// Sentence pair whose cosine similarity reached the threshold.
    NearDuplicate,
}

/// One overlapping span between a checked text (`source`) and a reference
/// text (`target`).
///
/// Matches are not deduplicated: a run contained in a longer run is reported
/// on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Match {
    pub kind: MatchKind,
    /// Corpus document the target text belongs to. Filled in by callers that
    /// match against a corpus; `None` for bare text pairs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    /// Token index (exact) or sentence index (near-duplicate) in the source.
    pub source_position: usize,
    /// Token index (exact) or sentence index (near-duplicate) in the target.
    pub target_position: usize,
    /// Tokens in the run (exact) or in the source sentence (near-duplicate).
    pub length: usize,
    pub source_fragment: String,
    pub target_fragment: String,
    /// In `[0, 1]`; always `1.0` for exact matches.
    pub similarity: f64,
}

impl Match {
    /// Attributes the match to a corpus document.
    pub fn with_document(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }
}

/// Configuration for fragment matching.
///
/// The defaults are the long-standing checker constants: runs of 20 tokens,
/// sentences of at least 50 characters and a cosine threshold of 0.8.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FragmentConfig {
    /// Configuration schema version.
    pub version: u32,
    /// Shortest exact run, in tokens, that is reported. `0` behaves like `1`.
    pub min_match_length: usize,
    /// Lowest sentence cosine similarity reported as a near-duplicate.
    pub similarity_threshold: f64,
    /// Sentences shorter than this many characters, after trimming, are never
    /// compared.
    pub min_fragment_length: usize,
    /// Reject texts with more whitespace tokens than this before exact
    /// matching. `None` means unbounded.
    pub max_tokens: Option<usize>,
    /// Reject texts with more sentences than this before near-duplicate
    /// matching. `None` means unbounded.
    pub max_sentences: Option<usize>,
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self {
            version: 1,
            min_match_length: 20,
            similarity_threshold: 0.8,
            min_fragment_length: 50,
            max_tokens: None,
            max_sentences: None,
        }
    }
}

impl FragmentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_match_length(mut self, tokens: usize) -> Self {
        self.min_match_length = tokens;
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_min_fragment_length(mut self, chars: usize) -> Self {
        self.min_fragment_length = chars;
        self
    }

    pub fn with_max_tokens(mut self, limit: Option<usize>) -> Self {
        self.max_tokens = limit;
        self
    }

    pub fn with_max_sentences(mut self, limit: Option<usize>) -> Self {
        self.max_sentences = limit;
        self
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if self.version < 1 {
            return Err(MatchError::InvalidConfig(format!(
                "version must be >= 1 (got {})",
                self.version
            )));
        }
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(MatchError::InvalidConfig(format!(
                "similarity_threshold must be between 0.0 and 1.0 (got {})",
                self.similarity_threshold
            )));
        }
        if self.max_tokens == Some(0) {
            return Err(MatchError::InvalidConfig(
                "max_tokens must be greater than zero when set".into(),
            ));
        }
        if self.max_sentences == Some(0) {
            return Err(MatchError::InvalidConfig(
                "max_sentences must be greater than zero when set".into(),
            ));
        }
        Ok(())
    }
}

/// What a size cap counts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SizeUnit {
    Tokens,
    Sentences,
}

impl std::fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizeUnit::Tokens => f.write_str("tokens"),
            SizeUnit::Sentences => f.write_str("sentences"),
        }
    }
}

/// Errors produced by the matching layer.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum MatchError {
    /// Invalid fragment or report configuration.
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    /// An input exceeded `max_tokens` or `max_sentences`.
    #[error("input has {actual} {unit}, limit is {limit}")]
    InputTooLarge {
        unit: SizeUnit,
        actual: usize,
        limit: usize,
    },
    /// The sentence splitting pattern failed to compile.
    #[error("sentence pattern error: {0}")]
    Pattern(String),
    /// Sentence scoring failed and so did its fallback.
    #[error("similarity error: {0}")]
    Similarity(#[from] SimilarityError),
}
