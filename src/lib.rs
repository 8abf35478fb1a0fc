//! Document originality checking against a reference corpus.
//!
//! This crate stitches the per-stage crates into one entry point: text
//! extraction (`ingest`), normalization (`canonical`), corpus loading
//! (`index`), whole-document similarity (`similarity`) and fragment matching
//! plus score aggregation (`matcher`).
//!
//! ```no_run
//! use std::path::Path;
//!
//! let originality = originality::check_originality(
//!     Path::new("essay.txt"),
//!     Path::new("reference/"),
//! )?;
//! println!("{originality:.2}% original");
//! # Ok::<(), originality::CheckError>(())
//! ```
//!
//! Callers that check many documents against the same corpus should build an
//! [`OriginalityChecker`] once and reuse it; the free functions here load the
//! corpus on every call.

mod checker;
mod config;
mod error;
mod metrics;
mod report;

pub use canonical::{
    collapse_whitespace, content_hash, lemmatize, normalize, preprocess, remove_stopwords,
    try_preprocess, word_ngrams, CanonicalError, PreprocessConfig,
};
pub use index::{CorpusConfig, CorpusDocument, CorpusIndex, IndexError};
pub use ingest::{
    DocumentFormat, ExtractConfig, ExtractError, ExtractedText, FileExtractor, TextExtractor,
};
pub use matcher::{
    find_exact_matches, find_similar_fragments, originality_percent, split_sentences, BandCounts,
    FragmentConfig, FragmentMatcher, Match, MatchError, MatchKind, PlagiarismLevel, ReportConfig,
    ScoreAggregator, SimilarityBand, SizeUnit, TopSource,
};
pub use similarity::{
    CorpusScore, CorpusText, SimilarityConfig, SimilarityEngine, SimilarityError,
    SimilarityMethod,
};

pub use crate::checker::OriginalityChecker;
pub use crate::config::{ConfigLoadError, OriginalityConfig};
pub use crate::error::CheckError;
pub use crate::metrics::CheckMetrics;
pub use crate::report::{SimilarityReport, TextStats};

use std::path::Path;

/// Originality percentage of `query` against the documents in `corpus_dir`,
/// in `[0, 100]` rounded to two decimals. An empty corpus yields `100.0`.
pub fn check_originality(query: &Path, corpus_dir: &Path) -> Result<f64, CheckError> {
    check_originality_with_config(query, corpus_dir, &OriginalityConfig::default())
}

/// [`check_originality`] with explicit configuration for every stage.
pub fn check_originality_with_config(
    query: &Path,
    corpus_dir: &Path,
    cfg: &OriginalityConfig,
) -> Result<f64, CheckError> {
    let text = read_query(query, corpus_dir, cfg)?;
    OriginalityChecker::open(corpus_dir, cfg.clone())?
        .check_text(&query.display().to_string(), &text)
}

/// Full [`SimilarityReport`] for `query` against the documents in
/// `corpus_dir`.
pub fn build_similarity_report(
    query: &Path,
    corpus_dir: &Path,
) -> Result<SimilarityReport, CheckError> {
    build_similarity_report_with_config(query, corpus_dir, &OriginalityConfig::default())
}

/// [`build_similarity_report`] with explicit configuration for every stage.
pub fn build_similarity_report_with_config(
    query: &Path,
    corpus_dir: &Path,
    cfg: &OriginalityConfig,
) -> Result<SimilarityReport, CheckError> {
    let text = read_query(query, corpus_dir, cfg)?;
    OriginalityChecker::open(corpus_dir, cfg.clone())?
        .report_text(&query.display().to_string(), &text)
}

/// Validates both paths and extracts the query, all before the corpus is
/// read.
fn read_query(
    query: &Path,
    corpus_dir: &Path,
    cfg: &OriginalityConfig,
) -> Result<String, CheckError> {
    validate_inputs(query, corpus_dir)?;
    let extracted = FileExtractor::new(cfg.extract.clone())?.extract(query)?;
    Ok(extracted.text)
}

/// File-system and format problems surface before the corpus is read.
/// Order: missing query, unsupported query format, missing corpus, corpus
/// not a directory.
fn validate_inputs(query: &Path, corpus_dir: &Path) -> Result<(), CheckError> {
    if !query.is_file() {
        return Err(CheckError::NotFound {
            path: query.to_path_buf(),
        });
    }
    let format = DocumentFormat::from_path(query);
    if !format.is_supported() {
        return Err(CheckError::InvalidArgument(format!(
            "unsupported query format {}: {}",
            format.as_str(),
            query.display()
        )));
    }
    if !corpus_dir.exists() {
        return Err(CheckError::NotFound {
            path: corpus_dir.to_path_buf(),
        });
    }
    if !corpus_dir.is_dir() {
        return Err(CheckError::InvalidArgument(format!(
            "corpus path is not a directory: {}",
            corpus_dir.display()
        )));
    }
    Ok(())
}
