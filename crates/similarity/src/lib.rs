//! # Document similarity
//!
//! Bounded `[0, 1]` similarity between preprocessed texts, and the maximum
//! similarity of a query against a reference corpus.
//!
//! Two [`SimilarityStrategy`] implementations ship with the crate:
//!
//! - [`TfIdfCosine`]: cosine of TF-IDF vectors built over the corpus, the
//!   query, and the compared pair. This is the default.
//! - [`TokenJaccard`]: intersection over union of whitespace token sets.
//!
//! [`SimilarityEngine`] runs the configured strategy and, when it fails on a
//! comparison (for example because no text contains a usable term), logs a
//! warning and answers that comparison with token-set Jaccard.
//!
//! The engine holds no mutable state, so one instance can serve concurrent
//! checks. With `use_parallel` it fans corpus scoring out over rayon.
//!
//! ```
//! use similarity::{CorpusScore, CorpusText, SimilarityConfig, SimilarityEngine};
//!
//! let engine = SimilarityEngine::new(SimilarityConfig::default()).unwrap();
//! let corpus = [CorpusText::new("weather.txt", "совершенно другой текст про погоду")];
//! let score = engine
//!     .score_against_corpus("машинное обучение нейронные сети", &corpus)
//!     .unwrap();
//! assert_eq!(score.max_similarity(), Some(0.0));
//!
//! assert_eq!(
//!     engine.score_against_corpus("что угодно", &[]).unwrap(),
//!     CorpusScore::NoReferenceMaterial
//! );
//! ```

pub mod config;
mod engine;
mod jaccard;
mod strategy;
mod tfidf;

pub use crate::config::{SimilarityConfig, SimilarityError, SimilarityMethod};
pub use crate::engine::{CorpusScore, CorpusText, SimilarityEngine};
pub use crate::jaccard::jaccard;
pub use crate::strategy::{strategy_for, SimilarityStrategy, TfIdfCosine, TokenJaccard};
pub use crate::tfidf::{
    term_counts, terms, tfidf_cosine, tfidf_cosine_counts, DocumentFrequencies, TermCounts,
};
