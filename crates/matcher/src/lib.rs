//! # Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` locates concrete overlap between a checked text and a reference
//! text and condenses a check into report figures. It sits after the
//! similarity layer: whole-document scores say *how much* two texts overlap,
//! the matcher says *where*.
//!
//! ## Fragment matching
//!
//! - [`find_exact_matches`]: every run of at least `min_match_length` identical
//!   whitespace tokens, found with a greedy double-loop scan. Overlapping runs
//!   are all reported.
//! - [`find_similar_fragments`]: sentence pairs (split on `.`, `!`, `?`) whose
//!   TF-IDF cosine similarity reaches a threshold. Sentences shorter than
//!   `min_fragment_length` characters are skipped.
//!
//! Both scans are quadratic or worse in input size and have no internal bound.
//! [`FragmentMatcher`] wraps them with a [`FragmentConfig`] whose optional
//! `max_tokens` / `max_sentences` caps reject oversized input with
//! [`MatchError::InputTooLarge`].
//!
//! ## Aggregation
//!
//! [`ScoreAggregator`] turns the maximum corpus similarity and the matches of
//! a check into an originality percentage, a [`PlagiarismLevel`], per-band
//! match counts and the top contributing sources.
//!
//! ## Example Usage
//!
//! ```
//! use matcher::{find_exact_matches, originality_percent, PlagiarismLevel};
//!
//! let matches = find_exact_matches("the cat sat", "the cat sat", 2);
//! assert!(matches.iter().any(|m| m.length == 3));
//!
//! let originality = originality_percent(Some(0.05));
//! assert_eq!(originality, 95.0);
//! assert_eq!(PlagiarismLevel::from_originality(originality), PlagiarismLevel::VeryLow);
//! ```

pub mod aggregate;
pub mod engine;
pub mod types;

pub use crate::aggregate::{
    originality_percent, top_sources, BandCounts, PlagiarismLevel, ReportConfig, ScoreAggregator,
    ScoreSummary, SimilarityBand, TopSource,
};
pub use crate::engine::{find_exact_matches, find_similar_fragments, split_sentences, FragmentMatcher};
pub use crate::types::{FragmentConfig, Match, MatchError, MatchKind, SizeUnit};
