use std::collections::BTreeMap;
use std::fmt;
use std::iter;
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{SimilarityConfig, SimilarityError};
use crate::strategy::{strategy_for, SimilarityStrategy, TokenJaccard};
use crate::tfidf::DocumentFrequencies;

/// One reference document as seen by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusText<'a> {
    pub id: &'a str,
    pub text: &'a str,
}

impl<'a> CorpusText<'a> {
    pub fn new(id: &'a str, text: &'a str) -> Self {
        Self { id, text }
    }
}

/// Outcome of scoring a query against a corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CorpusScore {
    /// The corpus was empty. Consumers report full originality.
    NoReferenceMaterial,
    Scored {
        max_similarity: f64,
        /// First corpus document, in corpus order, that reached the maximum.
        best_source: String,
        per_source: BTreeMap<String, f64>,
    },
}

impl CorpusScore {
    /// Maximum similarity, or `None` when there was nothing to compare with.
    pub fn max_similarity(&self) -> Option<f64> {
        match self {
            CorpusScore::NoReferenceMaterial => None,
            CorpusScore::Scored { max_similarity, .. } => Some(*max_similarity),
        }
    }
}

/// Pairwise and corpus-wide similarity with automatic fallback.
///
/// Every comparison first runs the primary strategy. If it fails the failure
/// is logged as `similarity_fallback` and the fallback strategy answers that
/// one comparison. Only a failing fallback surfaces as
/// [`SimilarityError::Runtime`].
pub struct SimilarityEngine {
    cfg: SimilarityConfig,
    primary: Box<dyn SimilarityStrategy>,
    fallback: Box<dyn SimilarityStrategy>,
}

impl fmt::Debug for SimilarityEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimilarityEngine")
            .field("cfg", &self.cfg)
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

impl SimilarityEngine {
    /// Engine for `cfg.method` with token-set Jaccard as fallback.
    pub fn new(cfg: SimilarityConfig) -> Result<Self, SimilarityError> {
        let primary = strategy_for(cfg.method);
        Self::with_strategies(cfg, primary, Box::new(TokenJaccard))
    }

    pub fn with_strategies(
        cfg: SimilarityConfig,
        primary: Box<dyn SimilarityStrategy>,
        fallback: Box<dyn SimilarityStrategy>,
    ) -> Result<Self, SimilarityError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            primary,
            fallback,
        })
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.cfg
    }

    pub fn primary_name(&self) -> &'static str {
        self.primary.name()
    }

    pub fn fallback_name(&self) -> &'static str {
        self.fallback.name()
    }

    /// Similarity of `a` and `b` with nothing but the pair in the vector
    /// space.
    pub fn similarity(&self, a: &str, b: &str) -> Result<f64, SimilarityError> {
        self.similarity_within(a, b, &DocumentFrequencies::empty())
    }

    /// Similarity of `a` and `b` within `reference ∪ {a, b}`.
    pub fn similarity_within(
        &self,
        a: &str,
        b: &str,
        reference: &DocumentFrequencies,
    ) -> Result<f64, SimilarityError> {
        match self.primary.score(a, b, reference) {
            Ok(score) => Ok(score.clamp(0.0, 1.0)),
            Err(primary_err) => {
                warn!(
                    strategy = self.primary.name(),
                    fallback = self.fallback.name(),
                    error = %primary_err,
                    "similarity_fallback"
                );
                match self.fallback.score(a, b, reference) {
                    Ok(score) => Ok(score.clamp(0.0, 1.0)),
                    Err(fallback_err) => Err(SimilarityError::Runtime {
                        primary: primary_err.to_string(),
                        fallback: fallback_err.to_string(),
                    }),
                }
            }
        }
    }

    /// Scores `query` against every corpus document.
    ///
    /// Each comparison is made in the space of the corpus, the query, and the
    /// compared pair: `corpus + [query] + [query, doc]`, so `n = corpus + 3`.
    /// The corpus and the extra query copy are counted once up front; the pair
    /// is added per comparison.
    pub fn score_against_corpus(
        &self,
        query: &str,
        corpus: &[CorpusText<'_>],
    ) -> Result<CorpusScore, SimilarityError> {
        if corpus.is_empty() {
            return Ok(CorpusScore::NoReferenceMaterial);
        }
        let start = Instant::now();

        let collection = corpus.iter().map(|doc| doc.text).chain(iter::once(query));
        let reference = match DocumentFrequencies::from_texts(collection) {
            Ok(reference) => reference,
            Err(err) => {
                // Only the weighted strategy reads the frequencies; it will
                // report its own failure per pair and fall back.
                warn!(error = %err, "similarity_reference_unavailable");
                DocumentFrequencies::empty()
            }
        };

        let score_one =
            |doc: &CorpusText<'_>| self.similarity_within(query, doc.text, &reference);
        let scores: Vec<f64> = if self.cfg.use_parallel {
            corpus.par_iter().map(score_one).collect::<Result<_, _>>()?
        } else {
            corpus.iter().map(score_one).collect::<Result<_, _>>()?
        };

        let mut best = 0;
        for (pos, score) in scores.iter().enumerate() {
            if *score > scores[best] {
                best = pos;
            }
        }

        let mut per_source = BTreeMap::new();
        for (doc, score) in corpus.iter().zip(&scores) {
            per_source
                .entry(doc.id.to_string())
                .and_modify(|existing: &mut f64| *existing = existing.max(*score))
                .or_insert(*score);
        }

        debug!(
            strategy = self.primary.name(),
            documents = corpus.len(),
            max_similarity = scores[best],
            elapsed_micros = start.elapsed().as_micros(),
            "corpus_scored"
        );

        Ok(CorpusScore::Scored {
            max_similarity: scores[best],
            best_source: corpus[best].id.to_string(),
            per_source,
        })
    }
}
