use crate::config::{SimilarityError, SimilarityMethod};
use crate::jaccard::jaccard;
use crate::tfidf::{tfidf_cosine, DocumentFrequencies};

/// A pairwise text similarity measure with scores in `[0, 1]`.
///
/// `reference` carries the document frequencies of the collection the pair is
/// compared within. Strategies that do not weight terms ignore it.
pub trait SimilarityStrategy: Send + Sync {
    /// Stable name used in logs and reports.
    fn name(&self) -> &'static str;

    fn score(
        &self,
        a: &str,
        b: &str,
        reference: &DocumentFrequencies,
    ) -> Result<f64, SimilarityError>;
}

/// TF-IDF cosine, see [`tfidf_cosine`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfCosine;

impl SimilarityStrategy for TfIdfCosine {
    fn name(&self) -> &'static str {
        SimilarityMethod::TfidfCosine.as_str()
    }

    fn score(
        &self,
        a: &str,
        b: &str,
        reference: &DocumentFrequencies,
    ) -> Result<f64, SimilarityError> {
        tfidf_cosine(a, b, reference)
    }
}

/// Token-set Jaccard, see [`jaccard`]. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenJaccard;

impl SimilarityStrategy for TokenJaccard {
    fn name(&self) -> &'static str {
        SimilarityMethod::Jaccard.as_str()
    }

    fn score(
        &self,
        a: &str,
        b: &str,
        _reference: &DocumentFrequencies,
    ) -> Result<f64, SimilarityError> {
        Ok(jaccard(a, b))
    }
}

/// Builds the strategy for a configured method.
pub fn strategy_for(method: SimilarityMethod) -> Box<dyn SimilarityStrategy> {
    match method {
        SimilarityMethod::TfidfCosine => Box::new(TfIdfCosine),
        SimilarityMethod::Jaccard => Box::new(TokenJaccard),
    }
}
