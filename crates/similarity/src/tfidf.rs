//! TF-IDF weighted cosine similarity.
//!
//! Weights follow the classical vectorizer defaults: lowercase terms made of
//! two or more word characters, raw term counts, smooth idf
//! `ln((1 + n) / (1 + df)) + 1` and L2-normalized vectors.
//!
//! The vector space for a comparison is the reference collection plus the two
//! compared texts. [`DocumentFrequencies`] holds the reference part so it is
//! counted once per corpus instead of once per pair.

use fxhash::{FxHashMap, FxHashSet};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::SimilarityError;

static TERM_PATTERN: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new(r"\b\w\w+\b"));

fn term_pattern() -> Result<&'static Regex, SimilarityError> {
    TERM_PATTERN
        .as_ref()
        .map_err(|err| SimilarityError::Tokenizer(err.to_string()))
}

/// Lowercased terms of `text`, in order, duplicates kept.
pub fn terms(text: &str) -> Result<Vec<String>, SimilarityError> {
    let lowered = text.to_lowercase();
    Ok(term_pattern()?
        .find_iter(&lowered)
        .map(|m| m.as_str().to_owned())
        .collect())
}

/// Raw count per term of one text.
pub type TermCounts = FxHashMap<String, u32>;

/// Raw count of every term in `text`.
pub fn term_counts(text: &str) -> Result<TermCounts, SimilarityError> {
    let mut counts = FxHashMap::default();
    for term in terms(text)? {
        *counts.entry(term).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Document frequencies of a reference collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFrequencies {
    documents: usize,
    df: FxHashMap<String, usize>,
}

impl DocumentFrequencies {
    /// An empty collection. Comparisons against it use only the compared pair.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_texts<I, S>(texts: I) -> Result<Self, SimilarityError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut frequencies = Self::default();
        for text in texts {
            let unique: FxHashSet<String> = terms(text.as_ref())?.into_iter().collect();
            for term in unique {
                *frequencies.df.entry(term).or_insert(0) += 1;
            }
            frequencies.documents += 1;
        }
        Ok(frequencies)
    }

    /// Number of documents counted.
    pub fn documents(&self) -> usize {
        self.documents
    }

    pub fn vocabulary_len(&self) -> usize {
        self.df.len()
    }

    pub fn document_frequency(&self, term: &str) -> usize {
        self.df.get(term).copied().unwrap_or(0)
    }
}

/// Cosine similarity of `a` and `b` in the TF-IDF space of
/// `reference ∪ {a, b}`, clamped to `[0, 1]`.
///
/// Fails with [`SimilarityError::EmptyVocabulary`] when no document in the
/// space has a single term. A text without terms has a zero vector and scores
/// `0.0` against anything.
pub fn tfidf_cosine(
    a: &str,
    b: &str,
    reference: &DocumentFrequencies,
) -> Result<f64, SimilarityError> {
    tfidf_cosine_counts(&term_counts(a)?, &term_counts(b)?, reference)
}

/// [`tfidf_cosine`] over term counts computed ahead of time, for callers
/// that compare the same text many times.
pub fn tfidf_cosine_counts(
    counts_a: &TermCounts,
    counts_b: &TermCounts,
    reference: &DocumentFrequencies,
) -> Result<f64, SimilarityError> {
    if reference.vocabulary_len() == 0 && counts_a.is_empty() && counts_b.is_empty() {
        return Err(SimilarityError::EmptyVocabulary);
    }

    let n = (reference.documents() + 2) as f64;
    let idf = |term: &str| {
        let df = reference.document_frequency(term)
            + usize::from(counts_a.contains_key(term))
            + usize::from(counts_b.contains_key(term));
        ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0
    };

    let weights_a = weigh(counts_a, &idf);
    let weights_b = weigh(counts_b, &idf);
    let norm_a = l2_norm(&weights_a);
    let norm_b = l2_norm(&weights_b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    let (small, large) = if weights_a.len() <= weights_b.len() {
        (&weights_a, &weights_b)
    } else {
        (&weights_b, &weights_a)
    };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|other| w * other))
        .sum();

    let cosine = dot / (norm_a * norm_b);
    if !cosine.is_finite() {
        return Err(SimilarityError::NonFinite {
            strategy: "tfidf_cosine",
        });
    }
    Ok(cosine.clamp(0.0, 1.0))
}

fn weigh<'a>(counts: &'a TermCounts, idf: impl Fn(&str) -> f64) -> FxHashMap<&'a str, f64> {
    counts
        .iter()
        .map(|(term, &count)| (term.as_str(), f64::from(count) * idf(term)))
        .collect()
}

fn l2_norm(weights: &FxHashMap<&str, f64>) -> f64 {
    weights.values().map(|w| w * w).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn terms_skip_single_characters_and_lowercase() {
        assert_eq!(
            terms("Я и Он: кот-2 x42").expect("terms"),
            vec!["он", "кот", "x42"]
        );
    }

    #[test]
    fn identical_texts_score_one() {
        let reference = DocumentFrequencies::from_texts(["совершенно другой текст про погоду"])
            .expect("df");
        for text in ["машинное обучение это интересно", "the cat sat on the mat"] {
            let score = tfidf_cosine(text, text, &reference).expect("score");
            assert!((score - 1.0).abs() < EPS, "{text}: {score}");
        }
    }

    #[test]
    fn disjoint_texts_score_zero() {
        let score = tfidf_cosine(
            "машинное обучение нейронные сети",
            "совершенно другой текст погоду",
            &DocumentFrequencies::empty(),
        )
        .expect("score");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn empty_vocabulary_is_an_error() {
        assert_eq!(
            tfidf_cosine("a b", "c !", &DocumentFrequencies::empty()),
            Err(SimilarityError::EmptyVocabulary)
        );
    }

    #[test]
    fn termless_side_scores_zero_when_space_has_terms() {
        let score = tfidf_cosine("a b", "cat sat", &DocumentFrequencies::empty()).expect("score");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn two_document_space_matches_hand_computation() {
        // n = 2. "cat" in both docs: idf = ln(3/3) + 1 = 1.
        // "sat" and "dog" in one doc each: idf = ln(3/2) + 1.
        // a = [cat: 1, sat: k], b = [cat: 1, dog: k], cosine = 1 / (1 + k^2).
        let k = (1.5f64).ln() + 1.0;
        let expected = 1.0 / (1.0 + k * k);
        let score = tfidf_cosine("cat sat", "cat dog", &DocumentFrequencies::empty()).expect("score");
        assert!((score - expected).abs() < EPS, "{score} vs {expected}");
    }

    #[test]
    fn reference_frequencies_change_weights() {
        let empty = tfidf_cosine("cat sat", "cat dog", &DocumentFrequencies::empty()).expect("score");
        // Making "sat" and "dog" common lowers their weight relative to "cat".
        let reference = DocumentFrequencies::from_texts(["sat dog", "sat dog", "sat dog"]).expect("df");
        let weighted = tfidf_cosine("cat sat", "cat dog", &reference).expect("score");
        assert!(weighted > empty);
    }

    #[test]
    fn document_frequencies_count_documents_not_occurrences() {
        let df = DocumentFrequencies::from_texts(["кот кот пёс", "кот", ""]).expect("df");
        assert_eq!(df.documents(), 3);
        assert_eq!(df.document_frequency("кот"), 2);
        assert_eq!(df.document_frequency("пёс"), 1);
        assert_eq!(df.document_frequency("лис"), 0);
        assert_eq!(df.vocabulary_len(), 2);
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let reference = DocumentFrequencies::from_texts(["альфа бета", "гамма дельта альфа"]).expect("df");
        let texts = ["альфа", "альфа бета гамма", "дельта дельта", "эпсилон", ""];
        for a in texts {
            for b in texts {
                let score = tfidf_cosine(a, b, &reference).expect("score");
                assert!((0.0..=1.0).contains(&score), "{a:?} {b:?} -> {score}");
            }
        }
    }
}
