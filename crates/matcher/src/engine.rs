use std::time::Instant;

use once_cell::sync::Lazy;
use regex::Regex;
use similarity::{
    term_counts, tfidf_cosine_counts, DocumentFrequencies, SimilarityError, SimilarityStrategy,
    TermCounts, TfIdfCosine, TokenJaccard,
};
use tracing::{debug, warn};

use crate::types::{FragmentConfig, Match, MatchError, MatchKind, SizeUnit};


static SENTENCE_BREAK: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new(r"[.!?]+"));

/// Splits `text` on runs of `.`, `!` and `?`.
///
/// Pieces are returned untrimmed and in order, including empty ones, so the
/// index of a piece is stable regardless of later filtering.
pub fn split_sentences(text: &str) -> Result<Vec<&str>, MatchError> {
    let pattern = SENTENCE_BREAK
        .as_ref()
        .map_err(|err| MatchError::Pattern(err.to_string()))?;
    Ok(pattern.split(text).collect())
}

/// Finds every run of at least `min_match_length` identical whitespace tokens
/// shared by `source` and `target`.
///
/// Each start pair `(i, j)` is extended greedily, so a run of length `L`
/// also yields its suffixes of length `min_match_length..L` starting at
/// `(i + 1, j + 1)` and so on. Runs are not merged or deduplicated.
///
/// Cost is `O(n * m * k)` for `n` and `m` tokens and average run length `k`.
/// There is no internal bound; use [`FragmentMatcher`] with `max_tokens` to
/// refuse oversized inputs.
pub fn find_exact_matches(source: &str, target: &str, min_match_length: usize) -> Vec<Match> {
    let min = min_match_length.max(1);
    let source_tokens: Vec<&str> = source.split_whitespace().collect();
    let target_tokens: Vec<&str> = target.split_whitespace().collect();
    if source_tokens.len() < min || target_tokens.len() < min {
        return Vec::new();
    }

    let mut matches = Vec::new();
    for i in 0..=source_tokens.len() - min {
        for j in 0..=target_tokens.len() - min {
            let run = source_tokens[i..]
                .iter()
                .zip(&target_tokens[j..])
                .take_while(|(a, b)| a == b)
                .count();
            if run >= min {
                let fragment = source_tokens[i..i + run].join(" ");
                matches.push(Match {
                    kind: MatchKind::Exact,
                    document_id: None,
                    source_position: i,
                    target_position: j,
                    length: run,
                    target_fragment: fragment.clone(),
                    source_fragment: fragment,
                    similarity: 1.0,
                });
            }
        }
    }
    matches
}

/// Finds sentence pairs whose TF-IDF cosine similarity is at least
/// `threshold`.
///
/// Sentences come from [`split_sentences`]; a pair is only scored when both
/// trimmed sentences have at least `min_fragment_length` characters. Each
/// comparison builds a vector space from the two sentences alone.
///
/// Every sentence is tokenized once. A pair the weighted score cannot answer
/// (for example, neither sentence has a term of two or more word characters)
/// is scored with token-set Jaccard; such pairs are logged together as one
/// `similarity_fallback` event per call.
///
/// This is `O(S * T)` cosine evaluations for `S` and `T` sentences.
pub fn find_similar_fragments(
    source: &str,
    target: &str,
    threshold: f64,
    min_fragment_length: usize,
) -> Result<Vec<Match>, MatchError> {
    let source_sentences = long_sentences(source, min_fragment_length)?;
    let target_sentences = long_sentences(target, min_fragment_length)?;
    let reference = DocumentFrequencies::empty();

    let mut fallback: Option<(SimilarityError, usize)> = None;
    let mut matches = Vec::new();
    for source_sentence in &source_sentences {
        for target_sentence in &target_sentences {
            let score = match source_sentence.cosine(target_sentence, &reference) {
                Ok(score) => score,
                Err(primary_err) => {
                    let score = TokenJaccard
                        .score(source_sentence.text, target_sentence.text, &reference)
                        .map_err(|fallback_err| SimilarityError::Runtime {
                            primary: primary_err.to_string(),
                            fallback: fallback_err.to_string(),
                        })?;
                    fallback.get_or_insert_with(|| (primary_err, 0)).1 += 1;
                    score
                }
            };
            if score >= threshold {
                matches.push(Match {
                    kind: MatchKind::NearDuplicate,
                    document_id: None,
                    source_position: source_sentence.position,
                    target_position: target_sentence.position,
                    length: source_sentence.text.split_whitespace().count(),
                    source_fragment: source_sentence.text.to_string(),
                    target_fragment: target_sentence.text.to_string(),
                    similarity: score.clamp(0.0, 1.0),
                });
            }
        }
    }

    if let Some((err, pairs)) = fallback {
        warn!(
            strategy = TfIdfCosine.name(),
            fallback = TokenJaccard.name(),
            error = %err,
            pairs,
            "similarity_fallback"
        );
    }
    Ok(matches)
}

/// A sentence long enough to be compared, tokenized once.
struct Sentence<'a> {
    /// Index among all pieces of [`split_sentences`].
    position: usize,
    text: &'a str,
    counts: Result<TermCounts, SimilarityError>,
}

impl Sentence<'_> {
    fn cosine(
        &self,
        other: &Sentence<'_>,
        reference: &DocumentFrequencies,
    ) -> Result<f64, SimilarityError> {
        match (&self.counts, &other.counts) {
            (Ok(a), Ok(b)) => tfidf_cosine_counts(a, b, reference),
            (Err(err), _) | (_, Err(err)) => Err(err.clone()),
        }
    }
}

fn long_sentences(text: &str, min_chars: usize) -> Result<Vec<Sentence<'_>>, MatchError> {
    Ok(split_sentences(text)?
        .into_iter()
        .enumerate()
        .map(|(position, sentence)| (position, sentence.trim()))
        .filter(|(_, sentence)| sentence.chars().count() >= min_chars)
        .map(|(position, text)| Sentence {
            position,
            text,
            counts: term_counts(text),
        })
        .collect())
}

/// Fragment matching with configured thresholds and size caps.
#[derive(Debug)]
pub struct FragmentMatcher {
    cfg: FragmentConfig,
}

impl FragmentMatcher {
    pub fn new(cfg: FragmentConfig) -> Result<Self, MatchError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &FragmentConfig {
        &self.cfg
    }

    /// [`find_exact_matches`] with `min_match_length` from the config.
    ///
    /// Fails with [`MatchError::InputTooLarge`] when either text has more
    /// tokens than `max_tokens`; inputs are never truncated.
    pub fn exact_matches(&self, source: &str, target: &str) -> Result<Vec<Match>, MatchError> {
        if let Some(limit) = self.cfg.max_tokens {
            for text in [source, target] {
                let actual = text.split_whitespace().count();
                if actual > limit {
                    return Err(MatchError::InputTooLarge {
                        unit: SizeUnit::Tokens,
                        actual,
                        limit,
                    });
                }
            }
        }
        let start = Instant::now();
        let matches = find_exact_matches(source, target, self.cfg.min_match_length);
        debug!(
            matches = matches.len(),
            elapsed_micros = start.elapsed().as_micros(),
            "exact_matches_found"
        );
        Ok(matches)
    }

    /// [`find_similar_fragments`] with threshold and fragment length from the
    /// config.
    ///
    /// Fails with [`MatchError::InputTooLarge`] when either text splits into
    /// more sentences than `max_sentences`.
    pub fn similar_fragments(&self, source: &str, target: &str) -> Result<Vec<Match>, MatchError> {
        if let Some(limit) = self.cfg.max_sentences {
            for text in [source, target] {
                let actual = split_sentences(text)?.len();
                if actual > limit {
                    return Err(MatchError::InputTooLarge {
                        unit: SizeUnit::Sentences,
                        actual,
                        limit,
                    });
                }
            }
        }
        let start = Instant::now();
        let matches = find_similar_fragments(
            source,
            target,
            self.cfg.similarity_threshold,
            self.cfg.min_fragment_length,
        )?;
        debug!(
            matches = matches.len(),
            elapsed_micros = start.elapsed().as_micros(),
            "similar_fragments_found"
        );
        Ok(matches)
    }
}
