use std::collections::BTreeMap;

use matcher::{split_sentences, BandCounts, Match, PlagiarismLevel, TopSource};
use serde::{Deserialize, Serialize};

/// Surface statistics of a text.
///
/// Words are whitespace tokens; sentences are the non-empty pieces between
/// runs of `.`, `!` and `?`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TextStats {
    pub char_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_word_length: f64,
    pub avg_sentence_length: f64,
}

impl TextStats {
    pub fn from_text(text: &str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        let sentence_count = split_sentences(text)
            .map(|pieces| pieces.iter().filter(|s| !s.trim().is_empty()).count())
            .unwrap_or(0);
        let word_chars: usize = words.iter().map(|w| w.chars().count()).sum();

        Self {
            char_count: text.chars().count(),
            word_count: words.len(),
            sentence_count,
            avg_word_length: ratio(word_chars, words.len()),
            avg_sentence_length: ratio(words.len(), sentence_count),
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Full result of checking one document against a corpus.
///
/// This is the payload handed to reporting and export layers; the checker
/// itself never persists or renders it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarityReport {
    /// Identifier of the checked document, its path for files.
    pub query_id: String,
    /// SHA-256 identity of the preprocessed query text.
    pub content_hash: String,
    /// Strategy that produced `per_source_similarity`.
    pub method: String,
    /// Number of documents the query was compared against.
    pub corpus_size: usize,
    pub per_source_similarity: BTreeMap<String, f64>,
    /// `0.0` for an empty corpus.
    pub max_similarity: f64,
    /// Corpus document that reached `max_similarity`.
    pub best_source: Option<String>,
    /// In `[0, 100]`, rounded to two decimals.
    pub originality_percent: f64,
    pub plagiarism_level: PlagiarismLevel,
    pub matches: Vec<Match>,
    pub band_counts: BandCounts,
    pub top_sources: Vec<TopSource>,
    pub query_stats: TextStats,
}

impl SimilarityReport {
    pub fn has_reference_material(&self) -> bool {
        self.corpus_size > 0
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_simple_text() {
        let stats = TextStats::from_text("Кот сидел. Пёс бегал быстро!");
        assert_eq!(stats.word_count, 5);
        assert_eq!(stats.sentence_count, 2);
        assert_eq!(stats.char_count, 28);
        assert_eq!(stats.avg_sentence_length, 2.5);
        // "Кот"3 "сидел."6 "Пёс"3 "бегал"5 "быстро!"7
        assert_eq!(stats.avg_word_length, 24.0 / 5.0);
    }

    #[test]
    fn stats_of_empty_text() {
        assert_eq!(TextStats::from_text("   "), TextStats {
            char_count: 3,
            ..TextStats::default()
        });
    }

    #[test]
    fn text_without_terminator_is_one_sentence() {
        assert_eq!(TextStats::from_text("без точки в конце").sentence_count, 1);
    }
}
