//! Turns raw similarity and matches into the figures a report shows.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Match, MatchError};

/// Classification of a single match by its similarity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityBand {
    /// `similarity > 0.9`
    High,
    /// `0.7 <= similarity <= 0.9`
    Medium,
    /// `similarity < 0.7`
    Low,
}

impl SimilarityBand {
    pub fn for_similarity(similarity: f64) -> Self {
        if similarity > 0.9 {
            SimilarityBand::High
        } else if similarity >= 0.7 {
            SimilarityBand::Medium
        } else {
            SimilarityBand::Low
        }
    }
}

/// Number of matches in each band. The three counts always sum to the number
/// of matches counted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BandCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl BandCounts {
    pub fn from_matches(matches: &[Match]) -> Self {
        let mut counts = BandCounts::default();
        for m in matches {
            match SimilarityBand::for_similarity(m.similarity) {
                SimilarityBand::High => counts.high += 1,
                SimilarityBand::Medium => counts.medium += 1,
                SimilarityBand::Low => counts.low += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Overall plagiarism level derived from the originality percentage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlagiarismLevel {
    VeryLow,
    Low,
    Medium,
    High,
    Critical,
}

impl PlagiarismLevel {
    pub fn from_originality(originality_percent: f64) -> Self {
        if originality_percent >= 90.0 {
            PlagiarismLevel::VeryLow
        } else if originality_percent >= 70.0 {
            PlagiarismLevel::Low
        } else if originality_percent >= 50.0 {
            PlagiarismLevel::Medium
        } else if originality_percent >= 30.0 {
            PlagiarismLevel::High
        } else {
            PlagiarismLevel::Critical
        }
    }

    /// Stable machine label, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlagiarismLevel::VeryLow => "very_low",
            PlagiarismLevel::Low => "low",
            PlagiarismLevel::Medium => "medium",
            PlagiarismLevel::High => "high",
            PlagiarismLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for PlagiarismLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlagiarismLevel::VeryLow => "very low",
            PlagiarismLevel::Low => "low",
            PlagiarismLevel::Medium => "medium",
            PlagiarismLevel::High => "high",
            PlagiarismLevel::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// A corpus document ranked by how many matches point at it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopSource {
    pub source_id: String,
    pub display_name: String,
    pub match_count: usize,
}

/// `clamp((1 - max_similarity) * 100, 0, 100)` rounded to two decimals.
///
/// `None` means there was no reference material and yields `100.0`.
pub fn originality_percent(max_similarity: Option<f64>) -> f64 {
    match max_similarity {
        None => 100.0,
        Some(max) => round2(((1.0 - max) * 100.0).clamp(0.0, 100.0)),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Ranks the documents matches are attributed to by match count, highest
/// first. Equal counts keep the order in which documents first appear in
/// `matches`. Matches without a document are ignored.
pub fn top_sources<F>(matches: &[Match], limit: usize, display_name: F) -> Vec<TopSource>
where
    F: Fn(&str) -> String,
{
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    for id in matches.iter().filter_map(|m| m.document_id.as_deref()) {
        match slots.get(id) {
            Some(&slot) => order[slot].1 += 1,
            None => {
                slots.insert(id, order.len());
                order.push((id, 1));
            }
        }
    }

    // sort_by is stable, so first-seen order survives among equal counts.
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
        .into_iter()
        .take(limit)
        .map(|(id, count)| TopSource {
            source_id: id.to_string(),
            display_name: display_name(id),
            match_count: count,
        })
        .collect()
}

/// Settings for report aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportConfig {
    /// How many documents to list in `top_sources`.
    pub top_sources: usize,
    /// Run exact word-run matching.
    pub exact_matches: bool,
    /// Run near-duplicate sentence matching.
    pub near_duplicates: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_sources: 5,
            exact_matches: true,
            near_duplicates: true,
        }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.top_sources == 0 {
            return Err(MatchError::InvalidConfig(
                "top_sources must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Report figures derived from a check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreSummary {
    pub originality_percent: f64,
    pub plagiarism_level: PlagiarismLevel,
    pub band_counts: BandCounts,
    pub top_sources: Vec<TopSource>,
}

/// Combines the maximum similarity and the matches of a check.
#[derive(Debug, Clone, Default)]
pub struct ScoreAggregator {
    cfg: ReportConfig,
}

impl ScoreAggregator {
    pub fn new(cfg: ReportConfig) -> Result<Self, MatchError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.cfg
    }

    pub fn summarize<F>(
        &self,
        max_similarity: Option<f64>,
        matches: &[Match],
        display_name: F,
    ) -> ScoreSummary
    where
        F: Fn(&str) -> String,
    {
        let originality_percent = originality_percent(max_similarity);
        ScoreSummary {
            originality_percent,
            plagiarism_level: PlagiarismLevel::from_originality(originality_percent),
            band_counts: BandCounts::from_matches(matches),
            top_sources: top_sources(matches, self.cfg.top_sources, display_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MatchKind;

    fn m(document: Option<&str>, similarity: f64) -> Match {
        Match {
            kind: MatchKind::NearDuplicate,
            document_id: document.map(str::to_string),
            source_position: 0,
            target_position: 0,
            length: 1,
            source_fragment: String::new(),
            target_fragment: String::new(),
            similarity,
        }
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(SimilarityBand::for_similarity(1.0), SimilarityBand::High);
        assert_eq!(SimilarityBand::for_similarity(0.91), SimilarityBand::High);
        assert_eq!(SimilarityBand::for_similarity(0.9), SimilarityBand::Medium);
        assert_eq!(SimilarityBand::for_similarity(0.7), SimilarityBand::Medium);
        assert_eq!(SimilarityBand::for_similarity(0.69), SimilarityBand::Low);
        assert_eq!(SimilarityBand::for_similarity(0.0), SimilarityBand::Low);
    }

    #[test]
    fn band_counts_sum_to_matches() {
        let matches = vec![m(None, 1.0), m(None, 0.8), m(None, 0.9), m(None, 0.2)];
        let counts = BandCounts::from_matches(&matches);
        assert_eq!(
            counts,
            BandCounts {
                high: 1,
                medium: 2,
                low: 1
            }
        );
        assert_eq!(counts.total(), matches.len());
    }

    #[test]
    fn level_thresholds() {
        let cases = [
            (100.0, PlagiarismLevel::VeryLow),
            (90.0, PlagiarismLevel::VeryLow),
            (89.99, PlagiarismLevel::Low),
            (70.0, PlagiarismLevel::Low),
            (50.0, PlagiarismLevel::Medium),
            (30.0, PlagiarismLevel::High),
            (29.99, PlagiarismLevel::Critical),
            (0.0, PlagiarismLevel::Critical),
        ];
        for (originality, expected) in cases {
            assert_eq!(PlagiarismLevel::from_originality(originality), expected);
        }
    }

    #[test]
    fn level_labels() {
        assert_eq!(PlagiarismLevel::VeryLow.to_string(), "very low");
        assert_eq!(PlagiarismLevel::VeryLow.as_str(), "very_low");
        assert_eq!(
            serde_json::to_string(&PlagiarismLevel::Critical).expect("serialize"),
            "\"critical\""
        );
    }

    #[test]
    fn originality_rounding_and_clamping() {
        assert_eq!(originality_percent(None), 100.0);
        assert_eq!(originality_percent(Some(1.0)), 0.0);
        assert_eq!(originality_percent(Some(0.0)), 100.0);
        assert_eq!(originality_percent(Some(0.123456)), 87.65);
        assert_eq!(originality_percent(Some(1.0 + 1e-12)), 0.0);
        assert_eq!(originality_percent(Some(0.99999999999)), 0.0);
    }

    #[test]
    fn top_sources_rank_by_count_then_first_seen() {
        let matches = vec![
            m(Some("b"), 1.0),
            m(Some("a"), 1.0),
            m(None, 1.0),
            m(Some("a"), 1.0),
            m(Some("c"), 1.0),
            m(Some("b"), 1.0),
            m(Some("d"), 1.0),
        ];
        let ranked = top_sources(&matches, 3, |id| format!("{id}.txt"));
        let summary: Vec<_> = ranked
            .iter()
            .map(|s| (s.source_id.as_str(), s.match_count))
            .collect();
        assert_eq!(summary, vec![("b", 2), ("a", 2), ("c", 1)]);
        assert_eq!(ranked[0].display_name, "b.txt");
    }

    #[test]
    fn summarize_empty_corpus() {
        let aggregator = ScoreAggregator::default();
        let summary = aggregator.summarize(None, &[], |id| id.to_string());
        assert_eq!(summary.originality_percent, 100.0);
        assert_eq!(summary.plagiarism_level, PlagiarismLevel::VeryLow);
        assert_eq!(summary.band_counts.total(), 0);
        assert!(summary.top_sources.is_empty());
    }

    #[test]
    fn zero_top_sources_is_invalid() {
        let cfg = ReportConfig {
            top_sources: 0,
            ..ReportConfig::default()
        };
        assert!(matches!(
            ScoreAggregator::new(cfg),
            Err(MatchError::InvalidConfig(_))
        ));
    }
}
