use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use canonical::{content_hash, normalize, preprocess};
use index::{CorpusDocument, CorpusIndex};
use ingest::{ExtractedText, FileExtractor, TextExtractor};
use matcher::{FragmentMatcher, Match, MatchError, ScoreAggregator};
use rayon::prelude::*;
use similarity::{CorpusScore, CorpusText, SimilarityEngine};
use tracing::{info, warn, Level};

use crate::config::OriginalityConfig;
use crate::error::CheckError;
use crate::metrics::{CheckMetrics, MetricsSpan};
use crate::report::{SimilarityReport, TextStats};

/// Checks documents against a reference corpus loaded once at construction.
///
/// The corpus is read-only after construction, so a checker can be shared
/// across threads and used for any number of checks.
pub struct OriginalityChecker {
    cfg: OriginalityConfig,
    extractor: Arc<dyn TextExtractor>,
    corpus: CorpusIndex,
    engine: SimilarityEngine,
    fragments: FragmentMatcher,
    aggregator: ScoreAggregator,
    metrics: Option<Arc<dyn CheckMetrics>>,
}

impl fmt::Debug for OriginalityChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OriginalityChecker")
            .field("cfg", &self.cfg)
            .field("documents", &self.corpus.len())
            .field("engine", &self.engine)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

/// A query after extraction and preprocessing.
struct PreparedQuery {
    id: String,
    raw: String,
    normalized: String,
    plain: String,
}

impl OriginalityChecker {
    /// Loads the corpus in `corpus_dir` with the default file extractor.
    pub fn open(corpus_dir: &Path, cfg: OriginalityConfig) -> Result<Self, CheckError> {
        let extractor = Arc::new(FileExtractor::new(cfg.extract.clone())?);
        Self::open_with(corpus_dir, cfg, extractor, None)
    }

    /// Loads the corpus in `corpus_dir` with a caller-supplied extractor and
    /// optional metrics observer.
    pub fn open_with(
        corpus_dir: &Path,
        cfg: OriginalityConfig,
        extractor: Arc<dyn TextExtractor>,
        metrics: Option<Arc<dyn CheckMetrics>>,
    ) -> Result<Self, CheckError> {
        cfg.validate()?;
        let span = MetricsSpan::start(metrics.as_ref());
        let loaded = CorpusIndex::load(
            corpus_dir,
            &cfg.corpus,
            &cfg.preprocess,
            extractor.as_ref(),
        )
        .map_err(CheckError::from);
        if let Some(span) = span {
            span.record_corpus_load(loaded.as_ref().map(CorpusIndex::len).map_err(Clone::clone));
        }
        Self::assemble(cfg, extractor, loaded?, metrics)
    }

    /// Wraps an already built corpus.
    pub fn from_corpus(corpus: CorpusIndex, cfg: OriginalityConfig) -> Result<Self, CheckError> {
        cfg.validate()?;
        let extractor = Arc::new(FileExtractor::new(cfg.extract.clone())?);
        Self::assemble(cfg, extractor, corpus, None)
    }

    fn assemble(
        cfg: OriginalityConfig,
        extractor: Arc<dyn TextExtractor>,
        corpus: CorpusIndex,
        metrics: Option<Arc<dyn CheckMetrics>>,
    ) -> Result<Self, CheckError> {
        let engine = SimilarityEngine::new(cfg.similarity.clone())?;
        let fragments = FragmentMatcher::new(cfg.fragments.clone())?;
        let aggregator = ScoreAggregator::new(cfg.report.clone())?;
        Ok(Self {
            cfg,
            extractor,
            corpus,
            engine,
            fragments,
            aggregator,
            metrics,
        })
    }

    /// Installs a metrics observer for subsequent checks.
    pub fn with_metrics(mut self, metrics: Arc<dyn CheckMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &OriginalityConfig {
        &self.cfg
    }

    pub fn corpus(&self) -> &CorpusIndex {
        &self.corpus
    }

    /// Originality percentage of the file at `query`, in `[0, 100]`.
    ///
    /// Only whole-document scoring runs; no fragments are matched.
    pub fn check_file(&self, query: &Path) -> Result<f64, CheckError> {
        let extracted = self.extract_query(query)?;
        self.check_text(&query.display().to_string(), &extracted.text)
    }

    /// Full report for the file at `query`.
    pub fn report_file(&self, query: &Path) -> Result<SimilarityReport, CheckError> {
        let extracted = self.extract_query(query)?;
        self.report_text(&query.display().to_string(), &extracted.text)
    }

    /// Originality percentage of `raw_text`, in `[0, 100]`.
    pub fn check_text(&self, query_id: &str, raw_text: &str) -> Result<f64, CheckError> {
        let span = tracing::span!(Level::INFO, "originality.check", query = %query_id);
        let _guard = span.enter();
        let start = Instant::now();

        let query = self.prepare(query_id, raw_text);
        match self.score(&query) {
            Ok(score) => {
                let originality = matcher::originality_percent(score.max_similarity());
                info!(
                    documents = self.corpus.len(),
                    originality,
                    elapsed_micros = start.elapsed().as_micros(),
                    "check_success"
                );
                Ok(originality)
            }
            Err(err) => {
                warn!(
                    error = %err,
                    elapsed_micros = start.elapsed().as_micros(),
                    "check_failure"
                );
                Err(err)
            }
        }
    }

    /// Full report for `raw_text`.
    ///
    /// Whole-document scoring and fragment matching are independent; with
    /// `similarity.use_parallel` they run concurrently.
    pub fn report_text(&self, query_id: &str, raw_text: &str) -> Result<SimilarityReport, CheckError> {
        let span = tracing::span!(Level::INFO, "originality.report", query = %query_id);
        let _guard = span.enter();
        let start = Instant::now();

        let query = self.prepare(query_id, raw_text);
        let (score, matches) = if self.cfg.similarity.use_parallel {
            rayon::join(|| self.score(&query), || self.match_fragments(&query))
        } else {
            (self.score(&query), self.match_fragments(&query))
        };

        let result = match (score, matches) {
            (Ok(score), Ok(matches)) => Ok(self.build_report(&query, score, matches)),
            (Err(err), _) | (_, Err(err)) => Err(err),
        };
        match &result {
            Ok(report) => info!(
                documents = report.corpus_size,
                matches = report.matches.len(),
                originality = report.originality_percent,
                level = report.plagiarism_level.as_str(),
                elapsed_micros = start.elapsed().as_micros(),
                "report_success"
            ),
            Err(err) => warn!(
                error = %err,
                elapsed_micros = start.elapsed().as_micros(),
                "report_failure"
            ),
        }
        result
    }

    fn extract_query(&self, path: &Path) -> Result<ExtractedText, CheckError> {
        Ok(self.extractor.extract(path)?)
    }

    fn prepare(&self, id: &str, raw: &str) -> PreparedQuery {
        PreparedQuery {
            id: id.to_string(),
            raw: raw.to_string(),
            normalized: preprocess(raw, &self.cfg.preprocess),
            plain: normalize(raw),
        }
    }

    fn score(&self, query: &PreparedQuery) -> Result<CorpusScore, CheckError> {
        let span = MetricsSpan::start(self.metrics.as_ref());
        let corpus: Vec<CorpusText<'_>> = self
            .corpus
            .iter()
            .map(|doc| CorpusText::new(&doc.id, &doc.normalized_text))
            .collect();
        let result = self
            .engine
            .score_against_corpus(&query.normalized, &corpus)
            .map_err(CheckError::from);
        if let Some(span) = span {
            span.record_scoring(result.as_ref().map(|_| ()).map_err(Clone::clone));
        }
        result
    }

    fn match_fragments(&self, query: &PreparedQuery) -> Result<Vec<Match>, CheckError> {
        let span = MetricsSpan::start(self.metrics.as_ref());
        let per_document = |doc: &CorpusDocument| self.match_document(query, doc);
        let result: Result<Vec<Vec<Match>>, CheckError> = if self.cfg.similarity.use_parallel {
            self.corpus.documents().par_iter().map(per_document).collect()
        } else {
            self.corpus.iter().map(per_document).collect()
        };
        let result = result.map(|groups| groups.into_iter().flatten().collect::<Vec<_>>());
        if let Some(span) = span {
            span.record_fragments(result.as_ref().map(Vec::len).map_err(Clone::clone));
        }
        result
    }

    fn match_document(
        &self,
        query: &PreparedQuery,
        doc: &CorpusDocument,
    ) -> Result<Vec<Match>, CheckError> {
        let report = &self.cfg.report;
        let mut matches = Vec::new();
        if report.exact_matches {
            let found = self.fragments.exact_matches(&query.normalized, &doc.normalized_text);
            matches.extend(tolerate_size_cap(found, &doc.id, "exact")?);
        }
        if report.near_duplicates {
            let found = self.fragments.similar_fragments(&query.plain, &doc.plain_text);
            matches.extend(tolerate_size_cap(found, &doc.id, "near_duplicate")?);
        }
        Ok(matches
            .into_iter()
            .map(|m| m.with_document(doc.id.as_str()))
            .collect())
    }

    fn build_report(
        &self,
        query: &PreparedQuery,
        score: CorpusScore,
        matches: Vec<Match>,
    ) -> SimilarityReport {
        let summary = self.aggregator.summarize(score.max_similarity(), &matches, |id| {
            self.corpus
                .get(id)
                .map(|doc| doc.display_name.clone())
                .unwrap_or_else(|| id.to_string())
        });
        let (max_similarity, best_source, per_source_similarity) = match score {
            CorpusScore::NoReferenceMaterial => (0.0, None, Default::default()),
            CorpusScore::Scored {
                max_similarity,
                best_source,
                per_source,
            } => (max_similarity, Some(best_source), per_source),
        };

        SimilarityReport {
            query_id: query.id.clone(),
            content_hash: content_hash(self.cfg.preprocess.version, &query.normalized),
            method: self.engine.primary_name().to_string(),
            corpus_size: self.corpus.len(),
            per_source_similarity,
            max_similarity,
            best_source,
            originality_percent: summary.originality_percent,
            plagiarism_level: summary.plagiarism_level,
            matches,
            band_counts: summary.band_counts,
            top_sources: summary.top_sources,
            query_stats: TextStats::from_text(&query.raw),
        }
    }
}

/// Size caps reject one document pair, not the whole check.
fn tolerate_size_cap(
    found: Result<Vec<Match>, MatchError>,
    document: &str,
    kind: &'static str,
) -> Result<Vec<Match>, CheckError> {
    match found {
        Ok(matches) => Ok(matches),
        Err(err @ MatchError::InputTooLarge { .. }) => {
            warn!(document, kind, error = %err, "fragment_input_rejected");
            Ok(Vec::new())
        }
        Err(err) => Err(err.into()),
    }
}
