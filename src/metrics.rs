use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::CheckError;

/// Metrics observer for checker stages.
///
/// Installed per checker instance; there is no process-wide recorder.
pub trait CheckMetrics: Send + Sync {
    /// Corpus construction. `Ok` carries the number of documents loaded.
    fn record_corpus_load(&self, latency: Duration, result: Result<usize, CheckError>);
    /// Whole-document scoring of one query against the corpus.
    fn record_scoring(&self, latency: Duration, result: Result<(), CheckError>);
    /// Fragment matching of one query. `Ok` carries the number of matches.
    fn record_fragments(&self, latency: Duration, result: Result<usize, CheckError>);
}

pub(crate) struct MetricsSpan {
    recorder: Arc<dyn CheckMetrics>,
    start: Instant,
}

impl MetricsSpan {
    pub(crate) fn start(recorder: Option<&Arc<dyn CheckMetrics>>) -> Option<Self> {
        recorder.map(|recorder| Self {
            recorder: Arc::clone(recorder),
            start: Instant::now(),
        })
    }

    pub(crate) fn record_corpus_load(self, result: Result<usize, CheckError>) {
        self.recorder
            .record_corpus_load(self.start.elapsed(), result);
    }

    pub(crate) fn record_scoring(self, result: Result<(), CheckError>) {
        self.recorder.record_scoring(self.start.elapsed(), result);
    }

    pub(crate) fn record_fragments(self, result: Result<usize, CheckError>) {
        self.recorder.record_fragments(self.start.elapsed(), result);
    }
}
