//! Reference corpus for originality checks.
//!
//! [`CorpusIndex::load`] reads every file with a configured extension from a
//! single directory (no recursion), hands each one to a
//! [`TextExtractor`](ingest::TextExtractor) and runs the result through the
//! preprocessing pipeline. The resulting [`CorpusDocument`]s are cached for the
//! lifetime of the index and never change.
//!
//! A file that fails to extract is logged and skipped. Only a missing or
//! unreadable directory aborts the load. An empty index is a valid outcome and
//! consumers are expected to check [`CorpusIndex::is_empty`].
//!
//! ```no_run
//! use canonical::PreprocessConfig;
//! use index::{CorpusConfig, CorpusIndex};
//! use ingest::{ExtractConfig, FileExtractor};
//!
//! let extractor = FileExtractor::new(ExtractConfig::default()).unwrap();
//! let corpus = CorpusIndex::load(
//!     "reference/".as_ref(),
//!     &CorpusConfig::default(),
//!     &PreprocessConfig::default(),
//!     &extractor,
//! )
//! .unwrap();
//! println!("{} reference documents", corpus.len());
//! ```

mod config;
mod document;
mod error;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use canonical::PreprocessConfig;
use hashbrown::HashMap;
use ingest::TextExtractor;
use rayon::prelude::*;
use tracing::{info, warn, Level};

pub use crate::config::CorpusConfig;
pub use crate::document::CorpusDocument;
pub use crate::error::IndexError;

/// Immutable collection of preprocessed reference documents.
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    root: Option<PathBuf>,
    documents: Vec<CorpusDocument>,
    by_id: HashMap<String, usize>,
}

impl CorpusIndex {
    /// Loads every matching file in `dir`.
    ///
    /// Files are visited in path order so repeated loads of the same
    /// directory produce the same document order.
    pub fn load(
        dir: &Path,
        cfg: &CorpusConfig,
        preprocess: &PreprocessConfig,
        extractor: &dyn TextExtractor,
    ) -> Result<Self, IndexError> {
        let start = Instant::now();
        let span = tracing::span!(Level::INFO, "index.load", dir = %dir.display());
        let _guard = span.enter();

        cfg.validate()?;
        let files = list_files(dir, cfg)?;
        if files.is_empty() {
            warn!(dir = %dir.display(), "corpus_directory_empty");
        }

        let load_one = |path: &PathBuf| -> Option<CorpusDocument> {
            match extractor.extract(path) {
                Ok(extracted) => Some(CorpusDocument::new(
                    path.display().to_string(),
                    document::display_name_for(path),
                    extracted.text,
                    preprocess,
                )),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "corpus_file_skipped");
                    None
                }
            }
        };

        let documents: Vec<CorpusDocument> = if cfg.use_parallel {
            files.par_iter().filter_map(load_one).collect()
        } else {
            files.iter().filter_map(load_one).collect()
        };

        let index = Self::from_documents_at(Some(dir.to_path_buf()), documents);
        info!(
            files = files.len(),
            documents = index.len(),
            skipped = files.len() - index.len(),
            elapsed_micros = start.elapsed().as_micros(),
            "corpus_load_success"
        );
        Ok(index)
    }

    /// Builds an index from documents that are already in memory.
    ///
    /// A later document with a duplicate id shadows the earlier one in
    /// [`get`](Self::get); both stay in iteration order.
    pub fn from_documents(documents: Vec<CorpusDocument>) -> Self {
        Self::from_documents_at(None, documents)
    }

    /// Preprocesses `(id, raw_text)` pairs into an index. The id doubles as
    /// the display name.
    pub fn from_texts<I, S, T>(texts: I, preprocess: &PreprocessConfig) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let documents = texts
            .into_iter()
            .map(|(id, raw)| {
                let id = id.into();
                CorpusDocument::new(id.clone(), id, raw.into(), preprocess)
            })
            .collect();
        Self::from_documents(documents)
    }

    fn from_documents_at(root: Option<PathBuf>, documents: Vec<CorpusDocument>) -> Self {
        let by_id = documents
            .iter()
            .enumerate()
            .map(|(pos, doc)| (doc.id.clone(), pos))
            .collect();
        Self {
            root,
            documents,
            by_id,
        }
    }

    /// Directory the index was loaded from, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[CorpusDocument] {
        &self.documents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CorpusDocument> {
        self.documents.iter()
    }

    pub fn get(&self, id: &str) -> Option<&CorpusDocument> {
        self.by_id.get(id).map(|&pos| &self.documents[pos])
    }

    /// Normalized texts in document order, the shape the similarity engine
    /// consumes.
    pub fn normalized_texts(&self) -> Vec<&str> {
        self.documents
            .iter()
            .map(|doc| doc.normalized_text.as_str())
            .collect()
    }
}

impl<'a> IntoIterator for &'a CorpusIndex {
    type Item = &'a CorpusDocument;
    type IntoIter = std::slice::Iter<'a, CorpusDocument>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

fn list_files(dir: &Path, cfg: &CorpusConfig) -> Result<Vec<PathBuf>, IndexError> {
    let meta = fs::metadata(dir).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => IndexError::NotFound {
            path: dir.to_path_buf(),
        },
        _ => IndexError::Io {
            path: dir.to_path_buf(),
            message: err.to_string(),
        },
    })?;
    if !meta.is_dir() {
        return Err(IndexError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let entries = fs::read_dir(dir).map_err(|err| IndexError::Io {
        path: dir.to_path_buf(),
        message: err.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "corpus_entry_unreadable");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let accepted = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| cfg.accepts(ext));
        if accepted {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
