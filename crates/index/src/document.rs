use std::path::Path;

use canonical::{content_hash, normalize, preprocess, PreprocessConfig};
use serde::{Deserialize, Serialize};

/// One reference document, immutable once the corpus is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusDocument {
    /// Stable identifier: the file path as given, or a caller-chosen id.
    pub id: String,
    /// Short human label, the file name for files on disk.
    pub display_name: String,
    /// Text as returned by the extractor.
    pub raw_text: String,
    /// Output of the full preprocessing pipeline.
    pub normalized_text: String,
    /// Lowercased, whitespace-collapsed raw text. Keeps punctuation, so
    /// sentence boundaries survive for fragment matching.
    pub plain_text: String,
    /// SHA-256 identity of `normalized_text`.
    pub content_hash: String,
}

impl CorpusDocument {
    /// Runs the preprocessing pipeline over `raw_text` and caches every form.
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        raw_text: String,
        cfg: &PreprocessConfig,
    ) -> Self {
        let normalized_text = preprocess(&raw_text, cfg);
        let plain_text = normalize(&raw_text);
        let content_hash = content_hash(cfg.version, &normalized_text);
        Self {
            id: id.into(),
            display_name: display_name.into(),
            raw_text,
            normalized_text,
            plain_text,
            content_hash,
        }
    }
}

/// Label used for a file in reports.
pub(crate) fn display_name_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caches_all_text_forms() {
        let doc = CorpusDocument::new(
            "corpus/a.txt",
            "a.txt",
            "Машинное  обучение. Это интересно!".to_string(),
            &PreprocessConfig::default(),
        );
        assert_eq!(doc.plain_text, "машинное обучение. это интересно!");
        assert!(!doc.normalized_text.contains('.'));
        assert_eq!(doc.content_hash.len(), 64);
    }

    #[test]
    fn display_name_is_file_name() {
        assert_eq!(display_name_for(Path::new("/data/corpus/ref.txt")), "ref.txt");
    }
}
