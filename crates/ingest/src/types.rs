//! Data model for extracted documents.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// File format inferred from the file extension.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Txt,
    Pdf,
    Docx,
    Doc,
    Rtf,
    /// Any other extension, or none. Decoded as text when the bytes look
    /// textual.
    Other,
}

impl DocumentFormat {
    /// Infers the format from the extension, case-insensitively.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("txt") => DocumentFormat::Txt,
            Some("pdf") => DocumentFormat::Pdf,
            Some("docx") => DocumentFormat::Docx,
            Some("doc") => DocumentFormat::Doc,
            Some("rtf") => DocumentFormat::Rtf,
            _ => DocumentFormat::Other,
        }
    }

    /// Whether [`FileExtractor`](crate::FileExtractor) can read this format
    /// in the current build. `Other` is decided by content at read time.
    pub fn is_supported(&self) -> bool {
        match self {
            DocumentFormat::Docx | DocumentFormat::Doc | DocumentFormat::Rtf => false,
            DocumentFormat::Pdf => cfg!(feature = "pdf"),
            DocumentFormat::Txt | DocumentFormat::Other => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Txt => "txt",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Doc => "doc",
            DocumentFormat::Rtf => "rtf",
            DocumentFormat::Other => "other",
        }
    }
}

/// Raw text pulled out of a single file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractedText {
    /// Path the text was read from.
    pub path: PathBuf,
    /// Format the extractor used.
    pub format: DocumentFormat,
    /// Name of the character encoding that produced `text` (`"UTF-8"`,
    /// `"windows-1251"`, ...). PDF text is always `"UTF-8"`.
    pub encoding: String,
    /// `true` when no encoding decoded cleanly and invalid sequences were
    /// replaced with U+FFFD.
    pub lossy: bool,
    /// The extracted text, unmodified apart from decoding.
    pub text: String,
}
