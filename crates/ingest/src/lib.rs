//! Text extraction layer.
//!
//! Turns a file on disk into raw text for the preprocessing stage. Plain-text
//! files are decoded as UTF-8 with legacy Cyrillic fallbacks
//! (`windows-1251`, `koi8-r`, `iso-8859-5`); PDF files are supported when the
//! crate is built with the `pdf` feature. Word-processor formats are reported
//! as [`ExtractError::UnsupportedFormat`].
//!
//! Callers depend on the [`TextExtractor`] trait so tests and embedders can
//! swap in their own source of text.
//!
//! ```no_run
//! use ingest::{ExtractConfig, FileExtractor, TextExtractor};
//!
//! let extractor = FileExtractor::new(ExtractConfig::default()).unwrap();
//! let doc = extractor.extract("essay.txt".as_ref()).unwrap();
//! println!("{} chars via {}", doc.text.chars().count(), doc.encoding);
//! ```
use std::fs;
use std::path::Path;
use std::time::Instant;

use encoding_rs::Encoding;
use tracing::{debug, info, warn, Level};

mod config;
mod decode;
mod error;
mod types;

pub use crate::config::{ExtractConfig, DEFAULT_MAX_FILE_BYTES};
pub use crate::decode::{decode_bytes, Decoded};
pub use crate::error::ExtractError;
pub use crate::types::{DocumentFormat, ExtractedText};

/// Source of raw document text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractError>;
}

/// Extracts text from files on the local file system.
#[derive(Debug, Clone)]
pub struct FileExtractor {
    cfg: ExtractConfig,
    fallbacks: Vec<&'static Encoding>,
}

impl FileExtractor {
    /// Validates `cfg` and resolves its encoding labels once.
    pub fn new(cfg: ExtractConfig) -> Result<Self, ExtractError> {
        cfg.validate()?;
        let fallbacks = cfg.resolve_encodings()?;
        Ok(Self { cfg, fallbacks })
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.cfg
    }

    fn extract_inner(&self, path: &Path) -> Result<ExtractedText, ExtractError> {
        let meta = fs::metadata(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => ExtractError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ExtractError::io(path, &err),
        })?;
        if !meta.is_file() {
            return Err(ExtractError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let format = DocumentFormat::from_path(path);
        if !format.is_supported() {
            return Err(unsupported(path, format));
        }

        if let Some(limit) = self.cfg.max_file_bytes {
            if meta.len() > limit {
                return Err(ExtractError::TooLarge {
                    path: path.to_path_buf(),
                    size: meta.len(),
                    limit,
                });
            }
        }

        let bytes = fs::read(path).map_err(|err| ExtractError::io(path, &err))?;

        match format {
            DocumentFormat::Pdf => extract_pdf(path, &bytes),
            DocumentFormat::Other if content_inspector::inspect(&bytes).is_binary() => {
                Err(unsupported(path, format))
            }
            _ => {
                let decoded = decode_bytes(&bytes, &self.fallbacks);
                if decoded.lossy {
                    debug!(path = %path.display(), "extract_lossy_decode");
                }
                Ok(ExtractedText {
                    path: path.to_path_buf(),
                    format,
                    encoding: decoded.encoding.name().to_string(),
                    lossy: decoded.lossy,
                    text: decoded.text,
                })
            }
        }
    }
}

impl TextExtractor for FileExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedText, ExtractError> {
        let start = Instant::now();
        let span = tracing::span!(Level::DEBUG, "ingest.extract", path = %path.display());
        let _guard = span.enter();

        match self.extract_inner(path) {
            Ok(doc) => {
                let elapsed_micros = start.elapsed().as_micros();
                info!(
                    format = doc.format.as_str(),
                    encoding = %doc.encoding,
                    text_len = doc.text.len(),
                    elapsed_micros,
                    "extract_success"
                );
                Ok(doc)
            }
            Err(err) => {
                let elapsed_micros = start.elapsed().as_micros();
                warn!(error = %err, elapsed_micros, "extract_failure");
                Err(err)
            }
        }
    }
}

fn unsupported(path: &Path, format: DocumentFormat) -> ExtractError {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| format.as_str().to_string());
    ExtractError::UnsupportedFormat {
        path: path.to_path_buf(),
        extension,
    }
}

#[cfg(feature = "pdf")]
fn extract_pdf(path: &Path, bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|err| ExtractError::Decode {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    Ok(ExtractedText {
        path: path.to_path_buf(),
        format: DocumentFormat::Pdf,
        encoding: encoding_rs::UTF_8.name().to_string(),
        lossy: false,
        text,
    })
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf(path: &Path, _bytes: &[u8]) -> Result<ExtractedText, ExtractError> {
    Err(unsupported(path, DocumentFormat::Pdf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).expect("create file");
        file.write_all(bytes).expect("write file");
        path
    }

    fn extractor() -> FileExtractor {
        FileExtractor::new(ExtractConfig::default()).expect("default config")
    }

    #[test]
    fn reads_utf8_text() {
        let dir = TempDir::new().expect("tempdir");
        let path = write(&dir, "a.txt", "Мы изучаем методы.".as_bytes());
        let doc = extractor().extract(&path).expect("extract");
        assert_eq!(doc.text, "Мы изучаем методы.");
        assert_eq!(doc.format, DocumentFormat::Txt);
        assert_eq!(doc.encoding, "UTF-8");
        assert!(!doc.lossy);
    }

    #[test]
    fn reads_windows_1251_text() {
        let dir = TempDir::new().expect("tempdir");
        let (bytes, _, _) = encoding_rs::WINDOWS_1251.encode("Курсовая работа");
        let path = write(&dir, "legacy.TXT", &bytes);
        let doc = extractor().extract(&path).expect("extract");
        assert_eq!(doc.text, "Курсовая работа");
        assert_eq!(doc.encoding, "windows-1251");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = TempDir::new().expect("tempdir");
        let err = extractor()
            .extract(&dir.path().join("nope.txt"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::NotFound { .. }));
    }

    #[test]
    fn directory_is_not_found() {
        let dir = TempDir::new().expect("tempdir");
        let err = extractor().extract(dir.path()).unwrap_err();
        assert!(matches!(err, ExtractError::NotFound { .. }));
    }

    #[test]
    fn word_formats_are_unsupported() {
        let dir = TempDir::new().expect("tempdir");
        let path = write(&dir, "essay.docx", b"PK\x03\x04");
        let err = extractor().extract(&path).unwrap_err();
        assert_eq!(
            err,
            ExtractError::UnsupportedFormat {
                path: path.clone(),
                extension: "docx".into()
            }
        );
    }

    #[cfg(not(feature = "pdf"))]
    #[test]
    fn pdf_requires_feature() {
        let dir = TempDir::new().expect("tempdir");
        let path = write(&dir, "paper.pdf", b"%PDF-1.4");
        let err = extractor().extract(&path).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat { .. }));
    }

    #[test]
    fn binary_with_unknown_extension_is_unsupported() {
        let dir = TempDir::new().expect("tempdir");
        let path = write(&dir, "blob.bin", &[0u8, 1, 2, 3, 0, 0, 255, 254]);
        let err = extractor().extract(&path).unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat { .. }));
    }

    #[test]
    fn text_with_unknown_extension_is_read() {
        let dir = TempDir::new().expect("tempdir");
        let path = write(&dir, "notes.md", b"plain notes");
        let doc = extractor().extract(&path).expect("extract");
        assert_eq!(doc.format, DocumentFormat::Other);
        assert_eq!(doc.text, "plain notes");
    }

    #[test]
    fn size_limit_is_enforced() {
        let dir = TempDir::new().expect("tempdir");
        let path = write(&dir, "big.txt", &[b'a'; 64]);
        let extractor =
            FileExtractor::new(ExtractConfig::default().with_max_file_bytes(Some(16)))
                .expect("config");
        let err = extractor.extract(&path).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::TooLarge {
                size: 64,
                limit: 16,
                ..
            }
        ));
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let cfg = ExtractConfig::default().with_fallback_encodings(vec!["nope".into()]);
        assert!(matches!(
            FileExtractor::new(cfg),
            Err(ExtractError::InvalidConfig(_))
        ));
    }
}
