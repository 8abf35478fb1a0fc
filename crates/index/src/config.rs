use serde::{Deserialize, Serialize};

use crate::error::IndexError;

/// Which files in the corpus directory are loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    pub version: u32,
    /// File extensions to load, without the leading dot. Matching ignores
    /// ASCII case.
    pub extensions: Vec<String>,
    /// Extract and normalize files on the rayon pool.
    pub use_parallel: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        let mut extensions = vec!["txt".to_string()];
        if cfg!(feature = "pdf") {
            extensions.push("pdf".to_string());
        }
        Self {
            version: 1,
            extensions,
            use_parallel: false,
        }
    }
}

impl CorpusConfig {
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.use_parallel = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), IndexError> {
        if self.version == 0 {
            return Err(IndexError::InvalidConfig("version must be >= 1".into()));
        }
        if self.extensions.is_empty() {
            return Err(IndexError::InvalidConfig(
                "at least one extension is required".into(),
            ));
        }
        if let Some(bad) = self
            .extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.contains(['/', '\\']))
        {
            return Err(IndexError::InvalidConfig(format!(
                "invalid extension {bad:?}"
            )));
        }
        Ok(())
    }

    /// Returns `true` when `extension` is one of the configured extensions.
    /// A leading dot in the configured value is ignored.
    pub fn accepts(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.').eq_ignore_ascii_case(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_accepts_txt_any_case() {
        let cfg = CorpusConfig::default();
        assert!(cfg.validate().is_ok());
        assert!(cfg.accepts("txt"));
        assert!(cfg.accepts("TXT"));
        assert!(!cfg.accepts("docx"));
    }

    #[test]
    fn leading_dot_is_tolerated() {
        let cfg = CorpusConfig::default().with_extensions([".md"]);
        assert!(cfg.accepts("md"));
    }

    #[test]
    fn empty_extension_list_is_invalid() {
        let cfg = CorpusConfig::default().with_extensions(Vec::<String>::new());
        assert!(matches!(cfg.validate(), Err(IndexError::InvalidConfig(_))));
        let cfg = CorpusConfig::default().with_extensions([""]);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: CorpusConfig = serde_json::from_str(r#"{"extensions": ["md"]}"#).unwrap();
        assert_eq!(cfg.version, 1);
        assert!(!cfg.use_parallel);
        assert!(cfg.accepts("MD"));
        assert!(!cfg.accepts("txt"));
    }
}
