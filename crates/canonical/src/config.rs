//! Configuration for the preprocessing pipeline.
//!
//! [`PreprocessConfig`] carries the two switches of the pipeline (stopword
//! removal and rule-based lemmatization) plus caller-supplied stopwords.
//!
//! # Versioning
//!
//! The `version` field takes part in the content hash of every normalized
//! document. Any change to preprocessing output (new stopwords, a reordered
//! lemmatization table) must bump it so hashes produced by older builds are
//! never confused with new ones.
//!
//! # Examples
//!
//! ```rust
//! use canonical::PreprocessConfig;
//!
//! let config = PreprocessConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.remove_stopwords);
//! assert!(config.lemmatize);
//!
//! let raw_words = PreprocessConfig::default()
//!     .with_stopword_removal(false)
//!     .with_lemmatization(false);
//! assert!(!raw_words.lemmatize);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for [`preprocess`](crate::preprocess).
///
/// Cheap to clone and serde-friendly so it can be embedded in higher level
/// configuration files:
///
/// ```json
/// {
///   "version": 1,
///   "remove_stopwords": true,
///   "lemmatize": true,
///   "custom_stopwords": ["например"]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreprocessConfig {
    /// Version of the preprocessing behavior. Must be >= 1.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Drop tokens found in the built-in stopword set or in
    /// `custom_stopwords`.
    #[serde(default = "default_true")]
    pub remove_stopwords: bool,

    /// Apply the ordered suffix-substitution table to every token.
    #[serde(default = "default_true")]
    pub lemmatize: bool,

    /// Extra stopwords unioned with the built-in set for this configuration
    /// only. Compared verbatim against normalized tokens, so entries should
    /// already be lowercase.
    #[serde(default)]
    pub custom_stopwords: Vec<String>,
}

fn default_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl PreprocessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stopword_removal(mut self, enabled: bool) -> Self {
        self.remove_stopwords = enabled;
        self
    }

    pub fn with_lemmatization(mut self, enabled: bool) -> Self {
        self.lemmatize = enabled;
        self
    }

    /// Replace the custom stopword list.
    pub fn with_custom_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_stopwords = words.into_iter().map(Into::into).collect();
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if let Some(word) = self
            .custom_stopwords
            .iter()
            .find(|w| w.split_whitespace().count() != 1)
        {
            return Err(CanonicalError::InvalidConfig(format!(
                "custom stopword {word:?} must be a single token"
            )));
        }
        Ok(())
    }
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            version: 1,
            remove_stopwords: true,
            lemmatize: true,
            custom_stopwords: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PreprocessConfig::default().validate().is_ok());
    }

    #[test]
    fn version_zero_rejected() {
        let cfg = PreprocessConfig {
            version: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(CanonicalError::InvalidConfig(_))
        ));
    }

    #[test]
    fn multi_word_stopword_rejected() {
        let cfg = PreprocessConfig::default().with_custom_stopwords(["два слова"]);
        let err = cfg.validate().expect_err("config should be invalid");
        assert!(err.to_string().contains("два слова"));
    }

    #[test]
    fn missing_flags_default_to_enabled() {
        let cfg: PreprocessConfig =
            serde_json::from_str(r#"{"version": 2}"#).expect("config parses");
        assert_eq!(cfg.version, 2);
        assert!(cfg.remove_stopwords);
        assert!(cfg.lemmatize);
        assert!(cfg.custom_stopwords.is_empty());
    }
}
