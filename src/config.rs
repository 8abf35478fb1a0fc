//! YAML configuration for the originality checker.
//!
//! Every stage configuration can be set from a single YAML file. Sections that
//! are left out, and fields missing inside a section, take their defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "department defaults"
//!
//! extract:
//!   max_file_bytes: 52428800
//!   fallback_encodings: ["windows-1251", "koi8-r", "iso-8859-5"]
//!
//! preprocess:
//!   remove_stopwords: true
//!   lemmatize: true
//!   custom_stopwords: ["например", "однако"]
//!
//! corpus:
//!   extensions: ["txt"]
//!   use_parallel: true
//!
//! similarity:
//!   method: tfidf_cosine
//!   use_parallel: true
//!
//! fragments:
//!   min_match_length: 20
//!   similarity_threshold: 0.8
//!   min_fragment_length: 50
//!   max_tokens: 20000
//!   max_sentences: 2000
//!
//! report:
//!   top_sources: 5
//!   exact_matches: true
//!   near_duplicates: true
//! ```

use std::fs;
use std::path::Path;

use canonical::PreprocessConfig;
use index::CorpusConfig;
use ingest::ExtractConfig;
use matcher::{FragmentConfig, ReportConfig};
use serde::{Deserialize, Serialize};
use similarity::SimilarityConfig;
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Configuration of every checker stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OriginalityConfig {
    /// Configuration format version. `"1"` and `"1.0"` are accepted.
    pub version: String,

    /// Optional configuration name/description
    pub name: Option<String>,

    pub extract: ExtractConfig,
    pub preprocess: PreprocessConfig,
    pub corpus: CorpusConfig,
    pub similarity: SimilarityConfig,
    pub fragments: FragmentConfig,
    pub report: ReportConfig,
}

impl Default for OriginalityConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            extract: ExtractConfig::default(),
            preprocess: PreprocessConfig::default(),
            corpus: CorpusConfig::default(),
            similarity: SimilarityConfig::default(),
            fragments: FragmentConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl OriginalityConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: OriginalityConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Turn on rayon fan-out in every stage that supports it.
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.corpus.use_parallel = enabled;
        self.similarity.use_parallel = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        let invalid = |stage: &str, err: &dyn std::fmt::Display| {
            ConfigLoadError::Validation(format!("{stage}: {err}"))
        };
        self.extract
            .validate()
            .map_err(|err| invalid("extract", &err))?;
        self.preprocess
            .validate()
            .map_err(|err| invalid("preprocess", &err))?;
        self.corpus
            .validate()
            .map_err(|err| invalid("corpus", &err))?;
        self.similarity
            .validate()
            .map_err(|err| invalid("similarity", &err))?;
        self.fragments
            .validate()
            .map_err(|err| invalid("fragments", &err))?;
        self.report
            .validate()
            .map_err(|err| invalid("report", &err))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similarity::SimilarityMethod;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "test config"
preprocess:
  lemmatize: false
  custom_stopwords: ["например"]
similarity:
  method: jaccard
"#;

        let config = OriginalityConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.name, Some("test config".to_string()));
        assert!(!config.preprocess.lemmatize);
        assert!(config.preprocess.remove_stopwords);
        assert_eq!(config.preprocess.version, 1);
        assert_eq!(config.preprocess.custom_stopwords, vec!["например"]);
        assert_eq!(config.similarity.method, SimilarityMethod::Jaccard);
        assert_eq!(config.fragments, FragmentConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let yaml = r#"
version: "1"
fragments:
  min_match_length: 8
  max_tokens: 5000
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = OriginalityConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.fragments.min_match_length, 8);
        assert_eq!(config.fragments.max_tokens, Some(5000));
        assert_eq!(config.fragments.similarity_threshold, 0.8);
    }

    #[test]
    fn test_missing_file() {
        let err = OriginalityConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigLoadError::FileRead(_)));
    }

    #[test]
    fn test_default_config() {
        let config = OriginalityConfig::default();
        assert_eq!(config.version, "1.0");
        assert!(config.name.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = OriginalityConfig::from_yaml("{}").unwrap();
        assert_eq!(config, OriginalityConfig::default());
    }

    #[test]
    fn test_unsupported_version() {
        let result = OriginalityConfig::from_yaml("version: \"2.0\"\n");
        assert!(matches!(
            result,
            Err(ConfigLoadError::UnsupportedVersion(v)) if v == "2.0"
        ));
    }

    #[test]
    fn test_fragment_validation() {
        let yaml = r#"
version: "1.0"
fragments:
  similarity_threshold: 1.5
"#;

        let result = OriginalityConfig::from_yaml(yaml);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("fragments"));
        assert!(message.contains("similarity_threshold"));
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let yaml = r#"
extract:
  fallback_encodings: ["not-an-encoding"]
"#;

        let result = OriginalityConfig::from_yaml(yaml);
        assert!(matches!(result, Err(ConfigLoadError::Validation(msg)) if msg.starts_with("extract")));
    }

    #[test]
    fn test_full_yaml_roundtrip() {
        let config = OriginalityConfig {
            name: Some("production".into()),
            ..OriginalityConfig::default()
        }
        .with_parallel(true);

        let yaml = config.to_yaml().unwrap();
        let parsed = OriginalityConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
        assert!(parsed.similarity.use_parallel);
        assert!(parsed.corpus.use_parallel);
    }
}
