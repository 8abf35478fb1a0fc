use tracing::warn;

use crate::config::PreprocessConfig;
use crate::error::CanonicalError;
use crate::filter::{strip_digits, strip_punctuation};
use crate::lemma::lemmatize;
use crate::stopwords::remove_stopwords;
use crate::whitespace::{collapse_whitespace, normalize};

/// Runs the full preprocessing pipeline, reporting failures.
///
/// Stages, in this order:
/// 1. [`normalize`] (lowercase, collapse whitespace, trim)
/// 2. [`strip_punctuation`]
/// 3. [`strip_digits`]
/// 4. [`remove_stopwords`] with `cfg.custom_stopwords`, when enabled
/// 5. [`lemmatize`], when enabled
/// 6. whitespace re-collapse and trim
pub fn try_preprocess(text: &str, cfg: &PreprocessConfig) -> Result<String, CanonicalError> {
    cfg.validate()?;
    if text.is_empty() {
        return Ok(String::new());
    }

    let mut processed = normalize(text);
    processed = strip_punctuation(&processed);
    processed = strip_digits(&processed)?;

    if cfg.remove_stopwords {
        processed = remove_stopwords(&processed, &cfg.custom_stopwords);
    }
    if cfg.lemmatize {
        processed = lemmatize(&processed);
    }

    Ok(collapse_whitespace(&processed))
}

/// Main entry point. Pure function of `(text, cfg)` that never fails.
///
/// If any stage fails (an invalid configuration, an unavailable pattern),
/// a warning is logged and the input text is returned unchanged.
///
/// ```rust
/// use canonical::{preprocess, PreprocessConfig};
///
/// let cfg = PreprocessConfig::default();
/// assert_eq!(
///     preprocess("Я и он пошли домой в 2024 году!", &cfg),
///     "пошли домой году"
/// );
/// ```
pub fn preprocess(text: &str, cfg: &PreprocessConfig) -> String {
    match try_preprocess(text, cfg) {
        Ok(processed) => processed,
        Err(err) => {
            warn!(error = %err, input_len = text.len(), "preprocess_fallback");
            text.to_string()
        }
    }
}
