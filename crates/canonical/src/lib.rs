//! Text normalization layer for originality checking.
//!
//! Turns raw extracted text into the normalized form every later stage
//! compares: the similarity engine, the corpus index and the exact-run
//! matcher all consume the output of [`preprocess`].
//!
//! ## What we do
//!
//! - Lowercasing and whitespace collapsing ([`normalize`])
//! - Removal of a fixed punctuation set, including Russian quotes
//!   ([`strip_punctuation`])
//! - Removal of digit runs ([`strip_digits`])
//! - Stopword removal against a built-in Russian set plus caller extras
//!   ([`remove_stopwords`])
//! - Heuristic suffix substitution from an ordered rule table
//!   ([`lemmatize`]); not a morphological analyzer
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock, no locale. The stopword set and rule table are
//! immutable constants shared by every caller; custom stopwords travel in
//! [`PreprocessConfig`] instead of mutating shared state.
//!
//! [`preprocess`] never fails: if a stage cannot run it logs a warning and
//! hands back the original text. Use [`try_preprocess`] to observe the error.

mod config;
mod error;
mod filter;
mod hash;
mod lemma;
mod pipeline;
mod stopwords;
mod token;
mod whitespace;

pub use crate::config::PreprocessConfig;
pub use crate::error::CanonicalError;
pub use crate::filter::{strip_digits, strip_punctuation, PUNCTUATION};
pub use crate::hash::content_hash;
pub use crate::lemma::{lemmatize, lemmatize_word, LEMMA_RULES};
pub use crate::pipeline::{preprocess, try_preprocess};
pub use crate::stopwords::{is_stopword, remove_stopwords, RUSSIAN_STOPWORDS};
pub use crate::token::word_ngrams;
pub use crate::whitespace::{collapse_whitespace, normalize};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pipeline_on_russian_sentence() {
        let cfg = PreprocessConfig::default();
        let out = preprocess("  Мы будем ИЗУЧАТЬ «новые» методы, 3 раза!  ", &cfg);
        assert_eq!(out, "буд изуча новый методы раза");
    }

    #[test]
    fn flags_disable_stages() {
        let cfg = PreprocessConfig::default()
            .with_stopword_removal(false)
            .with_lemmatization(false);
        assert_eq!(preprocess("Я читать, 42!", &cfg), "я читать");
    }

    #[test]
    fn custom_stopwords_applied() {
        let cfg = PreprocessConfig::default()
            .with_lemmatization(false)
            .with_custom_stopwords(["домой"]);
        assert_eq!(preprocess("я пошли домой", &cfg), "пошли");
    }

    #[test]
    fn empty_suffix_lemma_recollapsed() {
        let cfg = PreprocessConfig::default().with_stopword_removal(false);
        assert_eq!(preprocess("сад ом лес", &cfg), "сад лес");
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let cfg = PreprocessConfig::default();
        assert_eq!(preprocess("", &cfg), "");
        assert_eq!(preprocess("  ... 123 !!!", &cfg), "");
    }

    #[test]
    fn invalid_config_falls_back_to_input() {
        let cfg = PreprocessConfig {
            version: 0,
            ..Default::default()
        };
        let input = "Оригинальный ТЕКСТ, 1!";
        assert_eq!(preprocess(input, &cfg), input);
        assert!(matches!(
            try_preprocess(input, &cfg),
            Err(CanonicalError::InvalidConfig(_))
        ));
    }

    #[test]
    fn preprocess_is_deterministic() {
        let cfg = PreprocessConfig::default();
        let text = "Машинное обучение это интересно. Нейронные сети!";
        assert_eq!(preprocess(text, &cfg), preprocess(text, &cfg));
    }

    #[test]
    fn preprocess_output_is_normalized() {
        let cfg = PreprocessConfig::default();
        let out = preprocess("Машинное   обучение\n\nЭТО интересно", &cfg);
        assert_eq!(normalize(&out), out);
    }
}
