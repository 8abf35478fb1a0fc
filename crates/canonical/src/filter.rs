//! Character-level filters: punctuation and digit removal.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::CanonicalError;

/// Characters removed by [`strip_punctuation`]: the ASCII punctuation set
/// followed by the typographic quotes common in Russian text.
pub const PUNCTUATION: &[char] = &[
    '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', ':', ';', '<',
    '=', '>', '?', '@', '[', '\\', ']', '^', '_', '`', '{', '|', '}', '~', '«', '»', '„', '“',
];

static DIGIT_RUNS: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new(r"\d+"));

/// Removes every character of [`PUNCTUATION`]. Other characters, including
/// whitespace, are kept as-is; no space is inserted in place of the removed
/// character.
///
/// ```rust
/// use canonical::strip_punctuation;
///
/// assert_eq!(strip_punctuation("«привет», мир!"), "привет мир");
/// assert_eq!(strip_punctuation("it's"), "its");
/// ```
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|ch| !PUNCTUATION.contains(ch)).collect()
}

/// Removes every run of decimal digits (Unicode `Nd`).
///
/// ```rust
/// use canonical::strip_digits;
///
/// assert_eq!(strip_digits("глава 12 из 2024").unwrap(), "глава  из ");
/// ```
pub fn strip_digits(text: &str) -> Result<String, CanonicalError> {
    let pattern = DIGIT_RUNS
        .as_ref()
        .map_err(|err| CanonicalError::Pattern(err.to_string()))?;
    Ok(pattern.replace_all(text, "").into_owned())
}
