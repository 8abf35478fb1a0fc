//! Casing and whitespace normalization.
//!
//! Whitespace is Unicode whitespace as understood by
//! [`str::split_whitespace`]: spaces, tabs, newlines, carriage returns,
//! non-breaking spaces and the other `White_Space` code points.

/// Collapses repeated whitespace into single ASCII spaces and trims edges.
///
/// ```rust
/// use canonical::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  hello \t\n world  "), "hello world");
/// assert_eq!(collapse_whitespace("   "), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

/// Lowercases text, collapses whitespace runs and trims.
///
/// This is the first stage of [`preprocess`](crate::preprocess) and is also
/// used on its own wherever punctuation has to survive (sentence splitting).
/// Empty input yields an empty string.
///
/// `normalize(normalize(x)) == normalize(x)` for every input.
///
/// ```rust
/// use canonical::normalize;
///
/// assert_eq!(normalize("  Машинное\n\nОБУЧЕНИЕ  "), "машинное обучение");
/// ```
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    collapse_whitespace(&text.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(collapse_whitespace("a\r\n\tb\u{00A0}c"), "a b c");
    }

    #[test]
    fn normalize_lowercases_cyrillic_and_latin() {
        assert_eq!(normalize("Привет, WORLD"), "привет, world");
    }

    #[test]
    fn normalize_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "",
            "   ",
            "Hello   World",
            "  Машинное ОБУЧЕНИЕ\tэто\nИНТЕРЕСНО  ",
            "İstanbul ΣΊΣΥΦΟΣ",
            "emoji \u{1f600}  TEXT\r\n",
            "«Цитата» — „ещё“ одна",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }
}
