//! Rule-based suffix substitution ("lemmatization").
//!
//! This is not a morphological analyzer. Each token is checked against
//! [`LEMMA_RULES`] in table order and the first suffix that matches wins, even
//! when a longer suffix further down would also match. Reordering the table
//! changes the output, so any edit requires a
//! [`PreprocessConfig::version`](crate::PreprocessConfig::version) bump.

/// Ordered `(suffix, replacement)` pairs.
pub const LEMMA_RULES: &[(&str, &str)] = &[
    ("ать", "а"),
    ("ять", "я"),
    ("еть", "е"),
    ("ить", "и"),
    ("ться", "ть"),
    ("тся", "ть"),
    ("ого", "ий"),
    ("его", "ий"),
    ("ым", "ый"),
    ("им", "ий"),
    ("ом", ""),
    ("ем", ""),
    ("ых", "ый"),
    ("их", "ий"),
    ("ую", "ый"),
    ("юю", "ий"),
    ("ая", "ый"),
    ("яя", "ий"),
    ("ое", "ый"),
    ("ее", "ий"),
    ("ии", "ия"),
    ("ые", "ый"),
    ("ие", "ий"),
];

/// Applies the first matching rule of [`LEMMA_RULES`] to a single word.
///
/// A word equal to a suffix with an empty replacement (`"ом"`) becomes empty.
pub fn lemmatize_word(word: &str) -> String {
    for (suffix, replacement) in LEMMA_RULES {
        if let Some(stem) = word.strip_suffix(suffix) {
            let mut lemma = String::with_capacity(stem.len() + replacement.len());
            lemma.push_str(stem);
            lemma.push_str(replacement);
            return lemma;
        }
    }
    word.to_string()
}

/// Lemmatizes every whitespace-delimited token and joins them with single
/// spaces. Tokens that collapse to nothing leave a doubled space behind;
/// [`preprocess`](crate::preprocess) collapses it afterwards.
///
/// ```rust
/// use canonical::lemmatize;
///
/// assert_eq!(lemmatize("красного читать"), "красний чита");
/// ```
pub fn lemmatize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    text.split_whitespace()
        .map(lemmatize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verb_infinitives() {
        assert_eq!(lemmatize_word("читать"), "чита");
        assert_eq!(lemmatize_word("гулять"), "гуля");
        assert_eq!(lemmatize_word("смотреть"), "смотре");
        assert_eq!(lemmatize_word("говорить"), "говори");
    }

    #[test]
    fn reflexive_verbs() {
        assert_eq!(lemmatize_word("учиться"), "учить");
        assert_eq!(lemmatize_word("учится"), "учить");
    }

    #[test]
    fn adjective_endings() {
        assert_eq!(lemmatize_word("синее"), "синий");
        assert_eq!(lemmatize_word("красным"), "красный");
        assert_eq!(lemmatize_word("синим"), "синий");
        assert_eq!(lemmatize_word("новую"), "новый");
        assert_eq!(lemmatize_word("домом"), "дом");
    }

    #[test]
    fn every_rule_rewrites_its_own_suffix() {
        for (suffix, replacement) in LEMMA_RULES {
            let word = format!("корень{suffix}");
            assert_eq!(lemmatize_word(&word), format!("корень{replacement}"));
        }
    }

    #[test]
    fn whole_word_suffix_becomes_empty() {
        assert_eq!(lemmatize_word("ом"), "");
        assert_eq!(lemmatize("сад ом лес"), "сад  лес");
    }

    #[test]
    fn unmatched_words_unchanged() {
        assert_eq!(lemmatize_word("сад"), "сад");
        assert_eq!(lemmatize_word("rust"), "rust");
    }

    #[test]
    fn empty_text() {
        assert_eq!(lemmatize(""), "");
    }
}
