/// Whitespace-delimited word n-grams, each joined with a single space.
///
/// Returns an empty vector when `n == 0` or the text has fewer than `n`
/// words.
///
/// ```rust
/// use canonical::word_ngrams;
///
/// assert_eq!(word_ngrams("a b c d", 3), vec!["a b c", "b c d"]);
/// ```
pub fn word_ngrams(text: &str, n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    let words: Vec<&str> = text.split_whitespace().collect();
    words.windows(n).map(|window| window.join(" ")).collect()
}
