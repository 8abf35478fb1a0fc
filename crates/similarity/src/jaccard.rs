use fxhash::FxHashSet;

/// Token-set Jaccard coefficient over whitespace-split tokens.
///
/// Returns `0.0` when either side has no tokens.
pub fn jaccard(a: &str, b: &str) -> f64 {
    let left: FxHashSet<&str> = a.split_whitespace().collect();
    let right: FxHashSet<&str> = b.split_whitespace().collect();
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let intersection = left.intersection(&right).count();
    let union = left.len() + right.len() - intersection;
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_is_one() {
        for text in ["a", "машинное обучение", "x y x y z"] {
            assert_eq!(jaccard(text, text), 1.0);
        }
    }

    #[test]
    fn empty_side_is_zero() {
        assert_eq!(jaccard("", "a b"), 0.0);
        assert_eq!(jaccard("a b", "   "), 0.0);
        assert_eq!(jaccard("", ""), 0.0);
    }

    #[test]
    fn partial_overlap() {
        // {a, b, c} vs {b, c, d}: 2 / 4
        assert_eq!(jaccard("a b c", "b c d"), 0.5);
        assert_eq!(jaccard("a a b", "b"), 0.5);
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert_eq!(jaccard("Кот", "кот"), 0.0);
    }
}
