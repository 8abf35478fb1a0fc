//! Built-in Russian stopword set and stopword filtering.

use fxhash::FxHashSet;
use once_cell::sync::Lazy;

/// Common Russian function words dropped by [`remove_stopwords`].
pub const RUSSIAN_STOPWORDS: &[&str] = &[
    "и", "в", "во", "не", "что", "он", "на", "я", "с", "со", "как", "а", "то", "все", "она",
    "так", "его", "но", "да", "ты", "к", "у", "же", "вы", "за", "бы", "по", "только", "ее",
    "мне", "было", "вот", "от", "меня", "еще", "нет", "о", "из", "ему", "теперь", "когда",
    "даже", "ну", "вдруг", "ли", "если", "уже", "или", "ни", "быть", "был", "него", "до",
    "вас", "нибудь", "опять", "уж", "вам", "ведь", "там", "потом", "себя", "ничего", "ей",
    "может", "они", "тут", "где", "есть", "надо", "ней", "для", "мы", "тебя", "их", "чем",
    "была", "сам", "чтоб", "без", "будто", "чего", "раз", "тоже", "себе", "под", "будет",
    "ж", "тогда", "кто", "этот", "того", "потому", "этого", "какой", "совсем", "ним",
    "здесь", "этом", "один", "почти", "мой", "тем", "чтобы", "нее", "сейчас", "были",
    "куда", "зачем", "всех", "никогда", "можно", "при", "наконец", "два", "об", "другой",
    "хоть", "после", "над", "больше", "тот", "через", "эти", "нас", "про", "всего", "них",
    "какая", "много", "разве", "три", "эту", "моя", "впрочем", "хорошо", "свою", "этой",
    "перед", "иногда", "лучше", "чуть", "том", "нельзя", "такой", "им", "более", "всегда",
    "конечно", "всю", "между",
];

static STOPWORD_SET: Lazy<FxHashSet<&'static str>> =
    Lazy::new(|| RUSSIAN_STOPWORDS.iter().copied().collect());

/// Returns `true` when `word` is in the built-in set. Exact match only.
pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

/// Drops whitespace-delimited tokens found in the built-in set or in
/// `extra`, and joins the survivors with single spaces.
///
/// Comparison is an exact string match; no stemming happens here.
///
/// ```rust
/// use canonical::remove_stopwords;
///
/// let none: &[&str] = &[];
/// assert_eq!(remove_stopwords("я и он пошли домой", none), "пошли домой");
/// assert_eq!(remove_stopwords("пошли домой", &["домой"]), "пошли");
/// ```
pub fn remove_stopwords<S: AsRef<str>>(text: &str, extra: &[S]) -> String {
    if text.is_empty() {
        return String::new();
    }

    let extra: FxHashSet<&str> = extra.iter().map(AsRef::as_ref).collect();
    let mut kept = String::with_capacity(text.len());
    for word in text
        .split_whitespace()
        .filter(|word| !is_stopword(word) && !extra.contains(word))
    {
        if !kept.is_empty() {
            kept.push(' ');
        }
        kept.push_str(word);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_EXTRA: &[&str] = &[];

    #[test]
    fn builtin_set_has_no_duplicates() {
        assert_eq!(STOPWORD_SET.len(), RUSSIAN_STOPWORDS.len());
    }

    #[test]
    fn removes_pronouns_and_conjunctions() {
        assert_eq!(remove_stopwords("я и он пошли домой", NO_EXTRA), "пошли домой");
    }

    #[test]
    fn comparison_is_exact() {
        // Capitalized and inflected forms are not in the set.
        assert_eq!(remove_stopwords("Я его него ним ними", NO_EXTRA), "Я ними");
    }

    #[test]
    fn extra_words_are_unioned() {
        let extra = vec!["домой".to_string()];
        assert_eq!(remove_stopwords("я пошли домой", &extra), "пошли");
    }

    #[test]
    fn all_stopwords_yield_empty() {
        assert_eq!(remove_stopwords("и в во не", NO_EXTRA), "");
        assert_eq!(remove_stopwords("", NO_EXTRA), "");
    }
}
