use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Rows shown in the "Most Common Words" table
pub const COMMON_WORDS_LIMIT: usize = 15;

/// Words too frequent in lyrics to say anything about a song
pub const STOP_WORDS: &[&str] = &[
    "i", "you", "the", "a", "and", "to", "it", "me", "my", "we", "is", "in", "of", "that", "this",
];

/// Shortest token that is counted
const MIN_WORD_CHARS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w+").expect("valid word regex"))
}

/// Most frequent words, highest count first. Ties keep the order in which
/// the words first appear in the lyrics.
pub fn common_words(lyrics: &str, limit: usize) -> Vec<WordCount> {
    let lowered = lyrics.to_lowercase();

    // word -> (count, first occurrence)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, token) in word_regex().find_iter(&lowered).enumerate() {
        let word = token.as_str();
        if word.chars().count() < MIN_WORD_CHARS || STOP_WORDS.contains(&word) {
            continue;
        }
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(limit)
        .map(|(word, count, _)| WordCount {
            word: word.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_stop_words_and_short_tokens() {
        let lyrics = "I knew you were trouble when you walked in, and that this is the end of it";
        let words: Vec<String> = common_words(lyrics, COMMON_WORDS_LIMIT)
            .into_iter()
            .map(|w| w.word)
            .collect();

        assert_eq!(words, vec!["knew", "were", "trouble", "when", "walked"]);
        for w in &words {
            assert!(w.chars().count() > 3);
            assert!(!STOP_WORDS.contains(&w.as_str()));
        }
    }

    #[test]
    fn test_four_letter_stop_words_are_removed() {
        // "that" and "this" pass the length check but are stop words
        assert!(common_words("that this that this", 10).is_empty());
    }

    #[test]
    fn test_ranking_and_ties() {
        let lyrics = "Shake shake SHAKE, baby baby, players gonna play play play, haters hate";
        let ranked = common_words(lyrics, COMMON_WORDS_LIMIT);
        let expected = vec![
            ("shake", 3),
            ("play", 3),
            ("baby", 2),
            ("players", 1),
            ("gonna", 1),
            ("haters", 1),
            ("hate", 1),
        ];
        let actual: Vec<(&str, usize)> = ranked.iter().map(|w| (w.word.as_str(), w.count)).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_limit() {
        let lyrics = "alpha bravo charlie delta alpha";
        let ranked = common_words(lyrics, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0], WordCount { word: "alpha".into(), count: 2 });
        assert_eq!(ranked[1].word, "bravo");
    }

    #[test]
    fn test_unicode_words() {
        let ranked = common_words("Corazón corazón café", 5);
        assert_eq!(ranked[0], WordCount { word: "corazón".into(), count: 2 });
        assert_eq!(ranked[1].word, "café");
    }
}
