use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use stop_words::{get, LANGUAGE};

/// A word with its frequency relative to the most frequent word (1.0)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedWord {
    pub word: String,
    pub count: usize,
    pub weight: f64,
}

/// Vocables that would otherwise dominate many clouds
const LYRIC_FILLERS: &[&str] = &["oh", "ooh", "ah", "yeah", "la", "na", "uh", "mm", "whoa", "hey"];

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\w[\w']+").expect("valid token regex"))
}

fn stopwords() -> &'static HashSet<String> {
    static WORDS: OnceLock<HashSet<String>> = OnceLock::new();
    WORDS.get_or_init(|| {
        get(LANGUAGE::English)
            .iter()
            .map(|s| s.to_string().to_lowercase())
            .chain(LYRIC_FILLERS.iter().map(|s| s.to_string()))
            .collect()
    })
}

pub fn is_stopword(word: &str) -> bool {
    stopwords().contains(&word.to_lowercase())
}

#[derive(Default)]
struct Tally {
    total: usize,
    first_seen: usize,
    // casing -> count, in first-seen order
    casings: Vec<(String, usize)>,
}

impl Tally {
    fn add(&mut self, casing: &str) {
        self.total += 1;
        match self.casings.iter_mut().find(|(c, _)| c == casing) {
            Some((_, count)) => *count += 1,
            None => self.casings.push((casing.to_string(), 1)),
        }
    }

    /// Most frequent casing; earliest wins ties
    fn display_form(&self) -> String {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.casings {
            if best.map_or(true, |b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(c, _)| c.clone()).unwrap_or_default()
    }
}

/// Word weights for the cloud: single words only, English stop words and
/// numbers removed, possessive `'s` stripped, plurals folded into their
/// singular when both appear. Sorted by weight, at most `max_words`.
pub fn word_frequencies(text: &str, max_words: usize) -> Vec<WeightedWord> {
    let mut tallies: HashMap<String, Tally> = HashMap::new();

    for (position, token) in token_regex().find_iter(text).enumerate() {
        let mut word = token.as_str();
        if word.to_lowercase().ends_with("'s") {
            word = &word[..word.len() - 2];
        }
        if word.chars().all(|c| c.is_numeric()) || is_stopword(word) {
            continue;
        }

        tallies
            .entry(word.to_lowercase())
            .or_insert_with(|| Tally { first_seen: position, ..Tally::default() })
            .add(word);
    }

    fold_plurals(&mut tallies);

    let mut ranked: Vec<(String, usize, usize)> = tallies
        .values()
        .map(|tally| (tally.display_form(), tally.total, tally.first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(max_words);

    let top = ranked.first().map(|(_, count, _)| *count).unwrap_or(1).max(1) as f64;
    ranked
        .into_iter()
        .map(|(word, count, _)| WeightedWord {
            word,
            count,
            weight: count as f64 / top,
        })
        .collect()
}

fn fold_plurals(tallies: &mut HashMap<String, Tally>) {
    let plurals: Vec<String> = tallies
        .keys()
        .filter(|key| key.ends_with('s') && !key.ends_with("ss"))
        .filter(|key| tallies.contains_key(&key[..key.len() - 1]))
        .cloned()
        .collect();

    for plural in plurals {
        if let Some(plural_tally) = tallies.remove(&plural) {
            if let Some(singular) = tallies.get_mut(&plural[..plural.len() - 1]) {
                singular.total += plural_tally.total;
                singular.first_seen = singular.first_seen.min(plural_tally.first_seen);
            }
        }
    }
}
