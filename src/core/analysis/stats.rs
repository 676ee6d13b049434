use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LyricsStats {
    pub total_words: usize,
    pub unique_words: usize,
    /// Percentage of unique words, `None` for empty lyrics
    pub unique_ratio: Option<f64>,
}

impl LyricsStats {
    /// Words are whitespace-separated runs; uniqueness ignores case only,
    /// so "love" and "love," count as different words.
    pub fn compute(lyrics: &str) -> Self {
        let words: Vec<&str> = lyrics.split_whitespace().collect();
        let total_words = words.len();
        let unique_words = words
            .iter()
            .map(|word| word.to_lowercase())
            .collect::<HashSet<_>>()
            .len();

        let unique_ratio = if total_words > 0 {
            Some(unique_words as f64 / total_words as f64 * 100.0)
        } else {
            None
        };

        Self {
            total_words,
            unique_words,
            unique_ratio,
        }
    }

    pub fn unique_ratio_display(&self) -> String {
        match self.unique_ratio {
            Some(ratio) => format!("{:.1}%", ratio),
            None => "n/a".to_string(),
        }
    }
}
