//! Word cloud generation for the terminal
//!
//! - `frequencies`: tokenizing lyrics into weighted words
//! - `layout`: spiral placement of words on a character grid
//! - `colormap`: colour schemes and hex colour parsing

pub mod colormap;
pub mod frequencies;
pub mod layout;

pub use colormap::{Colormap, Rgb};
pub use frequencies::{word_frequencies, WeightedWord};
pub use layout::{CloudCell, CloudLayout, PlacedWord, SizeTier};

use layout::LayoutParams;

#[derive(Debug, Clone, PartialEq)]
pub struct WordCloudOptions {
    pub max_words: usize,
    /// Hex background colour, `#rrggbb` or `#rgb`
    pub background: String,
    pub colormap: Colormap,
    /// Share of words laid out horizontally
    pub prefer_horizontal: f64,
    pub seed: u64,
}

impl Default for WordCloudOptions {
    fn default() -> Self {
        Self {
            max_words: 150,
            background: "#ffffff".to_string(),
            colormap: Colormap::Inferno,
            prefer_horizontal: 0.8,
            seed: 7,
        }
    }
}

impl WordCloudOptions {
    pub fn background_rgb(&self) -> Rgb {
        Rgb::parse_hex(&self.background).unwrap_or(Rgb::WHITE)
    }
}

/// Weigh the words of `text` and lay them out on a `width` x `height` grid
pub fn generate(text: &str, width: u16, height: u16, options: &WordCloudOptions) -> CloudLayout {
    let words = word_frequencies(text, options.max_words);
    layout_words(&words, width, height, options)
}

/// Lay out already weighed words, keeping the first `options.max_words`
pub fn layout_words(
    words: &[WeightedWord],
    width: u16,
    height: u16,
    options: &WordCloudOptions,
) -> CloudLayout {
    let words = &words[..words.len().min(options.max_words)];
    tracing::debug!(
        "Laying out {} word(s) on a {}x{} grid",
        words.len(),
        width,
        height
    );
    layout::layout(
        words,
        &LayoutParams {
            width,
            height,
            background: options.background_rgb(),
            colormap: options.colormap,
            prefer_horizontal: options.prefer_horizontal,
            seed: options.seed,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_respects_max_words() {
        let text = "river mountain forest ocean desert valley canyon meadow glacier island";
        let options = WordCloudOptions { max_words: 3, ..WordCloudOptions::default() };
        let cloud = generate(text, 80, 20, &options);
        assert!(cloud.words.len() <= 3);
        assert!(!cloud.is_empty());
    }

    #[test]
    fn test_invalid_background_falls_back_to_white() {
        let options = WordCloudOptions { background: "teal".to_string(), ..WordCloudOptions::default() };
        assert_eq!(options.background_rgb(), Rgb::WHITE);
        let cloud = generate("", 10, 5, &options);
        assert!(cloud.is_empty());
        assert_eq!(cloud.background, Rgb::WHITE);
    }

    #[test]
    fn test_layout_words_truncates() {
        let words = word_frequencies("river mountain forest ocean desert", 10);
        let options = WordCloudOptions { max_words: 2, ..WordCloudOptions::default() };
        let cloud = layout_words(&words, 80, 20, &options);
        assert!(cloud.words.len() <= 2);
        assert!(cloud.words.iter().all(|w| w.word == "river" || w.word == "mountain"));
    }
}
