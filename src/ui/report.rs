//! One-shot song reports for the `search` command
//!
//! `SongReport` holds everything shown for a song and serializes as-is for
//! `--format json`; `ReportRenderer` turns it into terminal text.

use crossterm::style::{style, Attribute, Color, Stylize};
use serde::Serialize;
use std::fmt::Write;

use crate::core::analysis::{common_words, LyricsStats, WordCount, COMMON_WORDS_LIMIT};
use crate::core::services::Song;
use crate::core::wordcloud::{
    self, word_frequencies, CloudCell, CloudLayout, Colormap, Rgb, WeightedWord, WordCloudOptions,
};
use crate::ui::{DisplayOptions, Messages};

pub const EMPTY_CLOUD: &str = "Not enough words for a word cloud.";

#[derive(Debug, Clone, Serialize)]
pub struct SongReport {
    pub query: String,
    pub song: Option<Song>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<LyricsStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_words: Option<Vec<WordCount>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_cloud: Option<Vec<WeightedWord>>,
}

impl SongReport {
    /// Analyse `song` according to the enabled sections
    pub fn build(
        query: &str,
        song: Option<Song>,
        display: &DisplayOptions,
        cloud: &WordCloudOptions,
    ) -> Self {
        let lyrics = song.as_ref().map(|s| s.lyrics.as_str());

        Self {
            query: query.to_string(),
            stats: lyrics
                .filter(|_| display.show_stats)
                .map(LyricsStats::compute),
            common_words: lyrics
                .filter(|_| display.show_common_words)
                .map(|l| common_words(l, COMMON_WORDS_LIMIT)),
            word_cloud: lyrics
                .filter(|_| display.show_wordcloud)
                .map(|l| word_frequencies(l, cloud.max_words)),
            song,
        }
    }

    pub fn is_found(&self) -> bool {
        self.song.is_some()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Renders reports as text, with ANSI colours when `color` is set
pub struct ReportRenderer {
    pub color: bool,
    pub show_lyrics: bool,
    pub cloud_width: u16,
    pub cloud_height: u16,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self {
            color: false,
            show_lyrics: true,
            cloud_width: 80,
            cloud_height: 20,
        }
    }
}

impl ReportRenderer {
    pub fn render(&self, report: &SongReport, cloud: &WordCloudOptions) -> String {
        let mut out = String::new();

        let Some(song) = &report.song else {
            let _ = writeln!(out, "{}", Messages::NOT_FOUND);
            let _ = writeln!(out, "{}", Messages::NOT_FOUND_TIP);
            return out;
        };

        let _ = writeln!(out, "🎵 {} by {}", song.title, song.artist);
        if !song.url.is_empty() {
            let _ = writeln!(out, "{}", song.url);
        }

        if self.show_lyrics {
            self.section(&mut out, "Lyrics");
            let _ = writeln!(out, "{}", song.lyrics.trim_end());
        }

        if let Some(stats) = &report.stats {
            self.section(&mut out, "Lyrics Statistics");
            out.push_str(&render_stats(stats));
        }

        if let Some(words) = &report.word_cloud {
            self.section(&mut out, "Word Cloud");
            let layout = wordcloud::layout_words(words, self.cloud_width, self.cloud_height, cloud);
            if layout.is_empty() {
                let _ = writeln!(out, "{}", EMPTY_CLOUD);
            } else {
                out.push_str(&self.render_cloud(&layout));
            }
        }

        if let Some(words) = &report.common_words {
            self.section(&mut out, "Most Common Words");
            out.push_str(&self.render_common_words(words, cloud.colormap));
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", Messages::FOOTER);
        out
    }

    fn section(&self, out: &mut String, title: &str) {
        let heading = format!("── {} ──", title);
        let _ = writeln!(out);
        if self.color {
            let _ = writeln!(out, "{}", style(heading).attribute(Attribute::Bold));
        } else {
            let _ = writeln!(out, "{}", heading);
        }
    }

    /// Cloud rows; uncoloured output trims trailing blanks
    pub fn render_cloud(&self, layout: &CloudLayout) -> String {
        let grid = layout.grid();
        let mut out = String::new();

        for row in grid {
            let mut line = String::new();
            for cell in row {
                match cell {
                    CloudCell::Continuation => {}
                    CloudCell::Empty if self.color => {
                        let _ = write!(line, "{}", style(' ').on(term_color(layout.background)));
                    }
                    CloudCell::Empty => line.push(' '),
                    CloudCell::Glyph { ch, word } if self.color => {
                        let placed = &layout.words[word];
                        let mut styled = style(ch)
                            .with(term_color(placed.color))
                            .on(term_color(layout.background));
                        if placed.tier.is_bold() {
                            styled = styled.attribute(Attribute::Bold);
                        }
                        let _ = write!(line, "{}", styled);
                    }
                    CloudCell::Glyph { ch, .. } => line.push(ch),
                }
            }
            if !self.color {
                line.truncate(line.trim_end().len());
            }
            let _ = writeln!(out, "{}", line);
        }
        out
    }

    /// Ranked table; count cells are shaded along the colour scheme
    pub fn render_common_words(&self, words: &[WordCount], colormap: Colormap) -> String {
        let mut out = String::new();
        if words.is_empty() {
            let _ = writeln!(out, "No words to rank.");
            return out;
        }

        let width = words
            .iter()
            .map(|w| w.word.chars().count())
            .max()
            .unwrap_or(0)
            .max("Word".len());
        let (min, max) = words.iter().fold((usize::MAX, 0), |(lo, hi), w| {
            (lo.min(w.count), hi.max(w.count))
        });

        let _ = writeln!(out, "{:>3}  {:<width$}  {:>5}", "#", "Word", "Count", width = width);
        for (rank, entry) in words.iter().enumerate() {
            let count = format!("{:>5}", entry.count);
            let count = if self.color {
                let shade = colormap.sample_range(entry.count, min, max);
                let text = if shade.luminance() > 0.5 { Rgb::BLACK } else { Rgb::WHITE };
                style(count)
                    .with(term_color(text))
                    .on(term_color(shade))
                    .to_string()
            } else {
                count
            };
            let _ = writeln!(
                out,
                "{:>3}  {:<width$}  {}",
                rank + 1,
                entry.word,
                count,
                width = width
            );
        }
        out
    }
}

pub fn render_stats(stats: &LyricsStats) -> String {
    format!(
        "Total Words: {}  |  Unique Words: {}  |  Unique Ratio: {}\n",
        stats.total_words,
        stats.unique_words,
        stats.unique_ratio_display()
    )
}

fn term_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(lyrics: &str) -> Song {
        Song {
            id: 1,
            title: "Love Story".to_string(),
            artist: "Taylor Swift".to_string(),
            url: "https://genius.com/Taylor-swift-love-story-lyrics".to_string(),
            lyrics: lyrics.to_string(),
        }
    }

    fn plain() -> ReportRenderer {
        ReportRenderer {
            cloud_width: 40,
            cloud_height: 8,
            ..ReportRenderer::default()
        }
    }

    #[test]
    fn test_not_found_report() {
        let report = SongReport::build(
            "Nope",
            None,
            &DisplayOptions::default(),
            &WordCloudOptions::default(),
        );
        assert!(!report.is_found());
        assert!(report.stats.is_none());

        let text = plain().render(&report, &WordCloudOptions::default());
        assert!(text.contains(Messages::NOT_FOUND));
        assert!(text.contains("All Too Well (10 Minute Version)"));
    }

    #[test]
    fn test_sections_follow_display_options() {
        let display = DisplayOptions {
            show_stats: true,
            show_wordcloud: false,
            show_common_words: false,
        };
        let report = SongReport::build(
            "Love Story",
            Some(song("Romeo take me somewhere we can be alone")),
            &display,
            &WordCloudOptions::default(),
        );
        assert!(report.stats.is_some());
        assert!(report.word_cloud.is_none());
        assert!(report.common_words.is_none());

        let text = plain().render(&report, &WordCloudOptions::default());
        assert!(text.contains("Lyrics Statistics"));
        assert!(text.contains("Total Words: 8"));
        assert!(!text.contains("Word Cloud"));
        assert!(!text.contains("Most Common Words"));
    }

    #[test]
    fn test_lyrics_can_be_hidden() {
        let report = SongReport::build(
            "Love Story",
            Some(song("marry me juliet")),
            &DisplayOptions::default(),
            &WordCloudOptions::default(),
        );
        let renderer = ReportRenderer {
            show_lyrics: false,
            ..plain()
        };
        let text = renderer.render(&report, &WordCloudOptions::default());
        assert!(!text.contains("── Lyrics ──"));
        assert!(text.contains("🎵 Love Story by Taylor Swift"));
    }

    #[test]
    fn test_plain_cloud_contains_top_word() {
        let report = SongReport::build(
            "Love Story",
            Some(song("romeo romeo romeo juliet")),
            &DisplayOptions::default(),
            &WordCloudOptions::default(),
        );
        let text = plain().render(&report, &WordCloudOptions::default());
        assert!(text.contains("R O M E O"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_common_words_table() {
        let words = vec![
            WordCount { word: "love".into(), count: 5 },
            WordCount { word: "story".into(), count: 2 },
        ];
        let table = plain().render_common_words(&words, Colormap::Inferno);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "  #  Word   Count");
        assert_eq!(lines[1], "  1  love       5");
        assert_eq!(lines[2], "  2  story      2");

        let colored = ReportRenderer { color: true, ..plain() }
            .render_common_words(&words, Colormap::Inferno);
        assert!(colored.contains('\u{1b}'));
    }

    #[test]
    fn test_json_report() {
        let report = SongReport::build(
            "Love Story",
            Some(song("love love story")),
            &DisplayOptions::default(),
            &WordCloudOptions::default(),
        );
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["song"]["title"], "Love Story");
        assert_eq!(json["stats"]["total_words"], 3);
        assert_eq!(json["common_words"][0]["word"], "love");
        assert_eq!(json["word_cloud"][0]["weight"], 1.0);
    }

    #[test]
    fn test_stats_line() {
        let line = render_stats(&LyricsStats::compute(""));
        assert_eq!(line, "Total Words: 0  |  Unique Words: 0  |  Unique Ratio: n/a\n");
    }
}
