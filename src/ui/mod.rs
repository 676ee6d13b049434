pub mod report;
pub mod terminal;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EnvVars;

/// Detect the UI mode based on environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Plain,    // Uncoloured text for pipes and CI
    Terminal, // Colours and spinners for interactive terminals
}

impl UiMode {
    pub fn detect() -> Self {
        if std::env::var(EnvVars::FORCE_TERMINAL_UI).is_ok() {
            debug!("UI Mode: Terminal (forced by {})", EnvVars::FORCE_TERMINAL_UI);
            return UiMode::Terminal;
        }

        let has_ci = std::env::var(EnvVars::CI).is_ok();
        let is_tty = atty::is(atty::Stream::Stdout);
        debug!("UI Mode detection - CI: {}, TTY: {}", has_ci, is_tty);

        if has_ci || !is_tty {
            UiMode::Plain
        } else {
            UiMode::Terminal
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, UiMode::Terminal)
    }
}

/// Which analysis sections are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub show_stats: bool,
    pub show_wordcloud: bool,
    pub show_common_words: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_stats: true,
            show_wordcloud: true,
            show_common_words: true,
        }
    }
}

/// User-facing messages shared by the report and the explorer
pub struct Messages;

impl Messages {
    pub const NOT_FOUND: &'static str = "Song not found. Please check the title and try again.";
    pub const NOT_FOUND_TIP: &'static str =
        "Tip: Try exact song titles like 'All Too Well (10 Minute Version)'";
    pub const RATE_LIMIT_HINT: &'static str =
        "If you see API rate limit errors, please wait a minute and try again.";
    pub const FOOTER: &'static str = "Data from Genius API";

    pub fn app_title(artist: &str) -> String {
        if artist.is_empty() {
            "🎶 Lyrics Explorer".to_string()
        } else {
            format!("🎶 {} Lyrics Explorer", artist)
        }
    }

    /// Label of the song title input
    pub fn title_prompt(artist: &str) -> String {
        if artist.is_empty() {
            " Enter a song title: ".to_string()
        } else {
            format!(" Enter a {} song title: ", artist)
        }
    }

    pub fn searching(title: &str) -> String {
        format!("Searching for '{}'...", title)
    }

    pub fn error(error: &impl std::fmt::Display) -> String {
        format!("An error occurred: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_terminal_ui() {
        std::env::set_var(EnvVars::FORCE_TERMINAL_UI, "1");
        assert_eq!(UiMode::detect(), UiMode::Terminal);
        std::env::remove_var(EnvVars::FORCE_TERMINAL_UI);
    }

    #[test]
    fn test_messages() {
        assert_eq!(Messages::searching("Love Story"), "Searching for 'Love Story'...");
        assert_eq!(Messages::error(&"boom"), "An error occurred: boom");
        assert_eq!(Messages::app_title("Taylor Swift"), "🎶 Taylor Swift Lyrics Explorer");
        assert_eq!(Messages::title_prompt("Lorde"), " Enter a Lorde song title: ");
        assert_eq!(Messages::title_prompt(""), " Enter a song title: ");
        assert!(DisplayOptions::default().show_wordcloud);
    }
}
