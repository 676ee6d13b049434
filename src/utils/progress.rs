use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::ui::Messages;

/// Centralized spinner creation for CLI commands
pub struct ProgressUtils;

impl ProgressUtils {
    /// Spinner shown while a song is looked up
    pub fn create_search_spinner(title: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("valid spinner template"),
        );
        pb.set_message(Messages::searching(title));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// A spinner that draws nothing, for piped or JSON output
    pub fn hidden() -> ProgressBar {
        ProgressBar::hidden()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_spinner_message() {
        let pb = ProgressUtils::create_search_spinner("Love Story");
        assert_eq!(pb.message(), "Searching for 'Love Story'...");
        pb.finish_and_clear();
    }

    #[test]
    fn test_hidden_spinner() {
        assert!(ProgressUtils::hidden().is_hidden());
    }
}
