pub mod builder;
pub mod env;
pub mod validation;

pub use builder::ConfigBuilder;
pub use env::{EnvParser, EnvVars};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use directories::ProjectDirs;
use tracing::{debug, warn};

use crate::core::services::genius::GeniusSettings;
use crate::core::services::retry::RetryPolicy;
use crate::core::wordcloud::colormap::Colormap;
use crate::core::wordcloud::WordCloudOptions;
use crate::error::{ConfigError, Result};
use crate::ui::DisplayOptions;
use validation::ConfigValidator;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

pub const MAX_WORDS_RANGE: (usize, usize) = (50, 300);
pub const TIMEOUT_RANGE: (u64, u64) = (1, 120);
pub const MAX_RETRIES_RANGE: (u64, u64) = (1, 10);
pub const RETRY_DELAY_RANGE: (u64, u64) = (0, 60_000);
pub const CACHE_MAX_AGE_RANGE: (u64, u64) = (1, 24 * 365);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Genius API access token (GENIUS_TOKEN takes precedence)
    pub genius_token: Option<String>,

    /// Genius API base URL
    pub api_base_url: String,

    /// Artist whose songs are searched
    pub artist: String,

    /// Title searched when `explore` starts
    pub default_title: String,

    /// Songs whose title contains one of these terms are skipped
    pub excluded_terms: Vec<String>,

    /// Strip `[Verse 1]` style headers from lyrics
    pub remove_section_headers: bool,

    /// Skip search hits that are not songs (tracklists, liner notes, ...)
    pub skip_non_songs: bool,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Attempts made before giving up on rate-limited requests
    pub max_retries: u32,

    /// Base delay of the linear backoff, in milliseconds
    pub retry_delay_ms: u64,

    /// User-Agent sent with every request
    pub user_agent: String,

    pub show_stats: bool,
    pub show_wordcloud: bool,
    pub show_common_words: bool,

    /// Maximum number of words drawn in the word cloud
    pub max_words: usize,

    /// Word cloud background colour
    pub background_color: String,

    /// Word cloud and table colour scheme
    pub colormap: Colormap,

    /// Cache fetched songs on disk
    pub cache_enabled: bool,

    /// Age after which cached songs are fetched again
    pub cache_max_age_hours: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            genius_token: None,
            api_base_url: "https://api.genius.com".to_string(),
            artist: "Taylor Swift".to_string(),
            default_title: "Love Story".to_string(),
            excluded_terms: vec!["(Remix)".to_string(), "(Live)".to_string()],
            remove_section_headers: true,
            skip_non_songs: true,
            timeout_secs: 5,
            max_retries: 3,
            retry_delay_ms: 1000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            show_stats: true,
            show_wordcloud: true,
            show_common_words: true,
            max_words: 150,
            background_color: "#ffffff".to_string(),
            colormap: Colormap::Inferno,
            cache_enabled: true,
            cache_max_age_hours: 24 * 7,
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Try to load .env file if it exists (for development)
        dotenvy::dotenv().ok();

        let config_file = match config_path {
            Some(path) => PathBuf::from(path),
            None => Self::config_path()?,
        };

        let mut config = if config_file.exists() {
            debug!("Loading configuration from {}", config_file.display());
            let content = fs::read_to_string(&config_file)?;
            toml::from_str::<Config>(&content)?
        } else {
            Self::default()
        };

        // Environment variables have the highest priority
        config.load_from_env()?;
        config.validate()?;

        // Write a starter config file on first run, best effort
        if !config_file.exists() {
            if let Err(e) = Self::default().save(&config_file) {
                warn!("Could not write default config to {}: {}", config_file.display(), e);
            }
        }

        Ok(config)
    }

    /// Apply environment overrides with validation
    pub fn load_from_env(&mut self) -> Result<()> {
        if let Some(token) = EnvParser::parse_string(EnvVars::PREFIXED_GENIUS_TOKEN, None)? {
            self.genius_token = Some(token);
        }
        if let Some(token) = EnvParser::parse_string(EnvVars::GENIUS_TOKEN, None)? {
            self.genius_token = Some(token);
        }

        if let Some(url) = EnvParser::parse_string(EnvVars::API_BASE_URL, Some(|url| {
            ConfigValidator::validate_url(url, "Genius API")
        }))? {
            self.api_base_url = url;
        }

        if let Some(artist) = EnvParser::parse_string(EnvVars::ARTIST, None)? {
            self.artist = artist;
        }

        if let Some(title) = EnvParser::parse_string(EnvVars::DEFAULT_TITLE, None)? {
            self.default_title = title;
        }

        if let Some(terms) = EnvParser::parse_list(EnvVars::EXCLUDED_TERMS)? {
            self.excluded_terms = terms;
        }

        if let Some(timeout) = EnvParser::parse_u64(EnvVars::TIMEOUT_SECS, TIMEOUT_RANGE.0, TIMEOUT_RANGE.1)? {
            self.timeout_secs = timeout;
        }

        if let Some(retries) = EnvParser::parse_u64(EnvVars::MAX_RETRIES, MAX_RETRIES_RANGE.0, MAX_RETRIES_RANGE.1)? {
            self.max_retries = retries as u32;
        }

        if let Some(delay) = EnvParser::parse_u64(EnvVars::RETRY_DELAY_MS, RETRY_DELAY_RANGE.0, RETRY_DELAY_RANGE.1)? {
            self.retry_delay_ms = delay;
        }

        if let Some(agent) = EnvParser::parse_string(EnvVars::USER_AGENT, None)? {
            self.user_agent = agent;
        }

        if let Some(max_words) = EnvParser::parse_u64(
            EnvVars::MAX_WORDS,
            MAX_WORDS_RANGE.0 as u64,
            MAX_WORDS_RANGE.1 as u64,
        )? {
            self.max_words = max_words as usize;
        }

        if let Some(color) = EnvParser::parse_string(EnvVars::BACKGROUND_COLOR, Some(|color| {
            ConfigValidator::validate_hex_color(color, "background color")
        }))? {
            self.background_color = color;
        }

        if let Some(name) = EnvParser::parse_string(EnvVars::COLORMAP, None)? {
            self.colormap = ConfigValidator::validate_colormap(&name)?;
        }

        if let Some(enabled) = EnvParser::parse_bool(EnvVars::CACHE_ENABLED)? {
            self.cache_enabled = enabled;
        }

        if let Some(hours) = EnvParser::parse_u64(
            EnvVars::CACHE_MAX_AGE_HOURS,
            CACHE_MAX_AGE_RANGE.0,
            CACHE_MAX_AGE_RANGE.1,
        )? {
            self.cache_max_age_hours = hours;
        }

        Ok(())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate_url(&self.api_base_url, "Genius API")?;
        ConfigValidator::validate_not_blank(&self.artist, "artist")?;
        ConfigValidator::validate_not_blank(&self.user_agent, "user agent")?;
        ConfigValidator::validate_range(self.timeout_secs, TIMEOUT_RANGE.0, TIMEOUT_RANGE.1, "timeout seconds")?;
        ConfigValidator::validate_range(
            self.max_retries as u64,
            MAX_RETRIES_RANGE.0,
            MAX_RETRIES_RANGE.1,
            "max retries",
        )?;
        ConfigValidator::validate_range(
            self.retry_delay_ms,
            RETRY_DELAY_RANGE.0,
            RETRY_DELAY_RANGE.1,
            "retry delay",
        )?;
        ConfigValidator::validate_range(self.max_words, MAX_WORDS_RANGE.0, MAX_WORDS_RANGE.1, "max words")?;
        ConfigValidator::validate_hex_color(&self.background_color, "background color")?;
        ConfigValidator::validate_range(
            self.cache_max_age_hours,
            CACHE_MAX_AGE_RANGE.0,
            CACHE_MAX_AGE_RANGE.1,
            "cache max age hours",
        )?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(ConfigError::from)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("dev", "lyrics-explorer", "lyrics-explorer")
    }

    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = Self::project_dirs().ok_or(ConfigError::NoConfigDir)?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }

    pub fn cache_dir(&self) -> PathBuf {
        match Self::project_dirs() {
            Some(project_dirs) => project_dirs.cache_dir().to_path_buf(),
            None => {
                warn!("ProjectDirs unavailable; falling back to current directory for cache");
                PathBuf::from(".lyrics-explorer-cache")
            }
        }
    }

    pub fn genius_settings(&self) -> GeniusSettings {
        GeniusSettings {
            token: self.genius_token.clone(),
            base_url: self.api_base_url.trim_end_matches('/').to_string(),
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            excluded_terms: self.excluded_terms.clone(),
            remove_section_headers: self.remove_section_headers,
            skip_non_songs: self.skip_non_songs,
            retry: RetryPolicy::new(self.max_retries, Duration::from_millis(self.retry_delay_ms)),
        }
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            show_stats: self.show_stats,
            show_wordcloud: self.show_wordcloud,
            show_common_words: self.show_common_words,
        }
    }

    pub fn wordcloud_options(&self) -> WordCloudOptions {
        WordCloudOptions {
            max_words: self.max_words,
            background: self.background_color.clone(),
            colormap: self.colormap,
            ..WordCloudOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.artist, "Taylor Swift");
        assert_eq!(config.max_words, 150);
        assert_eq!(config.colormap, Colormap::Inferno);
        assert_eq!(config.excluded_terms, vec!["(Remix)", "(Live)"]);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("artist = \"Phoebe Bridgers\"\nmax_words = 200\n").unwrap();
        assert_eq!(config.artist, "Phoebe Bridgers");
        assert_eq!(config.max_words, 200);
        assert_eq!(config.default_title, "Love Story");
        assert!(config.show_wordcloud);
    }

    #[test]
    fn test_invalid_max_words_rejected() {
        let config = Config { max_words: 10, ..Config::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cache_max_age_from_file_is_range_checked() {
        let config: Config = toml::from_str("cache_max_age_hours = 18446744073709551\n").unwrap();
        assert!(config.validate().is_err());

        let config = Config { cache_max_age_hours: 0, ..Config::default() };
        assert!(config.validate().is_err());

        let config = Config { cache_max_age_hours: 24 * 365, ..Config::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_genius_settings_trim_base_url() {
        let config = Config {
            api_base_url: "https://api.genius.com/".to_string(),
            max_retries: 4,
            retry_delay_ms: 250,
            ..Config::default()
        };
        let settings = config.genius_settings();
        assert_eq!(settings.base_url, "https://api.genius.com");
        assert_eq!(settings.retry.max_retries(), 4);
        assert_eq!(settings.retry.delay_after(1), Duration::from_millis(250));
    }
}
