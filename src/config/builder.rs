use crate::config::env::parse_bool_str;
use crate::config::validation::ConfigValidator;
use crate::config::{
    Config, CACHE_MAX_AGE_RANGE, MAX_RETRIES_RANGE, MAX_WORDS_RANGE, RETRY_DELAY_RANGE, TIMEOUT_RANGE,
};
use crate::error::{ConfigError, ExplorerError, Result};

/// Configuration builder with validation and type safety
pub struct ConfigBuilder {
    config: Config,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigBuilder {
    /// Keys accepted by `set`, in display order
    pub const KEYS: &'static [(&'static str, &'static str)] = &[
        ("genius_token", "Genius API access token"),
        ("api_base_url", "Genius API base URL"),
        ("artist", "Artist whose songs are searched"),
        ("default_title", "Title searched when explore starts"),
        ("excluded_terms", "Comma-separated title terms to skip"),
        ("remove_section_headers", "Strip [Chorus] style headers (true/false)"),
        ("skip_non_songs", "Skip tracklists, liner notes and similar hits (true/false)"),
        ("timeout_secs", "Request timeout in seconds (1-120)"),
        ("max_retries", "Attempts on rate-limited requests (1-10)"),
        ("retry_delay_ms", "Base backoff delay in milliseconds (0-60000)"),
        ("user_agent", "User-Agent header sent with requests"),
        ("show_stats", "Show lyrics statistics (true/false)"),
        ("show_wordcloud", "Show the word cloud (true/false)"),
        ("show_common_words", "Show the most common words (true/false)"),
        ("max_words", "Maximum words in the word cloud (50-300)"),
        ("background_color", "Word cloud background colour (#rrggbb)"),
        ("colormap", "Colour scheme for the word cloud and table"),
        ("cache_enabled", "Cache fetched songs on disk (true/false)"),
        ("cache_max_age_hours", "Hours before a cached song is refetched"),
    ];

    pub fn new() -> Self {
        Self { config: Config::default() }
    }

    /// Start from an existing configuration
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    pub fn genius_token<S: Into<String>>(mut self, token: Option<S>) -> Self {
        self.config.genius_token = token
            .map(Into::into)
            .filter(|t: &String| !t.trim().is_empty());
        self
    }

    pub fn api_base_url<S: Into<String>>(mut self, url: S) -> Result<Self> {
        let url = url.into();
        ConfigValidator::validate_url(&url, "Genius API")?;
        self.config.api_base_url = url;
        Ok(self)
    }

    pub fn artist<S: Into<String>>(mut self, artist: S) -> Result<Self> {
        let artist = artist.into();
        ConfigValidator::validate_not_blank(&artist, "artist")?;
        self.config.artist = artist;
        Ok(self)
    }

    pub fn max_words(mut self, max_words: usize) -> Result<Self> {
        ConfigValidator::validate_range(max_words, MAX_WORDS_RANGE.0, MAX_WORDS_RANGE.1, "max words")?;
        self.config.max_words = max_words;
        Ok(self)
    }

    pub fn background_color<S: Into<String>>(mut self, color: S) -> Result<Self> {
        let color = color.into();
        ConfigValidator::validate_hex_color(&color, "background color")?;
        self.config.background_color = color;
        Ok(self)
    }

    pub fn max_retries(mut self, retries: u32) -> Result<Self> {
        ConfigValidator::validate_range(retries as u64, MAX_RETRIES_RANGE.0, MAX_RETRIES_RANGE.1, "max retries")?;
        self.config.max_retries = retries;
        Ok(self)
    }

    /// Set a single key from its string form
    pub fn set(mut self, key: &str, value: &str) -> Result<Self> {
        match key {
            "genius_token" => return Ok(self.genius_token(Some(value))),
            "api_base_url" => return self.api_base_url(value),
            "artist" => return self.artist(value),
            "default_title" => {
                ConfigValidator::validate_not_blank(value, key)?;
                self.config.default_title = value.to_string();
            }
            "excluded_terms" => {
                self.config.excluded_terms = value
                    .split(',')
                    .map(|term| term.trim().to_string())
                    .filter(|term| !term.is_empty())
                    .collect();
            }
            "remove_section_headers" => self.config.remove_section_headers = parse_bool(key, value)?,
            "skip_non_songs" => self.config.skip_non_songs = parse_bool(key, value)?,
            "timeout_secs" => {
                let parsed = parse_number::<u64>(key, value)?;
                ConfigValidator::validate_range(parsed, TIMEOUT_RANGE.0, TIMEOUT_RANGE.1, key)?;
                self.config.timeout_secs = parsed;
            }
            "max_retries" => return self.max_retries(parse_number::<u32>(key, value)?),
            "retry_delay_ms" => {
                let parsed = parse_number::<u64>(key, value)?;
                ConfigValidator::validate_range(parsed, RETRY_DELAY_RANGE.0, RETRY_DELAY_RANGE.1, key)?;
                self.config.retry_delay_ms = parsed;
            }
            "user_agent" => {
                ConfigValidator::validate_not_blank(value, key)?;
                self.config.user_agent = value.to_string();
            }
            "show_stats" => self.config.show_stats = parse_bool(key, value)?,
            "show_wordcloud" => self.config.show_wordcloud = parse_bool(key, value)?,
            "show_common_words" => self.config.show_common_words = parse_bool(key, value)?,
            "max_words" => return self.max_words(parse_number::<usize>(key, value)?),
            "background_color" => return self.background_color(value),
            "colormap" => self.config.colormap = ConfigValidator::validate_colormap(value)?,
            "cache_enabled" => self.config.cache_enabled = parse_bool(key, value)?,
            "cache_max_age_hours" => {
                let parsed = parse_number::<u64>(key, value)?;
                ConfigValidator::validate_range(parsed, CACHE_MAX_AGE_RANGE.0, CACHE_MAX_AGE_RANGE.1, key)?;
                self.config.cache_max_age_hours = parsed;
            }
            _ => return Err(ConfigError::UnknownKey { key: key.to_string() }.into()),
        }
        Ok(self)
    }

    /// Build the configuration, running the final validation
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    parse_bool_str(value).ok_or_else(|| {
        ExplorerError::Validation(format!(
            "Invalid value for {}: '{}'. Use true/false, 1/0, yes/no or on/off",
            key, value
        ))
    })
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| {
        ExplorerError::Config(ConfigError::InvalidValue {
            field: key.to_string(),
            value: value.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::wordcloud::colormap::Colormap;

    #[test]
    fn test_config_builder_basic() {
        let config = ConfigBuilder::new()
            .artist("Lorde")
            .unwrap()
            .max_words(200)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.artist, "Lorde");
        assert_eq!(config.max_words, 200);
    }

    #[test]
    fn test_config_builder_validation() {
        let result = ConfigBuilder::new().api_base_url("not-a-url");
        assert!(matches!(result, Err(ExplorerError::Validation(_))));

        let result = ConfigBuilder::new().max_words(20);
        assert!(matches!(result, Err(ExplorerError::Validation(_))));
    }

    #[test]
    fn test_set_by_key() {
        let config = ConfigBuilder::new()
            .set("colormap", "viridis")
            .unwrap()
            .set("show_wordcloud", "off")
            .unwrap()
            .set("excluded_terms", "(Remix), (Demo)")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.colormap, Colormap::Viridis);
        assert!(!config.show_wordcloud);
        assert_eq!(config.excluded_terms, vec!["(Remix)", "(Demo)"]);
    }

    #[test]
    fn test_set_unknown_key() {
        let result = ConfigBuilder::new().set("redis_url", "redis://localhost");
        assert!(matches!(
            result,
            Err(ExplorerError::Config(ConfigError::UnknownKey { .. }))
        ));
    }

    #[test]
    fn test_blank_token_clears() {
        let config = ConfigBuilder::new().set("genius_token", "  ").unwrap().build().unwrap();
        assert!(config.genius_token.is_none());
    }

    #[test]
    fn test_every_listed_key_is_settable() {
        let samples = [
            ("genius_token", "abc"),
            ("api_base_url", "https://example.com"),
            ("artist", "Lorde"),
            ("default_title", "Royals"),
            ("excluded_terms", "(Live)"),
            ("remove_section_headers", "false"),
            ("skip_non_songs", "true"),
            ("timeout_secs", "10"),
            ("max_retries", "5"),
            ("retry_delay_ms", "500"),
            ("user_agent", "test-agent"),
            ("show_stats", "true"),
            ("show_wordcloud", "true"),
            ("show_common_words", "false"),
            ("max_words", "100"),
            ("background_color", "#000000"),
            ("colormap", "magma"),
            ("cache_enabled", "no"),
            ("cache_max_age_hours", "12"),
        ];
        assert_eq!(samples.len(), ConfigBuilder::KEYS.len());
        for (key, value) in samples {
            assert!(ConfigBuilder::new().set(key, value).is_ok(), "key {} rejected", key);
        }
    }
}
