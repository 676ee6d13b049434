//! Command Line Interface module
//!
//! - `search`: one-shot song report (text or JSON)
//! - `explore`: interactive terminal explorer
//! - `config`: show and edit the configuration file
//! - `cache`: song cache maintenance

pub mod cache;
pub mod config;
pub mod explore;
pub mod search;

use clap::Args;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::{Config, ConfigBuilder};
use crate::core::infrastructure::SongCache;
use crate::core::services::{GeniusClient, LyricsService};
use crate::error::Result;

/// Section toggles and word cloud settings shared by `search` and `explore`
#[derive(Args, Debug, Default, Clone)]
pub struct DisplayArgs {
    /// Artist to search songs of
    #[arg(short, long)]
    pub artist: Option<String>,

    /// Maximum words in the word cloud (50-300)
    #[arg(long)]
    pub max_words: Option<usize>,

    /// Word cloud background colour, e.g. "#ffffff"
    #[arg(long)]
    pub background: Option<String>,

    /// Colour scheme (viridis, plasma, inferno, magma, cividis, twilight, hsv, autumn, winter)
    #[arg(long)]
    pub colormap: Option<String>,

    /// Hide lyrics statistics
    #[arg(long)]
    pub no_stats: bool,

    /// Hide the word cloud
    #[arg(long)]
    pub no_wordcloud: bool,

    /// Hide the most common words
    #[arg(long)]
    pub no_common_words: bool,

    /// Bypass the song cache
    #[arg(long)]
    pub no_cache: bool,
}

impl DisplayArgs {
    /// Layer the command line over the loaded configuration, validating
    /// every override the same way `config set` does
    pub fn apply(&self, config: Config) -> Result<Config> {
        let mut builder = ConfigBuilder::from_config(config);
        if let Some(artist) = &self.artist {
            builder = builder.artist(artist.as_str())?;
        }
        if let Some(max_words) = self.max_words {
            builder = builder.max_words(max_words)?;
        }
        if let Some(background) = &self.background {
            builder = builder.background_color(background.as_str())?;
        }
        if let Some(colormap) = &self.colormap {
            builder = builder.set("colormap", colormap)?;
        }

        let mut config = builder.build()?;
        if self.no_stats {
            config.show_stats = false;
        }
        if self.no_wordcloud {
            config.show_wordcloud = false;
        }
        if self.no_common_words {
            config.show_common_words = false;
        }
        if self.no_cache {
            config.cache_enabled = false;
        }
        Ok(config)
    }
}

/// Build the lyrics service. Fails with a missing-token error before any
/// network activity; an unusable cache only costs the cache.
pub fn build_service(config: &Config) -> Result<LyricsService> {
    let client = GeniusClient::new(config.genius_settings())?;

    if !config.cache_enabled {
        debug!("Song cache disabled");
        return Ok(LyricsService::new(client));
    }

    match SongCache::new(config.cache_dir(), config.cache_max_age_hours) {
        Ok(cache) => Ok(LyricsService::with_cache(client, Arc::new(RwLock::new(cache)))),
        Err(e) => {
            warn!("Song cache unavailable, continuing without it: {}", e);
            Ok(LyricsService::new(client))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::wordcloud::Colormap;
    use crate::error::ExplorerError;

    #[test]
    fn test_overrides_apply() {
        let args = DisplayArgs {
            max_words: Some(80),
            colormap: Some("viridis".to_string()),
            no_wordcloud: true,
            no_cache: true,
            ..DisplayArgs::default()
        };
        let config = args.apply(Config::default()).unwrap();
        assert_eq!(config.max_words, 80);
        assert_eq!(config.colormap, Colormap::Viridis);
        assert!(!config.show_wordcloud);
        assert!(config.show_stats);
        assert!(!config.cache_enabled);
    }

    #[test]
    fn test_invalid_overrides_are_rejected() {
        let args = DisplayArgs {
            max_words: Some(1000),
            ..DisplayArgs::default()
        };
        assert!(args.apply(Config::default()).is_err());

        let args = DisplayArgs {
            background: Some("white".to_string()),
            ..DisplayArgs::default()
        };
        assert!(matches!(
            args.apply(Config::default()),
            Err(ExplorerError::Validation(_))
        ));
    }

    #[test]
    fn test_missing_token_stops_before_network() {
        let config = Config {
            genius_token: None,
            cache_enabled: false,
            ..Config::default()
        };
        let err = build_service(&config).err().unwrap();
        assert!(err.is_missing_token());
    }
}
