//! Error handling for the lyrics-explorer application
//!
//! This module provides a hierarchical error system with user-friendly error
//! messages. A song that cannot be found is not an error: lookups return
//! `Ok(None)` and the UI shows guidance instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Lyrics processing error: {0}")]
    Lyrics(#[from] LyricsError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API rate limit exceeded after {attempts} attempt(s)")]
    RateLimit { attempts: u32 },

    #[error("API response invalid: {reason}")]
    InvalidResponse { reason: String },

    #[error("Authentication failed: check GENIUS_TOKEN")]
    Authentication,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Please set GENIUS_TOKEN in the config file or environment variables")]
    MissingToken,

    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Unknown configuration key: {key}")]
    UnknownKey { key: String },

    #[error("Could not determine a config directory for this platform")]
    NoConfigDir,
}

#[derive(Error, Debug)]
pub enum LyricsError {
    #[error("Song page contained no lyrics: {url}")]
    EmptyPage { url: String },

    #[error("Invalid selector: {0}")]
    Selector(String),
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("File cache error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache directory unavailable: {path}")]
    Unavailable { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, ExplorerError>;

impl From<std::io::Error> for ExplorerError {
    fn from(err: std::io::Error) -> Self {
        ExplorerError::Internal(err.into())
    }
}

impl From<toml::de::Error> for ExplorerError {
    fn from(err: toml::de::Error) -> Self {
        ExplorerError::Config(ConfigError::InvalidFormat(err))
    }
}

impl From<reqwest::Error> for ExplorerError {
    fn from(err: reqwest::Error) -> Self {
        ExplorerError::Network(NetworkError::Http(err))
    }
}

impl From<tokio::task::JoinError> for ExplorerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ExplorerError::Internal(err.into())
    }
}

impl ExplorerError {
    /// True when the failure came from the API throttling us
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ExplorerError::Network(NetworkError::RateLimit { .. }))
    }

    pub fn is_missing_token(&self) -> bool {
        matches!(self, ExplorerError::Config(ConfigError::MissingToken))
    }
}
