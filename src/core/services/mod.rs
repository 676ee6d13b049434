//! External services integration
//!
//! This module contains integrations with external APIs and services:
//! - Genius API client with rate-limit retry
//! - Lyrics page scraping
//! - Song lookup with caching support

pub mod genius;
pub mod lyrics;
pub mod retry;
pub mod scrape;

pub use genius::{GeniusClient, Song};
pub use lyrics::LyricsService;
