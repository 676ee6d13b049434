//! Core functionality modules
//!
//! This module contains the business logic, organized into layers:
//! - `services`: Genius API client, retry policy, lyrics scraping and lookup
//! - `analysis`: word statistics and most common words
//! - `wordcloud`: word weighting, layout and colour schemes
//! - `infrastructure`: cross-cutting concerns (song cache)

pub mod analysis;
pub mod infrastructure;
pub mod services;
pub mod wordcloud;
