//! Text statistics over song lyrics
//!
//! - `stats`: total, unique and unique-ratio word metrics
//! - `common_words`: ranked word frequencies with stop words removed

pub mod common_words;
pub mod stats;

pub use common_words::{common_words, WordCount, COMMON_WORDS_LIMIT};
pub use stats::LyricsStats;
