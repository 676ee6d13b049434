//! Infrastructure components
//!
//! Cross-cutting concerns that support the core functionality:
//! - Song caching on disk

pub mod cache;

pub use cache::SongCache;
