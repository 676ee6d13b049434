use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::core::infrastructure::cache::SongCache;
use crate::core::services::genius::{GeniusClient, Song};
use crate::error::Result;

/// Looks songs up through the song cache, then Genius
#[derive(Clone)]
pub struct LyricsService {
    client: GeniusClient,
    cache: Option<Arc<RwLock<SongCache>>>,
}

impl LyricsService {
    pub fn new(client: GeniusClient) -> Self {
        Self { client, cache: None }
    }

    pub fn with_cache(client: GeniusClient, cache: Arc<RwLock<SongCache>>) -> Self {
        Self {
            client,
            cache: Some(cache),
        }
    }

    /// Resolve the artist, then the song. `Ok(None)` means not found.
    pub async fn find_song(&self, title: &str, artist_name: &str) -> Result<Option<Song>> {
        if let Some(cache) = &self.cache {
            let cached = cache.write().await.get(title, artist_name);
            if let Some(song) = cached {
                debug!("Using cached song for: {} - {}", artist_name, title);
                return Ok(Some(song));
            }
        }

        let artist = match self.client.search_artist(artist_name).await? {
            Some(artist) => artist.name,
            None => {
                debug!("Artist '{}' not resolved, searching with the name as given", artist_name);
                artist_name.to_string()
            }
        };

        let song = self.client.search_song(title, &artist).await?;

        if let (Some(cache), Some(found)) = (&self.cache, &song) {
            if let Err(e) = cache.write().await.put(title, artist_name, found.clone()) {
                warn!("Failed to cache song {} - {}: {}", artist_name, title, e);
            }
        }

        Ok(song)
    }
}
