use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use crate::core::services::genius::{normalize_name, Song};
use crate::error::CacheError;

const INDEX_FILE: &str = "song_cache.json";

#[derive(Serialize, Deserialize, Clone)]
struct CacheEntry {
    song: Song,
    cached_at: u64,
    access_count: u32,
    last_accessed: u64,
}

#[derive(Serialize, Deserialize)]
struct CacheIndex {
    entries: HashMap<String, CacheEntry>,
    total_requests: u64,
    cache_hits: u64,
    last_cleanup: u64,
}

impl CacheIndex {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            total_requests: 0,
            cache_hits: 0,
            last_cleanup: current_timestamp(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheStats {
    pub total_entries: usize,
    pub total_requests: u64,
    pub cache_hits: u64,
    pub hit_rate_percent: f64,
    pub last_cleanup: u64,
}

/// On-disk cache of fetched songs keyed by normalized title and artist
pub struct SongCache {
    cache_dir: PathBuf,
    index: CacheIndex,
    max_age_hours: u64,
    max_entries: usize,
}

impl SongCache {
    pub fn new(cache_dir: PathBuf, max_age_hours: u64) -> Result<Self, CacheError> {
        fs::create_dir_all(&cache_dir)?;

        let index_path = cache_dir.join(INDEX_FILE);
        let index = if index_path.exists() {
            let content = fs::read_to_string(&index_path)?;
            serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Song cache index unreadable, starting fresh: {}", e);
                CacheIndex::new()
            })
        } else {
            CacheIndex::new()
        };

        Ok(Self {
            cache_dir,
            index,
            max_age_hours,
            max_entries: 500,
        })
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries.max(1);
        self
    }

    fn generate_key(title: &str, artist: &str) -> String {
        let mut hasher = DefaultHasher::new();
        normalize_name(title).hash(&mut hasher);
        normalize_name(artist).hash(&mut hasher);
        format!("{:x}", hasher.finish())
    }

    fn max_age_secs(&self) -> u64 {
        self.max_age_hours.saturating_mul(3600)
    }

    /// Lookups update hit counters and recency, so the index is written back
    pub fn get(&mut self, title: &str, artist: &str) -> Option<Song> {
        let key = Self::generate_key(title, artist);
        self.index.total_requests += 1;
        let now = current_timestamp();
        let max_age = self.max_age_secs();

        let expired = self
            .index
            .entries
            .get(&key)
            .map(|entry| now.saturating_sub(entry.cached_at) > max_age);

        let found = match expired {
            Some(true) => {
                debug!("Cache entry expired for: {} - {}", artist, title);
                self.index.entries.remove(&key);
                None
            }
            Some(false) => self.index.entries.get_mut(&key).map(|entry| {
                entry.access_count += 1;
                entry.last_accessed = now;
                entry.song.clone()
            }),
            None => None,
        };

        match &found {
            Some(_) => {
                self.index.cache_hits += 1;
                debug!("Cache hit for: {} - {}", artist, title);
            }
            None => debug!("Cache miss for: {} - {}", artist, title),
        }

        if let Err(e) = self.save_index() {
            warn!("Failed to persist song cache index: {}", e);
        }
        found
    }

    pub fn put(&mut self, title: &str, artist: &str, song: Song) -> Result<(), CacheError> {
        let key = Self::generate_key(title, artist);
        let now = current_timestamp();

        if !self.index.entries.contains_key(&key) && self.index.entries.len() >= self.max_entries {
            self.evict_least_recently_used(self.max_entries - 1);
        }

        self.index.entries.insert(
            key,
            CacheEntry {
                song,
                cached_at: now,
                access_count: 1,
                last_accessed: now,
            },
        );

        debug!("Cached song: {} - {}", artist, title);
        self.save_index()
    }

    pub fn clear(&mut self) -> Result<(), CacheError> {
        self.index = CacheIndex::new();

        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }

        info!("Song cache cleared");
        Ok(())
    }

    pub fn get_stats(&self) -> CacheStats {
        let hit_rate = if self.index.total_requests > 0 {
            (self.index.cache_hits as f64 / self.index.total_requests as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            total_entries: self.index.entries.len(),
            total_requests: self.index.total_requests,
            cache_hits: self.index.cache_hits,
            hit_rate_percent: hit_rate,
            last_cleanup: self.index.last_cleanup,
        }
    }

    /// Drop expired entries, then least recently used ones over the limit
    pub fn cleanup_old_entries(&mut self) -> usize {
        let now = current_timestamp();
        let max_age = self.max_age_secs();

        let before_count = self.index.entries.len();
        self.index.entries.retain(|_, entry| now.saturating_sub(entry.cached_at) <= max_age);
        self.evict_least_recently_used(self.max_entries);

        self.index.last_cleanup = now;
        let removed = before_count - self.index.entries.len();
        info!("Song cache cleanup: {} -> {} entries", before_count, self.index.entries.len());
        removed
    }

    /// Oldest access first; ties go to the older entry
    fn evict_least_recently_used(&mut self, keep: usize) {
        if self.index.entries.len() <= keep {
            return;
        }

        let mut entries: Vec<(String, u64, u64)> = self
            .index
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.last_accessed, v.cached_at))
            .collect();
        entries.sort_by_key(|(_, last_accessed, cached_at)| (*last_accessed, *cached_at));

        let to_remove = self.index.entries.len() - keep;
        for (key, _, _) in entries.into_iter().take(to_remove) {
            self.index.entries.remove(&key);
        }
    }

    pub fn save_index(&self) -> Result<(), CacheError> {
        let index_path = self.cache_dir.join(INDEX_FILE);
        let content = serde_json::to_string_pretty(&self.index)?;
        fs::create_dir_all(&self.cache_dir)?;
        // Write to a temp file then rename so readers never see a partial index
        let tmp_path = index_path.with_extension("json.tmp");
        fs::write(&tmp_path, &content)?;
        fs::rename(&tmp_path, &index_path)?;
        Ok(())
    }

    pub fn cache_dir(&self) -> &PathBuf {
        &self.cache_dir
    }

    pub fn max_age_hours(&self) -> u64 {
        self.max_age_hours
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_cache_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "lyrics-explorer-cache-test-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    fn song(id: u64, title: &str) -> Song {
        Song {
            id,
            title: title.to_string(),
            artist: "Taylor Swift".to_string(),
            url: format!("https://genius.com/{}", id),
            lyrics: "la la la".to_string(),
        }
    }

    #[test]
    fn test_put_then_get_normalizes_key() {
        let dir = temp_cache_dir("roundtrip");
        let mut cache = SongCache::new(dir.clone(), 24).unwrap();
        cache.put("Love Story", "Taylor Swift", song(1, "Love Story")).unwrap();

        let hit = cache.get("love story!", "TAYLOR SWIFT").unwrap();
        assert_eq!(hit.id, 1);
        assert!(cache.get("Enchanted", "Taylor Swift").is_none());

        let stats = cache.get_stats();
        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.cache_hits, 1);
        assert!((stats.hit_rate_percent - 50.0).abs() < f64::EPSILON);

        // Index persisted and reloaded
        let mut reloaded = SongCache::new(dir.clone(), 24).unwrap();
        assert!(reloaded.get("Love Story", "Taylor Swift").is_some());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_lru_trimming_evicts_least_recently_accessed() {
        let dir = temp_cache_dir("lru");
        let mut cache = SongCache::new(dir.clone(), 24).unwrap().with_max_entries(2);
        cache.put("One", "A", song(1, "One")).unwrap();
        cache.put("Two", "A", song(2, "Two")).unwrap();

        let now = current_timestamp();
        let one = SongCache::generate_key("One", "A");
        let two = SongCache::generate_key("Two", "A");
        cache.index.entries.get_mut(&one).unwrap().last_accessed = now - 100;
        cache.index.entries.get_mut(&two).unwrap().last_accessed = now - 50;

        cache.put("Three", "A", song(3, "Three")).unwrap();

        assert_eq!(cache.get_stats().total_entries, 2);
        assert!(!cache.index.entries.contains_key(&one));
        assert!(cache.index.entries.contains_key(&two));
        assert!(cache.get("Three", "A").is_some());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_hits_and_recency_survive_reopen() {
        let dir = temp_cache_dir("persist");
        let mut cache = SongCache::new(dir.clone(), 24).unwrap();
        cache.put("Love Story", "Taylor Swift", song(1, "Love Story")).unwrap();
        let key = SongCache::generate_key("Love Story", "Taylor Swift");
        cache.index.entries.get_mut(&key).unwrap().last_accessed = 1;
        cache.save_index().unwrap();

        let mut second_run = SongCache::new(dir.clone(), 24).unwrap();
        assert!(second_run.get("Love Story", "Taylor Swift").is_some());

        let third_run = SongCache::new(dir.clone(), 24).unwrap();
        let stats = third_run.get_stats();
        assert_eq!(stats.total_requests, 1);
        assert_eq!(stats.cache_hits, 1);
        let entry = &third_run.index.entries[&key];
        assert_eq!(entry.access_count, 2);
        assert!(entry.last_accessed > 1);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_huge_max_age_does_not_overflow() {
        let dir = temp_cache_dir("max-age");
        let mut cache = SongCache::new(dir.clone(), u64::MAX / 1000).unwrap();
        cache.put("One", "A", song(1, "One")).unwrap();
        assert!(cache.get("One", "A").is_some());
        assert_eq!(cache.cleanup_old_entries(), 0);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_clear() {
        let dir = temp_cache_dir("clear");
        let mut cache = SongCache::new(dir.clone(), 24).unwrap();
        cache.put("One", "A", song(1, "One")).unwrap();
        cache.clear().unwrap();
        assert_eq!(cache.get_stats().total_entries, 0);
        assert!(dir.exists());
        let _ = fs::remove_dir_all(&dir);
    }
}
