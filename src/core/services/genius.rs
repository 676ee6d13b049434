use regex::RegexSet;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::{debug, info};

use crate::core::services::retry::{retry_rate_limited, Attempt, RetryPolicy, Sleeper, TokioSleeper};
use crate::core::services::scrape::extract_lyrics;
use crate::error::{ConfigError, NetworkError, Result};

/// Titles matching these are tracklists, credits and the like, not songs
const NON_SONG_PATTERNS: &[&str] = &[
    r"(?i)track\s?list",
    r"(?i)album art(work)?",
    r"(?i)liner notes",
    r"(?i)booklet",
    r"(?i)credits",
    r"(?i)interview",
    r"(?i)skit",
    r"(?i)instrumental",
    r"(?i)setlist",
];

fn non_song_patterns() -> &'static RegexSet {
    static SET: OnceLock<RegexSet> = OnceLock::new();
    SET.get_or_init(|| RegexSet::new(NON_SONG_PATTERNS).expect("valid non-song patterns"))
}

/// Everything the client needs to talk to Genius
#[derive(Debug, Clone)]
pub struct GeniusSettings {
    pub token: Option<String>,
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub excluded_terms: Vec<String>,
    pub remove_section_headers: bool,
    pub skip_non_songs: bool,
    pub retry: RetryPolicy,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Artist {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SongHit {
    pub id: u64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub lyrics_state: Option<String>,
    #[serde(default)]
    pub instrumental: bool,
    pub primary_artist: Artist,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SearchHit {
    #[serde(rename = "type", default = "default_hit_type")]
    pub kind: String,
    pub result: SongHit,
}

fn default_hit_type() -> String {
    "song".to_string()
}

#[derive(Deserialize)]
struct ApiEnvelope<T> {
    response: T,
}

#[derive(Deserialize)]
struct SearchResponse {
    hits: Vec<SearchHit>,
}

/// A song with its scraped lyrics
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Song {
    pub id: u64,
    pub title: String,
    pub artist: String,
    pub url: String,
    pub lyrics: String,
}

#[derive(Clone)]
pub struct GeniusClient {
    http: reqwest::Client,
    token: String,
    settings: GeniusSettings,
    sleeper: Arc<dyn Sleeper>,
}

impl GeniusClient {
    /// Fails before any network activity when no token is configured
    pub fn new(settings: GeniusSettings) -> Result<Self> {
        let token = settings
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingToken)?
            .to_string();

        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(NetworkError::Http)?;

        Ok(Self {
            http,
            token,
            settings,
            sleeper: Arc::new(TokioSleeper),
        })
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn settings(&self) -> &GeniusSettings {
        &self.settings
    }

    /// Resolve an artist by name from the search endpoint
    pub async fn search_artist(&self, name: &str) -> Result<Option<Artist>> {
        debug!("Searching Genius for artist '{}'", name);
        let hits = self.search_hits(name).await?;
        let artist = pick_artist(&hits, name);
        match &artist {
            Some(found) => debug!("Resolved artist '{}' to '{}' (id {})", name, found.name, found.id),
            None => debug!("No artist found for '{}'", name),
        }
        Ok(artist)
    }

    /// Find a song by title and artist and scrape its lyrics
    pub async fn search_song(&self, title: &str, artist: &str) -> Result<Option<Song>> {
        let query = format!("{} {}", title, artist).trim().to_string();
        info!("Searching Genius for '{}'", query);

        let hits = self.search_hits(&query).await?;
        let filter = HitFilter {
            excluded_terms: &self.settings.excluded_terms,
            skip_non_songs: self.settings.skip_non_songs,
        };

        let Some(hit) = pick_song(&hits, title, artist, &filter) else {
            info!("No matching song for '{}'", query);
            return Ok(None);
        };

        debug!("Fetching lyrics page {}", hit.url);
        let html = self.fetch_page(&hit.url).await?;
        let lyrics = extract_lyrics(&html, self.settings.remove_section_headers)?;

        if lyrics.is_empty() {
            info!("'{}' has no lyrics on its page", hit.title);
            return Ok(None);
        }

        Ok(Some(Song {
            id: hit.id,
            title: hit.title.clone(),
            artist: hit.primary_artist.name.clone(),
            url: hit.url.clone(),
            lyrics,
        }))
    }

    async fn search_hits(&self, query: &str) -> Result<Vec<SearchHit>> {
        let url = format!("{}/search", self.settings.base_url);
        let body = self.get_text(&url, &[("q", query)], true).await?;
        let envelope: ApiEnvelope<SearchResponse> = serde_json::from_str(&body).map_err(|e| {
            NetworkError::InvalidResponse { reason: format!("unexpected search payload: {}", e) }
        })?;
        Ok(envelope.response.hits)
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        Ok(self.get_text(url, &[], false).await?)
    }

    /// GET a URL through the rate-limit retry loop
    async fn get_text(
        &self,
        url: &str,
        query: &[(&str, &str)],
        authenticated: bool,
    ) -> std::result::Result<String, NetworkError> {
        retry_rate_limited(&self.settings.retry, self.sleeper.as_ref(), |attempt| {
            let mut request = self.http.get(url).query(query);
            if authenticated {
                request = request.bearer_auth(&self.token);
            }
            let url = url.to_string();
            async move {
                debug!("GET {} (attempt {})", url, attempt);
                let response = request.send().await?;
                match response.status() {
                    StatusCode::TOO_MANY_REQUESTS => Ok(Attempt::RateLimited),
                    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(NetworkError::Authentication),
                    status if status.is_success() => Ok(Attempt::Done(response.text().await?)),
                    status => Err(NetworkError::InvalidResponse {
                        reason: format!("{} returned {}", url, status),
                    }),
                }
            }
        })
        .await
    }
}

/// Rules deciding whether a search hit is a real song
pub struct HitFilter<'a> {
    pub excluded_terms: &'a [String],
    pub skip_non_songs: bool,
}

impl HitFilter<'_> {
    pub fn accepts(&self, hit: &SongHit) -> bool {
        if self.is_excluded(&hit.title) {
            return false;
        }

        if !self.skip_non_songs {
            return true;
        }

        let complete = hit.lyrics_state.as_deref().map_or(true, |state| state == "complete");
        complete && !hit.instrumental && !non_song_patterns().is_match(&hit.title)
    }

    /// Terms match whole words of the title, ignoring case and punctuation,
    /// so `(Remix)` also rejects "Love Story - Elvira Remix"
    pub fn is_excluded(&self, title: &str) -> bool {
        let title = format!(" {} ", normalize_name(title));
        self.excluded_terms.iter().any(|term| {
            let term = normalize_name(term);
            !term.is_empty() && title.contains(&format!(" {} ", term))
        })
    }
}

/// Lowercase, strip accents and punctuation, collapse whitespace
pub fn normalize_name(input: &str) -> String {
    let lay = secular::lower_lay_string(input);
    let cleaned: String = lay
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}'))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn pick_artist(hits: &[SearchHit], name: &str) -> Option<Artist> {
    let wanted = normalize_name(name);
    hits.iter()
        .map(|hit| &hit.result.primary_artist)
        .find(|artist| normalize_name(&artist.name) == wanted)
        .or_else(|| hits.first().map(|hit| &hit.result.primary_artist))
        .cloned()
}

pub fn pick_song<'a>(
    hits: &'a [SearchHit],
    title: &str,
    artist: &str,
    filter: &HitFilter<'_>,
) -> Option<&'a SongHit> {
    let wanted_title = normalize_name(title);
    let wanted_artist = normalize_name(artist);

    let candidates: Vec<&SongHit> = hits
        .iter()
        .filter(|hit| hit.kind == "song")
        .map(|hit| &hit.result)
        .filter(|song| filter.accepts(song))
        .collect();

    let artist_matches = |song: &SongHit| {
        wanted_artist.is_empty() || normalize_name(&song.primary_artist.name) == wanted_artist
    };

    candidates
        .iter()
        .find(|song| normalize_name(&song.title) == wanted_title && artist_matches(song))
        .or_else(|| candidates.iter().find(|song| artist_matches(song)))
        .or_else(|| candidates.first())
        .copied()
}
