//! Explorer state and keyboard handling
//!
//! Everything here is synchronous so key handling and search bookkeeping can
//! be tested without a terminal. Searches leave as `SearchRequest`s and come
//! back as `UpdateMessage`s tagged with the request id.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

use crate::config::MAX_WORDS_RANGE;
use crate::core::analysis::{common_words, LyricsStats, WordCount, COMMON_WORDS_LIMIT};
use crate::core::services::Song;
use crate::core::wordcloud::{self, word_frequencies, CloudLayout, Rgb, WeightedWord, WordCloudOptions};
use crate::ui::DisplayOptions;

/// Slider step for the max words control
pub const MAX_WORDS_STEP: usize = 10;

/// Focusable controls, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Title,
    SearchButton,
    ShowStats,
    ShowWordcloud,
    ShowCommonWords,
    MaxWords,
    Background,
    Colormap,
}

impl Focus {
    const ORDER: [Focus; 8] = [
        Focus::Title,
        Focus::SearchButton,
        Focus::ShowStats,
        Focus::ShowWordcloud,
        Focus::ShowCommonWords,
        Focus::MaxWords,
        Focus::Background,
        Focus::Colormap,
    ];

    fn position(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Focus {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(&self) -> Focus {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Text inputs swallow printable keys
    pub fn is_text_input(&self) -> bool {
        matches!(self, Focus::Title | Focus::Background)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Lyrics,
    Analysis,
}

impl Tab {
    pub const TITLES: [&'static str; 2] = ["📜 Lyrics", "📊 Analysis"];

    pub fn index(&self) -> usize {
        match self {
            Tab::Lyrics => 0,
            Tab::Analysis => 1,
        }
    }

    pub fn toggle(&self) -> Tab {
        match self {
            Tab::Lyrics => Tab::Analysis,
            Tab::Analysis => Tab::Lyrics,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchStatus {
    Idle,
    Searching { title: String, started: Instant },
    Found,
    NotFound { title: String },
    Failed { message: String },
}

/// A failed lookup as shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFailure {
    pub message: String,
}

/// Updates sent from background tasks to the UI loop
#[derive(Debug, Clone)]
pub enum UpdateMessage {
    SearchFinished {
        request_id: u64,
        outcome: Result<Option<Song>, SearchFailure>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub id: u64,
    pub title: String,
}

/// What the UI loop should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Search(SearchRequest),
    Quit,
}

/// A found song with its analysis, computed once on arrival
#[derive(Debug, Clone)]
pub struct SongView {
    pub song: Song,
    pub stats: LyricsStats,
    pub common_words: Vec<WordCount>,
    /// Cloud weights for the largest allowed `max_words`
    pub frequencies: Vec<WeightedWord>,
}

impl SongView {
    pub fn new(song: Song) -> Self {
        Self {
            stats: LyricsStats::compute(&song.lyrics),
            common_words: common_words(&song.lyrics, COMMON_WORDS_LIMIT),
            frequencies: word_frequencies(&song.lyrics, MAX_WORDS_RANGE.1),
            song,
        }
    }
}

#[derive(Debug, Clone)]
struct CachedCloud {
    song_id: u64,
    width: u16,
    height: u16,
    options: WordCloudOptions,
    layout: CloudLayout,
}

pub struct ExplorerState {
    /// Artist every search is scoped to
    pub artist: String,
    pub title_input: String,
    pub background_input: String,
    pub focus: Focus,
    pub tab: Tab,
    pub display: DisplayOptions,
    pub cloud: WordCloudOptions,
    pub status: SearchStatus,
    pub view: Option<SongView>,
    pub lyrics_scroll: u16,
    pub tick: u64,
    next_request: u64,
    pending: Option<u64>,
    cloud_cache: Option<CachedCloud>,
}

impl ExplorerState {
    pub fn new(initial_title: &str, display: DisplayOptions, cloud: WordCloudOptions) -> Self {
        Self {
            artist: String::new(),
            title_input: initial_title.to_string(),
            background_input: cloud.background.clone(),
            focus: Focus::Title,
            tab: Tab::Lyrics,
            display,
            cloud,
            status: SearchStatus::Idle,
            view: None,
            lyrics_scroll: 0,
            tick: 0,
            next_request: 1,
            pending: None,
            cloud_cache: None,
        }
    }

    pub fn with_artist(mut self, artist: &str) -> Self {
        self.artist = artist.trim().to_string();
        self
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.status, SearchStatus::Searching { .. })
    }

    /// Whether the background input currently holds a usable colour
    pub fn background_valid(&self) -> bool {
        Rgb::parse_hex(&self.background_input).is_some()
    }

    /// Apply the background input as `#rrggbb`. While typing only complete
    /// six-digit values apply; `#rgb` shorthand waits for Enter or for focus
    /// to leave the field.
    fn apply_background(&mut self, committed: bool) {
        let input = self.background_input.trim();
        if !committed && input.trim_start_matches('#').len() != 6 {
            return;
        }
        if let Some(color) = Rgb::parse_hex(input) {
            self.cloud.background = color.to_hex();
        }
    }

    fn move_focus(&mut self, forward: bool) {
        if self.focus == Focus::Background {
            self.apply_background(true);
        }
        self.focus = if forward { self.focus.next() } else { self.focus.previous() };
    }

    /// Begin a search for the title input; blank titles do nothing
    pub fn start_search(&mut self) -> Option<SearchRequest> {
        let title = self.title_input.trim();
        if title.is_empty() {
            return None;
        }

        let request = SearchRequest {
            id: self.next_request,
            title: title.to_string(),
        };
        self.next_request += 1;
        self.pending = Some(request.id);
        self.status = SearchStatus::Searching {
            title: request.title.clone(),
            started: Instant::now(),
        };
        Some(request)
    }

    /// Apply a background update; results of superseded searches are dropped
    pub fn apply(&mut self, update: UpdateMessage) {
        match update {
            UpdateMessage::SearchFinished { request_id, outcome } => {
                if self.pending != Some(request_id) {
                    return;
                }
                self.pending = None;

                let title = match &self.status {
                    SearchStatus::Searching { title, .. } => title.clone(),
                    _ => self.title_input.trim().to_string(),
                };

                match outcome {
                    Ok(Some(song)) => {
                        self.view = Some(SongView::new(song));
                        self.lyrics_scroll = 0;
                        self.cloud_cache = None;
                        self.status = SearchStatus::Found;
                    }
                    Ok(None) => {
                        self.view = None;
                        self.status = SearchStatus::NotFound { title };
                    }
                    Err(failure) => {
                        self.view = None;
                        self.status = SearchStatus::Failed { message: failure.message };
                    }
                }
            }
        }
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Cloud for the current song at the given size, laid out only when the
    /// song, the size or the options change
    pub fn cloud_layout(&mut self, width: u16, height: u16) -> Option<&CloudLayout> {
        let view = self.view.as_ref()?;
        let stale = match &self.cloud_cache {
            Some(cached) => {
                cached.song_id != view.song.id
                    || cached.width != width
                    || cached.height != height
                    || cached.options != self.cloud
            }
            None => true,
        };

        if stale {
            let layout = wordcloud::layout_words(&view.frequencies, width, height, &self.cloud);
            self.cloud_cache = Some(CachedCloud {
                song_id: view.song.id,
                width,
                height,
                options: self.cloud.clone(),
                layout,
            });
        }

        self.cloud_cache.as_ref().map(|cached| &cached.layout)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }

        match key.code {
            KeyCode::Esc => return Action::Quit,
            KeyCode::Tab => {
                self.move_focus(true);
                return Action::None;
            }
            KeyCode::BackTab => {
                self.move_focus(false);
                return Action::None;
            }
            KeyCode::F(1) => {
                self.tab = Tab::Lyrics;
                return Action::None;
            }
            KeyCode::F(2) => {
                self.tab = Tab::Analysis;
                return Action::None;
            }
            KeyCode::Up => {
                self.lyrics_scroll = self.lyrics_scroll.saturating_sub(1);
                return Action::None;
            }
            KeyCode::Down => {
                self.lyrics_scroll = self.lyrics_scroll.saturating_add(1);
                return Action::None;
            }
            KeyCode::PageUp => {
                self.lyrics_scroll = self.lyrics_scroll.saturating_sub(10);
                return Action::None;
            }
            KeyCode::PageDown => {
                self.lyrics_scroll = self.lyrics_scroll.saturating_add(10);
                return Action::None;
            }
            _ => {}
        }

        if !self.focus.is_text_input() {
            match key.code {
                KeyCode::Char('q') => return Action::Quit,
                KeyCode::Char('1') => {
                    self.tab = Tab::Lyrics;
                    return Action::None;
                }
                KeyCode::Char('2') => {
                    self.tab = Tab::Analysis;
                    return Action::None;
                }
                KeyCode::Char('t') => {
                    self.tab = self.tab.toggle();
                    return Action::None;
                }
                _ => {}
            }
        }

        match self.focus {
            Focus::Title => match key.code {
                KeyCode::Enter => return self.search_action(),
                KeyCode::Backspace => {
                    self.title_input.pop();
                }
                KeyCode::Char(c) => self.title_input.push(c),
                _ => {}
            },
            Focus::SearchButton => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    return self.search_action();
                }
            }
            Focus::ShowStats | Focus::ShowWordcloud | Focus::ShowCommonWords => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.toggle_focused();
                }
            }
            Focus::MaxWords => match key.code {
                KeyCode::Left | KeyCode::Char('-') => self.step_max_words(false),
                KeyCode::Right | KeyCode::Char('+') => self.step_max_words(true),
                _ => {}
            },
            Focus::Background => match key.code {
                KeyCode::Enter => self.apply_background(true),
                KeyCode::Backspace => {
                    self.background_input.pop();
                    self.apply_background(false);
                }
                KeyCode::Char(c) if self.background_input.chars().count() < 7 => {
                    self.background_input.push(c);
                    self.apply_background(false);
                }
                _ => {}
            },
            Focus::Colormap => match key.code {
                KeyCode::Left => self.cloud.colormap = self.cloud.colormap.previous(),
                KeyCode::Right | KeyCode::Enter | KeyCode::Char(' ') => {
                    self.cloud.colormap = self.cloud.colormap.next()
                }
                _ => {}
            },
        }

        Action::None
    }

    fn search_action(&mut self) -> Action {
        self.start_search().map_or(Action::None, Action::Search)
    }

    fn toggle_focused(&mut self) {
        match self.focus {
            Focus::ShowStats => self.display.show_stats = !self.display.show_stats,
            Focus::ShowWordcloud => self.display.show_wordcloud = !self.display.show_wordcloud,
            Focus::ShowCommonWords => {
                self.display.show_common_words = !self.display.show_common_words
            }
            _ => {}
        }
    }

    fn step_max_words(&mut self, up: bool) {
        let (min, max) = MAX_WORDS_RANGE;
        let value = if up {
            self.cloud.max_words.saturating_add(MAX_WORDS_STEP)
        } else {
            self.cloud.max_words.saturating_sub(MAX_WORDS_STEP)
        };
        self.cloud.max_words = value.clamp(min, max);
    }
}
