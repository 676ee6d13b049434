//! Explorer application loop
//!
//! Coordinates keyboard input, background searches and rendering. Searches
//! run on spawned tasks and report back over an unbounded channel.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::Backend;
use ratatui::Terminal;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use super::render;
use super::state::{Action, ExplorerState, SearchFailure, SearchRequest, UpdateMessage};
use crate::core::services::LyricsService;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const TICK_RATE: Duration = Duration::from_millis(100);

pub struct ExplorerApp {
    state: ExplorerState,
    service: LyricsService,
    update_sender: mpsc::UnboundedSender<UpdateMessage>,
    update_receiver: mpsc::UnboundedReceiver<UpdateMessage>,
    should_quit: bool,
}

impl ExplorerApp {
    pub fn new(state: ExplorerState, service: LyricsService) -> Self {
        let (update_sender, update_receiver) = mpsc::unbounded_channel();
        Self {
            state,
            service,
            update_sender,
            update_receiver,
            should_quit: false,
        }
    }

    /// Look the song up on a background task
    fn spawn_search(&self, request: SearchRequest) {
        let service = self.service.clone();
        let artist = self.state.artist.clone();
        let sender = self.update_sender.clone();

        tokio::spawn(async move {
            let outcome = service
                .find_song(&request.title, &artist)
                .await
                .map_err(|e| SearchFailure { message: e.to_string() });
            // The receiver is gone once the UI has quit
            let _ = sender.send(UpdateMessage::SearchFinished {
                request_id: request.id,
                outcome,
            });
        });
    }

    /// Main loop; searches the initial title right away
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        if let Some(request) = self.state.start_search() {
            self.spawn_search(request);
        }

        let mut last_tick = Instant::now();
        while !self.should_quit {
            while let Ok(update) = self.update_receiver.try_recv() {
                self.state.apply(update);
            }

            terminal
                .draw(|frame| render::draw(frame, &mut self.state))
                .context("failed to draw frame")?;

            if event::poll(POLL_INTERVAL).context("event polling failed")? {
                if let Event::Key(key) = event::read().context("failed to read event")? {
                    if key.kind == KeyEventKind::Press {
                        match self.state.handle_key(key) {
                            Action::Quit => self.should_quit = true,
                            Action::Search(request) => self.spawn_search(request),
                            Action::None => {}
                        }
                    }
                }
            }

            if last_tick.elapsed() >= TICK_RATE {
                self.state.on_tick();
                last_tick = Instant::now();
            }

            // Let spawned searches make progress on a current-thread runtime
            tokio::task::yield_now().await;
        }

        Ok(())
    }
}
