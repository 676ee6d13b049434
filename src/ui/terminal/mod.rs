//! Interactive terminal explorer
//!
//! - `app`: event loop and background searches
//! - `state`: explorer state and key handling
//! - `render`: sidebar, search form, tabs and analysis sections
//! - `styles`: shared styles
//! - `widgets`: word cloud and common-words table

pub mod app;
pub mod render;
pub mod state;
pub mod styles;
pub mod widgets;

pub use app::ExplorerApp;
pub use state::ExplorerState;

use anyhow::{Context, Result};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};

/// Smallest terminal the explorer lays out sensibly in
pub const MIN_SIZE: (u16, u16) = (80, 24);

/// Check if the explorer can run in this terminal
pub fn should_enable_terminal_ui() -> bool {
    if !atty::is(atty::Stream::Stdout) || !atty::is(atty::Stream::Stdin) {
        return false;
    }

    match crossterm::terminal::size() {
        Ok((width, height)) => width >= MIN_SIZE.0 && height >= MIN_SIZE.1,
        Err(_) => false,
    }
}

pub fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("failed to create terminal backend")
}

pub fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal
        .show_cursor()
        .context("failed to restore cursor visibility")
}

/// Run the explorer until the user quits; the terminal is restored even
/// when the loop fails
pub async fn run(app: &mut ExplorerApp) -> Result<()> {
    let mut terminal = init_terminal()?;
    let result = app.run(&mut terminal).await;
    let restored = restore_terminal(&mut terminal);
    result.and(restored)
}
