use clap::Args;

use crate::cli::{build_service, DisplayArgs};
use crate::config::Config;
use crate::error::{ExplorerError, Result};
use crate::ui::terminal::{self, ExplorerApp, ExplorerState};

#[derive(Args)]
pub struct ExploreArgs {
    /// Title searched on start (defaults to the configured title)
    #[arg(value_name = "TITLE")]
    title: Option<String>,

    #[command(flatten)]
    display: DisplayArgs,
}

pub async fn execute(args: ExploreArgs, config: &Config) -> Result<()> {
    let config = args.display.apply(config.clone())?;
    let service = build_service(&config)?;

    if !terminal::should_enable_terminal_ui() {
        return Err(ExplorerError::Validation(format!(
            "explore needs an interactive terminal of at least {}x{}; use `search` instead",
            terminal::MIN_SIZE.0,
            terminal::MIN_SIZE.1
        )));
    }

    let title = args.title.unwrap_or_else(|| config.default_title.clone());
    let state = ExplorerState::new(&title, config.display_options(), config.wordcloud_options())
        .with_artist(&config.artist);

    let mut app = ExplorerApp::new(state, service);
    terminal::run(&mut app).await?;
    Ok(())
}
