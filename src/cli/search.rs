use clap::{Args, ValueEnum};
use tracing::info;

use crate::cli::{build_service, DisplayArgs};
use crate::config::Config;
use crate::error::Result;
use crate::ui::report::{ReportRenderer, SongReport};
use crate::ui::UiMode;
use crate::utils::progress::ProgressUtils;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Song title to search for (defaults to the configured title)
    #[arg(value_name = "TITLE")]
    title: Option<String>,

    #[command(flatten)]
    display: DisplayArgs,

    /// Leave the lyrics out of the report
    #[arg(long)]
    no_lyrics: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Word cloud width in columns
    #[arg(long, default_value_t = 80)]
    width: u16,

    /// Word cloud height in rows
    #[arg(long, default_value_t = 20)]
    height: u16,
}

pub async fn execute(args: SearchArgs, config: &Config) -> Result<()> {
    let config = args.display.apply(config.clone())?;
    let title = args
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(&config.default_title)
        .to_string();

    let service = build_service(&config)?;

    let ui_mode = UiMode::detect();
    let spinner = if ui_mode.is_interactive() && args.format == OutputFormat::Text {
        ProgressUtils::create_search_spinner(&title)
    } else {
        ProgressUtils::hidden()
    };

    info!("Searching for '{}' by {}", title, config.artist);
    let result = service.find_song(&title, &config.artist).await;
    spinner.finish_and_clear();
    let song = result?;

    let cloud_options = config.wordcloud_options();
    let report = SongReport::build(&title, song, &config.display_options(), &cloud_options);

    match args.format {
        OutputFormat::Json => {
            let json = report
                .to_json()
                .map_err(|e| anyhow::anyhow!("failed to serialize report: {}", e))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let renderer = ReportRenderer {
                color: ui_mode.is_interactive(),
                show_lyrics: !args.no_lyrics,
                cloud_width: args.width.max(10),
                cloud_height: args.height.max(3),
            };
            print!("{}", renderer.render(&report, &cloud_options));
        }
    }

    Ok(())
}
