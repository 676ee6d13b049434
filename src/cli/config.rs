use clap::{Args, Subcommand};

use crate::config::env::mask_secret;
use crate::config::{Config as AppConfig, ConfigBuilder, EnvParser};
use crate::error::{ConfigError, ExplorerError, Result};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Show configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,

    /// List all available configuration keys
    Keys,
}

pub async fn execute(args: ConfigArgs, config: &AppConfig, config_path: Option<&str>) -> Result<()> {
    let file_path = match config_path {
        Some(path) => std::path::PathBuf::from(path),
        None => AppConfig::config_path()?,
    };

    match args.command {
        ConfigCommands::Show => {
            print!("{}", render_config(config)?);

            let overrides = EnvParser::get_all_vars();
            if !overrides.is_empty() {
                println!("\nEnvironment overrides:");
                for (key, value) in overrides {
                    println!("  {} = {}", key, value);
                }
            }
        }

        ConfigCommands::Set { key, value } => {
            // Start from the file, not the environment-merged view, so
            // overrides never leak into the saved file
            let on_disk = if file_path.exists() {
                toml::from_str::<AppConfig>(&std::fs::read_to_string(&file_path)?)?
            } else {
                AppConfig::default()
            };
            let updated = ConfigBuilder::from_config(on_disk).set(&key, &value)?.build()?;
            updated.save(&file_path)?;

            let shown = if key == "genius_token" { mask_secret(&value) } else { value };
            println!("Configuration updated: {} = {}", key, shown);
        }

        ConfigCommands::Path => {
            println!("{}", file_path.display());
        }

        ConfigCommands::Reset => {
            AppConfig::default().save(&file_path)?;
            println!("✅ Configuration reset to defaults");
            println!("📁 Config file: {}", file_path.display());
        }

        ConfigCommands::Keys => {
            println!("Available configuration keys:");
            let width = ConfigBuilder::KEYS.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
            for (key, description) in ConfigBuilder::KEYS {
                println!("  {:<width$}  {}", key, description, width = width);
            }
            println!("\nUsage:");
            println!("  lyrics-explorer config set <key> <value>");
        }
    }

    Ok(())
}

/// TOML view of the configuration with the token masked
fn render_config(config: &AppConfig) -> Result<String> {
    let mut shown = config.clone();
    shown.genius_token = shown.genius_token.as_deref().map(mask_secret);
    let body = toml::to_string_pretty(&shown)
        .map_err(|e| ExplorerError::Config(ConfigError::Serialize(e)))?;
    Ok(format!("Current configuration:\n{}", body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_masks_token() {
        let config = AppConfig {
            genius_token: Some("abcdefgh1234".to_string()),
            ..AppConfig::default()
        };
        let shown = render_config(&config).unwrap();
        assert!(shown.contains("********1234"));
        assert!(!shown.contains("abcdefgh"));
        assert!(shown.contains("colormap = \"inferno\""));
    }

    #[tokio::test]
    async fn test_set_writes_file() {
        let path = std::env::temp_dir().join(format!("lyrics-explorer-config-{}.toml", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let path_str = path.to_string_lossy().to_string();

        let args = ConfigArgs {
            command: ConfigCommands::Set {
                key: "max_words".to_string(),
                value: "200".to_string(),
            },
        };
        execute(args, &AppConfig::default(), Some(&path_str)).await.unwrap();

        let saved: AppConfig = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved.max_words, 200);

        let args = ConfigArgs {
            command: ConfigCommands::Set {
                key: "max_words".to_string(),
                value: "7".to_string(),
            },
        };
        assert!(execute(args, &AppConfig::default(), Some(&path_str)).await.is_err());

        let _ = std::fs::remove_file(&path);
    }
}
