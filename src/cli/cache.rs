use clap::{Args, Subcommand};
use tracing::info;

use crate::config::Config;
use crate::core::infrastructure::SongCache;
use crate::error::Result;

#[derive(Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    command: CacheCommands,
}

#[derive(Subcommand)]
enum CacheCommands {
    /// Show cache statistics
    Stats,

    /// Clear all cached songs
    Clear,

    /// Remove expired entries
    Cleanup,
}

pub async fn execute(args: CacheArgs, config: &Config) -> Result<()> {
    let mut cache = SongCache::new(config.cache_dir(), config.cache_max_age_hours)?;

    match args.command {
        CacheCommands::Stats => {
            let stats = cache.get_stats();

            println!("📊 Cache Statistics");
            println!("══════════════════");
            println!("📁 Directory: {}", cache.cache_dir().display());
            println!("⏰ Max Age: {} hours", cache.max_age_hours());
            println!("🗂️  Total Entries: {}", stats.total_entries);
            println!("📈 Total Requests: {}", stats.total_requests);
            println!("✅ Cache Hits: {}", stats.cache_hits);
            println!("📊 Hit Rate: {:.1}%", stats.hit_rate_percent);

            if stats.last_cleanup > 0 {
                let now = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0);
                println!("🧹 Last Cleanup: {} seconds ago", now.saturating_sub(stats.last_cleanup));
            }
            if !config.cache_enabled {
                println!("💡 Caching is disabled (cache_enabled = false)");
            }
        }

        CacheCommands::Clear => {
            info!("🗑️ Clearing song cache...");
            cache.clear()?;
            cache.save_index()?;
            println!("✅ Cache cleared successfully!");
        }

        CacheCommands::Cleanup => {
            info!("🧹 Cleaning up expired cache entries...");
            let removed = cache.cleanup_old_entries();
            cache.save_index()?;

            println!("✅ Cache cleanup completed!");
            println!("🗑️ Removed {} expired entries", removed);
            println!("📊 Cache now contains {} entries", cache.get_stats().total_entries);
        }
    }

    Ok(())
}
