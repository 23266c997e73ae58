//! `ampackage cache`: inspect and clear the remote template cache.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use super::context::CommandContext;

/// Manage the template cache.
#[derive(Args, Debug)]
pub struct CacheCommand {
    #[command(subcommand)]
    command: CacheSubcommand,
}

#[derive(Subcommand, Debug)]
enum CacheSubcommand {
    /// Remove cached templates
    Clear {
        /// Only clear entries fetched from this source
        #[arg(long)]
        source: Option<String>,
    },

    /// Show cache location, settings and contents
    Info,
}

impl CacheCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let cache = ctx.template_cache();

        match self.command {
            CacheSubcommand::Clear {
                source,
            } => {
                let removed = cache.clear(source.as_deref()).await?;
                match (removed, source) {
                    (true, Some(source)) => {
                        println!("{} Cleared cached templates of {}", "✓".green(), source.cyan());
                    }
                    (true, None) => println!("{} Cleared the template cache", "✓".green()),
                    (false, _) => println!("Nothing to clear"),
                }
            }
            CacheSubcommand::Info => {
                let document = ctx.store.load().await;
                let stats = cache.stats().await?;
                let state = if document.cache.enabled {
                    "enabled".green()
                } else {
                    "disabled".yellow()
                };

                println!("{}", "Template cache".bold());
                println!("  Location: {}", cache.root().display());
                println!("  Status:   {state}");
                println!("  TTL:      {}s", document.cache.ttl().as_secs());
                println!("  Sources:  {}", stats.sources);
                println!("  Entries:  {}", stats.entries);
            }
        }
        Ok(())
    }
}
