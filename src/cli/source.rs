//! `ampackage source`: manage the configured template sources.
//!
//! Sources are consulted in the order they are listed. Adding a source with
//! an existing name replaces it in place.
//!
//! ```bash
//! ampackage source add company github https://github.com/acme/templates --branch develop
//! ampackage source add shared local ~/shared-templates --default
//! ampackage source remove company
//! ampackage source list
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use super::context::CommandContext;
use crate::config::{Source, SourceKind, SourceOptions};

/// Manage template sources.
#[derive(Args, Debug)]
pub struct SourceCommand {
    #[command(subcommand)]
    command: SourceSubcommand,
}

#[derive(Subcommand, Debug)]
enum SourceSubcommand {
    /// Add or replace a source
    Add {
        /// Unique source name
        name: String,

        /// Source kind: local, github or npm
        kind: SourceKind,

        /// Directory (local) or repository URL (github)
        url: String,

        /// Branch to fetch from and push to
        #[arg(long)]
        branch: Option<String>,

        /// Subdirectory holding the kind directories
        #[arg(long)]
        path: Option<String>,

        /// Make this the default push target
        #[arg(long)]
        default: bool,
    },

    /// Remove a source
    Remove {
        /// Name of the source to remove
        name: String,
    },

    /// List configured sources in priority order
    List,
}

impl SourceCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        match self.command {
            SourceSubcommand::Add {
                name,
                kind,
                url,
                branch,
                path,
                default,
            } => {
                let options = SourceOptions {
                    branch,
                    base_path: path,
                    is_default: default,
                };
                let source = ctx.store.add_source(&name, kind, &url, options).await?;
                println!("{} Added source {} ({})", "✓".green(), source.name.cyan(), describe(&source));
                Ok(())
            }
            SourceSubcommand::Remove {
                name,
            } => {
                ctx.store.remove_source(&name).await?;
                println!("{} Removed source {}", "✓".green(), name.cyan());
                Ok(())
            }
            SourceSubcommand::List => {
                let sources = ctx.store.list_sources().await;
                if sources.is_empty() {
                    println!("No sources configured");
                }
                for source in &sources {
                    let marker = if source.is_default {
                        " (default)".green().to_string()
                    } else {
                        String::new()
                    };
                    println!("{}{}  {}", source.name.bold(), marker, describe(source));
                }
                Ok(())
            }
        }
    }
}

/// `<kind> <location>` plus branch and base path when set.
fn describe(source: &Source) -> String {
    let mut text = format!("{} {}", source.kind, source.location);
    if let Some(branch) = &source.branch {
        text.push_str(&format!(" @{branch}"));
    }
    if let Some(base) = &source.base_path {
        text.push_str(&format!(" [{base}]"));
    }
    text
}
