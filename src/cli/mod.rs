//! Command-line interface for ampackage.
//!
//! Each subcommand lives in its own module with its own `clap` argument
//! structure and an `execute` method taking the per-invocation
//! [`CommandContext`].
//!
//! # Commands
//!
//! - `list` - templates available across the configured sources
//! - `add` - copy templates into the project
//! - `push` - publish a project template back to a source
//! - `source` - add, remove and list sources
//! - `cache` - inspect and clear the remote template cache
//!
//! ```bash
//! ampackage source add company github https://github.com/acme/templates
//! ampackage list
//! ampackage add component Button Card
//! ampackage push component Button --source company --pr
//! ```
//!
//! # Global options
//!
//! - `--verbose` / `--quiet` select the log level unless `RUST_LOG` is set
//! - `--root` (or `AMPACKAGE_ROOT`) sets the directory relative local
//!   sources are resolved against; it defaults to the working directory

pub mod add;
pub mod cache;
pub mod context;
pub mod list;
pub mod push;
pub mod source;


pub use context::CommandContext;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level command line.
#[derive(Parser, Debug)]
#[command(
    name = "ampackage",
    about = "Scaffold components, hooks and utilities from template sources",
    version,
    long_about = "ampackage copies named templates from local directories or GitHub repositories into a project, and pushes edited templates back."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Directory relative local sources are resolved against
    #[arg(long, global = true, env = "AMPACKAGE_ROOT")]
    root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available templates by kind
    List(list::ListCommand),

    /// Add templates to the project
    Add(add::AddCommand),

    /// Push a project template to a source
    Push(push::PushCommand),

    /// Manage template sources
    Source(source::SourceCommand),

    /// Manage the template cache
    Cache(cache::CacheCommand),
}

impl Cli {
    /// Run the selected subcommand against the current process environment.
    pub async fn execute(self) -> Result<()> {
        let ctx = CommandContext::from_env(self.root)?;
        Self::dispatch(self.command, &ctx).await
    }

    async fn dispatch(command: Commands, ctx: &CommandContext) -> Result<()> {
        match command {
            Commands::List(cmd) => cmd.execute(ctx).await,
            Commands::Add(cmd) => cmd.execute(ctx).await,
            Commands::Push(cmd) => cmd.execute(ctx).await,
            Commands::Source(cmd) => cmd.execute(ctx).await,
            Commands::Cache(cmd) => cmd.execute(ctx).await,
        }
    }

    /// Log filter used when `RUST_LOG` is not set.
    #[must_use]
    pub const fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}
