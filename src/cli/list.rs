//! `ampackage list`: show the templates every configured source offers.
//!
//! Names are merged across sources and printed once per kind. Git-backed
//! sources only contribute templates that have been fetched before.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::context::{CommandContext, select_sources};
use crate::resolver::{Resolver, TemplateListing};

/// List available templates by kind.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Only list templates from this source
    #[arg(long)]
    source: Option<String>,
}

impl ListCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let document = ctx.store.load().await;
        let sources = select_sources(&document, self.source.as_deref())?;
        let fetch = ctx.fetch_context(&document)?;

        let listing = Resolver::new(&fetch).list_all_templates(&sources).await;
        print!("{}", render_listing(&listing));
        Ok(())
    }
}

fn render_listing(listing: &TemplateListing) -> String {
    let mut out = String::new();
    for (kind, names) in listing {
        out.push_str(&format!("{}\n", format!("{}:", kind.directory()).bold()));
        if names.is_empty() {
            out.push_str(&format!("  {}\n", "(none)".dimmed()));
        }
        for name in names {
            out.push_str(&format!("  - {name}\n"));
        }
    }
    out
}
