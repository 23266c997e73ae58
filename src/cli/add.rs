//! `ampackage add`: copy templates from the configured sources into the project.
//!
//! Each name is handled on its own: a failure is reported and the remaining
//! names are still processed. The command fails at the end if any name did.
//!
//! ```bash
//! ampackage add component Button Card
//! ampackage add hook useAuth --dest app/src --overwrite
//! ampackage add util format --source company --no-cache
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use super::context::{CommandContext, select_sources};
use crate::config::Source;
use crate::constants::DEFAULT_PROJECT_DIR;
use crate::core::{AmpError, TemplateKind, TemplateRef};
use crate::resolver::Resolver;
use crate::utils::{path_exists, safe_write};

/// Add templates to the project.
#[derive(Args, Debug)]
pub struct AddCommand {
    /// Template kind: component, hook or util
    kind: TemplateKind,

    /// Names of the templates to add
    #[arg(required = true)]
    names: Vec<String>,

    /// Project directory the kind directories are created in (default: src)
    #[arg(long)]
    dest: Option<PathBuf>,

    /// Replace files that already exist
    #[arg(long)]
    overwrite: bool,

    /// Only fetch from this source
    #[arg(long)]
    source: Option<String>,

    /// Ignore cached copies of remote templates
    #[arg(long)]
    no_cache: bool,
}

#[derive(Debug)]
enum AddOutcome {
    Added {
        path: PathBuf,
        source_name: String,
    },
    AlreadyExists {
        path: PathBuf,
    },
}

impl AddCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let document = ctx.store.load().await;
        let sources = select_sources(&document, self.source.as_deref())?;
        let mut fetch = ctx.fetch_context(&document)?;
        if self.no_cache {
            fetch = fetch.with_use_cache(false);
        }
        let resolver = Resolver::new(&fetch);

        let dest_root = match &self.dest {
            Some(dest) => ctx.resolve(dest),
            None => ctx.cwd.join(DEFAULT_PROJECT_DIR),
        };

        let mut failed = Vec::new();
        for name in &self.names {
            match add_template(&resolver, &sources, self.kind, name, &dest_root, self.overwrite).await {
                Ok(AddOutcome::Added {
                    path,
                    source_name,
                }) => println!(
                    "{} Added {} '{}' from {} to {}",
                    "✓".green(),
                    self.kind,
                    name,
                    source_name.cyan(),
                    path.display()
                ),
                Ok(AddOutcome::AlreadyExists {
                    path,
                }) => println!(
                    "{} {} already exists (use --overwrite to replace it)",
                    "!".yellow(),
                    path.display()
                ),
                Err(e) => {
                    eprintln!("{} Failed to add {} '{}': {:#}", "✗".red(), self.kind, name, e);
                    failed.push(name.clone());
                }
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(AmpError::AddFailed {
                failed,
            }
            .into())
        }
    }
}

/// Resolve one template and write it below `dest_root`.
///
/// The destination is checked before any source is contacted.
async fn add_template(
    resolver: &Resolver<'_>,
    sources: &[Source],
    kind: TemplateKind,
    name: &str,
    dest_root: &Path,
    overwrite: bool,
) -> Result<AddOutcome> {
    let template = TemplateRef::new(kind, name)?;
    let path = dest_root.join(template.relative_path());

    if !overwrite && path_exists(&path).await {
        return Ok(AddOutcome::AlreadyExists {
            path,
        });
    }

    let resolved = resolver.fetch_template(sources, kind, name).await?;
    safe_write(&path, &resolved.content)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(AddOutcome::Added {
        path,
        source_name: resolved.source.name,
    })
}
