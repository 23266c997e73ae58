//! `ampackage push`: publish a project template back to a source.
//!
//! The file is read from `src/<kind dir>/<name><ext>` in the working
//! directory. Without `--source` the default source is the target.
//!
//! ```bash
//! ampackage push component Button
//! ampackage push hook useAuth --source company --pr --message "Add useAuth"
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use super::context::CommandContext;
use crate::config::{ConfigDocument, Source, SourceKind};
use crate::constants::DEFAULT_PROJECT_DIR;
use crate::core::{AmpError, TemplateKind, TemplateRef};
use crate::git::{SystemGit, ensure_git_available};
use crate::publish::{PushOptions, PushOutcome, Publisher};
use crate::utils::path_exists;

/// Push a template to a source.
#[derive(Args, Debug)]
pub struct PushCommand {
    /// Template kind: component, hook or util
    kind: TemplateKind,

    /// Name of the template
    name: String,

    /// Replace an existing file in a local source
    #[arg(long)]
    overwrite: bool,

    /// Source to push to (default: the default source)
    #[arg(long)]
    source: Option<String>,

    /// Push to a new review branch and print a compare URL
    #[arg(long)]
    pr: bool,

    /// Commit message
    #[arg(short, long)]
    message: Option<String>,
}

impl PushCommand {
    pub async fn execute(self, ctx: &CommandContext) -> Result<()> {
        let template = TemplateRef::new(self.kind, &self.name)?;
        let file = ctx.cwd.join(DEFAULT_PROJECT_DIR).join(template.relative_path());
        if !path_exists(&file).await {
            return Err(AmpError::FileSystemError {
                operation: format!("read {template}"),
                path: file.display().to_string(),
            }
            .into());
        }
        let content = tokio::fs::read_to_string(&file)
            .await
            .with_context(|| format!("Failed to read {}", file.display()))?;

        let document = ctx.store.load().await;
        let target = push_target(&document, self.source.as_deref())?;

        if target.kind == SourceKind::Git {
            ensure_git_available()?;
        }

        let options = PushOptions {
            overwrite: self.overwrite,
            review_branch: self.pr,
            message: self.message,
        };
        let git = SystemGit::new().with_context(target.name.as_str());
        let publisher = Publisher::new(&ctx.package_root, ctx.dirs.repos_dir(), git);
        let outcome = publisher.push(&target, self.kind, &self.name, &content, &options).await?;

        print_outcome(&template, &target, &outcome);
        Ok(())
    }
}

/// The source named by `--source`, else the default source.
fn push_target(document: &ConfigDocument, only: Option<&str>) -> Result<Source, AmpError> {
    match only {
        Some(name) => document.find_source(name).cloned().ok_or_else(|| AmpError::SourceNotFound {
            name: name.to_string(),
        }),
        None => document.default_source().cloned().ok_or(AmpError::NoSources),
    }
}

fn print_outcome(template: &TemplateRef, target: &Source, outcome: &PushOutcome) {
    match outcome {
        PushOutcome::Written {
            path,
        } => println!("{} Pushed {} to {} ({})", "✓".green(), template, target.name.cyan(), path.display()),
        PushOutcome::AlreadyExists {
            ..
        } => println!("{} {}", "!".yellow(), outcome),
        PushOutcome::Pushed {
            branch,
        } => println!("{} Pushed {} to {} on {}", "✓".green(), template, target.name.cyan(), branch.bold()),
        PushOutcome::NothingToCommit => {
            println!("{} {} is unchanged in {}; nothing to commit", "!".yellow(), template, target.name.cyan());
        }
        PushOutcome::ReviewBranch {
            branch,
            compare_url,
        } => {
            println!("{} Pushed {} to branch {} of {}", "✓".green(), template, branch.bold(), target.name.cyan());
            println!("  Open a review: {}", compare_url.underline());
        }
    }
}
