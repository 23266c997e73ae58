//! Error handling for ampackage
//!
//! This module provides the typed error enum used throughout the crate and the
//! user-facing error reporting used by the binary. The error system follows two
//! principles:
//! 1. **Strongly-typed errors** for precise handling in code (the resolution
//!    engine, for example, tells a missing template apart from a transport
//!    failure)
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Error Categories
//!
//! - **Not found**: [`AmpError::TemplateNotFound`] for a template absent from one
//!   source, [`AmpError::AllSourcesFailed`] when every configured source failed
//! - **Configuration**: [`AmpError::SourceNotFound`], [`AmpError::ConfigError`],
//!   [`AmpError::InvalidSourceKind`], [`AmpError::InvalidTemplateKind`]
//! - **Transport**: [`AmpError::HttpStatus`], [`AmpError::HttpRequest`],
//!   [`AmpError::GitCommandError`], [`AmpError::GitCloneFailed`]
//! - **Unsupported**: [`AmpError::NotImplemented`], [`AmpError::UnsupportedPushTarget`]
//!
//! Internally the crate propagates [`anyhow::Error`] and attaches operation and
//! source context with `.with_context(...)`. [`user_friendly_error`] walks the
//! error chain to find the typed cause and builds an [`ErrorContext`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use ampackage::core::{AmpError, ErrorContext, user_friendly_error};
//!
//! let error = AmpError::SourceNotFound {
//!     name: "company".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored error with a suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// One line of an aggregate resolution failure: which source was tried and why
/// it could not provide the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    /// Name of the configured source
    pub source_name: String,
    /// Rendered failure message for that source
    pub message: String,
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source_name, self.message)
    }
}

fn join_failures(failures: &[SourceFailure]) -> String {
    failures.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

/// The main error type for ampackage operations
///
/// Each variant represents one failure mode. Variants carry owned strings
/// rather than domain types so errors can cross module boundaries freely and
/// be cloned for reporting.
#[derive(Error, Debug, Clone)]
pub enum AmpError {
    /// A template is absent from one source
    ///
    /// Non-fatal inside the resolution engine: it contributes one line to the
    /// aggregate failure and the next source is tried.
    #[error("Template {kind} '{name}' not found in source '{source_name}'")]
    TemplateNotFound {
        /// Template kind (component, hook, util)
        kind: String,
        /// Template name
        name: String,
        /// Source that was searched
        source_name: String,
    },

    /// Every source failed to provide a template
    ///
    /// The message lists each source name and its individual failure,
    /// one per line, in the order the sources were tried.
    #[error("Could not fetch {kind} '{name}' from any source:\n{}", join_failures(.failures))]
    AllSourcesFailed {
        /// Template kind
        kind: String,
        /// Template name
        name: String,
        /// One entry per source that was tried
        failures: Vec<SourceFailure>,
    },

    /// A referenced source name does not exist in the configuration
    #[error("Source '{name}' is not configured")]
    SourceNotFound {
        /// Name of the missing source
        name: String,
    },

    /// No sources are configured at all
    #[error("No template sources are configured")]
    NoSources,

    /// Non-success HTTP response other than 404
    #[error("Failed to fetch {url} from source '{source_name}': {status}")]
    HttpStatus {
        /// Source being fetched from
        source_name: String,
        /// Requested URL
        url: String,
        /// Status code and reason phrase
        status: String,
    },

    /// HTTP request could not be performed at all
    #[error("Request to {url} for source '{source_name}' failed: {reason}")]
    HttpRequest {
        /// Source being fetched from
        source_name: String,
        /// Requested URL
        url: String,
        /// Underlying transport error
        reason: String,
    },

    /// Git operation failed during execution
    #[error("Git operation failed: {operation}")]
    GitCommandError {
        /// The git operation that failed (e.g., "fetch", "pull", "push")
        operation: String,
        /// The error output from the git command
        stderr: String,
    },

    /// Git repository clone failed
    #[error("Failed to clone repository: {url}")]
    GitCloneFailed {
        /// The repository URL that failed to clone
        url: String,
        /// The reason for the clone failure
        reason: String,
    },

    /// Git executable not found in PATH
    #[error("Git is not installed or not found in PATH")]
    GitNotFound,

    /// Operation exists for completeness but has no implementation yet
    #[error("{operation} is not yet implemented for {kind} sources")]
    NotImplemented {
        /// Operation that was attempted
        operation: String,
        /// Source kind the operation was attempted on
        kind: String,
    },

    /// Push was requested against a source kind that cannot receive templates
    #[error("Pushing to {kind} source '{source_name}' is not supported")]
    UnsupportedPushTarget {
        /// Name of the target source
        source_name: String,
        /// Kind of the target source
        kind: String,
    },

    /// A Git-backed source URL cannot be rewritten into a raw-content URL
    #[error("Cannot derive a raw-content URL from '{url}' (only https://github.com/ repositories are supported)")]
    UnsupportedRemoteUrl {
        /// Configured repository URL
        url: String,
    },

    /// Unknown template kind given on the command line
    #[error("Invalid template kind: {kind}")]
    InvalidTemplateKind {
        /// The rejected value
        kind: String,
    },

    /// Unknown source kind given on the command line or in configuration
    #[error("Invalid source kind: {kind}")]
    InvalidSourceKind {
        /// The rejected value
        kind: String,
    },

    /// Template name is empty or would escape its directory
    #[error("Invalid template name '{name}': {reason}")]
    InvalidTemplateName {
        /// The rejected name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// File system operation failed
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// Operation that failed
        operation: String,
        /// Path involved
        path: String,
    },

    /// One or more names requested by `add` could not be written
    #[error("Failed to add {}: {}", if .failed.len() == 1 { "template" } else { "templates" }, .failed.join(", "))]
    AddFailed {
        /// Names that failed
        failed: Vec<String>,
    },

    /// Generic error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl AmpError {
    /// Whether this error means "the template is not in that source" rather
    /// than a configuration or transport problem.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::TemplateNotFound { .. })
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// Wraps an [`AmpError`] with optional details (why it happened) and a
/// suggestion (what to do about it). The binary renders it with colors via
/// [`ErrorContext::display`].
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: AmpError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: AmpError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions are displayed in green in the terminal.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    ///
    /// Details are displayed in yellow in the terminal.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// The error chain is searched for an [`AmpError`] first, so errors wrapped
/// with `.context(...)` still get tailored suggestions. IO errors get
/// filesystem-specific guidance. Anything else is reported with its full
/// cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(amp_error) = error.chain().find_map(|cause| cause.downcast_ref::<AmpError>()) {
        let mut ctx = create_error_context(amp_error.clone());
        // Keep outer context (operation + source) visible above the typed cause
        let outer = error.to_string();
        if outer != amp_error.to_string() {
            let details = match ctx.details.take() {
                Some(details) => format!("{outer}\n{details}"),
                None => outer,
            };
            return ctx.with_details(details);
        }
        return ctx;
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(AmpError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check file ownership and permissions of the target directory")
                .with_details(
                    "This error occurs when ampackage doesn't have permission to read or write files",
                );
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(AmpError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(AmpError::Other {
        message,
    })
}

/// Map each [`AmpError`] variant to suggestions and details.
fn create_error_context(error: AmpError) -> ErrorContext {
    match &error {
        AmpError::GitNotFound => ErrorContext::new(error)
            .with_suggestion("Install git from https://git-scm.com/ or your package manager (e.g., 'brew install git', 'apt install git')")
            .with_details("Pushing to a Git-backed source requires git in your PATH"),

        AmpError::GitCommandError { operation, stderr } => {
            let suggestion = match operation.as_str() {
                op if op.contains("push") => "Check that you have write access to the repository and that the branch is not protected",
                op if op.contains("pull") => "The local working clone may have diverged. Inspect it under ~/.ampackage/repos/ or delete it to re-clone",
                op if op.contains("fetch") => "Check your internet connection and repository access",
                op if op.contains("commit") => "Make sure git user.name and user.email are configured",
                _ => "Try running the git command manually for more details",
            };
            let details = if stderr.trim().is_empty() {
                "Git returned a non-zero exit status".to_string()
            } else {
                stderr.trim().to_string()
            };
            ErrorContext::new(error.clone()).with_suggestion(suggestion).with_details(details)
        }

        AmpError::GitCloneFailed { url, reason } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Verify the repository URL is correct: {url}. Check your internet connection and repository access"
            ))
            .with_details(reason.trim().to_string()),

        AmpError::SourceNotFound { name } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Run 'ampackage source list' to see configured sources, or add '{name}' with 'ampackage source add'"
            )),

        AmpError::NoSources => ErrorContext::new(error)
            .with_suggestion("Add a source with 'ampackage source add <name> <kind> <location>'"),

        AmpError::AllSourcesFailed { .. } => ErrorContext::new(error)
            .with_suggestion("Check the template name and kind, or run 'ampackage list' to see what is available"),

        AmpError::NotImplemented { .. } => ErrorContext::new(error)
            .with_suggestion("Use a local or github source instead"),

        AmpError::UnsupportedPushTarget { .. } => ErrorContext::new(error)
            .with_suggestion("Push to a local or github source with --source <name>"),

        AmpError::UnsupportedRemoteUrl { .. } => ErrorContext::new(error)
            .with_suggestion("Configure the source with a URL of the form https://github.com/<owner>/<repo>.git"),

        AmpError::InvalidTemplateKind { .. } => ErrorContext::new(error)
            .with_suggestion("Valid kinds are: component, hook, util"),

        AmpError::InvalidSourceKind { .. } => ErrorContext::new(error)
            .with_suggestion("Valid source kinds are: local, github, npm"),

        _ => ErrorContext::new(error),
    }
}
