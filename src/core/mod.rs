//! Core types shared by every ampackage subsystem.
//!
//! - [`AmpError`], [`ErrorContext`] and [`user_friendly_error`] make up the
//!   error model: typed errors in code, actionable messages at the CLI
//! - [`TemplateKind`] fixes where a template lives and which extension it has
//!
//! # Examples
//!
//! ```rust
//! use ampackage::core::{AmpError, TemplateKind};
//!
//! let kind: TemplateKind = "hook".parse().unwrap();
//! assert_eq!(kind.file_name("useAuth"), "useAuth.ts");
//!
//! let err = "widget".parse::<TemplateKind>().unwrap_err();
//! assert!(matches!(err, AmpError::InvalidTemplateKind { .. }));
//! ```

pub mod error;
pub mod template;

pub use error::{AmpError, ErrorContext, SourceFailure, user_friendly_error};
pub use template::{TemplateKind, TemplateRef, validate_name};
