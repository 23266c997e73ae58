//! Template kinds and validated template references.
//!
//! Every template belongs to exactly one [`TemplateKind`]. The kind fixes the
//! plural directory a template lives under, and the file extension it is
//! stored with, in every source, in the cache and in the project tree:
//!
//! | Kind        | Directory     | Extension |
//! |-------------|---------------|-----------|
//! | `component` | `components/` | `.tsx`    |
//! | `hook`      | `hooks/`      | `.ts`     |
//! | `util`      | `utils/`      | `.ts`     |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::AmpError;

/// Category of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    /// UI component, stored as `components/<name>.tsx`
    Component,
    /// Hook, stored as `hooks/<name>.ts`
    Hook,
    /// Utility module, stored as `utils/<name>.ts`
    Util,
}

impl TemplateKind {
    /// All kinds in listing order.
    pub const ALL: [Self; 3] = [Self::Component, Self::Hook, Self::Util];

    /// Plural directory name for this kind.
    #[must_use]
    pub const fn directory(self) -> &'static str {
        match self {
            Self::Component => "components",
            Self::Hook => "hooks",
            Self::Util => "utils",
        }
    }

    /// File extension for this kind, including the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Component => ".tsx",
            Self::Hook | Self::Util => ".ts",
        }
    }

    /// Singular name as accepted on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Hook => "hook",
            Self::Util => "util",
        }
    }

    /// File name of a template of this kind.
    #[must_use]
    pub fn file_name(self, name: &str) -> String {
        format!("{name}{}", self.extension())
    }

    /// Path of a template relative to a templates root: `<plural>/<name><ext>`.
    #[must_use]
    pub fn relative_path(self, name: &str) -> PathBuf {
        PathBuf::from(self.directory()).join(self.file_name(name))
    }

    /// Recover a template name from a file name, if the extension matches.
    #[must_use]
    pub fn strip_extension(self, file_name: &str) -> Option<&str> {
        file_name.strip_suffix(self.extension()).filter(|stem| !stem.is_empty())
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateKind {
    type Err = AmpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "component" | "components" => Ok(Self::Component),
            "hook" | "hooks" => Ok(Self::Hook),
            "util" | "utils" => Ok(Self::Util),
            _ => Err(AmpError::InvalidTemplateKind {
                kind: s.to_string(),
            }),
        }
    }
}

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]*$").expect("template name pattern is valid")
});

/// Check that a template name is a single path segment.
///
/// Names are joined onto source, cache and project paths, so separators and
/// `..` are rejected.
pub fn validate_name(name: &str) -> Result<(), AmpError> {
    let reason = if name.is_empty() {
        Some("name must not be empty")
    } else if name.contains("..") {
        Some("name must not contain '..'")
    } else if !NAME_PATTERN.is_match(name) {
        Some("only letters, digits, '_', '-' and '.' are allowed")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(AmpError::InvalidTemplateName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// A validated `(kind, name)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateRef {
    /// Template category
    pub kind: TemplateKind,
    /// Single-segment name without extension
    pub name: String,
}

impl TemplateRef {
    /// Validate `name` and pair it with `kind`.
    pub fn new(kind: TemplateKind, name: impl Into<String>) -> Result<Self, AmpError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            kind,
            name,
        })
    }

    /// `<plural>/<name><ext>` relative to a templates root.
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        self.kind.relative_path(&self.name)
    }
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_layout() {
        assert_eq!(TemplateKind::Component.relative_path("Button"), PathBuf::from("components/Button.tsx"));
        assert_eq!(TemplateKind::Hook.relative_path("useAuth"), PathBuf::from("hooks/useAuth.ts"));
        assert_eq!(TemplateKind::Util.relative_path("format"), PathBuf::from("utils/format.ts"));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("component".parse::<TemplateKind>().unwrap(), TemplateKind::Component);
        assert_eq!("Hooks".parse::<TemplateKind>().unwrap(), TemplateKind::Hook);
        assert!(matches!(
            "widget".parse::<TemplateKind>(),
            Err(AmpError::InvalidTemplateKind { .. })
        ));
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(TemplateKind::Component.strip_extension("Card.tsx"), Some("Card"));
        assert_eq!(TemplateKind::Component.strip_extension("Card.ts"), None);
        assert_eq!(TemplateKind::Hook.strip_extension(".ts"), None);
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Button").is_ok());
        assert!(validate_name("use-auth_2").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("../etc/passwd").is_err());
        assert!(validate_name("nested/Button").is_err());
    }

    #[test]
    fn test_template_ref() {
        let template = TemplateRef::new(TemplateKind::Hook, "useAuth").unwrap();
        assert_eq!(template.relative_path(), PathBuf::from("hooks/useAuth.ts"));
        assert_eq!(template.to_string(), "hook 'useAuth'");
        assert!(matches!(
            TemplateRef::new(TemplateKind::Util, "a/b"),
            Err(AmpError::InvalidTemplateName { .. })
        ));
    }
}
