//! Utility helpers used across ampackage.
//!
//! - [`fs`]: atomic writes, directory creation and listing
//! - [`expand_path`]: `~` and environment variable expansion for configured paths

pub mod fs;

pub use fs::{atomic_write, ensure_dir, list_file_names, path_exists, safe_write};

use std::path::{Path, PathBuf};

/// Expand `~` and `$VAR` in a configured path and resolve it against `base`
/// when it is relative.
///
/// Unknown variables are left as written rather than failing.
#[must_use]
pub fn expand_path(raw: &str, base: &Path) -> PathBuf {
    let expanded = shellexpand::full(raw)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    let path = PathBuf::from(expanded);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
