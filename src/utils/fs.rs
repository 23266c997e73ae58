//! File system helpers shared by the cache, the configuration store and the
//! publish engine.
//!
//! Writes are atomic: content goes to a temporary sibling file which is then
//! renamed over the target, so readers never observe a partially written
//! template or configuration document.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Creates a directory and all of its parents if they don't exist.
///
/// Fails if `path` exists but is not a directory.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    match fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display())),
        Err(_) => fs::create_dir_all(path).await.with_context(|| {
            format!(
                "Failed to create directory: {}\n\nCheck directory permissions and path validity",
                path.display()
            )
        }),
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// Parent directories are created as needed. The temporary file is synced
/// before the rename.
pub async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent).await?;
    }

    let temp_path = temp_sibling(path);
    {
        let mut file = fs::File::create(&temp_path).await.with_context(|| {
            format!(
                "Failed to create temp file: {}\n\nCheck file permissions and that directory exists",
                temp_path.display()
            )
        })?;
        file.write_all(content)
            .await
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;
        file.sync_all().await.context("Failed to sync file to disk")?;
    }

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e).with_context(|| format!("Failed to rename temp file to: {}", path.display()));
    }

    Ok(())
}

/// Writes a string atomically. See [`atomic_write`].
pub async fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes()).await
}

/// Whether a path exists, treating permission errors as "absent".
pub async fn path_exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

/// Names of regular files directly inside `dir`, sorted.
///
/// Returns an empty list if `dir` does not exist.
pub async fn list_file_names(dir: &Path) -> Result<Vec<String>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read directory: {}", dir.display()));
        }
    };

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("Failed to read directory entry in: {}", dir.display()))?
    {
        let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
        if is_file {
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}
