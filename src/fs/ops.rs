//! File operations used by the stages and the packager

use anyhow::{bail, Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Creates `path` and its parents unless it is already a directory
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path)
}

/// Copies a file, preserving permissions
pub fn copy_file(from: &Path, to: &Path) -> Result<u64> {
    fs::copy(from, to)
        .with_context(|| format!("Failed to copy {} to {}", from.display(), to.display()))
}

/// Moves `from` into `dest`.
///
/// When `dest` is an existing directory the entry keeps its name inside it,
/// otherwise `dest` is the new path. Falls back to copy-and-delete for files
/// when a rename is not possible.
pub fn move_path(from: &Path, dest: &Path) -> Result<PathBuf> {
    let target = if dest.is_dir() {
        let name = from
            .file_name()
            .with_context(|| format!("Cannot move {} without a file name", from.display()))?;
        dest.join(name)
    } else {
        dest.to_path_buf()
    };

    if target.exists() && target.is_dir() {
        bail!("Destination {} already exists", target.display());
    }

    match fs::rename(from, &target) {
        Ok(()) => Ok(target),
        Err(rename_err) if from.is_file() => {
            fs::copy(from, &target).with_context(|| {
                format!(
                    "Failed to move {} to {} ({})",
                    from.display(),
                    target.display(),
                    rename_err
                )
            })?;
            fs::remove_file(from)
                .with_context(|| format!("Failed to remove {}", from.display()))?;
            Ok(target)
        }
        Err(err) => Err(err).with_context(|| {
            format!("Failed to move {} to {}", from.display(), target.display())
        }),
    }
}

/// Removes a file or a directory tree
pub fn remove_path(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Non-hidden entries of `dir` whose names start with `prefix` and end with
/// `suffix`, sorted by name
pub fn matching_entries(dir: &Path, prefix: &str, suffix: &str) -> Result<Vec<PathBuf>> {
    let mut matches = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let entry = entry.context("Failed to read directory entry")?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        if name.starts_with(prefix) && name.ends_with(suffix) && name.len() >= prefix.len() + suffix.len() {
            matches.push(entry.path());
        }
    }
    matches.sort();
    Ok(matches)
}

/// Every non-hidden entry of `dir`
pub fn visible_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    matching_entries(dir, "", "")
}
