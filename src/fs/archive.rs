//! Gzip-compressed tar archives

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::path::Path;

/// Archives `source_dir` into `archive_path`.
///
/// Entries are rooted at the directory's own name, so extracting the archive
/// recreates `<name>/...`.
pub fn create_tar_gz(source_dir: &Path, archive_path: &Path) -> Result<()> {
    let root = source_dir
        .file_name()
        .with_context(|| format!("Cannot archive {} without a name", source_dir.display()))?;

    let file = File::create(archive_path)
        .with_context(|| format!("Failed to create archive {}", archive_path.display()))?;
    let encoder = GzEncoder::new(file, Compression::default());

    let mut builder = tar::Builder::new(encoder);
    builder
        .append_dir_all(root, source_dir)
        .with_context(|| format!("Failed to add {} to archive", source_dir.display()))?;

    let encoder = builder
        .into_inner()
        .context("Failed to finish tar stream")?;
    encoder.finish().context("Failed to finish gzip stream")?;

    Ok(())
}
