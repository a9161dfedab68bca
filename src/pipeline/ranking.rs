//! Readers for the scoring stage's energy table (`.ene`)
//!
//! The table is written best-first: a column header line, a dashed separator,
//! then one whitespace-separated row per conformation whose first field is the
//! conformation identifier.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

const HEADER_LINES: usize = 2;

/// A conformation and its 1-based position in the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub rank: usize,
    pub conformation_id: String,
}

pub struct RankedTableReader;

impl RankedTableReader {
    /// First `k` conformations in file order.
    ///
    /// Returns fewer when the table is shorter. Blank rows are ignored.
    pub fn top_k(table_path: &Path, k: usize) -> Result<Vec<RankedEntry>> {
        let file = File::open(table_path)
            .with_context(|| format!("Failed to open energy table {}", table_path.display()))?;

        let mut top = Vec::with_capacity(k.min(1024));
        for line in BufReader::new(file).lines().skip(HEADER_LINES) {
            if top.len() >= k {
                break;
            }
            let line = line.with_context(|| format!("Failed to read {}", table_path.display()))?;
            if let Some(id) = line.split_whitespace().next() {
                top.push(RankedEntry {
                    rank: top.len() + 1,
                    conformation_id: id.to_string(),
                });
            }
        }
        Ok(top)
    }

    /// Writes the table as comma-separated rows.
    ///
    /// Lines starting with `#` or `-` in the first column are dropped; at most `k` rows
    /// are written, plus one for the column header when `with_header` is set.
    /// Returns the number of rows written.
    pub fn to_delimited(
        table_path: &Path,
        out_path: &Path,
        k: usize,
        with_header: bool,
    ) -> Result<usize> {
        let input = File::open(table_path)
            .with_context(|| format!("Failed to open energy table {}", table_path.display()))?;
        let output = File::create(out_path)
            .with_context(|| format!("Failed to create {}", out_path.display()))?;
        let mut writer = BufWriter::new(output);

        let limit = k + usize::from(with_header);
        let mut written = 0;

        for line in BufReader::new(input).lines() {
            if written >= limit {
                break;
            }
            let line = line.with_context(|| format!("Failed to read {}", table_path.display()))?;
            if line.trim().is_empty() || line.starts_with('#') || line.starts_with('-') {
                continue;
            }

            let row = line.split_whitespace().collect::<Vec<_>>().join(",");
            writeln!(writer, "{}", row)
                .with_context(|| format!("Failed to write {}", out_path.display()))?;
            written += 1;
        }

        writer
            .flush()
            .with_context(|| format!("Failed to write {}", out_path.display()))?;
        Ok(written)
    }
}
