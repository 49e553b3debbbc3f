use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::Duration;
use tracing::debug;

use crate::error::Result;
use crate::processed_log::ProcessedFileLog;

/// Scan a directory tree for batch files eligible for aggregation.
///
/// A file is eligible when it is named `bpy331_*.dat`, was modified within
/// the freshness window, and does not already appear in the processed-file
/// log. Results are sorted by path so run order is deterministic.
pub fn gather_new_files(
    data_dir: &Path,
    log: &ProcessedFileLog,
    freshness: Duration,
) -> Result<Vec<PathBuf>> {
    let processed = log.entries()?;
    let threshold = SystemTime::now()
        - freshness
            .to_std()
            .unwrap_or_else(|_| std::time::Duration::ZERO);

    let mut eligible = Vec::new();
    let mut pending = vec![data_dir.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.starts_with("bpy331_") || !name.ends_with(".dat") {
                continue;
            }
            if processed.contains(name) {
                debug!(file = name, "skipping already-processed file");
                continue;
            }
            let modified = entry.metadata()?.modified()?;
            if modified < threshold {
                debug!(file = name, "skipping stale file");
                continue;
            }
            eligible.push(path);
        }
    }
    eligible.sort();
    Ok(eligible)
}
