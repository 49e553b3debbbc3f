use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Append-only log of file names already rewritten.
///
/// Membership is set-based, so duplicate lines in storage are tolerated
/// and never cause reprocessing. A missing log file reads as empty.
pub struct ProcessedFileLog {
    path: PathBuf,
}

impl ProcessedFileLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File names whose rewrites have already happened
    pub fn entries(&self) -> Result<HashSet<String>> {
        if !self.path.exists() {
            return Ok(HashSet::new());
        }
        let text = std::fs::read_to_string(&self.path)?;
        Ok(text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    pub fn contains(&self, file_name: &str) -> Result<bool> {
        Ok(self.entries()?.contains(file_name))
    }

    /// Record a rewritten file. Appends unconditionally; readers
    /// deduplicate, so a re-run racing the fsync stays idempotent.
    pub fn append(&self, file_name: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", file_name)?;
        file.sync_all()?;
        Ok(())
    }
}
