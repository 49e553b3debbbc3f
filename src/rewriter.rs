use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{BatchError, Result};
use crate::models::Payment;
use crate::processed_log::ProcessedFileLog;

/// Renders aggregated payments back into the fixed-layout format and
/// replaces the source file without ever leaving it half-written.
///
/// Write discipline: copy the original to the backup dir, write the full
/// new text to a sibling `.new` file, then rename over the original. The
/// rename happens only after the whole write (and the backup) succeeded,
/// so any failure leaves the source intact.
pub struct Rewriter {
    backup_dir: PathBuf,
    log: ProcessedFileLog,
}

impl Rewriter {
    pub fn new(backup_dir: impl Into<PathBuf>, log: ProcessedFileLog) -> Self {
        Self {
            backup_dir: backup_dir.into(),
            log,
        }
    }

    /// Full text of the rewritten file: header, then each aggregate's
    /// fields in exact format order, one per line
    pub fn render(header: &str, aggregates: &[Payment]) -> String {
        let mut text = String::new();
        text.push_str(header);
        text.push('\n');
        for payment in aggregates {
            for field in payment.write_order() {
                text.push_str(field);
                text.push('\n');
            }
        }
        text
    }

    pub fn rewrite(&self, path: &Path, header: &str, aggregates: &[Payment]) -> Result<()> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| BatchError::MalformedInput(format!("bad file name: {}", path.display())))?;

        fs::create_dir_all(&self.backup_dir).map_err(|e| self.write_failure(path, e))?;
        let backup_path = self.backup_dir.join(file_name);
        fs::copy(path, &backup_path).map_err(|e| self.write_failure(path, e))?;
        debug!(backup = %backup_path.display(), "backed up source file");

        let temp_path = path.with_extension("new");
        let text = Self::render(header, aggregates);
        if let Err(e) = self.write_all(&temp_path, &text) {
            let _ = fs::remove_file(&temp_path);
            return Err(self.write_failure(&temp_path, e));
        }
        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(self.write_failure(path, e));
        }

        self.log.append(file_name)?;
        info!(
            file = %path.display(),
            payments = aggregates.len(),
            "rewrote aggregated batch file"
        );
        Ok(())
    }

    fn write_all(&self, path: &Path, text: &str) -> std::io::Result<()> {
        let mut file = fs::File::create(path)?;
        file.write_all(text.as_bytes())?;
        file.sync_all()
    }

    fn write_failure(&self, path: &Path, source: std::io::Error) -> BatchError {
        BatchError::WriteFailure {
            path: path.to_path_buf(),
            source,
        }
    }
}
