use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use bpy331_aggregator::error::Result;
use bpy331_aggregator::models::FIELD_COUNT;
use bpy331_aggregator::notify::Notifier;

/// The fields a test record varies; everything else is boilerplate
pub struct RecordSpec<'a> {
    pub batch_run_id: &'a str,
    pub posting_ref: &'a str,
    pub payee_name: &'a str,
    pub amount: &'a str,
    pub sort_code: &'a str,
    pub account_num: &'a str,
    pub building_society_num: &'a str,
}

impl Default for RecordSpec<'_> {
    fn default() -> Self {
        Self {
            batch_run_id: "4196",
            posting_ref: "12017044",
            payee_name: "MRS RV O'DRISCROLL",
            amount: "535.71",
            sort_code: "40-35-03",
            account_num: "27123456",
            building_society_num: "0",
        }
    }
}

/// Render one 29-line BPY331 record block the way the batch system
/// writes it, trailing whitespace inside some quoted values included
pub fn record_lines(spec: &RecordSpec) -> Vec<String> {
    let q = |v: &str| format!("\"{}\"", v);
    vec![
        q("BEN"),
        q(spec.batch_run_id),
        q(spec.posting_ref),
        q("NFI0000001"),
        q("CL"),
        q(spec.payee_name),
        format!("\"1 HIGH STREET {} \"", spec.payee_name),
        q("NFI0000001"),
        q(spec.payee_name),
        q("1 HIGH STREET"),
        format!("\"{} \"", spec.amount),
        q("27-AUG-2026"),
        q("27-AUG-2026"),
        q("BACS"),
        q(""),
        format!("\"{} \"", spec.sort_code),
        q(spec.account_num),
        q(spec.payee_name),
        q(spec.building_society_num),
        q(""),
        q(""),
        q("N"),
        q(""),
        q(""),
        q("N"),
        q("27-AUG-2026"),
        q(""),
        q(""),
        q(""),
    ]
}

/// Write a complete batch file (header plus record blocks) into `dir`
pub fn write_dat(dir: &Path, name: &str, records: &[RecordSpec]) -> PathBuf {
    let mut lines = vec!["\"HEADER 331\"".to_string()];
    for spec in records {
        let block = record_lines(spec);
        assert_eq!(block.len(), FIELD_COUNT);
        lines.extend(block);
    }
    let path = dir.join(name);
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

/// Notifier that records every message for assertion
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub messages: RefCell<Vec<(String, String)>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, subject: &str, body: &str) -> Result<()> {
        self.messages
            .borrow_mut()
            .push((subject.to_string(), body.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_block_is_exactly_one_record_long() {
        assert_eq!(record_lines(&RecordSpec::default()).len(), FIELD_COUNT);
    }

    #[test]
    fn write_dat_produces_header_plus_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dat(dir.path(), "bpy331_0.dat", &[RecordSpec::default()]);
        let text = fs::read_to_string(path).unwrap();
        assert_eq!(text.lines().count(), 1 + FIELD_COUNT);
        assert!(text.starts_with("\"HEADER 331\"\n"));
    }
}
