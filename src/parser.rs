use std::path::Path;

use crate::error::{BatchError, Result};
use crate::models::FIELD_COUNT;

/// Fixed positional offsets of the fields this system reads out of one
/// 29-line record block. The file carries no field names; these indices
/// are the layout.
pub mod offsets {
    pub const BATCH_RUN_ID: usize = 1;
    pub const POSTING_REF: usize = 2;
    pub const ACCOUNT_REF: usize = 3;
    pub const PAYEE_NAME: usize = 5;
    pub const PAYEE_ADDRESS: usize = 6;
    pub const CLAIM_REF: usize = 7;
    pub const AMOUNT: usize = 10;
    pub const BANK_SORT_CODE: usize = 15;
    pub const BANK_ACCOUNT_NUM: usize = 16;
    pub const BANK_ACCOUNT_NAME: usize = 17;
    pub const BUILDING_SOCIETY_NUM: usize = 18;
}

/// One raw 29-line record block, addressable by fixed offset
#[derive(Debug)]
pub struct RawRecord<'a> {
    lines: &'a [String],
}

impl<'a> RawRecord<'a> {
    pub fn field(&self, offset: usize) -> &'a str {
        &self.lines[offset]
    }
}

/// Lazy, finite, non-restartable sequence of raw record blocks
#[derive(Debug)]
pub struct Records<'a> {
    chunks: std::slice::ChunksExact<'a, String>,
}

impl<'a> Iterator for Records<'a> {
    type Item = RawRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next().map(|lines| RawRecord { lines })
    }
}

/// Partition the full line sequence of a source file into record blocks.
///
/// Line 0 is the header and is skipped; the remaining lines must form a
/// positive number of whole 29-line blocks or the file is rejected with
/// `MalformedInput`.
pub fn records<'a>(path: &Path, lines: &'a [String]) -> Result<Records<'a>> {
    if lines.is_empty() {
        return Err(BatchError::MalformedInput(format!(
            "{} is empty, expected a header line",
            path.display()
        )));
    }
    let body = &lines[1..];
    if body.is_empty() || body.len() % FIELD_COUNT != 0 {
        return Err(BatchError::MalformedInput(format!(
            "{} body has {} lines, expected a positive multiple of {}",
            path.display(),
            body.len(),
            FIELD_COUNT
        )));
    }
    Ok(Records {
        chunks: body.chunks_exact(FIELD_COUNT),
    })
}
