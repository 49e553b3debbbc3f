use std::path::PathBuf;

use thiserror::Error;

/// Errors that can abort the aggregation pipeline for a file
/// Every variant is fatal for the file being processed; none are retried
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("invalid routing data: {0}")]
    InvalidRoutingData(String),

    #[error("identity store unavailable: {0}")]
    IdentityStoreUnavailable(String),

    #[error("write failure for {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BatchError>;
