//! Error types for CSV ingestion

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The file is not parseable as delimited text (or a row is malformed).
    /// Fatal for the whole file; there is no partial result.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
