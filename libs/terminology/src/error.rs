//! Error types for the terminology crate

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Duplicate record id: {0}")]
    DuplicateId(String),

    #[error("Duplicate source code: {0}")]
    DuplicateSourceCode(String),

    #[error("Record {id}: biomedical code and display must be paired (code: {has_code}, display: {has_display})")]
    UnpairedBiomedical {
        id: String,
        has_code: bool,
        has_display: bool,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
