//! CSV ingestion for terminology cross-checking
//!
//! Parses user-supplied CSV files (header row with case-insensitive synonym
//! columns) into [`ImportedRow`]s and resolves each row against the mapping
//! table. Absence of a match is a normal "unmapped" outcome; only a file
//! that cannot be parsed is an error.

#![forbid(unsafe_code)]

mod error;
mod import;

pub use error::{Error, Result};
pub use import::{
    check_file, check_reader, cross_check, read_rows, ImportReport, ImportedRow, MatchedTarget,
};
