//! NAMASTE ↔ ICD-11 terminology mapping
//!
//! This crate holds the curated mapping table between NAMASTE codes (local
//! traditional-medicine terminology) and ICD-11 (TM2 module, plus an optional
//! biomedical module code), along with lookup and matching operations:
//!
//! - [`MappingTable::search`]: case-insensitive substring search for the
//!   interactive lookup surface
//! - [`MappingTable::match_import`]: strict equality matching for validating
//!   imported rows
//!
//! The shipped dataset is embedded in the binary; callers that want a larger
//! or different dataset load one with [`MappingTable::from_path`].

#![forbid(unsafe_code)]

mod error;
mod record;
mod table;

use once_cell::sync::Lazy;

pub use error::{Error, Result};
pub use record::{MappingRecord, MappingType, SourceConcept, TargetConcept};
pub use table::MappingTable;

static EMBEDDED_TABLE: Lazy<MappingTable> = Lazy::new(|| {
    MappingTable::from_json(include_str!("../data/mappings.json"))
        .expect("failed to load embedded mappings.json")
});

/// The shipped 20-record mapping table.
pub fn embedded() -> &'static MappingTable {
    &EMBEDDED_TABLE
}
