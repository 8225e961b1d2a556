//! Synthetic FHIR bundle generation
//!
//! Turns one [`setu_terminology::MappingRecord`] into a FHIR R4 collection
//! bundle — synthetic patient, ambulatory encounter, and a condition whose
//! codings carry the NAMASTE, ICD-11 TM2 and (optional) ICD-11 biomedical
//! codes — and encodes the serialized bundle as a scannable QR image.
//!
//! ```
//! let record = setu_terminology::embedded().by_source_code("NAM-002").unwrap();
//! let bundle = setu_bundle::generate(record);
//!
//! let payload = bundle.to_json_pretty().unwrap();
//! let svg = setu_bundle::qr_svg(&payload).unwrap();
//! assert!(svg.starts_with("<?xml"));
//! ```

#![forbid(unsafe_code)]

mod entropy;
mod error;
mod generate;
mod model;
mod qr;

pub use entropy::{Entropy, OsEntropy};
pub use error::{Error, Result};
pub use generate::{generate, generate_with, systems, DemographicProfile, PROFILES};
pub use model::{
    Bundle, BundleEntry, CodeableConcept, Coding, Condition, Encounter, HumanName, Identifier,
    Patient, Period, Reference, Resource,
};
pub use qr::qr_svg;
