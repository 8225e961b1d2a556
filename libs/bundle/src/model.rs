//! FHIR R4 bundle model
//!
//! Typed structures for the collection bundle this crate generates: one
//! Patient, one Encounter, one Condition. Field declaration order matches
//! the FHIR R4 element order so that serialized key order is stable — the
//! on-screen text and the QR payload are the same bytes.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// FHIR collection bundle with exactly three linked entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Resource type - always "Bundle"
    pub resource_type: String,

    /// Logical id of this artifact
    pub id: String,

    /// Bundle type - always "collection"
    #[serde(rename = "type")]
    pub bundle_type: String,

    /// When the bundle was assembled (RFC 3339, UTC)
    pub timestamp: String,

    /// Patient, Encounter, Condition - in that order
    pub entry: Vec<BundleEntry>,
}

/// Entry in the bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    /// The carried resource
    pub resource: Resource,
}

/// A resource in a generated bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resource {
    Patient(Patient),
    Encounter(Encounter),
    Condition(Condition),
}

/// Synthetic patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Resource type - always "Patient"
    pub resource_type: String,

    /// Logical id, referenced by the encounter and condition entries
    pub id: String,

    /// Business identifiers (one, in the demo identifier system)
    pub identifier: Vec<Identifier>,

    /// Names (one, `use` = "official")
    pub name: Vec<HumanName>,

    /// Administrative gender
    pub gender: String,

    /// Date of birth (YYYY-MM-DD)
    pub birth_date: String,
}

/// Synthetic ambulatory encounter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    /// Resource type - always "Encounter"
    pub resource_type: String,

    /// Logical id, referenced by the condition entry
    pub id: String,

    /// Always "finished"
    pub status: String,

    /// Encounter class - always the v3-ActCode AMB coding
    pub class: Coding,

    /// Reference to the patient entry
    pub subject: Reference,

    /// Fixed 24-hour window ending at the generation instant
    pub period: Period,
}

/// Condition carrying the cross-referenced codings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Resource type - always "Condition"
    pub resource_type: String,

    /// Logical id
    pub id: String,

    /// Always the "active" clinical-status coding
    pub clinical_status: CodeableConcept,

    /// Always the "confirmed" verification-status coding
    pub verification_status: CodeableConcept,

    /// NAMASTE coding first, TM2 second, biomedical third when curated
    pub code: CodeableConcept,

    /// Reference to the patient entry
    pub subject: Reference,

    /// Reference to the encounter entry
    pub encounter: Reference,

    /// Equals the bundle timestamp
    pub recorded_date: String,
}

/// Business identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    pub system: String,
    pub value: String,
}

/// Human name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanName {
    #[serde(rename = "use")]
    pub use_: String,
    pub family: String,
    pub given: Vec<String>,
}

/// Reference to a coded concept in a terminology system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coding {
    pub system: String,
    pub code: String,

    /// Status codings carry no display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Coding {
    pub fn new(
        system: impl Into<String>,
        code: impl Into<String>,
        display: impl Into<String>,
    ) -> Self {
        Self {
            system: system.into(),
            code: code.into(),
            display: Some(display.into()),
        }
    }

    /// Coding without a display, as used in status elements.
    pub fn bare(system: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            code: code.into(),
            display: None,
        }
    }
}

/// Concept expressed as one or more codings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeableConcept {
    pub coding: Vec<Coding>,
}

/// Literal reference to another entry (`Patient/{id}`, `Encounter/{id}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub reference: String,
}

impl Reference {
    pub fn patient(id: &str) -> Self {
        Self {
            reference: format!("Patient/{id}"),
        }
    }

    pub fn encounter(id: &str) -> Self {
        Self {
            reference: format!("Encounter/{id}"),
        }
    }
}

/// Time window with both ends (RFC 3339, UTC)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub start: String,
    pub end: String,
}

impl Bundle {
    /// Serialize to pretty-printed JSON with stable key order.
    ///
    /// This string is both the display text and the QR payload.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The patient entry, if present.
    pub fn patient(&self) -> Option<&Patient> {
        self.entry.iter().find_map(|e| match &e.resource {
            Resource::Patient(p) => Some(p),
            _ => None,
        })
    }

    /// The encounter entry, if present.
    pub fn encounter(&self) -> Option<&Encounter> {
        self.entry.iter().find_map(|e| match &e.resource {
            Resource::Encounter(enc) => Some(enc),
            _ => None,
        })
    }

    /// The condition entry, if present.
    pub fn condition(&self) -> Option<&Condition> {
        self.entry.iter().find_map(|e| match &e.resource {
            Resource::Condition(c) => Some(c),
            _ => None,
        })
    }
}
