//! Mapping record model
//!
//! A `MappingRecord` is one curated association between a NAMASTE concept and
//! its ICD-11 counterpart(s): always a Traditional Medicine Module 2 (TM2)
//! code, optionally a biomedical code when a direct equivalent is curated.

use serde::{Deserialize, Serialize};

/// Semantic relationship between the source and target concepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingType {
    /// Source and target denote the same concept
    Exact,
    /// Target is broader than the source concept
    Broader,
    /// Target is narrower than the source concept
    Narrower,
    /// Concepts overlap without a subsumption relationship
    Related,
}

impl MappingType {
    /// Canonical lowercase name, as used in the dataset
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingType::Exact => "exact",
            MappingType::Broader => "broader",
            MappingType::Narrower => "narrower",
            MappingType::Related => "related",
        }
    }
}

/// NAMASTE-side concept of a mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConcept {
    /// Local terminology code (e.g. `NAM-001`)
    pub code: String,

    /// Human-readable concept name
    pub display: String,

    /// Clinical category (e.g. `Cardiovascular`)
    pub category: String,
}

/// ICD-11-side concept of a mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetConcept {
    /// Traditional Medicine Module 2 code — always present
    pub tm2_code: String,

    /// TM2 display name
    pub tm2_display: String,

    /// Biomedical module code, when a direct equivalent is curated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biomedical_code: Option<String>,

    /// Biomedical display name — present exactly when `biomedical_code` is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biomedical_display: Option<String>,
}

impl TargetConcept {
    /// Whether this target carries a biomedical coding
    pub fn has_biomedical(&self) -> bool {
        self.biomedical_code.is_some()
    }
}

/// One curated NAMASTE → ICD-11 mapping
///
/// Immutable after load; identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRecord {
    /// Unique, stable record identifier
    pub id: String,

    /// NAMASTE concept
    pub source: SourceConcept,

    /// ICD-11 concept(s)
    pub target: TargetConcept,

    /// Relationship between the two concepts
    pub mapping_type: MappingType,
}
