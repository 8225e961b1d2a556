//! Synthetic bundle generation
//!
//! Builds one collection bundle from one mapping record: a synthetic
//! patient, an ambulatory encounter over the 24 hours before the generation
//! instant, and a condition whose codings cross-reference the NAMASTE code,
//! the ICD-11 TM2 code, and (when curated) the ICD-11 biomedical code.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use setu_terminology::MappingRecord;

use crate::entropy::{Entropy, OsEntropy};
use crate::model::{
    Bundle, BundleEntry, CodeableConcept, Coding, Condition, Encounter, HumanName, Identifier,
    Patient, Period, Reference, Resource,
};

/// Terminology system URIs used in generated bundles.
pub mod systems {
    /// NAMASTE source terminology
    pub const NAMASTE: &str = "http://namaste.health/terminology";

    /// ICD-11 TM2 (MMS linearization)
    pub const ICD11_TM2: &str = "http://id.who.int/icd/release/11/mms";

    /// ICD-11 biomedical module
    pub const ICD11_BIOMEDICAL: &str = "http://id.who.int/icd/release/11/biomedical";

    /// Synthetic patient identifiers
    pub const PATIENT_ID: &str = "http://namaste.health/patient-id";

    /// HL7 v3 ActCode (encounter class)
    pub const ACT_CODE: &str = "http://terminology.hl7.org/CodeSystem/v3-ActCode";

    /// Condition clinical status
    pub const CONDITION_CLINICAL: &str =
        "http://terminology.hl7.org/CodeSystem/condition-clinical";

    /// Condition verification status
    pub const CONDITION_VER_STATUS: &str =
        "http://terminology.hl7.org/CodeSystem/condition-ver-status";
}

/// One synthetic demographic profile.
#[derive(Debug, Clone, Copy)]
pub struct DemographicProfile {
    pub family: &'static str,
    pub given: &'static [&'static str],
    pub gender: &'static str,
    pub birth_date: &'static str,
}

/// Fixed roster the generator picks from, pseudo-uniformly.
pub const PROFILES: &[DemographicProfile] = &[
    DemographicProfile {
        family: "Kumar",
        given: &["Raj"],
        gender: "male",
        birth_date: "1985-03-15",
    },
    DemographicProfile {
        family: "Sharma",
        given: &["Priya"],
        gender: "female",
        birth_date: "1992-07-22",
    },
    DemographicProfile {
        family: "Patel",
        given: &["Amit"],
        gender: "male",
        birth_date: "1978-11-08",
    },
    DemographicProfile {
        family: "Singh",
        given: &["Meera"],
        gender: "female",
        birth_date: "1988-01-30",
    },
    DemographicProfile {
        family: "Reddy",
        given: &["Vikram"],
        gender: "male",
        birth_date: "1995-05-14",
    },
];

/// Generate a bundle for `record` at the current instant with process-wide
/// randomness.
pub fn generate(record: &MappingRecord) -> Bundle {
    generate_with(record, &mut OsEntropy, Utc::now())
}

/// Generate a bundle for `record` at `now`, drawing randomized values from
/// `entropy`.
///
/// Structure is deterministic; only identifiers, the demographic pick and
/// the patient serial vary between calls.
pub fn generate_with(record: &MappingRecord, entropy: &mut impl Entropy, now: DateTime<Utc>) -> Bundle {
    let bundle_id = entropy.next_id();
    let patient_id = entropy.next_id();
    let encounter_id = entropy.next_id();
    let condition_id = entropy.next_id();

    let profile = PROFILES[entropy.pick(PROFILES.len())];
    let timestamp = iso(now);
    let encounter_start = iso(now - Duration::hours(24));

    let patient = Patient {
        resource_type: "Patient".to_string(),
        id: patient_id.clone(),
        identifier: vec![Identifier {
            system: systems::PATIENT_ID.to_string(),
            value: format!("PAT-{}", entropy.patient_serial()),
        }],
        name: vec![HumanName {
            use_: "official".to_string(),
            family: profile.family.to_string(),
            given: profile.given.iter().map(|g| (*g).to_string()).collect(),
        }],
        gender: profile.gender.to_string(),
        birth_date: profile.birth_date.to_string(),
    };

    let encounter = Encounter {
        resource_type: "Encounter".to_string(),
        id: encounter_id.clone(),
        status: "finished".to_string(),
        class: Coding::new(systems::ACT_CODE, "AMB", "ambulatory"),
        subject: Reference::patient(&patient_id),
        period: Period {
            start: encounter_start,
            end: timestamp.clone(),
        },
    };

    let condition = Condition {
        resource_type: "Condition".to_string(),
        id: condition_id,
        clinical_status: CodeableConcept {
            coding: vec![Coding::bare(systems::CONDITION_CLINICAL, "active")],
        },
        verification_status: CodeableConcept {
            coding: vec![Coding::bare(systems::CONDITION_VER_STATUS, "confirmed")],
        },
        code: CodeableConcept {
            coding: condition_codings(record),
        },
        subject: Reference::patient(&patient_id),
        encounter: Reference::encounter(&encounter_id),
        recorded_date: timestamp.clone(),
    };

    tracing::debug!(
        source_code = %record.source.code,
        codings = condition.code.coding.len(),
        "generated bundle"
    );

    Bundle {
        resource_type: "Bundle".to_string(),
        id: bundle_id,
        bundle_type: "collection".to_string(),
        timestamp,
        entry: vec![
            BundleEntry {
                resource: Resource::Patient(patient),
            },
            BundleEntry {
                resource: Resource::Encounter(encounter),
            },
            BundleEntry {
                resource: Resource::Condition(condition),
            },
        ],
    }
}

/// Ordered condition codings: NAMASTE first, TM2 second, biomedical last
/// and only when the record carries one.
fn condition_codings(record: &MappingRecord) -> Vec<Coding> {
    let mut codings = vec![
        Coding::new(
            systems::NAMASTE,
            record.source.code.clone(),
            record.source.display.clone(),
        ),
        Coding::new(
            systems::ICD11_TM2,
            record.target.tm2_code.clone(),
            record.target.tm2_display.clone(),
        ),
    ];
    if let Some(code) = &record.target.biomedical_code {
        codings.push(Coding::new(
            systems::ICD11_BIOMEDICAL,
            code.clone(),
            record.target.biomedical_display.clone().unwrap_or_default(),
        ));
    }
    codings
}

fn iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
