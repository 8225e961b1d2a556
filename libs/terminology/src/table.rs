//! Mapping table: lookup and matching
//!
//! The table is an ordered, read-only sequence of [`MappingRecord`]s. It is
//! loaded once (from the embedded dataset or an injected JSON source) and
//! validated; after that every operation is a borrow.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::record::MappingRecord;

/// Read-only, ordered collection of mapping records.
///
/// Insertion order is preserved and observable: `all`, `search` and
/// `match_import` all report results in table order.
#[derive(Debug, Clone)]
pub struct MappingTable {
    records: Vec<MappingRecord>,
}

impl MappingTable {
    /// Build a table from records, validating table-level invariants.
    ///
    /// Rejects duplicate `id`s, duplicate source codes, and a biomedical
    /// code/display present without its partner.
    pub fn new(records: Vec<MappingRecord>) -> Result<Self> {
        let mut ids = HashSet::new();
        let mut source_codes = HashSet::new();

        for record in &records {
            if !ids.insert(record.id.as_str()) {
                return Err(Error::DuplicateId(record.id.clone()));
            }
            let code = record.source.code.to_lowercase();
            if !source_codes.insert(code) {
                return Err(Error::DuplicateSourceCode(record.source.code.clone()));
            }
            let has_code = record.target.biomedical_code.is_some();
            let has_display = record.target.biomedical_display.is_some();
            if has_code != has_display {
                return Err(Error::UnpairedBiomedical {
                    id: record.id.clone(),
                    has_code,
                    has_display,
                });
            }
        }

        tracing::debug!(records = records.len(), "mapping table loaded");
        Ok(Self { records })
    }

    /// Parse a table from a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<MappingRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Load a table from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// All records in stable insertion order.
    pub fn all(&self) -> &[MappingRecord] {
        &self.records
    }

    /// Number of records in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by its identifier.
    pub fn by_id(&self, id: &str) -> Option<&MappingRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Look up a record by its NAMASTE source code, case-insensitively.
    pub fn by_source_code(&self, code: &str) -> Option<&MappingRecord> {
        self.records
            .iter()
            .find(|r| r.source.code.eq_ignore_ascii_case(code))
    }

    /// Distinct source categories, lexicographically sorted.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .records
            .iter()
            .map(|r| r.source.category.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        categories.sort();
        categories
    }

    /// Case-insensitive substring search over the five searchable fields:
    /// source code, source display, source category, TM2 code, TM2 display.
    ///
    /// An empty (or whitespace-only) query returns the whole table in order.
    pub fn search(&self, query: &str) -> Vec<&MappingRecord> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.records.iter().collect();
        }
        self.records
            .iter()
            .filter(|r| {
                r.source.code.to_lowercase().contains(&query)
                    || r.source.display.to_lowercase().contains(&query)
                    || r.target.tm2_code.to_lowercase().contains(&query)
                    || r.target.tm2_display.to_lowercase().contains(&query)
                    || r.source.category.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Strict matcher for imported rows: the first record (in table order)
    /// whose source code equals `code` or whose source display equals
    /// `display`, both case-insensitively.
    ///
    /// Exact equality rather than substring — validation of imported codes
    /// must not produce false positives on partial text. Empty inputs never
    /// match. If `code` names one record and `display` names another, the
    /// earlier record in table order wins.
    pub fn match_import(&self, code: &str, display: &str) -> Option<&MappingRecord> {
        if code.is_empty() && display.is_empty() {
            return None;
        }
        self.records.iter().find(|r| {
            (!code.is_empty() && r.source.code.eq_ignore_ascii_case(code))
                || (!display.is_empty() && r.source.display.eq_ignore_ascii_case(display))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedded;
    use serde_json::json;

    fn record(id: &str, code: &str, display: &str) -> MappingRecord {
        serde_json::from_value(json!({
            "id": id,
            "source": { "code": code, "display": display, "category": "Test" },
            "target": { "tm2Code": "XX00", "tm2Display": "Test target" },
            "mappingType": "exact"
        }))
        .unwrap()
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = MappingTable::new(vec![
            record("1", "NAM-001", "First"),
            record("1", "NAM-002", "Second"),
        ]);
        assert!(matches!(result, Err(Error::DuplicateId(id)) if id == "1"));
    }

    #[test]
    fn rejects_duplicate_source_codes() {
        let result = MappingTable::new(vec![
            record("1", "NAM-001", "First"),
            record("2", "nam-001", "Second"),
        ]);
        assert!(matches!(result, Err(Error::DuplicateSourceCode(_))));
    }

    #[test]
    fn rejects_unpaired_biomedical_fields() {
        let result = MappingTable::from_json(
            r#"[{
                "id": "1",
                "source": { "code": "NAM-001", "display": "X", "category": "Test" },
                "target": { "tm2Code": "XX00", "tm2Display": "T", "biomedicalCode": "XN1A1" },
                "mappingType": "exact"
            }]"#,
        );
        assert!(matches!(result, Err(Error::UnpairedBiomedical { .. })));
    }

    #[test]
    fn search_empty_query_returns_all_in_order() {
        let table = embedded();
        let results = table.search("   ");
        assert_eq!(results.len(), 20);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        let all_ids: Vec<&str> = table.all().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, all_ids);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let table = embedded();
        let results = table.search("DIABETES");
        assert!(!results.is_empty());
        assert!(results.iter().any(|r| r.source.code == "NAM-002"));
    }

    #[test]
    fn search_covers_all_five_fields() {
        let table = embedded();
        // source code, source display, tm2 code, tm2 display, category
        assert!(!table.search("nam-001").is_empty());
        assert!(!table.search("hypertension").is_empty());
        assert!(!table.search("gb61").is_empty());
        assert!(!table.search("oesophageal").is_empty());
        assert!(!table.search("renal").is_empty());
    }

    #[test]
    fn search_results_are_subset_containing_query() {
        let table = embedded();
        let query = "re";
        for record in table.search(query) {
            let hit = record.source.code.to_lowercase().contains(query)
                || record.source.display.to_lowercase().contains(query)
                || record.target.tm2_code.to_lowercase().contains(query)
                || record.target.tm2_display.to_lowercase().contains(query)
                || record.source.category.to_lowercase().contains(query);
            assert!(hit, "record {} should not match {query}", record.id);
        }
    }

    #[test]
    fn categories_are_sorted_and_deduped() {
        let table = embedded();
        let categories = table.categories();
        let mut sorted = categories.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(categories, sorted);
        assert!(categories.len() <= table.len());
        assert!(categories.contains(&"Respiratory".to_string()));
    }

    #[test]
    fn match_import_is_case_insensitive_on_code() {
        let table = embedded();
        let matched = table.match_import("nam-001", "").unwrap();
        assert_eq!(matched.source.code, "NAM-001");
    }

    #[test]
    fn match_import_is_case_insensitive_on_display() {
        let table = embedded();
        let matched = table.match_import("", "essential hypertension").unwrap();
        assert_eq!(matched.id, "1");
    }

    #[test]
    fn match_import_rejects_partial_text() {
        let table = embedded();
        // `search` would find this; the strict matcher must not.
        assert!(table.match_import("NAM", "Hypertension").is_none());
    }

    #[test]
    fn match_import_unknown_code_is_none() {
        let table = embedded();
        assert!(table.match_import("NAM-099", "Unknown Condition").is_none());
    }

    #[test]
    fn match_import_empty_inputs_never_match() {
        let table = embedded();
        assert!(table.match_import("", "").is_none());
    }

    #[test]
    fn match_import_first_match_wins_on_conflicting_row() {
        let table = embedded();
        // Code of record 5, display of record 2: record 2 comes first in
        // table order, so the display match wins.
        let matched = table
            .match_import("NAM-005", "Type 2 Diabetes Mellitus")
            .unwrap();
        assert_eq!(matched.id, "2");
    }

    #[test]
    fn by_id_and_by_source_code() {
        let table = embedded();
        assert_eq!(table.by_id("4").unwrap().source.code, "NAM-004");
        assert_eq!(table.by_source_code("nam-004").unwrap().id, "4");
        assert!(table.by_id("99").is_none());
    }
}
