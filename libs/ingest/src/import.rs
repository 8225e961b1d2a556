//! CSV import and cross-check
//!
//! Reads a delimited file with a header row, normalizes recognized column
//! names (case-insensitive, with synonyms) onto the semantic fields `code`,
//! `display` and `category`, and cross-checks every row against the mapping
//! table with the strict matcher. Unrecognized headers are ignored; a
//! missing recognized header degrades to empty-string values. A row the
//! parser cannot read fails the whole file.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use setu_terminology::MappingTable;

use crate::error::Result;

/// Synonyms accepted for each semantic column, in priority order.
const CODE_HEADERS: &[&str] = &["code"];
const DISPLAY_HEADERS: &[&str] = &["display", "name", "condition"];
const CATEGORY_HEADERS: &[&str] = &["category"];

/// Target a row resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedTarget {
    /// ICD-11 TM2 code
    pub code: String,

    /// ICD-11 TM2 display
    pub display: String,

    /// Presentation label, `"{code} - {display}"`
    pub label: String,
}

/// One normalized CSV row, with its cross-check outcome.
///
/// Transient: built per file, replaced wholesale on the next import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedRow {
    pub code: String,

    pub display: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// `None` means unmapped — a normal outcome, not an error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<MatchedTarget>,
}

impl ImportedRow {
    pub fn is_matched(&self) -> bool {
        self.matched.is_some()
    }
}

/// Outcome of importing one file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub rows: Vec<ImportedRow>,
}

impl ImportReport {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn matched_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_matched()).count()
    }

    pub fn unmatched_count(&self) -> usize {
        self.len() - self.matched_count()
    }
}

/// Read and normalize rows without cross-checking.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<ImportedRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let code_col = find_column(&headers, CODE_HEADERS);
    let display_col = find_column(&headers, DISPLAY_HEADERS);
    let category_col = find_column(&headers, CATEGORY_HEADERS);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let field = |col: Option<usize>| {
            col.and_then(|i| record.get(i))
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        let category = field(category_col);
        rows.push(ImportedRow {
            code: field(code_col),
            display: field(display_col),
            category: (!category.is_empty()).then_some(category),
            matched: None,
        });
    }

    tracing::debug!(rows = rows.len(), "csv parsed");
    Ok(rows)
}

/// Resolve each row against the table with the strict matcher.
pub fn cross_check(rows: &mut [ImportedRow], table: &MappingTable) {
    for row in rows.iter_mut() {
        row.matched = table.match_import(&row.code, &row.display).map(|record| {
            let code = record.target.tm2_code.clone();
            let display = record.target.tm2_display.clone();
            MatchedTarget {
                label: format!("{code} - {display}"),
                code,
                display,
            }
        });
    }
}

/// Import from any reader and cross-check against `table`.
pub fn check_reader<R: Read>(reader: R, table: &MappingTable) -> Result<ImportReport> {
    let mut rows = read_rows(reader)?;
    cross_check(&mut rows, table);
    Ok(ImportReport { rows })
}

/// Import a CSV file and cross-check against `table`.
pub fn check_file(path: &Path, table: &MappingTable) -> Result<ImportReport> {
    let file = File::open(path)?;
    let report = check_reader(file, table)?;
    tracing::info!(
        path = %path.display(),
        rows = report.len(),
        matched = report.matched_count(),
        "csv cross-check complete"
    );
    Ok(report)
}

/// First header equal (ignoring ASCII case) to any synonym, in synonym
/// priority order.
fn find_column(headers: &csv::StringRecord, synonyms: &[&str]) -> Option<usize> {
    synonyms.iter().find_map(|name| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use setu_terminology::embedded;

    #[test]
    fn header_synonyms_are_case_insensitive() {
        let csv = "CODE,Name,CATEGORY\nNAM-001,Essential Hypertension,Cardiovascular\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code, "NAM-001");
        assert_eq!(rows[0].display, "Essential Hypertension");
        assert_eq!(rows[0].category.as_deref(), Some("Cardiovascular"));
    }

    #[test]
    fn display_synonym_priority_prefers_display_over_condition() {
        let csv = "code,condition,display\nNAM-001,from condition,from display\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].display, "from display");
    }

    #[test]
    fn missing_recognized_headers_yield_empty_fields() {
        let csv = "code\nNAM-001\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].code, "NAM-001");
        assert_eq!(rows[0].display, "");
        assert_eq!(rows[0].category, None);
    }

    #[test]
    fn unrecognized_headers_are_ignored() {
        let csv = "code,display,notes\nNAM-001,Essential Hypertension,internal remark\n";
        let rows = read_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code, "NAM-001");
    }

    #[test]
    fn ragged_row_fails_the_whole_file() {
        let csv = "code,display\nNAM-001,Essential Hypertension\nNAM-002\n";
        assert!(read_rows(csv.as_bytes()).is_err());
    }

    #[test]
    fn unknown_code_is_unmatched_with_no_label() {
        let report = check_reader(
            "code,display\nNAM-099,Unknown Condition\n".as_bytes(),
            embedded(),
        )
        .unwrap();
        assert_eq!(report.len(), 1);
        assert!(!report.rows[0].is_matched());
        assert_eq!(report.rows[0].matched, None);
        assert_eq!(report.unmatched_count(), 1);
    }

    #[test]
    fn lowercase_code_matches_regardless_of_display() {
        let report = check_reader(
            "code,display\nnam-004,anything\n".as_bytes(),
            embedded(),
        )
        .unwrap();
        let matched = report.rows[0].matched.as_ref().unwrap();
        assert_eq!(matched.code, "GB61.2");
        assert_eq!(matched.label, "GB61.2 - Chronic kidney disease, stage 3");
    }

    #[test]
    fn display_alone_is_enough_to_match() {
        let report = check_reader(
            "display\niron deficiency anemia\n".as_bytes(),
            embedded(),
        )
        .unwrap();
        assert!(report.rows[0].is_matched());
    }

    #[test]
    fn counts_add_up() {
        let csv = "code,display\nNAM-001,\nNAM-099,\nNAM-002,\n";
        let report = check_reader(csv.as_bytes(), embedded()).unwrap();
        assert_eq!(report.len(), 3);
        assert_eq!(report.matched_count(), 2);
        assert_eq!(report.unmatched_count(), 1);
    }
}
