//! `setu` — browse the NAMASTE ↔ ICD-11 mapping table, cross-check CSV
//! exports against it, and generate synthetic FHIR bundles with a QR
//! rendering of the exact displayed payload.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use setu_terminology::{MappingRecord, MappingTable};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "setu", version, about = "NAMASTE ↔ ICD-11 terminology bridge")]
struct Cli {
    /// Load the mapping table from a JSON file instead of the embedded one
    #[arg(long, global = true, value_name = "FILE")]
    mappings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the mapping table
    List {
        /// Only records in this source category
        #[arg(long)]
        category: Option<String>,

        /// Machine-readable output
        #[arg(long)]
        json: bool,
    },

    /// Search the table (case-insensitive substring over code, display,
    /// category and the ICD-11 TM2 fields)
    Search {
        query: String,

        /// Machine-readable output
        #[arg(long)]
        json: bool,
    },

    /// Print the distinct source categories
    Categories,

    /// Cross-check a CSV export against the table
    Check {
        file: PathBuf,

        /// Machine-readable output
        #[arg(long)]
        json: bool,
    },

    /// Generate a synthetic FHIR bundle for one record
    Generate {
        /// NAMASTE source code (e.g. NAM-002) or record id
        record: String,

        /// Also write the bundle payload as a QR SVG
        #[arg(long, value_name = "FILE")]
        qr: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let loaded;
    let table: &MappingTable = match &cli.mappings {
        Some(path) => {
            loaded = MappingTable::from_path(path)
                .with_context(|| format!("failed to load mappings from {}", path.display()))?;
            &loaded
        }
        None => setu_terminology::embedded(),
    };

    match cli.command {
        Command::List { category, json } => list(table, category.as_deref(), json),
        Command::Search { query, json } => search(table, &query, json),
        Command::Categories => {
            for category in table.categories() {
                println!("{category}");
            }
            Ok(())
        }
        Command::Check { file, json } => check(table, &file, json),
        Command::Generate { record, qr } => generate(table, &record, qr.as_deref()),
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "setu=info".into()))
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn list(table: &MappingTable, category: Option<&str>, json: bool) -> Result<()> {
    let records: Vec<&MappingRecord> = table
        .all()
        .iter()
        .filter(|r| category.map_or(true, |c| r.source.category.eq_ignore_ascii_case(c)))
        .collect();
    print_records(&records, json)
}

fn search(table: &MappingTable, query: &str, json: bool) -> Result<()> {
    let records = table.search(query);
    if records.is_empty() {
        eprintln!("no records match {query:?}");
        return Ok(());
    }
    print_records(&records, json)
}

fn print_records(records: &[&MappingRecord], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }

    let mut out = Table::new();
    out.load_preset(UTF8_FULL).set_header(vec![
        "Code",
        "Display",
        "Category",
        "ICD-11 TM2",
        "Biomedical",
        "Type",
    ]);
    for record in records {
        out.add_row(vec![
            record.source.code.clone(),
            record.source.display.clone(),
            record.source.category.clone(),
            format!("{} {}", record.target.tm2_code, record.target.tm2_display),
            match (&record.target.biomedical_code, &record.target.biomedical_display) {
                (Some(code), Some(display)) => format!("{code} {display}"),
                _ => "-".to_string(),
            },
            record.mapping_type.as_str().to_string(),
        ]);
    }
    println!("{out}");
    Ok(())
}

fn check(table: &MappingTable, file: &std::path::Path, json: bool) -> Result<()> {
    let report = setu_ingest::check_file(file, table)
        .with_context(|| format!("failed to read {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let mut out = Table::new();
    out.load_preset(UTF8_FULL)
        .set_header(vec!["Code", "Display", "Category", "Status", "Mapped To"]);
    for row in &report.rows {
        out.add_row(vec![
            row.code.clone(),
            row.display.clone(),
            row.category.clone().unwrap_or_else(|| "-".to_string()),
            if row.is_matched() { "mapped" } else { "unmapped" }.to_string(),
            row.matched
                .as_ref()
                .map(|m| m.label.clone())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{out}");
    println!(
        "{} rows: {} mapped, {} not mapped",
        report.len(),
        report.matched_count(),
        report.unmatched_count()
    );
    Ok(())
}

fn generate(table: &MappingTable, key: &str, qr: Option<&std::path::Path>) -> Result<()> {
    // Source code first, record id as a fallback.
    let Some(record) = table.by_source_code(key).or_else(|| table.by_id(key)) else {
        bail!("no mapping record for {key:?}");
    };

    let bundle = setu_bundle::generate(record);
    let payload = bundle.to_json_pretty()?;
    println!("{payload}");

    if let Some(path) = qr {
        // The SVG encodes exactly the payload printed above.
        let svg = setu_bundle::qr_svg(&payload)?;
        fs::write(path, svg).with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = payload.len(), "QR SVG written");
    }
    Ok(())
}
