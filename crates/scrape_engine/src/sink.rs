//! Sinks that persist session records: CSV, JSON and SQLite.
//!
//! Every sink treats an empty record slice as "nothing to save" and leaves
//! the destination untouched. File sinks overwrite; the SQLite sink drops
//! and recreates its table.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use scrape_core::{distinct_fields, ScrapedRecord, SinkTarget};
use scrape_logging::scrape_info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::persist::{ensure_output_dir, parent_dir, write_atomic, PersistError};

pub const DEFAULT_CSV_FILE: &str = "scraped_data.csv";
pub const DEFAULT_JSON_FILE: &str = "scraped_data.json";
pub const DEFAULT_DB_FILE: &str = "scraped_data.db";
pub const DEFAULT_TABLE: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { destination: PathBuf, rows: usize },
    NothingToSave,
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub trait RecordSink {
    fn save(&self, records: &[ScrapedRecord]) -> Result<SaveOutcome, SinkError>;
}

/// Build the sink for a save request and run it.
pub fn save_records(target: &SinkTarget, records: &[ScrapedRecord]) -> Result<SaveOutcome, SinkError> {
    match target {
        SinkTarget::Csv { path } => CsvSink::new(path.clone()).save(records),
        SinkTarget::Json { path } => JsonSink::new(path.clone()).save(records),
        SinkTarget::Sqlite { db_path, table } => {
            SqliteSink::new(db_path.clone(), table.clone()).save(records)
        }
    }
}

/// One column per distinct field (first-seen order), one row per record.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSink for CsvSink {
    fn save(&self, records: &[ScrapedRecord]) -> Result<SaveOutcome, SinkError> {
        if records.is_empty() {
            return Ok(SaveOutcome::NothingToSave);
        }
        let columns = distinct_fields(records);
        let mut buf: Vec<u8> = Vec::new();
        write_row(&mut buf, columns.iter().copied())?;
        for record in records {
            write_row(&mut buf, row_cells(&columns, record).map(|c| c.unwrap_or("")))?;
        }
        let destination = write_atomic(&self.path, &buf)?;
        scrape_info!("Wrote {} CSV rows to {:?}", records.len(), destination);
        Ok(SaveOutcome::Saved {
            destination,
            rows: records.len(),
        })
    }
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<'a, W: Write>(
    mut w: W,
    cells: impl IntoIterator<Item = &'a str>,
) -> io::Result<()> {
    let cells: Vec<&str> = cells.into_iter().collect();
    // A lone empty cell would be a blank line, which readers skip.
    if let [""] = cells.as_slice() {
        return w.write_all(b"\"\"\n");
    }
    let mut first = true;
    for cell in cells {
        if !first {
            w.write_all(b",")?;
        }
        first = false;
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\n")
}

fn row_cells<'a>(
    columns: &'a [&'a str],
    record: &'a ScrapedRecord,
) -> impl Iterator<Item = Option<&'a str>> + 'a {
    columns
        .iter()
        .map(move |column| (record.field() == *column).then(|| record.value()))
}

/// Array of single-key objects, indented with four spaces.
#[derive(Debug, Clone)]
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSink for JsonSink {
    fn save(&self, records: &[ScrapedRecord]) -> Result<SaveOutcome, SinkError> {
        if records.is_empty() {
            return Ok(SaveOutcome::NothingToSave);
        }
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        records.serialize(&mut serializer)?;
        let destination = write_atomic(&self.path, &buf)?;
        scrape_info!("Wrote {} JSON records to {:?}", records.len(), destination);
        Ok(SaveOutcome::Saved {
            destination,
            rows: records.len(),
        })
    }
}

/// Read a file written by [`JsonSink`] back into records.
pub fn load_json(path: &Path) -> Result<Vec<ScrapedRecord>, SinkError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Replaces `table` in the database on every save.
#[derive(Debug, Clone)]
pub struct SqliteSink {
    db_path: PathBuf,
    table: String,
}

impl SqliteSink {
    pub fn new(db_path: impl Into<PathBuf>, table: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            table: table.into(),
        }
    }
}

impl RecordSink for SqliteSink {
    fn save(&self, records: &[ScrapedRecord]) -> Result<SaveOutcome, SinkError> {
        if records.is_empty() {
            return Ok(SaveOutcome::NothingToSave);
        }
        ensure_output_dir(&parent_dir(&self.db_path))?;
        let mut conn = Connection::open(&self.db_path)?;

        let columns = sql_columns(records);
        let table = quote_ident(&self.table);
        let column_defs = columns
            .iter()
            .map(|c| format!("{} TEXT", quote_ident(c)))
            .collect::<Vec<_>>()
            .join(", ");
        let column_list = columns
            .iter()
            .map(|c| quote_ident(c))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=columns.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");

        let tx = conn.transaction()?;
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table}; CREATE TABLE {table} ({column_defs});"
        ))?;
        {
            let mut stmt =
                tx.prepare(&format!("INSERT INTO {table} ({column_list}) VALUES ({placeholders})"))?;
            for record in records {
                let cells = columns.iter().map(|column| {
                    record
                        .field()
                        .eq_ignore_ascii_case(column)
                        .then(|| record.value())
                });
                stmt.execute(rusqlite::params_from_iter(cells))?;
            }
        }
        tx.commit()?;

        scrape_info!(
            "Replaced table {} in {:?} with {} rows",
            self.table,
            self.db_path,
            records.len()
        );
        Ok(SaveOutcome::Saved {
            destination: self.db_path.clone(),
            rows: records.len(),
        })
    }
}

/// Distinct fields folded ASCII case-insensitively, as SQLite compares column
/// names; the first spelling seen names the column.
fn sql_columns(records: &[ScrapedRecord]) -> Vec<&str> {
    let mut columns: Vec<&str> = Vec::new();
    for field in distinct_fields(records) {
        if !columns.iter().any(|c| c.eq_ignore_ascii_case(field)) {
            columns.push(field);
        }
    }
    columns
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
