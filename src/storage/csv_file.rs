//! CSV file backend for the order table
//!
//! The table is one UTF-8, comma-delimited file with the header
//! `Mobile,Name,Date,Details,Status,Salesperson` and one row per order.
//! File I/O is synchronous and runs under `tokio::task::spawn_blocking`.
//!
//! Saves go to a uniquely named hidden sibling file which is fsynced and then
//! renamed over the table, so readers see either the old table or the new one.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::error::StorageError;
use crate::core::order::{DATE_FORMAT, OrderRecord, OrderStatus, OrderTable};
use crate::core::store::TableStore;

/// Column names, in file order
pub const HEADER: [&str; 6] = ["Mobile", "Name", "Date", "Details", "Status", "Salesperson"];

/// One row exactly as it appears in the file
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TableRow {
    mobile: String,
    name: String,
    date: String,
    details: String,
    status: String,
    salesperson: String,
}

impl From<&OrderRecord> for TableRow {
    fn from(record: &OrderRecord) -> Self {
        Self {
            mobile: record.mobile.clone(),
            name: record.name.clone(),
            date: record.date_string(),
            details: record.details.clone(),
            status: record.status.as_str().to_string(),
            salesperson: record.salesperson.clone(),
        }
    }
}

impl TableRow {
    fn into_record(self) -> Result<OrderRecord, String> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|_| format!("invalid date '{}'", self.date))?;
        let status = self
            .status
            .parse::<OrderStatus>()
            .map_err(|e| e.to_string())?;

        Ok(OrderRecord {
            mobile: self.mobile,
            name: self.name,
            date,
            details: self.details,
            status,
            salesperson: self.salesperson,
        })
    }
}

/// Order table persisted as a CSV file
#[derive(Debug, Clone)]
pub struct CsvTableStore {
    path: PathBuf,
}

impl CsvTableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TableStore for CsvTableStore {
    async fn load(&self) -> Result<OrderTable, StorageError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_table(&path))
            .await
            .map_err(|e| StorageError::Read {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?
    }

    async fn save(&self, table: &OrderTable) -> Result<(), StorageError> {
        let path = self.path.clone();
        let bytes = encode_table(&self.path, table)?;
        tokio::task::spawn_blocking(move || write_atomic(&path, &bytes))
            .await
            .map_err(|e| StorageError::Write {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

/// Read the whole table, creating a header-only file first if none exists
pub fn read_table(path: &Path) -> Result<OrderTable, StorageError> {
    let shown = path.display().to_string();
    let read_err = |e: &dyn std::fmt::Display| StorageError::Read {
        path: shown.clone(),
        message: e.to_string(),
    };

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(read_err(&e)),
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        tracing::info!(path = %shown, "creating empty order table");
        write_atomic(path, &encode_table(path, &OrderTable::new())?)?;
        return Ok(OrderTable::new());
    }

    let bytes = bytes.strip_prefix("\u{feff}".as_bytes()).unwrap_or(&bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let headers = reader.headers().map_err(|e| read_err(&e))?.clone();
    let found: Vec<&str> = headers.iter().collect();
    if found != HEADER {
        return Err(StorageError::BadHeader {
            path: shown,
            found: found.join(","),
        });
    }

    let mut rows = Vec::new();
    for (i, row) in reader.deserialize::<TableRow>().enumerate() {
        let record = row
            .map_err(|e| e.to_string())
            .and_then(TableRow::into_record)
            .map_err(|message| StorageError::MalformedRow {
                path: shown.clone(),
                row: i + 1,
                message,
            })?;
        rows.push(record);
    }

    tracing::debug!(path = %shown, rows = rows.len(), "order table loaded");
    Ok(OrderTable::from_rows(rows))
}

/// Render the table as CSV bytes, header first
fn encode_table(path: &Path, table: &OrderTable) -> Result<Vec<u8>, StorageError> {
    let write_err = |e: &dyn std::fmt::Display| StorageError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(HEADER).map_err(|e| write_err(&e))?;
    for record in table.rows() {
        writer
            .serialize(TableRow::from(record))
            .map_err(|e| write_err(&e))?;
    }
    writer.into_inner().map_err(|e| write_err(&e))
}

/// Replace `path` with `bytes` via a synced temporary sibling and a rename
///
/// Each write gets its own uniquely named sibling, which is removed again if
/// the rename fails.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let write_err = |e: std::io::Error| StorageError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(write_err)?;

    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("orders.csv");
    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{}.tmp.", name))
        .tempfile_in(&parent)
        .map_err(write_err)?;
    tmp.write_all(bytes).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    if let Ok(dir) = fs::File::open(&parent) {
        let _ = dir.sync_all();
    }
    Ok(())
}
