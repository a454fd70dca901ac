//! CSV store: one file per record type, each starting with a fixed header.
//!
//! Ids are not kept anywhere else. [`CsvStore::next_id`] scans the file for
//! the highest id and [`CsvStore::append`] assigns the one after it.

mod records;

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::IoError;

pub use records::{CsvRetrospective, CsvTask, LIST_SEPARATOR};

/// A row type with its own file and header.
///
/// Field order of the serde representation must match [`CsvRecord::HEADER`].
pub trait CsvRecord: Serialize + DeserializeOwned {
    const FILE_NAME: &'static str;
    const HEADER: &'static [&'static str];

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

/// Every record type the store knows, for [`CsvStore::initialize`].
const FILES: [(&str, &[&str]); 5] = [
    (
        <scrum_core::entities::Project as CsvRecord>::FILE_NAME,
        <scrum_core::entities::Project as CsvRecord>::HEADER,
    ),
    (
        <scrum_core::entities::User as CsvRecord>::FILE_NAME,
        <scrum_core::entities::User as CsvRecord>::HEADER,
    ),
    (
        <scrum_core::entities::Sprint as CsvRecord>::FILE_NAME,
        <scrum_core::entities::Sprint as CsvRecord>::HEADER,
    ),
    (CsvTask::FILE_NAME, CsvTask::HEADER),
    (CsvRetrospective::FILE_NAME, CsvRetrospective::HEADER),
];

#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn path_for<R: CsvRecord>(&self) -> PathBuf {
        self.dir.join(R::FILE_NAME)
    }

    /// Create the directory and every missing file with its header.
    ///
    /// Existing files are left untouched. Returns the files that were created.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the directory or a file cannot be written.
    pub fn initialize(&self) -> Result<Vec<PathBuf>, IoError> {
        fs::create_dir_all(&self.dir)?;
        let mut created = Vec::new();
        for (file_name, header) in FILES {
            let path = self.dir.join(file_name);
            if path.exists() {
                continue;
            }
            write_header(&path, header)?;
            tracing::debug!(path = %path.display(), "created csv file");
            created.push(path);
        }
        Ok(created)
    }

    /// Read every row. A missing file reads as empty.
    ///
    /// Rows whose id cell is not an integer are skipped.
    ///
    /// # Errors
    ///
    /// Returns `IoError::Header` if the header row differs from the record's,
    /// or `IoError::Csv` for a row that does not deserialize.
    pub fn read_all<R: CsvRecord>(&self) -> Result<Vec<R>, IoError> {
        let path = self.path_for::<R>();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_path(&path)?;
        let headers = reader.headers()?.clone();
        check_header(&path, &headers, R::HEADER)?;

        let mut records = Vec::new();
        for (line, row) in reader.records().enumerate() {
            let row = row?;
            if row_id::<R>(&row, line).is_some() {
                records.push(row.deserialize(Some(&headers))?);
            }
        }
        Ok(records)
    }

    /// One more than the highest id in the file, or 1 for an empty file.
    ///
    /// Rows whose id cell is not an integer are skipped.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file exists but cannot be read.
    pub fn next_id<R: CsvRecord>(&self) -> Result<i64, IoError> {
        let path = self.path_for::<R>();
        if !path.exists() {
            return Ok(1);
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&path)?;

        let mut max = 0;
        for (line, row) in reader.records().enumerate() {
            if let Some(id) = row_id::<R>(&row?, line) {
                max = max.max(id);
            }
        }
        Ok(max + 1)
    }

    /// Assign the next id to `record` and append it as a new row.
    ///
    /// The file is created with its header if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read or appended to.
    pub fn append<R: CsvRecord>(&self, mut record: R) -> Result<R, IoError> {
        let path = self.path_for::<R>();
        if !path.exists() {
            fs::create_dir_all(&self.dir)?;
            write_header(&path, R::HEADER)?;
        }
        record.set_id(self.next_id::<R>()?);

        let file = OpenOptions::new().append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(&record)?;
        writer.flush()?;
        tracing::debug!(file = R::FILE_NAME, id = record.id(), "appended csv row");
        Ok(record)
    }

    /// Replace the file's contents with `records`, header first.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be written.
    pub fn write_all<R: CsvRecord>(&self, records: &[R]) -> Result<(), IoError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for::<R>();
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)?;
        writer.write_record(R::HEADER)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        tracing::debug!(file = R::FILE_NAME, rows = records.len(), "wrote csv file");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read.
    pub fn find<R: CsvRecord>(&self, id: i64) -> Result<Option<R>, IoError> {
        Ok(self.read_all::<R>()?.into_iter().find(|r| r.id() == id))
    }

    /// Remove the row with this id, rewriting the file.
    ///
    /// Returns `false` (and leaves the file alone) if no row had this id.
    /// Rows with an unparsable id are not written back.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read or rewritten.
    pub fn delete<R: CsvRecord>(&self, id: i64) -> Result<bool, IoError> {
        let mut records = self.read_all::<R>()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Ok(false);
        }
        self.write_all(&records)?;
        Ok(true)
    }
}

/// The row's id, or `None` (logged) when the id cell is not an integer.
fn row_id<R: CsvRecord>(row: &csv::StringRecord, line: usize) -> Option<i64> {
    let cell = row.get(0).unwrap_or_default();
    match cell.trim().parse::<i64>() {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::debug!(
                file = R::FILE_NAME,
                row = line + 1,
                cell,
                error = %e,
                "skipping row with unparsable id"
            );
            None
        }
    }
}

fn write_header(path: &Path, header: &[&str]) -> Result<(), IoError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(header)?;
    writer.flush()?;
    Ok(())
}

fn check_header(path: &Path, found: &csv::StringRecord, expected: &[&str]) -> Result<(), IoError> {
    if found.iter().eq(expected.iter().copied()) {
        return Ok(());
    }
    Err(IoError::Header {
        path: path.to_path_buf(),
        expected: expected.iter().map(ToString::to_string).collect(),
        found: found.iter().map(ToString::to_string).collect(),
    })
}
