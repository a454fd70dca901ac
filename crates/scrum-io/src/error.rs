//! Error types for the file stores.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The file's header row is not the one this record type writes.
    #[error("{path}: unexpected header {found:?}, expected {expected:?}")]
    Header {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("XML write error: {0}")]
    XmlWrite(#[from] quick_xml::errors::serialize::SeError),

    #[error("XML read error: {0}")]
    XmlRead(#[from] quick_xml::errors::serialize::DeError),

    /// A stored record cannot be turned back into an entity.
    #[error("Invalid record: {0}")]
    Invalid(String),
}
