//! # scrum-io
//!
//! File stores for the scrumkit entities, one file per entity type:
//!
//! - [`csv_store::CsvStore`]: fixed header rows, ids assigned by scanning
//!   the file for the current maximum.
//! - [`xml_store::XmlStore`]: ids and foreign keys as attributes, scalar
//!   fields as child elements, lists wrapped in a parent element.

pub mod csv_store;
pub mod error;
pub mod xml_store;

pub use error::IoError;
