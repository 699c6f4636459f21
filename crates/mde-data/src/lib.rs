//! Record store collaborators for the movie data explorer
//!
//! Implements the `RecordStore` interface from `mde-core` and converts
//! externally loaded movie documents into engine records. Where the records
//! come from (file, database, network) is the host's concern.

pub mod movies;
pub mod store;

use thiserror::Error;

// Re-exports
pub use movies::record_from_document;
pub use store::MemoryStore;

/// Errors that can occur when building records from external documents
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("document is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' has unexpected value: {value}")]
    InvalidField { field: &'static str, value: String },

    #[error("document is not a JSON object")]
    NotAnObject,
}
