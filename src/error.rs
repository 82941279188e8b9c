//! Common error types for coindex

use thiserror::Error;

/// Common result type for coindex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced at the crate boundary
///
/// Field-level problems (missing values, sentinel text, unparseable years or
/// dates) are not errors: the normalizers degrade them to documented
/// fallbacks so a single bad cell never aborts an import batch.
#[derive(Error, Debug)]
pub enum Error {
    /// Record document is not a JSON object
    #[error("Invalid record document: {0}")]
    InvalidDocument(String),

    /// JSON (de)serialization error (wraps serde_json::Error)
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
