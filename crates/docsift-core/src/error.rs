//! Error types for the docsift-core library.

use thiserror::Error;

use crate::models::fields::DocumentCategory;

/// Main error type for the docsift library.
#[derive(Error, Debug)]
pub enum DocsiftError {
    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to document field extraction.
///
/// Individual field lookups never fail; a field that cannot be located is
/// simply absent from the extracted mapping and surfaces later as a
/// missing-field validation error. The only extraction-level fault is a
/// category with no registered ruleset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The category has no extraction ruleset registered.
    #[error("no extraction rules registered for document category: {0}")]
    UnsupportedCategory(DocumentCategory),
}

/// Result type for the docsift library.
pub type Result<T> = std::result::Result<T, DocsiftError>;
