//! Core library for financial document data extraction and validation.
//!
//! This crate provides:
//! - Document classification from OCR text and upload metadata
//! - Category-specific field extraction (bank statements, tax returns,
//!   business licenses, financial statements)
//! - Category-specific validation with blocking errors and advisory
//!   warnings, including arithmetic consistency checks
//!
//! The pipeline consumes the output of an external document-analysis
//! engine ([`OcrResult`]: text lines, form fields, table grids) and
//! produces plain serializable data, leaving HTTP, storage, and the OCR
//! engine itself to the surrounding system.

pub mod classify;
pub mod error;
pub mod extract;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod validate;

pub use classify::DocumentClassifier;
pub use error::{DocsiftError, ExtractionError, Result};
pub use extract::DocumentExtractor;
pub use models::config::{ClassifierConfig, ExtractionConfig, PipelineConfig, ValidationConfig};
pub use models::fields::{
    DocumentCategory, DocumentMetadata, ExtractedFields, FieldValue, StatementPeriod, Transaction,
    ValidationResult,
};
pub use ocr::{OcrResult, Table, TableCell};
pub use pipeline::{DocumentPipeline, DocumentRecord};
pub use validate::DocumentValidator;
