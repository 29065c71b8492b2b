//! Data models shared across the pipeline.

pub mod config;
pub mod fields;

pub use config::{ClassifierConfig, ExtractionConfig, PipelineConfig, ValidationConfig};
pub use fields::{
    DocumentCategory, DocumentMetadata, ExtractedFields, FieldValue, StatementPeriod, Transaction,
    ValidationResult,
};
