//! Classify → extract → validate, as one call.

use serde::Serialize;

use crate::classify::DocumentClassifier;
use crate::error::ExtractionError;
use crate::extract::DocumentExtractor;
use crate::models::config::PipelineConfig;
use crate::models::fields::{DocumentCategory, DocumentMetadata, ExtractedFields, ValidationResult};
use crate::ocr::OcrResult;
use crate::validate::DocumentValidator;

/// Structured record produced for one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRecord {
    /// Assigned category.
    pub category: DocumentCategory,

    /// Extracted field mapping (possibly partial).
    pub fields: ExtractedFields,

    /// Errors and warnings from validation.
    pub validation: ValidationResult,
}

/// The full extraction pipeline.
///
/// Holds only read-only rule configuration, so one instance can serve
/// concurrent call sites.
#[derive(Debug, Clone, Default)]
pub struct DocumentPipeline {
    classifier: DocumentClassifier,
    extractor: DocumentExtractor,
    validator: DocumentValidator,
}

impl DocumentPipeline {
    /// Wire up all three components from one configuration value.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            classifier: DocumentClassifier::new(config.classifier),
            extractor: DocumentExtractor::new(config.extraction),
            validator: DocumentValidator::new(config.validation),
        }
    }

    /// Classify a document and run extraction and validation for the
    /// resulting category.
    ///
    /// Documents classified `Other` have no structured extraction and
    /// surface as [`ExtractionError::UnsupportedCategory`]; the caller
    /// decides how to shelve them.
    pub fn process(
        &self,
        ocr: &OcrResult,
        metadata: &DocumentMetadata,
    ) -> Result<DocumentRecord, ExtractionError> {
        let category = self.classifier.classify(&ocr.full_text(), metadata);
        self.process_classified(ocr, category)
    }

    /// Run extraction and validation for an already-known category.
    pub fn process_classified(
        &self,
        ocr: &OcrResult,
        category: DocumentCategory,
    ) -> Result<DocumentRecord, ExtractionError> {
        let fields = self.extractor.extract(ocr, category)?;
        let validation = self.validator.validate(&fields, category);
        Ok(DocumentRecord {
            category,
            fields,
            validation,
        })
    }
}
