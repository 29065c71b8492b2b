//! Category-specific field extraction.
//!
//! One ruleset per document category turns an OCR result into a flat
//! mapping of named, typed fields. Every field-getter is independently
//! best-effort: a field that cannot be located is left out of the mapping
//! rather than failing the call, so partially readable documents still
//! extract. Only a category with no ruleset at all is an error.

mod bank_statement;
mod business_license;
mod financial_statement;
pub mod rules;
mod tax_return;

use tracing::info;

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::fields::{DocumentCategory, ExtractedFields};
use crate::ocr::OcrResult;

/// Rule-based field extractor over the closed category set.
#[derive(Debug, Clone, Default)]
pub struct DocumentExtractor {
    config: ExtractionConfig,
}

impl DocumentExtractor {
    /// Create an extractor with the given configuration.
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Extract the category's field set from an OCR result.
    ///
    /// Returns a partial mapping when fields are missing or unreadable;
    /// fails only for a category without a registered ruleset.
    pub fn extract(
        &self,
        ocr: &OcrResult,
        category: DocumentCategory,
    ) -> Result<ExtractedFields, ExtractionError> {
        let fields = match category {
            DocumentCategory::BankStatement => bank_statement::extract(ocr, &self.config),
            DocumentCategory::TaxReturn => tax_return::extract(ocr, &self.config),
            DocumentCategory::BusinessLicense => business_license::extract(ocr, &self.config),
            DocumentCategory::FinancialStatement => financial_statement::extract(ocr, &self.config),
            DocumentCategory::Other => {
                return Err(ExtractionError::UnsupportedCategory(category));
            }
        };

        info!(
            "extracted {} fields using {} rules",
            fields.len(),
            category
        );
        Ok(fields)
    }
}
