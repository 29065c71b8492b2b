//! Configuration for the extraction and validation pipeline.
//!
//! All thresholds live here as explicit values passed into component
//! constructors. Components keep the configuration read-only after
//! construction, so the pipeline stays safely callable from concurrent
//! call sites.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DocsiftError;

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Document classifier configuration.
    pub classifier: ClassifierConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Field validation configuration.
    pub validation: ValidationConfig,
}

/// Document classifier configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// File size in bytes above which an unmatched document is treated as
    /// a large scan with no specific category.
    pub large_document_threshold: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            large_document_threshold: 5_000_000,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Allow fuzzy (containment) matching when resolving form-field labels.
    pub fuzzy_label_match: bool,

    /// Upper bound on transactions kept per statement; rows beyond this
    /// are dropped. OCR noise on long statements can produce runaway row
    /// counts.
    pub max_transactions: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            fuzzy_label_match: true,
            max_transactions: 1000,
        }
    }
}

/// Field validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Tolerance for bank-statement balance reconciliation (one cent).
    pub balance_tolerance: Decimal,

    /// Tolerance for income arithmetic; tax forms round to whole dollars.
    pub income_tolerance: Decimal,

    /// Tolerance for the balance-sheet identity (one cent).
    pub identity_tolerance: Decimal,

    /// Magnitude above which a monetary field is flagged as an outlier.
    pub outlier_threshold: Decimal,

    /// Required field names per category.
    pub required_fields: RequiredFields,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            balance_tolerance: Decimal::new(1, 2),
            income_tolerance: Decimal::new(100, 2),
            identity_tolerance: Decimal::new(1, 2),
            outlier_threshold: Decimal::new(1_000_000_000, 0),
            required_fields: RequiredFields::default(),
        }
    }
}

/// Required field names, per document category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RequiredFields {
    pub bank_statement: Vec<String>,
    pub tax_return: Vec<String>,
    pub business_license: Vec<String>,
    pub financial_statement: Vec<String>,
}

impl Default for RequiredFields {
    fn default() -> Self {
        fn names(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        Self {
            bank_statement: names(&[
                "account_number",
                "statement_period",
                "opening_balance",
                "closing_balance",
            ]),
            tax_return: names(&["taxpayer_name", "tax_year", "total_income"]),
            business_license: names(&[
                "business_name",
                "license_number",
                "issue_date",
                "expiration_date",
            ]),
            financial_statement: names(&[
                "company_name",
                "statement_period",
                "assets",
                "liabilities",
                "equity",
            ]),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, DocsiftError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DocsiftError::Config(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| DocsiftError::Config(format!("{}: {e}", path.display())))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), DocsiftError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| DocsiftError::Config(e.to_string()))?;
        std::fs::write(path, content)
            .map_err(|e| DocsiftError::Config(format!("{}: {e}", path.display())))
    }
}
