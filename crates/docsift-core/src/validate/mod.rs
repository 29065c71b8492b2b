//! Category-specific validation of extracted fields.
//!
//! Validation never raises: missing required fields and malformed present
//! fields become errors, cross-field arithmetic mismatches and magnitude
//! outliers become warnings, and an unrecognized category is itself
//! reported through the result. The accounting identity is the one
//! arithmetic check treated as an error, being a closed-form identity
//! rather than a heuristic.

mod bank_statement;
mod business_license;
mod financial_statement;
mod tax_return;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;

use crate::models::config::ValidationConfig;
use crate::models::fields::{DocumentCategory, ExtractedFields, ValidationResult};

/// Rule-based validator over the closed category set.
#[derive(Debug, Clone, Default)]
pub struct DocumentValidator {
    config: ValidationConfig,
    reference_date: Option<NaiveDate>,
}

impl DocumentValidator {
    /// Create a validator with the given configuration.
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            config,
            reference_date: None,
        }
    }

    /// Pin "today" for expiry and tax-year checks; defaults to the current
    /// UTC date.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Validate an extracted-field mapping against the category's rules.
    pub fn validate(
        &self,
        fields: &ExtractedFields,
        category: DocumentCategory,
    ) -> ValidationResult {
        let result = match category {
            DocumentCategory::BankStatement => bank_statement::validate(fields, &self.config),
            DocumentCategory::TaxReturn => {
                tax_return::validate(fields, &self.config, self.today())
            }
            DocumentCategory::BusinessLicense => {
                business_license::validate(fields, &self.config, self.today())
            }
            DocumentCategory::FinancialStatement => {
                financial_statement::validate(fields, &self.config)
            }
            DocumentCategory::Other => {
                let mut result = ValidationResult::new();
                result.error(format!(
                    "No validation rules for document category: {category}"
                ));
                result
            }
        };

        info!(
            "validated {} fields: {} errors, {} warnings",
            category,
            result.errors.len(),
            result.warnings.len()
        );
        result
    }
}

/// Append one error per missing required field, named after the field.
fn check_required(fields: &ExtractedFields, required: &[String], result: &mut ValidationResult) {
    for name in required {
        if !fields.contains(name) {
            result.error(format!("Missing required field: {name}"));
        }
    }
}

/// Numeric value of a field: an amount, or a breakdown's entry sum.
fn numeric(fields: &ExtractedFields, name: &str) -> Option<Decimal> {
    fields.get(name).and_then(|value| value.numeric_total())
}

/// Warn on monetary magnitudes beyond the configured bound.
fn check_outliers(
    fields: &ExtractedFields,
    names: &[&str],
    threshold: Decimal,
    result: &mut ValidationResult,
) {
    for name in names {
        if let Some(value) = numeric(fields, name) {
            if value.abs() > threshold {
                result.warning(format!("Unusually large value for {name}: {value}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_reports_single_error() {
        let validator = DocumentValidator::default();
        let result = validator.validate(&ExtractedFields::new(), DocumentCategory::Other);

        assert_eq!(
            result.errors,
            vec!["No validation rules for document category: other".to_string()]
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_missing_required_field_messages() {
        let validator = DocumentValidator::default();
        let result = validator.validate(&ExtractedFields::new(), DocumentCategory::TaxReturn);

        assert_eq!(
            result.errors,
            vec![
                "Missing required field: taxpayer_name".to_string(),
                "Missing required field: tax_year".to_string(),
                "Missing required field: total_income".to_string(),
            ]
        );
    }

    #[test]
    fn test_outlier_threshold_is_configurable() {
        use crate::models::fields::FieldValue;

        let mut fields = ExtractedFields::new();
        fields.insert("opening_balance", FieldValue::Amount(Decimal::new(500, 0)));

        let config = ValidationConfig {
            outlier_threshold: Decimal::new(100, 0),
            ..ValidationConfig::default()
        };
        let mut result = ValidationResult::new();
        check_outliers(
            &fields,
            &["opening_balance"],
            config.outlier_threshold,
            &mut result,
        );
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("opening_balance"));
    }
}
