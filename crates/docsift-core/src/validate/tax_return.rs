//! Tax return validation rules.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::extract::rules::patterns;
use crate::models::config::ValidationConfig;
use crate::models::fields::{ExtractedFields, FieldValue, ValidationResult};

use super::{check_outliers, check_required};

pub(super) fn validate(
    fields: &ExtractedFields,
    config: &ValidationConfig,
    today: NaiveDate,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_required(fields, &config.required_fields.tax_return, &mut result);

    if let Some(value) = fields.get("tax_year") {
        match value.as_year() {
            Some(year) if (1900..=today.year() + 1).contains(&year) => {}
            Some(year) => result.error(format!("Invalid tax year: {year}")),
            None => result.error("Invalid tax year format"),
        }
    }

    for name in ["total_income", "taxable_income", "tax_paid"] {
        if let Some(value) = fields.get(name) {
            if value.as_amount().is_none() {
                result.error(format!("Invalid {}: not an amount", name.replace('_', " ")));
            }
        }
    }

    if let Some(FieldValue::Text(ssn)) = fields.get("ssn") {
        if !patterns::SSN_FORMAT.is_match(ssn) {
            result.error("Invalid Social Security Number format");
        }
    }

    if let Some(FieldValue::Text(ein)) = fields.get("ein") {
        if !patterns::EIN_FORMAT.is_match(ein) {
            result.error("Invalid Employer Identification Number format");
        }
    }

    // Heuristic consistency check: tax software rounds, OCR drops digits.
    let total = fields.get("total_income").and_then(|v| v.as_amount());
    let taxable = fields.get("taxable_income").and_then(|v| v.as_amount());
    let deductions: Option<Decimal> = fields
        .get("deductions_credits")
        .and_then(|v| v.as_breakdown())
        .map(|b| b.values().copied().sum());

    if let (Some(total), Some(taxable), Some(deductions)) = (total, taxable, deductions) {
        let expected = total - deductions;
        if (taxable - expected).abs() > config.income_tolerance {
            result.warning(format!(
                "Taxable income {taxable} is inconsistent with total income less deductions (expected {expected})"
            ));
        }
    }

    check_outliers(
        fields,
        &["total_income", "taxable_income", "tax_paid"],
        config.outlier_threshold,
        &mut result,
    );

    result
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
    }

    fn complete_fields() -> ExtractedFields {
        let mut fields = ExtractedFields::new();
        fields.insert("taxpayer_name", FieldValue::Text("Jane Smith".to_string()));
        fields.insert("tax_year", FieldValue::Year(2022));
        fields.insert("total_income", FieldValue::Amount(dec("85000.00")));
        fields.insert("taxable_income", FieldValue::Amount(dec("71150.00")));
        fields.insert("tax_paid", FieldValue::Amount(dec("9800.00")));

        let mut deductions = BTreeMap::new();
        deductions.insert("standard deduction".to_string(), dec("13850.00"));
        fields.insert("deductions_credits", FieldValue::Breakdown(deductions));
        fields
    }

    #[test]
    fn test_consistent_return_is_clean() {
        let result = validate(&complete_fields(), &ValidationConfig::default(), today());
        assert!(result.errors.is_empty(), "{:?}", result.errors);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_missing_total_income() {
        let mut fields = ExtractedFields::new();
        fields.insert("taxpayer_name", FieldValue::Text("Jane Smith".to_string()));
        fields.insert("tax_year", FieldValue::Year(2022));

        let result = validate(&fields, &ValidationConfig::default(), today());
        assert_eq!(
            result.errors,
            vec!["Missing required field: total_income".to_string()]
        );
    }

    #[test]
    fn test_invalid_tax_year() {
        let mut fields = complete_fields();
        fields.insert("tax_year", FieldValue::Year(2199));
        let result = validate(&fields, &ValidationConfig::default(), today());
        assert!(result.errors.contains(&"Invalid tax year: 2199".to_string()));

        fields.insert("tax_year", FieldValue::Text("2O22".to_string()));
        let result = validate(&fields, &ValidationConfig::default(), today());
        assert!(result.errors.contains(&"Invalid tax year format".to_string()));
    }

    #[test]
    fn test_id_number_formats() {
        let mut fields = complete_fields();
        fields.insert("ssn", FieldValue::Text("123-45-6789".to_string()));
        fields.insert("ein", FieldValue::Text("12-3456789".to_string()));
        let result = validate(&fields, &ValidationConfig::default(), today());
        assert!(result.errors.is_empty(), "{:?}", result.errors);

        fields.insert("ssn", FieldValue::Text("123456789".to_string()));
        fields.insert("ein", FieldValue::Text("1-2345678".to_string()));
        let result = validate(&fields, &ValidationConfig::default(), today());
        assert!(result
            .errors
            .contains(&"Invalid Social Security Number format".to_string()));
        assert!(result
            .errors
            .contains(&"Invalid Employer Identification Number format".to_string()));
    }

    #[test]
    fn test_income_consistency_warning() {
        let mut fields = complete_fields();
        // 85,000 - 13,850 = 71,150; claim 60,000 instead.
        fields.insert("taxable_income", FieldValue::Amount(dec("60000.00")));

        let result = validate(&fields, &ValidationConfig::default(), today());
        assert!(result.errors.is_empty(), "{:?}", result.errors);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("inconsistent with total income"));
    }

    #[test]
    fn test_rounding_within_tolerance() {
        let mut fields = complete_fields();
        // Whole-dollar rounding: off by one dollar exactly.
        fields.insert("taxable_income", FieldValue::Amount(dec("71151.00")));

        let result = validate(&fields, &ValidationConfig::default(), today());
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }
}
