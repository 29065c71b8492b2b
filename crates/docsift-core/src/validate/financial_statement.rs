//! Financial statement validation rules.

use crate::models::config::ValidationConfig;
use crate::models::fields::{ExtractedFields, FieldValue, ValidationResult};

use super::{check_outliers, check_required, numeric};

pub(super) fn validate(fields: &ExtractedFields, config: &ValidationConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_required(
        fields,
        &config.required_fields.financial_statement,
        &mut result,
    );

    if let Some(value) = fields.get("statement_period") {
        match value {
            FieldValue::Period(period) if period.start <= period.end => {}
            FieldValue::Period(period) => result.error(format!(
                "Statement period starts {} after it ends {}",
                period.start, period.end
            )),
            _ => result.error("Invalid statement period format"),
        }
    }

    for name in ["revenue", "expenses", "net_income", "assets", "liabilities", "equity"] {
        if let Some(value) = fields.get(name) {
            if value.numeric_total().is_none() {
                result.error(format!(
                    "Invalid {}: not a numeric value",
                    name.replace('_', " ")
                ));
            }
        }
    }

    // The balance-sheet identity is closed-form, so a violation is an
    // error rather than a heuristic warning.
    let assets = numeric(fields, "assets");
    let liabilities = numeric(fields, "liabilities");
    let equity = numeric(fields, "equity");
    if let (Some(assets), Some(liabilities), Some(equity)) = (assets, liabilities, equity) {
        let expected = liabilities + equity;
        if (assets - expected).abs() > config.identity_tolerance {
            result.error(format!(
                "Balance sheet does not balance: assets {assets} != liabilities {liabilities} + equity {equity}"
            ));
        }
    }

    let revenue = numeric(fields, "revenue");
    let expenses = numeric(fields, "expenses");
    let net_income = numeric(fields, "net_income");
    if let (Some(revenue), Some(expenses), Some(net_income)) = (revenue, expenses, net_income) {
        let expected = revenue - expenses;
        if (net_income - expected).abs() > config.income_tolerance {
            result.warning(format!(
                "Net income {net_income} is inconsistent with revenue less expenses (expected {expected})"
            ));
        }
    }

    check_outliers(
        fields,
        &["revenue", "assets", "liabilities", "equity", "net_income"],
        config.outlier_threshold,
        &mut result,
    );

    result
}
