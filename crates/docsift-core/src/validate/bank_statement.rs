//! Bank statement validation rules.

use rust_decimal::Decimal;

use crate::extract::rules::patterns;
use crate::models::config::ValidationConfig;
use crate::models::fields::{ExtractedFields, FieldValue, ValidationResult};

use super::{check_outliers, check_required};

pub(super) fn validate(fields: &ExtractedFields, config: &ValidationConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_required(fields, &config.required_fields.bank_statement, &mut result);

    if let Some(value) = fields.get("account_number") {
        match value.as_text() {
            Some(s) if patterns::ACCOUNT_NUMBER_FORMAT.is_match(s) => {}
            _ => result.error("Invalid account number format"),
        }
    }

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

    for name in ["opening_balance", "closing_balance"] {
        if let Some(value) = fields.get(name) {
            if value.as_amount().is_none() {
                result.error(format!("Invalid {}: not an amount", name.replace('_', " ")));
            }
        }
    }

    let transactions = fields
        .get("transactions")
        .and_then(|value| value.as_transactions())
        .unwrap_or(&[]);

    for (i, tx) in transactions.iter().enumerate() {
        if tx.date.is_none() {
            result.warning(format!(
                "Transaction {} (\"{}\") has no parseable date",
                i + 1,
                tx.description
            ));
        }
    }

    // Reconciliation is a warning, not an error: OCR transaction lists
    // are frequently incomplete.
    let opening = fields.get("opening_balance").and_then(|v| v.as_amount());
    let closing = fields.get("closing_balance").and_then(|v| v.as_amount());
    if let (Some(opening), Some(closing)) = (opening, closing) {
        let activity: Decimal = transactions.iter().map(|tx| tx.amount).sum();
        let expected = opening + activity;
        if (closing - expected).abs() > config.balance_tolerance {
            result.warning(format!(
                "Closing balance {closing} does not reconcile with opening balance plus transactions (expected {expected})"
            ));
        }
    }

    check_outliers(
        fields,
        &["opening_balance", "closing_balance"],
        config.outlier_threshold,
        &mut result,
    );

    result
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::str::FromStr;

    use super::*;
    use crate::models::fields::{StatementPeriod, Transaction};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tx(day: u32, description: &str, amount: &str) -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2023, 1, day),
            description: description.to_string(),
            amount: dec(amount),
            balance: None,
        }
    }

    fn complete_fields() -> ExtractedFields {
        let mut fields = ExtractedFields::new();
        fields.insert("account_number", FieldValue::Text("1234567890".to_string()));
        fields.insert(
            "statement_period",
            FieldValue::Period(StatementPeriod {
                start: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
            }),
        );
        fields.insert("opening_balance", FieldValue::Amount(dec("1000.00")));
        fields.insert("closing_balance", FieldValue::Amount(dec("1500.00")));
        fields.insert(
            "transactions",
            FieldValue::Transactions(vec![
                tx(5, "Deposit", "500.00"),
                tx(15, "Withdrawal", "-200.00"),
                tx(25, "Deposit", "200.00"),
            ]),
        );
        fields
    }

    #[test]
    fn test_reconciled_statement_is_clean() {
        let result = validate(&complete_fields(), &ValidationConfig::default());
        assert!(result.errors.is_empty(), "{:?}", result.errors);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_missing_required_fields() {
        let result = validate(&ExtractedFields::new(), &ValidationConfig::default());
        assert_eq!(
            result.errors,
            vec![
                "Missing required field: account_number".to_string(),
                "Missing required field: statement_period".to_string(),
                "Missing required field: opening_balance".to_string(),
                "Missing required field: closing_balance".to_string(),
            ]
        );
    }

    #[test]
    fn test_invalid_account_number() {
        let mut fields = complete_fields();
        fields.insert("account_number", FieldValue::Text("12-AB".to_string()));

        let result = validate(&fields, &ValidationConfig::default());
        assert!(result.errors.contains(&"Invalid account number format".to_string()));
    }

    #[test]
    fn test_balance_tolerance_law() {
        let config = ValidationConfig::default();

        // Within epsilon: no reconciliation warning.
        let mut fields = complete_fields();
        fields.insert("closing_balance", FieldValue::Amount(dec("1500.01")));
        let result = validate(&fields, &config);
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);

        // Outside epsilon: exactly one.
        fields.insert("closing_balance", FieldValue::Amount(dec("1500.02")));
        let result = validate(&fields, &config);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("does not reconcile"));
    }

    #[test]
    fn test_no_transactions_still_reconciles() {
        let mut fields = complete_fields();
        fields.insert("transactions", FieldValue::Transactions(Vec::new()));
        fields.insert("closing_balance", FieldValue::Amount(dec("1000.00")));

        let result = validate(&fields, &ValidationConfig::default());
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_unparseable_period_is_error() {
        let mut fields = complete_fields();
        fields.insert("statement_period", FieldValue::Text("Jan-ish".to_string()));

        let result = validate(&fields, &ValidationConfig::default());
        assert!(result
            .errors
            .contains(&"Invalid statement period format".to_string()));
    }

    #[test]
    fn test_undated_transaction_warns() {
        let mut fields = complete_fields();
        fields.insert(
            "transactions",
            FieldValue::Transactions(vec![
                Transaction {
                    date: None,
                    description: "Deposit".to_string(),
                    amount: dec("500.00"),
                    balance: None,
                },
                tx(15, "Withdrawal", "0.00"),
            ]),
        );

        let result = validate(&fields, &ValidationConfig::default());
        assert!(result.warnings.iter().any(|w| w.contains("no parseable date")));
    }

    #[test]
    fn test_outlier_balance_warns() {
        let mut fields = complete_fields();
        fields.insert(
            "opening_balance",
            FieldValue::Amount(dec("2000000000.00")),
        );

        let result = validate(&fields, &ValidationConfig::default());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("Unusually large value for opening_balance")));
    }
}
