//! Typed field values and the extracted-field mapping produced per document.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category of a processed document.
///
/// The set is closed: the classifier only ever emits these values, and the
/// extractor and validator carry a ruleset for each non-`Other` member.
/// Adding a category means adding handlers in all three components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    /// Bank account statement.
    BankStatement,
    /// Personal or business tax return.
    TaxReturn,
    /// Business license or operating permit.
    BusinessLicense,
    /// Balance sheet / income statement.
    FinancialStatement,
    /// Anything without category-specific rules.
    Other,
}

impl DocumentCategory {
    /// Snake-case name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::BankStatement => "bank_statement",
            DocumentCategory::TaxReturn => "tax_return",
            DocumentCategory::BusinessLicense => "business_license",
            DocumentCategory::FinancialStatement => "financial_statement",
            DocumentCategory::Other => "other",
        }
    }

    /// Parse a category from its snake-case name.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bank_statement" => Some(DocumentCategory::BankStatement),
            "tax_return" => Some(DocumentCategory::TaxReturn),
            "business_license" => Some(DocumentCategory::BusinessLicense),
            "financial_statement" => Some(DocumentCategory::FinancialStatement),
            "other" => Some(DocumentCategory::Other),
            _ => None,
        }
    }

    /// Whether an extraction/validation ruleset exists for this category.
    pub fn has_ruleset(&self) -> bool {
        !matches!(self, DocumentCategory::Other)
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upload metadata available to the classifier alongside the document text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Original file name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// File size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,

    /// MIME type reported at upload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Start/end date pair covered by a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatementPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// A single transaction row from a bank statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// Transaction date, when a date cell parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    /// Free-text description.
    pub description: String,

    /// Signed amount: deposits positive, withdrawals negative.
    pub amount: Decimal,

    /// Running balance after the transaction, if the statement prints one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
}

/// A typed field value.
///
/// A labeled value that was located but failed to parse into its expected
/// shape is kept as `Text` so the malformation is reported by validation
/// rather than silently dropped during extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Monetary or other decimal value.
    Amount(Decimal),
    /// Calendar date.
    Date(NaiveDate),
    /// Four-digit year.
    Year(i32),
    /// Date range covered by a statement.
    Period(StatementPeriod),
    /// Ordered transaction list.
    Transactions(Vec<Transaction>),
    /// Named numeric breakdown (deductions, balance-sheet components).
    Breakdown(BTreeMap<String, Decimal>),
    /// Raw text.
    Text(String),
}

impl FieldValue {
    pub fn as_amount(&self) -> Option<Decimal> {
        match self {
            FieldValue::Amount(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_year(&self) -> Option<i32> {
        match self {
            FieldValue::Year(y) => Some(*y),
            _ => None,
        }
    }

    pub fn as_period(&self) -> Option<&StatementPeriod> {
        match self {
            FieldValue::Period(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_transactions(&self) -> Option<&[Transaction]> {
        match self {
            FieldValue::Transactions(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_breakdown(&self) -> Option<&BTreeMap<String, Decimal>> {
        match self {
            FieldValue::Breakdown(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Total numeric value: the amount itself, or the sum of breakdown
    /// entries. `None` for non-numeric values.
    pub fn numeric_total(&self) -> Option<Decimal> {
        match self {
            FieldValue::Amount(a) => Some(*a),
            FieldValue::Breakdown(b) => Some(b.values().copied().sum()),
            _ => None,
        }
    }
}

/// Mapping from field name to extracted value.
///
/// Produced fresh per document and never mutated after return. A field the
/// category defines but extraction could not locate is simply absent; the
/// validator's required-field check is where that becomes visible.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedFields(BTreeMap<String, FieldValue>);

impl ExtractedFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.0.insert(name.into(), value);
    }

    /// Insert only when the getter produced a value; `None` leaves the
    /// field absent.
    pub fn insert_opt(&mut self, name: impl Into<String>, value: Option<FieldValue>) {
        if let Some(value) = value {
            self.0.insert(name.into(), value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }
}

/// Outcome of validating an extracted-field mapping.
///
/// Errors mean the data cannot be trusted downstream; warnings flag
/// plausible-but-suspicious data for human review.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// No blocking errors were found.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_category_round_trip() {
        for category in [
            DocumentCategory::BankStatement,
            DocumentCategory::TaxReturn,
            DocumentCategory::BusinessLicense,
            DocumentCategory::FinancialStatement,
            DocumentCategory::Other,
        ] {
            assert_eq!(DocumentCategory::from_str(category.as_str()), Some(category));
        }
        assert_eq!(DocumentCategory::from_str("receipt"), None);
    }

    #[test]
    fn test_has_ruleset() {
        assert!(DocumentCategory::BankStatement.has_ruleset());
        assert!(!DocumentCategory::Other.has_ruleset());
    }

    #[test]
    fn test_numeric_total_of_breakdown() {
        let mut breakdown = BTreeMap::new();
        breakdown.insert("cash".to_string(), Decimal::from_str("1000.00").unwrap());
        breakdown.insert("inventory".to_string(), Decimal::from_str("250.50").unwrap());

        let value = FieldValue::Breakdown(breakdown);
        assert_eq!(value.numeric_total(), Some(Decimal::from_str("1250.50").unwrap()));

        let text = FieldValue::Text("n/a".to_string());
        assert_eq!(text.numeric_total(), None);
    }

    #[test]
    fn test_insert_opt_leaves_field_absent() {
        let mut fields = ExtractedFields::new();
        fields.insert_opt("present", Some(FieldValue::Year(2023)));
        fields.insert_opt("absent", None);

        assert!(fields.contains("present"));
        assert!(!fields.contains("absent"));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_validation_result_severity() {
        let mut result = ValidationResult::new();
        assert!(result.is_valid());

        result.warning("suspicious value");
        assert!(result.is_valid());

        result.error("missing field");
        assert!(!result.is_valid());
    }
}
