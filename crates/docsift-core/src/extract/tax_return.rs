//! Tax return field extraction.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::config::ExtractionConfig;
use crate::models::fields::{ExtractedFields, FieldValue};
use crate::ocr::OcrResult;

use super::rules::{self, patterns};

pub(super) fn extract(ocr: &OcrResult, config: &ExtractionConfig) -> ExtractedFields {
    let text = ocr.full_text();
    let fuzzy = config.fuzzy_label_match;
    let mut fields = ExtractedFields::new();

    fields.insert_opt(
        "taxpayer_name",
        rules::labeled_text(
            ocr,
            &text,
            &["taxpayer name", "name of taxpayer", "taxpayer", "name"],
            &patterns::TAXPAYER_NAME,
            fuzzy,
        )
        .map(FieldValue::Text),
    );
    fields.insert_opt("tax_year", tax_year(ocr, &text, fuzzy));
    fields.insert_opt(
        "total_income",
        rules::labeled_amount(
            ocr,
            &text,
            &["total income", "gross income"],
            &patterns::TOTAL_INCOME,
            fuzzy,
        ),
    );
    fields.insert_opt(
        "taxable_income",
        rules::labeled_amount(
            ocr,
            &text,
            &["taxable income"],
            &patterns::TAXABLE_INCOME,
            fuzzy,
        ),
    );
    fields.insert_opt(
        "tax_paid",
        rules::labeled_amount(
            ocr,
            &text,
            &["total tax", "tax paid", "tax withheld", "tax due"],
            &patterns::TAX_PAID,
            fuzzy,
        ),
    );
    fields.insert_opt("deductions_credits", deductions_credits(ocr, &text));
    fields.insert_opt("ssn", identifier(ocr, &text, &["ssn", "social security number"], &patterns::SSN, fuzzy));
    fields.insert_opt(
        "ein",
        identifier(
            ocr,
            &text,
            &["ein", "employer identification number"],
            &patterns::EIN,
            fuzzy,
        ),
    );

    fields
}

fn tax_year(ocr: &OcrResult, text: &str, fuzzy: bool) -> Option<FieldValue> {
    if let Some(raw) = rules::lookup(&ocr.form_fields, &["tax year", "year"], fuzzy) {
        return Some(match raw.trim().parse::<i32>() {
            Ok(year) => FieldValue::Year(year),
            Err(_) => FieldValue::Text(raw.trim().to_string()),
        });
    }

    patterns::TAX_YEAR
        .captures(text)
        .and_then(|caps| caps[1].parse::<i32>().ok())
        .map(FieldValue::Year)
}

/// Identifier getter (SSN/EIN): the value is passed through as found so
/// the validator can flag malformed formats.
fn identifier(
    ocr: &OcrResult,
    text: &str,
    aliases: &[&str],
    pattern: &regex::Regex,
    fuzzy: bool,
) -> Option<FieldValue> {
    rules::lookup(&ocr.form_fields, aliases, fuzzy)
        .map(|raw| raw.trim().to_string())
        .or_else(|| pattern.find(text).map(|m| m.as_str().to_string()))
        .map(FieldValue::Text)
}

/// Deduction/credit name → amount, gathered from form fields, table rows,
/// and labeled text lines.
fn deductions_credits(ocr: &OcrResult, text: &str) -> Option<FieldValue> {
    let mut breakdown: BTreeMap<String, Decimal> = BTreeMap::new();

    for (label, value) in &ocr.form_fields {
        let normalized = rules::normalize_label(label);
        if normalized.contains("deduction") || normalized.contains("credit") {
            if let Some(amount) = rules::parse_amount(value) {
                breakdown.entry(normalized).or_insert(amount);
            }
        }
    }

    for table in ocr.tables() {
        let relevant = table.iter().flatten().any(|cell| {
            let cell = cell.to_lowercase();
            cell.contains("deduction") || cell.contains("credit")
        });
        if !relevant {
            continue;
        }
        for row in &table {
            if let Some((name, amount)) = name_amount_row(row) {
                breakdown.entry(name).or_insert(amount);
            }
        }
    }

    for caps in patterns::DEDUCTION_LINE.captures_iter(text) {
        if let Some(amount) = rules::parse_amount(&caps[2]) {
            breakdown
                .entry(rules::normalize_label(&caps[1]))
                .or_insert(amount);
        }
    }

    (!breakdown.is_empty()).then(|| FieldValue::Breakdown(breakdown))
}

/// Split a two-part row into (name, amount) when exactly that shape holds.
fn name_amount_row(row: &[String]) -> Option<(String, Decimal)> {
    let amount = row
        .iter()
        .rev()
        .find_map(|cell| rules::is_amount(cell.trim()).then(|| rules::parse_amount(cell)).flatten())?;
    let name = row
        .iter()
        .map(|s| s.trim())
        .find(|s| !s.is_empty() && !rules::is_amount(s))?;

    let name = rules::normalize_label(name);
    (!name.is_empty() && name != "total").then_some((name, amount))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_extract_from_form_fields() {
        let mut ocr = OcrResult::new();
        ocr.form_fields
            .insert("Taxpayer Name:".to_string(), "Jane Smith".to_string());
        ocr.form_fields
            .insert("Tax Year:".to_string(), "2022".to_string());
        ocr.form_fields
            .insert("Total Income:".to_string(), "$85,000.00".to_string());
        ocr.form_fields
            .insert("Taxable Income:".to_string(), "$71,150.00".to_string());
        ocr.form_fields
            .insert("Total Tax:".to_string(), "$9,800.00".to_string());
        ocr.form_fields
            .insert("SSN:".to_string(), "123-45-6789".to_string());

        let fields = extract(&ocr, &ExtractionConfig::default());

        assert_eq!(
            fields.get("taxpayer_name"),
            Some(&FieldValue::Text("Jane Smith".to_string()))
        );
        assert_eq!(fields.get("tax_year"), Some(&FieldValue::Year(2022)));
        assert_eq!(
            fields.get("total_income"),
            Some(&FieldValue::Amount(dec("85000.00")))
        );
        assert_eq!(
            fields.get("tax_paid"),
            Some(&FieldValue::Amount(dec("9800.00")))
        );
        assert_eq!(
            fields.get("ssn"),
            Some(&FieldValue::Text("123-45-6789".to_string()))
        );
    }

    #[test]
    fn test_extract_from_text_fallback() {
        let mut ocr = OcrResult::new();
        ocr.lines = vec![
            "Form 1040 - U.S. Individual Income Tax Return".to_string(),
            "Tax Year: 2022".to_string(),
            "Total Income: $85,000.00".to_string(),
            "Taxable Income: $71,150.00".to_string(),
        ];

        let fields = extract(&ocr, &ExtractionConfig::default());

        assert_eq!(fields.get("tax_year"), Some(&FieldValue::Year(2022)));
        assert_eq!(
            fields.get("total_income"),
            Some(&FieldValue::Amount(dec("85000.00")))
        );
        assert_eq!(
            fields.get("taxable_income"),
            Some(&FieldValue::Amount(dec("71150.00")))
        );
    }

    #[test]
    fn test_deductions_from_lines_and_tables() {
        let mut ocr = OcrResult::new();
        ocr.lines = vec![
            "Standard deduction: 13,850.00".to_string(),
            "Child tax credit 2,000.00".to_string(),
        ];
        ocr.push_table(&[
            ["Deductions", "Amount"],
            ["Charitable contributions", "500.00"],
        ]);

        let fields = extract(&ocr, &ExtractionConfig::default());
        let breakdown = fields
            .get("deductions_credits")
            .unwrap()
            .as_breakdown()
            .unwrap();

        assert_eq!(breakdown.get("standard deduction"), Some(&dec("13850.00")));
        assert_eq!(breakdown.get("child tax credit"), Some(&dec("2000.00")));
        assert_eq!(
            breakdown.get("charitable contributions"),
            Some(&dec("500.00"))
        );
    }

    #[test]
    fn test_missing_fields_stay_absent() {
        let mut ocr = OcrResult::new();
        ocr.lines = vec!["Form 1040".to_string()];

        let fields = extract(&ocr, &ExtractionConfig::default());
        assert!(!fields.contains("total_income"));
        assert!(!fields.contains("tax_year"));
    }

    #[test]
    fn test_malformed_year_kept_as_text() {
        let mut ocr = OcrResult::new();
        ocr.form_fields
            .insert("Tax Year".to_string(), "2O22".to_string());

        let fields = extract(&ocr, &ExtractionConfig::default());
        assert_eq!(
            fields.get("tax_year"),
            Some(&FieldValue::Text("2O22".to_string()))
        );
    }
}
