//! Shared field-getter building blocks.
//!
//! Every getter follows the same fallback chain: resolve a form-field
//! label first, then pattern-search the full text. A labeled value that
//! resists parsing is kept as raw text so the validator can report the
//! malformation; a value that is simply absent yields `None`.

pub mod amounts;
pub mod dates;
pub mod labels;
pub mod patterns;

use regex::Regex;

use crate::models::fields::FieldValue;
use crate::ocr::OcrResult;

pub use amounts::{is_amount, parse_amount};
pub use dates::{all_dates, parse_date, parse_period};
pub use labels::{lookup, normalize_label};

/// Text getter: form-field aliases, then a single-capture pattern over the
/// full text.
pub(crate) fn labeled_text(
    ocr: &OcrResult,
    text: &str,
    aliases: &[&str],
    pattern: &Regex,
    fuzzy: bool,
) -> Option<String> {
    if let Some(value) = lookup(&ocr.form_fields, aliases, fuzzy) {
        return Some(value.trim().to_string());
    }

    pattern
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Amount getter. A labeled value that does not parse is returned as
/// `Text`; pattern matches always parse by construction.
pub(crate) fn labeled_amount(
    ocr: &OcrResult,
    text: &str,
    aliases: &[&str],
    pattern: &Regex,
    fuzzy: bool,
) -> Option<FieldValue> {
    if let Some(raw) = lookup(&ocr.form_fields, aliases, fuzzy) {
        return Some(match parse_amount(raw) {
            Some(amount) => FieldValue::Amount(amount),
            None => FieldValue::Text(raw.trim().to_string()),
        });
    }

    pattern
        .captures(text)
        .and_then(|caps| parse_amount(&caps[1]))
        .map(FieldValue::Amount)
}

/// Date getter, with the same found-but-unparseable fallback to `Text`.
pub(crate) fn labeled_date(
    ocr: &OcrResult,
    text: &str,
    aliases: &[&str],
    pattern: &Regex,
    fuzzy: bool,
) -> Option<FieldValue> {
    if let Some(raw) = lookup(&ocr.form_fields, aliases, fuzzy) {
        return Some(match parse_date(raw) {
            Some(date) => FieldValue::Date(date),
            None => FieldValue::Text(raw.trim().to_string()),
        });
    }

    pattern
        .captures(text)
        .and_then(|caps| {
            let raw = caps[1].trim();
            parse_date(raw)
                .map(FieldValue::Date)
                .or_else(|| Some(FieldValue::Text(raw.to_string())))
        })
        .filter(|value| !matches!(value, FieldValue::Text(s) if s.is_empty()))
}

/// Date-range getter for statement periods.
pub(crate) fn labeled_period(
    ocr: &OcrResult,
    text: &str,
    aliases: &[&str],
    pattern: &Regex,
    fuzzy: bool,
) -> Option<FieldValue> {
    if let Some(raw) = lookup(&ocr.form_fields, aliases, fuzzy) {
        return Some(match parse_period(raw) {
            Some(period) => FieldValue::Period(period),
            None => FieldValue::Text(raw.trim().to_string()),
        });
    }

    pattern.captures(text).and_then(|caps| {
        let raw = caps[1].trim();
        parse_period(raw)
            .map(FieldValue::Period)
            .or_else(|| Some(FieldValue::Text(raw.to_string())))
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_labeled_amount_prefers_form_field() {
        let mut ocr = OcrResult::new();
        ocr.form_fields
            .insert("Opening Balance".to_string(), "$1,000.00".to_string());
        let text = "Opening balance: $999.00";

        let value = labeled_amount(
            &ocr,
            text,
            &["opening balance"],
            &patterns::OPENING_BALANCE,
            true,
        );
        assert_eq!(value, Some(FieldValue::Amount(Decimal::new(100000, 2))));
    }

    #[test]
    fn test_labeled_amount_falls_back_to_text_pattern() {
        let ocr = OcrResult::new();
        let text = "Beginning Balance: $250.75";

        let value = labeled_amount(
            &ocr,
            text,
            &["opening balance"],
            &patterns::OPENING_BALANCE,
            true,
        );
        assert_eq!(value, Some(FieldValue::Amount(Decimal::new(25075, 2))));
    }

    #[test]
    fn test_unparseable_labeled_value_kept_as_text() {
        let mut ocr = OcrResult::new();
        ocr.form_fields
            .insert("Issue Date".to_string(), "smudged".to_string());

        let value = labeled_date(&ocr, "", &["issue date"], &patterns::ISSUE_DATE, true);
        assert_eq!(value, Some(FieldValue::Text("smudged".to_string())));
    }

    #[test]
    fn test_labeled_date_from_text() {
        let ocr = OcrResult::new();
        let text = "Expiration Date: 06/30/2022";

        let value = labeled_date(
            &ocr,
            text,
            &["expiration date"],
            &patterns::EXPIRATION_DATE,
            true,
        );
        assert_eq!(
            value,
            Some(FieldValue::Date(NaiveDate::from_ymd_opt(2022, 6, 30).unwrap()))
        );
    }

    #[test]
    fn test_absent_field_yields_none() {
        let ocr = OcrResult::new();
        assert_eq!(
            labeled_amount(&ocr, "", &["opening balance"], &patterns::OPENING_BALANCE, true),
            None
        );
    }
}
