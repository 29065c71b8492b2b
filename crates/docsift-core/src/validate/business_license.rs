//! Business license validation rules.

use chrono::NaiveDate;

use crate::extract::rules::patterns;
use crate::models::config::ValidationConfig;
use crate::models::fields::{ExtractedFields, FieldValue, ValidationResult};

use super::check_required;

pub(super) fn validate(
    fields: &ExtractedFields,
    config: &ValidationConfig,
    today: NaiveDate,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_required(fields, &config.required_fields.business_license, &mut result);

    if let Some(value) = fields.get("license_number") {
        match value.as_text() {
            Some(s) if license_number_is_valid(s) => {}
            _ => result.error("Invalid license number format"),
        }
    }

    for (name, label) in [("issue_date", "issue date"), ("expiration_date", "expiration date")] {
        if let Some(value) = fields.get(name) {
            if value.as_date().is_none() {
                result.error(format!("Invalid {label} format"));
            }
        }
    }

    let issued = fields.get("issue_date").and_then(|v| v.as_date());
    let expires = fields.get("expiration_date").and_then(|v| v.as_date());

    if let (Some(issued), Some(expires)) = (issued, expires) {
        if issued > expires {
            result.warning(format!(
                "Issue date {issued} is after expiration date {expires}"
            ));
        }
    }

    // An expired license is still valid data, just a risk signal.
    if let Some(expires) = expires {
        if expires < today {
            result.warning(format!("Business license expired on {expires}"));
        }
    }

    result
}

fn license_number_is_valid(s: &str) -> bool {
    patterns::LICENSE_NUMBER_FORMAT.is_match(s) && s.chars().any(|c| c.is_ascii_digit())
}
