//! Business license field extraction.

use crate::models::config::ExtractionConfig;
use crate::models::fields::{ExtractedFields, FieldValue};
use crate::ocr::OcrResult;

use super::rules::{self, patterns};

pub(super) fn extract(ocr: &OcrResult, config: &ExtractionConfig) -> ExtractedFields {
    let text = ocr.full_text();
    let fuzzy = config.fuzzy_label_match;
    let mut fields = ExtractedFields::new();

    fields.insert_opt(
        "business_name",
        rules::labeled_text(
            ocr,
            &text,
            &["business name", "company name", "legal name", "entity name", "name of business"],
            &patterns::BUSINESS_NAME,
            fuzzy,
        )
        .map(FieldValue::Text),
    );
    fields.insert_opt(
        "license_number",
        rules::labeled_text(
            ocr,
            &text,
            &["license number", "license no", "license no.", "license #", "permit number", "registration number"],
            &patterns::LICENSE_NUMBER,
            fuzzy,
        )
        .map(FieldValue::Text),
    );
    fields.insert_opt(
        "issue_date",
        rules::labeled_date(
            ocr,
            &text,
            &["issue date", "date of issue", "issued", "issued on", "effective date"],
            &patterns::ISSUE_DATE,
            fuzzy,
        ),
    );
    fields.insert_opt(
        "expiration_date",
        rules::labeled_date(
            ocr,
            &text,
            &["expiration date", "expiry date", "expires", "expires on", "valid until", "valid through"],
            &patterns::EXPIRATION_DATE,
            fuzzy,
        ),
    );
    fields.insert_opt(
        "business_type",
        rules::labeled_text(
            ocr,
            &text,
            &["business type", "type of business", "entity type", "classification"],
            &patterns::BUSINESS_TYPE,
            fuzzy,
        )
        .map(FieldValue::Text),
    );
    fields.insert_opt(
        "business_address",
        rules::labeled_text(
            ocr,
            &text,
            &["business address", "address", "premises address", "location address"],
            &patterns::BUSINESS_ADDRESS,
            fuzzy,
        )
        .map(FieldValue::Text),
    );

    fields
}
