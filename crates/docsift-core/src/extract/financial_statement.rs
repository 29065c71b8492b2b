//! Financial statement field extraction.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::config::ExtractionConfig;
use crate::models::fields::{ExtractedFields, FieldValue};
use crate::ocr::OcrResult;

use super::rules::{self, patterns};

/// Balance-sheet section a table row can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Assets,
    Liabilities,
    Equity,
}

impl Section {
    fn from_heading(text: &str) -> Option<Self> {
        let text = text.to_lowercase();
        if text.contains("liabilit") {
            Some(Section::Liabilities)
        } else if text.contains("equity") || text.contains("stockholder") || text.contains("shareholder") {
            Some(Section::Equity)
        } else if text.contains("asset") {
            Some(Section::Assets)
        } else {
            None
        }
    }
}

/// Component rows and the printed total, per section.
#[derive(Debug, Default)]
struct SectionScan {
    components: BTreeMap<String, Decimal>,
    total: Option<Decimal>,
}

pub(super) fn extract(ocr: &OcrResult, config: &ExtractionConfig) -> ExtractedFields {
    let text = ocr.full_text();
    let fuzzy = config.fuzzy_label_match;
    let mut fields = ExtractedFields::new();

    fields.insert_opt(
        "company_name",
        rules::labeled_text(
            ocr,
            &text,
            &["company name", "business name", "legal name"],
            &patterns::COMPANY_NAME,
            fuzzy,
        )
        .map(FieldValue::Text),
    );
    fields.insert_opt(
        "statement_period",
        rules::labeled_period(
            ocr,
            &text,
            &["statement period", "period", "period covered", "for the period"],
            &patterns::STATEMENT_PERIOD,
            fuzzy,
        ),
    );
    fields.insert_opt(
        "revenue",
        rules::labeled_amount(
            ocr,
            &text,
            &["total revenue", "revenue", "total sales", "net sales"],
            &patterns::REVENUE,
            fuzzy,
        ),
    );
    fields.insert_opt(
        "expenses",
        rules::labeled_amount(
            ocr,
            &text,
            &["total expenses", "operating expenses", "total operating expenses"],
            &patterns::EXPENSES,
            fuzzy,
        ),
    );
    fields.insert_opt("net_income", net_income(ocr, &text, fuzzy));

    let sections = scan_balance_sheet(ocr);
    fields.insert_opt(
        "assets",
        section_field(
            ocr,
            &text,
            &sections[0],
            &["total assets"],
            &patterns::TOTAL_ASSETS,
            fuzzy,
        ),
    );
    fields.insert_opt(
        "liabilities",
        section_field(
            ocr,
            &text,
            &sections[1],
            &["total liabilities"],
            &patterns::TOTAL_LIABILITIES,
            fuzzy,
        ),
    );
    fields.insert_opt(
        "equity",
        section_field(
            ocr,
            &text,
            &sections[2],
            &["total equity", "total shareholders equity", "total stockholders equity", "owner's equity"],
            &patterns::TOTAL_EQUITY,
            fuzzy,
        ),
    );

    fields
}

fn net_income(ocr: &OcrResult, text: &str, fuzzy: bool) -> Option<FieldValue> {
    if let Some(raw) = rules::lookup(
        &ocr.form_fields,
        &["net income", "net profit", "net earnings", "net loss"],
        fuzzy,
    ) {
        return Some(match rules::parse_amount(raw) {
            Some(amount) => FieldValue::Amount(amount),
            None => FieldValue::Text(raw.trim().to_string()),
        });
    }

    patterns::NET_INCOME.captures(text).and_then(|caps| {
        let amount = rules::parse_amount(&caps[2])?;
        // A stated loss is a negative result even when printed unsigned.
        let amount = if caps[1].to_lowercase().contains("loss") && amount > Decimal::ZERO {
            -amount
        } else {
            amount
        };
        Some(FieldValue::Amount(amount))
    })
}

/// Prefer the component breakdown when section rows were found; fall back
/// to a labeled total.
fn section_field(
    ocr: &OcrResult,
    text: &str,
    scan: &SectionScan,
    aliases: &[&str],
    total_pattern: &regex::Regex,
    fuzzy: bool,
) -> Option<FieldValue> {
    if !scan.components.is_empty() {
        return Some(FieldValue::Breakdown(scan.components.clone()));
    }
    if let Some(total) = scan.total {
        return Some(FieldValue::Amount(total));
    }
    rules::labeled_amount(ocr, text, aliases, total_pattern, fuzzy)
}

/// Walk every table once, assigning name/amount rows to the section whose
/// heading most recently appeared. "Total ..." rows close out a section and
/// are kept apart from its components.
fn scan_balance_sheet(ocr: &OcrResult) -> [SectionScan; 3] {
    let mut scans: [SectionScan; 3] = Default::default();

    for table in ocr.tables() {
        let mut current: Option<Section> = None;

        for row in &table {
            let joined = row.join(" ");
            let has_amount = row.iter().any(|cell| rules::is_amount(cell.trim()));

            if !has_amount {
                if let Some(section) = Section::from_heading(&joined) {
                    current = Some(section);
                }
                continue;
            }

            let Some(section) = current else { continue };
            let scan = &mut scans[section as usize];

            let Some((name, amount)) = name_amount_row(row) else {
                continue;
            };
            if name.starts_with("total") {
                scan.total.get_or_insert(amount);
            } else {
                scan.components.entry(name).or_insert(amount);
            }
        }
    }

    scans
}

fn name_amount_row(row: &[String]) -> Option<(String, Decimal)> {
    let amount = row
        .iter()
        .rev()
        .find_map(|cell| {
            let cell = cell.trim();
            rules::is_amount(cell).then(|| rules::parse_amount(cell)).flatten()
        })?;
    let name = row
        .iter()
        .map(|s| s.trim())
        .find(|s| !s.is_empty() && !rules::is_amount(s))?;

    Some((rules::normalize_label(name), amount))
}
