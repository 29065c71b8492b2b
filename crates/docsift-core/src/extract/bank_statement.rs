//! Bank statement field extraction.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::fields::{ExtractedFields, FieldValue, Transaction};
use crate::ocr::OcrResult;

use super::rules::{self, patterns};

/// Description keywords that mark an outflow when the statement prints
/// unsigned amounts in a single column.
const DEBIT_KEYWORDS: &[&str] = &["withdrawal", "debit", "fee", "charge", "purchase"];

pub(super) fn extract(ocr: &OcrResult, config: &ExtractionConfig) -> ExtractedFields {
    let text = ocr.full_text();
    let fuzzy = config.fuzzy_label_match;
    let mut fields = ExtractedFields::new();

    fields.insert_opt(
        "account_holder",
        rules::labeled_text(
            ocr,
            &text,
            &["account holder", "account holder name", "account name", "customer name"],
            &patterns::ACCOUNT_HOLDER,
            fuzzy,
        )
        .map(FieldValue::Text),
    );
    fields.insert_opt(
        "account_number",
        account_number(ocr, &text, fuzzy).map(FieldValue::Text),
    );
    fields.insert_opt(
        "statement_period",
        rules::labeled_period(
            ocr,
            &text,
            &["statement period", "period", "period covered", "statement dates"],
            &patterns::STATEMENT_PERIOD,
            fuzzy,
        ),
    );
    fields.insert_opt(
        "opening_balance",
        rules::labeled_amount(
            ocr,
            &text,
            &["opening balance", "beginning balance", "previous balance"],
            &patterns::OPENING_BALANCE,
            fuzzy,
        ),
    );
    fields.insert_opt(
        "closing_balance",
        rules::labeled_amount(
            ocr,
            &text,
            &["closing balance", "ending balance", "new balance"],
            &patterns::CLOSING_BALANCE,
            fuzzy,
        ),
    );
    fields.insert_opt("transactions", transactions(ocr, &text, config));

    fields
}

fn account_number(ocr: &OcrResult, text: &str, fuzzy: bool) -> Option<String> {
    let raw = rules::lookup(
        &ocr.form_fields,
        &["account number", "account no", "account no.", "account #", "acct number"],
        fuzzy,
    )
    .map(str::to_string)
    .or_else(|| {
        patterns::ACCOUNT_NUMBER
            .captures(text)
            .map(|caps| caps[1].to_string())
    })?;

    // Grouped digits ("1234 5678 90") collapse to one token.
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    (!cleaned.is_empty()).then_some(cleaned)
}

fn transactions(ocr: &OcrResult, text: &str, config: &ExtractionConfig) -> Option<FieldValue> {
    let mut rows = transactions_from_tables(ocr);
    if rows.is_empty() {
        rows = transactions_from_text(text);
    }

    if rows.len() > config.max_transactions {
        debug!(
            "truncating transaction list from {} to {} rows",
            rows.len(),
            config.max_transactions
        );
        rows.truncate(config.max_transactions);
    }

    (!rows.is_empty()).then(|| FieldValue::Transactions(rows))
}

/// Column positions resolved from a table header row.
#[derive(Debug, Default)]
struct TxColumns {
    date: Option<usize>,
    description: Option<usize>,
    amount: Option<usize>,
    debit: Option<usize>,
    credit: Option<usize>,
    balance: Option<usize>,
}

fn detect_header(row: &[String]) -> Option<TxColumns> {
    let mut cols = TxColumns::default();
    let mut hits = 0;

    for (i, cell) in row.iter().enumerate() {
        let cell = cell.to_lowercase();
        if cell.contains("date") {
            if cols.date.is_none() {
                cols.date = Some(i);
                hits += 1;
            }
        } else if cell.contains("description")
            || cell.contains("details")
            || cell.contains("memo")
            || cell.contains("transaction")
        {
            if cols.description.is_none() {
                cols.description = Some(i);
                hits += 1;
            }
        } else if cell.contains("withdrawal") || cell.contains("debit") {
            cols.debit = Some(i);
            hits += 1;
        } else if cell.contains("deposit") || cell.contains("credit") {
            cols.credit = Some(i);
            hits += 1;
        } else if cell.contains("balance") {
            cols.balance = Some(i);
            hits += 1;
        } else if cell.contains("amount") {
            cols.amount = Some(i);
            hits += 1;
        }
    }

    (hits >= 2).then_some(cols)
}

fn transactions_from_tables(ocr: &OcrResult) -> Vec<Transaction> {
    let mut out = Vec::new();

    for table in ocr.tables() {
        match table.first().and_then(|row| detect_header(row)) {
            Some(cols) => {
                out.extend(table[1..].iter().filter_map(|row| row_with_columns(row, &cols)));
            }
            None => {
                // No header to trust: only rows carrying both a date and
                // an amount count as transactions.
                out.extend(table.iter().filter_map(|row| row_positional(row)));
            }
        }
    }

    out
}

fn row_with_columns(row: &[String], cols: &TxColumns) -> Option<Transaction> {
    let cell = |idx: Option<usize>| {
        idx.and_then(|i| row.get(i))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    };

    let date = cell(cols.date).and_then(rules::parse_date);
    let description = cell(cols.description)
        .map(str::to_string)
        .unwrap_or_else(|| longest_text_cell(row));

    let split_columns = cols.debit.is_some() || cols.credit.is_some();
    let amount = if let Some(amount) = cell(cols.amount).and_then(rules::parse_amount) {
        amount
    } else if let Some(debit) = cell(cols.debit).and_then(rules::parse_amount) {
        -debit.abs()
    } else if let Some(credit) = cell(cols.credit).and_then(rules::parse_amount) {
        credit
    } else {
        return None;
    };

    Some(Transaction {
        date,
        description: description.clone(),
        amount: signed_amount(&description, amount, split_columns),
        balance: cell(cols.balance).and_then(rules::parse_amount),
    })
}

fn row_positional(row: &[String]) -> Option<Transaction> {
    let mut date = None;
    let mut amounts: Vec<Decimal> = Vec::new();
    let mut texts: Vec<&str> = Vec::new();

    for cell in row {
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }
        if rules::is_amount(cell) {
            if let Some(amount) = rules::parse_amount(cell) {
                amounts.push(amount);
                continue;
            }
        }
        if date.is_none() {
            if let Some(parsed) = rules::parse_date(cell) {
                date = Some(parsed);
                continue;
            }
        }
        texts.push(cell);
    }

    let date = date?;
    let amount = *amounts.first()?;
    let description = texts
        .iter()
        .max_by_key(|s| s.len())
        .map(|s| s.to_string())
        .unwrap_or_default();

    Some(Transaction {
        date: Some(date),
        description: description.clone(),
        amount: signed_amount(&description, amount, false),
        balance: amounts.get(1).copied(),
    })
}

fn transactions_from_text(text: &str) -> Vec<Transaction> {
    patterns::TRANSACTION_LINE
        .captures_iter(text)
        .filter_map(|caps| {
            let description = caps[2].trim().to_string();
            let amount = rules::parse_amount(&caps[3])?;
            Some(Transaction {
                date: rules::parse_date(&caps[1]),
                description: description.clone(),
                amount: signed_amount(&description, amount, false),
                balance: caps.get(4).and_then(|m| rules::parse_amount(m.as_str())),
            })
        })
        .collect()
}

fn longest_text_cell(row: &[String]) -> String {
    row.iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && !rules::is_amount(s) && rules::parse_date(s).is_none())
        .max_by_key(|s| s.len())
        .map(str::to_string)
        .unwrap_or_default()
}

/// Negate unsigned outflows identified by description keywords. Statements
/// with explicit debit/credit columns already carry the sign.
fn signed_amount(description: &str, amount: Decimal, split_columns: bool) -> Decimal {
    if split_columns || amount < Decimal::ZERO {
        return amount;
    }
    let lower = description.to_lowercase();
    if DEBIT_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        -amount
    } else {
        amount
    }
}
