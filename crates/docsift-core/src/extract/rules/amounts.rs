//! Monetary amount parsing.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a US-formatted amount (e.g. `$1,234.56`, `-200.00`, `(200.00)`).
///
/// Currency symbols, thousands separators, and whitespace are stripped;
/// accounting parentheses and a leading minus both mean negative. Returns
/// `None` when nothing numeric remains or the digits do not form a single
/// decimal value.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let negative = s.starts_with('-') || (s.starts_with('(') && s.ends_with(')'));

    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() || !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let value = Decimal::from_str(&cleaned).ok()?;
    Some(if negative { -value } else { value })
}

/// Whether a cell or token is a lone amount rather than free text.
pub fn is_amount(s: &str) -> bool {
    super::patterns::AMOUNT
        .find(s.trim())
        .is_some_and(|m| m.len() == s.trim().len())
}
