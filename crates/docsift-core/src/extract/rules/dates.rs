//! Date and date-range parsing.

use chrono::NaiveDate;

use super::patterns::{DATE_DAY_FIRST, DATE_MDY, DATE_MONTH_FIRST, DATE_YMD};
use crate::models::fields::StatementPeriod;

/// Parse the first date found in a string.
///
/// Tries numeric month/day/year (falling back to day/month/year when the
/// first component cannot be a month), then ISO year-month-day, then
/// spelled-out month forms ("January 15, 2023", "15 January 2023").
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    all_dates(s).into_iter().next().map(|(_, date)| date)
}

/// All dates found in a string, ordered by position.
pub fn all_dates(s: &str) -> Vec<(usize, NaiveDate)> {
    let mut found: Vec<(usize, NaiveDate)> = Vec::new();

    for caps in DATE_YMD.captures_iter(s) {
        let year: i32 = caps[1].parse().unwrap_or(0);
        let month: u32 = caps[2].parse().unwrap_or(0);
        let day: u32 = caps[3].parse().unwrap_or(0);
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            found.push((caps.get(0).unwrap().start(), date));
        }
    }

    for caps in DATE_MDY.captures_iter(s) {
        let start = caps.get(0).unwrap().start();
        if found.iter().any(|(pos, _)| overlaps(*pos, start)) {
            continue;
        }
        let first: u32 = caps[1].parse().unwrap_or(0);
        let second: u32 = caps[2].parse().unwrap_or(0);
        let year = expand_year(&caps[3]);

        // Month/day when plausible, day/month otherwise ("31/01/2023").
        let date = NaiveDate::from_ymd_opt(year, first, second)
            .or_else(|| NaiveDate::from_ymd_opt(year, second, first));
        if let Some(date) = date {
            found.push((start, date));
        }
    }

    for caps in DATE_MONTH_FIRST.captures_iter(s) {
        let month = month_number(&caps[1]);
        let day: u32 = caps[2].parse().unwrap_or(0);
        let year: i32 = caps[3].parse().unwrap_or(0);
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            found.push((caps.get(0).unwrap().start(), date));
        }
    }

    for caps in DATE_DAY_FIRST.captures_iter(s) {
        let start = caps.get(0).unwrap().start();
        if found.iter().any(|(pos, _)| *pos == start) {
            continue;
        }
        let day: u32 = caps[1].parse().unwrap_or(0);
        let month = month_number(&caps[2]);
        let year: i32 = caps[3].parse().unwrap_or(0);
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            found.push((start, date));
        }
    }

    found.sort_by_key(|(pos, _)| *pos);
    found.dedup_by_key(|(pos, _)| *pos);
    found
}

/// Parse a date range ("01/01/2023 - 01/31/2023", "Jan 1, 2023 to
/// Jan 31, 2023") into a statement period. The first two dates found win.
pub fn parse_period(s: &str) -> Option<StatementPeriod> {
    let dates = all_dates(s);
    match dates.as_slice() {
        [(_, start), (_, end), ..] => Some(StatementPeriod {
            start: *start,
            end: *end,
        }),
        _ => None,
    }
}

// Numeric M/D/Y matches starting inside an ISO match (the "01-15" tail of
// "2023-01-15") are positioned within 10 bytes of it.
fn overlaps(ymd_start: usize, mdy_start: usize) -> bool {
    mdy_start >= ymd_start && mdy_start < ymd_start + 10
}

fn expand_year(s: &str) -> i32 {
    let year: i32 = s.parse().unwrap_or(0);
    if year < 100 {
        // Two-digit year: 00-49 are 2000s, 50-99 are 1900s.
        if year < 50 { 2000 + year } else { 1900 + year }
    } else {
        year
    }
}

fn month_number(name: &str) -> u32 {
    match name.to_lowercase().get(0..3) {
        Some("jan") => 1,
        Some("feb") => 2,
        Some("mar") => 3,
        Some("apr") => 4,
        Some("may") => 5,
        Some("jun") => 6,
        Some("jul") => 7,
        Some("aug") => 8,
        Some("sep") => 9,
        Some("oct") => 10,
        Some("nov") => 11,
        Some("dec") => 12,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mdy() {
        assert_eq!(
            parse_date("01/15/2023"),
            Some(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap())
        );
    }

    #[test]
    fn test_parse_day_month_fallback() {
        // 31 cannot be a month, so the components swap.
        assert_eq!(
            parse_date("31/01/2023"),
            Some(NaiveDate::from_ymd_opt(2023, 1, 31).unwrap())
        );
    }

    #[test]
    fn test_parse_ymd() {
        assert_eq!(
            parse_date("2023-01-15"),
            Some(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap())
        );
    }

    #[test]
    fn test_parse_spelled_out() {
        assert_eq!(
            parse_date("January 15, 2023"),
            Some(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap())
        );
        assert_eq!(
            parse_date("15 Jan 2023"),
            Some(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap())
        );
    }

    #[test]
    fn test_two_digit_year() {
        assert_eq!(
            parse_date("01/15/23"),
            Some(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap())
        );
        assert_eq!(
            parse_date("01/15/99"),
            Some(NaiveDate::from_ymd_opt(1999, 1, 15).unwrap())
        );
    }

    #[test]
    fn test_parse_period() {
        let period = parse_period("01/01/2023 - 01/31/2023").unwrap();
        assert_eq!(period.start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(period.end, NaiveDate::from_ymd_opt(2023, 1, 31).unwrap());

        let iso = parse_period("2023-01-01 through 2023-03-31").unwrap();
        assert_eq!(iso.start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(iso.end, NaiveDate::from_ymd_opt(2023, 3, 31).unwrap());
    }

    #[test]
    fn test_parse_period_needs_two_dates() {
        assert_eq!(parse_period("January 2023"), None);
        assert_eq!(parse_period("n/a"), None);
    }

    #[test]
    fn test_no_date() {
        assert_eq!(parse_date("no dates here"), None);
    }
}
