//! Date of birth normalization
//!
//! Inputs arrive in whatever format the submitter's locale favours. The
//! strict pass tries a fixed list of explicit formats and only accepts a
//! format when re-formatting reproduces the input exactly, so `13/02/2020`
//! can never silently match the month-first format. Inputs that survive
//! no strict format get a lenient second pass.

use chrono::{DateTime, Datelike, NaiveDate};

/// Formats tried with the round-trip check, in precedence order.
const STRICT_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%m-%d-%Y"];

/// Last-resort formats, accepted without the round-trip check. Covers
/// non-padded day/month values and common long-hand spellings.
const LENIENT_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%m-%d-%Y",
    "%Y/%m/%d",
    "%d %B %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%b %d, %Y",
];

/// Oldest birth year accepted.
pub const EARLIEST_BIRTH_YEAR: i32 = 1900;

/// Parse a date of birth. Returns `None` when no format matches or the
/// year falls outside `[EARLIEST_BIRTH_YEAR, today's year]`. Storage
/// always receives the canonical `%Y-%m-%d` rendering of the result.
pub fn normalize_dob(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    for format in STRICT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            if date.format(format).to_string() == input && year_in_range(date, today) {
                return Some(date);
            }
        }
    }

    for format in LENIENT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            if year_in_range(date, today) {
                return Some(date);
            }
        }
    }

    if let Ok(stamp) = DateTime::parse_from_rfc3339(input) {
        let date = stamp.date_naive();
        if year_in_range(date, today) {
            return Some(date);
        }
    }

    None
}

fn year_in_range(date: NaiveDate, today: NaiveDate) -> bool {
    date.year() >= EARLIEST_BIRTH_YEAR && date.year() <= today.year()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    fn canonical(input: &str) -> Option<String> {
        normalize_dob(input, today()).map(|d| d.format("%Y-%m-%d").to_string())
    }

    #[test]
    fn test_iso_input_round_trips() {
        assert_eq!(canonical("1990-05-14").unwrap(), "1990-05-14");
    }

    #[test]
    fn test_day_first_slash_format() {
        assert_eq!(canonical("14/05/1990").unwrap(), "1990-05-14");
    }

    #[test]
    fn test_day_thirteen_is_not_mistaken_for_a_month() {
        // %m/%d/%Y would reject 13 as a month, and the round-trip check
        // keeps %d/%m/%Y from being skipped.
        assert_eq!(canonical("13/02/2020").unwrap(), "2020-02-13");
    }

    #[test]
    fn test_month_first_when_day_first_cannot_parse() {
        assert_eq!(canonical("02/13/2020").unwrap(), "2020-02-13");
    }

    #[test]
    fn test_dash_separated_day_first() {
        assert_eq!(canonical("14-05-1990").unwrap(), "1990-05-14");
    }

    #[test]
    fn test_lenient_pass_accepts_unpadded_values() {
        // Fails the strict round-trip (re-formats as 04/05/1990), then
        // parses leniently as day-first.
        assert_eq!(canonical("4/5/1990").unwrap(), "1990-05-04");
    }

    #[test]
    fn test_lenient_pass_accepts_long_hand() {
        assert_eq!(canonical("May 14, 1990").unwrap(), "1990-05-14");
        assert_eq!(canonical("14 May 1990").unwrap(), "1990-05-14");
    }

    #[test]
    fn test_year_before_1900_is_rejected() {
        assert!(canonical("1899-12-31").is_none());
    }

    #[test]
    fn test_year_in_the_future_is_rejected() {
        assert!(canonical("2027-01-01").is_none());
    }

    #[test]
    fn test_current_year_is_accepted() {
        assert_eq!(canonical("2026-01-15").unwrap(), "2026-01-15");
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(canonical("not a date").is_none());
        assert!(canonical("").is_none());
        assert!(canonical("99/99/9999").is_none());
    }
}
