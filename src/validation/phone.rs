//! Phone number normalization
//!
//! Storage keeps a country-coded digit string; formatting for humans is a
//! separate, display-only concern.

/// Canonicalize a phone number to bare digits. An 11-digit number with a
/// leading zero is treated as a Nigerian national number and rewritten
/// with the 234 country code. Inputs that cannot be normalized are
/// returned as given (trimmed), so the validator can flag their length.
pub fn normalize_phone(raw: &str) -> String {
    let raw = raw.trim();
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return String::new();
    }

    if digits.len() == 11 && digits.starts_with('0') {
        return format!("234{}", &digits[1..]);
    }

    if (10..=15).contains(&digits.len()) {
        return digits;
    }

    raw.to_string()
}

/// Display form for emails and UI; the bare digits are what persist.
pub fn display_phone(canonical: &str) -> String {
    if !canonical.is_empty() && canonical.chars().all(|c| c.is_ascii_digit()) {
        format!("+{canonical}")
    } else {
        canonical.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_zero_becomes_country_code() {
        assert_eq!(normalize_phone("08031234567"), "2348031234567");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let canonical = normalize_phone("08031234567");
        assert_eq!(normalize_phone(&canonical), canonical);
        assert_eq!(normalize_phone("2348031234567"), "2348031234567");
    }

    #[test]
    fn test_punctuation_is_stripped() {
        assert_eq!(normalize_phone("+234 (803) 123-4567"), "2348031234567");
        assert_eq!(normalize_phone("0803 123 4567"), "2348031234567");
    }

    #[test]
    fn test_in_range_number_passes_through() {
        assert_eq!(normalize_phone("4415550123"), "4415550123");
    }

    #[test]
    fn test_unnormalizable_input_is_returned_as_given() {
        assert_eq!(normalize_phone("12345"), "12345");
        assert_eq!(normalize_phone("  12345  "), "12345");
    }

    #[test]
    fn test_digit_free_input_becomes_empty() {
        assert_eq!(normalize_phone("call me"), "");
        assert_eq!(normalize_phone(""), "");
    }

    #[test]
    fn test_display_form_prefixes_plus() {
        assert_eq!(display_phone("2348031234567"), "+2348031234567");
        assert_eq!(display_phone(""), "");
        assert_eq!(display_phone("12-34"), "12-34");
    }
}
