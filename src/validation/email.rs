//! Email format check

use std::sync::OnceLock;

use regex::Regex;

/// Loose local@domain check. Deliverability is the mailer's problem; this
/// only rejects values that cannot possibly be an address.
pub fn email_looks_valid(email: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));
    pattern.is_match(email)
}
