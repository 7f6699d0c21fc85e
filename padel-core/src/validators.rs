//! Field validators shared by every wizard step.
//!
//! All validators are pure predicates over raw user input. They never
//! allocate error detail; views decide how to present a `false`.
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static PHONE_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]+(?:[ -][0-9]+)*$").ok());

static CODE_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[0-9]{6}$").ok());

static NATIONALITY_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[A-Z]{2}$").ok());

static DATE_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").ok());

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Longest first/last name or tournament title we stage.
pub const MAX_NAME_LEN: usize = 64;

const MIN_PHONE_DIGITS: usize = 6;
const MAX_PHONE_DIGITS: usize = 15;

fn matches(re: &Lazy<Option<Regex>>, input: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(input))
}

/// Accepts an optional leading `+` and 6 to 15 digits, optionally grouped
/// by single spaces or dashes. Empty input is always rejected.
#[must_use]
pub fn validate_phone_number(phone: &str) -> bool {
    let phone = phone.trim();
    if phone.is_empty() || !matches(&PHONE_RE, phone) {
        return false;
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

#[must_use]
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Exactly six ASCII digits, as sent by the SMS verification flow.
#[must_use]
pub fn validate_verification_code(code: &str) -> bool {
    matches(&CODE_RE, code)
}

#[must_use]
pub fn validate_name(name: &str) -> bool {
    let name = name.trim();
    !name.is_empty() && name.chars().count() <= MAX_NAME_LEN
}

/// ISO-3166 alpha-2 country code, upper case.
#[must_use]
pub fn validate_nationality(code: &str) -> bool {
    matches(&NATIONALITY_RE, code)
}

/// Tournament capacity: an even team count between 4 and 64.
#[must_use]
pub fn validate_max_teams(raw: &str) -> bool {
    raw.trim()
        .parse::<u32>()
        .is_ok_and(|n| (4..=64).contains(&n) && n % 2 == 0)
}

/// Calendar date in `YYYY-MM-DD` form, as produced by `<input type="date">`.
/// The day must exist in that month.
#[must_use]
pub fn validate_start_date(raw: &str) -> bool {
    let raw = raw.trim();
    matches(&DATE_RE, raw) && NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_rejects_empty_and_accepts_local_numbers() {
        assert!(!validate_phone_number(""));
        assert!(!validate_phone_number("   "));
        assert!(validate_phone_number("51234567"));
        assert!(validate_phone_number("+230 5123 4567"));
        assert!(validate_phone_number("230-5123-4567"));
    }

    #[test]
    fn phone_rejects_letters_and_bad_lengths() {
        assert!(!validate_phone_number("5123abc"));
        assert!(!validate_phone_number("12345"));
        assert!(!validate_phone_number("1234567890123456"));
        assert!(!validate_phone_number("++51234567"));
        assert!(!validate_phone_number("5123  4567"));
    }

    #[test]
    fn password_requires_six_characters() {
        assert!(!validate_password("abc12"));
        assert!(validate_password("abc123"));
        assert!(validate_password("ñandú!"));
    }

    #[test]
    fn verification_code_is_six_digits() {
        assert!(!validate_verification_code("12a456"));
        assert!(!validate_verification_code("12345"));
        assert!(!validate_verification_code("1234567"));
        assert!(!validate_verification_code("١٢٣٤٥٦"));
        assert!(validate_verification_code("123456"));
    }

    #[test]
    fn names_and_nationalities() {
        assert!(validate_name("Ana"));
        assert!(!validate_name("  "));
        assert!(!validate_name(&"x".repeat(MAX_NAME_LEN + 1)));
        assert!(validate_nationality("MU"));
        assert!(!validate_nationality("mu"));
        assert!(!validate_nationality("MUS"));
    }

    #[test]
    fn tournament_fields() {
        assert!(validate_max_teams("16"));
        assert!(!validate_max_teams("15"));
        assert!(!validate_max_teams("2"));
        assert!(!validate_max_teams("128"));
        assert!(validate_start_date("2026-11-02"));
        assert!(!validate_start_date("2026-13-02"));
        assert!(!validate_start_date("02/11/2026"));
        assert!(validate_start_date("2028-02-29"));
        assert!(!validate_start_date("2026-02-29"));
        assert!(!validate_start_date("2026-02-31"));
        assert!(!validate_start_date("2026-04-31"));
        assert!(!validate_start_date("2026-01-+5"));
        assert!(!validate_start_date("+2026-01-05"));
    }
}
