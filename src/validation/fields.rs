//! Single-field predicates.
//!
//! Every function here is pure and takes the raw submitted string. Policies
//! that differ between form profiles are enums so a profile can pick one
//! explicitly.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Exact calendar date shape accepted by [`validate_date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Longest name accepted by [`NamePolicy::Strict`].
pub const STRICT_NAME_MAX_CHARS: usize = 50;

/// Shortest address accepted by [`EmailPolicy::Strict`].
pub const STRICT_EMAIL_MIN_CHARS: usize = 8;

// Widths of the stored submission columns.
pub const MAX_DATE_CHARS: usize = 10;
pub const MAX_NAME_CHARS: usize = 80;
pub const MAX_EMAIL_CHARS: usize = 120;
pub const MAX_PHONE_CHARS: usize = 20;

fn date_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date shape regex"))
}

fn permissive_email() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("permissive email regex"))
}

fn strict_email() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("strict email regex")
    })
}

fn loose_phone() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[\d\s()-]{7,}$").expect("loose phone regex"))
}

/// Parse a `YYYY-MM-DD` date. Rejects unpadded components, year 0 and
/// impossible calendar dates.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if !date_shape().is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .filter(|date| date.year() >= 1)
}

/// True iff `value` is a real calendar date written as `YYYY-MM-DD`.
pub fn validate_date(value: &str) -> bool {
    parse_date(value).is_some()
}

/// True iff `value` is at most `max` characters long.
pub fn within_length(value: &str, max: usize) -> bool {
    value.chars().count() <= max
}

/// True iff `value` has visible content.
pub fn validate_non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// How person and organisation names are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NamePolicy {
    /// Any non-empty text.
    #[default]
    Permissive,
    /// Letters only, at most [`STRICT_NAME_MAX_CHARS`] characters.
    Strict,
}

impl fmt::Display for NamePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamePolicy::Permissive => write!(f, "permissive"),
            NamePolicy::Strict => write!(f, "strict"),
        }
    }
}

/// Check a name under `policy`.
pub fn validate_name(value: &str, policy: NamePolicy) -> bool {
    match policy {
        NamePolicy::Permissive => validate_non_empty(value),
        NamePolicy::Strict => {
            !value.is_empty()
                && value.chars().count() <= STRICT_NAME_MAX_CHARS
                && value.chars().all(char::is_alphabetic)
        }
    }
}

/// How email addresses are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailPolicy {
    /// `local@domain.tld` with word characters, dots and hyphens.
    #[default]
    Permissive,
    /// ASCII-only address with an alphabetic TLD and a minimum length.
    Strict,
}

impl fmt::Display for EmailPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailPolicy::Permissive => write!(f, "permissive"),
            EmailPolicy::Strict => write!(f, "strict"),
        }
    }
}

/// Check an email address under `policy`.
pub fn validate_email(value: &str, policy: EmailPolicy) -> bool {
    match policy {
        EmailPolicy::Permissive => permissive_email().is_match(value),
        EmailPolicy::Strict => {
            value.chars().count() >= STRICT_EMAIL_MIN_CHARS && strict_email().is_match(value)
        }
    }
}

/// How phone numbers are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhonePolicy {
    /// Optional `+`, then at least seven digits, spaces, parentheses or hyphens.
    #[default]
    Loose,
    /// Exactly ten ASCII digits.
    Digits10,
}

impl fmt::Display for PhonePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhonePolicy::Loose => write!(f, "loose"),
            PhonePolicy::Digits10 => write!(f, "digits10"),
        }
    }
}

/// Check a phone number under `policy`.
pub fn validate_phone(value: &str, policy: PhonePolicy) -> bool {
    match policy {
        PhonePolicy::Loose => loose_phone().is_match(value),
        PhonePolicy::Digits10 => value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit()),
    }
}

/// True iff `value` is a dotted quad with every octet in `0..=255`.
pub fn validate_ip_address(value: &str) -> bool {
    let octets: Vec<&str> = value.split('.').collect();
    if octets.len() != 4 {
        return false;
    }
    octets.iter().all(|octet| {
        !octet.is_empty()
            && octet.len() <= 3
            && octet.bytes().all(|b| b.is_ascii_digit())
            && octet.parse::<u16>().is_ok_and(|n| n <= 255)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date_accepts_leap_day() {
        assert!(validate_date("2024-02-29"));
        assert!(validate_date("1999-12-31"));
    }

    #[test]
    fn test_validate_date_rejects_impossible_dates() {
        assert!(!validate_date("2024-02-30"));
        assert!(!validate_date("2023-02-29"));
        assert!(!validate_date("2024-13-01"));
        assert!(!validate_date("2024-00-10"));
    }

    #[test]
    fn test_validate_date_rejects_wrong_shape() {
        assert!(!validate_date(""));
        assert!(!validate_date("2024-2-3"));
        assert!(!validate_date("02/03/2024"));
        assert!(!validate_date(" 2024-02-03"));
        assert!(!validate_date("2024-02-03T00:00:00"));
        assert!(!validate_date("+2024-02-03"));
    }

    #[test]
    fn test_validate_date_rejects_year_zero() {
        assert!(!validate_date("0000-01-01"));
        assert!(validate_date("0001-01-01"));
    }

    #[test]
    fn test_parse_date_returns_value() {
        assert_eq!(
            parse_date("2026-01-24"),
            NaiveDate::from_ymd_opt(2026, 1, 24)
        );
    }

    #[test]
    fn test_non_empty_ignores_whitespace() {
        assert!(validate_non_empty("x"));
        assert!(!validate_non_empty(""));
        assert!(!validate_non_empty("   \t"));
    }

    #[test]
    fn test_permissive_name() {
        assert!(validate_name("Jane Doe-Smith", NamePolicy::Permissive));
        assert!(validate_name("R2D2", NamePolicy::Permissive));
        assert!(!validate_name("", NamePolicy::Permissive));
    }

    #[test]
    fn test_strict_name() {
        assert!(validate_name("Jane", NamePolicy::Strict));
        assert!(validate_name("Zoë", NamePolicy::Strict));
        assert!(!validate_name("Jane Doe", NamePolicy::Strict));
        assert!(!validate_name("R2D2", NamePolicy::Strict));
        assert!(!validate_name("", NamePolicy::Strict));
        assert!(validate_name(&"a".repeat(50), NamePolicy::Strict));
        assert!(!validate_name(&"a".repeat(51), NamePolicy::Strict));
    }

    #[test]
    fn test_permissive_email() {
        assert!(validate_email("jane.doe@example.com", EmailPolicy::Permissive));
        assert!(validate_email("a@b.c", EmailPolicy::Permissive));
        assert!(!validate_email("jane@example", EmailPolicy::Permissive));
        assert!(!validate_email("jane example.com", EmailPolicy::Permissive));
        assert!(!validate_email("jane+tag@example.com", EmailPolicy::Permissive));
    }

    #[test]
    fn test_strict_email() {
        assert!(validate_email("jane+tag@example.com", EmailPolicy::Strict));
        assert!(!validate_email("a@b.co", EmailPolicy::Strict));
        assert!(!validate_email("jane@example.c", EmailPolicy::Strict));
        assert!(!validate_email("jane@example", EmailPolicy::Strict));
    }

    #[test]
    fn test_strict_email_length_boundary() {
        assert!(validate_email("ab@cd.ef", EmailPolicy::Strict));
        assert!(!validate_email("a@cd.ef", EmailPolicy::Strict));
        // Same 7-character address passes when only the shape is checked.
        assert!(validate_email("a@cd.ef", EmailPolicy::Permissive));
    }

    #[test]
    fn test_within_length_counts_chars() {
        assert!(within_length("Zoë", 3));
        assert!(!within_length("Zoë!", 3));
        assert!(within_length("", 0));
    }

    #[test]
    fn test_phone_policies_disagree_on_punctuation() {
        assert!(validate_phone("5551234567", PhonePolicy::Digits10));
        assert!(validate_phone("5551234567", PhonePolicy::Loose));
        assert!(!validate_phone("555-123-4567", PhonePolicy::Digits10));
        assert!(validate_phone("555-123-4567", PhonePolicy::Loose));
    }

    #[test]
    fn test_loose_phone() {
        assert!(validate_phone("+1 (555) 123-4567", PhonePolicy::Loose));
        assert!(!validate_phone("123456", PhonePolicy::Loose));
        assert!(!validate_phone("555.123.4567", PhonePolicy::Loose));
        assert!(!validate_phone("++5551234567", PhonePolicy::Loose));
    }

    #[test]
    fn test_digits10_phone() {
        assert!(!validate_phone("555123456", PhonePolicy::Digits10));
        assert!(!validate_phone("55512345678", PhonePolicy::Digits10));
        assert!(!validate_phone("+555123456", PhonePolicy::Digits10));
    }

    #[test]
    fn test_validate_ip_address() {
        assert!(validate_ip_address("10.0.0.1"));
        assert!(validate_ip_address("255.255.255.255"));
        assert!(validate_ip_address("0.0.0.0"));
        assert!(!validate_ip_address("256.0.0.1"));
        assert!(!validate_ip_address("10.0.0"));
        assert!(!validate_ip_address("10.0.0.1.5"));
        assert!(!validate_ip_address("10..0.1"));
        assert!(!validate_ip_address("10.0.0.-1"));
        assert!(!validate_ip_address("10.0.0.+1"));
        assert!(!validate_ip_address("a.b.c.d"));
        assert!(!validate_ip_address(""));
    }

    #[test]
    fn test_policy_display_matches_config_spelling() {
        assert_eq!(NamePolicy::Strict.to_string(), "strict");
        assert_eq!(EmailPolicy::Permissive.to_string(), "permissive");
        assert_eq!(PhonePolicy::Digits10.to_string(), "digits10");
    }
}
