//! Runtime validation helpers referenced by generated `validate` methods as
//! `::dtoforge::rules::*`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::LazyLock};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9][0-9 ().-]{5,18}[0-9]$").expect("phone pattern compiles")
});

///
/// Violation
///
/// One failed validation check: the field, the rule code, and a message.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Violation {
    pub field: String,
    pub rule: String,
    pub message: String,
}

impl Violation {
    pub fn new(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.field, self.rule, self.message)
    }
}

#[must_use]
pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

#[must_use]
pub fn is_phone(value: &str) -> bool {
    PHONE.is_match(value)
}

/// Accepts the schemes a transferable URL field can carry.
#[must_use]
pub fn is_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https" | "ftp"))
        .unwrap_or(false)
}

/// Digits (with optional spaces/dashes), plausible length, Luhn-valid.
#[must_use]
pub fn is_credit_card(value: &str) -> bool {
    let digits: Vec<u32> = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default();

    if !(12..=19).contains(&digits.len()) {
        return false;
    }

    luhn(&digits)
}

fn luhn(digits: &[u32]) -> bool {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    sum % 10 == 0
}

/// Dynamic-pattern check. Invalid patterns pass: the resolver rejects them
/// before any code that could reach this is generated.
#[must_use]
pub fn matches_pattern(value: &str, pattern: &str) -> bool {
    Regex::new(pattern).map(|re| re.is_match(value)).unwrap_or(true)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_common_shapes() {
        assert!(is_email("a@b.co"));
        assert!(is_email("first.last+tag@sub.example.com"));
        assert!(!is_email("not-an-email"));
        assert!(!is_email("missing@tld"));
        assert!(!is_email("@example.com"));
        assert!(!is_email(""));
    }

    #[test]
    fn phone_accepts_digits_and_separators() {
        assert!(is_phone("+1 (555) 123-4567"));
        assert!(is_phone("5551234567"));
        assert!(!is_phone("555"));
        assert!(!is_phone("call me"));
    }

    #[test]
    fn url_requires_a_transferable_scheme() {
        assert!(is_url("https://example.com/path"));
        assert!(is_url("http://example.com"));
        assert!(is_url("ftp://files.example.com"));
        assert!(!is_url("example.com"));
        assert!(!is_url("mailto:user@example.com"));
    }

    #[test]
    fn credit_card_checks_luhn() {
        // Standard test numbers.
        assert!(is_credit_card("4539 1488 0343 6467"));
        assert!(is_credit_card("4539-1488-0343-6467"));
        assert!(!is_credit_card("4539 1488 0343 6468"));
        assert!(!is_credit_card("1234"));
        assert!(!is_credit_card("not a card"));
    }

    #[test]
    fn pattern_matches_and_tolerates_bad_patterns() {
        assert!(matches_pattern("ABC", "^[A-Z]{3}$"));
        assert!(!matches_pattern("abc", "^[A-Z]{3}$"));
        assert!(matches_pattern("anything", "(["));
    }

    #[test]
    fn violation_renders_field_and_rule() {
        let violation = Violation::new("email", "email", "email must be a valid email address");
        assert_eq!(
            violation.to_string(),
            "email [email]: email must be a valid email address"
        );
    }
}
