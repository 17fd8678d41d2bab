//! Keystroke filters for the two free-entry steps.

use once_cell::sync::Lazy;
use regex::Regex;

static SPEND_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d*\.?\d{0,2}$").expect("spend pattern is valid"));

/// Upper bound for a single day's count; keeps keystroke arithmetic in range
pub const MAX_DRINKS_PER_DAY: u32 = 999;

/// Append a digit to a drink count. Non-digits leave the count unchanged.
pub fn push_drink_digit(count: u32, key: char) -> u32 {
    match key.to_digit(10) {
        Some(digit) => count
            .saturating_mul(10)
            .saturating_add(digit)
            .min(MAX_DRINKS_PER_DAY),
        None => count,
    }
}

/// Remove the last digit; an emptied field reads as 0
pub fn pop_drink_digit(count: u32) -> u32 {
    count / 10
}

/// Whether `text` is an acceptable in-progress spend entry: digits with an
/// optional decimal point and at most two decimals
pub fn is_valid_spend(text: &str) -> bool {
    SPEND_PATTERN.is_match(text)
}

/// Apply a keystroke to the spend field, returning the new text if accepted
pub fn push_spend_char(current: &str, key: char) -> Option<String> {
    let mut candidate = current.to_string();
    candidate.push(key);
    is_valid_spend(&candidate).then_some(candidate)
}

/// A spend entry that can be submitted
pub fn parse_spend(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_pattern_allows_partial_amounts() {
        for ok in ["", "8", "8.", "8.2", "8.25", ".5", "120"] {
            assert!(is_valid_spend(ok), "{ok:?} should be accepted");
        }
        for bad in ["8.255", "a", "8..", "-1", "1,5"] {
            assert!(!is_valid_spend(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn spend_keystrokes_are_filtered() {
        assert_eq!(push_spend_char("8.2", '5'), Some("8.25".to_string()));
        assert_eq!(push_spend_char("8.25", '1'), None);
        assert_eq!(push_spend_char("8", 'x'), None);
    }

    #[test]
    fn drink_digits_accumulate_and_clear() {
        let count = push_drink_digit(push_drink_digit(0, '1'), '2');
        assert_eq!(count, 12);
        assert_eq!(push_drink_digit(count, 'a'), 12);
        assert_eq!(pop_drink_digit(pop_drink_digit(count)), 0);
        assert_eq!(push_drink_digit(500, '0'), MAX_DRINKS_PER_DAY);
    }

    #[test]
    fn submitted_spend_must_be_numeric() {
        assert_eq!(parse_spend(""), None);
        assert_eq!(parse_spend("."), None);
        assert_eq!(parse_spend("9.5"), Some(9.5));
    }
}
