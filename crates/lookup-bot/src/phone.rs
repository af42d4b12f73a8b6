//! Phone number validation and canonicalization.

use sha2::{Digest, Sha256};

/// Fewest digits accepted as a phone number.
pub const MIN_DIGITS: usize = 8;

/// Most digits accepted as a phone number (E.164 maximum).
pub const MAX_DIGITS: usize = 15;

/// Longest user input kept for logs and replies.
const MAX_INPUT_CHARS: usize = 200;

/// Check whether free text looks like a phone number.
///
/// Whitespace, dashes, parentheses and dots are ignored. After an optional
/// leading `+`, the rest must be 8 to 15 ASCII digits.
pub fn is_valid(text: &str) -> bool {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')' | '.'))
        .collect();
    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);

    digits.bytes().all(|b| b.is_ascii_digit())
        && (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len())
}

/// Reduce input to the digits sent to the lookup API.
///
/// Keeps digits and `+`, drops a leading `+`. If anything other than
/// digits remains, the trimmed input is returned unchanged.
pub fn normalize(text: &str) -> String {
    let trimmed = text.trim();
    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);

    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Short stable identifier for a number, safe to log.
pub fn fingerprint(number: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(number.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..12].to_string()
}

/// Strip control characters and bound the length of user input.
pub fn sanitize(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(*c as u32, 0x00..=0x1f | 0x7f..=0x9f))
        .collect();
    crate::markdown::truncate(&cleaned, MAX_INPUT_CHARS)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_formats() {
        for input in [
            "1234567890",
            "+1234567890",
            "+1-234-567-8900",
            "(234) 567-8900",
            "+91 98765 43210",
            "+44 7911 123456",
            "234.567.8900",
            "12345678",
            "123456789012345",
        ] {
            assert!(is_valid(input), "{input} should be valid");
        }
    }

    #[test]
    fn test_invalid_formats() {
        for input in [
            "",
            "abc",
            "hello world",
            "1234567",
            "1234567890123456",
            "++1234567890",
            "12345+67890",
            "+",
            "123abc4567",
            "１２３４５６７８９０",
        ] {
            assert!(!is_valid(input), "{input} should be invalid");
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("+1234567890"), "1234567890");
        assert_eq!(normalize("+1-234-567-8900"), "12345678900");
        assert_eq!(normalize(" (234) 567-8900 "), "2345678900");
        assert_eq!(normalize("+91 98765 43210"), "919876543210");
    }

    #[test]
    fn test_normalize_returns_input_when_not_reducible() {
        assert_eq!(normalize("  abc  "), "abc");
        assert_eq!(normalize("12+34"), "12+34");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_fingerprint() {
        let a = fingerprint("1234567890");
        assert_eq!(a.len(), 12);
        assert_eq!(a, fingerprint("1234567890"));
        assert_ne!(a, fingerprint("1234567891"));
        assert!(!a.contains("1234567890"));
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("hello\u{0}\u{7}world\n"), "helloworld");
        assert_eq!(sanitize("  +1 234\t"), "+1 234");
        assert_eq!(sanitize("caf\u{e9}\u{85}"), "caf\u{e9}");

        let long = "9".repeat(500);
        let sanitized = sanitize(&long);
        assert_eq!(sanitized.chars().count(), 200);
        assert!(sanitized.ends_with("..."));
    }
}
