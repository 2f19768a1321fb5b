//! Masking policy: raw secret in, display-safe string out.

/// Values at or below this many characters are returned unchanged.
const MASK_THRESHOLD: usize = 12;

/// How many leading characters survive masking.
const PREFIX_LEN: usize = 8;

/// How many trailing characters survive masking.
const SUFFIX_LEN: usize = 4;

/// Masks a secret for display.
///
/// Values longer than 12 characters become the first 8 characters,
/// a literal `...`, and the last 4 characters. Values of 12 characters
/// or fewer are returned unchanged - that is a deliberate exception,
/// not a bug: truncating something that short would destroy the
/// traceability of short test fixtures without hiding anything real
/// (no supported provider issues credentials that small).
///
/// Deterministic and pure; operates on characters, not bytes, so
/// multibyte input cannot split a UTF-8 sequence.
#[must_use]
pub fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= MASK_THRESHOLD {
        return value.to_string();
    }

    let prefix: String = chars[..PREFIX_LEN].iter().collect();
    let suffix: String = chars[chars.len() - SUFFIX_LEN..].iter().collect();
    format!("{prefix}...{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_values_pass_through_unchanged() {
        assert_eq!(mask("abc"), "abc");
        assert_eq!(mask("123456789012"), "123456789012");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn thirteen_chars_is_the_first_masked_length() {
        assert_eq!(mask("1234567890123"), "12345678...0123");
    }

    #[test]
    fn long_key_keeps_eight_prefix_and_four_suffix() {
        let key = format!("sk-{}", "x".repeat(40));
        let masked = mask(&key);
        assert_eq!(masked, "sk-xxxxx...xxxx");
        assert!(!masked.contains(&"x".repeat(20)));
    }

    #[test]
    fn masking_is_deterministic() {
        let key = "sk-ant-REDACTED";
        assert_eq!(mask(key), mask(key));
    }

    #[test]
    fn multibyte_input_does_not_split_characters() {
        let value = "ключ-секретный-длинный";
        let masked = mask(value);
        assert!(masked.contains("..."));
        // Still a valid string; prefix is 8 characters.
        assert_eq!(masked.chars().take_while(|&c| c != '.').count(), 8);
    }
}
