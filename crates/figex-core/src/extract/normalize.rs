//! Numeric token normalization: locale-ambiguous separators and magnitude
//! unit cues.

use super::patterns::{BILLIONS_CUE, MILLIONS_CUE, THOUSANDS_CUE};

/// Number of leading document lines scanned for document-wide unit cues
/// ("amounts in millions of euro" headers).
pub const HEADER_LINES: usize = 20;

/// Parse a raw numeric token without assuming a fixed locale.
///
/// The final `.`/`,` group of one or two digits is treated as the decimal
/// part; every other separator is thousands grouping. With `prefer_decimal`
/// set (the token sits next to a magnitude cue such as "1.234 million"), a
/// token with a single separator is read as a decimal fraction regardless of
/// group size.
pub fn parse_number(raw: &str, prefer_decimal: bool) -> Option<f64> {
    let raw = raw.trim();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    if !digits.chars().next()?.is_ascii_digit() {
        return None;
    }

    let separators = digits.chars().filter(|c| *c == '.' || *c == ',').count();
    let last_sep = digits.rfind(['.', ',']);

    let normalized: String = match last_sep {
        Some(pos) if prefer_decimal && separators == 1 => {
            format!("{}.{}", &digits[..pos], &digits[pos + 1..])
        }
        Some(pos) if digits.len() - pos - 1 <= 2 => {
            let int_part: String = digits[..pos].chars().filter(char::is_ascii_digit).collect();
            format!("{}.{}", int_part, &digits[pos + 1..])
        }
        _ => digits.chars().filter(char::is_ascii_digit).collect(),
    };

    let value: f64 = normalized.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Magnitude multiplier for a value, from a cue on its own line or, failing
/// that, in the document header region. Exactly one multiplier applies; the
/// largest cue on a line wins.
pub fn detect_multiplier(line: &str, header: &str) -> f64 {
    cue_multiplier(line)
        .or_else(|| cue_multiplier(header))
        .unwrap_or(1.0)
}

fn cue_multiplier(text: &str) -> Option<f64> {
    if BILLIONS_CUE.is_match(text) {
        Some(1e9)
    } else if MILLIONS_CUE.is_match(text) {
        Some(1e6)
    } else if THOUSANDS_CUE.is_match(text) {
        Some(1e3)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_italian_convention() {
        assert_eq!(parse_number("1.234.567,89", false), Some(1_234_567.89));
        assert_eq!(parse_number("12,5", false), Some(12.5));
    }

    #[test]
    fn test_parse_english_convention() {
        assert_eq!(parse_number("45,000,000", false), Some(45_000_000.0));
        assert_eq!(parse_number("1,234.56", false), Some(1_234.56));
    }

    #[test]
    fn test_parse_plain_and_signed() {
        assert_eq!(parse_number("2023", false), Some(2023.0));
        assert_eq!(parse_number("-1.234", false), Some(-1_234.0));
    }

    #[test]
    fn test_three_digit_tail_is_grouping_without_cue() {
        assert_eq!(parse_number("1.234", false), Some(1_234.0));
    }

    #[test]
    fn test_single_separator_is_decimal_next_to_unit_cue() {
        // "1.234 million" reads as 1.234, not 1234.
        assert_eq!(parse_number("1.234", true), Some(1.234));
        // Multi-separator tokens keep the standard rule even when scaled.
        assert_eq!(parse_number("1.234.567,89", true), Some(1_234_567.89));
    }

    #[test]
    fn test_unparseable_tokens_are_skipped() {
        assert_eq!(parse_number("", false), None);
        assert_eq!(parse_number("-", false), None);
        assert_eq!(parse_number("abc", false), None);
    }

    #[test]
    fn test_multiplier_prefers_line_over_header() {
        let header = "Consolidated statement\namounts in thousands of euro";
        assert_eq!(detect_multiplier("Revenue: 1,5 billion", header), 1e9);
        assert_eq!(detect_multiplier("Revenue: 1.500", header), 1e3);
        assert_eq!(detect_multiplier("Revenue: 1.500", ""), 1.0);
    }
}
