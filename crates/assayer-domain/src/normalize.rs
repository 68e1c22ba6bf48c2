//! String-to-number coercion for values quoted from report tables
//!
//! Extraction output frequently carries numbers as display strings
//! (`"1,850"`, `"(23)"`, `"4.1 Mt"`). These helpers recover the value.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// First decimal number in a string
    static ref NUMBER_PATTERN: Regex = Regex::new(r"(\d+\.?\d*)").unwrap();

    /// Running header and footer noise in report text layers
    static ref PAGE_FOOTER_PATTERN: Regex = Regex::new(r"Page \d+ of \d+").unwrap();
    static ref REPORT_HEADER_PATTERN: Regex =
        Regex::new(r"(?i)NI 43-101 Technical Report").unwrap();
    static ref WHITESPACE_PATTERN: Regex = Regex::new(r"\s+").unwrap();
}

/// Parse a display number
///
/// Thousands separators, currency symbols and units are ignored. Accounting
/// negatives `(23)` and a leading `-` yield negative values. Returns `None`
/// when the string has no digits.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.replace(',', "");
    let s = s.trim();

    let value = first_number(s)?;
    Some(if is_negative(s) { -value } else { value })
}

fn first_number(s: &str) -> Option<f64> {
    NUMBER_PATTERN
        .captures(s)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Accounting parentheses or a leading minus, ignoring a currency prefix
fn is_negative(s: &str) -> bool {
    (s.starts_with('(') && s.ends_with(')'))
        || s.trim_start_matches(['$', ' ']).starts_with('-')
}

/// Parse a tonnage into tonnes
///
/// - `"4.1 Mt"`, `"4.1 million tonnes"` → 4,100,000
/// - `"1,515 kt"`, `"1515 thousand tonnes"` → 1,515,000
/// - a bare number below 100 is read as millions of tonnes
///
/// Signs follow [`parse_number`], so `"-1.2 Mt"` and `"(500 kt)"` come back
/// negative.
pub fn normalize_tonnes(raw: &str) -> Option<f64> {
    let s = raw.to_lowercase().replace(',', "");
    let s = s.trim();

    let num = first_number(s)?;
    let tonnes = if s.contains("mt") || s.contains("million") {
        (num * 1_000_000.0).round()
    } else if s.contains("kt") || s.contains("thousand") {
        (num * 1_000.0).round()
    } else if num < 100.0 {
        (num * 1_000_000.0).round()
    } else {
        num
    };

    Some(if is_negative(s) { -tonnes } else { tonnes })
}

/// Strip page footers and running headers, then collapse whitespace
pub fn clean_page_text(text: &str) -> String {
    let text = PAGE_FOOTER_PATTERN.replace_all(text, "");
    let text = REPORT_HEADER_PATTERN.replace_all(&text, "");
    WHITESPACE_PATTERN.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_plain() {
        assert_eq!(parse_number("1,850"), Some(1850.0));
        assert_eq!(parse_number("95.2%"), Some(95.2));
        assert_eq!(parse_number("$36,758"), Some(36758.0));
        assert_eq!(parse_number("  14.31 g/t "), Some(14.31));
    }

    #[test]
    fn test_parse_number_negative() {
        assert_eq!(parse_number("(23)"), Some(-23.0));
        assert_eq!(parse_number("-4.5"), Some(-4.5));
        assert_eq!(parse_number("$-12"), Some(-12.0));
    }

    #[test]
    fn test_parse_number_without_digits() {
        assert_eq!(parse_number("N/A"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_normalize_tonnes_units() {
        assert_eq!(normalize_tonnes("4.1 Mt"), Some(4_100_000.0));
        assert_eq!(normalize_tonnes("4.1 million tonnes"), Some(4_100_000.0));
        assert_eq!(normalize_tonnes("1,515 kt"), Some(1_515_000.0));
        assert_eq!(normalize_tonnes("467 thousand tonnes"), Some(467_000.0));
    }

    #[test]
    fn test_normalize_tonnes_bare_numbers() {
        assert_eq!(normalize_tonnes("4.1"), Some(4_100_000.0));
        assert_eq!(normalize_tonnes("250000"), Some(250_000.0));
        assert_eq!(normalize_tonnes("-"), None);
    }

    #[test]
    fn test_normalize_tonnes_keeps_sign() {
        assert_eq!(normalize_tonnes("-1.2 Mt"), Some(-1_200_000.0));
        assert_eq!(normalize_tonnes("(500 kt)"), Some(-500_000.0));
        assert_eq!(normalize_tonnes("-4.1"), Some(-4_100_000.0));
        assert_eq!(normalize_tonnes("-250,000 t"), Some(-250_000.0));
    }

    #[test]
    fn test_clean_page_text() {
        let raw = "NI 43-101 Technical Report\nMineral   Resources\n\nPage 12 of 200";
        assert_eq!(clean_page_text(raw), "Mineral Resources");
    }
}
