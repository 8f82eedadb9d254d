//! Common regex patterns for figure extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Signed decimal number; `.` and `,` may be grouping or decimal
    // separators depending on locale. Normalization decides which.
    pub static ref NUMBER_PATTERN: Regex = Regex::new(
        r"-?\d+(?:[.,]\d+)*"
    ).unwrap();

    // Currency symbols and codes commonly found next to statement figures.
    pub static ref CURRENCY_PATTERN: Regex = Regex::new(
        r"(?i)[\u{20ac}$\u{a3}]|\bEUR\b|\bUSD\b|\bGBP\b|\bCHF\b"
    ).unwrap();

    // Two-decimal cents tail ("1.234,56" / "1,234.56").
    pub static ref CENTS_PATTERN: Regex = Regex::new(
        r"\d[.,]\d{2}\b"
    ).unwrap();

    // Summary-row wording: total, totals, totale, totali.
    pub static ref TOTAL_PATTERN: Regex = Regex::new(
        r"(?i)\btotal[ei]?s?\b"
    ).unwrap();

    // Structural wording typical of statement sections.
    pub static ref STRUCTURAL_PATTERN: Regex = Regex::new(
        r"(?i)\b(consolidated|consolidato|statements?|balance|income|bilancio|prospetto)\b"
    ).unwrap();

    // Footnote or relative-figure wording; such lines rarely carry the
    // absolute figure being extracted.
    pub static ref FOOTNOTE_PATTERN: Regex = Regex::new(
        r"(?i)%|\bpercent(?:age)?\b|\bpercentuale\b|\bnotes?\b|\bnota\b"
    ).unwrap();

    // Loss / cost wording used for sign plausibility.
    pub static ref LOSS_PATTERN: Regex = Regex::new(
        r"(?i)\b(loss(?:es)?|perdit[ae]|cost[io]?s?|expenses?|oneri|spese)\b"
    ).unwrap();

    // Magnitude unit cues, largest first.
    pub static ref BILLIONS_CUE: Regex = Regex::new(
        r"(?i)\b(billions?|miliard[oi]|mld|bn)\b"
    ).unwrap();

    pub static ref MILLIONS_CUE: Regex = Regex::new(
        r"(?i)\b(millions?|milion[ei]|mln)\b"
    ).unwrap();

    pub static ref THOUSANDS_CUE: Regex = Regex::new(
        r"(?i)\b(thousands?|migliaia)\b"
    ).unwrap();
}
