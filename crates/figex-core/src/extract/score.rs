//! Plausibility scoring: a declarative table of signed heuristics.
//!
//! No single rule is authoritative; the score of a candidate is the sum of
//! the contributions of every rule whose predicate holds. Keeping the rules
//! in one table lets each heuristic be tuned and tested in isolation.

use tracing::trace;

use super::patterns::{
    CENTS_PATTERN, CURRENCY_PATTERN, FOOTNOTE_PATTERN, LOSS_PATTERN, STRUCTURAL_PATTERN,
    TOTAL_PATTERN,
};

/// Maximum distance (bytes) between term and token for the proximity bonus.
const PROXIMITY_RANGE: usize = 25;

/// Lines from either end of the document counting as the summary region.
const EDGE_LINES: usize = 20;

/// Term-set document frequency beyond which a mention reads as boilerplate.
const REPEAT_LIMIT: usize = 4;

/// Everything a scoring rule may inspect for one candidate.
#[derive(Debug)]
pub struct ScoreContext<'a> {
    /// Canonical label under extraction, lowercased.
    pub label_lower: &'a str,
    /// Whether the fired term is the canonical label rather than a synonym.
    pub term_is_canonical: bool,
    /// Distinct dictionary terms that hit the line.
    pub terms_hit: usize,
    /// Source line / window, lowercased.
    pub line_lower: &'a str,
    /// Raw token text as found in the line.
    pub raw_token: &'a str,
    /// Normalized value after magnitude scaling.
    pub value: f64,
    /// Gap in bytes between the matched term and the token.
    pub term_distance: usize,
    /// Zero-based line index and document line count.
    pub line_index: usize,
    pub total_lines: usize,
    /// Total hits for this label's term set across the whole document.
    pub doc_hits: usize,
}

/// A single scoring heuristic: a fixed signed weight plus a predicate.
pub struct Weight {
    /// Stable rule identifier, surfaced in trace logs.
    pub name: &'static str,
    /// Signed contribution when the predicate holds.
    pub points: i32,
    /// Whether the rule applies to the candidate.
    pub applies: fn(&ScoreContext) -> bool,
}

/// The full rule set. Order is irrelevant.
pub static WEIGHTS: &[Weight] = &[
    Weight {
        name: "canonical-label",
        points: 4,
        applies: |c| c.line_lower.contains(c.label_lower),
    },
    Weight {
        name: "synonym-match",
        points: 2,
        applies: |c| !c.term_is_canonical,
    },
    Weight {
        name: "single-term",
        points: 1,
        applies: |c| c.terms_hit == 1,
    },
    Weight {
        name: "proximity",
        points: 2,
        applies: |c| c.term_distance <= PROXIMITY_RANGE,
    },
    Weight {
        name: "currency",
        points: 1,
        applies: |c| CURRENCY_PATTERN.is_match(c.line_lower) || CENTS_PATTERN.is_match(c.line_lower),
    },
    Weight {
        name: "magnitude-band",
        points: 2,
        applies: |c| c.value.abs() >= 1e3 && c.value.abs() <= 1e12,
    },
    Weight {
        name: "document-edge",
        points: 1,
        applies: |c| c.line_index < EDGE_LINES || c.line_index + EDGE_LINES >= c.total_lines,
    },
    Weight {
        name: "tabular",
        points: 1,
        applies: |c| c.line_lower.contains(':') || c.line_lower.contains('\t'),
    },
    Weight {
        name: "total-keyword",
        points: 2,
        applies: |c| TOTAL_PATTERN.is_match(c.line_lower),
    },
    Weight {
        name: "loss-sign",
        points: 1,
        applies: |c| c.value < 0.0 && LOSS_PATTERN.is_match(c.line_lower),
    },
    Weight {
        name: "bare-year",
        points: -3,
        applies: |c| is_bare_year(c.raw_token),
    },
    Weight {
        name: "structural",
        points: 1,
        applies: |c| STRUCTURAL_PATTERN.is_match(c.line_lower),
    },
    Weight {
        name: "footnote",
        points: -2,
        applies: |c| FOOTNOTE_PATTERN.is_match(c.line_lower),
    },
    Weight {
        name: "repeated-term",
        points: -1,
        applies: |c| c.doc_hits > REPEAT_LIMIT,
    },
];

/// Sum the contributions of every applicable rule.
pub fn score_candidate(ctx: &ScoreContext) -> i32 {
    let mut total = 0;
    for rule in WEIGHTS {
        if (rule.applies)(ctx) {
            trace!(rule = rule.name, points = rule.points, "rule fired");
            total += rule.points;
        }
    }
    total
}

/// A 4-digit token in the 1900-2100 range with no separators: almost always
/// a calendar year, the main false-positive source in statement text.
fn is_bare_year(token: &str) -> bool {
    token.len() == 4
        && token.chars().all(|c| c.is_ascii_digit())
        && matches!(token.parse::<i32>(), Ok(year) if (1900..=2100).contains(&year))
}
