//! Figure extraction pipeline: scanning, normalization, scoring, selection.

mod engine;
pub mod normalize;
pub mod patterns;
pub mod scanner;
pub mod score;

pub use engine::{ExtractionReport, FigureExtractor};

use serde::Serialize;

/// A scored extraction candidate for one label.
///
/// Candidates are transient: they exist only within a single extraction call
/// and are surfaced in the report for human review.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    /// Canonical label the candidate was produced for.
    pub label: String,
    /// The dictionary term that fired (canonical label or synonym).
    pub matched_term: String,
    /// Normalized numeric value, magnitude scaling applied.
    pub value: f64,
    /// Heuristic plausibility score; higher ranks first, may be negative.
    pub score: i32,
    /// The line (or two-line window) the value came from.
    pub source_text: String,
    /// Zero-based index of the matching line in the document.
    pub line_index: usize,
}
