//! Extraction orchestration: confirmed overrides, scanning, scoring,
//! selection.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::dictionary::{LabelDictionary, LabelEntry};
use crate::store::ConfirmationStore;

use super::normalize::{detect_multiplier, parse_number, HEADER_LINES};
use super::scanner::{scan_label, LineMatch, FUZZY_THRESHOLD};
use super::score::{score_candidate, ScoreContext};
use super::Candidate;

/// Result of one extraction call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionReport {
    /// Chosen value per label. A label with no plausible figure is absent.
    pub values: BTreeMap<String, f64>,
    /// Ranked candidates per label, best first, for human review.
    pub candidates: BTreeMap<String, Vec<Candidate>>,
    /// Labels resolved from the confirmation store instead of a scan.
    pub confirmed: Vec<String>,
    /// Per-label extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub elapsed_ms: u64,
}

impl ExtractionReport {
    /// Value for `label`, or 0.0 when nothing was found.
    pub fn value_or_zero(&self, label: &str) -> f64 {
        self.values.get(label).copied().unwrap_or(0.0)
    }
}

/// Figure extraction engine.
///
/// Holds read-only configuration only; all per-call state lives on the
/// stack, so independent documents can be processed from separate calls in
/// parallel.
pub struct FigureExtractor {
    dictionary: LabelDictionary,
    fuzzy_threshold: f64,
    header_lines: usize,
    collect_candidates: bool,
}

impl FigureExtractor {
    /// Create an extractor over the given dictionary with default settings.
    pub fn new(dictionary: LabelDictionary) -> Self {
        Self {
            dictionary,
            fuzzy_threshold: FUZZY_THRESHOLD,
            header_lines: HEADER_LINES,
            collect_candidates: true,
        }
    }

    /// Set the minimum similarity ratio for fuzzy term matches.
    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    /// Set how many leading lines form the unit-cue header region.
    pub fn with_header_lines(mut self, lines: usize) -> Self {
        self.header_lines = lines;
        self
    }

    /// Control whether ranked candidate lists are kept in the report.
    pub fn with_candidates(mut self, collect: bool) -> Self {
        self.collect_candidates = collect;
        self
    }

    /// The dictionary this extractor scans with.
    pub fn dictionary(&self) -> &LabelDictionary {
        &self.dictionary
    }

    /// Extract every dictionary label from `text`.
    ///
    /// Never fails: labels without a plausible figure are simply absent from
    /// the result, and empty input yields an empty report.
    pub fn extract(&self, text: &str) -> ExtractionReport {
        self.run(text, None)
    }

    /// Extract with confirmed-override lookup before any scanning.
    pub fn extract_with_store(&self, text: &str, store: &ConfirmationStore) -> ExtractionReport {
        self.run(text, Some(store))
    }

    fn run(&self, text: &str, store: Option<&ConfirmationStore>) -> ExtractionReport {
        let start = Instant::now();
        let mut report = ExtractionReport::default();

        let lines: Vec<&str> = text.lines().collect();
        let header: String = lines
            .iter()
            .take(self.header_lines)
            .copied()
            .collect::<Vec<_>>()
            .join("\n");

        info!(
            labels = self.dictionary.len(),
            lines = lines.len(),
            "extracting figures"
        );

        for entry in self.dictionary.entries() {
            // Human-confirmed overrides short-circuit the scan entirely.
            if let Some(store) = store {
                if let Some(value) = store.lookup(text, &entry.label) {
                    debug!(label = %entry.label, value, "confirmed override hit");
                    report.values.insert(entry.label.clone(), value);
                    report.confirmed.push(entry.label.clone());
                    continue;
                }
            }

            let mut candidates = self.scan_candidates(&lines, &header, entry);
            // Stable sort: ties keep first-scanned order.
            candidates.sort_by_key(|c| Reverse(c.score));

            match candidates.first() {
                Some(best) => {
                    debug!(
                        label = %entry.label,
                        value = best.value,
                        score = best.score,
                        "selected candidate"
                    );
                    report.values.insert(entry.label.clone(), best.value);
                }
                None => {
                    report
                        .warnings
                        .push(format!("no candidates found for {}", entry.label));
                }
            }

            if self.collect_candidates {
                report.candidates.insert(entry.label.clone(), candidates);
            }
        }

        report.elapsed_ms = start.elapsed().as_millis() as u64;
        report
    }

    fn scan_candidates(&self, lines: &[&str], header: &str, entry: &LabelEntry) -> Vec<Candidate> {
        let matches = scan_label(lines, &entry.label, &entry.synonyms, self.fuzzy_threshold);
        let doc_hits: usize = matches.iter().map(|m| m.terms_hit).sum();
        let label_lower = entry.label.to_lowercase();

        let mut candidates = Vec::new();
        for line_match in &matches {
            self.candidates_for_line(
                line_match,
                entry,
                &label_lower,
                header,
                lines.len(),
                doc_hits,
                &mut candidates,
            );
        }
        candidates
    }

    #[allow(clippy::too_many_arguments)]
    fn candidates_for_line(
        &self,
        line_match: &LineMatch,
        entry: &LabelEntry,
        label_lower: &str,
        header: &str,
        total_lines: usize,
        doc_hits: usize,
        out: &mut Vec<Candidate>,
    ) {
        let window_lower = line_match.window.to_lowercase();
        let multiplier = detect_multiplier(&line_match.window, header);
        let term_end = line_match.term_offset + line_match.matched_term.len();

        for token in &line_match.tokens {
            // Unparseable tokens are skipped, not the whole line.
            let Some(mut value) = parse_number(&token.text, multiplier > 1.0) else {
                continue;
            };
            if token.parenthesized {
                value = -value;
            }
            value *= multiplier;

            let token_end = token.offset + token.text.len();
            let term_distance = if token.offset >= term_end {
                token.offset - term_end
            } else if line_match.term_offset >= token_end {
                line_match.term_offset - token_end
            } else {
                0
            };

            let score = score_candidate(&ScoreContext {
                label_lower,
                term_is_canonical: line_match.is_canonical,
                terms_hit: line_match.terms_hit,
                line_lower: &window_lower,
                raw_token: &token.text,
                value,
                term_distance,
                line_index: line_match.line_index,
                total_lines,
                doc_hits,
            });

            out.push(Candidate {
                label: entry.label.clone(),
                matched_term: line_match.matched_term.clone(),
                value,
                score,
                source_text: line_match.window.clone(),
                line_index: line_match.line_index,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ConfirmationStore;

    fn extractor() -> FigureExtractor {
        FigureExtractor::new(LabelDictionary::default())
    }

    #[test]
    fn test_italian_formatted_total_revenues() {
        let report = extractor().extract("Total revenues: \u{20ac} 1.234.567,89");
        assert_eq!(report.value_or_zero("Revenue"), 1_234_567.89);
    }

    #[test]
    fn test_year_token_is_never_selected_over_a_figure() {
        let text = "Net income 2023: 45,000,000\nNet income 2022: 40,000,000";
        let report = extractor().extract(text);

        let value = report.value_or_zero("Net Income");
        assert!(
            (value - 45_000_000.0).abs() < f64::EPSILON || (value - 40_000_000.0).abs() < f64::EPSILON,
            "selected {value}, expected one of the two figures"
        );
        // First-scanned line wins the tie between the two equally-scored figures.
        assert_eq!(value, 45_000_000.0);
    }

    #[test]
    fn test_missing_labels_are_absent_not_errors() {
        let report = extractor().extract("Nothing financial in here at all.");
        assert!(report.values.is_empty());
        assert_eq!(report.value_or_zero("Revenue"), 0.0);
        assert!(!report.warnings.is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty_report() {
        let report = extractor().extract("");
        assert!(report.values.is_empty());
        assert!(report.confirmed.is_empty());
    }

    #[test]
    fn test_unit_multiplier_idempotence() {
        let tagged = extractor().extract("Revenue: 1.234 million");
        let absolute = extractor().extract("Revenue: 1,234,000");

        let a = tagged.value_or_zero("Revenue");
        let b = absolute.value_or_zero("Revenue");
        assert!((a - b).abs() < 1.0, "{a} != {b}");
    }

    #[test]
    fn test_header_cue_scales_bare_table_rows() {
        let text = "Consolidated statement (amounts in millions)\n\nRevenues 1.234,5";
        let report = extractor().extract(text);
        assert_eq!(report.value_or_zero("Revenue"), 1_234_500_000.0);
    }

    #[test]
    fn test_total_line_wins_over_plain_line() {
        let text = "Revenues 2,000,000\nTotal revenues 1,000,000";
        let report = extractor().extract(text);
        // Same label, same magnitude band; the "total" row ranks higher even
        // though it is scanned second.
        assert_eq!(report.value_or_zero("Revenue"), 1_000_000.0);
    }

    #[test]
    fn test_parenthesized_loss_is_negative() {
        let report = extractor().extract("Net income (loss) for the year: (45.000)");
        assert_eq!(report.value_or_zero("Net Income"), -45_000.0);
    }

    #[test]
    fn test_candidates_are_ranked_and_optional() {
        let text = "Revenues 2,000,000\nTotal revenues 1,000,000";
        let report = extractor().extract(text);
        let ranked = &report.candidates["Revenue"];
        assert!(ranked.len() >= 2);
        assert!(ranked[0].score >= ranked[1].score);

        let quiet = FigureExtractor::new(LabelDictionary::default())
            .with_candidates(false)
            .extract(text);
        assert!(quiet.candidates.is_empty());
        assert_eq!(quiet.value_or_zero("Revenue"), 1_000_000.0);
    }

    #[test]
    fn test_confirmed_override_beats_scanner() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfirmationStore::new(dir.path().join("confirmed.json"));
        store
            .record("Revenue", "Total revenues: \u{20ac} 1.234.567,89", 999.0)
            .unwrap();

        let text = "Total revenues: \u{20ac} 1.234.567,89";
        let report = extractor().extract_with_store(text, &store);
        assert_eq!(report.value_or_zero("Revenue"), 999.0);
        assert_eq!(report.confirmed, vec!["Revenue".to_string()]);
    }

    #[test]
    fn test_confirmed_override_is_stable_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfirmationStore::new(dir.path().join("confirmed.json"));
        store.record("Revenue", "Total revenues", 123_456.78).unwrap();

        let text = "Total revenues: 9.999";
        for _ in 0..3 {
            let report = extractor().extract_with_store(text, &store);
            assert_eq!(report.value_or_zero("Revenue"), 123_456.78);
        }
    }
}
