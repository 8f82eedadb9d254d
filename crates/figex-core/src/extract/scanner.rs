//! Candidate scanning: find label-bearing lines and harvest numeric tokens.

use strsim::normalized_levenshtein;

use super::patterns::NUMBER_PATTERN;

/// Default minimum similarity ratio for a fuzzy term match.
pub const FUZZY_THRESHOLD: f64 = 0.85;

/// A line that mentions a dictionary term for one label.
#[derive(Debug, Clone)]
pub struct LineMatch {
    /// Zero-based index of the matching line.
    pub line_index: usize,
    /// The term that fired (first in scan order: canonical label, then
    /// synonyms in dictionary order).
    pub matched_term: String,
    /// Whether `matched_term` is the canonical label.
    pub is_canonical: bool,
    /// Byte offset of the term within the line. Approximate for fuzzy hits.
    pub term_offset: usize,
    /// How many distinct dictionary terms hit this line.
    pub terms_hit: usize,
    /// The matching line, extended with one line of lookahead when the line
    /// itself carries no numeric token.
    pub window: String,
    /// Raw numeric tokens found in the window. May be empty; filtering is
    /// the scorer's job, not the scanner's.
    pub tokens: Vec<RawToken>,
}

/// A raw numeric token prior to normalization.
#[derive(Debug, Clone)]
pub struct RawToken {
    /// Token text as found, separators included.
    pub text: String,
    /// Byte offset within the window.
    pub offset: usize,
    /// Set when the token is wrapped in parentheses (accounting negative).
    pub parenthesized: bool,
}

/// Walk `lines` and report every line containing `label` or one of
/// `synonyms`, case-insensitively. When exact containment fails for a term,
/// a fuzzy match with similarity >= `fuzzy_threshold` against same-length
/// word windows of the line is tried instead. Pure function of its inputs.
pub fn scan_label(
    lines: &[&str],
    label: &str,
    synonyms: &[String],
    fuzzy_threshold: f64,
) -> Vec<LineMatch> {
    let label_lower = label.to_lowercase();
    let mut terms: Vec<(String, String, bool)> = Vec::with_capacity(synonyms.len() + 1);
    terms.push((label.to_string(), label_lower.clone(), true));
    for synonym in synonyms {
        let lower = synonym.to_lowercase();
        if lower != label_lower {
            terms.push((synonym.clone(), lower, false));
        }
    }

    let mut matches = Vec::new();

    for (line_index, line) in lines.iter().enumerate() {
        let line_lower = line.to_lowercase();
        let mut first: Option<(&str, bool, usize)> = None;
        let mut terms_hit = 0usize;

        for (term, term_lower, is_canonical) in &terms {
            let hit = line_lower
                .find(term_lower.as_str())
                .or_else(|| fuzzy_find(&line_lower, term_lower, fuzzy_threshold));
            if let Some(offset) = hit {
                terms_hit += 1;
                if first.is_none() {
                    first = Some((term.as_str(), *is_canonical, offset));
                }
            }
        }

        let Some((matched_term, is_canonical, term_offset)) = first else {
            continue;
        };

        let mut window = (*line).to_string();
        let mut tokens = collect_tokens(&window);
        if tokens.is_empty() && line_index + 1 < lines.len() {
            window.push('\n');
            window.push_str(lines[line_index + 1]);
            tokens = collect_tokens(&window);
        }

        matches.push(LineMatch {
            line_index,
            matched_term: matched_term.to_string(),
            is_canonical,
            term_offset,
            terms_hit,
            window,
            tokens,
        });
    }

    matches
}

/// Extract every raw numeric token from `text`.
fn collect_tokens(text: &str) -> Vec<RawToken> {
    NUMBER_PATTERN
        .find_iter(text)
        .map(|m| {
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            RawToken {
                text: m.as_str().to_string(),
                offset: m.start(),
                parenthesized: before == Some('(') && after == Some(')'),
            }
        })
        .collect()
}

/// Fuzzy containment: slide a window of as many words as `term` has over the
/// line and compare each window against the term. Returns the byte offset of
/// the best-matching window, if any reaches the threshold.
fn fuzzy_find(line: &str, term: &str, threshold: f64) -> Option<usize> {
    let term_words = term.split_whitespace().count();
    if term_words == 0 {
        return None;
    }

    let mut words: Vec<(usize, &str)> = Vec::new();
    let mut pos = 0usize;
    for word in line.split_whitespace() {
        if let Some(found) = line[pos..].find(word) {
            let offset = pos + found;
            words.push((offset, word));
            pos = offset + word.len();
        }
    }
    if words.len() < term_words {
        return None;
    }

    let mut best: Option<(f64, usize)> = None;
    for window in words.windows(term_words) {
        let start = window[0].0;
        let end = window[term_words - 1].0 + window[term_words - 1].1.len();
        let gram = line[start..end].trim_matches(|c: char| !c.is_alphanumeric());
        let similarity = normalized_levenshtein(gram, term);
        if similarity >= threshold && best.map_or(true, |(s, _)| similarity > s) {
            best = Some((similarity, start));
        }
    }
    best.map(|(_, offset)| offset)
}
