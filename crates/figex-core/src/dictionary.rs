//! Label dictionary: canonical financial concepts and their synonyms.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DictionaryError;

/// A canonical label and its alternate phrasings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEntry {
    /// Canonical label, e.g. "Revenue".
    pub label: String,

    /// Alternate phrases in any supported language. Order carries no
    /// matching priority.
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// Mapping from canonical label to synonym phrases.
///
/// Loaded once per process and treated as read-only configuration during
/// extraction. Hosts may extend it (additional labels or locales) before
/// handing it to the extractor; the engine itself never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelDictionary {
    entries: Vec<LabelEntry>,
}

impl LabelDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a label with its synonyms, or extend the synonyms of an existing
    /// label.
    pub fn insert(&mut self, label: impl Into<String>, synonyms: &[&str]) {
        let label = label.into();
        match self.entries.iter_mut().find(|e| e.label == label) {
            Some(entry) => {
                for s in synonyms {
                    if !entry.synonyms.iter().any(|existing| existing == s) {
                        entry.synonyms.push((*s).to_string());
                    }
                }
            }
            None => self.entries.push(LabelEntry {
                label,
                synonyms: synonyms.iter().map(|s| (*s).to_string()).collect(),
            }),
        }
    }

    /// Add a single synonym to an existing label. No-op for unknown labels.
    pub fn add_synonym(&mut self, label: &str, synonym: impl Into<String>) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.label == label) {
            let synonym = synonym.into();
            if !entry.synonyms.contains(&synonym) {
                entry.synonyms.push(synonym);
            }
        }
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[LabelEntry] {
        &self.entries
    }

    /// Look up an entry by canonical label.
    pub fn get(&self, label: &str) -> Option<&LabelEntry> {
        self.entries.iter().find(|e| e.label == label)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a dictionary from a JSON file.
    pub fn from_file(path: &Path) -> std::result::Result<Self, DictionaryError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save the dictionary to a JSON file.
    pub fn save(&self, path: &Path) -> std::result::Result<(), DictionaryError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for LabelDictionary {
    /// Built-in English/Italian dictionary covering the usual statement
    /// figures.
    fn default() -> Self {
        let mut dict = Self::new();
        dict.insert(
            "Revenue",
            &[
                "total revenues",
                "net revenues",
                "revenues",
                "sales",
                "turnover",
                "ricavi",
                "fatturato",
            ],
        );
        dict.insert(
            "Net Income",
            &[
                "net income",
                "net profit",
                "profit for the year",
                "utile netto",
                "risultato netto",
            ],
        );
        dict.insert(
            "Total Assets",
            &["total assets", "totale attivo", "attivit\u{e0} totali"],
        );
        dict.insert(
            "Equity",
            &["total equity", "shareholders' equity", "patrimonio netto"],
        );
        dict.insert(
            "Total Debts",
            &[
                "total liabilities",
                "total debts",
                "liabilities",
                "debiti totali",
                "debiti",
            ],
        );
        dict.insert("EBITDA", &["ebitda", "margine operativo lordo"]);
        dict.insert(
            "Operating Costs",
            &["operating expenses", "operating costs", "costi operativi"],
        );
        dict.insert(
            "Cash Flow",
            &["cash flow", "net cash", "flusso di cassa"],
        );
        dict
    }
}
