//! Core library for financial figure extraction.
//!
//! This crate provides:
//! - A multilingual label dictionary (canonical concept -> synonym phrases)
//! - Heuristic candidate scanning and scoring over noisy statement text
//! - Locale-tolerant number normalization with magnitude unit cues
//! - A persisted store of human-confirmed extraction overrides
//! - Financial ratio (KPI) computation over extracted figures

pub mod dictionary;
pub mod error;
pub mod extract;
pub mod kpi;
pub mod store;

pub use dictionary::{LabelDictionary, LabelEntry};
pub use error::{DictionaryError, FigexError, Result, StoreError};
pub use extract::{Candidate, ExtractionReport, FigureExtractor};
pub use kpi::{compute_kpis, Kpi};
pub use store::{ConfirmationStore, ConfirmedEntry};
