//! Error types for the figex-core library.

use thiserror::Error;

/// Main error type for the figex library.
#[derive(Error, Debug)]
pub enum FigexError {
    /// Confirmation store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Label dictionary error.
    #[error("dictionary error: {0}")]
    Dictionary(#[from] DictionaryError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to the persisted confirmation store.
///
/// Note that a malformed store file is *not* an error: lookups treat it as an
/// empty store so extraction never fails on corrupt confirmation history.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read or write the store file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize the store for writing.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to atomically replace the store file.
    #[error("failed to replace store file: {0}")]
    Persist(String),
}

/// Errors related to loading or saving a label dictionary.
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// Failed to read the dictionary file.
    #[error("failed to read dictionary: {0}")]
    Io(#[from] std::io::Error),

    /// The dictionary file is not valid JSON.
    #[error("invalid dictionary format: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for the figex library.
pub type Result<T> = std::result::Result<T, FigexError>;
