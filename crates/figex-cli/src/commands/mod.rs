//! CLI subcommands.

pub mod batch;
pub mod confirm;
pub mod dict;
pub mod extract;

use std::path::{Path, PathBuf};

use figex_core::LabelDictionary;

/// Default confirmation store location: `<config dir>/figex/confirmed.json`.
pub fn default_store_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("figex")
        .join("confirmed.json")
}

/// Load the dictionary from an optional path, falling back to the built-in
/// English/Italian set.
pub fn load_dictionary(path: Option<&str>) -> anyhow::Result<LabelDictionary> {
    match path {
        Some(path) => Ok(LabelDictionary::from_file(Path::new(path))?),
        None => Ok(LabelDictionary::default()),
    }
}
