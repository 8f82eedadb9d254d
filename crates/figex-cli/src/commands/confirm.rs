//! Confirm command - record a human-validated value into the override store.

use std::path::PathBuf;

use clap::Args;
use console::style;

use figex_core::ConfirmationStore;

use super::default_store_path;

/// Arguments for the confirm command.
#[derive(Args)]
pub struct ConfirmArgs {
    /// Canonical label the value belongs to (e.g. "Revenue")
    #[arg(required = true)]
    label: String,

    /// Verbatim source snippet the value was read from
    #[arg(required = true)]
    snippet: String,

    /// Confirmed numeric value
    #[arg(required = true, allow_negative_numbers = true)]
    value: f64,

    /// Confirmation store file (default: per-user config dir)
    #[arg(short, long)]
    store: Option<PathBuf>,
}

pub fn run(args: ConfirmArgs) -> anyhow::Result<()> {
    if args.snippet.trim().is_empty() {
        anyhow::bail!("Snippet must not be empty: it is matched verbatim against future documents");
    }

    let store_path = args.store.clone().unwrap_or_else(default_store_path);
    let store = ConfirmationStore::new(&store_path);
    store.record(&args.label, &args.snippet, args.value)?;

    println!(
        "{} Recorded {} = {} for snippet {:?} in {}",
        style("\u{2713}").green(),
        args.label,
        args.value,
        args.snippet,
        store_path.display()
    );
    Ok(())
}
