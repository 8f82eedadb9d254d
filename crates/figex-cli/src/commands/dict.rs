//! Dict command - inspect or export the active label dictionary.

use std::path::PathBuf;

use clap::Args;
use console::style;

use super::load_dictionary;

/// Arguments for the dict command.
#[derive(Args)]
pub struct DictArgs {
    /// Write the dictionary to a JSON file instead of listing it
    #[arg(short, long)]
    export: Option<PathBuf>,
}

pub fn run(args: DictArgs, dictionary_path: Option<&str>) -> anyhow::Result<()> {
    let dictionary = load_dictionary(dictionary_path)?;

    if let Some(path) = &args.export {
        dictionary.save(path)?;
        println!(
            "{} Dictionary with {} labels written to {}",
            style("\u{2713}").green(),
            dictionary.len(),
            path.display()
        );
        return Ok(());
    }

    for entry in dictionary.entries() {
        println!("{}", style(&entry.label).bold());
        for synonym in &entry.synonyms {
            println!("  {}", synonym);
        }
    }
    Ok(())
}
