//! Batch command - extract figures from many text files at once.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use figex_core::{ConfirmationStore, ExtractionReport, FigureExtractor};

use super::{default_store_path, load_dictionary};
use super::extract::{format_report, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern (e.g. "statements/*.txt")
    #[arg(required = true)]
    pattern: String,

    /// Directory for per-file reports (default: print to stdout)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also write a summary CSV across all files
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Confirmation store file (default: per-user config dir)
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Skip the confirmation store entirely
    #[arg(long)]
    no_store: bool,

    /// Stop at the first file that fails to read
    #[arg(long)]
    fail_fast: bool,
}

pub fn run(args: BatchArgs, dictionary_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let files: Vec<PathBuf> = glob(&args.pattern)?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No files match pattern: {}", args.pattern);
    }

    let dictionary = load_dictionary(dictionary_path)?;
    let labels: Vec<String> = dictionary
        .entries()
        .iter()
        .map(|entry| entry.label.clone())
        .collect();
    let extractor = FigureExtractor::new(dictionary);

    let store = if args.no_store {
        None
    } else {
        Some(ConfirmationStore::new(
            args.store.clone().unwrap_or_else(default_store_path),
        ))
    };

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let mut results: Vec<(PathBuf, ExtractionReport)> = Vec::new();
    let mut failed = 0usize;

    for path in &files {
        progress.set_message(path.display().to_string());

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                if args.fail_fast {
                    anyhow::bail!("failed to read {}: {}", path.display(), err);
                }
                warn!("skipping {}: {}", path.display(), err);
                failed += 1;
                progress.inc(1);
                continue;
            }
        };

        let report = match &store {
            Some(store) => extractor.extract_with_store(&text, store),
            None => extractor.extract(&text),
        };
        debug!(
            "extracted {} figures from {} in {}ms",
            report.values.len(),
            path.display(),
            report.elapsed_ms
        );

        if let Some(dir) = &args.output_dir {
            let name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "report".to_string());
            let extension = match args.format {
                OutputFormat::Json => "json",
                OutputFormat::Csv => "csv",
                OutputFormat::Table => "txt",
            };
            let out_path = dir.join(format!("{}.{}", name, extension));
            fs::write(&out_path, format_report(&report, args.format)?)?;
        } else {
            println!("{}", style(path.display()).bold());
            print!("{}", format_report(&report, args.format)?);
            println!();
        }

        results.push((path.clone(), report));
        progress.inc(1);
    }

    progress.finish_with_message("Done");

    if let Some(summary_path) = &args.summary {
        write_summary(summary_path, &labels, &results)?;
        println!(
            "{} Summary written to {}",
            style("\u{2713}").green(),
            summary_path.display()
        );
    }

    println!(
        "{} {} file(s) processed, {} failed, in {:.1}s",
        style("\u{2713}").green(),
        results.len(),
        failed,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// One summary row per file, one column per dictionary label.
fn write_summary(
    path: &PathBuf,
    labels: &[String],
    results: &[(PathBuf, ExtractionReport)],
) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec!["file".to_string()];
    header.extend(labels.iter().cloned());
    writer.write_record(&header)?;

    for (file, report) in results {
        let mut row = vec![file.display().to_string()];
        for label in labels {
            row.push(
                report
                    .values
                    .get(label)
                    .map(|value| format!("{:.2}", value))
                    .unwrap_or_default(),
            );
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figex_core::LabelDictionary;

    #[test]
    fn test_summary_rows_align_with_labels() {
        let dir = tempfile::tempdir().unwrap();
        let summary = dir.path().join("summary.csv");

        let extractor = FigureExtractor::new(LabelDictionary::default());
        let report = extractor.extract("Total revenues: 1.234.567,89");
        let labels = vec!["Revenue".to_string(), "Equity".to_string()];

        write_summary(
            &summary,
            &labels,
            &[(PathBuf::from("a.txt"), report)],
        )
        .unwrap();

        let content = fs::read_to_string(&summary).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("file,Revenue,Equity"));
        assert_eq!(lines.next(), Some("a.txt,1234567.89,"));
    }
}
