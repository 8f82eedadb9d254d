//! Extract command - pull labeled figures out of a single text file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, info};

use figex_core::{compute_kpis, ConfirmationStore, ExtractionReport, FigureExtractor};

use super::{default_store_path, load_dictionary};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input text file (UTF-8, as produced by PDF/OCR text acquisition)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Confirmation store file (default: per-user config dir)
    #[arg(short, long)]
    store: Option<PathBuf>,

    /// Skip the confirmation store entirely
    #[arg(long)]
    no_store: bool,

    /// Show the top N ranked candidates per label
    #[arg(short, long, value_name = "N")]
    candidates: Option<usize>,

    /// Also compute financial ratios from the extracted figures
    #[arg(long)]
    kpi: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON report
    Json,
    /// CSV rows (label,value)
    Csv,
    /// Aligned plain-text table
    Table,
}

pub fn run(args: ExtractArgs, dictionary_path: Option<&str>) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let text = fs::read_to_string(&args.input)?;
    info!("read {} characters from {}", text.len(), args.input.display());

    let dictionary = load_dictionary(dictionary_path)?;
    let extractor = FigureExtractor::new(dictionary);

    let report = if args.no_store {
        extractor.extract(&text)
    } else {
        let store_path = args.store.clone().unwrap_or_else(default_store_path);
        debug!("using confirmation store at {}", store_path.display());
        extractor.extract_with_store(&text, &ConfirmationStore::new(store_path))
    };

    let output = format_report(&report, args.format)?;
    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("\u{2713}").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    if let Some(top) = args.candidates {
        print_candidates(&report, top);
    }

    if args.kpi {
        println!();
        println!("{}", style("Ratios:").bold());
        for kpi in compute_kpis(&report.values) {
            println!("  {:<20} {:>15.2}", kpi.name, kpi.value);
        }
    }

    for warning in &report.warnings {
        eprintln!("{} {}", style("!").yellow(), warning);
    }

    debug!("extraction finished in {}ms", report.elapsed_ms);
    Ok(())
}

fn print_candidates(report: &ExtractionReport, top: usize) {
    for (label, candidates) in &report.candidates {
        if candidates.is_empty() {
            continue;
        }
        println!();
        println!("{}", style(label).bold());
        for candidate in candidates.iter().take(top) {
            println!(
                "  [{:>3}] {:>18.2}  {}",
                candidate.score,
                candidate.value,
                candidate.source_text.replace('\n', " / ")
            );
        }
    }
}

pub fn format_report(report: &ExtractionReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Table => Ok(format_table(report)),
    }
}

fn format_csv(report: &ExtractionReport) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["label", "value", "confirmed"])?;

    for (label, value) in &report.values {
        let value = format!("{:.2}", value);
        let confirmed = if report.confirmed.contains(label) { "yes" } else { "no" };
        writer.write_record([label.as_str(), value.as_str(), confirmed])?;
    }

    let data = String::from_utf8(writer.into_inner()?)?;
    Ok(data)
}

fn format_table(report: &ExtractionReport) -> String {
    let mut output = String::new();
    for (label, value) in &report.values {
        let marker = if report.confirmed.contains(label) {
            " (confirmed)"
        } else {
            ""
        };
        output.push_str(&format!("{:<20} {:>18.2}{}\n", label, value, marker));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use figex_core::LabelDictionary;

    fn sample_report() -> ExtractionReport {
        let extractor = FigureExtractor::new(LabelDictionary::default());
        extractor.extract("Total revenues: \u{20ac} 1.234.567,89")
    }

    #[test]
    fn test_table_format_lists_values() {
        let table = format_table(&sample_report());
        assert!(table.contains("Revenue"));
        assert!(table.contains("1234567.89"));
    }

    #[test]
    fn test_csv_format_has_header_row() {
        let csv = format_csv(&sample_report()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("label,value,confirmed"));
        assert!(lines.next().unwrap().starts_with("Revenue,1234567.89"));
    }

    #[test]
    fn test_json_format_round_trips() {
        let json = format_report(&sample_report(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["values"]["Revenue"], 1_234_567.89);
    }
}
