use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::records::CoverageTable;
use crate::parsing::denovo_map;

#[derive(Args)]
pub struct DenovoMapArgs {
    /// denovo_map.log file (plain or gzip-compressed)
    #[arg(required = true)]
    pub log: PathBuf,
}

/// Execute denovo-map subcommand
///
/// # Errors
///
/// Returns an error if the log cannot be read or parsed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: DenovoMapArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let table = denovo_map::parse_file(&args.log)?;

    if verbose {
        eprintln!(
            "Parsed {} samples from {}",
            table.len(),
            args.log.display()
        );
    }

    match format {
        OutputFormat::Text => print_text_table(&table),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&table)?),
        OutputFormat::Tsv => print!("{}", table.to_tsv()),
    }

    Ok(())
}

fn print_text_table(table: &CoverageTable) {
    if table.is_empty() {
        println!("No sample blocks found.");
        return;
    }

    let width = table
        .records()
        .iter()
        .map(|r| r.sample.len())
        .max()
        .unwrap_or(0)
        .max("Sample".len());

    println!("{:<width$}  {:>12}  {:>12}", "Sample", "Unmerged cov", "Merged cov");
    println!("{}", "-".repeat(width + 28));
    for r in table.records() {
        println!(
            "{:<width$}  {:>12.2}  {:>12.2}",
            r.sample, r.unmerged_cov, r.merged_cov
        );
    }
}
