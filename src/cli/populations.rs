use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::records::LocusSummary;
use crate::parsing::populations;

#[derive(Args)]
pub struct PopulationsArgs {
    /// populations.log file (plain or gzip-compressed)
    #[arg(required = true)]
    pub log: PathBuf,
}

/// Execute populations subcommand
///
/// # Errors
///
/// Returns an error if the log cannot be read or the SNP distribution table
/// is missing or invalid.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: PopulationsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let summary = populations::parse_file(&args.log)?;

    if verbose {
        eprintln!("Parsed SNP distribution table from {}", args.log.display());
    }

    match format {
        OutputFormat::Text => print_text_summary(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Tsv => print!("{}", summary.to_tsv()),
    }

    Ok(())
}

fn print_text_summary(summary: &LocusSummary) {
    println!("Loci:             {}", summary.loci);
    println!("Polymorphic loci: {}", summary.polymorphic_loci);
    println!("SNPs:             {}", summary.snps);
}
