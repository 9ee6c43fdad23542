use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use tracing::warn;

use crate::cli::OutputFormat;
use crate::core::records::{CoverageTable, LocusSummary};
use crate::parsing::{denovo_map, populations, ParseError};

#[derive(Args)]
pub struct SummaryArgs {
    /// Stacks output directories, one per parameter set or replicate
    #[arg(required = true)]
    pub dirs: Vec<PathBuf>,

    /// File name of the denovo_map log inside each directory
    #[arg(long, default_value = "denovo_map.log")]
    pub denovo_map_log: PathBuf,

    /// File name of the populations log inside each directory
    #[arg(long, default_value = "populations.log")]
    pub populations_log: PathBuf,

    /// Stop at the first directory that fails to parse
    #[arg(long)]
    pub fail_fast: bool,
}

/// Both log summaries for one Stacks output directory
#[derive(Debug, Serialize)]
pub struct DirectorySummary {
    pub directory: String,
    pub coverage: CoverageTable,
    pub loci: LocusSummary,
}

/// Parse both logs in a single output directory
///
/// # Errors
///
/// Returns the first `ParseError` from either log.
pub fn summarize_directory(
    dir: &Path,
    denovo_map_log: &Path,
    populations_log: &Path,
) -> Result<DirectorySummary, ParseError> {
    let coverage = denovo_map::parse_file(&dir.join(denovo_map_log))?;
    let loci = populations::parse_file(&dir.join(populations_log))?;

    Ok(DirectorySummary {
        directory: dir.display().to_string(),
        coverage,
        loci,
    })
}

/// Execute summary subcommand
///
/// A directory whose logs fail to parse is reported and skipped; the command
/// still fails at the end so callers notice.
///
/// # Errors
///
/// Returns an error if any directory failed, immediately with `--fail-fast`.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SummaryArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut summaries = Vec::new();
    let mut failed = 0usize;

    for dir in &args.dirs {
        match summarize_directory(dir, &args.denovo_map_log, &args.populations_log) {
            Ok(summary) => {
                if verbose {
                    eprintln!(
                        "{}: {} samples, {} loci",
                        summary.directory,
                        summary.coverage.len(),
                        summary.loci.loci
                    );
                }
                summaries.push(summary);
            }
            Err(e) if args.fail_fast => return Err(e.into()),
            Err(e) => {
                warn!("Skipping {}: {e}", dir.display());
                failed += 1;
            }
        }
    }

    match format {
        OutputFormat::Text => print_text_summaries(&summaries),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Tsv => print!("{}", format_tsv_summaries(&summaries)),
    }

    if failed > 0 {
        anyhow::bail!(
            "{failed} of {} directories could not be parsed",
            args.dirs.len()
        );
    }

    Ok(())
}

fn print_text_summaries(summaries: &[DirectorySummary]) {
    for s in summaries {
        println!("{}", s.directory);
        println!("{}", "=".repeat(60));
        println!(
            "  Loci: {}  Polymorphic: {}  SNPs: {}",
            s.loci.loci, s.loci.polymorphic_loci, s.loci.snps
        );
        for r in s.coverage.records() {
            println!(
                "  {}: unmerged {:.2}, merged {:.2}",
                r.sample, r.unmerged_cov, r.merged_cov
            );
        }
        println!();
    }
}

/// One row per sample; a directory without samples still gets a row so its
/// locus totals are kept
fn format_tsv_summaries(summaries: &[DirectorySummary]) -> String {
    let mut out = format!(
        "directory\t{}\t{}\n",
        CoverageTable::COLUMNS.join("\t"),
        LocusSummary::COLUMNS.join("\t")
    );
    for s in summaries {
        let loci = format!(
            "{}\t{}\t{}",
            s.loci.loci, s.loci.polymorphic_loci, s.loci.snps
        );
        if s.coverage.is_empty() {
            out.push_str(&format!("{}\t\t\t\t{loci}\n", s.directory));
            continue;
        }
        for r in s.coverage.records() {
            out.push_str(&format!(
                "{}\t{}\t{}\t{}\t{loci}\n",
                s.directory, r.sample, r.unmerged_cov, r.merged_cov
            ));
        }
    }
    out
}
