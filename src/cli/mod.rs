//! Command-line interface for stacks-logs.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **denovo-map**: Per-sample coverage from a `denovo_map.log`
//! - **populations**: Locus and SNP totals from a `populations.log`
//! - **summary**: Both of the above for one or more Stacks output directories
//!
//! ## Usage
//!
//! ```text
//! # Coverage table for one run
//! stacks-logs denovo-map output/denovo_map.log
//!
//! # Locus counts as JSON
//! stacks-logs populations output/populations.log --format json
//!
//! # Compare replicates, one row per directory and sample
//! stacks-logs summary rep1 rep2 rep3 --format tsv
//! ```

use clap::{Parser, Subcommand};

pub mod denovo_map;
pub mod populations;
pub mod summary;

#[derive(Parser)]
#[command(name = "stacks-logs")]
#[command(version)]
#[command(about = "Extract coverage and locus summaries from Stacks pipeline logs")]
#[command(
    long_about = "stacks-logs reads the logs written by Stacks denovo_map and populations runs and turns them into tables for comparing parameter sets.\n\nIt reports:\n- Mean coverage per sample before and after merging stacks\n- Total loci, polymorphic loci and SNPs after filtering"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Per-sample coverage from a denovo_map.log
    DenovoMap(denovo_map::DenovoMapArgs),

    /// Locus and SNP totals from a populations.log
    Populations(populations::PopulationsArgs),

    /// Parse both logs in one or more Stacks output directories
    Summary(summary::SummaryArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
