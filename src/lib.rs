//! # stacks-logs
//!
//! A library for turning the logs of a Stacks RAD-seq run into structured data.
//!
//! Parameter sweeps over `denovo_map.pl` produce one output directory per
//! parameter set. The numbers needed to compare them (mean coverage per sample,
//! how many loci and SNPs survive filtering) are only printed to the
//! human-readable logs. `stacks-logs` scrapes those logs into typed records
//! that can be handed to a plotting or aggregation step.
//!
//! ## Features
//!
//! - **Coverage extraction**: mean depth per sample before and after merging stacks
//! - **Locus summary**: total, polymorphic and SNP counts from the populations table
//! - **Strict failures**: unbalanced blocks, missing coverage lines, missing tables
//!   and missing columns are reported as distinct errors, never as zeroes
//! - **Compressed logs**: `.gz` logs are read transparently
//!
//! ## Example
//!
//! ```rust,no_run
//! use stacks_logs::parsing::{denovo_map, populations};
//! use std::path::Path;
//!
//! let coverage = denovo_map::parse_file(Path::new("rep1/denovo_map.log")).unwrap();
//! let summary = populations::parse_file(Path::new("rep1/populations.log")).unwrap();
//!
//! println!("{} samples, {} polymorphic loci", coverage.len(), summary.polymorphic_loci);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Log documents and the record types produced by parsing
//! - [`parsing`]: Parsers for `denovo_map.log` and `populations.log`
//! - [`cli`]: Command-line interface implementation
//! - [`utils`]: Limits and path helpers

pub mod cli;
pub mod core;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::document::LogDocument;
pub use crate::core::records::{CoverageTable, LocusDistributionRow, LocusSummary, SampleCoverageRecord};
pub use crate::parsing::ParseError;
