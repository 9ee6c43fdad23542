//! Parsers for the logs written by the Stacks pipeline.
//!
//! This module provides parsers for:
//!
//! - **denovo_map.log**: per-sample `ustacks` blocks, reduced to mean coverage
//!   before and after merging stacks
//! - **populations.log**: the SNPs-per-locus distribution table, reduced to
//!   total loci, polymorphic loci and total SNPs
//!
//! ## Example
//!
//! ```rust,no_run
//! use stacks_logs::parsing::{denovo_map, populations};
//! use std::path::Path;
//!
//! let coverage = denovo_map::parse_file(Path::new("rep1/denovo_map.log")).unwrap();
//! for record in coverage.records() {
//!     println!("{}\t{}\t{}", record.sample, record.unmerged_cov, record.merged_cov);
//! }
//!
//! let summary = populations::parse_file(Path::new("rep1/populations.log")).unwrap();
//! println!("{} loci, {} SNPs", summary.loci, summary.snps);
//! ```
//!
//! ## Markers
//!
//! | Log | Marker | Meaning |
//! |-----|--------|---------|
//! | denovo_map | `Sample N of M 'name'` | Start of a sample block |
//! | denovo_map | `ustacks is done` | End of a sample block |
//! | denovo_map | `Coverage after assembling stacks:` | Unmerged coverage line |
//! | denovo_map | `Final coverage:` | Merged coverage line |
//! | populations | `# Distribution of the number of SNPs per catalog locus after filtering.` | Table anchor |

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub mod denovo_map;
pub mod patterns;
pub mod populations;

/// Coverage statistic extracted from a `ustacks` block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageField {
    /// `Coverage after assembling stacks:`
    Unmerged,
    /// `Final coverage:`
    Merged,
}

impl CoverageField {
    /// Literal prefix of the log line that reports this statistic
    #[must_use]
    pub fn line_prefix(self) -> &'static str {
        match self {
            Self::Unmerged => "Coverage after assembling stacks:",
            Self::Merged => "Final coverage:",
        }
    }
}

impl fmt::Display for CoverageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unmerged => write!(f, "unmerged coverage"),
            Self::Merged => write!(f, "merged coverage"),
        }
    }
}

/// Why a coverage field could not be extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionFailure {
    /// No line in the block starts with the field's prefix
    Missing,
    /// The prefixed line exists but carries no usable `mean=` value
    Malformed(String),
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "no matching line in block"),
            Self::Malformed(line) => write!(f, "no parsable mean in line '{line}'"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed log {}: {reason}", path.display())]
    MalformedLog { path: PathBuf, reason: String },

    #[error("Cannot extract {field} for sample '{sample}' in {}: {reason}", path.display())]
    Extraction {
        path: PathBuf,
        sample: String,
        field: CoverageField,
        reason: ExtractionFailure,
    },

    #[error("Header line not matched in file {}\nExpected: {anchor}", path.display())]
    AnchorNotFound { path: PathBuf, anchor: &'static str },

    #[error("Invalid table in {}: {message}", path.display())]
    Schema { path: PathBuf, message: String },

    #[error("Too many samples in {}: {count} exceeds maximum allowed ({max})", path.display())]
    TooManySamples {
        path: PathBuf,
        count: usize,
        max: usize,
    },
}

impl ParseError {
    /// Path of the log file the error refers to
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. }
            | Self::MalformedLog { path, .. }
            | Self::Extraction { path, .. }
            | Self::AnchorNotFound { path, .. }
            | Self::Schema { path, .. }
            | Self::TooManySamples { path, .. } => path.as_path(),
        }
    }
}
