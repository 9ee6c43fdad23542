//! Core data types for Stacks log extraction.
//!
//! - [`LogDocument`]: a log file loaded as an ordered sequence of lines
//! - [`SampleCoverageRecord`], [`CoverageTable`]: per-sample coverage from `denovo_map.log`
//! - [`LocusDistributionRow`], [`LocusSummary`]: locus and SNP counts from `populations.log`
//!
//! Every value here is built and consumed within a single parse call; nothing
//! is cached between calls.
//!
//! [`LogDocument`]: document::LogDocument
//! [`SampleCoverageRecord`]: records::SampleCoverageRecord
//! [`CoverageTable`]: records::CoverageTable
//! [`LocusDistributionRow`]: records::LocusDistributionRow
//! [`LocusSummary`]: records::LocusSummary

pub mod document;
pub mod records;
