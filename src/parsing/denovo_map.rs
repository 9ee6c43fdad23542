//! Parser for `denovo_map.log`.
//!
//! `denovo_map.pl` runs `ustacks` once per sample and echoes its output into a
//! single log. Each sample's trace starts with `Sample N of M 'name'` and ends
//! with a line containing `ustacks is done`. Inside a trace, the lines
//!
//! ```text
//! Coverage after assembling stacks: mean=10.52; stdev=7.31; max=412; n_reads=...
//! Final coverage: mean=12.07; stdev=8.90; max=455; n_reads=...
//! ```
//!
//! give the mean depth before and after merging stacks.

use std::path::Path;

use tracing::debug;

use crate::core::document::LogDocument;
use crate::core::records::{CoverageTable, SampleCoverageRecord};
use crate::parsing::patterns::{match_block_marker, match_coverage, BlockMarker, FieldMatch};
use crate::parsing::{CoverageField, ExtractionFailure, ParseError};
use crate::utils::validation::{check_sample_limit, MAX_SAMPLE_BLOCKS};

/// Inclusive line range of one sample's `ustacks` trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBlock {
    pub sample_name: String,
    /// 0-based index of the `Sample N of M` line
    pub start: usize,
    /// 0-based index of the `ustacks is done` line
    pub end: usize,
}

/// Parse a denovo_map log file into a per-sample coverage table
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or any error from
/// [`parse_document`].
pub fn parse_file(path: &Path) -> Result<CoverageTable, ParseError> {
    let doc = LogDocument::load(path)?;
    parse_document(&doc)
}

/// Parse a loaded denovo_map log into a per-sample coverage table
///
/// # Errors
///
/// Returns `ParseError::MalformedLog` if block markers are unbalanced or
/// interleaved, `ParseError::Extraction` if a block lacks a coverage line, or
/// `ParseError::TooManySamples` if the block limit is exceeded.
pub fn parse_document(doc: &LogDocument) -> Result<CoverageTable, ParseError> {
    let blocks = segment_blocks(doc)?;
    debug!(
        "Found {} sample blocks in {}",
        blocks.len(),
        doc.path().display()
    );

    let records = blocks
        .iter()
        .map(|block| extract_coverage(doc, block))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CoverageTable::from_records(records))
}

/// Split the log into per-sample blocks.
///
/// The k-th start marker is paired with the k-th end marker. Pairing is also
/// checked for nesting: a start while a block is open, or an end with no open
/// block, is rejected rather than silently mis-assigned.
///
/// # Errors
///
/// Returns `ParseError::MalformedLog` if the marker counts differ, the markers
/// are not strictly alternating, or a `Sample N of M` line has no quoted name.
/// Returns `ParseError::TooManySamples` if the block limit is exceeded.
pub fn segment_blocks(doc: &LogDocument) -> Result<Vec<SampleBlock>, ParseError> {
    let malformed = |reason: String| ParseError::MalformedLog {
        path: doc.path().to_path_buf(),
        reason,
    };

    let mut markers = Vec::new();
    for (i, line) in doc.lines().iter().enumerate() {
        match match_block_marker(line) {
            FieldMatch::Matched(marker) => markers.push((i, marker)),
            FieldMatch::Malformed(text) => {
                return Err(malformed(format!(
                    "sample header on line {} has no quoted sample name: '{text}'",
                    i + 1
                )));
            }
            FieldMatch::NotFound => {}
        }
    }

    let starts = markers
        .iter()
        .filter(|(_, m)| matches!(m, BlockMarker::Start(_)))
        .count();
    let ends = markers.len() - starts;
    if starts != ends {
        return Err(malformed(format!(
            "{starts} sample start markers but {ends} 'ustacks is done' markers"
        )));
    }

    let mut blocks = Vec::with_capacity(starts);
    let mut open: Option<(usize, &str)> = None;

    for (i, marker) in markers {
        match (marker, open) {
            (BlockMarker::Start(name), None) => open = Some((i, name)),
            (BlockMarker::Start(name), Some((prev, prev_name))) => {
                return Err(malformed(format!(
                    "sample '{name}' starts on line {} before sample '{prev_name}' (line {}) finished",
                    i + 1,
                    prev + 1
                )));
            }
            (BlockMarker::End, Some((start, name))) => {
                if check_sample_limit(blocks.len()).is_some() {
                    return Err(ParseError::TooManySamples {
                        path: doc.path().to_path_buf(),
                        count: blocks.len() + 1,
                        max: MAX_SAMPLE_BLOCKS,
                    });
                }
                blocks.push(SampleBlock {
                    sample_name: name.to_string(),
                    start,
                    end: i,
                });
                open = None;
            }
            (BlockMarker::End, None) => {
                return Err(malformed(format!(
                    "'ustacks is done' on line {} has no open sample block",
                    i + 1
                )));
            }
        }
    }

    Ok(blocks)
}

/// Extract unmerged and merged coverage from one sample block.
///
/// Only the first line carrying each prefix is used.
///
/// # Errors
///
/// Returns `ParseError::Extraction` naming the sample and field if a coverage
/// line is missing or has no parsable `mean=` value.
pub fn extract_coverage(
    doc: &LogDocument,
    block: &SampleBlock,
) -> Result<SampleCoverageRecord, ParseError> {
    let lines = &doc.lines()[block.start..=block.end];

    let field_value = |field: CoverageField| -> Result<f64, ParseError> {
        let mut hits = lines
            .iter()
            .map(|line| match_coverage(line, field))
            .filter(|m| !matches!(m, FieldMatch::NotFound));

        let first = hits.next();
        let extra = hits.count();
        if extra > 0 {
            debug!(
                "Sample '{}' has {} extra {} lines; using the first",
                block.sample_name, extra, field
            );
        }

        let reason = match first {
            Some(FieldMatch::Matched(v)) => return Ok(v),
            Some(FieldMatch::Malformed(line)) => ExtractionFailure::Malformed(line),
            Some(FieldMatch::NotFound) | None => ExtractionFailure::Missing,
        };
        Err(ParseError::Extraction {
            path: doc.path().to_path_buf(),
            sample: block.sample_name.clone(),
            field,
            reason,
        })
    };

    Ok(SampleCoverageRecord::new(
        block.sample_name.clone(),
        field_value(CoverageField::Unmerged)?,
        field_value(CoverageField::Merged)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SAMPLES: &str = r"denovo_map.pl version 1.48 started at 2017-05-02 10:12:01
Found 2 sample file(s).

Sample 1 of 2 'S1'
----------
ustacks -t gzfastq -f samples/S1.fq.gz -o output -i 1 -m 3 -M 2 -p 8
Loaded 2224319 RAD-Tags.
Coverage after assembling stacks: mean=10.5; stdev=6.01; max=312; n_reads=1830411(82.3%)
Merging stacks, maximum allowed distance: 2 nucleotide(s)
Final coverage: mean=8.2; stdev=5.44; max=318; n_reads=1901207(85.5%)
ustacks is done.

Sample 2 of 2 'S2'
----------
ustacks -t gzfastq -f samples/S2.fq.gz -o output -i 2 -m 3 -M 2 -p 8
Coverage after assembling stacks: mean=20.0; stdev=9.87; max=502; n_reads=2044115(80.1%)
Final coverage: mean=15.5; stdev=8.12; max=511; n_reads=2101200(82.3%)
ustacks is done.

cstacks -b 1 -n 2 -p 8
";

    fn doc(text: &str) -> LogDocument {
        LogDocument::from_text("denovo_map.log", text)
    }

    #[test]
    fn test_parse_two_samples() {
        let table = parse_document(&doc(TWO_SAMPLES)).unwrap();
        assert_eq!(
            table.records(),
            &[
                SampleCoverageRecord::new("S1", 10.5, 8.2),
                SampleCoverageRecord::new("S2", 20.0, 15.5),
            ]
        );
    }

    #[test]
    fn test_segment_blocks_ranges() {
        let blocks = segment_blocks(&doc(TWO_SAMPLES)).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].sample_name, "S1");
        assert_eq!((blocks[0].start, blocks[0].end), (3, 10));
        assert_eq!(blocks[1].sample_name, "S2");
        assert!(blocks[1].start > blocks[0].end);
    }

    #[test]
    fn test_source_order_preserved() {
        let text = "Sample 1 of 2 'zz'\nCoverage after assembling stacks: mean=1.0; x\nFinal coverage: mean=2.0; x\nustacks is done\nSample 2 of 2 'aa'\nCoverage after assembling stacks: mean=3.0; x\nFinal coverage: mean=4.0; x\nustacks is done\n";
        let table = parse_document(&doc(text)).unwrap();
        let names: Vec<&str> = table.records().iter().map(|r| r.sample.as_str()).collect();
        assert_eq!(names, vec!["zz", "aa"]);
    }

    #[test]
    fn test_unbalanced_markers() {
        let text = "Sample 1 of 3 'a'\nustacks is done\nSample 2 of 3 'b'\nustacks is done\nSample 3 of 3 'c'\n";
        let err = parse_document(&doc(text)).unwrap_err();
        match err {
            ParseError::MalformedLog { reason, .. } => {
                assert!(reason.contains("3 sample start markers but 2"));
            }
            other => panic!("expected MalformedLog, got {other:?}"),
        }
    }

    #[test]
    fn test_interleaved_markers() {
        let text = "Sample 1 of 2 'a'\nSample 2 of 2 'b'\nustacks is done\nustacks is done\n";
        let err = segment_blocks(&doc(text)).unwrap_err();
        assert!(matches!(err, ParseError::MalformedLog { .. }));
        assert!(err.to_string().contains("sample 'b' starts on line 2"));
    }

    #[test]
    fn test_end_before_start() {
        let text = "ustacks is done\nSample 1 of 1 'a'\n";
        let err = segment_blocks(&doc(text)).unwrap_err();
        assert!(err.to_string().contains("has no open sample block"));
    }

    #[test]
    fn test_sample_header_without_name() {
        let text = "Sample 1 of 1\nustacks is done\n";
        assert!(matches!(
            segment_blocks(&doc(text)),
            Err(ParseError::MalformedLog { .. })
        ));
    }

    #[test]
    fn test_missing_final_coverage() {
        let text = TWO_SAMPLES.replace(
            "Final coverage: mean=15.5; stdev=8.12; max=511; n_reads=2101200(82.3%)\n",
            "",
        );
        let err = parse_document(&doc(&text)).unwrap_err();
        match err {
            ParseError::Extraction {
                sample,
                field,
                reason,
                ..
            } => {
                assert_eq!(sample, "S2");
                assert_eq!(field, CoverageField::Merged);
                assert_eq!(reason, ExtractionFailure::Missing);
            }
            other => panic!("expected Extraction, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_coverage_value() {
        let text = "Sample 1 of 1 'a'\nCoverage after assembling stacks: mean=; stdev=1\nFinal coverage: mean=2.0; x\nustacks is done\n";
        let err = parse_document(&doc(text)).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Extraction {
                field: CoverageField::Unmerged,
                reason: ExtractionFailure::Malformed(_),
                ..
            }
        ));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let text = "Sample 1 of 1 'a'\nCoverage after assembling stacks: mean=1.5; x\nCoverage after assembling stacks: mean=9.9; x\nFinal coverage: mean=2.5; x\nFinal coverage: mean=9.9; x\nustacks is done\n";
        let table = parse_document(&doc(text)).unwrap();
        assert_eq!(table.records(), &[SampleCoverageRecord::new("a", 1.5, 2.5)]);
    }

    #[test]
    fn test_coverage_outside_block_ignored() {
        let text = "Final coverage: mean=99.0; x\nSample 1 of 1 'a'\nCoverage after assembling stacks: mean=1.0; x\nustacks is done\nFinal coverage: mean=2.0; x\n";
        let err = parse_document(&doc(text)).unwrap_err();
        assert!(matches!(
            err,
            ParseError::Extraction {
                field: CoverageField::Merged,
                ..
            }
        ));
    }

    #[test]
    fn test_no_samples() {
        let table = parse_document(&doc("cstacks -b 1\nsstacks -b 1\n")).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_gzipped_log_matches_plain() {
        use std::io::Write;

        use flate2::write::GzEncoder;
        use flate2::Compression;
        use tempfile::NamedTempFile;

        let mut plain = NamedTempFile::with_suffix(".log").unwrap();
        plain.write_all(TWO_SAMPLES.as_bytes()).unwrap();

        let gzipped = NamedTempFile::with_suffix(".log.gz").unwrap();
        let mut encoder = GzEncoder::new(gzipped.reopen().unwrap(), Compression::default());
        encoder.write_all(TWO_SAMPLES.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let from_plain = parse_file(plain.path()).unwrap();
        let from_gzip = parse_file(gzipped.path()).unwrap();
        assert_eq!(from_plain.len(), 2);
        assert_eq!(from_gzip, from_plain);
    }
}
