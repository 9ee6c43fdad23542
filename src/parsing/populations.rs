//! Parser for `populations.log`.
//!
//! The populations program reports how many catalog loci carry 0, 1, 2, ...
//! SNPs after filtering, as a tab-delimited table introduced by a fixed
//! comment line:
//!
//! ```text
//! # Distribution of the number of SNPs per catalog locus after filtering.
//! # Number SNPs	Number loci
//! 0	100
//! 1	30
//! 2	5
//!
//! Populations is done.
//! ```
//!
//! The last two lines after the anchor are never data; they are dropped by
//! position before any row is read.

use std::path::Path;

use tracing::debug;

use crate::core::document::LogDocument;
use crate::core::records::{LocusDistributionRow, LocusSummary};
use crate::parsing::ParseError;

/// Comment line that introduces the SNP distribution table
pub const DISTRIBUTION_ANCHOR: &str =
    "# Distribution of the number of SNPs per catalog locus after filtering.";

/// Header of the SNP count column
pub const SNP_COUNT_COLUMN: &str = "# Number SNPs";

/// Header of the locus count column
pub const LOCI_COLUMN: &str = "Number loci";

/// Trailing lines after the table that are not data
pub const FOOTER_LINES: usize = 2;

/// Positions of the required columns, resolved once from the header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub snp_count: usize,
    pub number_of_loci: usize,
}

impl TableSchema {
    /// Resolve required columns from header fields.
    ///
    /// Returns the name of the first missing column on failure.
    pub fn resolve(columns: &[String]) -> Result<Self, &'static str> {
        let find = |name: &'static str| {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or(name)
        };
        Ok(Self {
            snp_count: find(SNP_COUNT_COLUMN)?,
            number_of_loci: find(LOCI_COLUMN)?,
        })
    }

    fn width(self) -> usize {
        self.snp_count.max(self.number_of_loci) + 1
    }
}

/// The SNP distribution table with its footer already removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    pub columns: Vec<String>,
    pub schema: TableSchema,
    pub rows: Vec<LocusDistributionRow>,
}

impl ParsedTable {
    #[must_use]
    pub fn summarize(&self) -> Option<LocusSummary> {
        LocusSummary::from_rows(&self.rows)
    }
}

/// Parse a populations log file into locus and SNP totals
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or any error from
/// [`parse_document`].
pub fn parse_file(path: &Path) -> Result<LocusSummary, ParseError> {
    let doc = LogDocument::load(path)?;
    parse_document(&doc)
}

/// Parse a loaded populations log into locus and SNP totals
///
/// # Errors
///
/// Returns `ParseError::AnchorNotFound` if the distribution table is absent,
/// or `ParseError::Schema` if the table is missing columns, has unparsable
/// rows, or its totals overflow.
pub fn parse_document(doc: &LogDocument) -> Result<LocusSummary, ParseError> {
    let table = parse_table(doc)?;
    table.summarize().ok_or_else(|| ParseError::Schema {
        path: doc.path().to_path_buf(),
        message: "locus or SNP totals overflow a 64-bit count".to_string(),
    })
}

/// Find the 0-based index of the anchor line
///
/// # Errors
///
/// Returns `ParseError::AnchorNotFound` if no line equals the anchor exactly.
pub fn locate_table(doc: &LogDocument) -> Result<usize, ParseError> {
    doc.lines()
        .iter()
        .position(|line| line == DISTRIBUTION_ANCHOR)
        .ok_or_else(|| ParseError::AnchorNotFound {
            path: doc.path().to_path_buf(),
            anchor: DISTRIBUTION_ANCHOR,
        })
}

/// Locate and parse the SNP distribution table
///
/// # Errors
///
/// Returns `ParseError::AnchorNotFound` if the anchor is absent, or
/// `ParseError::Schema` if the header or any data row is invalid.
pub fn parse_table(doc: &LogDocument) -> Result<ParsedTable, ParseError> {
    let schema_err = |message: String| ParseError::Schema {
        path: doc.path().to_path_buf(),
        message,
    };

    let anchor = locate_table(doc)?;
    let header_idx = anchor + 1;
    let header = doc
        .lines()
        .get(header_idx)
        .ok_or_else(|| schema_err("no header row after distribution anchor".to_string()))?;

    let columns: Vec<String> = header.split('\t').map(|c| c.trim().to_string()).collect();
    let schema = TableSchema::resolve(&columns)
        .map_err(|missing| schema_err(format!("required column '{missing}' not in header")))?;

    // Footer is counted over everything after the anchor, header included
    let data_end = doc.len().saturating_sub(FOOTER_LINES).max(header_idx + 1);
    let mut rows = Vec::new();

    for (i, line) in doc.lines()[header_idx + 1..data_end].iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = header_idx + 2 + i;
        let fields: Vec<&str> = line.split('\t').collect();

        if fields.len() < schema.width() {
            return Err(schema_err(format!(
                "line {line_num} has {} fields, expected at least {}",
                fields.len(),
                schema.width()
            )));
        }

        let parse_count = |idx: usize, column: &str| -> Result<u64, ParseError> {
            fields[idx].trim().parse().map_err(|_| {
                schema_err(format!(
                    "invalid '{column}' value on line {line_num}: '{}'",
                    fields[idx]
                ))
            })
        };

        rows.push(LocusDistributionRow {
            snp_count: parse_count(schema.snp_count, SNP_COUNT_COLUMN)?,
            number_of_loci: parse_count(schema.number_of_loci, LOCI_COLUMN)?,
        });
    }

    debug!(
        "Parsed {} SNP distribution rows from {}",
        rows.len(),
        doc.path().display()
    );

    Ok(ParsedTable {
        columns,
        schema,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const POPULATIONS_LOG: &str = r"populations v1.48, executed 2017-05-02 11:40:17
populations -b 1 -P output -M popmap.txt -t 8 -r 0.8
Parsing population map...
Removed 1207 loci that did not pass sample/population constraints from 9876 loci.
Kept 135 loci, composed of 12011 sites; 40 of those sites were filtered, 40 variant sites remained.

# Distribution of the number of SNPs per catalog locus after filtering.
# Number SNPs	Number loci
0	100
1	30
2	5

Populations is done.
";

    fn doc(text: &str) -> LogDocument {
        LogDocument::from_text("populations.log", text)
    }

    #[test]
    fn test_parse_summary() {
        let summary = parse_document(&doc(POPULATIONS_LOG)).unwrap();
        assert_eq!(
            summary,
            LocusSummary {
                loci: 135,
                polymorphic_loci: 35,
                snps: 40,
            }
        );
    }

    #[test]
    fn test_footer_excluded() {
        let table = parse_table(&doc(POPULATIONS_LOG)).unwrap();
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.columns, vec!["# Number SNPs", "Number loci"]);
        assert_eq!(
            table.schema,
            TableSchema {
                snp_count: 0,
                number_of_loci: 1,
            }
        );
    }

    #[test]
    fn test_footer_is_positional() {
        // The footer lines are dropped even when they look like data
        let text = format!("{DISTRIBUTION_ANCHOR}\n# Number SNPs\tNumber loci\n0\t10\n3\t2\n5\t1000\n");
        let summary = parse_document(&doc(&text)).unwrap();
        assert_eq!(summary.loci, 10);
        assert_eq!(summary.polymorphic_loci, 0);
        assert_eq!(summary.snps, 0);
    }

    #[test]
    fn test_extra_columns_and_reordering() {
        let text = format!(
            "{DISTRIBUTION_ANCHOR}\nNumber loci\tpop\t# Number SNPs\n100\tA\t0\n30\tA\t1\n5\tB\t2\n\nPopulations is done.\n"
        );
        let summary = parse_document(&doc(&text)).unwrap();
        assert_eq!(summary.loci, 135);
        assert_eq!(summary.polymorphic_loci, 35);
        assert_eq!(summary.snps, 40);
    }

    #[test]
    fn test_anchor_not_found() {
        let text = POPULATIONS_LOG.replace(DISTRIBUTION_ANCHOR, "# Distribution of SNPs");
        let err = parse_document(&doc(&text)).unwrap_err();
        match err {
            ParseError::AnchorNotFound { path, anchor } => {
                assert_eq!(path, Path::new("populations.log"));
                assert_eq!(anchor, DISTRIBUTION_ANCHOR);
            }
            other => panic!("expected AnchorNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_anchor_is_exact() {
        let text = POPULATIONS_LOG.replace(
            DISTRIBUTION_ANCHOR,
            "# distribution of the number of SNPs per catalog locus after filtering. ",
        );
        assert!(matches!(
            locate_table(&doc(&text)),
            Err(ParseError::AnchorNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_column() {
        let text = POPULATIONS_LOG.replace("Number loci", "Loci");
        let err = parse_document(&doc(&text)).unwrap_err();
        assert!(matches!(err, ParseError::Schema { .. }));
        assert!(err.to_string().contains("'Number loci'"));
    }

    #[test]
    fn test_missing_header() {
        let text = format!("log start\n{DISTRIBUTION_ANCHOR}");
        assert!(matches!(
            parse_table(&doc(&text)),
            Err(ParseError::Schema { .. })
        ));
    }

    #[test]
    fn test_invalid_row() {
        let text = POPULATIONS_LOG.replace("1\t30", "1\tthirty");
        let err = parse_document(&doc(&text)).unwrap_err();
        assert!(err.to_string().contains("line 10"));
    }

    #[test]
    fn test_empty_table() {
        let text = format!("{DISTRIBUTION_ANCHOR}\n# Number SNPs\tNumber loci\n\nPopulations is done.\n");
        let summary = parse_document(&doc(&text)).unwrap();
        assert_eq!(summary, LocusSummary::default());
    }
}
