use serde::Serialize;

/// Mean coverage of one sample before and after merging stacks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleCoverageRecord {
    /// Sample name as quoted in the `Sample N of M 'name'` line
    pub sample: String,

    /// Mean depth from `Coverage after assembling stacks:`
    pub unmerged_cov: f64,

    /// Mean depth from `Final coverage:`
    pub merged_cov: f64,
}

impl SampleCoverageRecord {
    pub fn new(sample: impl Into<String>, unmerged_cov: f64, merged_cov: f64) -> Self {
        Self {
            sample: sample.into(),
            unmerged_cov,
            merged_cov,
        }
    }
}

/// Per-sample coverage for a whole denovo_map run, in log order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CoverageTable {
    records: Vec<SampleCoverageRecord>,
}

impl CoverageTable {
    /// Column order used for tabular output
    pub const COLUMNS: [&'static str; 3] = ["sample", "unmerged_cov", "merged_cov"];

    /// Collect records without sorting or deduplicating
    #[must_use]
    pub fn from_records(records: Vec<SampleCoverageRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[SampleCoverageRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render as TSV with a header row
    #[must_use]
    pub fn to_tsv(&self) -> String {
        let mut out = Self::COLUMNS.join("\t");
        out.push('\n');
        for r in &self.records {
            out.push_str(&format!("{}\t{}\t{}\n", r.sample, r.unmerged_cov, r.merged_cov));
        }
        out
    }
}

/// One row of the populations SNPs-per-locus distribution table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocusDistributionRow {
    pub snp_count: u64,
    pub number_of_loci: u64,
}

/// Locus and SNP totals for a populations run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LocusSummary {
    /// Sum of `Number loci` over all rows
    pub loci: u64,
    /// Sum of `Number loci` over rows with at least one SNP
    pub polymorphic_loci: u64,
    /// Sum of `snp_count * Number loci`
    pub snps: u64,
}

impl LocusSummary {
    /// Column order used for tabular output
    pub const COLUMNS: [&'static str; 3] = ["loci", "polymorphic_loci", "snps"];

    /// Fold distribution rows into totals.
    ///
    /// Returns `None` if any total overflows `u64`.
    #[must_use]
    pub fn from_rows(rows: &[LocusDistributionRow]) -> Option<Self> {
        rows.iter().try_fold(Self::default(), |acc, row| {
            let polymorphic = if row.snp_count > 0 {
                row.number_of_loci
            } else {
                0
            };
            Some(Self {
                loci: acc.loci.checked_add(row.number_of_loci)?,
                polymorphic_loci: acc.polymorphic_loci.checked_add(polymorphic)?,
                snps: acc
                    .snps
                    .checked_add(row.snp_count.checked_mul(row.number_of_loci)?)?,
            })
        })
    }

    /// Render as TSV with a header row
    #[must_use]
    pub fn to_tsv(&self) -> String {
        format!(
            "{}\n{}\t{}\t{}\n",
            Self::COLUMNS.join("\t"),
            self.loci,
            self.polymorphic_loci,
            self.snps
        )
    }
}
