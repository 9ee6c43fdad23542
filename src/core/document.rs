//! In-memory line view of a log file.
//!
//! Logs are read fully before any scanning starts. Plain text and gzip/bgzip
//! compressed files are both accepted; compression is detected from the
//! file extension.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

use crate::parsing::ParseError;
use crate::utils::validation::is_gzipped;

/// An immutable, 0-indexed sequence of lines read from a log file
#[derive(Debug, Clone)]
pub struct LogDocument {
    path: PathBuf,
    lines: Vec<String>,
}

impl LogDocument {
    /// Read a log file into memory, stripping line terminators.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file does not exist, cannot be read,
    /// or is not valid UTF-8 / gzip.
    pub fn load(path: &Path) -> Result<Self, ParseError> {
        let io_err = |source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        let result = if is_gzipped(path) {
            read_lines(BufReader::new(MultiGzDecoder::new(file)))
        } else {
            read_lines(BufReader::new(file))
        };
        let lines = result.map_err(io_err)?;

        tracing::debug!("Loaded {} lines from {}", lines.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            lines,
        })
    }

    /// Build a document from text already in memory.
    ///
    /// `label` is used as the document path in error messages.
    pub fn from_text(label: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            path: label.into(),
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn read_lines<R: Read>(reader: BufReader<R>) -> std::io::Result<Vec<String>> {
    reader
        .lines()
        .map(|line| line.map(|l| l.trim_end_matches('\r').to_string()))
        .collect()
}
