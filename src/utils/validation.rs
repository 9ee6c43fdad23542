//! Centralized limits and small path helpers.

use std::path::Path;

/// Maximum number of sample blocks accepted from a single denovo_map log
pub const MAX_SAMPLE_BLOCKS: usize = 100_000;

/// Check if adding another sample block would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new block.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_sample_limit(count: usize) -> Option<String> {
    if count >= MAX_SAMPLE_BLOCKS {
        Some(format!(
            "Too many samples: adding another would exceed maximum of {MAX_SAMPLE_BLOCKS}"
        ))
    } else {
        None
    }
}

/// Check if the path names a gzip or bgzip compressed file
#[must_use]
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
pub fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}
