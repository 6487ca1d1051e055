//! One-line utility descriptions
//!
//! A utility describes itself with a header comment such as
//! `# RC Summary: Show HTTP response headers` near the top of the file.

use std::path::Path;

use tracing::debug;

use crate::fs::FileSystem;

const SUMMARY_MARKER: &str = "RC Summary:";
const HEADER_LINES: usize = 10;

/// Extract the summary from a utility's source text
#[must_use]
pub fn parse_summary(content: &str) -> Option<String> {
    content
        .lines()
        .take(HEADER_LINES)
        .filter_map(|line| line.trim_start().strip_prefix('#'))
        .find_map(|comment| comment.trim_start().strip_prefix(SUMMARY_MARKER))
        .map(str::trim)
        .filter(|summary| !summary.is_empty())
        .map(ToString::to_string)
}

/// Read the summary header of the utility at `path`
///
/// Binaries and unreadable files have no summary.
pub fn read_summary<F>(fs: &F, path: &Path) -> Option<String>
where
    F: FileSystem + ?Sized,
{
    match fs.read_file(path) {
        Ok(content) => parse_summary(&content),
        Err(e) => {
            debug!("no summary for {}: {e}", path.display());
            None
        }
    }
}
