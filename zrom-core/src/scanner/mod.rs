//! Directory scanning with glob-based exclusion
//!
//! Raw exclude patterns are normalized once per scan, compiled into a
//! [`PatternMatcher`] and used by [`TreeScanner`] to prune directories and
//! skip files while walking the tree.

mod config;
mod patterns;
mod walker;

pub use config::{DirectoryCallback, ScanConfig};
pub use patterns::{normalize_patterns, PatternMatcher, CASE_INSENSITIVE};
pub use walker::{scan_files, TreeScanner};
