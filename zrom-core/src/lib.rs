//! ZRom Core - ROM folder scanning
//!
//! Enumerates the files below a ROM folder while pruning subtrees that match
//! user-supplied exclude globs. The resulting flat file list is what the
//! region-priority cleaner works on.

pub mod error;
pub mod scanner;

pub use error::{Result, ScanError};
pub use scanner::{
    normalize_patterns, scan_files, DirectoryCallback, PatternMatcher, ScanConfig, TreeScanner,
    CASE_INSENSITIVE,
};

/// ZRom Core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
