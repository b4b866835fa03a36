//! Error types for ZRom scan operations

use std::path::PathBuf;
use thiserror::Error;

/// Scan error types
///
/// Only root validation failures and cancellation escape a scan. Unreadable
/// entries found during traversal are absorbed by the scanner.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Scan root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Scan root is not a directory: {}", .0.display())]
    RootNotADirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scan cancelled")]
    Cancelled,
}

/// Result type for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;
