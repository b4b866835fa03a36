//! Optional JSON configuration file
//!
//! ```json
//! { "exclude": ["cache/", "*.nfo,*.txt"], "log_file": "zrom.log", "verbose": 1 }
//! ```
//!
//! Command-line excludes are appended to the file's; command-line verbosity
//! and log file take precedence when given.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use zrom_core::ScanConfig;

use crate::logging::{verbosity_level, LogConfig};

/// Contents of a `--config` file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub exclude: Vec<String>,
    pub log_file: Option<PathBuf>,
    pub verbose: Option<u8>,
}

impl FileConfig {
    /// Load and parse a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }
}

/// Effective settings after merging the config file with the command line
#[derive(Debug, Clone)]
pub struct Settings {
    pub scan: ScanConfig,
    pub log: LogConfig,
}

impl Settings {
    pub fn resolve(
        root: PathBuf,
        exclude: Vec<String>,
        verbose: u8,
        log_file: Option<PathBuf>,
        file: FileConfig,
    ) -> Self {
        let verbose = if verbose > 0 {
            verbose
        } else {
            file.verbose.unwrap_or(0)
        };

        let mut patterns = file.exclude;
        patterns.extend(exclude);

        Self {
            scan: ScanConfig::new(root).with_excludes(patterns),
            log: LogConfig {
                level: verbosity_level(verbose),
                log_file: log_file.or(file.log_file),
            },
        }
    }
}
