//! ZRom Cleaner CLI - list the files of a ROM folder
//!
//! Usage:
//!   zrom-cleaner [PATH] [-x <pattern>]... [-v|-vv] [--log-file <file>] [--config <file.json>]
//!
//! Every retained file is printed on its own line to stdout. Exclude patterns
//! may be repeated or comma-joined; a trailing `/` excludes a whole directory.

mod config;
mod logging;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use zrom_core::{ScanConfig, TreeScanner};

use config::{FileConfig, Settings};

#[derive(Parser, Debug)]
#[command(name = "zrom-cleaner")]
#[command(about = "ZRom Cleaner - scan a ROM folder, skipping excluded paths", long_about = None)]
#[command(version)]
struct Cli {
    /// ROM folder
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Glob pattern to exclude (repeatable, comma-separated lists allowed)
    #[arg(short = 'x', long = "exclude", value_name = "PATTERN")]
    exclude: Vec<String>,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Write log output to this file in addition to the console
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let settings = Settings::resolve(cli.path, cli.exclude, cli.verbose, cli.log_file, file_config);

    logging::init(&settings.log)?;
    tracing::trace!("Trace level active");

    run(settings.scan)
}

fn run(config: ScanConfig) -> Result<()> {
    let root = config.root.clone();

    let scanner = TreeScanner::new(config)
        .with_context(|| format!("Failed to open ROM folder: {}", root.display()))?;

    let files = scanner.scan().context("Failed to scan ROM folder")?;

    let stdout = io::stdout();
    write_listing(BufWriter::new(stdout.lock()), &files).context("Failed to write file listing")
}

/// Print one path per line. A reader that goes away early (`| head`) ends
/// the listing without an error.
fn write_listing<W: Write>(mut out: W, files: &[PathBuf]) -> io::Result<()> {
    let mut written = files
        .iter()
        .try_for_each(|file| writeln!(out, "{}", file.display()));
    if written.is_ok() {
        written = out.flush();
    }

    match written {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
