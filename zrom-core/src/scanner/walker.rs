use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use super::config::ScanConfig;
use super::patterns::PatternMatcher;
use crate::error::{Result, ScanError};

/// Walks a directory tree and lists every file not covered by an exclude
/// pattern.
///
/// Excluded directories are pruned before descent, so nothing beneath them
/// is ever read. Entries that cannot be read during the walk are skipped and
/// their subtree is treated as empty.
#[derive(Debug)]
pub struct TreeScanner {
    root: PathBuf,
    matcher: PatternMatcher,
    config: ScanConfig,
}

impl TreeScanner {
    /// Resolve the scan root and compile the exclude patterns.
    ///
    /// Fails with [`ScanError::RootNotFound`] or
    /// [`ScanError::RootNotADirectory`] before anything is traversed.
    pub fn new(config: ScanConfig) -> Result<Self> {
        let root = resolve_root(&config.root)?;
        let matcher = PatternMatcher::from_raw(&config.exclude);

        tracing::debug!(
            "Scanner ready for {:?} with {} exclude pattern(s): {:?}",
            root,
            matcher.patterns().len(),
            matcher.patterns()
        );

        Ok(Self {
            root,
            matcher,
            config,
        })
    }

    /// The resolved, absolute scan root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and collect the absolute paths of all retained files
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        tracing::info!("Scanning directory: {:?}", self.root);

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_excluded(entry));

        let mut files = Vec::new();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let file_type = entry.file_type();

            if file_type.is_dir() {
                if self.config.is_cancelled() {
                    tracing::info!("Scan cancelled at {:?}", entry.path());
                    return Err(ScanError::Cancelled);
                }
                tracing::trace!("Entering {:?}", entry.path());
                if let Some(callback) = &self.config.on_directory {
                    callback(entry.path());
                }
                continue;
            }

            // Links to directories are not followed and not reported; every
            // other entry, dangling links and special files included, is.
            if file_type.is_symlink() && entry.path().is_dir() {
                tracing::trace!("Not following directory link {:?}", entry.path());
                continue;
            }

            files.push(entry.into_path());
        }

        tracing::info!("Found {} file(s) to keep", files.len());
        Ok(files)
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        let relative = match relative_path(&self.root, entry.path()) {
            Some(relative) => relative,
            None => return false,
        };

        let excluded = self.matcher.is_excluded(&relative);
        if excluded {
            if entry.file_type().is_dir() {
                tracing::debug!("Pruning excluded directory: {}", relative.display());
            } else {
                tracing::trace!("Skipping excluded file: {}", relative.display());
            }
        }
        excluded
    }
}

/// Scan `root` with the given raw exclude patterns
pub fn scan_files<P, S>(root: P, exclude: &[S]) -> Result<Vec<PathBuf>>
where
    P: Into<PathBuf>,
    S: AsRef<str>,
{
    let config = ScanConfig::new(root)
        .with_excludes(exclude.iter().map(|s| s.as_ref().to_string()).collect());
    TreeScanner::new(config)?.scan()
}

fn resolve_root(root: &Path) -> Result<PathBuf> {
    let resolved = match fs::canonicalize(root) {
        Ok(resolved) => resolved,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ScanError::RootNotFound(root.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    if !resolved.is_dir() {
        return Err(ScanError::RootNotADirectory(resolved));
    }

    Ok(resolved)
}

/// Path of `path` relative to `root` with forward-slash separators.
///
/// Borrowed as-is where `/` is already the separator, so names that are not
/// valid UTF-8 are matched on their real bytes.
fn relative_path<'a>(root: &Path, path: &'a Path) -> Option<Cow<'a, Path>> {
    let relative = path.strip_prefix(root).ok()?;

    if std::path::MAIN_SEPARATOR == '/' {
        return Some(Cow::Borrowed(relative));
    }

    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Some(Cow::Owned(PathBuf::from(parts.join("/"))))
}
