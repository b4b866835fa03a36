use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Callback invoked for every directory the scanner enters.
///
/// Runs after the cancellation check for that directory and before its
/// listing is read.
pub type DirectoryCallback = Arc<dyn Fn(&Path) + Send + Sync>;

/// Configuration for a single scan
#[derive(Clone)]
pub struct ScanConfig {
    /// Directory to scan
    pub root: PathBuf,
    /// Raw exclusion patterns, each possibly comma-separated
    pub exclude: Vec<String>,
    /// Checked once per directory; setting it stops the scan
    pub cancel: Option<Arc<AtomicBool>>,
    pub on_directory: Option<DirectoryCallback>,
}

impl fmt::Debug for ScanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanConfig")
            .field("root", &self.root)
            .field("exclude", &self.exclude)
            .field("cancel", &self.cancel)
            .field("on_directory", &self.on_directory.as_ref().map(|_| "..."))
            .finish()
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            exclude: vec![],
            cancel: None,
            on_directory: None,
        }
    }
}

impl ScanConfig {
    /// Create a new ScanConfig for the given root
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Add an exclusion pattern
    pub fn add_exclude<S: Into<String>>(mut self, pattern: S) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    /// Replace the exclusion patterns
    pub fn with_excludes(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    /// Attach a cancellation flag shared with another thread
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Observe each directory as it is entered
    pub fn with_directory_callback(mut self, callback: DirectoryCallback) -> Self {
        self.on_directory = Some(callback);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_default_config() {
        let config = ScanConfig::default();
        assert_eq!(config.root, PathBuf::from("."));
        assert!(config.exclude.is_empty());
        assert!(!config.is_cancelled());
        assert!(config.on_directory.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = ScanConfig::new("/roms")
            .add_exclude("*.nfo,*.txt")
            .add_exclude("cache/");

        assert_eq!(config.root, PathBuf::from("/roms"));
        assert_eq!(config.exclude, vec!["*.nfo,*.txt", "cache/"]);

        let config = config.with_excludes(vec!["*.bak".to_string()]);
        assert_eq!(config.exclude, vec!["*.bak"]);
    }

    #[test]
    fn test_cancel_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let config = ScanConfig::new("/roms").with_cancel_flag(flag.clone());

        assert!(!config.is_cancelled());
        flag.store(true, Ordering::Relaxed);
        assert!(config.is_cancelled());
    }

    #[test]
    fn test_directory_callback_survives_clone() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let config = ScanConfig::new("/roms").with_directory_callback(Arc::new(move |dir: &Path| {
            sink.lock().unwrap().push(dir.to_path_buf());
        }));

        let cloned = config.clone();
        if let Some(cb) = &cloned.on_directory {
            cb(Path::new("/roms/snes"));
        }

        assert_eq!(*seen.lock().unwrap(), vec![PathBuf::from("/roms/snes")]);
        assert!(format!("{:?}", config).contains("on_directory"));
    }
}
