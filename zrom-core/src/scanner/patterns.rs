use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::Path;

/// Prefix that lets a pattern match at any depth below the scan root
pub const ANY_DEPTH_PREFIX: &str = "**/";

/// Suffix that matches everything beneath a directory
pub const EVERYTHING_BENEATH_SUFFIX: &str = "/**";

/// Whether path matching ignores case on this platform
pub const CASE_INSENSITIVE: bool = cfg!(any(windows, target_os = "macos"));

/// Normalize raw exclusion patterns into depth-independent glob patterns.
///
/// Every raw pattern may hold several comma-separated sub-patterns. Each
/// sub-pattern is trimmed, converted to forward slashes and anchored with
/// `**/`. A sub-pattern ending with a path separator names a directory and
/// additionally yields a `/**` form covering its contents. Duplicates are
/// dropped, first-seen order is kept.
pub fn normalize_patterns<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut normalized = Vec::new();

    let mut record = |pattern: String| {
        if seen.insert(pattern.clone()) {
            normalized.push(pattern);
        }
    };

    for sub in raw.iter().flat_map(|r| r.as_ref().split(',')) {
        let sub = sub.trim();
        if sub.is_empty() {
            continue;
        }

        let is_dir = sub.ends_with('/') || sub.ends_with('\\');

        let mut pattern = sub.replace('\\', "/");
        let trimmed_len = pattern.trim_end_matches('/').len();
        pattern.truncate(trimmed_len);

        let mut body = pattern.as_str();
        while let Some(rest) = body.strip_prefix("./") {
            body = rest;
        }
        if body.is_empty() || body == "." {
            continue;
        }

        let anchored = if body.starts_with(ANY_DEPTH_PREFIX) {
            body.to_string()
        } else {
            format!("{}{}", ANY_DEPTH_PREFIX, body)
        };

        // Keep both forms: the directory is pruned by the first, the second
        // still covers its contents if the first is ever bypassed.
        let beneath = if is_dir && !anchored.ends_with(EVERYTHING_BENEATH_SUFFIX) {
            Some(format!("{}{}", anchored, EVERYTHING_BENEATH_SUFFIX))
        } else {
            None
        };

        record(anchored);
        if let Some(beneath) = beneath {
            record(beneath);
        }
    }

    normalized
}

/// Compiled set of normalized exclusion patterns
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    patterns: Vec<String>,
    set: GlobSet,
}

impl PatternMatcher {
    /// Compile normalized patterns.
    ///
    /// Patterns that fail to compile are inert: they are logged and dropped
    /// rather than failing the scan.
    pub fn new(patterns: Vec<String>) -> Self {
        let mut builder = GlobSetBuilder::new();

        for pattern in &patterns {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(false)
                .case_insensitive(CASE_INSENSITIVE)
                .build();

            match glob {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => {
                    tracing::warn!("Ignoring unusable exclude pattern {:?}: {}", pattern, e);
                }
            }
        }

        let set = builder.build().unwrap_or_else(|e| {
            tracing::warn!("Failed to build exclude pattern set, nothing will be excluded: {}", e);
            GlobSet::empty()
        });

        Self { patterns, set }
    }

    /// Normalize raw patterns and compile them in one step
    pub fn from_raw<S: AsRef<str>>(raw: &[S]) -> Self {
        Self::new(normalize_patterns(raw))
    }

    /// The normalized patterns this matcher was built from
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// True when no pattern can ever match
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Check a root-relative path (forward slashes) against the patterns
    pub fn is_excluded<P: AsRef<Path>>(&self, relative_path: P) -> bool {
        !self.set.is_empty() && self.set.is_match(relative_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let raw: Vec<String> = vec![];
        assert!(normalize_patterns(&raw).is_empty());
        assert!(normalize_patterns(&["", "  ", ","]).is_empty());
    }

    #[test]
    fn test_file_pattern_is_anchored() {
        assert_eq!(normalize_patterns(&["*.txt"]), vec!["**/*.txt"]);
        assert_eq!(normalize_patterns(&["  *.nfo "]), vec!["**/*.nfo"]);
    }

    #[test]
    fn test_directory_pattern_expands() {
        assert_eq!(
            normalize_patterns(&["cache/"]),
            vec!["**/cache", "**/cache/**"]
        );
        assert_eq!(
            normalize_patterns(&["saves\\backup\\"]),
            vec!["**/saves/backup", "**/saves/backup/**"]
        );
    }

    #[test]
    fn test_already_anchored_untouched() {
        assert_eq!(normalize_patterns(&["**/tmp"]), vec!["**/tmp"]);
        assert_eq!(normalize_patterns(&["**/tmp/**/"]), vec!["**/tmp/**"]);
    }

    #[test]
    fn test_leading_dot_slash_stripped() {
        assert_eq!(normalize_patterns(&["./cache/"]), vec!["**/cache", "**/cache/**"]);
        assert!(normalize_patterns(&["./", "/"]).is_empty());
    }

    #[test]
    fn test_comma_joined_equals_separate() {
        let joined = normalize_patterns(&["*.nfo,*.txt"]);
        let separate = normalize_patterns(&["*.nfo", "*.txt"]);
        assert_eq!(joined, separate);
        assert_eq!(joined, vec!["**/*.nfo", "**/*.txt"]);
    }

    #[test]
    fn test_dedup_keeps_first_seen_order() {
        let normalized = normalize_patterns(&["*.txt", "cache/", "**/*.txt", "cache", "*.bak"]);
        assert_eq!(
            normalized,
            vec!["**/*.txt", "**/cache", "**/cache/**", "**/*.bak"]
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_patterns(&["cache/, *.txt", "Japan\\", "**/x/**", "./a"]);
        let twice = normalize_patterns(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_matcher_any_depth() {
        let matcher = PatternMatcher::from_raw(&["*.txt", "cache/"]);

        assert!(matcher.is_excluded("notes.txt"));
        assert!(matcher.is_excluded("snes/docs/notes.txt"));
        assert!(matcher.is_excluded("cache"));
        assert!(matcher.is_excluded("snes/cache"));
        assert!(matcher.is_excluded("cache/tmp.dat"));
        assert!(!matcher.is_excluded("a.bin"));
        assert!(!matcher.is_excluded("cached/a.bin"));
    }

    #[test]
    fn test_matcher_glob_syntax() {
        let matcher = PatternMatcher::from_raw(&["disk?.img", "[ab]*.rom"]);

        assert!(matcher.is_excluded("disk1.img"));
        assert!(!matcher.is_excluded("disk10.img"));
        assert!(matcher.is_excluded("nes/alpha.rom"));
        assert!(!matcher.is_excluded("nes/gamma.rom"));
    }

    #[test]
    fn test_invalid_pattern_is_inert() {
        let matcher = PatternMatcher::from_raw(&["[unclosed", "*.sav"]);

        assert_eq!(matcher.patterns(), &["**/[unclosed", "**/*.sav"]);
        assert!(matcher.is_excluded("slot.sav"));
        assert!(!matcher.is_excluded("[unclosed"));
        assert!(!matcher.is_excluded("game.bin"));
    }

    #[test]
    fn test_empty_matcher_excludes_nothing() {
        let raw: Vec<&str> = vec![];
        let matcher = PatternMatcher::from_raw(&raw);
        assert!(matcher.is_empty());
        assert!(!matcher.is_excluded("anything/at/all.bin"));
    }

    #[test]
    fn test_case_sensitivity_follows_platform() {
        let matcher = PatternMatcher::from_raw(&["*.TXT"]);
        assert_eq!(matcher.is_excluded("readme.txt"), CASE_INSENSITIVE);
        assert!(matcher.is_excluded("README.TXT"));
    }
}
