//! Stopword set used to find where a merchant name ends
//!
//! ## Source Resolution
//!
//! 1. Explicit path (e.g. `--stopwords`)
//! 2. Override in data dir (~/.local/share/paynote/config/stopwords.txt)
//! 3. Embedded English list (compiled into binary)

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::data_config_dir;
use crate::error::Result;

/// Embedded default list (NLTK English stopwords)
const DEFAULT_STOPWORDS: &str = include_str!("../../../config/stopwords.txt");

/// Lowercase common words; membership is case-insensitive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// The embedded English list
    pub fn english() -> Self {
        Self::parse(DEFAULT_STOPWORDS)
    }

    /// An empty set: merchant names are never truncated
    pub fn empty() -> Self {
        Self::default()
    }

    /// One word per line; blank lines and `#` comments are skipped
    pub fn parse(content: &str) -> Self {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    /// Load from an explicit file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let set = Self::parse(&content);
        debug!("Loaded {} stopwords from {}", set.len(), path.display());
        Ok(set)
    }

    /// Resolve explicit path → data dir override → embedded list
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match resolve_path(path) {
            Some(p) => Self::from_file(&p),
            None => Ok(Self::english()),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopwordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }
}

/// Default stopword override path
pub fn default_stopwords_path() -> Option<PathBuf> {
    data_config_dir().map(|d| d.join("stopwords.txt"))
}

/// File that [`StopwordSet::load`] would read, or `None` for the embedded list
pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    default_stopwords_path().filter(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_english_list() {
        let set = StopwordSet::english();
        assert_eq!(set.len(), 179);
        assert!(set.contains("for"));
        assert!(set.contains("The"));
        assert!(set.contains("don't"));
        assert!(!set.contains("swiggy"));
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let set = StopwordSet::parse("# header\n\nFOR\n  on  \n");
        assert_eq!(set.len(), 2);
        assert!(set.contains("for"));
        assert!(set.contains("on"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "via").unwrap();
        writeln!(file, "near").unwrap();

        let set = StopwordSet::load(Some(file.path())).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("near"));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = StopwordSet::load(Some(Path::new("/definitely/not/here.txt")));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_set() {
        let set = StopwordSet::empty();
        assert!(set.is_empty());
        assert!(!set.contains("the"));
    }
}
