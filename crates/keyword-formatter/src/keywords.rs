//! Keyword source normalization
//!
//! Turns the raw `keywords` / `keywords-path` configuration into a
//! [`KeywordRule`]: either a deduplicated list of literal keywords or a
//! single user-supplied regular expression.

use crate::errors::{Error, Result};
use log::{debug, warn};
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How a title is matched
#[derive(Debug, Clone)]
pub enum KeywordRule {
    /// Literal keywords, matched case-insensitively in this order
    List(Vec<String>),
    /// A user expression that owns matching entirely
    Pattern(Regex),
}

impl KeywordRule {
    /// The literal keywords, if this is a list rule
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            KeywordRule::List(keywords) => Some(keywords),
            KeywordRule::Pattern(_) => None,
        }
    }

    /// The user expression, if this is a pattern rule
    pub fn as_pattern(&self) -> Option<&Regex> {
        match self {
            KeywordRule::List(_) => None,
            KeywordRule::Pattern(pattern) => Some(pattern),
        }
    }

    /// True for a keyword list with no entries; a pattern is never empty
    pub fn is_empty(&self) -> bool {
        matches!(self, KeywordRule::List(keywords) if keywords.is_empty())
    }
}

/// Where keywords come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordSource {
    Inline(String),
    Path(PathBuf),
}

impl KeywordSource {
    /// Pick the single configured source. Empty values count as unset.
    pub fn from_inputs(keywords: Option<&str>, keywords_path: Option<&Path>) -> Result<Self> {
        let keywords = keywords.filter(|text| !text.is_empty());
        let keywords_path = keywords_path.filter(|path| !path.as_os_str().is_empty());

        match (keywords, keywords_path) {
            (Some(_), Some(_)) => Err(Error::ConflictingSources),
            (None, None) => Err(Error::MissingSource),
            (Some(text), None) => Ok(KeywordSource::Inline(text.to_string())),
            (None, Some(path)) => Ok(KeywordSource::Path(path.to_path_buf())),
        }
    }

    /// Resolve the source into a non-empty rule
    pub fn load(&self) -> Result<KeywordRule> {
        match self {
            KeywordSource::Inline(text) => {
                let rule = parse_keywords(text)?;
                if rule.is_empty() {
                    return Err(Error::NoKeywords);
                }
                Ok(rule)
            }
            KeywordSource::Path(path) => load_from_path(path),
        }
    }
}

/// Parse inline keyword text.
///
/// Text wrapped in `/` delimiters is compiled as a regular expression;
/// anything else is split on commas and newlines.
pub fn parse_keywords(text: &str) -> Result<KeywordRule> {
    if let Some(source) = pattern_literal(text) {
        debug!("Keywords are a pattern: /{}/", source);
        return Ok(KeywordRule::Pattern(Regex::new(source)?));
    }

    Ok(KeywordRule::List(split_keywords(text)))
}

fn pattern_literal(text: &str) -> Option<&str> {
    if text.len() < 2 {
        return None;
    }
    text.strip_prefix('/')?.strip_suffix('/')
}

/// Split on commas and newlines, trim, drop empty pieces and duplicates
pub fn split_keywords(text: &str) -> Vec<String> {
    dedup(
        text.split([',', '\n'])
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(String::from),
    )
}

/// Keep the first occurrence of each keyword, in order
fn dedup(keywords: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords.into_iter().filter(|keyword| seen.insert(keyword.clone())).collect()
}

fn load_from_path(path: &Path) -> Result<KeywordRule> {
    let metadata = fs::metadata(path).map_err(|source| Error::io(path, source))?;

    if metadata.is_dir() {
        let keywords = read_directory_keywords(path)?;
        if keywords.is_empty() {
            return Err(Error::EmptyDirectory(path.to_path_buf()));
        }
        debug!("Loaded {} keyword(s) from directory {}", keywords.len(), path.display());
        Ok(KeywordRule::List(keywords))
    } else if metadata.is_file() {
        let text = fs::read_to_string(path).map_err(|source| Error::io(path, source))?;
        let keywords = split_keywords(&text);
        if keywords.is_empty() {
            return Err(Error::EmptyFile(path.to_path_buf()));
        }
        debug!("Loaded {} keyword(s) from file {}", keywords.len(), path.display());
        Ok(KeywordRule::List(keywords))
    } else {
        Err(Error::InvalidPath(path.to_path_buf()))
    }
}

/// Each immediate entry's name up to its first `.` is a keyword
fn read_directory_keywords(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(dir).to_path_buf();
            Error::io(path, err.into())
        })?;

        let Some(file_name) = entry.file_name().to_str() else {
            warn!("Skipping entry with a non-UTF-8 name: {}", entry.path().display());
            continue;
        };
        let stem = file_name.split('.').next().unwrap_or_default();
        // Dotfiles such as .gitkeep have no name before the first dot
        if !stem.is_empty() {
            names.push(stem.to_string());
        }
    }

    Ok(dedup(names))
}

/// Normalize the shared prefix: missing or empty means no prefix
pub fn normalize_prefix(prefix: Option<&str>) -> Option<String> {
    prefix.filter(|p| !p.is_empty()).map(String::from)
}
