//! Keyword formatting for issue and pull request titles
//!
//! Wraps configured keywords in backticks so that domain terms stand out,
//! leaving already formatted keywords, partial words and hyphenated words
//! alone.

pub mod config;
pub mod errors;
pub mod event;
pub mod format;
pub mod keywords;
pub mod output;
pub mod run;
pub mod store;

pub use errors::{Error, Result};
pub use format::{format_title, mark_keyword, mark_keywords, mark_pattern, MARKER};
pub use keywords::{normalize_prefix, parse_keywords, KeywordRule, KeywordSource};
