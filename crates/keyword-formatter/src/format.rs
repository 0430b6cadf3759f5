//! Keyword marking for titles
//!
//! Each keyword gets one left-to-right pass over the title. An occurrence is
//! wrapped in backticks when it sits on a word boundary and the characters
//! touching it are not `-`, `_` or a backtick. The backtick exclusion is what
//! keeps already formatted keywords from being wrapped twice.

use crate::errors::Result;
use crate::keywords::KeywordRule;
use regex::Regex;

/// Emphasis marker wrapped around each matched keyword
pub const MARKER: char = '`';

/// Format `title` with any rule
pub fn format_title(title: &str, rule: &KeywordRule, prefix: Option<&str>) -> Result<String> {
    match rule {
        KeywordRule::List(keywords) => mark_keywords(title, keywords, prefix),
        KeywordRule::Pattern(pattern) => Ok(mark_pattern(title, pattern)),
    }
}

/// Apply one pass per keyword, in order. Later passes see earlier output.
pub fn mark_keywords<S: AsRef<str>>(
    title: &str,
    keywords: &[S],
    prefix: Option<&str>,
) -> Result<String> {
    keywords
        .iter()
        .try_fold(title.to_string(), |current, keyword| {
            mark_keyword(&current, keyword.as_ref(), prefix)
        })
}

/// Wrap every qualifying occurrence of a single keyword
pub fn mark_keyword(title: &str, keyword: &str, prefix: Option<&str>) -> Result<String> {
    if keyword.is_empty() {
        return Ok(title.to_string());
    }

    let pattern = keyword_pattern(keyword, prefix)?;
    let mut marked = String::with_capacity(title.len() + 2);
    let mut copied = 0;

    // Resume right after each keyword, not after its trailing boundary
    // character, so "hello hello" marks both occurrences.
    while let Some(caps) = pattern.captures_at(title, copied) {
        let Some(span) = caps.name("keyword") else {
            break;
        };
        marked.push_str(&title[copied..span.start()]);
        push_marked(&mut marked, span.as_str());
        copied = span.end();
    }

    marked.push_str(&title[copied..]);
    Ok(marked)
}

/// Wrap every non-empty match of a user expression.
///
/// The expression owns its boundaries, so the prefix does not apply. A match
/// that touches a marker on either side is left alone.
pub fn mark_pattern(title: &str, pattern: &Regex) -> String {
    let mut marked = String::with_capacity(title.len() + 2);
    let mut copied = 0;

    for found in pattern.find_iter(title) {
        if found.is_empty() || touches_marker(title, found.start(), found.end()) {
            continue;
        }
        marked.push_str(&title[copied..found.start()]);
        push_marked(&mut marked, found.as_str());
        copied = found.end();
    }

    marked.push_str(&title[copied..]);
    marked
}

/// Whether `title[start..end]` starts, ends, or is bordered by a marker
fn touches_marker(title: &str, start: usize, end: usize) -> bool {
    let matched = &title[start..end];
    title[..start].ends_with(MARKER)
        || title[end..].starts_with(MARKER)
        || matched.starts_with(MARKER)
        || matched.ends_with(MARKER)
}

fn push_marked(out: &mut String, text: &str) {
    out.push(MARKER);
    out.push_str(text);
    out.push(MARKER);
}

/// `(start | boundary char) \b (prefix? keyword) \b (boundary char | end)`
fn keyword_pattern(keyword: &str, prefix: Option<&str>) -> Result<Regex> {
    let prefix = prefix
        .filter(|p| !p.is_empty())
        .map(|p| format!("(?:{})?", regex::escape(p)))
        .unwrap_or_default();

    let source = format!(
        r"(?i)(?:^|[^\-_`])\b(?P<keyword>{}{})\b(?:[^\-_`]|$)",
        prefix,
        regex::escape(keyword)
    );

    Ok(Regex::new(&source)?)
}
