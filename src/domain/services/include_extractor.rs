//! Include Extractor
//!
//! Finds import-like statements in raw source text without a full parser.
//! Two patterns do the work:
//!
//! - statement: the keyword, then everything up to the next `;`, across lines
//! - token: a quoted run without spaces or quotes, `'` and `"` interchangeable
//!
//! A statement whose body is not a quoted list (`@import url(foo);`) is
//! returned with no tokens so the caller can step past it and keep scanning.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::entities::IncludeMatch;

static TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"['"]([^ '"]*)['"]"#).expect("token pattern is valid"));

/// Scanner for one import keyword
#[derive(Debug, Clone)]
pub struct IncludeExtractor {
    statement: Regex,
}

impl IncludeExtractor {
    /// Build an extractor for statements starting with `keyword`
    pub fn new(keyword: &str) -> Self {
        let boundary = if keyword.chars().last().is_some_and(|c| c.is_alphanumeric()) {
            r"\b"
        } else {
            ""
        };
        let pattern = format!(r"(?s){}{}\s*([^;]*);", regex::escape(keyword), boundary);
        Self {
            statement: Regex::new(&pattern).expect("escaped keyword always forms a valid pattern"),
        }
    }

    /// Find the next statement at or after byte `offset`.
    ///
    /// Returns `None` once no statement remains. Offsets past the end or
    /// inside a multi-byte character are moved forward to a valid position.
    pub fn find_next_include(&self, text: &str, offset: usize) -> Option<IncludeMatch> {
        let mut start = offset.min(text.len());
        while !text.is_char_boundary(start) {
            start += 1;
        }

        let caps = self.statement.captures_at(text, start)?;
        let whole = caps.get(0)?;
        let body = caps.get(1).map(|m| m.as_str()).unwrap_or_default();

        Some(IncludeMatch {
            span: whole.range(),
            tokens: split_tokens(body),
        })
    }

    /// Every statement in `text`, in order
    pub fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = IncludeMatch> + 'a {
        let mut offset = 0;
        std::iter::from_fn(move || {
            let found = self.find_next_include(text, offset)?;
            offset = found.end().max(offset + 1);
            Some(found)
        })
    }
}

/// Split a statement body into its quoted path tokens.
///
/// Returns nothing unless the trimmed body starts and ends with a quote.
fn split_tokens(body: &str) -> Vec<String> {
    let trimmed = body.trim();
    let normalized = trimmed.replace('\'', "\"");
    if normalized.len() < 2 || !normalized.starts_with('"') || !normalized.ends_with('"') {
        return Vec::new();
    }

    TOKEN_REGEX
        .captures_iter(trimmed)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Append `extension` to `token` unless it already ends with it
pub fn with_extension(token: &str, extension: &str) -> String {
    if token.ends_with(extension) {
        token.to_string()
    } else {
        format!("{}{}", token, extension)
    }
}
