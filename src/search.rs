//! # Search Engine
//!
//! Case-insensitive substring search over the extracted text of every page.
//! Pages are scanned strictly in order, one at a time; each page contributes
//! at most one hit, taken at its first match.

use crate::document::PageTextSource;
use crate::schema::{ViewerError, ViewerOptions};
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// A page containing the query, with a short excerpt around the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub page: u32,
    pub snippet: String,
}

/// Characters of context kept on either side of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnippetWindow {
    pub before: usize,
    pub after: usize,
}

impl Default for SnippetWindow {
    fn default() -> Self {
        Self {
            before: 35,
            after: 60,
        }
    }
}

impl From<&ViewerOptions> for SnippetWindow {
    fn from(options: &ViewerOptions) -> Self {
        Self {
            before: options.snippet_before,
            after: options.snippet_after,
        }
    }
}

/// Hits of one search, in ascending page order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResults {
    hits: Vec<SearchHit>,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn hits(&self) -> &[SearchHit] {
        &self.hits
    }

    /// The hits shown to the user.
    pub fn displayed(&self, limit: usize) -> &[SearchHit] {
        &self.hits[..self.hits.len().min(limit)]
    }

    /// How many hits are left out of [`SearchResults::displayed`].
    pub fn hidden(&self, limit: usize) -> usize {
        self.hits.len().saturating_sub(limit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Query was blank; no page was scanned.
    EmptyQuery,
    NoMatches,
    Matches(SearchResults),
}

/// Trims and lowercases a raw query; blank input gives `None`.
pub fn normalize_query(raw: &str) -> Option<String> {
    let query = raw.trim().to_lowercase();
    if query.is_empty() { None } else { Some(query) }
}

/// Collapses every run of whitespace into one space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").into_owned()
}

/// Substring of `s` between two character positions, clamped to its length.
fn char_slice(s: &str, start: usize, end: usize) -> &str {
    let byte_at = |n: usize| s.char_indices().nth(n).map_or(s.len(), |(i, _)| i);
    let (start, end) = (byte_at(start), byte_at(end));
    &s[start..end.max(start)]
}

/// Looks for `query` (already normalized) in one page's text.
///
/// The snippet spans `window.before` characters ahead of the match through
/// `window.after` characters past its end, taken from the lowercased text.
pub fn find_in_text(
    page: u32,
    text: &str,
    query: &str,
    window: SnippetWindow,
) -> Option<SearchHit> {
    let lower = text.to_lowercase();
    let byte_idx = lower.find(query)?;

    let idx = lower[..byte_idx].chars().count();
    let total = lower.chars().count();
    let start = idx.saturating_sub(window.before);
    let end = idx
        .saturating_add(query.chars().count())
        .saturating_add(window.after)
        .min(total);

    Some(SearchHit {
        page,
        snippet: collapse_whitespace(char_slice(&lower, start, end)),
    })
}

/// Scans pages `1..=page_count` of `source` for `raw_query`.
///
/// Each page's text is awaited before the next is requested. An error from
/// any page ends the scan.
pub async fn search_document<S: PageTextSource>(
    source: &S,
    raw_query: &str,
    window: SnippetWindow,
) -> Result<SearchOutcome, ViewerError> {
    let Some(query) = normalize_query(raw_query) else {
        return Ok(SearchOutcome::EmptyQuery);
    };

    let mut hits = Vec::new();
    for page in 1..=source.page_count() {
        let text = source.page_text(page).await?;
        if let Some(hit) = find_in_text(page, &text, &query, window) {
            hits.push(hit);
        }
    }
    log::debug!("search for {:?} matched {} pages", query, hits.len());

    if hits.is_empty() {
        Ok(SearchOutcome::NoMatches)
    } else {
        Ok(SearchOutcome::Matches(SearchResults { hits }))
    }
}
