use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ResolveError;

/// A search hit with its optional fields already resolved: pages without a
/// rank sort last, missing strings are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePage {
    pub rank_index: i64,
    pub title: String,
    pub summary_text: String,
    pub canonical_url: String,
}

impl CandidatePage {
    pub fn new(rank_index: i64, title: &str, summary_text: &str, canonical_url: &str) -> Self {
        CandidatePage {
            rank_index,
            title: title.to_string(),
            summary_text: summary_text.to_string(),
            canonical_url: canonical_url.to_string(),
        }
    }

    /// Whether this page can be shown as the main article: it has an extract
    /// that doesn't look like a disambiguation page, and a link.
    pub fn is_displayable(&self) -> bool {
        if self.summary_text.is_empty() {
            return false;
        }
        let summary = self.summary_text.to_lowercase();
        if summary.ends_with("may refer to:") || summary.contains("disambiguation") {
            return false;
        }
        !self.canonical_url.is_empty()
    }
}

impl From<&Value> for CandidatePage {
    /// Every field of a page object is optional and read leniently: a field
    /// of the wrong type counts as missing, and a page that isn't an object
    /// at all has no title.
    fn from(page: &Value) -> Self {
        CandidatePage {
            rank_index: rank_field(page),
            title: text_field(page, "title"),
            summary_text: text_field(page, "extract"),
            canonical_url: text_field(page, "fullurl"),
        }
    }
}

/// Strings as-is, numbers and booleans as their text, anything else empty.
fn text_field(page: &Value, key: &str) -> String {
    match page.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
        _ => String::new(),
    }
}

/// The search rank, accepting `1`, `1.0` and `"1"`. Pages without a usable
/// rank sort last.
fn rank_field(page: &Value) -> i64 {
    let Some(index) = page.get("index") else {
        return i64::MAX;
    };
    index
        .as_i64()
        .or_else(|| index.as_f64().map(|f| f as i64))
        .or_else(|| index.as_str().and_then(|s| s.trim().parse().ok()))
        .unwrap_or(i64::MAX)
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub summary: String,
    pub link: String,
}

impl Article {
    /// Only called for candidates that passed `is_displayable`, so all
    /// three fields are non-empty.
    pub(crate) fn from_candidate(candidate: &CandidatePage) -> Self {
        Article {
            title: candidate.title.clone(),
            summary: candidate.summary_text.clone(),
            link: candidate.canonical_url.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchResult {
    Success {
        article: Article,
        suggestions: Vec<String>,
    },
    Failure {
        message: String,
    },
}

impl SearchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SearchResult::Success { .. })
    }

    pub fn article(&self) -> Option<&Article> {
        match self {
            SearchResult::Success { article, .. } => Some(article),
            SearchResult::Failure { .. } => None,
        }
    }

    pub fn suggestions(&self) -> &[String] {
        match self {
            SearchResult::Success { suggestions, .. } => suggestions,
            SearchResult::Failure { .. } => &[],
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            SearchResult::Success { .. } => None,
            SearchResult::Failure { message } => Some(message),
        }
    }
}

impl From<ResolveError> for SearchResult {
    fn from(err: ResolveError) -> Self {
        SearchResult::Failure {
            message: err.to_string(),
        }
    }
}

/// Pull the candidate pages out of a raw API response.
///
/// Returns `Ok(None)` when the body is blank or `query.pages` is missing,
/// empty or not an object. Only invalid JSON is an error.
pub fn parse_candidates(raw: &str) -> Result<Option<Vec<CandidatePage>>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let root: Value = serde_json::from_str(raw)?;
    let pages = match root.get("query").and_then(|q| q.get("pages")) {
        Some(Value::Object(pages)) if !pages.is_empty() => pages,
        _ => return Ok(None),
    };

    Ok(Some(pages.values().map(CandidatePage::from).collect()))
}
