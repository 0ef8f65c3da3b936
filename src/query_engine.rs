use std::sync::Arc;

use crate::data_models::{Article, CandidatePage, SearchResult, parse_candidates};
use crate::error::ResolveError;
use crate::gateway::SearchGateway;

/// How many alternative titles are offered next to the main article.
pub const MAX_SUGGESTIONS: usize = 4;

/// Order candidates by the search service's own rank. The sort is stable, so
/// unranked pages keep their relative order at the end.
pub fn rank_candidates(mut candidates: Vec<CandidatePage>) -> Vec<CandidatePage> {
    candidates.sort_by_key(|c| c.rank_index);
    candidates
}

/// Pick the main article from ranked candidates and derive the suggestions.
///
/// The first displayable page wins and is never replaced; every non-empty
/// title is still collected so the suggestions keep the ranking order.
pub fn select(
    query: &str,
    ranked: &[CandidatePage],
) -> Result<(Article, Vec<String>), ResolveError> {
    let mut main_article: Option<Article> = None;
    let mut all_titles: Vec<&str> = Vec::new();

    for candidate in ranked {
        if candidate.title.is_empty() {
            continue;
        }
        all_titles.push(&candidate.title);

        if main_article.is_none() && candidate.is_displayable() {
            main_article = Some(Article::from_candidate(candidate));
        }
    }

    let Some(article) = main_article else {
        let query = query.to_string();
        return Err(if all_titles.is_empty() {
            ResolveError::NoResults { query }
        } else {
            ResolveError::NotSpecific { query }
        });
    };

    let suggestions = all_titles
        .into_iter()
        .filter(|title| *title != article.title)
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect();

    Ok((article, suggestions))
}

pub struct QueryEngine {
    gateway: Arc<dyn SearchGateway>,
}

impl QueryEngine {
    pub fn new(gateway: Arc<dyn SearchGateway>) -> Self {
        Self { gateway }
    }

    /// Resolve a query into a single article plus suggestions. Every failure
    /// is reported as `SearchResult::Failure`.
    pub async fn resolve(&self, query: &str) -> SearchResult {
        match self.try_resolve(query).await {
            Ok((article, suggestions)) => {
                tracing::info!(
                    query,
                    article = %article.title,
                    suggestions = suggestions.len(),
                    "resolved query"
                );
                SearchResult::Success {
                    article,
                    suggestions,
                }
            }
            Err(e) => {
                tracing::info!(query, reason = ?e, "query did not resolve");
                SearchResult::from(e)
            }
        }
    }

    async fn try_resolve(&self, query: &str) -> Result<(Article, Vec<String>), ResolveError> {
        if query.trim().is_empty() {
            return Err(ResolveError::EmptyQuery);
        }

        let response = self.gateway.fetch(query).await.map_err(|e| {
            tracing::warn!(query, error = %e, "search gateway failed");
            ResolveError::Connectivity
        })?;

        if response.is_empty() {
            return Err(ResolveError::EmptyResponse);
        }

        let candidates = parse_candidates(&response)
            .map_err(|e| {
                tracing::error!(query, error = %e, "could not parse search response");
                ResolveError::Unexpected
            })?
            .ok_or_else(|| ResolveError::NoResults {
                query: query.to_string(),
            })?;

        let ranked = rank_candidates(candidates);
        tracing::debug!(query, candidates = ranked.len(), "ranked candidates");
        select(query, &ranked)
    }
}

#[test]
fn test_rank_candidates_unranked_last_and_stable() {
    let ranked = rank_candidates(vec![
        CandidatePage::new(i64::MAX, "no rank a", "", ""),
        CandidatePage::new(3, "three", "", ""),
        CandidatePage::new(i64::MAX, "no rank b", "", ""),
        CandidatePage::new(1, "one", "", ""),
    ]);
    let titles: Vec<&str> = ranked.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["one", "three", "no rank a", "no rank b"]);
}

#[test]
fn test_select_first_displayable_wins() {
    let url = "https://en.wikipedia.org/wiki/";
    let ranked = vec![
        CandidatePage::new(1, "Mercury", "Mercury may refer to:", url),
        CandidatePage::new(2, "", "orphan extract", url),
        CandidatePage::new(3, "Mercury (planet)", "Mercury is the first planet.", url),
        CandidatePage::new(4, "Mercury (element)", "Mercury is a chemical element.", url),
    ];
    let (article, suggestions) = select("mercury", &ranked).unwrap();
    assert_eq!(article.title, "Mercury (planet)");
    assert_eq!(article.summary, "Mercury is the first planet.");
    assert_eq!(suggestions, vec!["Mercury", "Mercury (element)"]);
}

#[test]
fn test_select_without_titles_or_articles() {
    let empty_titles = vec![CandidatePage::new(1, "", "x", "y")];
    assert_eq!(
        select("q", &empty_titles),
        Err(ResolveError::NoResults {
            query: "q".to_string()
        })
    );

    let stubs = vec![
        CandidatePage::new(1, "Stub", "", "https://en.wikipedia.org/wiki/Stub"),
        CandidatePage::new(2, "Unlinked", "Has text.", ""),
    ];
    assert_eq!(
        select("q", &stubs),
        Err(ResolveError::NotSpecific {
            query: "q".to_string()
        })
    );
}

#[test]
fn test_select_drops_every_copy_of_main_title() {
    let url = "https://en.wikipedia.org/wiki/Dup";
    let ranked = vec![
        CandidatePage::new(1, "Dup", "Dup is a page.", url),
        CandidatePage::new(2, "Other", "", ""),
        CandidatePage::new(3, "Dup", "Dup again.", url),
    ];
    let (_, suggestions) = select("dup", &ranked).unwrap();
    assert_eq!(suggestions, vec!["Other"]);
}
