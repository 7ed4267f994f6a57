//! Wikipedia search client.
//!
//! Wikipedia's `list=search` endpoint returns ranked article hits for a
//! free-text query. The aggregator feeds it the canonical name resolved by
//! the facts provider, so relevance benefits from that normalization.
//!
//! # API Reference
//!
//! See: <https://www.mediawiki.org/wiki/API:Search>
//!
//! Search results are supplementary: the aggregator absorbs any error from
//! this client and falls back to an empty article list, so a Wikipedia outage
//! never blocks a country view.

use serde::Deserialize;

use crate::data_sources::{Provider, SourceError};
use crate::model::ArticleRef;

/// Base URL for the Wikipedia API endpoint.
const WIKIPEDIA_API_BASE: &str = "https://en.wikipedia.org";

/// Fixed base that article URLs are derived against.
const ARTICLE_URL_BASE: &str = "https://en.wikipedia.org/wiki/";

/// Client for Wikipedia's full-text search API.
#[derive(Clone)]
pub struct WikipediaClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for WikipediaClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WikipediaClient {
    /// Create a new client with the default base URL.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: WIKIPEDIA_API_BASE.to_string(),
        }
    }

    /// Create a client with a custom base URL (for testing).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// Search for articles related to a query.
    ///
    /// Hits come back in the provider's relevance order, with snippets
    /// stripped of markup and article URLs derived from the titles. Errors
    /// are tagged with [`Provider::Encyclopedia`]; the caller decides whether
    /// to surface or absorb them.
    pub async fn search_articles(&self, query: &str) -> Result<Vec<ArticleRef>, SourceError> {
        let url = format!(
            "{}/w/api.php?action=query&format=json&list=search&srsearch={}&utf8=&formatversion=2",
            self.base_url,
            urlencoding::encode(query)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::upstream(Provider::Encyclopedia, e))?
            .error_for_status()
            .map_err(|e| SourceError::upstream(Provider::Encyclopedia, e))?;

        let data = response
            .json::<SearchResponse>()
            .await
            .map_err(|e| SourceError::upstream(Provider::Encyclopedia, e))?;

        Ok(data
            .query
            .search
            .into_iter()
            .map(|hit| ArticleRef {
                url: article_url(&hit.title),
                snippet: strip_markup(&hit.snippet),
                title: hit.title,
            })
            .collect())
    }
}

/// Derive an article URL from its title.
///
/// Pure function of the title: spaces become underscores, appended to the
/// fixed article base. No lookup involved.
pub fn article_url(title: &str) -> String {
    format!("{}{}", ARTICLE_URL_BASE, title.replace(' ', "_"))
}

/// Delete every `<...>` span from a search snippet.
///
/// Non-greedy: each `<` is dropped together with everything up to the next
/// `>`. A `<` with no closing `>` is left in place along with the rest of the
/// text. HTML entities are not decoded; `&amp;` passes through unchanged.
pub fn strip_markup(snippet: &str) -> String {
    let mut out = String::with_capacity(snippet.len());
    let mut rest = snippet;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        match rest[start..].find('>') {
            Some(end) => rest = &rest[start + end + 1..],
            None => {
                // Unmatched bracket, keep the remainder verbatim.
                out.push_str(&rest[start..]);
                return out;
            }
        }
    }

    out.push_str(rest);
    out
}

// ============================================================================
// Upstream payload types
// ============================================================================

/// Top-level search response.
#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    query: QueryPayload,
}

#[derive(Debug, Default, Deserialize)]
struct QueryPayload {
    #[serde(default)]
    search: Vec<SearchHit>,
}

/// One ranked hit from the search endpoint.
#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,

    #[serde(default)]
    snippet: String,
}
