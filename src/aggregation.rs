//! Aggregation logic: orchestrates the two upstream clients per query and
//! defines the partial-failure contract.
//!
//! The two upstream calls are sequential with a short-circuit: the facts
//! lookup is essential and runs first; only its resolved canonical name is
//! worth searching the encyclopedia for, so a facts failure ends the query
//! without ever touching Wikipedia. Encyclopedia failures, by contrast, are
//! absorbed into an empty article list because article context is
//! supplementary and must never block the primary country view.

use tracing::{info, warn};

use crate::data_sources::{RestCountriesClient, WikipediaClient};
use crate::model::AggregateResult;

/// Orchestrator for country information queries.
///
/// Stateless: holds only the two upstream clients. Every query builds its
/// result from scratch; nothing is shared between in-flight queries and
/// nothing is cached across them.
#[derive(Clone)]
pub struct Aggregator {
    facts: RestCountriesClient,
    wikipedia: WikipediaClient,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    /// Create an aggregator pointed at the real upstream providers.
    pub fn new() -> Self {
        Self {
            facts: RestCountriesClient::new(),
            wikipedia: WikipediaClient::new(),
        }
    }

    /// Create an aggregator with custom clients (for testing or base-URL
    /// overrides).
    pub fn with_clients(facts: RestCountriesClient, wikipedia: WikipediaClient) -> Self {
        Self { facts, wikipedia }
    }

    /// Look up one country and attach related encyclopedia articles.
    ///
    /// The signature is infallible: failure is data. A facts failure comes
    /// back as a result with `error` set and no record; an encyclopedia
    /// failure comes back as a complete record with an empty article list.
    pub async fn get_country_info(&self, name: &str) -> AggregateResult {
        let record = match self.facts.fetch_country(name).await {
            Ok(record) => record,
            Err(e) => {
                warn!(query = %name, error = %e, "Country facts lookup failed");
                return AggregateResult::failure(e);
            }
        };

        // Search with the resolved canonical name, not the raw user input.
        let articles = match self.wikipedia.search_articles(&record.name).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!(
                    country = %record.name,
                    error = %e,
                    "Encyclopedia search failed; continuing without articles"
                );
                Vec::new()
            }
        };

        info!(
            country = %record.name,
            article_count = articles.len(),
            "Country info aggregated"
        );

        AggregateResult::success(record, articles)
    }

    /// Look up two countries independently for a side-by-side comparison.
    ///
    /// The two queries share nothing and are joined concurrently purely for
    /// latency; either side failing leaves the other side complete.
    pub async fn compare_countries(
        &self,
        first: &str,
        second: &str,
    ) -> (AggregateResult, AggregateResult) {
        tokio::join!(self.get_country_info(first), self.get_country_info(second))
    }
}
