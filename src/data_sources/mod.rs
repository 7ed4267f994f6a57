//! External data sources for country information.
//!
//! This module provides clients for the two upstream providers that feed the
//! aggregator:
//!
//! - [`rest_countries`]: REST Countries - structured country facts keyed by name
//! - [`wikipedia`]: Wikipedia full-text search - ranked article snippets
//!
//! Both clients are thin wrappers over `reqwest` with a swappable base URL so
//! tests can point them at mock servers. Errors are typed as [`SourceError`]
//! and tagged with the originating [`Provider`]; no call is ever retried.

use serde::Serialize;
use thiserror::Error;

pub mod rest_countries;
pub mod wikipedia;

pub use rest_countries::RestCountriesClient;
pub use wikipedia::WikipediaClient;

/// Identifies which upstream provider produced a response or an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// The structured country-facts provider (REST Countries).
    CountryFacts,

    /// The free-text encyclopedia search provider (Wikipedia).
    Encyclopedia,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::CountryFacts => f.write_str("country facts provider"),
            Provider::Encyclopedia => f.write_str("encyclopedia search provider"),
        }
    }
}

/// Error from an upstream data source.
///
/// `Upstream` covers transport failures, non-success statuses, undecodable
/// bodies, and empty result lists. `MalformedResponse` is reserved for a
/// facts payload that decoded fine but lacks a required field; callers treat
/// both as terminal for the lookup, the distinction exists for diagnostics.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The provider could not be reached or answered with a failure.
    #[error("{provider} request failed: {message}")]
    Upstream {
        /// Which provider the request went to.
        provider: Provider,
        /// Underlying transport or status message.
        message: String,
    },

    /// The facts provider answered, but the payload is missing a field the
    /// rest of the system cannot work without.
    #[error("country facts response missing required field `{field}`")]
    MalformedResponse {
        /// JSON path of the missing field.
        field: &'static str,
    },
}

impl SourceError {
    /// Wrap a transport-level error from the given provider.
    pub(crate) fn upstream(provider: Provider, err: impl std::fmt::Display) -> Self {
        SourceError::Upstream {
            provider,
            message: err.to_string(),
        }
    }
}
