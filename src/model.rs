//! Data models for FlagGlobe.
//!
//! The central type is [`AggregateResult`]: the per-query response unit that
//! combines a normalized [`CountryRecord`] with supplementary encyclopedia
//! [`ArticleRef`]s, or carries an [`ErrorInfo`] when the primary lookup
//! failed. Exactly one of `record` and `error` is set, never both.
//!
//! All types here are request-scoped: they are built fresh for each query,
//! handed to the presentation layer, and dropped. Nothing is cached or
//! persisted across requests.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::data_sources::{Provider, SourceError};

/// Sentinel used when the facts provider has no capital for a country.
pub const NO_CAPITAL: &str = "No capital";

/// Sentinel used for optional facts fields absent from the upstream payload.
pub const UNAVAILABLE: &str = "N/A";

/// A numeric fact that may be missing from the upstream payload.
///
/// Serializes as the plain number when known, or as the string `"N/A"` when
/// the provider omitted the field. This keeps [`CountryRecord`] fully
/// populated: optional fields degrade to an explicit sentinel instead of
/// disappearing from the rendered output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stat<T> {
    /// The provider supplied a value.
    Known(T),

    /// The field was absent upstream; renders as `"N/A"`.
    Unavailable,
}

impl<T> Stat<T> {
    /// Get the value, if the provider supplied one.
    pub fn known(&self) -> Option<&T> {
        match self {
            Stat::Known(v) => Some(v),
            Stat::Unavailable => None,
        }
    }
}

impl<T> From<Option<T>> for Stat<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Stat::Known(v),
            None => Stat::Unavailable,
        }
    }
}

impl<T: Serialize> Serialize for Stat<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Stat::Known(v) => v.serialize(serializer),
            Stat::Unavailable => serializer.serialize_str(UNAVAILABLE),
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Stat<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stat::Known(v) => v.fmt(f),
            Stat::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}

/// Canonical representation of one country.
///
/// Built by the facts client from whatever the provider returned. `name` and
/// `flag_url` are required (their absence fails the whole lookup, since the
/// rest of the system joins on `name`); every other field falls back to its
/// documented sentinel so the record is never partially shaped.
#[derive(Debug, Clone, Serialize)]
pub struct CountryRecord {
    /// Common/display name. Canonical: this is the join key used for the
    /// subsequent encyclopedia search.
    pub name: String,

    /// Capital city, or `"No capital"` when the provider lists none.
    pub capital: String,

    /// Population count, or `"N/A"`.
    pub population: Stat<u64>,

    /// Land area in square kilometres, or `"N/A"`.
    pub area: Stat<f64>,

    /// Continent-level region, or `"N/A"`.
    pub region: String,

    /// Subregion, or `"N/A"`.
    pub subregion: String,

    /// Official languages in provider order.
    pub languages: Vec<String>,

    /// URL of the country's flag image.
    pub flag_url: String,
}

impl CountryRecord {
    /// Render the language list the way the presentation layer shows it.
    pub fn languages_joined(&self) -> String {
        self.languages.join(", ")
    }
}

/// One encyclopedia search hit.
///
/// `url` is derived deterministically from `title` (spaces replaced with
/// underscores, appended to the fixed article base); no second lookup is
/// needed to construct it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRef {
    /// Article title as returned by the search endpoint.
    pub title: String,

    /// Plain-text snippet with all markup stripped.
    pub snippet: String,

    /// Direct link to the article.
    pub url: String,
}

/// Error category, kept distinct for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Transport failure or non-success status from a provider.
    Upstream,

    /// Facts provider response was missing a required field.
    MalformedResponse,
}

/// Wire form of a failed primary lookup.
///
/// Carries the originating provider and a human-readable message, mirroring
/// the internal [`SourceError`] taxonomy.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    /// Which upstream provider the failure came from.
    pub provider: Provider,

    /// Whether this was a transport/status failure or a malformed payload.
    pub kind: ErrorKind,

    /// Human-readable description of what went wrong.
    pub message: String,
}

impl From<SourceError> for ErrorInfo {
    fn from(err: SourceError) -> Self {
        let message = err.to_string();
        match err {
            SourceError::Upstream { provider, .. } => ErrorInfo {
                provider,
                kind: ErrorKind::Upstream,
                message,
            },
            SourceError::MalformedResponse { .. } => ErrorInfo {
                provider: Provider::CountryFacts,
                kind: ErrorKind::MalformedResponse,
                message,
            },
        }
    }
}

/// Response unit for one single-country query.
///
/// Exactly one of `record` and `error` is set. `articles` is only meaningful
/// alongside a record; a failed encyclopedia search never invalidates a valid
/// record, it just leaves `articles` empty.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateResult {
    /// When this response was assembled (UTC).
    pub fetched_at: DateTime<Utc>,

    /// The consolidated country record, if the facts lookup succeeded.
    pub record: Option<CountryRecord>,

    /// Related encyclopedia articles in provider relevance order.
    pub articles: Vec<ArticleRef>,

    /// Set when the primary facts lookup failed.
    pub error: Option<ErrorInfo>,
}

impl AggregateResult {
    /// Build a successful result from a record and its related articles.
    pub fn success(record: CountryRecord, articles: Vec<ArticleRef>) -> Self {
        AggregateResult {
            fetched_at: Utc::now(),
            record: Some(record),
            articles,
            error: None,
        }
    }

    /// Build a failed result from a facts-lookup error.
    pub fn failure(error: SourceError) -> Self {
        AggregateResult {
            fetched_at: Utc::now(),
            record: None,
            articles: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Whether the primary lookup succeeded.
    pub fn is_success(&self) -> bool {
        self.record.is_some()
    }
}
