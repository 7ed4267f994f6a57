//! REST Countries client.
//!
//! REST Countries serves structured country attributes (capital, population,
//! area, region, languages, flag) looked up by free-text name.
//!
//! # API Reference
//!
//! See: <https://restcountries.com/>
//!
//! # Name resolution
//!
//! The user-supplied name is sent as-is (only URL-encoded); case and
//! diacritics are the provider's job to resolve. When the provider returns
//! multiple matches, the first entry in its result list is taken as
//! authoritative.

use serde::Deserialize;

use crate::data_sources::{Provider, SourceError};
use crate::model::{CountryRecord, NO_CAPITAL, Stat, UNAVAILABLE};

/// Base URL for the REST Countries API.
const REST_COUNTRIES_API_BASE: &str = "https://restcountries.com";

/// Client for the REST Countries facts API.
#[derive(Clone)]
pub struct RestCountriesClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for RestCountriesClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RestCountriesClient {
    /// Create a new client with the default base URL.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: REST_COUNTRIES_API_BASE.to_string(),
        }
    }

    /// Create a client with a custom base URL (for testing).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// Fetch and normalize the facts record for one country.
    ///
    /// Transport failures, non-success statuses, undecodable bodies, and an
    /// empty match list all surface as [`SourceError::Upstream`]; a payload
    /// missing `name.common` or `flags.png` surfaces as
    /// [`SourceError::MalformedResponse`]. The call is attempted exactly once.
    pub async fn fetch_country(&self, name: &str) -> Result<CountryRecord, SourceError> {
        let url = format!(
            "{}/v3.1/name/{}",
            self.base_url,
            urlencoding::encode(name)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::upstream(Provider::CountryFacts, e))?
            .error_for_status()
            .map_err(|e| SourceError::upstream(Provider::CountryFacts, e))?;

        let matches = response
            .json::<Vec<CountryPayload>>()
            .await
            .map_err(|e| SourceError::upstream(Provider::CountryFacts, e))?;

        // First match wins; the provider ranks by relevance.
        let payload = matches.into_iter().next().ok_or_else(|| {
            SourceError::upstream(
                Provider::CountryFacts,
                format!("no match for country name '{name}'"),
            )
        })?;

        payload.into_record()
    }
}

// ============================================================================
// Upstream payload types
// ============================================================================

/// One element of the REST Countries response array.
///
/// Every field is optional at the deserialization layer; requiredness and
/// sentinel fallbacks are applied in [`CountryPayload::into_record`].
#[derive(Debug, Deserialize)]
struct CountryPayload {
    name: Option<NamePayload>,

    #[serde(default)]
    capital: Vec<String>,

    population: Option<u64>,

    area: Option<f64>,

    region: Option<String>,

    subregion: Option<String>,

    /// Language code -> display name. `serde_json`'s `preserve_order`
    /// feature keeps provider order here.
    #[serde(default)]
    languages: serde_json::Map<String, serde_json::Value>,

    flags: Option<FlagsPayload>,
}

#[derive(Debug, Deserialize)]
struct NamePayload {
    common: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FlagsPayload {
    png: Option<String>,
}

impl CountryPayload {
    /// Normalize the raw payload into a fully-populated [`CountryRecord`].
    fn into_record(self) -> Result<CountryRecord, SourceError> {
        let name = self
            .name
            .and_then(|n| n.common)
            .filter(|n| !n.is_empty())
            .ok_or(SourceError::MalformedResponse {
                field: "name.common",
            })?;

        let flag_url = self
            .flags
            .and_then(|f| f.png)
            .filter(|u| !u.is_empty())
            .ok_or(SourceError::MalformedResponse { field: "flags.png" })?;

        let capital = self
            .capital
            .into_iter()
            .next()
            .unwrap_or_else(|| NO_CAPITAL.to_string());

        let languages = self
            .languages
            .values()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();

        Ok(CountryRecord {
            name,
            capital,
            population: Stat::from(self.population),
            area: Stat::from(self.area),
            region: self.region.unwrap_or_else(|| UNAVAILABLE.to_string()),
            subregion: self.subregion.unwrap_or_else(|| UNAVAILABLE.to_string()),
            languages,
            flag_url,
        })
    }
}
