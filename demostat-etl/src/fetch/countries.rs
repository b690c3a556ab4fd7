//! RestCountries lookup client
//!
//! Resolves a country name to its region and population. Each lookup is an
//! independent request with a bounded timeout; callers treat a failed lookup
//! as "no data for this country", never as a fatal error.

use async_trait::async_trait;
use demostat_common::config::FetchConfig;
use demostat_common::{Error, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Per-country attributes joined onto records during external enrichment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryInfo {
    pub region: String,
    pub population: u64,
}

/// Source of per-country attributes
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Resolve one country name to its attributes
    ///
    /// Errors cover not-found, network failure, timeout and malformed
    /// payloads alike; the caller folds them all into sentinel defaults.
    async fn lookup(&self, country: &str) -> Result<CountryInfo>;
}

/// RestCountries API response element (one matching country)
#[derive(Debug, Deserialize)]
struct ApiCountry {
    #[serde(default)]
    region: String,
    #[serde(default)]
    population: u64,
}

/// HTTP client for the RestCountries API
pub struct RestCountriesClient {
    http: Client,
    config: FetchConfig,
}

impl RestCountriesClient {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.lookup_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }
}

#[async_trait]
impl CountrySource for RestCountriesClient {
    async fn lookup(&self, country: &str) -> Result<CountryInfo> {
        let url = self.config.country_url(country);
        debug!(country, %url, "Looking up country attributes");

        let response = self.http.get(&url).send().await?.error_for_status()?;
        let matches: Vec<ApiCountry> = response.json().await?;

        let first = matches
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("no country data for '{country}'")))?;

        Ok(CountryInfo {
            region: first.region,
            population: first.population,
        })
    }
}
