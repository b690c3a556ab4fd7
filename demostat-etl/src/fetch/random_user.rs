//! RandomUser record source
//!
//! Fetches the requested number of users in pages. A failed page is logged
//! and skipped; the client returns whatever it collected, truncated to the
//! requested count.

use async_trait::async_trait;
use demostat_common::config::FetchConfig;
use demostat_common::models::{ApiUser, UserRecord};
use demostat_common::Result;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};

use crate::fetch::RecordSource;

/// RandomUser API response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    results: Vec<ApiUser>,
}

/// Paginated HTTP client for the RandomUser API
pub struct RandomUserClient {
    http: Client,
    config: FetchConfig,
}

impl RandomUserClient {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    fn page_url(&self, page_size: usize, page: usize) -> String {
        let base = self.config.randomuser_url.trim_end_matches('/');
        let mut url = format!("{base}/?results={page_size}&page={page}");
        if let Some(seed) = &self.config.seed {
            url.push_str(&format!("&seed={seed}"));
        }
        url
    }

    async fn fetch_page(&self, page_size: usize, page: usize) -> Result<Vec<UserRecord>> {
        let url = self.page_url(page_size, page);
        let response = self.http.get(&url).send().await?.error_for_status()?;
        let payload: ApiResponse = response.json().await?;
        Ok(payload.results.into_iter().map(UserRecord::from).collect())
    }
}

#[async_trait]
impl RecordSource for RandomUserClient {
    async fn fetch(&self, n: usize) -> Vec<UserRecord> {
        let page_size = self.config.page_size.min(self.config.max_per_request).max(1);
        let pages = n.div_ceil(page_size);
        info!(requested = n, pages, page_size, "Fetching users");

        let mut users = Vec::with_capacity(n);
        for page in 1..=pages {
            match self.fetch_page(page_size, page).await {
                Ok(batch) => {
                    info!(page, pages, fetched = batch.len(), "Page downloaded");
                    users.extend(batch);
                }
                Err(e) => {
                    error!(page, error = %e, "Page fetch failed, skipping");
                }
            }
        }

        users.truncate(n);
        info!(total = users.len(), "Fetch complete");
        users
    }
}

/// Drop records with missing email, non-positive age or empty country
///
/// Mirrors the upstream cleaning contract: the transform stages assume their
/// input batch is field-valid apart from benign absences.
pub fn clean(users: Vec<UserRecord>) -> Vec<UserRecord> {
    let total = users.len();
    let cleaned: Vec<UserRecord> = users
        .into_iter()
        .filter(|u| !u.email.is_empty() && u.age > 0 && !u.country.is_empty())
        .collect();
    info!(valid = cleaned.len(), total, "Cleaning complete");
    cleaned
}
