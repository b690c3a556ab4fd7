//! External data sources
//!
//! The pipeline consumes two collaborators through trait seams so tests can
//! substitute deterministic stubs: a record source (RandomUser) and a
//! per-country attribute source (RestCountries).

pub mod countries;
pub mod random_user;

use async_trait::async_trait;
use demostat_common::models::UserRecord;

pub use countries::{CountryInfo, CountrySource, RestCountriesClient};
pub use random_user::{clean, RandomUserClient};

/// Source of raw user records
///
/// Implementations return whatever they managed to fetch; an empty or
/// partial batch is valid input for the pipeline, not an error.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self, n: usize) -> Vec<UserRecord>;
}
