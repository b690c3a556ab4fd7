//! Transformation and enrichment pipeline
//!
//! Stages are pure functions producing parallel tables over the batch;
//! [`enrich_batch`] runs them in order and zips the results into
//! `EnrichedUser` values. Because `EnrichedUser` has no optional fields, a
//! batch can never be partially enriched.

pub mod country;
pub mod enrich;
pub mod outliers;
pub mod report;
pub mod stats;

use demostat_common::config::TransformConfig;
use demostat_common::models::{EnrichedUser, UserRecord};
use tracing::info;

use crate::fetch::CountrySource;

/// Run every enrichment stage over the batch
///
/// Order matters: age/email classification, then outlier detection over the
/// age series, then the external country join. Statistics compilation is a
/// separate pure step (`report::compute_statistics`).
pub async fn enrich_batch(
    records: Vec<UserRecord>,
    config: &TransformConfig,
    country_source: &dyn CountrySource,
) -> Vec<EnrichedUser> {
    info!(records = records.len(), "Starting transform pipeline");

    let age_groups = enrich::classify_ages(&records);
    let email_profiles = enrich::email_profiles(&records, &config.popular_email_domains);

    let ages: Vec<f64> = records.iter().map(|r| f64::from(r.age)).collect();
    let outlier_flags = outliers::flag_outliers(&ages, config.outlier_coefficient);

    let table = country::build_country_table(&records, country_source).await;
    let country_attrs = country::assign_attributes(&records, &table);

    records
        .into_iter()
        .zip(age_groups)
        .zip(email_profiles)
        .zip(outlier_flags)
        .zip(country_attrs)
        .map(
            |((((record, age_group), email), is_outlier), attrs)| EnrichedUser {
                record,
                age_group,
                email_domain: email.domain,
                email_preference: email.preference,
                is_outlier,
                region: attrs.region,
                population: attrs.population,
            },
        )
        .collect()
}
