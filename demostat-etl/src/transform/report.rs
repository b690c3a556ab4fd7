//! Aggregate statistics compiler
//!
//! Pure function of the fully-enriched batch. Every division is guarded so
//! an empty batch yields an all-zero report instead of failing. Float values
//! are rounded to 2 decimal places; frequency tables keep first-seen tie
//! order and serialize as ordered JSON maps.

use chrono::Utc;
use demostat_common::config::TransformConfig;
use demostat_common::models::EnrichedUser;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::info;

use crate::transform::stats::{
    frequency, mean, median, pearson_correlation, percentile, population_stdev, round2, top_n,
};

/// Ordered frequency table serializing as a JSON map
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Distribution(pub Vec<(String, u64)>);

impl Distribution {
    pub fn get(&self, key: &str) -> Option<u64> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, count) in &self.0 {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// Aggregate statistics for one pipeline run
///
/// Created fresh per run, immutable once returned, consumed as-is by the
/// report sink and the chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsReport {
    pub generated_at: String,
    pub total_users: u64,
    pub avg_age: f64,
    pub median_age: f64,
    pub std_age: f64,
    pub min_age: u32,
    pub max_age: u32,
    pub q1_age: f64,
    pub q3_age: f64,
    pub iqr_age: f64,
    /// Coefficient of variation of age, as a percentage of the mean
    pub cv_age: f64,
    pub outliers: u64,
    /// Pearson correlation between age and joined country population
    pub age_population_correlation: f64,
    pub gender_distribution: Distribution,
    pub top_countries: Distribution,
    pub top_email_domains: Distribution,
    pub regions: Distribution,
    pub age_groups: Distribution,
}

/// Compile the full statistics report from an enriched batch
pub fn compute_statistics(users: &[EnrichedUser], config: &TransformConfig) -> StatisticsReport {
    let ages: Vec<f64> = users.iter().map(|u| f64::from(u.record.age)).collect();
    let populations: Vec<f64> = users.iter().map(|u| u.population as f64).collect();

    let avg = mean(&ages);
    let std = population_stdev(&ages);
    let q1 = percentile(&ages, 25.0);
    let q3 = percentile(&ages, 75.0);
    let cv = if avg == 0.0 { 0.0 } else { 100.0 * std / avg };

    let report = StatisticsReport {
        generated_at: Utc::now().to_rfc3339(),
        total_users: users.len() as u64,
        avg_age: round2(avg),
        median_age: round2(median(&ages)),
        std_age: round2(std),
        min_age: users.iter().map(|u| u.record.age).min().unwrap_or(0),
        max_age: users.iter().map(|u| u.record.age).max().unwrap_or(0),
        q1_age: round2(q1),
        q3_age: round2(q3),
        iqr_age: round2(q3 - q1),
        cv_age: round2(cv),
        outliers: users.iter().filter(|u| u.is_outlier).count() as u64,
        age_population_correlation: round2(pearson_correlation(&ages, &populations)),
        gender_distribution: Distribution(frequency(
            users.iter().map(|u| u.record.gender.as_str()),
        )),
        top_countries: Distribution(top_n(
            frequency(users.iter().map(|u| u.record.country.as_str())),
            config.top_countries,
        )),
        top_email_domains: Distribution(top_n(
            frequency(users.iter().map(|u| u.email_domain.as_str())),
            config.top_email_domains,
        )),
        regions: Distribution(top_n(
            frequency(users.iter().map(|u| u.region.as_str())),
            config.top_countries,
        )),
        age_groups: Distribution(top_n(
            frequency(users.iter().map(|u| u.age_group.label())),
            config.top_countries,
        )),
    };

    info!(
        total_users = report.total_users,
        avg_age = report.avg_age,
        outliers = report.outliers,
        "Statistics compiled"
    );
    report
}
