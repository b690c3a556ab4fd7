//! End-to-end pipeline tests with stub external sources

use async_trait::async_trait;
use std::collections::HashMap;

use demostat_common::config::TomlConfig;
use demostat_common::models::UserRecord;
use demostat_common::{Error, Result};
use demostat_etl::fetch::{CountryInfo, CountrySource, RecordSource};
use demostat_etl::pipeline::Pipeline;

struct StubRecords(Vec<UserRecord>);

#[async_trait]
impl RecordSource for StubRecords {
    async fn fetch(&self, n: usize) -> Vec<UserRecord> {
        self.0.iter().take(n).cloned().collect()
    }
}

struct StubCountries(HashMap<String, CountryInfo>);

#[async_trait]
impl CountrySource for StubCountries {
    async fn lookup(&self, country: &str) -> Result<CountryInfo> {
        self.0
            .get(country)
            .cloned()
            .ok_or_else(|| Error::NotFound(country.to_string()))
    }
}

fn record(first: &str, gender: &str, country: &str, age: u32, email: &str) -> UserRecord {
    UserRecord {
        gender: gender.to_string(),
        first_name: first.to_string(),
        last_name: "Tester".to_string(),
        country: country.to_string(),
        age,
        email: email.to_string(),
    }
}

fn test_config(data_dir: &std::path::Path, plots_dir: &std::path::Path) -> TomlConfig {
    let mut config = TomlConfig::default();
    config.fetch.users = 100;
    config.output.data_dir = data_dir.to_path_buf();
    config.output.plots_dir = plots_dir.to_path_buf();
    config
}

fn fixture_batch() -> Vec<UserRecord> {
    vec![
        record("Ana", "female", "Spain", 25, "ana@gmail.com"),
        record("Luis", "male", "Spain", 32, "luis@yahoo.com"),
        record("Mia", "female", "Atlantis", 41, "mia@example.org"),
        record("Ben", "male", "Spain", 29, "ben@gmail.com"),
        record("Zoe", "female", "Atlantis", 95, "zoe-no-at"),
    ]
}

fn known_countries() -> StubCountries {
    let mut known = HashMap::new();
    known.insert(
        "Spain".to_string(),
        CountryInfo {
            region: "Europe".to_string(),
            population: 47_000_000,
        },
    );
    // Atlantis deliberately unknown: its lookup fails
    StubCountries(known)
}

#[tokio::test]
async fn full_run_produces_report_and_artifacts() {
    let data = tempfile::tempdir().unwrap();
    let plots = tempfile::tempdir().unwrap();
    let config = test_config(data.path(), plots.path());

    let report = Pipeline::new(config)
        .run(&StubRecords(fixture_batch()), &known_countries())
        .await
        .unwrap();

    assert_eq!(report.total_users, 5);
    assert_eq!(report.gender_distribution.get("female"), Some(3));
    assert_eq!(report.top_countries.get("Spain"), Some(3));
    assert_eq!(report.top_countries.get("Atlantis"), Some(2));
    // Failed lookup degrades to the sentinel region
    assert_eq!(report.regions.get("Europe"), Some(3));
    assert_eq!(report.regions.get("N/A"), Some(2));
    // Missing @ degrades to the sentinel domain
    assert_eq!(report.top_email_domains.get("unknown"), Some(1));

    assert!(data.path().join("users.csv").exists());
    assert!(data.path().join("users.db").exists());
    assert!(data.path().join("stats.json").exists());
    assert!(plots.path().join("age_distribution.svg").exists());
    assert!(plots.path().join("gender_distribution.svg").exists());
    assert!(plots.path().join("top_countries.svg").exists());
    assert!(plots.path().join("age_groups.svg").exists());

    // stats.json is valid JSON with ordered distributions as maps
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(data.path().join("stats.json")).unwrap())
            .unwrap();
    assert_eq!(json["total_users"], 5);
    assert!(json["gender_distribution"].is_object());

    // CSV: header plus one row per record
    let csv = std::fs::read_to_string(data.path().join("users.csv")).unwrap();
    assert_eq!(csv.lines().count(), 6);
    assert!(csv.lines().next().unwrap().starts_with("first_name,last_name,gender"));
}

#[tokio::test]
async fn sqlite_artifact_contains_all_records() {
    let data = tempfile::tempdir().unwrap();
    let plots = tempfile::tempdir().unwrap();
    let config = test_config(data.path(), plots.path());

    Pipeline::new(config)
        .without_charts()
        .run(&StubRecords(fixture_batch()), &known_countries())
        .await
        .unwrap();

    let pool = demostat_etl::load::sqlite::init_pool(&data.path().join("users.db"))
        .await
        .unwrap();
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 5);

    let (region, population): (String, i64) =
        sqlx::query_as("SELECT region, population FROM users WHERE country = 'Atlantis' LIMIT 1")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(region, "N/A");
    assert_eq!(population, 0);
}

#[tokio::test]
async fn empty_source_yields_all_zero_report() {
    let data = tempfile::tempdir().unwrap();
    let plots = tempfile::tempdir().unwrap();
    let config = test_config(data.path(), plots.path());

    let report = Pipeline::new(config)
        .run(&StubRecords(Vec::new()), &known_countries())
        .await
        .unwrap();

    assert_eq!(report.total_users, 0);
    assert_eq!(report.avg_age, 0.0);
    assert!(report.gender_distribution.is_empty());

    // Report is still written; record sinks are skipped
    assert!(data.path().join("stats.json").exists());
    assert!(!data.path().join("users.csv").exists());
    assert!(!data.path().join("users.db").exists());
}

#[tokio::test]
async fn all_lookups_failing_still_produces_full_report() {
    let data = tempfile::tempdir().unwrap();
    let plots = tempfile::tempdir().unwrap();
    let config = test_config(data.path(), plots.path());

    let report = Pipeline::new(config)
        .without_charts()
        .run(&StubRecords(fixture_batch()), &StubCountries(HashMap::new()))
        .await
        .unwrap();

    assert_eq!(report.total_users, 5);
    assert_eq!(report.regions.get("N/A"), Some(5));
}
