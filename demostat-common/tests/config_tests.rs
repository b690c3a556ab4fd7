//! Configuration loading tests

use demostat_common::config::{ConfigSource, TomlConfig, CONFIG_ENV_VAR};
use std::io::Write;

#[test]
fn defaults_are_complete() {
    let config = TomlConfig::default();

    assert_eq!(config.fetch.users, 1000);
    assert_eq!(config.fetch.page_size, 500);
    assert_eq!(config.fetch.fetch_timeout_secs, 10);
    assert_eq!(config.fetch.lookup_timeout_secs, 30);
    assert!(config.fetch.seed.is_none());

    assert_eq!(config.transform.outlier_coefficient, 1.5);
    assert_eq!(config.transform.top_countries, 10);
    assert_eq!(config.transform.top_email_domains, 5);
    assert!(config
        .transform
        .popular_email_domains
        .contains(&"gmail.com".to_string()));

    assert_eq!(config.output.csv_filename, "users.csv");
    assert_eq!(config.output.sqlite_filename, "users.db");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn empty_toml_yields_defaults() {
    let config: TomlConfig = toml::from_str("").unwrap();
    assert_eq!(config.fetch.users, 1000);
    assert_eq!(config.transform.outlier_coefficient, 1.5);
}

#[test]
fn partial_toml_overrides_only_named_fields() {
    let config: TomlConfig = toml::from_str(
        r#"
        [fetch]
        users = 50
        seed = "abc"

        [transform]
        top_countries = 3
        "#,
    )
    .unwrap();

    assert_eq!(config.fetch.users, 50);
    assert_eq!(config.fetch.seed.as_deref(), Some("abc"));
    assert_eq!(config.fetch.page_size, 500);
    assert_eq!(config.transform.top_countries, 3);
    assert_eq!(config.transform.top_email_domains, 5);
}

#[test]
fn from_file_reads_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[logging]\nlevel = \"debug\"").unwrap();

    let config = TomlConfig::from_file(file.path()).unwrap();
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn from_file_rejects_missing_path() {
    let err = TomlConfig::from_file(std::path::Path::new("/nonexistent/demostat.toml"));
    assert!(err.is_err());
}

#[test]
fn resolve_reports_cli_path_as_source() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[fetch]\nusers = 7").unwrap();

    let (config, source) = TomlConfig::resolve(Some(file.path())).unwrap();
    assert_eq!(config.fetch.users, 7);
    assert_eq!(source, ConfigSource::CliArg(file.path().to_path_buf()));
}

#[test]
fn resolve_without_file_reports_defaults() {
    // resolve runs before the tracing subscriber exists, so the caller
    // needs the source value to log the decision afterwards
    std::env::remove_var(CONFIG_ENV_VAR);
    let (config, source) = TomlConfig::resolve(None).unwrap();
    assert_eq!(source, ConfigSource::Defaults);
    assert_eq!(config.fetch.users, 1000);
    assert_eq!(source.to_string(), "compiled defaults");
}

#[test]
fn country_url_includes_fields() {
    let config = TomlConfig::default();
    let url = config.fetch.country_url("France");
    assert_eq!(
        url,
        "https://restcountries.com/v3.1/name/France?fields=name,region,population"
    );
}
