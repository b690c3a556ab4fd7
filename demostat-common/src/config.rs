//! Configuration loading for the demostat pipeline
//!
//! All tunables live in a TOML file with compiled defaults for every field,
//! so an empty (or absent) file yields a fully working configuration.
//!
//! Resolution priority for the config file path:
//! 1. Command-line argument (highest priority)
//! 2. `DEMOSTAT_CONFIG` environment variable
//! 3. `./demostat.toml` if present
//! 4. Compiled defaults (no file read at all)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an alternative config file
pub const CONFIG_ENV_VAR: &str = "DEMOSTAT_CONFIG";

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "demostat.toml";

/// Top-level TOML configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Record source and country lookup settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Enrichment and statistics settings
    #[serde(default)]
    pub transform: TransformConfig,

    /// Output directories and file names
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Record source (RandomUser) and country lookup (RestCountries) settings
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// RandomUser API endpoint
    #[serde(default = "default_randomuser_url")]
    pub randomuser_url: String,

    /// RestCountries API endpoint (country name is appended as a path segment)
    #[serde(default = "default_restcountries_url")]
    pub restcountries_url: String,

    /// Number of users to fetch per run
    #[serde(default = "default_users")]
    pub users: usize,

    /// Users requested per API page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Hard cap the RandomUser API enforces on a single request
    #[serde(default = "default_max_per_request")]
    pub max_per_request: usize,

    /// Optional seed for reproducible RandomUser batches
    #[serde(default)]
    pub seed: Option<String>,

    /// Timeout for record source requests, in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Timeout for each country lookup request, in seconds
    #[serde(default = "default_lookup_timeout_secs")]
    pub lookup_timeout_secs: u64,
}

/// Enrichment and statistics settings
#[derive(Debug, Clone, Deserialize)]
pub struct TransformConfig {
    /// Tukey fence coefficient for IQR outlier detection
    #[serde(default = "default_outlier_coefficient")]
    pub outlier_coefficient: f64,

    /// Email domains classified as "Popular" (case-sensitive exact match)
    #[serde(default = "default_popular_email_domains")]
    pub popular_email_domains: Vec<String>,

    /// Cutoff for country / region / age-group frequency tables
    #[serde(default = "default_top_countries")]
    pub top_countries: usize,

    /// Cutoff for the email-domain frequency table
    #[serde(default = "default_top_email_domains")]
    pub top_email_domains: usize,
}

/// Output directories and file names
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving CSV, SQLite and JSON outputs
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory receiving rendered charts
    #[serde(default = "default_plots_dir")]
    pub plots_dir: PathBuf,

    #[serde(default = "default_csv_filename")]
    pub csv_filename: String,

    #[serde(default = "default_sqlite_filename")]
    pub sqlite_filename: String,

    #[serde(default = "default_stats_filename")]
    pub stats_filename: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_randomuser_url() -> String {
    "https://randomuser.me/api/".to_string()
}

fn default_restcountries_url() -> String {
    "https://restcountries.com/v3.1/name".to_string()
}

fn default_users() -> usize {
    1000
}

fn default_page_size() -> usize {
    500
}

fn default_max_per_request() -> usize {
    5000
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_lookup_timeout_secs() -> u64 {
    30
}

fn default_outlier_coefficient() -> f64 {
    1.5
}

fn default_popular_email_domains() -> Vec<String> {
    ["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_top_countries() -> usize {
    10
}

fn default_top_email_domains() -> usize {
    5
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_plots_dir() -> PathBuf {
    PathBuf::from("plots")
}

fn default_csv_filename() -> String {
    "users.csv".to_string()
}

fn default_sqlite_filename() -> String {
    "users.db".to_string()
}

fn default_stats_filename() -> String {
    "stats.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            randomuser_url: default_randomuser_url(),
            restcountries_url: default_restcountries_url(),
            users: default_users(),
            page_size: default_page_size(),
            max_per_request: default_max_per_request(),
            seed: None,
            fetch_timeout_secs: default_fetch_timeout_secs(),
            lookup_timeout_secs: default_lookup_timeout_secs(),
        }
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            outlier_coefficient: default_outlier_coefficient(),
            popular_email_domains: default_popular_email_domains(),
            top_countries: default_top_countries(),
            top_email_domains: default_top_email_domains(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            plots_dir: default_plots_dir(),
            csv_filename: default_csv_filename(),
            sqlite_filename: default_sqlite_filename(),
            stats_filename: default_stats_filename(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Where the active configuration came from
///
/// Returned by [`TomlConfig::resolve`] so the caller can log the choice
/// once a tracing subscriber is installed. `resolve` itself runs before
/// logging is set up and must not emit events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path given on the command line
    CliArg(PathBuf),
    /// Path taken from the `DEMOSTAT_CONFIG` environment variable
    EnvVar(PathBuf),
    /// `./demostat.toml` found in the working directory
    LocalFile(PathBuf),
    /// No file found, compiled defaults in effect
    Defaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArg(path) => write!(f, "{} (--config)", path.display()),
            ConfigSource::EnvVar(path) => write!(f, "{} ({CONFIG_ENV_VAR})", path.display()),
            ConfigSource::LocalFile(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => write!(f, "compiled defaults"),
        }
    }
}

impl TomlConfig {
    /// Parse configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Cannot parse {}: {}", path.display(), e)))
    }

    /// Resolve and load configuration following the priority order
    /// described in the module docs, reporting which source won
    pub fn resolve(cli_path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = cli_path {
            let config = Self::from_file(path)?;
            return Ok((config, ConfigSource::CliArg(path.to_path_buf())));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            let config = Self::from_file(&path)?;
            return Ok((config, ConfigSource::EnvVar(path)));
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            let config = Self::from_file(default_path)?;
            return Ok((config, ConfigSource::LocalFile(default_path.to_path_buf())));
        }

        Ok((Self::default(), ConfigSource::Defaults))
    }
}

impl FetchConfig {
    /// Full RestCountries lookup URL for one country, restricted to the
    /// fields the enrichment stage consumes
    pub fn country_url(&self, country: &str) -> String {
        format!(
            "{}/{}?fields=name,region,population",
            self.restcountries_url.trim_end_matches('/'),
            country
        )
    }
}
