//! demostat - demographic record ETL
//!
//! Fetches randomly generated user records, enriches them with derived and
//! external attributes, compiles descriptive statistics, and persists the
//! results to CSV, SQLite, JSON and SVG charts.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use demostat_common::config::TomlConfig;
use demostat_etl::fetch::{RandomUserClient, RestCountriesClient};
use demostat_etl::pipeline::Pipeline;

#[derive(Debug, Parser)]
#[command(name = "demostat", about = "Demographic record ETL pipeline")]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, env = "DEMOSTAT_CONFIG")]
    config: Option<PathBuf>,

    /// Number of users to fetch (overrides config)
    #[arg(long)]
    users: Option<usize>,

    /// RandomUser seed for reproducible batches (overrides config)
    #[arg(long)]
    seed: Option<String>,

    /// Directory for CSV/SQLite/JSON outputs (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory for rendered charts (overrides config)
    #[arg(long)]
    plots_dir: Option<PathBuf>,

    /// Skip chart rendering
    #[arg(long)]
    skip_charts: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_source) = TomlConfig::resolve(cli.config.as_deref())?;
    if let Some(users) = cli.users {
        config.fetch.users = users;
    }
    if let Some(seed) = cli.seed {
        config.fetch.seed = Some(seed);
    }
    if let Some(data_dir) = cli.data_dir {
        config.output.data_dir = data_dir;
    }
    if let Some(plots_dir) = cli.plots_dir {
        config.output.plots_dir = plots_dir;
    }

    // RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting demostat v{}", env!("CARGO_PKG_VERSION"));
    info!(source = %config_source, "Configuration loaded");
    info!(
        users = config.fetch.users,
        data_dir = %config.output.data_dir.display(),
        "Run parameters"
    );

    let record_source = RandomUserClient::new(&config.fetch)?;
    let country_source = RestCountriesClient::new(&config.fetch)?;

    let mut pipeline = Pipeline::new(config);
    if cli.skip_charts {
        pipeline = pipeline.without_charts();
    }

    let report = pipeline.run(&record_source, &country_source).await?;
    info!(
        total_users = report.total_users,
        avg_age = report.avg_age,
        outliers = report.outliers,
        "Done"
    );

    Ok(())
}
