//! Pipeline orchestration
//!
//! Runs the full ETL: fetch → clean → transform → persist → charts. The
//! record and country sources come in through trait objects so the whole
//! pipeline can run against stubs in tests.

use demostat_common::config::TomlConfig;
use demostat_common::Result;
use tracing::info;

use crate::fetch::{clean, CountrySource, RecordSource};
use crate::load::{write_report, CsvLoader, Loader, SqliteLoader};
use crate::transform;
use crate::transform::report::{compute_statistics, StatisticsReport};
use crate::viz::ChartRenderer;

/// One ETL run over a single bounded batch
pub struct Pipeline {
    config: TomlConfig,
    render_charts: bool,
}

impl Pipeline {
    pub fn new(config: TomlConfig) -> Self {
        Self {
            config,
            render_charts: true,
        }
    }

    /// Disable chart rendering for this run
    pub fn without_charts(mut self) -> Self {
        self.render_charts = false;
        self
    }

    /// Execute the full pipeline and return the compiled statistics
    pub async fn run(
        &self,
        record_source: &dyn RecordSource,
        country_source: &dyn CountrySource,
    ) -> Result<StatisticsReport> {
        info!("=== Starting ETL run ===");

        let raw = record_source.fetch(self.config.fetch.users).await;
        let users = clean(raw);

        let enriched =
            transform::enrich_batch(users, &self.config.transform, country_source).await;
        let report = compute_statistics(&enriched, &self.config.transform);

        let data_dir = &self.config.output.data_dir;
        CsvLoader::new(self.config.output.csv_filename.clone())
            .load(&enriched, data_dir)
            .await?;
        SqliteLoader::new(self.config.output.sqlite_filename.clone())
            .load(&enriched, data_dir)
            .await?;
        write_report(&report, data_dir, &self.config.output.stats_filename)?;

        if self.render_charts {
            ChartRenderer::new(&self.config.output.plots_dir)
                .render_all(&enriched, self.config.transform.top_countries)?;
        }

        info!(
            total_users = report.total_users,
            outliers = report.outliers,
            "=== ETL run complete ==="
        );
        Ok(report)
    }
}
