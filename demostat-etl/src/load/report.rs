//! Statistics report sink
//!
//! Serializes the run's `StatisticsReport` to pretty-printed JSON. Written
//! even for empty batches: an all-zero report is a valid run result.

use demostat_common::Result;
use std::path::Path;
use tracing::info;

use crate::transform::report::StatisticsReport;

/// Write the report to `<output_dir>/<filename>`
pub fn write_report(report: &StatisticsReport, output_dir: &Path, filename: &str) -> Result<()> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(filename);
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json)?;
    info!(path = %path.display(), "Statistics report written");
    Ok(())
}
