//! Persistence sinks
//!
//! Loaders accept the enriched batch in flat key-value form plus a
//! destination directory. All sinks are best-effort about empty batches:
//! they warn and write nothing rather than producing empty artifacts.

pub mod csv;
pub mod report;
pub mod sqlite;

use async_trait::async_trait;
use demostat_common::models::EnrichedUser;
use demostat_common::Result;
use std::path::Path;

pub use csv::CsvLoader;
pub use report::write_report;
pub use sqlite::SqliteLoader;

/// Destination for the post-enrichment record set
#[async_trait]
pub trait Loader {
    async fn load(&self, users: &[EnrichedUser], output_dir: &Path) -> Result<()>;
}
