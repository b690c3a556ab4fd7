//! External country enrichment stage
//!
//! Builds a per-run lookup table keyed by country name, issuing one request
//! per distinct non-empty country. Individual lookup failures are logged and
//! the country omitted; records of omitted (or empty) countries get the
//! sentinel defaults when attributes are assigned.

use std::collections::{BTreeSet, HashMap};

use demostat_common::models::{UserRecord, UNKNOWN_REGION};
use tracing::{info, warn};

use crate::fetch::{CountryInfo, CountrySource};

/// Build the country attribute table for a batch
///
/// Countries are deduplicated first so the number of external calls is
/// bounded by the cardinality of distinct countries, not the batch size.
pub async fn build_country_table(
    records: &[UserRecord],
    source: &dyn CountrySource,
) -> HashMap<String, CountryInfo> {
    let countries: BTreeSet<&str> = records
        .iter()
        .filter(|r| !r.country.is_empty())
        .map(|r| r.country.as_str())
        .collect();

    let mut table = HashMap::new();
    for country in &countries {
        match source.lookup(country).await {
            Ok(info) => {
                table.insert((*country).to_string(), info);
            }
            Err(e) => {
                warn!(country, error = %e, "Country lookup failed, records will carry defaults");
            }
        }
    }

    info!(
        distinct = countries.len(),
        resolved = table.len(),
        "Country attribute table built"
    );
    table
}

/// Assign region/population for every record from the lookup table
///
/// Records whose country is absent from the table (failed lookup or empty
/// country) get `"N/A"` / 0.
pub fn assign_attributes(
    records: &[UserRecord],
    table: &HashMap<String, CountryInfo>,
) -> Vec<CountryInfo> {
    records
        .iter()
        .map(|r| {
            table.get(&r.country).cloned().unwrap_or(CountryInfo {
                region: UNKNOWN_REGION.to_string(),
                population: 0,
            })
        })
        .collect()
}
