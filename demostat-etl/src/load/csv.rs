//! CSV loader
//!
//! Writes the flat records to one CSV file with a header row. Fields
//! containing separators, quotes or newlines are quoted RFC-4180 style.

use async_trait::async_trait;
use demostat_common::models::{EnrichedUser, FLAT_KEYS};
use demostat_common::Result;
use std::path::Path;
use tracing::{info, warn};

use crate::load::Loader;

/// Flat-file loader producing `<output_dir>/<filename>`
pub struct CsvLoader {
    filename: String,
}

impl CsvLoader {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

/// Quote a field if it contains a comma, quote or line break
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[async_trait]
impl Loader for CsvLoader {
    async fn load(&self, users: &[EnrichedUser], output_dir: &Path) -> Result<()> {
        if users.is_empty() {
            warn!("No records to export, skipping CSV");
            return Ok(());
        }

        std::fs::create_dir_all(output_dir)?;
        let path = output_dir.join(&self.filename);

        let mut content = String::new();
        content.push_str(&FLAT_KEYS.join(","));
        content.push('\n');
        for user in users {
            let row: Vec<String> = user
                .to_flat()
                .into_iter()
                .map(|(_, value)| escape(&value))
                .collect();
            content.push_str(&row.join(","));
            content.push('\n');
        }

        std::fs::write(&path, content)?;
        info!(path = %path.display(), records = users.len(), "CSV written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_quotes_embedded_separators() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("line\nbreak"), "\"line\nbreak\"");
    }
}
