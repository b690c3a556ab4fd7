//! Chart rendering
//!
//! Renders the run's descriptive charts with plotters (SVG backend): age
//! histogram, gender distribution, top countries and age-group
//! distribution. An empty batch skips rendering with a warning.

use demostat_common::models::EnrichedUser;
use demostat_common::{Error, Result};
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::transform::stats::{frequency, top_n};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 500;
const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);
const HISTOGRAM_BINS: usize = 15;

/// plotters errors carry the backend error type; flatten them for our Result
fn chart_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Internal(format!("chart rendering failed: {e}"))
}

/// Renders charts into a plots directory
pub struct ChartRenderer {
    plots_dir: PathBuf,
}

impl ChartRenderer {
    pub fn new(plots_dir: impl Into<PathBuf>) -> Self {
        Self {
            plots_dir: plots_dir.into(),
        }
    }

    /// Render every chart; returns the paths written
    pub fn render_all(&self, users: &[EnrichedUser], top_countries: usize) -> Result<Vec<PathBuf>> {
        if users.is_empty() {
            warn!("No records to chart, skipping rendering");
            return Ok(Vec::new());
        }
        std::fs::create_dir_all(&self.plots_dir)?;

        let mut written = Vec::new();
        written.push(self.age_histogram(users)?);
        written.push(self.gender_chart(users)?);
        written.push(self.top_countries_chart(users, top_countries)?);
        written.push(self.age_groups_chart(users)?);

        info!(charts = written.len(), dir = %self.plots_dir.display(), "Charts rendered");
        Ok(written)
    }

    /// Age histogram over a fixed number of equal-width bins
    fn age_histogram(&self, users: &[EnrichedUser]) -> Result<PathBuf> {
        let ages: Vec<u32> = users.iter().map(|u| u.record.age).collect();
        let min = *ages.iter().min().unwrap_or(&0);
        let max = *ages.iter().max().unwrap_or(&0);
        let span = (max.saturating_sub(min) + 1) as f64;
        let bin_width = span / HISTOGRAM_BINS as f64;

        let mut bins = vec![0u64; HISTOGRAM_BINS];
        for &age in &ages {
            let idx = (((age - min) as f64 / bin_width) as usize).min(HISTOGRAM_BINS - 1);
            bins[idx] += 1;
        }

        let data: Vec<(String, u64)> = bins
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let lo = min as f64 + i as f64 * bin_width;
                (format!("{}", lo.round() as u32), count)
            })
            .collect();

        let path = self.plots_dir.join("age_distribution.svg");
        vertical_bar_chart(&path, "Age Distribution", "Age", "Frequency", &data)?;
        Ok(path)
    }

    fn gender_chart(&self, users: &[EnrichedUser]) -> Result<PathBuf> {
        let data = frequency(users.iter().map(|u| u.record.gender.as_str()));
        let path = self.plots_dir.join("gender_distribution.svg");
        vertical_bar_chart(&path, "Gender Distribution", "Gender", "Count", &data)?;
        Ok(path)
    }

    fn top_countries_chart(&self, users: &[EnrichedUser], n: usize) -> Result<PathBuf> {
        let data = top_n(frequency(users.iter().map(|u| u.record.country.as_str())), n);
        let title = format!("Top {} Countries", data.len());
        let path = self.plots_dir.join("top_countries.svg");
        horizontal_bar_chart(&path, &title, "Count", &data)?;
        Ok(path)
    }

    fn age_groups_chart(&self, users: &[EnrichedUser]) -> Result<PathBuf> {
        let mut data = frequency(users.iter().map(|u| u.age_group.label()));
        // Present buckets in their natural order rather than first-seen
        data.sort_by_key(|(label, _)| {
            demostat_common::models::AgeGroup::from_label(label).map(|g| g as u8)
        });
        let path = self.plots_dir.join("age_groups.svg");
        vertical_bar_chart(&path, "Age Group Distribution", "Age group", "Count", &data)?;
        Ok(path)
    }
}

/// Shared vertical bar chart layout
fn vertical_bar_chart(
    path: &Path,
    title: &str,
    x_label: &str,
    y_label: &str,
    data: &[(String, u64)],
) -> Result<()> {
    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let max_count = data.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1);
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..data.len() as i32, 0u64..max_count + max_count / 10 + 1)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .x_labels(data.len())
        .x_label_formatter(&|idx| {
            data.get(*idx as usize)
                .map(|(label, _)| label.clone())
                .unwrap_or_default()
        })
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(data.iter().enumerate().map(|(i, (_, count))| {
            Rectangle::new([(i as i32, 0), (i as i32 + 1, *count)], BAR_COLOR.filled())
        }))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Shared horizontal bar chart layout (category labels on the y axis)
fn horizontal_bar_chart(
    path: &Path,
    title: &str,
    x_label: &str,
    data: &[(String, u64)],
) -> Result<()> {
    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let max_count = data.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1);
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(150)
        .build_cartesian_2d(0u64..max_count + max_count / 10 + 1, 0..data.len() as i32)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_labels(data.len())
        .y_label_formatter(&|idx| {
            data.get(*idx as usize)
                .map(|(label, _)| label.clone())
                .unwrap_or_default()
        })
        .draw()
        .map_err(chart_err)?;

    chart
        .draw_series(data.iter().enumerate().map(|(i, (_, count))| {
            Rectangle::new([(0, i as i32), (*count, i as i32 + 1)], BAR_COLOR.filled())
        }))
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use demostat_common::models::{AgeGroup, EmailPreference, UserRecord};

    fn user(age: u32, gender: &str, country: &str) -> EnrichedUser {
        EnrichedUser {
            record: UserRecord {
                gender: gender.to_string(),
                first_name: "A".to_string(),
                last_name: "B".to_string(),
                country: country.to_string(),
                age,
                email: "a@b.c".to_string(),
            },
            age_group: AgeGroup::from_age(age),
            email_domain: "b.c".to_string(),
            email_preference: EmailPreference::Other,
            is_outlier: false,
            region: "Europe".to_string(),
            population: 1,
        }
    }

    #[test]
    fn renders_all_charts_for_nonempty_batch() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path());
        let users = vec![
            user(20, "female", "France"),
            user(45, "male", "Japan"),
            user(70, "female", "France"),
        ];

        let written = renderer.render_all(&users, 10).unwrap();
        assert_eq!(written.len(), 4);
        for path in written {
            let content = std::fs::read_to_string(&path).unwrap();
            assert!(content.contains("<svg"), "{} is not SVG", path.display());
        }
    }

    #[test]
    fn empty_batch_renders_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path());
        assert!(renderer.render_all(&[], 10).unwrap().is_empty());
    }

    #[test]
    fn bar_chart_handles_single_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("single.svg");
        vertical_bar_chart(&path, "t", "x", "y", &[("only".to_string(), 5)]).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"));
        assert!(content.contains("only"));
    }
}
