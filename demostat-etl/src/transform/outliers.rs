//! IQR-based outlier detection
//!
//! Flags ages falling outside the Tukey fences `[Q1 - k*IQR, Q3 + k*IQR]`,
//! with quartiles computed by the linear-interpolation percentile primitive.

use crate::transform::stats::percentile;
use tracing::{debug, info};

/// Flag every age strictly outside the Tukey fences
///
/// Returns one flag per input element, in order. An empty series produces an
/// empty flag table (the stage is a no-op, not a failure).
pub fn flag_outliers(ages: &[f64], coefficient: f64) -> Vec<bool> {
    if ages.is_empty() {
        debug!("Empty age series, skipping outlier detection");
        return Vec::new();
    }

    let q1 = percentile(ages, 25.0);
    let q3 = percentile(ages, 75.0);
    let iqr = q3 - q1;
    let lower = q1 - coefficient * iqr;
    let upper = q3 + coefficient * iqr;

    let flags: Vec<bool> = ages.iter().map(|&a| a < lower || a > upper).collect();

    let count = flags.iter().filter(|&&f| f).count();
    info!(
        q1,
        q3,
        lower_fence = lower,
        upper_fence = upper,
        outliers = count,
        "Outlier detection complete"
    );
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tukey_fences_flag_only_extreme_value() {
        let ages = [10.0, 12.0, 12.0, 13.0, 14.0, 14.0, 15.0, 100.0];
        let flags = flag_outliers(&ages, 1.5);
        assert_eq!(flags.len(), ages.len());
        let flagged: Vec<f64> = ages
            .iter()
            .zip(&flags)
            .filter(|(_, &f)| f)
            .map(|(&a, _)| a)
            .collect();
        assert_eq!(flagged, vec![100.0]);
    }

    #[test]
    fn empty_series_is_a_noop() {
        assert!(flag_outliers(&[], 1.5).is_empty());
    }

    #[test]
    fn uniform_series_has_no_outliers() {
        let ages = [30.0; 10];
        assert!(flag_outliers(&ages, 1.5).iter().all(|&f| !f));
    }

    #[test]
    fn coefficient_widens_the_fences() {
        let ages = [1.0, 2.0, 3.0, 4.0, 20.0];
        let strict = flag_outliers(&ages, 1.5);
        let loose = flag_outliers(&ages, 10.0);
        assert!(strict.iter().any(|&f| f));
        assert!(loose.iter().all(|&f| !f));
    }
}
