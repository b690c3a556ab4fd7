//! Numeric summary primitives
//!
//! Pure total functions over finite `f64` slices. Every function returns
//! `0.0` for empty (or otherwise degenerate) input instead of failing, so
//! the statistics compiler never has to guard calls individually.

use std::collections::HashMap;

/// Arithmetic mean, `0.0` on empty input
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Median, `0.0` on empty input
///
/// Even-length input averages the two central elements.
pub fn median(xs: &[f64]) -> f64 {
    let n = xs.len();
    if n == 0 {
        return 0.0;
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = n / 2;
    if n % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Population standard deviation (divisor = n, not n-1), `0.0` on empty input
pub fn population_stdev(xs: &[f64]) -> f64 {
    let n = xs.len();
    if n == 0 {
        return 0.0;
    }
    let mu = mean(xs);
    (xs.iter().map(|x| (x - mu).powi(2)).sum::<f64>() / n as f64).sqrt()
}

/// Linear-interpolation percentile (the R-7 method), `0.0` on empty input
///
/// Sorts ascending, computes the fractional rank `k = (n-1) * p/100` and
/// interpolates between the two surrounding elements. `percentile(xs, 0)`
/// is the minimum and `percentile(xs, 100)` the maximum.
pub fn percentile(xs: &[f64], p: f64) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let k = (sorted.len() - 1) as f64 * (p / 100.0);
    let f = k.floor() as usize;
    let c = (f + 1).min(sorted.len() - 1);
    if f == c {
        sorted[f]
    } else {
        sorted[f] + (sorted[c] - sorted[f]) * (k - f as f64)
    }
}

/// Pearson product-moment correlation
///
/// Returns `0.0` when either series is empty, lengths differ, or either
/// series has zero variance (rather than producing NaN).
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.is_empty() || xs.len() != ys.len() {
        return 0.0;
    }
    let mx = mean(xs);
    let my = mean(ys);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = var_x.sqrt() * var_y.sqrt();
    if denom == 0.0 {
        return 0.0;
    }
    cov / denom
}

/// Frequency counts in first-seen order
///
/// The returned pairs are ordered by first encounter in the input, which is
/// the tie-break order the top-N tables rely on.
pub fn frequency<I, S>(values: I) -> Vec<(String, u64)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for value in values {
        let key = value.as_ref();
        match counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                counts.insert(key.to_string(), 1);
                order.push(key.to_string());
            }
        }
    }
    order
        .into_iter()
        .map(|key| {
            let count = counts[&key];
            (key, count)
        })
        .collect()
}

/// Restrict a frequency table to its `n` most frequent keys
///
/// The sort is stable, so ties keep the first-seen order produced by
/// [`frequency`].
pub fn top_n(mut freq: Vec<(String, u64)>, n: usize) -> Vec<(String, u64)> {
    freq.sort_by(|a, b| b.1.cmp(&a.1));
    freq.truncate(n);
    freq
}

/// Round to 2 decimal places for report values
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
