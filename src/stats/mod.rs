//! Descriptive statistics shared by the plotting and filtering commands.

use std::collections::BTreeMap;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percentile of `values` with linear interpolation between closest ranks
/// (numpy default). `p` is in [0, 100].
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}

#[derive(Debug, Clone, Copy)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

pub fn quartiles(values: &[f64]) -> Quartiles {
    Quartiles {
        q1: percentile(values, 25.0),
        median: percentile(values, 50.0),
        q3: percentile(values, 75.0),
    }
}

/// Tukey whiskers at 1.5 IQR, clipped to the observed data range so a
/// whisker never extends past the most extreme point.
pub fn tukey_whiskers(q: Quartiles, values: &[f64]) -> (f64, f64) {
    let iqr = q.q3 - q.q1;
    let data_min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let data_max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let lower = (q.q1 - 1.5 * iqr).clamp(data_min, q.q1);
    let upper = (q.q3 + 1.5 * iqr).clamp(q.q3, data_max);
    (lower, upper)
}

/// Equal-width histogram over [min, max]. Returns the bin edges (`bins + 1`
/// values) and the count per bin; the maximum lands in the last bin.
pub fn histogram(values: &[f64], bins: usize) -> (Vec<f64>, Vec<u64>) {
    assert!(bins > 0, "histogram needs at least one bin");
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let width = if max > min {
        (max - min) / bins as f64
    } else {
        1.0
    };

    let edges: Vec<f64> = (0..=bins).map(|i| min + i as f64 * width).collect();
    let mut counts = vec![0u64; bins];
    for &v in values {
        let mut idx = ((v - min) / width) as usize;
        if idx >= bins {
            idx = bins - 1;
        }
        counts[idx] += 1;
    }
    (edges, counts)
}

/// Count intervals per fixed-size window along a sequence of length
/// `seq_len`. Every window an interval overlaps is incremented, matching
/// the ideogram density computation.
pub fn window_density(intervals: &[(u64, u64)], seq_len: u64, window_size: u64) -> Vec<u64> {
    assert!(window_size > 0, "window size must be positive");
    let n_windows = (seq_len / window_size + 1) as usize;
    let mut density = vec![0u64; n_windows];
    for &(start, len) in intervals {
        let first = (start / window_size) as usize;
        let last = ((start + len) / window_size) as usize;
        for w in density.iter_mut().take(last + 1).skip(first) {
            *w += 1;
        }
    }
    density
}

/// Occurrence counts per key, descending by count (ties by key).
pub fn value_counts<'a, I: IntoIterator<Item = &'a str>>(items: I) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    let mut out: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_percentile_interpolates() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&v, 0.0), 1.0);
        assert_eq!(percentile(&v, 100.0), 4.0);
        assert_eq!(percentile(&v, 50.0), 2.5);
    }

    #[test]
    fn test_tukey_whiskers_clipped_to_data() {
        let v = [1.0, 2.0, 3.0, 4.0, 100.0];
        let q = quartiles(&v);
        let (lo, hi) = tukey_whiskers(q, &v);
        assert!(lo >= 1.0);
        // upper fence is far below the extreme point
        assert!(hi < 100.0);
        assert!(hi >= q.q3);
    }

    #[test]
    fn test_histogram_counts() {
        let v = [0.0, 0.5, 1.0, 1.5, 2.0];
        let (edges, counts) = histogram(&v, 2);
        assert_eq!(edges.len(), 3);
        assert_eq!(counts.iter().sum::<u64>(), 5);
        // the maximum falls into the last bin
        assert_eq!(counts[1], 3);
    }

    #[test]
    fn test_window_density_overlap() {
        // interval spanning windows 0..=2 with window size 10
        let d = window_density(&[(5, 20)], 40, 10);
        assert_eq!(d, vec![1, 1, 1, 0, 0]);
    }

    #[test]
    fn test_value_counts_descending() {
        let counts = value_counts(["a", "b", "a", "a", "b", "c"]);
        assert_eq!(
            counts,
            vec![
                ("a".to_string(), 3),
                ("b".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }
}
