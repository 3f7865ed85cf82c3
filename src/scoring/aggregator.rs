//! Stat aggregation: sample series -> projection
//!
//! Recency-weighted mean (weights 1..=n over chronological samples),
//! simple mean, population standard deviation, and coefficient of
//! variation.

use crate::domain::{Projection, SampleSeries};

/// Compute the projection for a sample series
///
/// The series is chronological, so the last sample carries weight n and
/// the first carries weight 1; weights are normalized to sum 1.
pub fn project(series: &SampleSeries) -> Projection {
    let values = series.values();
    let n = values.len();

    let weight_sum = (n * (n + 1)) as f64 / 2.0;
    let weighted_mean = values
        .iter()
        .enumerate()
        .map(|(i, v)| v * (i + 1) as f64)
        .sum::<f64>()
        / weight_sum;

    let simple_mean = values.iter().sum::<f64>() / n as f64;

    let variance = values
        .iter()
        .map(|v| {
            let d = v - simple_mean;
            d * d
        })
        .sum::<f64>()
        / n as f64;
    let std_dev = variance.sqrt();

    let cv = if simple_mean == 0.0 {
        None
    } else {
        Some(std_dev / simple_mean * 100.0)
    };

    Projection {
        weighted_mean,
        simple_mean,
        std_dev,
        cv,
        sample_size: n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> SampleSeries {
        SampleSeries::new(values.to_vec()).unwrap()
    }

    #[test]
    fn test_consistent_rusher() {
        // Tight sample: mean 28, population std 2.0, CV ~7.1%
        let p = project(&series(&[28.0, 31.0, 25.0, 29.0, 27.0, 30.0, 26.0]));
        assert!((p.simple_mean - 28.0).abs() < 1e-9);
        assert!((p.std_dev - 2.0).abs() < 1e-9);
        let cv = p.cv.unwrap();
        assert!((cv - 7.142857).abs() < 1e-3, "cv={}", cv);
        assert_eq!(p.sample_size, 7);
    }

    #[test]
    fn test_volatile_sample() {
        // Wild sample: mean 45, CV well above the volatility ceiling
        let p = project(&series(&[67.0, 12.0, 89.0, 23.0, 45.0, 8.0, 71.0]));
        assert!((p.simple_mean - 45.0).abs() < 1e-9);
        assert!(p.cv.unwrap() > 60.0, "cv={:?}", p.cv);
    }

    #[test]
    fn test_weighted_mean_favors_recent() {
        // Trending up: weighted mean above simple mean
        let p = project(&series(&[10.0, 20.0, 30.0]));
        assert!((p.simple_mean - 20.0).abs() < 1e-9);
        // weights 1,2,3 -> (10 + 40 + 90) / 6 = 23.33
        assert!((p.weighted_mean - 140.0 / 6.0).abs() < 1e-9);
        assert!(p.weighted_mean > p.simple_mean);
    }

    #[test]
    fn test_single_sample() {
        let p = project(&series(&[42.0]));
        assert_eq!(p.weighted_mean, 42.0);
        assert_eq!(p.simple_mean, 42.0);
        assert_eq!(p.std_dev, 0.0);
        assert!((p.cv.unwrap() - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_cv_undefined_at_zero_mean() {
        let p = project(&series(&[1.0, -1.0]));
        assert_eq!(p.simple_mean, 0.0);
        assert!(p.cv.is_none());
    }

    #[test]
    fn test_monotonicity_in_one_sample() {
        // Raising one sample, others fixed, never decreases the weighted mean
        let base = project(&series(&[12.0, 15.0, 9.0, 14.0]));
        let bumped = project(&series(&[12.0, 18.0, 9.0, 14.0]));
        assert!(bumped.weighted_mean > base.weighted_mean);
    }
}
