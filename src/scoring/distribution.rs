//! Distribution adjustment of historical hit rates
//!
//! Converts a raw line-vs-history hit count into a distribution-blended
//! win probability. When the line sits far from the projection (large
//! |z|), the small-sample frequency is distrusted and blended toward the
//! normal-model probability; the blend weight grows with |z| but
//! saturates below 1 so raw data is never fully discarded.

use tracing::debug;

use crate::config::BlendConfig;
use crate::domain::{CandidateFlag, SampleSeries, Side};

/// Standard normal CDF approximation (Abramowitz-Stegun)
/// Accurate to ~4 decimal places
pub fn normal_cdf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let z = x.abs() / std::f64::consts::SQRT_2;

    let t = 1.0 / (1.0 + p * z);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-z * z).exp();

    0.5 * (1.0 + sign * y)
}

/// Standard normal survival function, P(Z > x)
pub fn normal_sf(x: f64) -> f64 {
    1.0 - normal_cdf(x)
}

/// Blended hit-rate estimate with its inputs, for logging and tests
#[derive(Debug, Clone, PartialEq)]
pub struct HitRateEstimate {
    /// Final win probability for the bet side, [0, 1]
    pub rate: f64,
    /// Raw historical fraction clearing the line
    pub historical: f64,
    /// Normal-model probability at z, when computed
    pub theoretical: Option<f64>,
    /// (line - projection) / std_dev, when defined
    pub z: Option<f64>,
    /// Weight given to the theoretical probability
    pub blend_weight: f64,
    pub flags: Vec<CandidateFlag>,
}

/// Estimate the win probability of a line given history and dispersion
///
/// `projection` is the context-adjusted weighted mean. Fallback ladder:
/// too few samples -> raw rate tagged SmallSample; zero std dev -> raw
/// rate tagged ZeroDispersion; |z| below the trust threshold -> raw rate
/// exactly; otherwise blend toward the normal-model probability.
pub fn adjust_hit_rate(
    series: &SampleSeries,
    line: f64,
    side: Side,
    projection: f64,
    std_dev: f64,
    cfg: &BlendConfig,
) -> HitRateEstimate {
    let historical = series.hit_fraction(line, side);

    if series.len() < cfg.min_blend_samples {
        debug!(
            samples = series.len(),
            min = cfg.min_blend_samples,
            historical,
            "sample too small for distribution blend"
        );
        return HitRateEstimate {
            rate: historical,
            historical,
            theoretical: None,
            z: None,
            blend_weight: 0.0,
            flags: vec![CandidateFlag::SmallSample],
        };
    }

    if std_dev == 0.0 {
        // Division undefined; trust the observed frequency as-is
        return HitRateEstimate {
            rate: historical,
            historical,
            theoretical: None,
            z: None,
            blend_weight: 0.0,
            flags: vec![CandidateFlag::ZeroDispersion],
        };
    }

    let z = (line - projection) / std_dev;

    if z.abs() < cfg.z_trust_threshold {
        // Line close enough to the projection that observed frequency is trusted
        return HitRateEstimate {
            rate: historical,
            historical,
            theoretical: None,
            z: Some(z),
            blend_weight: 0.0,
            flags: Vec::new(),
        };
    }

    let theoretical = match side {
        Side::Over => normal_sf(z),
        Side::Under => normal_cdf(z),
    };

    let weight = (cfg.base_weight + cfg.weight_slope * (z.abs() - cfg.z_trust_threshold))
        .min(cfg.weight_ceiling);
    let rate = (weight * theoretical + (1.0 - weight) * historical).clamp(0.0, 1.0);

    debug!(
        z,
        historical, theoretical, weight, rate, "distribution blend applied"
    );

    HitRateEstimate {
        rate,
        historical,
        theoretical: Some(theoretical),
        z: Some(z),
        blend_weight: weight,
        flags: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> BlendConfig {
        BlendConfig::default()
    }

    fn series(values: &[f64]) -> SampleSeries {
        SampleSeries::new(values.to_vec()).unwrap()
    }

    #[test]
    fn test_normal_cdf_reference_points() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-6);
        assert!((normal_cdf(1.0) - 0.8413).abs() < 1e-3);
        assert!((normal_cdf(-1.0) - 0.1587).abs() < 1e-3);
        assert!((normal_cdf(2.0) - 0.9772).abs() < 1e-3);
        assert!((normal_sf(1.0) - 0.1587).abs() < 1e-3);
    }

    #[test]
    fn test_small_z_returns_raw_rate_exactly() {
        // mean 28, std 2.0; line 27.5 -> |z| = 0.14 < 0.5
        let s = series(&[28.0, 31.0, 25.0, 29.0, 27.0, 30.0, 26.0]);
        let est = adjust_hit_rate(&s, 27.5, Side::Over, 27.786, 2.0, &cfg());
        assert_eq!(est.rate, 4.0 / 7.0);
        assert!(est.flags.is_empty());
        assert_eq!(est.blend_weight, 0.0);
        assert!(est.z.unwrap().abs() < 0.5);
    }

    #[test]
    fn test_large_z_blends_between_historical_and_theoretical() {
        // Line 0.75 sigma above the projection: theoretical over-prob
        // (~0.227) sits below the 2/7 history; result strictly between.
        let s = series(&[28.0, 31.0, 25.0, 29.0, 27.0, 30.0, 26.0]);
        let est = adjust_hit_rate(&s, 29.5, Side::Over, 28.0, 2.0, &cfg());
        let z = est.z.unwrap();
        assert!((z - 0.75).abs() < 1e-9);
        let hist = est.historical;
        let theo = est.theoretical.unwrap();
        assert!((hist - 2.0 / 7.0).abs() < 1e-12);
        assert!(theo < hist);
        assert!(est.rate > theo && est.rate < hist, "rate={}", est.rate);
        // w = 0.25 + 0.20 * 0.25 = 0.30
        assert!((est.blend_weight - 0.30).abs() < 1e-9);
    }

    #[test]
    fn test_weight_monotone_and_saturating() {
        let s = series(&[10.0, 11.0, 9.0, 10.0, 12.0, 8.0, 10.0]);
        let near = adjust_hit_rate(&s, 11.5, Side::Over, 10.0, 2.0, &cfg());
        let far = adjust_hit_rate(&s, 14.0, Side::Over, 10.0, 2.0, &cfg());
        let very_far = adjust_hit_rate(&s, 30.0, Side::Over, 10.0, 2.0, &cfg());
        assert!(near.blend_weight < far.blend_weight);
        // Ceiling reached, never 1.0
        assert_eq!(very_far.blend_weight, cfg().weight_ceiling);
        assert!(very_far.blend_weight < 1.0);
    }

    #[test]
    fn test_under_side_uses_cdf() {
        // Line far above projection: Under is nearly certain
        let s = series(&[10.0, 11.0, 9.0, 10.0, 12.0, 8.0, 10.0]);
        let est = adjust_hit_rate(&s, 16.0, Side::Under, 10.0, 2.0, &cfg());
        assert!(est.theoretical.unwrap() > 0.99);
        assert!(est.rate > est.historical || est.historical == 1.0);
    }

    #[test]
    fn test_small_sample_skips_blend() {
        let s = series(&[30.0, 10.0, 50.0]);
        let est = adjust_hit_rate(&s, 45.0, Side::Over, 30.0, 16.3, &cfg());
        assert_eq!(est.rate, est.historical);
        assert!(est.flags.contains(&CandidateFlag::SmallSample));
        assert!(est.z.is_none());
    }

    #[test]
    fn test_zero_std_dev_falls_back_to_raw_rate() {
        let s = series(&[20.0, 20.0, 20.0, 20.0, 20.0]);
        let est = adjust_hit_rate(&s, 18.5, Side::Over, 20.0, 0.0, &cfg());
        assert_eq!(est.rate, 1.0);
        assert!(est.flags.contains(&CandidateFlag::ZeroDispersion));
    }
}
