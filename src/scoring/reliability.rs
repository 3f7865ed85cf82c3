//! Reliability scoring and bet recommendation
//!
//! Composes consistency (from CV), role, edge quality, and sample size
//! into one bounded 0-100 score with a tier, and decides whether the
//! candidate is playable. The projection-side precedence rule lives here:
//! when the projection clears the line by a decisive margin its side wins
//! outright, and historical frequency cannot override it.

use tracing::debug;

use crate::config::ReliabilityConfig;
use crate::domain::{Confidence, Recommendation, ReliabilityScore, ReliabilityTier, Side};
use crate::scoring::role::RoleCall;

/// Consistency sub-score from the coefficient of variation, 0-100
///
/// Piecewise-linear over the CV bands: 100 at CV 0, 95 at 15, 75 at 25,
/// 60 at 40, 40 at 60, declining to 0 beyond. Undefined CV scores 0.
pub fn consistency_score(cv: Option<f64>) -> f64 {
    let cv = match cv {
        Some(v) if v >= 0.0 => v,
        _ => return 0.0,
    };

    if cv <= 15.0 {
        100.0 - cv / 3.0
    } else if cv <= 25.0 {
        95.0 - 2.0 * (cv - 15.0)
    } else if cv <= 40.0 {
        75.0 - (cv - 25.0)
    } else if cv <= 60.0 {
        60.0 - (cv - 40.0)
    } else {
        (40.0 - 0.5 * (cv - 60.0)).max(0.0)
    }
}

/// Edge-quality sub-score from true edge in percentage points, 0-100
pub fn edge_quality_score(true_edge_pct: f64) -> f64 {
    if true_edge_pct >= 12.0 {
        100.0
    } else if true_edge_pct >= 8.0 {
        85.0
    } else if true_edge_pct >= 5.0 {
        65.0
    } else if true_edge_pct >= 3.0 {
        45.0
    } else if true_edge_pct >= 1.0 {
        25.0
    } else {
        10.0
    }
}

/// Sample-size sub-score, 0-100; below five games it shrinks proportionally
pub fn sample_size_score(sample_size: usize) -> f64 {
    if sample_size >= 7 {
        100.0
    } else if sample_size >= 5 {
        80.0
    } else {
        sample_size as f64 / 5.0 * 80.0
    }
}

/// Compose the weighted reliability score for one candidate
pub fn score(
    cv: Option<f64>,
    role: &RoleCall,
    true_edge_pct: f64,
    sample_size: usize,
    cfg: &ReliabilityConfig,
) -> ReliabilityScore {
    let consistency = consistency_score(cv);
    let role_scaled = role.points / 25.0 * 100.0;
    let edge_quality = edge_quality_score(true_edge_pct);
    let sample_score = sample_size_score(sample_size);

    let composite = (cfg.consistency_weight * consistency
        + cfg.role_weight * role_scaled
        + cfg.edge_weight * edge_quality
        + cfg.sample_weight * sample_score)
        .clamp(0.0, 100.0);

    let factors = vec![
        format!(
            "Consistency: {:.1}/{:.0}",
            cfg.consistency_weight * consistency,
            cfg.consistency_weight * 100.0
        ),
        format!(
            "Role: {:.1}/{:.0} ({})",
            cfg.role_weight * role_scaled,
            cfg.role_weight * 100.0,
            role.detail
        ),
        format!(
            "Edge: {:.1}/{:.0}",
            cfg.edge_weight * edge_quality,
            cfg.edge_weight * 100.0
        ),
        format!(
            "Sample: {:.1}/{:.0}",
            cfg.sample_weight * sample_score,
            cfg.sample_weight * 100.0
        ),
    ];

    let tier = ReliabilityTier::from_score(composite);
    debug!(composite, ?tier, ?factors, "reliability scored");

    ReliabilityScore {
        score: composite,
        tier,
        consistency,
        role_points: role.points,
        edge_quality,
        sample_score,
        factors,
    }
}

/// Decide whether a scored candidate is playable
///
/// Precedence: if the adjusted projection clears the line by at least the
/// decisive margin, the projection's side wins outright — Play when it
/// matches the bet side, Skip when it contradicts it, regardless of the
/// historical frequency. Inside the margin, true edge is the tiebreaker.
pub fn recommend(
    adjusted_projection: f64,
    line_value: f64,
    bet_side: Side,
    true_edge: f64,
    cfg: &ReliabilityConfig,
) -> (Recommendation, Confidence) {
    let margin = adjusted_projection - line_value;
    let true_edge_pct = true_edge * 100.0;

    let confidence = if true_edge_pct >= cfg.high_confidence_edge_pct {
        Confidence::High
    } else if true_edge_pct >= cfg.medium_confidence_edge_pct {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    if margin.abs() >= cfg.decisive_margin {
        let projected_side = if margin > 0.0 { Side::Over } else { Side::Under };
        let rec = if projected_side == bet_side {
            Recommendation::Play
        } else {
            Recommendation::Skip
        };
        return (rec, confidence);
    }

    if true_edge > 0.0 {
        (Recommendation::Play, confidence)
    } else {
        (Recommendation::Skip, Confidence::Low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn cfg() -> ReliabilityConfig {
        ReliabilityConfig::default()
    }

    fn starter() -> RoleCall {
        RoleCall {
            role: Role::Starter,
            points: 25.0,
            detail: "Starter".to_string(),
        }
    }

    #[test]
    fn test_low_cv_high_consistency() {
        assert!(consistency_score(Some(7.1)) >= 95.0);
        assert!(consistency_score(Some(14.9)) >= 95.0);
    }

    #[test]
    fn test_high_cv_low_consistency() {
        assert!(consistency_score(Some(60.1)) < 40.0);
        assert!(consistency_score(Some(69.3)) < 40.0);
        assert_eq!(consistency_score(Some(200.0)), 0.0);
    }

    #[test]
    fn test_consistency_band_endpoints() {
        assert!((consistency_score(Some(0.0)) - 100.0).abs() < 1e-9);
        assert!((consistency_score(Some(15.0)) - 95.0).abs() < 1e-9);
        assert!((consistency_score(Some(25.0)) - 75.0).abs() < 1e-9);
        assert!((consistency_score(Some(40.0)) - 60.0).abs() < 1e-9);
        assert!((consistency_score(Some(60.0)) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_consistency_monotone_in_cv() {
        let mut last = f64::INFINITY;
        for cv in [0.0, 5.0, 15.0, 20.0, 25.0, 39.0, 55.0, 70.0, 150.0] {
            let s = consistency_score(Some(cv));
            assert!(s <= last, "cv={cv} score={s} last={last}");
            last = s;
        }
    }

    #[test]
    fn test_undefined_cv_scores_zero() {
        assert_eq!(consistency_score(None), 0.0);
    }

    #[test]
    fn test_composite_elite_candidate() {
        // Tight starter with strong edge and a full sample
        let s = score(Some(7.1), &starter(), 9.0, 7, &cfg());
        // 0.4*97.6 + 0.25*100 + 0.2*85 + 0.15*100 = 96.1
        assert!(s.score >= 85.0, "score={}", s.score);
        assert_eq!(s.tier, ReliabilityTier::Elite);
        assert_eq!(s.factors.len(), 4);
    }

    #[test]
    fn test_composite_backup_penalty() {
        let backup = RoleCall {
            role: Role::Backup,
            points: 5.0,
            detail: "Backup RB".to_string(),
        };
        let s_backup = score(Some(7.1), &backup, 9.0, 7, &cfg());
        let s_starter = score(Some(7.1), &starter(), 9.0, 7, &cfg());
        // Backup loses 20 role points -> 20 * 0.25 * 4 = 20 composite points
        assert!((s_starter.score - s_backup.score - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_composite_clamped() {
        let s = score(Some(500.0), &starter(), -10.0, 1, &cfg());
        assert!(s.score >= 0.0 && s.score <= 100.0);
    }

    #[test]
    fn test_decisive_projection_overrides_history() {
        // Projection 2.4 over the line: Over wins outright even with a
        // negative true edge (the historical-frequency override defect).
        let (rec, _) = recommend(29.9, 27.5, Side::Over, -0.02, &cfg());
        assert_eq!(rec, Recommendation::Play);
        // Same margin, betting Under contradicts the projection: Skip
        // even though the caller's true edge looks positive.
        let (rec, _) = recommend(29.9, 27.5, Side::Under, 0.04, &cfg());
        assert_eq!(rec, Recommendation::Skip);
    }

    #[test]
    fn test_thin_margin_uses_true_edge() {
        let (rec, conf) = recommend(27.8, 27.5, Side::Over, 0.055, &cfg());
        assert_eq!(rec, Recommendation::Play);
        assert_eq!(conf, Confidence::Medium);

        let (rec, conf) = recommend(27.8, 27.5, Side::Over, -0.004, &cfg());
        assert_eq!(rec, Recommendation::Skip);
        assert_eq!(conf, Confidence::Low);
    }

    #[test]
    fn test_confidence_bands() {
        let (_, high) = recommend(30.0, 27.5, Side::Over, 0.09, &cfg());
        assert_eq!(high, Confidence::High);
        let (_, medium) = recommend(30.0, 27.5, Side::Over, 0.04, &cfg());
        assert_eq!(medium, Confidence::Medium);
        let (_, low) = recommend(30.0, 27.5, Side::Over, 0.005, &cfg());
        assert_eq!(low, Confidence::Low);
    }
}
