//! Parlay assembly: filter, select, combine, relabel
//!
//! Pipeline: receive request -> filter pool by tier eligibility ->
//! deterministic leg selection -> combined odds/probability -> actual
//! tier relabel -> verdict. Filters never relax automatically, and the
//! actual tier is computed only from the realized combined probability —
//! never echoed from the request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ParlayConfig, RoleConfig, TierRules, TiersConfig};
use crate::domain::{
    american_odds, implied_probability, BetCandidate, CandidateFlag, RiskTier, Role,
};
use crate::error::{EngineError, Result};
use crate::parlay::correlation::{self, CorrelationWarning};

/// Request to assemble one parlay from a scored candidate pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParlayRequest {
    pub pool: Vec<BetCandidate>,
    pub num_legs: usize,
    pub risk_tier: RiskTier,
}

/// Overall verdict for an assembled parlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParlayVerdict {
    StrongPlay,
    GoodValue,
    Fair,
    Pass,
    Avoid,
}

impl ParlayVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParlayVerdict::StrongPlay => "STRONG PLAY",
            ParlayVerdict::GoodValue => "GOOD VALUE",
            ParlayVerdict::Fair => "FAIR",
            ParlayVerdict::Pass => "PASS",
            ParlayVerdict::Avoid => "AVOID",
        }
    }
}

impl std::fmt::Display for ParlayVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Assembled parlay with honest risk labeling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParlayResult {
    pub legs: Vec<BetCandidate>,
    /// Product of per-leg decimal odds
    pub combined_decimal: f64,
    /// Combined odds converted back to American
    pub combined_odds: i32,
    /// Product of per-leg adjusted hit rates, [0, 1]
    pub combined_probability: f64,
    /// Average per-leg true edge, percentage points
    pub avg_true_edge_pct: f64,
    /// Combined probability minus the combined implied probability, pct points
    pub parlay_true_edge_pct: f64,
    /// Average per-leg adjusted hit rate, [0, 1]
    pub avg_hit_rate: f64,
    pub stake: Decimal,
    /// Total return on the stake if every leg hits
    pub total_payout: Decimal,
    /// Profit over the stake if every leg hits
    pub profit: Decimal,
    pub requested_tier: RiskTier,
    /// Derived solely from combined_probability; may differ from the request
    pub actual_tier: RiskTier,
    pub correlations: Vec<CorrelationWarning>,
    /// Per-leg cautions (backups, volatile or thin samples)
    pub leg_warnings: Vec<String>,
    pub verdict: ParlayVerdict,
    pub verdict_reason: String,
}

/// Assemble a parlay from a scored pool
///
/// Fails with `InsufficientPool` when fewer tier-eligible legs exist
/// than requested; never silently downgrades the tier or returns a
/// partial parlay.
pub fn assemble(
    request: &ParlayRequest,
    tiers: &TiersConfig,
    cfg: &ParlayConfig,
    roles: &RoleConfig,
) -> Result<ParlayResult> {
    if request.num_legs == 0 {
        return Err(EngineError::InvalidInput(
            "parlay must request at least one leg".to_string(),
        ));
    }

    let rules = tiers.rules(request.risk_tier);
    let eligible = filter_pool(&request.pool, rules, roles);
    debug!(
        tier = %request.risk_tier,
        pool = request.pool.len(),
        eligible = eligible.len(),
        "pool filtered"
    );

    let selected = select_legs(&request.pool, &eligible, request.num_legs, rules);
    if selected.len() < request.num_legs {
        let suggestion = match request.risk_tier.looser() {
            Some(looser) => format!("Try the {looser} risk tier."),
            None => "Add more scored candidates to the pool.".to_string(),
        };
        return Err(EngineError::InsufficientPool {
            tier: request.risk_tier.to_string(),
            found: selected.len(),
            needed: request.num_legs,
            suggestion,
        });
    }

    let legs: Vec<BetCandidate> = selected
        .iter()
        .map(|&i| request.pool[i].clone())
        .collect();

    // Combined odds and probability; per-leg independence is an explicit
    // simplification, compensated qualitatively by correlation warnings.
    let combined_decimal: f64 = legs.iter().map(|l| l.line.decimal_odds()).product();
    let combined_probability: f64 = legs.iter().map(|l| l.adjusted_hit_rate).product();
    let combined_odds = american_odds(combined_decimal);

    let avg_true_edge_pct =
        legs.iter().map(BetCandidate::true_edge_pct).sum::<f64>() / legs.len() as f64;
    let avg_hit_rate = legs.iter().map(|l| l.adjusted_hit_rate).sum::<f64>() / legs.len() as f64;
    let parlay_true_edge_pct =
        (combined_probability - implied_probability(combined_odds)) * 100.0;

    let stake = Decimal::try_from(cfg.stake_usd).unwrap_or(Decimal::ONE_HUNDRED);
    let total_payout = stake * Decimal::try_from(combined_decimal).unwrap_or(Decimal::ONE);
    let profit = total_payout - stake;

    let actual_tier = label_actual_tier(combined_probability, cfg);
    let correlations = correlation::analyze(&legs);
    let leg_warnings = collect_leg_warnings(&legs);
    let (verdict, verdict_reason) = verdict(parlay_true_edge_pct, avg_true_edge_pct);

    info!(
        legs = legs.len(),
        combined_odds,
        combined_probability,
        requested = %request.risk_tier,
        actual = %actual_tier,
        %verdict,
        "parlay assembled"
    );

    Ok(ParlayResult {
        legs,
        combined_decimal,
        combined_odds,
        combined_probability,
        avg_true_edge_pct,
        parlay_true_edge_pct,
        avg_hit_rate,
        stake,
        total_payout,
        profit,
        requested_tier: request.risk_tier,
        actual_tier,
        correlations,
        leg_warnings,
        verdict,
        verdict_reason,
    })
}

/// Indexes of pool candidates passing every tier rule, in pool order
fn filter_pool(pool: &[BetCandidate], rules: &TierRules, roles: &RoleConfig) -> Vec<usize> {
    pool.iter()
        .enumerate()
        .filter(|(i, c)| {
            if let Some(min) = rules.min_reliability {
                if c.reliability.score < min {
                    debug!(
                        leg = i,
                        player = %c.player,
                        rule = "min_reliability",
                        threshold = min,
                        actual = c.reliability.score,
                        "candidate rejected"
                    );
                    return false;
                }
            }
            if rules.starters_only && c.role != Role::Starter {
                debug!(leg = i, player = %c.player, rule = "starters_only", role = %c.role, "candidate rejected");
                return false;
            }
            if rules.exclude_backup_tes && c.role == Role::Backup && roles.is_backup_te(&c.player) {
                debug!(leg = i, player = %c.player, rule = "exclude_backup_tes", "candidate rejected");
                return false;
            }
            if let Some(max_cv) = rules.max_cv {
                match c.projection.cv {
                    Some(cv) if cv < max_cv => {}
                    _ => {
                        debug!(
                            leg = i,
                            player = %c.player,
                            rule = "max_cv",
                            threshold = max_cv,
                            actual = ?c.projection.cv,
                            "candidate rejected"
                        );
                        return false;
                    }
                }
            }
            if c.true_edge_pct() < rules.min_true_edge_pct {
                debug!(
                    leg = i,
                    player = %c.player,
                    rule = "min_true_edge",
                    threshold = rules.min_true_edge_pct,
                    actual = c.true_edge_pct(),
                    "candidate rejected"
                );
                return false;
            }
            if let Some(min_hit) = rules.min_hit_rate {
                if c.adjusted_hit_rate < min_hit {
                    debug!(
                        leg = i,
                        player = %c.player,
                        rule = "min_hit_rate",
                        threshold = min_hit,
                        actual = c.adjusted_hit_rate,
                        "candidate rejected"
                    );
                    return false;
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect()
}

/// Pick up to `num_legs` legs, best first, enforcing the backup cap
///
/// Ranking: reliability desc, then true edge desc, then original pool
/// order — fully deterministic.
fn select_legs(
    pool: &[BetCandidate],
    eligible: &[usize],
    num_legs: usize,
    rules: &TierRules,
) -> Vec<usize> {
    let mut ranked: Vec<usize> = eligible.to_vec();
    ranked.sort_by(|&a, &b| {
        pool[b]
            .reliability
            .score
            .total_cmp(&pool[a].reliability.score)
            .then(pool[b].true_edge.total_cmp(&pool[a].true_edge))
            .then(a.cmp(&b))
    });

    let mut selected = Vec::with_capacity(num_legs);
    let mut backups = 0usize;
    for &i in &ranked {
        if selected.len() == num_legs {
            break;
        }
        if pool[i].role == Role::Backup {
            if let Some(cap) = rules.max_backups {
                if backups >= cap {
                    debug!(leg = i, player = %pool[i].player, cap, "backup cap reached, leg skipped");
                    continue;
                }
            }
            backups += 1;
        }
        selected.push(i);
    }
    selected
}

/// Label the realized tier from the combined probability alone
fn label_actual_tier(combined_probability: f64, cfg: &ParlayConfig) -> RiskTier {
    if combined_probability >= cfg.conservative_min_prob {
        RiskTier::Conservative
    } else if combined_probability >= cfg.balanced_min_prob {
        RiskTier::Balanced
    } else {
        RiskTier::Aggressive
    }
}

fn collect_leg_warnings(legs: &[BetCandidate]) -> Vec<String> {
    let mut warnings = Vec::new();
    for leg in legs {
        if leg.role == Role::Backup {
            warnings.push(format!("Includes backup: {}", leg.player));
        }
        if leg.has_flag(CandidateFlag::HighVolatility) {
            warnings.push(format!(
                "Volatile prop: {} {}",
                leg.player, leg.prop_type
            ));
        }
        if leg.has_flag(CandidateFlag::SmallSample) {
            warnings.push(format!(
                "Thin sample ({} games): {} {}",
                leg.projection.sample_size, leg.player, leg.prop_type
            ));
        }
    }
    warnings
}

fn verdict(parlay_edge_pct: f64, avg_leg_edge_pct: f64) -> (ParlayVerdict, String) {
    if parlay_edge_pct < 0.0 {
        (ParlayVerdict::Avoid, "Negative parlay edge".to_string())
    } else if avg_leg_edge_pct < 3.0 {
        (
            ParlayVerdict::Pass,
            "Low average true edge per leg".to_string(),
        )
    } else if parlay_edge_pct >= 10.0 && avg_leg_edge_pct >= 8.0 {
        (
            ParlayVerdict::StrongPlay,
            "Excellent true edge on all legs".to_string(),
        )
    } else if parlay_edge_pct >= 5.0 && avg_leg_edge_pct >= 5.0 {
        (
            ParlayVerdict::GoodValue,
            "Solid true edge across legs".to_string(),
        )
    } else {
        (ParlayVerdict::Fair, "Positive but thin edge".to_string())
    }
}
