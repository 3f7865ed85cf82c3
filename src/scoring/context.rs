//! Context adjustment: deterministic multiplicative tweaks to a projection
//!
//! Applies game-script (spread), defensive-matchup, weather/venue,
//! home/away, rest, and injury multipliers in a fixed order so results
//! are reproducible. Every applied step records a factor string for
//! rendering.

use tracing::debug;

use crate::config::ContextConfig;
use crate::domain::{DefenseTier, GameContext, PropCategory, Venue};

/// Result of applying context adjustments to a weighted projection
#[derive(Debug, Clone, PartialEq)]
pub struct ContextAdjustment {
    pub adjusted: f64,
    /// Net multiplier over the raw projection
    pub multiplier: f64,
    /// Applied factors, in application order
    pub factors: Vec<String>,
}

#[derive(Debug)]
struct Adjuster {
    multiplier: f64,
    factors: Vec<String>,
}

impl Adjuster {
    fn new() -> Self {
        Self {
            multiplier: 1.0,
            factors: Vec::new(),
        }
    }

    /// Apply a percentage offset, e.g. 0.10 for +10%
    fn apply_pct(&mut self, pct: f64, label: impl Into<String>) {
        self.multiplier *= 1.0 + pct;
        self.factors
            .push(format!("{} ({:+.1}%)", label.into(), pct * 100.0));
    }

    /// Apply a raw multiplier, e.g. 0.85 for an elite defense
    fn apply_factor(&mut self, factor: f64, label: impl Into<String>) {
        self.multiplier *= factor;
        self.factors
            .push(format!("{} (x{:.2})", label.into(), factor));
    }
}

/// Apply all context multipliers to a weighted-mean projection
///
/// Order: spread bucket, defensive matchup, weather/venue, home/away,
/// rest days, injury. `Other` category props only take venue, rest, and
/// injury adjustments.
pub fn adjust_projection(
    projection: f64,
    category: PropCategory,
    ctx: &GameContext,
    cfg: &ContextConfig,
) -> ContextAdjustment {
    let mut adj = Adjuster::new();

    // 1. Game script from the spread
    if let Some(pct) = spread_adjustment(ctx.spread, category, cfg) {
        let label = if ctx.spread >= cfg.heavy_spread {
            format!("Heavy favorite ({:+.1})", ctx.spread)
        } else if ctx.spread >= cfg.moderate_spread {
            format!("Moderate favorite ({:+.1})", ctx.spread)
        } else if ctx.spread <= -cfg.heavy_spread {
            format!("Heavy underdog ({:+.1})", ctx.spread)
        } else {
            format!("Moderate underdog ({:+.1})", ctx.spread)
        };
        adj.apply_pct(pct, label);
    }

    // 2. Defensive matchup
    if let Some(tier) = ctx.defense {
        let factor = defense_multiplier(tier, category, cfg);
        if factor != 1.0 {
            adj.apply_factor(factor, format!("{tier:?} opposing defense"));
        }
    }

    // 3. Weather and venue conditions
    if let Some(weather) = ctx.weather {
        if weather.dome {
            if category == PropCategory::Passing {
                adj.apply_pct(cfg.dome_pass_boost, "Dome");
            }
        } else {
            if weather.wind_mph >= cfg.high_wind_mph {
                match category {
                    PropCategory::Passing | PropCategory::Receiving => adj.apply_pct(
                        cfg.high_wind_pass,
                        format!("High wind {:.0}mph", weather.wind_mph),
                    ),
                    PropCategory::Rushing => adj.apply_pct(
                        cfg.high_wind_rush,
                        format!("High wind {:.0}mph", weather.wind_mph),
                    ),
                    PropCategory::Other => {}
                }
            } else if weather.wind_mph >= cfg.moderate_wind_mph
                && matches!(category, PropCategory::Passing | PropCategory::Receiving)
            {
                adj.apply_pct(
                    cfg.moderate_wind_pass,
                    format!("Wind {:.0}mph", weather.wind_mph),
                );
            }

            if weather.precipitation
                && matches!(category, PropCategory::Passing | PropCategory::Receiving)
            {
                adj.apply_pct(cfg.precipitation_pass, "Rain/snow");
            }
        }
    }

    // 4. Home/away
    match ctx.venue {
        Venue::Home if cfg.home_boost != 0.0 => adj.apply_pct(cfg.home_boost, "Home"),
        Venue::Away if cfg.away_penalty != 0.0 => adj.apply_pct(cfg.away_penalty, "Away"),
        _ => {}
    }

    // 5. Rest days
    if ctx.rest_days < cfg.short_week_days {
        adj.apply_pct(
            cfg.short_week_penalty,
            format!("Short week ({} days)", ctx.rest_days),
        );
    } else if ctx.rest_days >= cfg.long_rest_days {
        adj.apply_pct(
            cfg.long_rest_boost,
            format!("Extended rest ({} days)", ctx.rest_days),
        );
    }

    // 6. Injury designation
    if ctx.injury_questionable {
        adj.apply_pct(cfg.injury_penalty, "Questionable");
    }

    let adjusted = projection * adj.multiplier;
    debug!(
        projection,
        adjusted,
        multiplier = adj.multiplier,
        factors = ?adj.factors,
        "context adjustment applied"
    );

    ContextAdjustment {
        adjusted,
        multiplier: adj.multiplier,
        factors: adj.factors,
    }
}

/// Spread-bucket adjustment for a category, None inside the +-3 band
fn spread_adjustment(spread: f64, category: PropCategory, cfg: &ContextConfig) -> Option<f64> {
    let pct = if spread >= cfg.heavy_spread {
        match category {
            PropCategory::Rushing => cfg.heavy_favorite_rush,
            PropCategory::Passing | PropCategory::Receiving => cfg.heavy_favorite_pass,
            PropCategory::Other => return None,
        }
    } else if spread >= cfg.moderate_spread {
        match category {
            PropCategory::Rushing => cfg.moderate_favorite_rush,
            PropCategory::Passing | PropCategory::Receiving => cfg.moderate_favorite_pass,
            PropCategory::Other => return None,
        }
    } else if spread <= -cfg.heavy_spread {
        match category {
            PropCategory::Rushing => cfg.heavy_underdog_rush,
            PropCategory::Passing | PropCategory::Receiving => cfg.heavy_underdog_pass,
            PropCategory::Other => return None,
        }
    } else if spread <= -cfg.moderate_spread {
        match category {
            PropCategory::Rushing => cfg.moderate_underdog_rush,
            PropCategory::Passing | PropCategory::Receiving => cfg.moderate_underdog_pass,
            PropCategory::Other => return None,
        }
    } else {
        return None;
    };
    Some(pct)
}

fn defense_multiplier(tier: DefenseTier, category: PropCategory, cfg: &ContextConfig) -> f64 {
    match (tier, category) {
        (_, PropCategory::Other) | (DefenseTier::Average, _) => 1.0,
        (DefenseTier::Elite, PropCategory::Receiving) => cfg.defense_elite_receiving,
        (DefenseTier::Poor, PropCategory::Receiving) => cfg.defense_poor_receiving,
        (DefenseTier::Elite, _) => cfg.defense_elite,
        (DefenseTier::Poor, _) => cfg.defense_poor,
    }
}
