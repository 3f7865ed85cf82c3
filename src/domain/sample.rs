use serde::{Deserialize, Serialize};

use super::line::Side;
use crate::error::{EngineError, Result};

/// Ordered per-game observations for one (player, statistic)
///
/// Order is chronological and significant: the last sample is the most
/// recent game and carries the highest recency weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSeries {
    values: Vec<f64>,
}

impl SampleSeries {
    /// Build a series from chronological samples; at least one is required
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(EngineError::InvalidInput(
                "sample series must contain at least one observation".to_string(),
            ));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(EngineError::InvalidInput(format!(
                "sample series contains non-finite value: {bad}"
            )));
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fraction of samples strictly clearing the line on the given side
    ///
    /// A push (sample exactly on the line) counts as a miss for both sides.
    pub fn hit_fraction(&self, line: f64, side: Side) -> f64 {
        let hits = self
            .values
            .iter()
            .filter(|&&v| match side {
                Side::Over => v > line,
                Side::Under => v < line,
            })
            .count();
        hits as f64 / self.values.len() as f64
    }
}

/// Derived statistics for one sample series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Recency-weighted mean (weights 1..=n, normalized)
    pub weighted_mean: f64,
    /// Unweighted average
    pub simple_mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Coefficient of variation, std/mean x 100; None when mean == 0
    pub cv: Option<f64>,
    pub sample_size: usize,
}

/// Home/away venue for the player's team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Home,
    Away,
}

/// Opponent defensive strength against a stat category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefenseTier {
    Elite,
    Average,
    Poor,
}

/// Weather and venue conditions for an outdoor/dome game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherConditions {
    pub dome: bool,
    #[serde(default)]
    pub wind_mph: f64,
    #[serde(default)]
    pub precipitation: bool,
}

/// Exogenous game signals for one analysis call, immutable per request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameContext {
    /// Point spread from the player's team perspective; positive = favored
    pub spread: f64,
    pub venue: Venue,
    pub rest_days: u32,
    /// Player carries a questionable injury designation
    #[serde(default)]
    pub injury_questionable: bool,
    /// Opponent defensive tier against this prop's category, if scouted
    #[serde(default)]
    pub defense: Option<DefenseTier>,
    #[serde(default)]
    pub weather: Option<WeatherConditions>,
}

impl GameContext {
    /// Neutral context: pick'em spread, home, normal week, healthy
    pub fn neutral() -> Self {
        Self {
            spread: 0.0,
            venue: Venue::Home,
            rest_days: 7,
            injury_questionable: false,
            defense: None,
            weather: None,
        }
    }
}
