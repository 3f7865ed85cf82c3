use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Side of an over/under prop line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Over,
    Under,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Over => Side::Under,
            Side::Under => Side::Over,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Over => "OVER",
            Side::Under => "UNDER",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sport a prop market belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    Nfl,
    Nba,
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sport::Nfl => write!(f, "NFL"),
            Sport::Nba => write!(f, "NBA"),
        }
    }
}

/// Player prop market type, tagged per sport
///
/// Dispatch on prop behavior goes through explicit table lookups
/// (`category`, `market_key`) rather than string matching on market keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropType {
    // NFL
    PassYds,
    PassTds,
    RushYds,
    RushTds,
    Receptions,
    ReceptionYds,
    AnytimeTd,
    // NBA
    Points,
    Rebounds,
    Assists,
    Threes,
    Steals,
    Blocks,
}

/// Coarse prop category used by the context adjuster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropCategory {
    Rushing,
    Passing,
    Receiving,
    Other,
}

impl PropType {
    /// Sport this prop type belongs to
    pub fn sport(&self) -> Sport {
        match self {
            PropType::PassYds
            | PropType::PassTds
            | PropType::RushYds
            | PropType::RushTds
            | PropType::Receptions
            | PropType::ReceptionYds
            | PropType::AnytimeTd => Sport::Nfl,
            PropType::Points
            | PropType::Rebounds
            | PropType::Assists
            | PropType::Threes
            | PropType::Steals
            | PropType::Blocks => Sport::Nba,
        }
    }

    /// Category driving game-script and weather adjustments
    pub fn category(&self) -> PropCategory {
        match self {
            PropType::PassYds | PropType::PassTds => PropCategory::Passing,
            PropType::RushYds | PropType::RushTds => PropCategory::Rushing,
            PropType::Receptions | PropType::ReceptionYds | PropType::AnytimeTd => {
                PropCategory::Receiving
            }
            PropType::Points
            | PropType::Rebounds
            | PropType::Assists
            | PropType::Threes
            | PropType::Steals
            | PropType::Blocks => PropCategory::Other,
        }
    }

    /// Odds-provider market key for this prop
    pub fn market_key(&self) -> &'static str {
        match self {
            PropType::PassYds => "player_pass_yds",
            PropType::PassTds => "player_pass_tds",
            PropType::RushYds => "player_rush_yds",
            PropType::RushTds => "player_rush_tds",
            PropType::Receptions => "player_receptions",
            PropType::ReceptionYds => "player_reception_yds",
            PropType::AnytimeTd => "player_anytime_td",
            PropType::Points => "player_points",
            PropType::Rebounds => "player_rebounds",
            PropType::Assists => "player_assists",
            PropType::Threes => "player_threes",
            PropType::Steals => "player_steals",
            PropType::Blocks => "player_blocks",
        }
    }

    /// QB passing props, used by the correlation analyzer
    pub fn is_qb_passing(&self) -> bool {
        matches!(self, PropType::PassYds | PropType::PassTds)
    }

    /// Receiver props, used by the correlation analyzer
    pub fn is_receiving(&self) -> bool {
        matches!(self, PropType::Receptions | PropType::ReceptionYds)
    }
}

impl std::fmt::Display for PropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.market_key())
    }
}

/// A bookmaker line for one (player, prop) market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Threshold the statistic must clear
    pub value: f64,
    pub side: Side,
    /// American odds, non-zero
    pub odds: i32,
    pub bookmaker: String,
}

impl Line {
    pub fn validate(&self) -> Result<()> {
        if self.odds == 0 {
            return Err(EngineError::InvalidOdds { odds: self.odds });
        }
        if !self.value.is_finite() {
            return Err(EngineError::InvalidInput(format!(
                "line value is not finite: {}",
                self.value
            )));
        }
        Ok(())
    }

    /// Bookmaker-implied win probability for these odds, in [0, 1]
    pub fn implied_probability(&self) -> f64 {
        implied_probability(self.odds)
    }

    /// Decimal (European) odds for these American odds
    pub fn decimal_odds(&self) -> f64 {
        decimal_odds(self.odds)
    }
}

/// Convert American odds to implied probability in [0, 1]
///
/// Negative odds: |odds| / (|odds| + 100). Positive: 100 / (odds + 100).
pub fn implied_probability(odds: i32) -> f64 {
    let o = odds as f64;
    if odds < 0 {
        o.abs() / (o.abs() + 100.0)
    } else {
        100.0 / (o + 100.0)
    }
}

/// Convert American odds to decimal odds
pub fn decimal_odds(odds: i32) -> f64 {
    let o = odds as f64;
    if odds > 0 {
        o / 100.0 + 1.0
    } else {
        100.0 / o.abs() + 1.0
    }
}

/// Convert decimal odds back to American
///
/// Rounds to the nearest integer: the decimal for -110 is not float-exact
/// and a plain truncating cast would return -109.
pub fn american_odds(decimal: f64) -> i32 {
    if decimal >= 2.0 {
        ((decimal - 1.0) * 100.0).round() as i32
    } else {
        (-100.0 / (decimal - 1.0)).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implied_probability_negative_odds() {
        // -110: 110 / 210 ≈ 52.4%
        let p = implied_probability(-110);
        assert!((p - 0.5238).abs() < 0.001, "p={}", p);
    }

    #[test]
    fn test_implied_probability_positive_odds() {
        // +265: 100 / 365 ≈ 27.4%
        let p = implied_probability(265);
        assert!((p - 0.274).abs() < 0.001, "p={}", p);
    }

    #[test]
    fn test_decimal_odds_round_trip() {
        assert!((decimal_odds(-110) - 1.909).abs() < 0.001);
        assert!((decimal_odds(150) - 2.5).abs() < 1e-9);
        assert_eq!(american_odds(2.5), 150);
        // Conversions that are not float-exact must not truncate a cent off
        for odds in [-250, -110, -105, 105, 110, 120, 150, 265] {
            assert_eq!(american_odds(decimal_odds(odds)), odds, "odds={odds}");
        }
    }

    #[test]
    fn test_zero_odds_rejected() {
        let line = Line {
            value: 27.5,
            side: Side::Over,
            odds: 0,
            bookmaker: "fanduel".to_string(),
        };
        assert!(line.validate().is_err());
    }

    #[test]
    fn test_prop_category_table() {
        assert_eq!(PropType::RushYds.category(), PropCategory::Rushing);
        assert_eq!(PropType::PassTds.category(), PropCategory::Passing);
        assert_eq!(PropType::Receptions.category(), PropCategory::Receiving);
        assert_eq!(PropType::Points.category(), PropCategory::Other);
        assert_eq!(PropType::Points.sport(), Sport::Nba);
        assert_eq!(PropType::RushYds.sport(), Sport::Nfl);
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Over.opposite(), Side::Under);
        assert_eq!(Side::Under.opposite(), Side::Over);
    }
}
