use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::line::{Line, PropType, Sport};
use super::sample::Projection;

/// Player role for a prop market, from injected role data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Starter,
    Backup,
    Committee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Starter => "starter",
            Role::Backup => "backup",
            Role::Committee => "committee",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reliability tier for a 0-100 composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReliabilityTier {
    VeryLow,
    Low,
    Medium,
    High,
    Elite,
}

impl ReliabilityTier {
    /// Tier bands: >=85 Elite, 70-84 High, 55-69 Medium, 40-54 Low, <40 VeryLow
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            ReliabilityTier::Elite
        } else if score >= 70.0 {
            ReliabilityTier::High
        } else if score >= 55.0 {
            ReliabilityTier::Medium
        } else if score >= 40.0 {
            ReliabilityTier::Low
        } else {
            ReliabilityTier::VeryLow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReliabilityTier::Elite => "Elite",
            ReliabilityTier::High => "High",
            ReliabilityTier::Medium => "Medium",
            ReliabilityTier::Low => "Low",
            ReliabilityTier::VeryLow => "Very Low",
        }
    }
}

impl std::fmt::Display for ReliabilityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Composite reliability score with its factor breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityScore {
    /// Weighted composite, clamped to [0, 100]
    pub score: f64,
    pub tier: ReliabilityTier,
    /// Consistency sub-score from CV, 0-100
    pub consistency: f64,
    /// Role contribution, 0-25 points
    pub role_points: f64,
    /// Edge-quality sub-score from true edge, 0-100
    pub edge_quality: f64,
    /// Sample-size sub-score, 0-100
    pub sample_score: f64,
    /// Human-readable factor lines for rendering
    pub factors: Vec<String>,
}

/// Verdict for a single scored candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Play,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Non-fatal metadata raised while scoring a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateFlag {
    /// Fewer than the minimum samples for distribution blending
    SmallSample,
    /// CV above the volatility ceiling
    HighVolatility,
    /// std dev == 0, distribution blend skipped
    ZeroDispersion,
    /// mean == 0, CV undefined
    CvUndefined,
}

/// A fully scored prop bet, immutable once produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetCandidate {
    pub player: String,
    /// Player's team, when known; enables positive-correlation detection
    pub team: Option<String>,
    /// Matchup label, e.g. "BAL @ KC"; groups legs for concentration checks
    pub game: String,
    pub sport: Sport,
    pub prop_type: PropType,
    pub line: Line,
    pub projection: Projection,
    /// Weighted mean after all context multipliers
    pub adjusted_projection: f64,
    /// Distribution-blended win probability for the bet side, [0, 1]
    pub adjusted_hit_rate: f64,
    /// adjusted_hit_rate - implied_probability(odds), [-1, 1]
    pub true_edge: f64,
    pub role: Role,
    pub reliability: ReliabilityScore,
    pub recommendation: Recommendation,
    pub confidence: Confidence,
    pub flags: Vec<CandidateFlag>,
    /// Context adjustments applied, in application order
    pub adjustment_factors: Vec<String>,
}

impl BetCandidate {
    /// True edge in percentage points
    pub fn true_edge_pct(&self) -> f64 {
        self.true_edge * 100.0
    }

    pub fn has_flag(&self, flag: CandidateFlag) -> bool {
        self.flags.contains(&flag)
    }
}

/// Requested parlay risk tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Conservative,
    Balanced,
    Aggressive,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Conservative => "conservative",
            RiskTier::Balanced => "balanced",
            RiskTier::Aggressive => "aggressive",
        }
    }

    /// Next looser tier, used in insufficient-pool suggestions
    pub fn looser(&self) -> Option<Self> {
        match self {
            RiskTier::Conservative => Some(RiskTier::Balanced),
            RiskTier::Balanced => Some(RiskTier::Aggressive),
            RiskTier::Aggressive => None,
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RiskTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "conservative" => Ok(RiskTier::Conservative),
            "balanced" => Ok(RiskTier::Balanced),
            "aggressive" => Ok(RiskTier::Aggressive),
            other => Err(format!(
                "unknown risk tier: {other} (expected conservative, balanced, or aggressive)"
            )),
        }
    }
}

/// Resolved-bet ledger row, consumed by the offline calibration job
///
/// Contract type only: the engine neither reads nor writes this table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedBet {
    pub player: String,
    pub prop_type: PropType,
    pub line: f64,
    pub projection: f64,
    pub actual_result: f64,
    pub hit: bool,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_bands() {
        assert_eq!(ReliabilityTier::from_score(92.0), ReliabilityTier::Elite);
        assert_eq!(ReliabilityTier::from_score(85.0), ReliabilityTier::Elite);
        assert_eq!(ReliabilityTier::from_score(84.9), ReliabilityTier::High);
        assert_eq!(ReliabilityTier::from_score(70.0), ReliabilityTier::High);
        assert_eq!(ReliabilityTier::from_score(60.0), ReliabilityTier::Medium);
        assert_eq!(ReliabilityTier::from_score(45.0), ReliabilityTier::Low);
        assert_eq!(ReliabilityTier::from_score(39.9), ReliabilityTier::VeryLow);
    }

    #[test]
    fn test_risk_tier_parse() {
        assert_eq!(
            "Conservative".parse::<RiskTier>().unwrap(),
            RiskTier::Conservative
        );
        assert!("reckless".parse::<RiskTier>().is_err());
    }

    #[test]
    fn test_risk_tier_looser() {
        assert_eq!(RiskTier::Conservative.looser(), Some(RiskTier::Balanced));
        assert_eq!(RiskTier::Aggressive.looser(), None);
    }
}
