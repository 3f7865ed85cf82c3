//! Engine facade: one scored candidate in, honest parlays out
//!
//! `PropEngine` owns the validated configuration and the role data and
//! runs the full pipeline for each request. It holds no per-request
//! state, so scoring the same request twice is bit-identical.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{EngineConfig, RoleConfig};
use crate::domain::{
    BetCandidate, CandidateFlag, GameContext, Line, PropType, SampleSeries,
};
use crate::error::{EngineError, Result};
use crate::parlay::{self, ParlayRequest, ParlayResult};
use crate::scoring;

/// One bet to score: the player, the posted line, and the evidence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetRequest {
    pub player: String,
    /// Player's team, when known; feeds correlation detection
    #[serde(default)]
    pub team: Option<String>,
    /// Game label, e.g. "BAL @ KC"
    pub game: String,
    pub prop_type: PropType,
    pub line: Line,
    /// Chronological per-game samples, most recent last
    pub samples: SampleSeries,
    #[serde(default = "GameContext::neutral")]
    pub context: GameContext,
}

/// Stateless scoring engine over validated configuration and role data
#[derive(Debug, Clone)]
pub struct PropEngine {
    config: EngineConfig,
    roles: RoleConfig,
}

impl PropEngine {
    /// Build an engine, rejecting invalid configuration up front
    pub fn new(config: EngineConfig, roles: RoleConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|errors| EngineError::InvalidInput(errors.join("; ")))?;
        Ok(Self { config, roles })
    }

    /// Engine over built-in defaults and empty role data
    pub fn with_defaults() -> Self {
        Self {
            config: EngineConfig::default(),
            roles: RoleConfig::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn roles(&self) -> &RoleConfig {
        &self.roles
    }

    /// Score one bet through the full pipeline
    ///
    /// Aggregate -> context-adjust -> blend hit rate -> classify role ->
    /// reliability composite -> recommendation. Pure function of the
    /// request and the engine's configuration.
    pub fn score_bet(&self, request: &BetRequest) -> Result<BetCandidate> {
        request.line.validate()?;
        if request.samples.is_empty() {
            return Err(EngineError::EmptySampleSeries {
                player: request.player.clone(),
                prop: request.prop_type.to_string(),
            });
        }

        let projection = scoring::project(&request.samples);
        debug!(
            player = %request.player,
            prop = %request.prop_type,
            weighted_mean = projection.weighted_mean,
            std_dev = projection.std_dev,
            cv = ?projection.cv,
            "samples aggregated"
        );

        let adjustment = scoring::adjust_projection(
            projection.weighted_mean,
            request.prop_type.category(),
            &request.context,
            &self.config.context,
        );

        let estimate = scoring::adjust_hit_rate(
            &request.samples,
            request.line.value,
            request.line.side,
            adjustment.adjusted,
            projection.std_dev,
            &self.config.blend,
        );

        let true_edge = estimate.rate - request.line.implied_probability();
        let role_call = scoring::classify(&request.player, &self.roles);
        let reliability = scoring::reliability::score(
            projection.cv,
            &role_call,
            true_edge * 100.0,
            projection.sample_size,
            &self.config.reliability,
        );
        let (recommendation, confidence) = scoring::recommend(
            adjustment.adjusted,
            request.line.value,
            request.line.side,
            true_edge,
            &self.config.reliability,
        );

        let mut flags = estimate.flags.clone();
        match projection.cv {
            Some(cv) if cv > self.config.reliability.high_volatility_cv => {
                flags.push(CandidateFlag::HighVolatility);
            }
            None => flags.push(CandidateFlag::CvUndefined),
            _ => {}
        }

        info!(
            player = %request.player,
            prop = %request.prop_type,
            line = request.line.value,
            side = %request.line.side,
            adjusted = adjustment.adjusted,
            hit_rate = estimate.rate,
            true_edge_pct = true_edge * 100.0,
            reliability = reliability.score,
            recommendation = ?recommendation,
            "bet scored"
        );

        Ok(BetCandidate {
            player: request.player.clone(),
            team: request.team.clone(),
            game: request.game.clone(),
            sport: request.prop_type.sport(),
            prop_type: request.prop_type,
            line: request.line.clone(),
            projection,
            adjusted_projection: adjustment.adjusted,
            adjusted_hit_rate: estimate.rate,
            true_edge,
            role: role_call.role,
            reliability,
            recommendation,
            confidence,
            flags,
            adjustment_factors: adjustment.factors,
        })
    }

    /// Score a batch of bets, failing on the first invalid request
    pub fn score_pool(&self, requests: &[BetRequest]) -> Result<Vec<BetCandidate>> {
        requests.iter().map(|r| self.score_bet(r)).collect()
    }

    /// Assemble a parlay from an already-scored pool
    pub fn build_parlay(&self, request: &ParlayRequest) -> Result<ParlayResult> {
        parlay::assemble(
            request,
            &self.config.tiers,
            &self.config.parlay,
            &self.roles,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Recommendation, ReliabilityTier, RiskTier, Side};

    fn passing_request() -> BetRequest {
        BetRequest {
            player: "Jayson Tatum".to_string(),
            team: Some("BOS".to_string()),
            game: "BOS @ MIA".to_string(),
            prop_type: PropType::Points,
            line: Line {
                value: 27.5,
                side: Side::Over,
                odds: -110,
                bookmaker: "draftkings".to_string(),
            },
            samples: SampleSeries::new(vec![28.0, 31.0, 25.0, 29.0, 27.0, 30.0, 26.0]).unwrap(),
            context: GameContext::neutral(),
        }
    }

    #[test]
    fn test_steady_starter_full_pipeline() {
        let engine = PropEngine::with_defaults();
        let candidate = engine.score_bet(&passing_request()).unwrap();

        // Population stats over the seven samples
        assert!((candidate.projection.std_dev - 2.0).abs() < 1e-9);
        assert!((candidate.projection.cv.unwrap() - 100.0 / 14.0).abs() < 1e-6);

        // Neutral home context applies only the home boost; the resulting
        // z stays inside the trust threshold, so the 4/7 raw rate survives
        assert!((candidate.adjusted_projection - 27.785714 * 1.025).abs() < 1e-4);
        assert!((candidate.adjusted_hit_rate - 4.0 / 7.0).abs() < 1e-12);

        // 57.1% vs 52.4% implied at -110
        assert!((candidate.true_edge - 0.047619).abs() < 1e-4);
        assert_eq!(candidate.recommendation, Recommendation::Play);
        assert_eq!(candidate.reliability.tier, ReliabilityTier::Elite);
        assert!(candidate.flags.is_empty());
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let engine = PropEngine::with_defaults();
        let request = passing_request();
        let first = engine.score_bet(&request).unwrap();
        let second = engine.score_bet(&request).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_negative_edge_is_skipped() {
        let engine = PropEngine::with_defaults();
        let mut request = passing_request();
        // Heavily juiced line well above the projection
        request.line = Line {
            value: 29.5,
            side: Side::Over,
            odds: -200,
            bookmaker: "draftkings".to_string(),
        };
        let candidate = engine.score_bet(&request).unwrap();
        assert!(candidate.true_edge < 0.0);
        assert_eq!(candidate.recommendation, Recommendation::Skip);
    }

    #[test]
    fn test_volatile_sample_flagged() {
        let engine = PropEngine::with_defaults();
        let mut request = passing_request();
        request.samples =
            SampleSeries::new(vec![5.0, 80.0, 2.0, 95.0, 10.0, 60.0, 3.0]).unwrap();
        let candidate = engine.score_bet(&request).unwrap();
        assert!(candidate.has_flag(CandidateFlag::HighVolatility));
    }

    #[test]
    fn test_small_sample_flagged() {
        let engine = PropEngine::with_defaults();
        let mut request = passing_request();
        request.samples = SampleSeries::new(vec![28.0, 31.0, 25.0]).unwrap();
        let candidate = engine.score_bet(&request).unwrap();
        assert!(candidate.has_flag(CandidateFlag::SmallSample));
    }

    #[test]
    fn test_invalid_line_rejected() {
        let engine = PropEngine::with_defaults();
        let mut request = passing_request();
        request.line.odds = 0;
        assert!(engine.score_bet(&request).is_err());
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let mut config = EngineConfig::default();
        config.blend.weight_ceiling = 1.2;
        assert!(PropEngine::new(config, RoleConfig::default()).is_err());
    }

    #[test]
    fn test_score_then_parlay_round() {
        let engine = PropEngine::with_defaults();
        let requests: Vec<BetRequest> = (0..3)
            .map(|i| {
                let mut r = passing_request();
                r.player = format!("Player {i}");
                r.game = format!("Game {i}");
                r
            })
            .collect();
        let pool = engine.score_pool(&requests).unwrap();
        let parlay = engine
            .build_parlay(&ParlayRequest {
                pool,
                num_legs: 3,
                risk_tier: RiskTier::Aggressive,
            })
            .unwrap();
        assert_eq!(parlay.legs.len(), 3);
        // (4/7)^3 = 18.7%, an honest aggressive label
        assert_eq!(parlay.actual_tier, RiskTier::Aggressive);
    }
}
