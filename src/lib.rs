pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod parlay;
pub mod scoring;

pub use config::{EngineConfig, RoleConfig};
pub use domain::{
    BetCandidate, CandidateFlag, Confidence, GameContext, Line, Projection, PropType,
    Recommendation, ReliabilityScore, ReliabilityTier, RiskTier, Role, SampleSeries, Side,
};
pub use engine::{BetRequest, PropEngine};
pub use error::{EngineError, Result};
pub use parlay::{ParlayRequest, ParlayResult, ParlayVerdict};
