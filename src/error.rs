use thiserror::Error;

/// Main error type for the scoring engine
///
/// All failures are returned as values at the engine boundary; nothing
/// inside the core retries or panics on bad input.
#[derive(Error, Debug)]
pub enum EngineError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Input validation errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid odds: {odds} (American odds must be non-zero)")]
    InvalidOdds { odds: i32 },

    #[error("Empty sample series for {player} {prop}")]
    EmptySampleSeries { player: String, prop: String },

    // Parlay assembly errors
    #[error(
        "Insufficient pool for {tier} parlay: found {found} eligible legs, needed {needed}. {suggestion}"
    )]
    InsufficientPool {
        tier: String,
        found: usize,
        needed: usize,
        suggestion: String,
    },

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for EngineError
pub type Result<T> = std::result::Result<T, EngineError>;
