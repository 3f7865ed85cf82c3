//! Command-line interface: score a pool of bets, assemble parlays
//!
//! Input files are JSON arrays of bet requests; output is a table for
//! humans or JSON for piping.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tabled::{Table, Tabled};
use tracing::warn;

use crate::config::{EngineConfig, RoleConfig};
use crate::domain::{BetCandidate, RiskTier};
use crate::engine::{BetRequest, PropEngine};
use crate::error::Result;
use crate::parlay::{ParlayRequest, ParlayResult};

#[derive(Parser)]
#[command(name = "propedge")]
#[command(version = "0.1.0")]
#[command(about = "Player-prop scoring and parlay construction engine", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config directory (default.toml plus PROPEDGE__SECTION__KEY env overrides)
    #[arg(short, long, default_value = "config")]
    pub config: PathBuf,

    /// Role data file (backups, committees, snap shares)
    #[arg(long, default_value = "config/roles.toml")]
    pub roles: PathBuf,

    /// Emit JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score every bet in a pool file
    Score {
        /// JSON file with an array of bet requests
        input: PathBuf,
    },
    /// Score a pool and assemble a parlay from it
    Parlay {
        /// JSON file with an array of bet requests
        input: PathBuf,
        /// Number of legs
        #[arg(short, long, default_value_t = 3)]
        legs: usize,
        /// Risk tier: conservative, balanced, or aggressive
        #[arg(short, long, default_value = "balanced")]
        tier: RiskTier,
    },
}

/// Build an engine from the CLI's config directory and role file
pub fn build_engine(cli: &Cli) -> Result<PropEngine> {
    let config = EngineConfig::load_from(&cli.config)?;
    let roles = if cli.roles.exists() {
        RoleConfig::load_from(&cli.roles)?
    } else {
        warn!(path = %cli.roles.display(), "role file not found; everyone classifies as a starter");
        RoleConfig::default()
    };
    PropEngine::new(config, roles)
}

pub fn load_requests(path: &Path) -> Result<Vec<BetRequest>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Prop")]
    prop: String,
    #[tabled(rename = "Line")]
    line: String,
    #[tabled(rename = "Proj")]
    projection: String,
    #[tabled(rename = "Hit%")]
    hit_rate: String,
    #[tabled(rename = "Edge")]
    edge: String,
    #[tabled(rename = "Rel")]
    reliability: String,
    #[tabled(rename = "Call")]
    call: String,
}

impl CandidateRow {
    fn from_candidate(c: &BetCandidate) -> Self {
        Self {
            player: c.player.clone(),
            prop: c.prop_type.to_string(),
            line: format!("{} {} ({:+})", c.line.side, c.line.value, c.line.odds),
            projection: format!("{:.1}", c.adjusted_projection),
            hit_rate: format!("{:.1}%", c.adjusted_hit_rate * 100.0),
            edge: format!("{:+.1}%", c.true_edge_pct()),
            reliability: format!("{:.0} ({})", c.reliability.score, c.reliability.tier),
            call: format!("{:?} / {:?}", c.recommendation, c.confidence),
        }
    }
}

/// Score every request in the input file and print the results
pub fn run_score(engine: &PropEngine, input: &Path, json: bool) -> Result<()> {
    let requests = load_requests(input)?;
    let pool = engine.score_pool(&requests)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pool)?);
        return Ok(());
    }

    let rows: Vec<CandidateRow> = pool.iter().map(CandidateRow::from_candidate).collect();
    println!("{}", Table::new(rows));
    Ok(())
}

/// Score the pool, assemble a parlay, and print it
pub fn run_parlay(
    engine: &PropEngine,
    input: &Path,
    legs: usize,
    tier: RiskTier,
    json: bool,
) -> Result<()> {
    let requests = load_requests(input)?;
    let pool = engine.score_pool(&requests)?;
    let parlay = engine.build_parlay(&ParlayRequest {
        pool,
        num_legs: legs,
        risk_tier: tier,
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&parlay)?);
        return Ok(());
    }

    print_parlay(&parlay);
    Ok(())
}

fn print_parlay(parlay: &ParlayResult) {
    let rows: Vec<CandidateRow> = parlay
        .legs
        .iter()
        .map(CandidateRow::from_candidate)
        .collect();
    println!("{}", Table::new(rows));
    println!();
    println!(
        "Combined: {:+} ({:.2}x) | win probability {:.1}%",
        parlay.combined_odds,
        parlay.combined_decimal,
        parlay.combined_probability * 100.0
    );
    println!(
        "Edge: {:+.1}% parlay, {:+.1}% avg per leg",
        parlay.parlay_true_edge_pct, parlay.avg_true_edge_pct
    );
    println!(
        "${} pays ${:.2} (profit ${:.2})",
        parlay.stake, parlay.total_payout, parlay.profit
    );
    println!(
        "Requested tier: {} | actual tier: {}",
        parlay.requested_tier, parlay.actual_tier
    );

    for correlation in &parlay.correlations {
        println!("  [{:?}] {}", correlation.severity, correlation.message);
    }
    for warning in &parlay.leg_warnings {
        println!("  [note] {warning}");
    }

    println!();
    println!("Verdict: {} - {}", parlay.verdict, parlay.verdict_reason);
}
