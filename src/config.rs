use std::collections::{HashMap, HashSet};
use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::RiskTier;

/// Main configuration for the scoring engine
///
/// Every numeric constant in the scoring pipeline lives here so it can be
/// recalibrated against real outcome data without touching code. Each
/// field carries its own serde default, so a file or environment overlay
/// may set a single key without restating the rest of its section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub context: ContextConfig,
    #[serde(default)]
    pub blend: BlendConfig,
    #[serde(default)]
    pub reliability: ReliabilityConfig,
    #[serde(default)]
    pub tiers: TiersConfig,
    #[serde(default)]
    pub parlay: ParlayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Multipliers for the context adjuster, applied in a fixed order
#[derive(Debug, Clone, Deserialize)]
pub struct ContextConfig {
    /// Spread magnitude for the heavy favorite/underdog buckets
    #[serde(default = "default_heavy_spread")]
    pub heavy_spread: f64,
    /// Spread magnitude for the moderate buckets
    #[serde(default = "default_moderate_spread")]
    pub moderate_spread: f64,
    #[serde(default = "default_heavy_favorite_rush")]
    pub heavy_favorite_rush: f64,
    #[serde(default = "default_heavy_favorite_pass")]
    pub heavy_favorite_pass: f64,
    #[serde(default = "default_moderate_favorite_rush")]
    pub moderate_favorite_rush: f64,
    #[serde(default = "default_moderate_favorite_pass")]
    pub moderate_favorite_pass: f64,
    #[serde(default = "default_moderate_underdog_rush")]
    pub moderate_underdog_rush: f64,
    #[serde(default = "default_moderate_underdog_pass")]
    pub moderate_underdog_pass: f64,
    #[serde(default = "default_heavy_underdog_rush")]
    pub heavy_underdog_rush: f64,
    #[serde(default = "default_heavy_underdog_pass")]
    pub heavy_underdog_pass: f64,

    // Defensive matchup multipliers (applied as factors, not offsets)
    #[serde(default = "default_defense_elite")]
    pub defense_elite: f64,
    #[serde(default = "default_defense_poor")]
    pub defense_poor: f64,
    #[serde(default = "default_defense_elite_receiving")]
    pub defense_elite_receiving: f64,
    #[serde(default = "default_defense_poor_receiving")]
    pub defense_poor_receiving: f64,

    // Weather and venue
    #[serde(default = "default_dome_pass_boost")]
    pub dome_pass_boost: f64,
    #[serde(default = "default_high_wind_mph")]
    pub high_wind_mph: f64,
    #[serde(default = "default_high_wind_pass")]
    pub high_wind_pass: f64,
    #[serde(default = "default_high_wind_rush")]
    pub high_wind_rush: f64,
    #[serde(default = "default_moderate_wind_mph")]
    pub moderate_wind_mph: f64,
    #[serde(default = "default_moderate_wind_pass")]
    pub moderate_wind_pass: f64,
    #[serde(default = "default_precipitation_pass")]
    pub precipitation_pass: f64,

    // Home/away, rest, injury
    #[serde(default = "default_home_boost")]
    pub home_boost: f64,
    #[serde(default = "default_away_penalty")]
    pub away_penalty: f64,
    /// Rest below this many days counts as a short week
    #[serde(default = "default_short_week_days")]
    pub short_week_days: u32,
    #[serde(default = "default_short_week_penalty")]
    pub short_week_penalty: f64,
    /// Rest at or above this many days counts as extended
    #[serde(default = "default_long_rest_days")]
    pub long_rest_days: u32,
    #[serde(default = "default_long_rest_boost")]
    pub long_rest_boost: f64,
    #[serde(default = "default_injury_penalty")]
    pub injury_penalty: f64,
}

fn default_heavy_spread() -> f64 {
    7.0
}
fn default_moderate_spread() -> f64 {
    3.0
}
fn default_heavy_favorite_rush() -> f64 {
    0.10
}
fn default_heavy_favorite_pass() -> f64 {
    -0.05
}
fn default_moderate_favorite_rush() -> f64 {
    0.05
}
fn default_moderate_favorite_pass() -> f64 {
    -0.025
}
fn default_moderate_underdog_rush() -> f64 {
    -0.05
}
fn default_moderate_underdog_pass() -> f64 {
    0.05
}
fn default_heavy_underdog_rush() -> f64 {
    -0.10
}
fn default_heavy_underdog_pass() -> f64 {
    0.10
}
fn default_defense_elite() -> f64 {
    0.85
}
fn default_defense_poor() -> f64 {
    1.15
}
fn default_defense_elite_receiving() -> f64 {
    0.88
}
fn default_defense_poor_receiving() -> f64 {
    1.12
}
fn default_dome_pass_boost() -> f64 {
    0.05
}
fn default_high_wind_mph() -> f64 {
    15.0
}
fn default_high_wind_pass() -> f64 {
    -0.15
}
fn default_high_wind_rush() -> f64 {
    0.10
}
fn default_moderate_wind_mph() -> f64 {
    10.0
}
fn default_moderate_wind_pass() -> f64 {
    -0.07
}
fn default_precipitation_pass() -> f64 {
    -0.10
}
fn default_home_boost() -> f64 {
    0.025
}
fn default_away_penalty() -> f64 {
    0.0
}
fn default_short_week_days() -> u32 {
    6
}
fn default_short_week_penalty() -> f64 {
    -0.03
}
fn default_long_rest_days() -> u32 {
    9
}
fn default_long_rest_boost() -> f64 {
    0.03
}
fn default_injury_penalty() -> f64 {
    -0.10
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            heavy_spread: default_heavy_spread(),
            moderate_spread: default_moderate_spread(),
            heavy_favorite_rush: default_heavy_favorite_rush(),
            heavy_favorite_pass: default_heavy_favorite_pass(),
            moderate_favorite_rush: default_moderate_favorite_rush(),
            moderate_favorite_pass: default_moderate_favorite_pass(),
            moderate_underdog_rush: default_moderate_underdog_rush(),
            moderate_underdog_pass: default_moderate_underdog_pass(),
            heavy_underdog_rush: default_heavy_underdog_rush(),
            heavy_underdog_pass: default_heavy_underdog_pass(),
            defense_elite: default_defense_elite(),
            defense_poor: default_defense_poor(),
            defense_elite_receiving: default_defense_elite_receiving(),
            defense_poor_receiving: default_defense_poor_receiving(),
            dome_pass_boost: default_dome_pass_boost(),
            high_wind_mph: default_high_wind_mph(),
            high_wind_pass: default_high_wind_pass(),
            high_wind_rush: default_high_wind_rush(),
            moderate_wind_mph: default_moderate_wind_mph(),
            moderate_wind_pass: default_moderate_wind_pass(),
            precipitation_pass: default_precipitation_pass(),
            home_boost: default_home_boost(),
            away_penalty: default_away_penalty(),
            short_week_days: default_short_week_days(),
            short_week_penalty: default_short_week_penalty(),
            long_rest_days: default_long_rest_days(),
            long_rest_boost: default_long_rest_boost(),
            injury_penalty: default_injury_penalty(),
        }
    }
}

/// Distribution-blend parameters for the hit-rate adjuster
#[derive(Debug, Clone, Deserialize)]
pub struct BlendConfig {
    /// Below this |z| the raw historical rate is trusted unmodified
    #[serde(default = "default_z_trust_threshold")]
    pub z_trust_threshold: f64,
    /// Blend weight at the trust threshold
    #[serde(default = "default_base_weight")]
    pub base_weight: f64,
    /// Weight gained per unit of |z| beyond the threshold
    #[serde(default = "default_weight_slope")]
    pub weight_slope: f64,
    /// Saturation ceiling; must stay below 1 so history is never discarded
    #[serde(default = "default_weight_ceiling")]
    pub weight_ceiling: f64,
    /// Minimum samples required before blending applies
    #[serde(default = "default_min_blend_samples")]
    pub min_blend_samples: usize,
}

fn default_z_trust_threshold() -> f64 {
    0.5
}
fn default_base_weight() -> f64 {
    0.25
}
fn default_weight_slope() -> f64 {
    0.20
}
fn default_weight_ceiling() -> f64 {
    0.75
}
fn default_min_blend_samples() -> usize {
    5
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            z_trust_threshold: default_z_trust_threshold(),
            base_weight: default_base_weight(),
            weight_slope: default_weight_slope(),
            weight_ceiling: default_weight_ceiling(),
            min_blend_samples: default_min_blend_samples(),
        }
    }
}

/// Reliability composite weights and recommendation thresholds
#[derive(Debug, Clone, Deserialize)]
pub struct ReliabilityConfig {
    #[serde(default = "default_consistency_weight")]
    pub consistency_weight: f64,
    #[serde(default = "default_role_weight")]
    pub role_weight: f64,
    #[serde(default = "default_edge_weight")]
    pub edge_weight: f64,
    #[serde(default = "default_sample_weight")]
    pub sample_weight: f64,
    /// |projection - line| at which the projection's side wins outright
    #[serde(default = "default_decisive_margin")]
    pub decisive_margin: f64,
    /// True edge (percentage points) for high-confidence recommendations
    #[serde(default = "default_high_confidence_edge_pct")]
    pub high_confidence_edge_pct: f64,
    /// True edge (percentage points) for medium-confidence recommendations
    #[serde(default = "default_medium_confidence_edge_pct")]
    pub medium_confidence_edge_pct: f64,
    /// CV above this raises the high-volatility flag
    #[serde(default = "default_high_volatility_cv")]
    pub high_volatility_cv: f64,
}

fn default_consistency_weight() -> f64 {
    0.40
}
fn default_role_weight() -> f64 {
    0.25
}
fn default_edge_weight() -> f64 {
    0.20
}
fn default_sample_weight() -> f64 {
    0.15
}
fn default_decisive_margin() -> f64 {
    1.0
}
fn default_high_confidence_edge_pct() -> f64 {
    8.0
}
fn default_medium_confidence_edge_pct() -> f64 {
    3.0
}
fn default_high_volatility_cv() -> f64 {
    60.0
}

impl Default for ReliabilityConfig {
    fn default() -> Self {
        Self {
            consistency_weight: default_consistency_weight(),
            role_weight: default_role_weight(),
            edge_weight: default_edge_weight(),
            sample_weight: default_sample_weight(),
            decisive_margin: default_decisive_margin(),
            high_confidence_edge_pct: default_high_confidence_edge_pct(),
            medium_confidence_edge_pct: default_medium_confidence_edge_pct(),
            high_volatility_cv: default_high_volatility_cv(),
        }
    }
}

/// Eligibility thresholds for one parlay risk tier
///
/// Overridden as a whole table per tier; thresholds within a tier are
/// interdependent, so there are no per-field fallbacks here.
#[derive(Debug, Clone, Deserialize)]
pub struct TierRules {
    pub min_reliability: Option<f64>,
    pub max_cv: Option<f64>,
    /// Minimum true edge in percentage points
    pub min_true_edge_pct: f64,
    /// Minimum adjusted hit rate, as a fraction
    pub min_hit_rate: Option<f64>,
    /// Only starters are eligible
    pub starters_only: bool,
    /// Cap on the number of backup legs selected
    pub max_backups: Option<usize>,
    /// Backup tight ends are never eligible
    pub exclude_backup_tes: bool,
}

/// Per-tier eligibility tables; filters never relax automatically
#[derive(Debug, Clone, Deserialize)]
pub struct TiersConfig {
    #[serde(default = "default_conservative_rules")]
    pub conservative: TierRules,
    #[serde(default = "default_balanced_rules")]
    pub balanced: TierRules,
    #[serde(default = "default_aggressive_rules")]
    pub aggressive: TierRules,
}

fn default_conservative_rules() -> TierRules {
    TierRules {
        min_reliability: Some(70.0),
        max_cv: Some(25.0),
        min_true_edge_pct: 5.0,
        min_hit_rate: Some(0.60),
        starters_only: true,
        max_backups: Some(0),
        exclude_backup_tes: true,
    }
}

fn default_balanced_rules() -> TierRules {
    TierRules {
        min_reliability: Some(55.0),
        max_cv: None,
        min_true_edge_pct: 3.0,
        min_hit_rate: Some(0.50),
        starters_only: false,
        max_backups: Some(1),
        exclude_backup_tes: true,
    }
}

fn default_aggressive_rules() -> TierRules {
    TierRules {
        min_reliability: None,
        max_cv: None,
        min_true_edge_pct: 1.0,
        min_hit_rate: None,
        starters_only: false,
        max_backups: None,
        exclude_backup_tes: false,
    }
}

impl TiersConfig {
    pub fn rules(&self, tier: RiskTier) -> &TierRules {
        match tier {
            RiskTier::Conservative => &self.conservative,
            RiskTier::Balanced => &self.balanced,
            RiskTier::Aggressive => &self.aggressive,
        }
    }
}

impl Default for TiersConfig {
    fn default() -> Self {
        Self {
            conservative: default_conservative_rules(),
            balanced: default_balanced_rules(),
            aggressive: default_aggressive_rules(),
        }
    }
}

/// Parlay-level bands and payout parameters
#[derive(Debug, Clone, Deserialize)]
pub struct ParlayConfig {
    /// Combined probability at or above which a parlay is labeled conservative
    #[serde(default = "default_conservative_min_prob")]
    pub conservative_min_prob: f64,
    /// Combined probability at or above which a parlay is labeled balanced
    #[serde(default = "default_balanced_min_prob")]
    pub balanced_min_prob: f64,
    /// Reference stake in USD for payout figures
    #[serde(default = "default_stake_usd")]
    pub stake_usd: f64,
}

fn default_conservative_min_prob() -> f64 {
    0.60
}
fn default_balanced_min_prob() -> f64 {
    0.40
}
fn default_stake_usd() -> f64 {
    100.0
}

impl Default for ParlayConfig {
    fn default() -> Self {
        Self {
            conservative_min_prob: default_conservative_min_prob(),
            balanced_min_prob: default_balanced_min_prob(),
            stake_usd: default_stake_usd(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    ///
    /// Layers: built-in defaults, then `default.toml`, then environment
    /// variables (`PROPEDGE__BLEND__WEIGHT_CEILING`, etc. — double
    /// underscore after the prefix and between section and key). Any
    /// single key may be overridden on its own.
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(
                Environment::with_prefix("PROPEDGE")
                    .separator("__")
                    .try_parsing(true),
            );

        let overlay: PartialEngineConfig = builder.build()?.try_deserialize()?;
        Ok(overlay.merge_into_default())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let weight_sum = self.reliability.consistency_weight
            + self.reliability.role_weight
            + self.reliability.edge_weight
            + self.reliability.sample_weight;
        if (weight_sum - 1.0).abs() > 1e-6 {
            errors.push(format!(
                "reliability weights must sum to 1.0, got {weight_sum}"
            ));
        }

        if self.blend.weight_ceiling >= 1.0 {
            errors.push(format!(
                "blend.weight_ceiling must stay below 1.0 (raw data is never fully discarded), got {}",
                self.blend.weight_ceiling
            ));
        }
        if self.blend.base_weight < 0.0 || self.blend.base_weight > self.blend.weight_ceiling {
            errors.push("blend.base_weight must be within [0, weight_ceiling]".to_string());
        }
        if self.blend.z_trust_threshold <= 0.0 {
            errors.push("blend.z_trust_threshold must be positive".to_string());
        }

        if self.context.heavy_spread <= self.context.moderate_spread {
            errors.push("context.heavy_spread must exceed context.moderate_spread".to_string());
        }

        if self.parlay.conservative_min_prob <= self.parlay.balanced_min_prob {
            errors.push(
                "parlay.conservative_min_prob must exceed parlay.balanced_min_prob".to_string(),
            );
        }
        if self.parlay.stake_usd <= 0.0 {
            errors.push("parlay.stake_usd must be positive".to_string());
        }

        if self.reliability.decisive_margin < 0.0 {
            errors.push("reliability.decisive_margin must be non-negative".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// File/env overlay where every section is optional
#[derive(Debug, Clone, Deserialize, Default)]
struct PartialEngineConfig {
    context: Option<ContextConfig>,
    blend: Option<BlendConfig>,
    reliability: Option<ReliabilityConfig>,
    tiers: Option<TiersConfig>,
    parlay: Option<ParlayConfig>,
    logging: Option<LoggingConfig>,
}

impl PartialEngineConfig {
    fn merge_into_default(self) -> EngineConfig {
        EngineConfig {
            context: self.context.unwrap_or_default(),
            blend: self.blend.unwrap_or_default(),
            reliability: self.reliability.unwrap_or_default(),
            tiers: self.tiers.unwrap_or_default(),
            parlay: self.parlay.unwrap_or_default(),
            logging: self.logging.unwrap_or_default(),
        }
    }
}

/// Role configuration data for the role classifier
///
/// Plain data, injected into the engine and swappable at runtime by
/// re-calling the loader; never a hidden global. Player keys are
/// normalized to lowercase on load.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RoleConfig {
    #[serde(default)]
    pub backup_rbs: HashSet<String>,
    #[serde(default)]
    pub backup_tes: HashSet<String>,
    /// Team -> members sharing the backfield
    #[serde(default)]
    pub committee_backfields: HashMap<String, Vec<String>>,
    /// Declared snap-share estimates for committee members, in [0, 1]
    #[serde(default)]
    pub snap_shares: HashMap<String, f64>,
}

impl RoleConfig {
    /// Load role data from a TOML file
    pub fn load_from<P: AsRef<Path>>(path: P) -> crate::error::Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let parsed: RoleConfig = toml::from_str(&raw).map_err(|e| {
            crate::error::EngineError::InvalidInput(format!(
                "role file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Ok(parsed.normalized())
    }

    /// Lowercase every player key so lookups are case-insensitive
    pub fn normalized(self) -> Self {
        Self {
            backup_rbs: self.backup_rbs.into_iter().map(|p| p.to_lowercase()).collect(),
            backup_tes: self.backup_tes.into_iter().map(|p| p.to_lowercase()).collect(),
            committee_backfields: self
                .committee_backfields
                .into_iter()
                .map(|(team, members)| {
                    (
                        team.to_lowercase(),
                        members.into_iter().map(|m| m.to_lowercase()).collect(),
                    )
                })
                .collect(),
            snap_shares: self
                .snap_shares
                .into_iter()
                .map(|(p, s)| (p.to_lowercase(), s))
                .collect(),
        }
    }

    pub fn is_backup_rb(&self, player: &str) -> bool {
        self.backup_rbs.contains(&player.to_lowercase())
    }

    pub fn is_backup_te(&self, player: &str) -> bool {
        self.backup_tes.contains(&player.to_lowercase())
    }

    pub fn is_committee_member(&self, player: &str) -> bool {
        let key = player.to_lowercase();
        self.committee_backfields
            .values()
            .any(|members| members.iter().any(|m| m == &key))
    }

    pub fn snap_share(&self, player: &str) -> Option<f64> {
        self.snap_shares.get(&player.to_lowercase()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_weight_sum_rejected() {
        let mut config = EngineConfig::default();
        config.reliability.consistency_weight = 0.9;
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("weights must sum")));
    }

    #[test]
    fn test_ceiling_must_stay_below_one() {
        let mut config = EngineConfig::default();
        config.blend.weight_ceiling = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tier_table_defaults() {
        let tiers = TiersConfig::default();
        assert_eq!(tiers.rules(RiskTier::Conservative).min_reliability, Some(70.0));
        assert_eq!(tiers.rules(RiskTier::Balanced).min_true_edge_pct, 3.0);
        assert!(tiers.rules(RiskTier::Aggressive).min_reliability.is_none());
    }

    #[test]
    fn test_single_key_section_fills_remaining_defaults() {
        // One key per section; every sibling falls back to its default
        let blend: BlendConfig = toml::from_str("weight_ceiling = 0.8").unwrap();
        assert_eq!(blend.weight_ceiling, 0.8);
        assert_eq!(blend.z_trust_threshold, 0.5);
        assert_eq!(blend.base_weight, 0.25);
        assert_eq!(blend.min_blend_samples, 5);

        let context: ContextConfig = toml::from_str("home_boost = 0.05").unwrap();
        assert_eq!(context.home_boost, 0.05);
        assert_eq!(context.heavy_spread, 7.0);

        let reliability: ReliabilityConfig = toml::from_str("decisive_margin = 1.5").unwrap();
        assert_eq!(reliability.decisive_margin, 1.5);
        assert_eq!(reliability.consistency_weight, 0.40);

        let parlay: ParlayConfig = toml::from_str("stake_usd = 50.0").unwrap();
        assert_eq!(parlay.stake_usd, 50.0);
        assert_eq!(parlay.conservative_min_prob, 0.60);

        let tiers: TiersConfig = toml::from_str("").unwrap();
        assert_eq!(tiers.conservative.min_reliability, Some(70.0));
    }

    #[test]
    fn test_load_from_partial_file_keeps_other_defaults() {
        let dir = std::env::temp_dir().join("propedge-config-partial");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("default.toml"),
            "[blend]\nweight_ceiling = 0.7\n\n[parlay]\nstake_usd = 25.0\n",
        )
        .unwrap();

        let config = EngineConfig::load_from(&dir).unwrap();
        assert_eq!(config.blend.weight_ceiling, 0.7);
        assert_eq!(config.blend.base_weight, 0.25);
        assert_eq!(config.parlay.stake_usd, 25.0);
        assert_eq!(config.parlay.conservative_min_prob, 0.60);
        assert_eq!(config.reliability.decisive_margin, 1.0);
        assert!(config.validate().is_ok());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_from_missing_dir_is_all_defaults() {
        let config =
            EngineConfig::load_from(std::env::temp_dir().join("propedge-no-such-dir")).unwrap();
        assert_eq!(config.blend.weight_ceiling, 0.75);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_role_config_normalization() {
        let roles = RoleConfig {
            backup_rbs: ["Jordan Mason".to_string()].into_iter().collect(),
            backup_tes: HashSet::new(),
            committee_backfields: [(
                "Rams".to_string(),
                vec!["Kyren Williams".to_string(), "Royce Freeman".to_string()],
            )]
            .into_iter()
            .collect(),
            snap_shares: [("Kyren Williams".to_string(), 0.65)].into_iter().collect(),
        }
        .normalized();

        assert!(roles.is_backup_rb("jordan mason"));
        assert!(roles.is_backup_rb("Jordan Mason"));
        assert!(roles.is_committee_member("KYREN WILLIAMS"));
        assert_eq!(roles.snap_share("kyren williams"), Some(0.65));
        assert!(!roles.is_backup_te("jordan mason"));
    }

    #[test]
    fn test_role_config_loads_from_toml_file() {
        let dir = std::env::temp_dir().join("propedge-roles-file");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roles.toml");
        fs::write(
            &path,
            r#"
backup_rbs = ["Jordan Mason"]
backup_tes = ["Foster Moreau"]

[committee_backfields]
lions = ["Jahmyr Gibbs", "David Montgomery"]

[snap_shares]
"Jahmyr Gibbs" = 0.55
"#,
        )
        .unwrap();

        let roles = RoleConfig::load_from(&path).unwrap();
        // Keys are normalized on load, lookups are case-insensitive
        assert!(roles.is_backup_rb("JORDAN MASON"));
        assert!(roles.is_backup_te("foster moreau"));
        assert!(roles.is_committee_member("Jahmyr Gibbs"));
        assert_eq!(roles.snap_share("jahmyr gibbs"), Some(0.55));
        assert_eq!(roles.snap_share("David Montgomery"), None);
        assert!(!roles.is_backup_rb("Saquon Barkley"));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_role_config_rejects_malformed_file() {
        let dir = std::env::temp_dir().join("propedge-roles-bad");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roles.toml");
        fs::write(&path, "backup_rbs = \"not-an-array\"\n").unwrap();

        assert!(RoleConfig::load_from(&path).is_err());

        fs::remove_dir_all(&dir).ok();
    }
}
