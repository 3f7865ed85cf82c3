//! Correlation analysis for a proposed set of parlay legs
//!
//! Table-driven, non-fatal rules: same-game concentration, same-player
//! stacks, and QB-pass/receiver positive correlation. Warnings inform
//! the caller; they never block assembly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::BetCandidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationSeverity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationKind {
    /// Three or more legs riding one game script
    SameGameConcentration,
    /// Multiple props on one player
    SamePlayerStack,
    /// QB passing prop plus a same-team receiver prop
    QbReceiverCorrelation,
}

/// A non-blocking correlation warning over a set of legs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationWarning {
    pub kind: CorrelationKind,
    pub severity: CorrelationSeverity,
    pub message: String,
    /// Indexes into the analyzed leg slice
    pub legs: Vec<usize>,
}

type Rule = fn(&[BetCandidate]) -> Vec<CorrelationWarning>;

/// Rule table, evaluated in order
const RULES: &[Rule] = &[same_game_concentration, same_player_stack, qb_receiver_pairs];

/// Run every correlation rule over the proposed legs
pub fn analyze(legs: &[BetCandidate]) -> Vec<CorrelationWarning> {
    RULES.iter().flat_map(|rule| rule(legs)).collect()
}

fn same_game_concentration(legs: &[BetCandidate]) -> Vec<CorrelationWarning> {
    let mut by_game: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, leg) in legs.iter().enumerate() {
        by_game.entry(leg.game.as_str()).or_default().push(i);
    }

    let mut warnings: Vec<CorrelationWarning> = by_game
        .into_iter()
        .filter(|(_, indexes)| indexes.len() >= 3)
        .map(|(game, indexes)| CorrelationWarning {
            kind: CorrelationKind::SameGameConcentration,
            severity: CorrelationSeverity::High,
            message: format!(
                "{} legs from the same game ({game}); one bad game script can sink all of them",
                indexes.len()
            ),
            legs: indexes,
        })
        .collect();
    warnings.sort_by(|a, b| a.legs.cmp(&b.legs));
    warnings
}

fn same_player_stack(legs: &[BetCandidate]) -> Vec<CorrelationWarning> {
    let mut by_player: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, leg) in legs.iter().enumerate() {
        by_player.entry(leg.player.as_str()).or_default().push(i);
    }

    let mut warnings: Vec<CorrelationWarning> = by_player
        .into_iter()
        .filter(|(_, indexes)| indexes.len() >= 2)
        .map(|(player, indexes)| CorrelationWarning {
            kind: CorrelationKind::SamePlayerStack,
            severity: CorrelationSeverity::Medium,
            message: format!(
                "{} bets on {player}; they rise and fall together",
                indexes.len()
            ),
            legs: indexes,
        })
        .collect();
    warnings.sort_by(|a, b| a.legs.cmp(&b.legs));
    warnings
}

fn qb_receiver_pairs(legs: &[BetCandidate]) -> Vec<CorrelationWarning> {
    let mut warnings = Vec::new();
    for (i, qb_leg) in legs.iter().enumerate() {
        if !qb_leg.prop_type.is_qb_passing() {
            continue;
        }
        let Some(qb_team) = qb_leg.team.as_deref() else {
            continue;
        };
        for (j, rec_leg) in legs.iter().enumerate() {
            if i == j || !rec_leg.prop_type.is_receiving() {
                continue;
            }
            if rec_leg.team.as_deref() == Some(qb_team) {
                warnings.push(CorrelationWarning {
                    kind: CorrelationKind::QbReceiverCorrelation,
                    severity: CorrelationSeverity::Low,
                    message: format!(
                        "Positive correlation: {} passing and {} receiving on {qb_team} tend to hit together",
                        qb_leg.player, rec_leg.player
                    ),
                    legs: vec![i, j],
                });
            }
        }
    }
    warnings
}
