//! Role classification from injected configuration data
//!
//! Tags a player starter/backup/committee and produces the 0-25 point
//! role contribution used by the reliability scorer. Membership data is
//! plain configuration (see `RoleConfig`), swappable at runtime.

use crate::config::RoleConfig;
use crate::domain::Role;

/// Maximum role contribution, earned by undisputed starters
pub const STARTER_POINTS: f64 = 25.0;
/// Backup running backs carry almost no role credit
pub const BACKUP_RB_POINTS: f64 = 5.0;
/// Backup tight ends rate slightly above backup RBs
pub const BACKUP_TE_POINTS: f64 = 10.0;
/// Committee members without a declared snap share
pub const COMMITTEE_DEFAULT_POINTS: f64 = 15.0;

/// Outcome of classifying one player
#[derive(Debug, Clone, PartialEq)]
pub struct RoleCall {
    pub role: Role,
    /// Role contribution, 0-25 points
    pub points: f64,
    /// Human-readable reason, e.g. "Backup RB"
    pub detail: String,
}

/// Classify a player against the injected role data
///
/// Backup sets take precedence over committee membership; anyone not in
/// the data is assumed to be a starter. Committee members earn points
/// proportional to their declared snap share when one exists.
pub fn classify(player: &str, roles: &RoleConfig) -> RoleCall {
    if roles.is_backup_rb(player) {
        return RoleCall {
            role: Role::Backup,
            points: BACKUP_RB_POINTS,
            detail: "Backup RB".to_string(),
        };
    }

    if roles.is_backup_te(player) {
        return RoleCall {
            role: Role::Backup,
            points: BACKUP_TE_POINTS,
            detail: "Backup TE".to_string(),
        };
    }

    if roles.is_committee_member(player) {
        let (points, detail) = match roles.snap_share(player) {
            Some(share) => (
                STARTER_POINTS * share.clamp(0.0, 1.0),
                format!("Committee ({:.0}% snaps)", share * 100.0),
            ),
            None => (COMMITTEE_DEFAULT_POINTS, "Committee".to_string()),
        };
        return RoleCall {
            role: Role::Committee,
            points,
            detail,
        };
    }

    RoleCall {
        role: Role::Starter,
        points: STARTER_POINTS,
        detail: "Starter".to_string(),
    }
}
