//! XP award and leveling against the threshold curve.

use std::str::FromStr;

use tracing::warn;

use crate::catalog::ProgressionCatalog;
use crate::constants::{
    CHEST_LEVEL_FACTOR, DONATOR_XP_MULTIPLIER, KILL_LEVEL_FACTOR, LEVEL_CAP, WIN_LEVEL_FACTOR,
    XP_PER_CHEST, XP_PER_KILL, XP_PER_WIN,
};
use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XpReason {
    Kills,
    Chests,
    Wins,
}

impl XpReason {
    pub fn base_xp(self) -> f64 {
        match self {
            XpReason::Kills => XP_PER_KILL,
            XpReason::Chests => XP_PER_CHEST,
            XpReason::Wins => XP_PER_WIN,
        }
    }

    pub fn level_factor(self) -> f64 {
        match self {
            XpReason::Kills => KILL_LEVEL_FACTOR,
            XpReason::Chests => CHEST_LEVEL_FACTOR,
            XpReason::Wins => WIN_LEVEL_FACTOR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            XpReason::Kills => "Kills",
            XpReason::Chests => "Chests",
            XpReason::Wins => "Wins",
        }
    }
}

impl FromStr for XpReason {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Kills" => Ok(XpReason::Kills),
            "Chests" => Ok(XpReason::Chests),
            "Wins" => Ok(XpReason::Wins),
            other => Err(EngineError::Validation(format!(
                "invalid reason '{other}', allowed: Kills, Chests, Wins"
            ))),
        }
    }
}

/// The result of applying one XP award.
#[derive(Debug, Clone, PartialEq)]
pub struct XpAward {
    pub awarded: f64,
    pub new_level: i64,
    pub new_xp: f64,
    pub leveled_up: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum XpOutcome {
    /// At the level cap nothing is applied; a terminal state, not a clamp.
    Capped,
    Applied(XpAward),
}

/// Total XP for one award: base plus the additive level-scaling bonus, then
/// the donator multiplier over the whole amount.
pub fn award_for(reason: XpReason, current_level: i64, donator: bool) -> f64 {
    let base = reason.base_xp();
    let scaled = base + base * current_level as f64 * reason.level_factor();
    if donator {
        scaled * DONATOR_XP_MULTIPLIER
    } else {
        scaled
    }
}

/// Applies one XP award to a (level, xp) pair.
///
/// At most one level-up happens per call; excess XP is retained as
/// carryover (`total mod required`), never burned. A missing threshold is
/// treated as zero, which means an immediate level-up with the carryover
/// reset to zero.
pub fn apply_xp(
    catalog: &ProgressionCatalog,
    current_level: i64,
    current_xp: f64,
    reason: XpReason,
    donator: bool,
) -> XpOutcome {
    if current_level >= LEVEL_CAP {
        return XpOutcome::Capped;
    }

    let awarded = award_for(reason, current_level, donator);
    let required = match catalog.level_threshold(current_level) {
        Some(xp) => xp,
        None => {
            warn!(target: "progression.leveling", level = current_level, "no threshold for level, treating as zero");
            0.0
        }
    };

    let total = current_xp + awarded;
    if total >= required {
        let new_xp = if required > 0.0 { total % required } else { 0.0 };
        XpOutcome::Applied(XpAward {
            awarded,
            new_level: current_level + 1,
            new_xp,
            leveled_up: true,
        })
    } else {
        XpOutcome::Applied(XpAward {
            awarded,
            new_level: current_level,
            new_xp: total,
            leveled_up: false,
        })
    }
}
