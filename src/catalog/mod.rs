//! The progression catalog: immutable, externally loaded tables the engines
//! read at runtime. Loaded once at startup and injected; never a hidden
//! global. Parse failures are startup errors; a missing entry at runtime is
//! defined behavior handled by the engines, not an error.

pub mod rewards;
pub mod thresholds;
pub mod variants;

use std::fs;
use std::path::Path;

use thiserror::Error;

pub use rewards::{LevelRewards, RewardTable};
pub use thresholds::CurveTable;
pub use variants::VariantTable;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalog file: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct ProgressionCatalog {
    thresholds: CurveTable,
    rewards: RewardTable,
    variants: VariantTable,
}

impl ProgressionCatalog {
    /// Load all three tables from a catalog directory:
    /// `xp_curve.txt`, `season_rewards.json`, `variants.json`.
    pub fn load(dir: &Path) -> Result<ProgressionCatalog, CatalogError> {
        let curve = fs::read_to_string(dir.join("xp_curve.txt"))?;
        let rewards = fs::read_to_string(dir.join("season_rewards.json"))?;
        let variants = fs::read_to_string(dir.join("variants.json"))?;
        Ok(ProgressionCatalog {
            thresholds: CurveTable::parse(&curve),
            rewards: RewardTable::parse(&rewards)?,
            variants: VariantTable::parse(&variants)?,
        })
    }

    /// Assemble a catalog from already-built tables. Used by tests and by
    /// anything that sources the tables elsewhere.
    pub fn from_parts(
        thresholds: CurveTable,
        rewards: RewardTable,
        variants: VariantTable,
    ) -> ProgressionCatalog {
        ProgressionCatalog {
            thresholds,
            rewards,
            variants,
        }
    }

    /// XP required to clear `level`. `None` is a catalog gap the caller
    /// must interpret per the leveling rules (treated as zero there).
    pub fn level_threshold(&self, level: i64) -> Option<f64> {
        self.thresholds.threshold(level)
    }

    /// Reward sets for reaching `level`. `None` means no rewards configured.
    pub fn rewards_for_level(&self, level: i64) -> Option<&LevelRewards> {
        self.rewards.rewards_for(level)
    }

    /// Variant channels for a cosmetic, matched case-insensitively.
    /// Empty when the catalog knows no variants for the template.
    pub fn variants_for(&self, template_id: &str) -> Vec<serde_json::Value> {
        self.variants.variants_for(template_id)
    }
}
