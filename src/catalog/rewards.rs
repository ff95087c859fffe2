//! Level-indexed season reward table.
//!
//! The file shape is `{"freeRewards": [...], "paidRewards": [...]}` where
//! each array is indexed by `level - 1` and each entry maps a reward key
//! (catalog template id or the currency sentinel) to a quantity. Iteration
//! order is the table-defined order, which the grant engine relies on for
//! deterministic processing.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

#[derive(Deserialize)]
struct SeasonFile {
    #[serde(rename = "freeRewards", default)]
    free_rewards: Vec<Map<String, Value>>,
    #[serde(rename = "paidRewards", default)]
    paid_rewards: Vec<Map<String, Value>>,
}

/// Reward sets for one level.
#[derive(Debug, Clone, Default)]
pub struct LevelRewards {
    pub free: Vec<(String, i64)>,
    pub paid: Vec<(String, i64)>,
}

pub struct RewardTable {
    levels: Vec<LevelRewards>,
}

impl RewardTable {
    pub fn parse(json: &str) -> Result<RewardTable, serde_json::Error> {
        let file: SeasonFile = serde_json::from_str(json)?;
        let len = file.free_rewards.len().max(file.paid_rewards.len());
        let mut levels = Vec::with_capacity(len);
        for idx in 0..len {
            levels.push(LevelRewards {
                free: flatten(file.free_rewards.get(idx), idx),
                paid: flatten(file.paid_rewards.get(idx), idx),
            });
        }
        Ok(RewardTable { levels })
    }

    pub fn from_levels(levels: Vec<LevelRewards>) -> RewardTable {
        RewardTable { levels }
    }

    /// Rewards for reaching `level`; `None` when the table holds nothing
    /// for it (beyond the table or level < 1).
    pub fn rewards_for(&self, level: i64) -> Option<&LevelRewards> {
        if level < 1 {
            return None;
        }
        self.levels.get((level - 1) as usize)
    }
}

/// One reward object → ordered (key, quantity) pairs. Non-integer
/// quantities are configuration mistakes; skip them loudly.
fn flatten(entry: Option<&Map<String, Value>>, idx: usize) -> Vec<(String, i64)> {
    let Some(entry) = entry else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(entry.len());
    for (key, value) in entry {
        match value.as_i64() {
            Some(quantity) => out.push((key.clone(), quantity)),
            None => {
                warn!(target: "catalog.rewards", level = idx + 1, key = %key, "skipping reward with non-integer quantity");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_indexed_rewards_in_table_order() {
        let table = RewardTable::parse(
            r#"{
                "freeRewards": [
                    {"AthenaGlider:umbrella": 1, "Currency:MtxPurchase": 100}
                ],
                "paidRewards": [
                    {"AthenaCharacter:cid_017": 1}
                ]
            }"#,
        )
        .unwrap();
        let level_one = table.rewards_for(1).unwrap();
        assert_eq!(
            level_one.free,
            vec![
                ("AthenaGlider:umbrella".to_string(), 1),
                ("Currency:MtxPurchase".to_string(), 100)
            ]
        );
        assert_eq!(level_one.paid, vec![("AthenaCharacter:cid_017".to_string(), 1)]);
        assert!(table.rewards_for(2).is_none());
        assert!(table.rewards_for(0).is_none());
    }
}
