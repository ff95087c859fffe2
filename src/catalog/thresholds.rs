//! Per-level XP threshold curve.
//!
//! The curve file carries explicit entries only above a rollover level, one
//! per line in the form `"10 -> 11 = 2,000 XP"`. Below the rollover the
//! fixed arithmetic early curve applies. Malformed lines are skipped with a
//! warning so a partially hand-edited file degrades loudly, not fatally.

use std::collections::HashMap;

use tracing::warn;

use crate::constants::{EARLY_LEVEL_XP_BASE, EARLY_LEVEL_XP_STEP};

pub struct CurveTable {
    explicit: HashMap<i64, f64>,
    /// Lowest level with an explicit entry; the arithmetic rule covers
    /// everything strictly below it.
    rollover: i64,
}

impl CurveTable {
    pub fn parse(text: &str) -> CurveTable {
        let mut explicit = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match parse_line(line) {
                Some((level, xp)) => {
                    explicit.insert(level, xp);
                }
                None => {
                    warn!(target: "catalog.curve", line = %line, "skipping malformed curve line");
                }
            }
        }
        let rollover = explicit.keys().copied().min().unwrap_or(i64::MAX);
        CurveTable { explicit, rollover }
    }

    pub fn from_entries(entries: &[(i64, f64)]) -> CurveTable {
        let explicit: HashMap<i64, f64> = entries.iter().copied().collect();
        let rollover = explicit.keys().copied().min().unwrap_or(i64::MAX);
        CurveTable { explicit, rollover }
    }

    /// XP required to clear `level`. Explicit table first, arithmetic early
    /// curve below the rollover, `None` for a genuine gap.
    pub fn threshold(&self, level: i64) -> Option<f64> {
        if let Some(xp) = self.explicit.get(&level) {
            return Some(*xp);
        }
        if level >= 1 && level < self.rollover {
            return Some(EARLY_LEVEL_XP_BASE + EARLY_LEVEL_XP_STEP * (level - 1) as f64);
        }
        None
    }
}

/// `"10 -> 11 = 2,000 XP"` → `(10, 2000.0)`.
fn parse_line(line: &str) -> Option<(i64, f64)> {
    let (level_part, rest) = line.split_once("->")?;
    let level: i64 = level_part.trim().parse().ok()?;
    let (_, amount_part) = rest.split_once('=')?;
    let amount = amount_part.trim().strip_suffix("XP")?.trim().replace(',', "");
    let xp: i64 = amount.parse().ok()?;
    Some((level, xp as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_line_with_thousands_separator() {
        assert_eq!(parse_line("10 -> 11 = 2,000 XP"), Some((10, 2000.0)));
        assert_eq!(parse_line("99 -> 100 = 120,500 XP"), Some((99, 120500.0)));
    }

    #[test]
    fn parse_line_rejects_garbage() {
        assert_eq!(parse_line("10 -> 11"), None);
        assert_eq!(parse_line("level ten = 2000 XP"), None);
        assert_eq!(parse_line("10 -> 11 = ? XP"), None);
    }

    #[test]
    fn early_curve_below_rollover() {
        let table = CurveTable::parse("70 -> 71 = 8,000 XP\n71 -> 72 = 8,000 XP\n");
        assert_eq!(table.threshold(70), Some(8000.0));
        // Below the rollover the arithmetic rule applies.
        assert_eq!(table.threshold(1), Some(EARLY_LEVEL_XP_BASE));
        assert_eq!(
            table.threshold(10),
            Some(EARLY_LEVEL_XP_BASE + 9.0 * EARLY_LEVEL_XP_STEP)
        );
        // Above the table, a genuine gap.
        assert_eq!(table.threshold(72), None);
    }

    #[test]
    fn empty_table_falls_back_to_early_curve() {
        let table = CurveTable::parse("");
        // No explicit entries: the early curve covers every level.
        assert_eq!(table.threshold(5), Some(EARLY_LEVEL_XP_BASE + 4.0 * EARLY_LEVEL_XP_STEP));
        assert_eq!(table.threshold(0), None);
    }
}
