use ravenpass::catalog::{CurveTable, ProgressionCatalog, RewardTable, VariantTable};
use ravenpass::progression::{apply_xp, award_for, XpAward, XpOutcome, XpReason};

fn catalog_with_curve(entries: &[(i64, f64)]) -> ProgressionCatalog {
    ProgressionCatalog::from_parts(
        CurveTable::from_entries(entries),
        RewardTable::from_levels(Vec::new()),
        VariantTable::empty(),
    )
}

#[test]
fn win_at_level_ten_stays_below_threshold() {
    let catalog = catalog_with_curve(&[(10, 2000.0)]);
    let outcome = apply_xp(&catalog, 10, 0.0, XpReason::Wins, false);
    assert_eq!(
        outcome,
        XpOutcome::Applied(XpAward {
            awarded: 437.5, // 175 + 175 * 10 * 0.15
            new_level: 10,
            new_xp: 437.5,
            leveled_up: false,
        })
    );
}

#[test]
fn donor_chest_levels_up_with_carryover() {
    let catalog = catalog_with_curve(&[(5, 1000.0)]);
    // base 50 + 50 * 5 * 1.0 = 300, donator x1.5 = 450; 900 + 450 = 1350.
    let outcome = apply_xp(&catalog, 5, 900.0, XpReason::Chests, true);
    assert_eq!(
        outcome,
        XpOutcome::Applied(XpAward {
            awarded: 450.0,
            new_level: 6,
            new_xp: 350.0, // 1350 mod 1000
            leveled_up: true,
        })
    );
}

#[test]
fn one_level_up_per_call_even_with_huge_overflow() {
    let catalog = catalog_with_curve(&[(3, 100.0), (4, 100.0)]);
    let outcome = apply_xp(&catalog, 3, 950.0, XpReason::Wins, true);
    let XpOutcome::Applied(award) = outcome else {
        panic!("expected an applied award");
    };
    // Excess XP is retained as carryover, never converted into extra levels.
    assert_eq!(award.new_level, 4);
    assert!(award.leveled_up);
    assert_eq!(award.new_xp, (950.0 + award.awarded) % 100.0);
}

#[test]
fn level_cap_is_terminal_for_every_reason() {
    let catalog = catalog_with_curve(&[(100, 8000.0)]);
    for reason in [XpReason::Kills, XpReason::Chests, XpReason::Wins] {
        assert_eq!(apply_xp(&catalog, 100, 5000.0, reason, true), XpOutcome::Capped);
        assert_eq!(apply_xp(&catalog, 117, 0.0, reason, false), XpOutcome::Capped);
    }
}

#[test]
fn missing_threshold_means_immediate_level_up() {
    // Explicit table starts at 50, so 60 is a genuine gap above the rollover.
    let catalog = catalog_with_curve(&[(50, 5000.0)]);
    let outcome = apply_xp(&catalog, 60, 10.0, XpReason::Kills, false);
    let XpOutcome::Applied(award) = outcome else {
        panic!("expected an applied award");
    };
    assert!(award.leveled_up);
    assert_eq!(award.new_level, 61);
    assert_eq!(award.new_xp, 0.0);
}

#[test]
fn award_scales_additively_then_multiplies() {
    assert_eq!(award_for(XpReason::Kills, 1, false), 27.5);
    assert_eq!(award_for(XpReason::Kills, 1, true), 41.25);
    assert_eq!(award_for(XpReason::Chests, 5, false), 300.0);
    assert_eq!(award_for(XpReason::Wins, 10, false), 437.5);
}

#[test]
fn unknown_reason_is_a_validation_error() {
    let err = "Dances".parse::<XpReason>().unwrap_err();
    assert!(matches!(err, ravenpass::EngineError::Validation(_)));
    assert!("Kills".parse::<XpReason>().is_ok());
    // Case matters: reason codes are a fixed set, not fuzzy input.
    assert!("kills".parse::<XpReason>().is_err());
}
