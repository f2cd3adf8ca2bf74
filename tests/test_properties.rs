//! Property tests for the combat math and trap aggregation.

use lorekeeper::config::NEVER_ROUNDS;
use lorekeeper::statblock::damage_average;
use lorekeeper::traps::estimate_targets;
use lorekeeper::{
    calculate_encounter_difficulty, hit_chance, rounds_to_defeat, Combatant, DifficultyTier,
    PartyMember,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_hit_chance_stays_within_bounds(attack in -20i32..40, ac in -5i32..40) {
        let chance = hit_chance(f64::from(attack), f64::from(ac));
        prop_assert!((0.05..=0.95).contains(&chance));
    }

    #[test]
    fn test_hit_chance_rises_with_attack_bonus(attack in -20i32..40, ac in 0i32..35, step in 1i32..10) {
        let base = hit_chance(f64::from(attack), f64::from(ac));
        let better = hit_chance(f64::from(attack + step), f64::from(ac));
        prop_assert!(better >= base);
    }

    #[test]
    fn test_hit_chance_falls_with_armor_class(attack in -20i32..40, ac in 0i32..35, step in 1i32..10) {
        let base = hit_chance(f64::from(attack), f64::from(ac));
        let harder = hit_chance(f64::from(attack), f64::from(ac + step));
        prop_assert!(harder <= base);
    }

    #[test]
    fn test_rounds_to_defeat_is_at_least_one(hp in 0.0f64..10_000.0, dpr in 0.01f64..500.0) {
        let rounds = rounds_to_defeat(hp, dpr);
        prop_assert!(rounds >= 1);
        prop_assert!(rounds <= NEVER_ROUNDS);
    }

    #[test]
    fn test_rounds_to_defeat_never_without_damage(hp in 0.0f64..10_000.0, dpr in -100.0f64..=0.0) {
        prop_assert_eq!(rounds_to_defeat(hp, dpr), NEVER_ROUNDS);
    }

    #[test]
    fn test_dice_average_matches_formula(count in 1u32..20, sides in 1u32..20, bonus in 0i32..10) {
        let expected = (f64::from(count) * f64::from(sides + 1) / 2.0).floor() + f64::from(bonus);
        prop_assert_eq!(damage_average(&format!("{count}d{sides}+{bonus}")), expected);
    }

    #[test]
    fn test_target_estimates_stay_within_party(text in "[a-z0-9 -]{0,60}") {
        let targets = estimate_targets(&text);
        prop_assert!((1..=4).contains(&targets));
    }

    #[test]
    fn test_more_enemies_never_make_it_easier(count in 1u32..12, level in 1u32..20) {
        let party = vec![PartyMember::new(level); 4];
        let fewer = calculate_encounter_difficulty(&[Combatant::creature("Orc", count).with_cr("1/2")], &party);
        let more = calculate_encounter_difficulty(&[Combatant::creature("Orc", count + 1).with_cr("1/2")], &party);
        prop_assert!(more.analysis.survival_ratio <= fewer.analysis.survival_ratio);
    }
}

#[test]
fn test_tier_order_follows_survival_ratio() {
    let ratios = [5.0, 3.0, 2.0, 1.2, 0.8, 0.2];
    let tiers: Vec<DifficultyTier> = ratios
        .iter()
        .map(|&ratio| DifficultyTier::classify(ratio, 5))
        .collect();
    assert_eq!(
        tiers,
        vec![
            DifficultyTier::Trivial,
            DifficultyTier::Easy,
            DifficultyTier::Medium,
            DifficultyTier::Hard,
            DifficultyTier::Deadly,
            DifficultyTier::TpkRisk,
        ]
    );
}
