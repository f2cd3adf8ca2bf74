//! # Side Aggregation
//!
//! Resolves each enemy and party member to a statline and folds them into
//! per-side totals and averages.

use super::result::{EnemyStats, PartyStats, ResolvedCombatant, StatSource};
use crate::config::{DEFAULT_ENEMY_AC, DEFAULT_ENEMY_ATTACK_BONUS, MAX_CHARACTER_LEVEL};
use crate::statblock::StatblockResolver;
use crate::tables::{cr_stats, level_stats};
use crate::traps::trap_stats;
use crate::{ChallengeRating, Combatant, PartyMember, Statline, Trap};
use log::{debug, trace};

/// Resolves one enemy entry to per-unit numbers.
///
/// Creatures take explicit hp/ac first, then statblock values, then the
/// challenge rating table. Damage and attack bonus never come from the
/// explicit fields since those carry no damage information.
pub fn resolve_enemy<S: StatblockResolver + ?Sized>(
    combatant: &Combatant,
    statblocks: &S,
) -> ResolvedCombatant {
    let resolved = if combatant.is_trap {
        resolve_trap(combatant)
    } else {
        resolve_creature(combatant, statblocks)
    };
    trace!(
        "{} x{} resolved from {:?}: {:?}",
        resolved.name,
        resolved.count,
        resolved.source,
        resolved.statline
    );
    resolved
}

fn resolve_creature<S: StatblockResolver + ?Sized>(
    combatant: &Combatant,
    statblocks: &S,
) -> ResolvedCombatant {
    let cr = parse_cr(combatant);
    let table = cr_stats(cr).statline();

    let parsed = combatant.statblock_ref().and_then(|reference| {
        let statline = statblocks.resolve_statblock(reference);
        if statline.is_none() {
            debug!(
                "No usable statblock for {:?}, falling back to CR {} estimates",
                reference, cr
            );
        }
        statline
    });

    let explicit_hp = positive(combatant.hp);
    let explicit_ac = positive(combatant.ac);

    let source = if explicit_hp.is_some() || explicit_ac.is_some() {
        StatSource::Manual
    } else if parsed.is_some() {
        StatSource::Statblock
    } else {
        StatSource::ChallengeTable
    };

    let statline = Statline {
        hp: explicit_hp
            .or_else(|| parsed.and_then(|s| positive(Some(s.hp))))
            .unwrap_or(table.hp),
        ac: explicit_ac
            .or_else(|| parsed.and_then(|s| positive(Some(s.ac))))
            .unwrap_or(table.ac),
        dpr: parsed.map_or(table.dpr, |s| s.dpr),
        attack_bonus: parsed.map_or(table.attack_bonus, |s| s.attack_bonus),
    };

    ResolvedCombatant {
        name: combatant.name.clone(),
        count: combatant.stack_size(),
        statline,
        cr,
        source,
        counts_toward_hp: true,
    }
}

fn resolve_trap(combatant: &Combatant) -> ResolvedCombatant {
    let fallback = Trap::default();
    let trap = combatant.trap_data.as_ref().unwrap_or_else(|| {
        debug!("Trap {:?} has no trap data, treating it as harmless", combatant.name);
        &fallback
    });

    let stats = trap_stats(trap);
    let mut statline = stats.statline;
    if let Some(ac) = positive(combatant.ac) {
        statline.ac = ac;
    }
    let cr = combatant
        .cr
        .as_deref()
        .and_then(|text| text.parse().ok())
        .unwrap_or(stats.cr);

    ResolvedCombatant {
        name: combatant.name.clone(),
        count: combatant.stack_size(),
        statline,
        cr,
        source: StatSource::Trap,
        counts_toward_hp: false,
    }
}

fn parse_cr(combatant: &Combatant) -> ChallengeRating {
    match combatant.cr.as_deref() {
        Some(text) => text.parse().unwrap_or_else(|err| {
            debug!("{} for {:?}, using CR 1/4", err, combatant.name);
            ChallengeRating::default()
        }),
        None => ChallengeRating::default(),
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v > 0.0)
}

/// Totals and averages for the enemy side.
pub fn enemy_stats(resolved: &[ResolvedCombatant]) -> EnemyStats {
    let mut stats = EnemyStats::default();
    let mut total_ac = 0.0;
    let mut total_attack_bonus = 0.0;

    for enemy in resolved {
        let count = f64::from(enemy.count);
        if enemy.counts_toward_hp {
            stats.total_hp += enemy.statline.hp * count;
        }
        total_ac += enemy.statline.ac * count;
        stats.total_dpr += enemy.statline.dpr * count;
        total_attack_bonus += enemy.statline.attack_bonus * count;
        stats.total_xp = stats
            .total_xp
            .saturating_add(cr_stats(enemy.cr).xp.saturating_mul(enemy.count));
        stats.count = stats.count.saturating_add(enemy.count);
    }

    if stats.count > 0 {
        stats.avg_ac = total_ac / f64::from(stats.count);
        stats.avg_attack_bonus = total_attack_bonus / f64::from(stats.count);
    } else {
        stats.avg_ac = DEFAULT_ENEMY_AC;
        stats.avg_attack_bonus = DEFAULT_ENEMY_ATTACK_BONUS;
    }
    stats
}

/// Totals and averages for the party side.
///
/// Explicit hp/ac above zero replace the level estimate; damage and attack
/// bonus always come from the level formula.
pub fn party_stats(members: &[PartyMember], used_default_party: bool) -> PartyStats {
    let mut stats = PartyStats {
        used_default_party,
        ..PartyStats::default()
    };
    let mut total_ac = 0.0;
    let mut total_attack_bonus = 0.0;
    let mut total_level = 0.0;

    for member in members {
        let level = member.level.clamp(1, MAX_CHARACTER_LEVEL);
        let estimate = level_stats(level);
        stats.total_hp += positive(member.hp).unwrap_or(estimate.hp);
        total_ac += positive(member.ac).unwrap_or(estimate.ac);
        stats.total_dpr += estimate.dpr;
        total_attack_bonus += estimate.attack_bonus;
        total_level += f64::from(level);
        stats.count += 1;
    }

    if stats.count > 0 {
        let count = f64::from(stats.count);
        stats.avg_ac = total_ac / count;
        stats.avg_attack_bonus = total_attack_bonus / count;
        stats.avg_level = total_level / count;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statblock::{NoStatblocks, Statblock, StatblockAction, StatblockLibrary, StatValue};
    use crate::{TrapElement, TrapType};

    fn library() -> StatblockLibrary {
        [Statblock::new("Bugbear")
            .with_hp(StatValue::Text("27 (5d8 + 5)".into()))
            .with_ac(StatValue::Number(16.0))
            .with_action(StatblockAction::described(
                "Morningstar",
                "Melee Weapon Attack: +4 to hit. Hit: 11 (2d8 + 2) piercing damage.",
            ))]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_creature_from_table() {
        let resolved = resolve_enemy(&Combatant::creature("Goblin", 4).with_cr("1/4"), &NoStatblocks);
        assert_eq!(resolved.source, StatSource::ChallengeTable);
        assert_eq!(resolved.statline, Statline::new(20.0, 13.0, 3.0, 3.0));
        assert_eq!(resolved.count, 4);
    }

    #[test]
    fn test_creature_from_statblock() {
        let bugbear = Combatant::creature("Bugbear", 1).with_cr("1").with_source("Bugbear");
        let resolved = resolve_enemy(&bugbear, &library());
        assert_eq!(resolved.source, StatSource::Statblock);
        assert_eq!(resolved.statline, Statline::new(27.0, 16.0, 11.0, 4.0));
    }

    #[test]
    fn test_manual_hp_keeps_statblock_damage() {
        let bugbear = Combatant::creature("Bugbear Chief", 1)
            .with_source("Bugbear")
            .with_hp(65.0);
        let resolved = resolve_enemy(&bugbear, &library());
        assert_eq!(resolved.source, StatSource::Manual);
        assert_eq!(resolved.statline, Statline::new(65.0, 16.0, 11.0, 4.0));
    }

    #[test]
    fn test_manual_ac_with_table_damage() {
        let guard = Combatant::creature("Guard", 2).with_cr("1/8").with_ac(16.0);
        let resolved = resolve_enemy(&guard, &NoStatblocks);
        assert_eq!(resolved.statline, Statline::new(10.0, 16.0, 2.0, 3.0));
    }

    #[test]
    fn test_missing_statblock_falls_back_to_table() {
        let ghost = Combatant::creature("Ghost", 1).with_cr("4").with_source("Ghost");
        let resolved = resolve_enemy(&ghost, &library());
        assert_eq!(resolved.source, StatSource::ChallengeTable);
        assert_eq!(resolved.statline.hp, 115.0);
    }

    #[test]
    fn test_unknown_cr_defaults_to_quarter() {
        let odd = Combatant::creature("Oddity", 1).with_cr("9000");
        let resolved = resolve_enemy(&odd, &NoStatblocks);
        assert_eq!(resolved.cr, ChallengeRating::QUARTER);
        assert_eq!(resolved.statline.hp, 20.0);
    }

    #[test]
    fn test_traps_stay_out_of_hp_pool() {
        let trap = Trap::new(TrapType::Simple, None)
            .with_element(TrapElement::new("Darts").with_damage("2d4").with_attack_bonus(6));
        let resolved = vec![
            resolve_enemy(&Combatant::creature("Goblin", 2).with_cr("1/4"), &NoStatblocks),
            resolve_enemy(&Combatant::trap("Dart Trap", trap).with_ac(12.0), &NoStatblocks),
        ];
        assert_eq!(resolved[1].statline.ac, 12.0);

        let stats = enemy_stats(&resolved);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.total_hp, 40.0);
        assert_eq!(stats.total_dpr, 6.0 + 5.0);
        assert_eq!(stats.avg_ac, (13.0 * 2.0 + 12.0) / 3.0);
        assert_eq!(stats.avg_attack_bonus, (3.0 * 2.0 + 6.0) / 3.0);
    }

    #[test]
    fn test_enemy_xp_totals() {
        let resolved = vec![
            resolve_enemy(&Combatant::creature("Goblin", 4).with_cr("1/4"), &NoStatblocks),
            resolve_enemy(&Combatant::creature("Hobgoblin Captain", 1).with_cr("3"), &NoStatblocks),
        ];
        assert_eq!(enemy_stats(&resolved).total_xp, 4 * 50 + 700);
    }

    #[test]
    fn test_huge_stacks_saturate_totals() {
        let resolved = vec![
            resolve_enemy(&Combatant::creature("Tarrasque", 30_000).with_cr("30"), &NoStatblocks),
            resolve_enemy(&Combatant::creature("Rat", u32::MAX).with_cr("0"), &NoStatblocks),
            resolve_enemy(&Combatant::creature("Rat", 2).with_cr("0"), &NoStatblocks),
        ];
        let stats = enemy_stats(&resolved);
        assert_eq!(stats.total_xp, u32::MAX);
        assert_eq!(stats.count, u32::MAX);
        assert!(stats.total_hp > 0.0);
    }

    #[test]
    fn test_empty_enemy_side_defaults() {
        let stats = enemy_stats(&[]);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.total_hp, 0.0);
        assert_eq!(stats.avg_ac, 13.0);
        assert_eq!(stats.avg_attack_bonus, 3.0);
    }

    #[test]
    fn test_party_explicit_values_override_estimates() {
        let party = vec![
            PartyMember::new(3),
            PartyMember::new(5).with_hp(44.0).with_ac(18.0),
            PartyMember::new(5).with_hp(0.0),
        ];
        let stats = party_stats(&party, false);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.total_hp, 18.0 + 44.0 + 28.0);
        assert_eq!(stats.avg_ac, (12.0 + 18.0 + 13.0) / 3.0);
        assert_eq!(stats.total_dpr, 13.0 + 18.0 + 18.0);
        assert_eq!(stats.avg_level, 13.0 / 3.0);
    }

    #[test]
    fn test_party_levels_are_clamped() {
        let stats = party_stats(&[PartyMember::new(0), PartyMember::new(25)], false);
        assert_eq!(stats.avg_level, 10.5);
        assert_eq!(stats.total_hp, 8.0 + 103.0);
    }
}
