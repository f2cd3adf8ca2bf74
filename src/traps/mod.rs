//! # Traps Module
//!
//! Converts a trap's elements into a creature-equivalent statline so traps can
//! sit in the same encounter math as monsters.
//!
//! Trap HP is reported for completeness but the engine keeps traps out of the
//! enemy HP pool: a trap is a hazard to survive, not something to whittle down.

pub mod targeting;

pub use targeting::*;

use crate::statblock::damage_average;
use crate::tables::{estimate_cr_from_dpr, estimate_cr_from_save_dc};
use crate::{ChallengeRating, Statline, ThreatLevel, Trap, TrapType};
use serde::Serialize;

const BASE_TRAP_AC: f64 = 15.0;
const DEFAULT_TRAP_ATTACK_BONUS: f64 = 5.0;

/// Creature-equivalent numbers for a trap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrapStats {
    pub statline: Statline,
    pub cr: ChallengeRating,
    /// Largest number of targets any element is expected to hit
    pub targets: u32,
}

/// Aggregates a trap's elements into a single statline and challenge rating.
///
/// # Examples
///
/// ```
/// use lorekeeper::{Trap, TrapElement, TrapType};
/// use lorekeeper::traps::trap_stats;
///
/// let trap = Trap::new(TrapType::Simple, None).with_element(
///     TrapElement::new("Fire jet")
///         .with_damage("4d10 fire")
///         .with_effect("Flame fills a 20-foot radius"),
/// );
/// let stats = trap_stats(&trap);
/// assert_eq!(stats.targets, 3);
/// assert_eq!(stats.statline.dpr, 66.0);
/// ```
pub fn trap_stats(trap: &Trap) -> TrapStats {
    let mut total_damage = 0.0;
    let mut max_dc = 0;
    let mut max_attack_bonus = 0;
    let mut targets = 1;

    for element in &trap.elements {
        total_damage += element.damage.as_deref().map_or(0.0, damage_average);
        total_damage += element.additional_damage.as_deref().map_or(0.0, damage_average);
        max_dc = max_dc.max(element.save_dc.unwrap_or(0));
        max_attack_bonus = max_attack_bonus.max(element.attack_bonus.unwrap_or(0));
        targets = targets.max(element.effect.as_deref().map_or(1, estimate_targets));
    }

    let mut dpr = total_damage;
    if targets > 1 {
        dpr *= f64::from(targets);
    }
    if let Some(threat) = trap.threat_level {
        dpr *= threat.dpr_multiplier();
    }

    let attack_bonus = if max_attack_bonus > 0 {
        f64::from(max_attack_bonus)
    } else if max_dc > 0 {
        (f64::from(max_dc - 8) / 0.8).floor()
    } else {
        DEFAULT_TRAP_ATTACK_BONUS
    };

    let mut ac = BASE_TRAP_AC;
    if trap.trap_type == TrapType::Complex {
        ac += 2.0;
    }
    match trap.threat_level {
        Some(ThreatLevel::Dangerous) => ac += 1.0,
        Some(ThreatLevel::Deadly) => ac += 2.0,
        _ => {}
    }

    let mut hp = (dpr * 2.0).floor().max(1.0);
    match trap.threat_level {
        Some(ThreatLevel::Dangerous) => hp *= 1.5,
        Some(ThreatLevel::Deadly) => hp *= 2.0,
        _ => {}
    }

    TrapStats {
        statline: Statline {
            hp,
            ac,
            dpr,
            attack_bonus,
        },
        cr: estimate_trap_cr(dpr, max_dc, max_attack_bonus),
        targets,
    }
}

/// Blends the damage-based rating with the DC-based one when the trap has a
/// save DC or attack bonus. An attack bonus counts as DC `bonus + 10`.
fn estimate_trap_cr(dpr: f64, max_dc: i32, max_attack_bonus: i32) -> ChallengeRating {
    let by_damage = estimate_cr_from_dpr(dpr);
    let dc = if max_dc > 0 {
        max_dc
    } else if max_attack_bonus > 0 {
        max_attack_bonus.saturating_add(10)
    } else {
        return by_damage;
    };

    let by_dc = estimate_cr_from_save_dc(dc);
    let blended = ((by_damage.as_f64() + by_dc.as_f64()) / 2.0).round();
    ChallengeRating::whole(blended as u16)
}
