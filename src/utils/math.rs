//! # Combat Mathematics
//!
//! Probability and attrition formulas shared by the difficulty engine.
//! Every function here is pure and total.

use crate::config::NEVER_ROUNDS;

/// Lowest chance any attack has to land.
pub const MIN_HIT_CHANCE: f64 = 0.05;
/// Highest chance any attack has to land.
pub const MAX_HIT_CHANCE: f64 = 0.95;

/// Probability that a d20 attack with `attack_bonus` meets `target_ac`.
///
/// The roll needed is clamped to 2..=20, and the result to 5%..=95%.
///
/// # Examples
///
/// ```
/// use lorekeeper::hit_chance;
///
/// assert!((hit_chance(4.0, 13.0) - 0.60).abs() < 1e-9);
/// assert_eq!(hit_chance(30.0, 10.0), 0.95);
/// assert_eq!(hit_chance(0.0, 30.0), 0.05);
/// ```
pub fn hit_chance(attack_bonus: f64, target_ac: f64) -> f64 {
    let needed = (target_ac - attack_bonus).clamp(2.0, 20.0);
    ((21.0 - needed) / 20.0).clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE)
}

const ROUNDING_TOLERANCE: f64 = 1e-9;

/// Damage per round expected to actually land.
pub fn effective_dpr(base_dpr: f64, hit_chance: f64) -> f64 {
    base_dpr * hit_chance
}

/// Whole rounds needed to chew through `total_hp` at `effective_dpr`.
///
/// Never less than 1; [`NEVER_ROUNDS`] when no damage gets through.
pub fn rounds_to_defeat(total_hp: f64, effective_dpr: f64) -> u32 {
    if effective_dpr <= 0.0 || effective_dpr.is_nan() {
        return NEVER_ROUNDS;
    }
    // Quotients a hair above a whole number are float noise, not an extra round.
    let rounds = (total_hp / effective_dpr - ROUNDING_TOLERANCE).ceil();
    if rounds >= f64::from(NEVER_ROUNDS) {
        NEVER_ROUNDS
    } else {
        (rounds as u32).max(1)
    }
}

/// Damage multipliers reflecting how many more actions one side gets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionEconomy {
    pub party_modifier: f64,
    pub enemy_modifier: f64,
}

impl ActionEconomy {
    pub const NEUTRAL: Self = Self {
        party_modifier: 1.0,
        enemy_modifier: 1.0,
    };

    /// Modifiers for a fight of `party_count` against `enemy_count` actors.
    ///
    /// Only a side outnumbering the other more than two to one gets a bonus
    /// (up to +25%) and the outnumbered side a penalty (down to -15%).
    pub fn for_counts(party_count: u32, enemy_count: u32) -> Self {
        let ratio = f64::from(party_count) / f64::from(enemy_count);
        if ratio > 2.0 {
            let (favoured, outnumbered) = Self::skew(ratio);
            Self {
                party_modifier: favoured,
                enemy_modifier: outnumbered,
            }
        } else if ratio < 0.5 {
            let (favoured, outnumbered) = Self::skew(1.0 / ratio);
            Self {
                party_modifier: outnumbered,
                enemy_modifier: favoured,
            }
        } else {
            Self::NEUTRAL
        }
    }

    fn skew(ratio: f64) -> (f64, f64) {
        let favoured = 1.0 + ((ratio - 1.0) * 0.1).min(0.25);
        let outnumbered = (1.0 - (ratio - 2.0) * 0.05).max(0.85);
        (favoured, outnumbered)
    }
}

impl Default for ActionEconomy {
    fn default() -> Self {
        Self::NEUTRAL
    }
}
