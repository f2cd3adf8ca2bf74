//! # Character Level Estimates
//!
//! Closed-form estimates of a player character's combat numbers by level.

use crate::Statline;

/// Proficiency bonus for a character level (+2 at levels 1-4, +6 at 17-20).
pub fn proficiency_bonus(level: u32) -> u32 {
    level.saturating_sub(1) / 4 + 2
}

/// Estimated statline for a character of the given level.
///
/// Level 0 is treated as level 1.
///
/// # Examples
///
/// ```
/// use lorekeeper::tables::level_stats;
///
/// let stats = level_stats(3);
/// assert_eq!(stats.hp, 18.0);
/// assert_eq!(stats.ac, 12.0);
/// assert_eq!(stats.dpr, 13.0);
/// assert_eq!(stats.attack_bonus, 4.0);
/// ```
pub fn level_stats(level: u32) -> Statline {
    let level = level.max(1);
    let steps = f64::from(level - 1);
    Statline {
        hp: 8.0 + 5.0 * steps,
        ac: f64::from(12 + level / 4),
        dpr: 8.0 + 2.5 * steps,
        attack_bonus: f64::from(2 + proficiency_bonus(level)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proficiency_progression() {
        assert_eq!(proficiency_bonus(1), 2);
        assert_eq!(proficiency_bonus(4), 2);
        assert_eq!(proficiency_bonus(5), 3);
        assert_eq!(proficiency_bonus(9), 4);
        assert_eq!(proficiency_bonus(13), 5);
        assert_eq!(proficiency_bonus(17), 6);
        assert_eq!(proficiency_bonus(20), 6);
    }

    #[test]
    fn test_level_one_and_twenty() {
        let first = level_stats(1);
        assert_eq!(first, Statline::new(8.0, 12.0, 8.0, 4.0));

        let twentieth = level_stats(20);
        assert_eq!(twentieth.hp, 103.0);
        assert_eq!(twentieth.ac, 17.0);
        assert_eq!(twentieth.dpr, 55.5);
        assert_eq!(twentieth.attack_bonus, 8.0);
    }

    #[test]
    fn test_level_zero_is_clamped() {
        assert_eq!(level_stats(0), level_stats(1));
    }
}
