//! # Area-of-Effect Targeting
//!
//! Estimates how many party members a trap element hits from the wording of
//! its effect text.

use crate::config::ASSUMED_PARTY_SIZE;
use regex::Regex;
use std::sync::LazyLock;

const STRONG_AOE_PHRASES: [&str; 8] = [
    "each creature",
    "all creatures",
    "any creature",
    "creatures in the",
    "everyone in",
    "all targets",
    "each target",
    "all characters",
];

const MODERATE_AOE_PHRASES: [&str; 5] = [
    "creatures within",
    "multiple targets",
    "targets within",
    "nearby creatures",
    "adjacent creatures",
];

const SINGLE_TARGET_PHRASES: [&str; 5] = [
    "one target",
    "one creature",
    "single target",
    "the target",
    "a target",
];

static AREA_SIZE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)-foot[\s-]+(?:radius|cone|cube|line|sphere|cylinder)")
        .expect("Invalid area size regex pattern")
});

static WITHIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"within\s+(\d+)\s+feet").expect("Invalid within-feet regex pattern")
});

/// Estimated number of targets for one element's effect text.
///
/// Checks run in a fixed order and the first that matches decides: strong
/// group phrases, then an explicit area size, then moderate phrases, then
/// single-target phrases, then any bare mention of a target or creature.
///
/// # Examples
///
/// ```
/// use lorekeeper::traps::estimate_targets;
///
/// assert_eq!(estimate_targets("Each creature in the room takes damage"), 4);
/// assert_eq!(estimate_targets("Fills a 20-foot cube with gas"), 3);
/// assert_eq!(estimate_targets("A dart strikes one target"), 1);
/// assert_eq!(estimate_targets("The floor gives way"), 1);
/// ```
pub fn estimate_targets(effect: &str) -> u32 {
    let text = effect.to_lowercase();

    if STRONG_AOE_PHRASES.iter().any(|phrase| text.contains(phrase)) {
        return ASSUMED_PARTY_SIZE;
    }

    if let Some(feet) = area_size_feet(&text) {
        return match feet {
            30.. => 4,
            20..=29 => 3,
            10..=19 => 2,
            _ => 1,
        };
    }

    if MODERATE_AOE_PHRASES.iter().any(|phrase| text.contains(phrase)) {
        return 2;
    }

    if SINGLE_TARGET_PHRASES.iter().any(|phrase| text.contains(phrase)) {
        return 1;
    }

    if text.contains("target") || text.contains("creature") {
        return 2;
    }

    1
}

fn area_size_feet(text: &str) -> Option<u32> {
    AREA_SIZE_PATTERN
        .captures(text)
        .or_else(|| WITHIN_PATTERN.captures(text))
        .and_then(|caps| caps[1].parse().ok())
}
