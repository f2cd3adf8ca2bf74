//! # Statblock Parser
//!
//! Turns an authored statblock into a per-unit [`Statline`]. Structured
//! numeric fields win over free text; when no action yields any damage the
//! parser gives up so the caller can fall back to the challenge rating table.

use super::dice::{leading_integer, DiceExpression};
use super::{StatValue, Statblock, StatblockAction};
use crate::Statline;
use regex::Regex;
use std::sync::LazyLock;

static TO_HIT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([+-]\d+)\s+to\s+hit").expect("Invalid to-hit regex pattern")
});

static AVERAGE_DAMAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*\(\s*\d+\s*d\s*\d+[^)]*\)").expect("Invalid average damage regex pattern")
});

static MULTIATTACK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)makes?\s+(two|three|four|five|\d+)\s+.*?attack")
        .expect("Invalid multiattack regex pattern")
});

const DEFAULT_HP: f64 = 0.0;
const DEFAULT_AC: f64 = 10.0;

/// Parses a statblock into a statline, or `None` when it deals no damage.
pub fn parse_statline(block: &Statblock) -> Option<Statline> {
    let mut total_dpr = 0.0;
    let mut best_attack_bonus: Option<i32> = None;

    for action in &block.actions {
        total_dpr += action_damage(action);
        if let Some(bonus) = action_attack_bonus(action) {
            best_attack_bonus = Some(best_attack_bonus.map_or(bonus, |best| best.max(bonus)));
        }
    }

    if let Some(attacks) = multiattack_count(&block.actions) {
        total_dpr *= f64::from(attacks);
    }

    if total_dpr == 0.0 {
        return None;
    }

    let attack_bonus = match best_attack_bonus {
        Some(bonus) => f64::from(bonus),
        None => (total_dpr / 5.0).floor().max(2.0),
    };

    Some(Statline {
        hp: stat_value(block.hp.as_ref()).unwrap_or(DEFAULT_HP),
        ac: stat_value(block.ac.as_ref()).unwrap_or(DEFAULT_AC),
        dpr: total_dpr,
        attack_bonus,
    })
}

fn stat_value(value: Option<&StatValue>) -> Option<f64> {
    match value? {
        StatValue::Number(n) => Some(*n),
        StatValue::Text(text) => leading_integer(text).map(|n| n as f64),
    }
}

fn action_attack_bonus(action: &StatblockAction) -> Option<i32> {
    if action.attack_bonus.is_some() {
        return action.attack_bonus;
    }
    let desc = action.desc.as_deref()?;
    TO_HIT_PATTERN
        .captures(desc)
        .and_then(|caps| caps[1].parse().ok())
}

fn action_damage(action: &StatblockAction) -> f64 {
    if let Some(expr) = action.damage_dice.as_deref().and_then(DiceExpression::find) {
        let bonus = action.damage_bonus.unwrap_or(0) + expr.modifier;
        return if bonus != 0 {
            expr.dice_average().floor() + f64::from(bonus)
        } else {
            expr.dice_average()
        };
    }

    let Some(desc) = action.desc.as_deref() else {
        return 0.0;
    };
    if let Some(caps) = AVERAGE_DAMAGE_PATTERN.captures(desc) {
        if let Ok(average) = caps[1].parse::<f64>() {
            return average;
        }
    }
    DiceExpression::find(desc)
        .map(|expr| expr.average().max(0.0))
        .unwrap_or(0.0)
}

/// Number of attacks granted by a Multiattack action, if the block has one.
fn multiattack_count(actions: &[StatblockAction]) -> Option<u32> {
    actions
        .iter()
        .filter(|action| action.name.to_lowercase().contains("multiattack"))
        .find_map(|action| {
            let caps = MULTIATTACK_PATTERN.captures(action.desc.as_deref()?)?;
            let word = caps[1].to_lowercase();
            Some(match word.as_str() {
                "two" => 2,
                "three" => 3,
                "four" => 4,
                "five" => 5,
                digits => digits.parse().unwrap_or(1),
            })
        })
}
