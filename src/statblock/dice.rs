//! # Dice Notation
//!
//! Average-damage parsing for dice expressions as they appear in statblocks
//! and trap notes ("4d10", "2d6+3", "3d8 fire", "15").

use regex::Regex;
use std::sync::LazyLock;

static DICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*d\s*(\d+)(?:\s*([+-])\s*(\d+))?").expect("Invalid dice regex pattern")
});

static TRAILING_WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+[A-Za-z]+\s*$").expect("Invalid trailing word regex pattern")
});

static LEADING_INTEGER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(-?\d+)").expect("Invalid leading integer regex pattern")
});

/// A parsed `NdM[+-B]` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceExpression {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
}

impl DiceExpression {
    /// Finds the first dice expression anywhere in `text`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lorekeeper::statblock::DiceExpression;
    ///
    /// let expr = DiceExpression::find("Hit: 7 (2d6 + 3) slashing damage").unwrap();
    /// assert_eq!((expr.count, expr.sides, expr.modifier), (2, 6, 3));
    /// ```
    pub fn find(text: &str) -> Option<Self> {
        let caps = DICE_PATTERN.captures(text)?;
        let count = caps[1].parse().ok()?;
        let sides = caps[2].parse().ok()?;
        let modifier = match (caps.get(3), caps.get(4)) {
            (Some(sign), Some(value)) => {
                let value: i32 = value.as_str().parse().ok()?;
                if sign.as_str() == "-" {
                    -value
                } else {
                    value
                }
            }
            _ => 0,
        };
        Some(Self {
            count,
            sides,
            modifier,
        })
    }

    /// Unrounded average of the dice alone, `N × (M+1) / 2`.
    pub fn dice_average(&self) -> f64 {
        f64::from(self.count) * (f64::from(self.sides) + 1.0) / 2.0
    }

    /// Average with the modifier applied; the dice part is floored first.
    pub fn average(&self) -> f64 {
        self.dice_average().floor() + f64::from(self.modifier)
    }
}

/// Returns the leading integer run of `text` ("45 (6d10+12)" gives 45).
pub fn leading_integer(text: &str) -> Option<i64> {
    LEADING_INTEGER_PATTERN
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
}

/// Average damage of a damage string, or 0 when nothing parses.
///
/// A trailing damage-type word is dropped, then the first dice expression
/// wins; otherwise the text is read as a flat number.
///
/// # Examples
///
/// ```
/// use lorekeeper::statblock::damage_average;
///
/// assert_eq!(damage_average("4d10"), 22.0);
/// assert_eq!(damage_average("2d6+3"), 10.0);
/// assert_eq!(damage_average("1d4-1"), 1.0);
/// assert_eq!(damage_average("15"), 15.0);
/// assert_eq!(damage_average("3d6 fire"), 10.0);
/// ```
pub fn damage_average(text: &str) -> f64 {
    let stripped = TRAILING_WORD_PATTERN.replace(text.trim(), "");
    if let Some(expr) = DiceExpression::find(&stripped) {
        return expr.average().max(0.0);
    }
    leading_integer(&stripped)
        .map(|value| value.max(0) as f64)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dice_expression_find() {
        let expr = DiceExpression::find("1d4-1").unwrap();
        assert_eq!(expr.modifier, -1);
        assert_eq!(expr.average(), 1.0);

        let expr = DiceExpression::find("roll 3D8").unwrap();
        assert_eq!((expr.count, expr.sides, expr.modifier), (3, 8, 0));
        assert_eq!(expr.dice_average(), 13.5);
        assert_eq!(expr.average(), 13.0);

        assert!(DiceExpression::find("no dice here").is_none());
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(leading_integer("45 (6d10+12)"), Some(45));
        assert_eq!(leading_integer("  17 (natural armor)"), Some(17));
        assert_eq!(leading_integer("natural armor 17"), None);
        assert_eq!(leading_integer(""), None);
    }

    #[test]
    fn test_damage_average_variants() {
        assert_eq!(damage_average("4d10"), 22.0);
        assert_eq!(damage_average("2d6+3"), 10.0);
        assert_eq!(damage_average("2d6 + 3"), 10.0);
        assert_eq!(damage_average("1d4-1"), 1.0);
        assert_eq!(damage_average("15"), 15.0);
        assert_eq!(damage_average("10 poison"), 10.0);
        assert_eq!(damage_average("22 (4d10) fire"), 22.0);
    }

    #[test]
    fn test_damage_average_unparseable_is_zero() {
        assert_eq!(damage_average(""), 0.0);
        assert_eq!(damage_average("see text"), 0.0);
        assert_eq!(damage_average("1d4-9"), 0.0);
    }
}
