//! # Challenge Rating
//!
//! Challenge ratings are stored as whole eighths so fractional ratings
//! ("1/8", "1/4", "1/2") compare and index without repeated string parsing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A creature challenge rating in the range 0..=30.
///
/// # Examples
///
/// ```
/// use lorekeeper::ChallengeRating;
///
/// let goblin: ChallengeRating = "1/4".parse().unwrap();
/// assert_eq!(goblin.as_f64(), 0.25);
/// assert_eq!(goblin.to_string(), "1/4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChallengeRating(u16);

impl ChallengeRating {
    pub const ZERO: Self = Self(0);
    pub const EIGHTH: Self = Self(1);
    pub const QUARTER: Self = Self(2);
    pub const HALF: Self = Self(4);
    pub const MAX: Self = Self(30 * 8);

    /// Creates a whole-number challenge rating, clamped to 30.
    pub fn whole(cr: u16) -> Self {
        Self(cr.min(30) * 8)
    }

    /// Table construction only; callers must pass a rating that exists.
    pub(crate) const fn from_eighths_unchecked(eighths: u16) -> Self {
        Self(eighths)
    }

    /// Returns the rating in eighths (CR 1/4 is 2, CR 3 is 24).
    pub fn eighths(self) -> u16 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 8.0
    }

    /// Builds a rating from a numeric value, accepting only the values the
    /// rating scale actually contains.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let eighths = value * 8.0;
        if eighths.fract() != 0.0 || eighths > f64::from(Self::MAX.0) {
            return None;
        }
        let candidate = Self(eighths as u16);
        candidate.is_valid().then_some(candidate)
    }

    /// Parses a rating, substituting CR 1/4 for anything unrecognised.
    pub fn parse_or_default(text: Option<&str>) -> Self {
        text.and_then(|t| t.parse().ok()).unwrap_or_default()
    }

    fn is_valid(self) -> bool {
        matches!(self.0, 0 | 1 | 2 | 4) || (self.0 % 8 == 0 && self.0 <= Self::MAX.0)
    }
}

impl Default for ChallengeRating {
    fn default() -> Self {
        Self::QUARTER
    }
}

impl fmt::Display for ChallengeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1 => write!(f, "1/8"),
            2 => write!(f, "1/4"),
            4 => write!(f, "1/2"),
            eighths => write!(f, "{}", eighths / 8),
        }
    }
}

/// Error returned when a string is not a recognised challenge rating.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised challenge rating: {0:?}")]
pub struct ParseChallengeRatingError(String);

impl FromStr for ChallengeRating {
    type Err = ParseChallengeRatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let rating = match trimmed {
            "1/8" | "0.125" => Some(Self::EIGHTH),
            "1/4" | "0.25" => Some(Self::QUARTER),
            "1/2" | "0.5" => Some(Self::HALF),
            whole => whole
                .parse::<u16>()
                .ok()
                .filter(|cr| *cr <= 30)
                .map(Self::whole),
        };
        rating.ok_or_else(|| ParseChallengeRatingError(trimmed.to_string()))
    }
}

impl Serialize for ChallengeRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ChallengeRating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Saved records carry CR either as a string ("1/4") or a bare number (5).
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(f64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
            Raw::Number(value) => Self::from_f64(value).ok_or_else(|| {
                serde::de::Error::custom(format!("unrecognised challenge rating: {value}"))
            }),
        }
    }
}
