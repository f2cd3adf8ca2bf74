//! # Difficulty Results
//!
//! Output records produced by the engine. Built once per calculation and
//! never mutated afterwards.

use crate::{ChallengeRating, Statline};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named difficulty bucket for an encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyTier {
    Trivial,
    Easy,
    Medium,
    Hard,
    Deadly,
    #[serde(rename = "TPK Risk")]
    TpkRisk,
}

impl DifficultyTier {
    /// Classifies an encounter; the first matching rule wins.
    ///
    /// Boundary values belong to the less severe tier.
    ///
    /// # Examples
    ///
    /// ```
    /// use lorekeeper::DifficultyTier;
    ///
    /// assert_eq!(DifficultyTier::classify(2.5, 3), DifficultyTier::Easy);
    /// assert_eq!(DifficultyTier::classify(0.5, 1), DifficultyTier::Trivial);
    /// ```
    pub fn classify(survival_ratio: f64, rounds_to_defeat_enemies: u32) -> Self {
        if survival_ratio >= 4.0 || rounds_to_defeat_enemies <= 1 {
            Self::Trivial
        } else if survival_ratio >= 2.5 {
            Self::Easy
        } else if survival_ratio >= 1.5 {
            Self::Medium
        } else if survival_ratio >= 1.0 {
            Self::Hard
        } else if survival_ratio >= 0.6 {
            Self::Deadly
        } else {
            Self::TpkRisk
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Trivial => "Trivial",
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Deadly => "Deadly",
            Self::TpkRisk => "TPK Risk",
        }
    }

    /// Hex display colour used by the encounter views.
    pub fn color(self) -> &'static str {
        match self {
            Self::Trivial => "#888888",
            Self::Easy => "#00aa00",
            Self::Medium => "#aaaa00",
            Self::Hard => "#ff8800",
            Self::Deadly => "#ff0000",
            Self::TpkRisk => "#880000",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a combatant's numbers came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatSource {
    /// Explicit hp/ac on the combatant, damage from statblock or table
    Manual,
    Statblock,
    ChallengeTable,
    Trap,
}

/// One enemy entry as the engine resolved it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCombatant {
    pub name: String,
    pub count: u32,
    /// Per-unit numbers before multiplying by `count`
    pub statline: Statline,
    pub cr: ChallengeRating,
    pub source: StatSource,
    /// Whether this entry's HP counts toward the enemy pool
    pub counts_toward_hp: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyStats {
    #[serde(rename = "totalHP")]
    pub total_hp: f64,
    #[serde(rename = "avgAC")]
    pub avg_ac: f64,
    #[serde(rename = "totalDPR")]
    pub total_dpr: f64,
    pub avg_attack_bonus: f64,
    pub count: u32,
    #[serde(rename = "totalXP")]
    pub total_xp: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyStats {
    #[serde(rename = "totalHP")]
    pub total_hp: f64,
    #[serde(rename = "avgAC")]
    pub avg_ac: f64,
    #[serde(rename = "totalDPR")]
    pub total_dpr: f64,
    pub avg_attack_bonus: f64,
    pub count: u32,
    pub avg_level: f64,
    /// True when no party was supplied and the default party stood in
    pub used_default_party: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyAnalysis {
    pub party_hit_chance: f64,
    pub enemy_hit_chance: f64,
    #[serde(rename = "partyEffectiveDPR")]
    pub party_effective_dpr: f64,
    #[serde(rename = "enemyEffectiveDPR")]
    pub enemy_effective_dpr: f64,
    pub party_action_economy_mod: f64,
    pub enemy_action_economy_mod: f64,
    pub rounds_to_defeat_enemies: u32,
    pub rounds_to_defeat_party: u32,
    pub survival_ratio: f64,
    pub difficulty: DifficultyTier,
    pub difficulty_color: String,
    pub summary: String,
}

/// Complete output of one difficulty calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyResult {
    pub enemy_stats: EnemyStats,
    pub party_stats: PartyStats,
    pub analysis: DifficultyAnalysis,
    pub enemies: Vec<ResolvedCombatant>,
}

impl DifficultyResult {
    pub fn difficulty(&self) -> DifficultyTier {
        self.analysis.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_belong_to_less_severe_tier() {
        assert_eq!(DifficultyTier::classify(4.0, 5), DifficultyTier::Trivial);
        assert_eq!(DifficultyTier::classify(2.5, 5), DifficultyTier::Easy);
        assert_eq!(DifficultyTier::classify(1.5, 5), DifficultyTier::Medium);
        assert_eq!(DifficultyTier::classify(1.0, 5), DifficultyTier::Hard);
        assert_eq!(DifficultyTier::classify(0.6, 5), DifficultyTier::Deadly);
        assert_eq!(DifficultyTier::classify(0.59, 5), DifficultyTier::TpkRisk);
    }

    #[test]
    fn test_just_below_boundaries() {
        assert_eq!(DifficultyTier::classify(3.99, 5), DifficultyTier::Easy);
        assert_eq!(DifficultyTier::classify(2.49, 5), DifficultyTier::Medium);
        assert_eq!(DifficultyTier::classify(1.49, 5), DifficultyTier::Hard);
        assert_eq!(DifficultyTier::classify(0.99, 5), DifficultyTier::Deadly);
    }

    #[test]
    fn test_single_round_fight_is_trivial() {
        assert_eq!(DifficultyTier::classify(0.1, 1), DifficultyTier::Trivial);
        assert_eq!(DifficultyTier::classify(0.1, 2), DifficultyTier::TpkRisk);
    }

    #[test]
    fn test_labels_and_colors() {
        assert_eq!(DifficultyTier::TpkRisk.label(), "TPK Risk");
        assert_eq!(DifficultyTier::TpkRisk.color(), "#880000");
        assert_eq!(DifficultyTier::Medium.to_string(), "Medium");
        assert_eq!(
            serde_json::to_string(&DifficultyTier::TpkRisk).unwrap(),
            "\"TPK Risk\""
        );
    }
}
