//! # Engine Module
//!
//! The encounter difficulty engine. Given enemy combatants and party members
//! it aggregates both sides, derives hit chances and effective damage, works
//! out how many rounds each side needs to drop the other, and names a
//! difficulty tier.
//!
//! The engine never fails. Missing or malformed inputs degrade to table
//! defaults (CR 1/4, a level-3 party, AC 13) and the calculation carries on.

pub mod aggregate;
pub mod party;
pub mod result;

pub use aggregate::*;
pub use party::*;
pub use result::*;

use crate::config::{DEFAULT_PARTY_LEVEL, DEFAULT_PARTY_SIZE, MAX_CHARACTER_LEVEL, NEVER_ROUNDS};
use crate::statblock::{NoStatblocks, StatblockResolver};
use crate::utils::{effective_dpr, hit_chance, rounds_to_defeat, ActionEconomy};
use crate::{Combatant, LorekeeperError, LorekeeperResult, PartyMember};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable behaviour of the difficulty engine.
///
/// # Examples
///
/// ```
/// use lorekeeper::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert!(!config.enable_action_economy_adjustment);
/// assert_eq!(config.default_party_size, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Scale each side's effective damage when one side heavily outnumbers
    /// the other
    pub enable_action_economy_adjustment: bool,
    /// Size of the stand-in party used when none is supplied
    pub default_party_size: u32,
    /// Level of the stand-in party members
    pub default_party_level: u32,
}

impl EngineConfig {
    /// Plain attrition model without the action-economy step.
    pub fn new() -> Self {
        Self {
            enable_action_economy_adjustment: false,
            default_party_size: DEFAULT_PARTY_SIZE,
            default_party_level: DEFAULT_PARTY_LEVEL,
        }
    }

    /// Attrition model with the action-economy adjustment switched on.
    pub fn with_action_economy() -> Self {
        Self {
            enable_action_economy_adjustment: true,
            ..Self::new()
        }
    }

    /// Loads and validates a configuration from a JSON file.
    ///
    /// Missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> LorekeeperResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> LorekeeperResult<()> {
        if self.default_party_size == 0 {
            return Err(LorekeeperError::InvalidConfig(
                "default party size must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_CHARACTER_LEVEL).contains(&self.default_party_level) {
            return Err(LorekeeperError::InvalidConfig(format!(
                "default party level must be between 1 and {}, got {}",
                MAX_CHARACTER_LEVEL, self.default_party_level
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Encounter difficulty calculator.
///
/// The statblock resolver is injected at construction; the engine keeps no
/// state between calculations.
#[derive(Debug, Clone, Default)]
pub struct DifficultyEngine<S = NoStatblocks> {
    config: EngineConfig,
    statblocks: S,
}

impl DifficultyEngine<NoStatblocks> {
    /// Creates an engine that estimates every creature from its CR.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            statblocks: NoStatblocks,
        }
    }
}

impl<S: StatblockResolver> DifficultyEngine<S> {
    /// Creates an engine that consults `statblocks` for creature numbers.
    pub fn with_statblocks(config: EngineConfig, statblocks: S) -> Self {
        Self { config, statblocks }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Estimates the difficulty of `enemies` against `party`.
    ///
    /// An empty party is replaced by the configured default party.
    ///
    /// # Examples
    ///
    /// ```
    /// use lorekeeper::{Combatant, DifficultyEngine, DifficultyTier, EngineConfig, PartyMember};
    ///
    /// let engine = DifficultyEngine::new(EngineConfig::default());
    /// let goblins = vec![Combatant::creature("Goblin", 4).with_cr("1/4")];
    /// let party = vec![PartyMember::new(3); 4];
    ///
    /// let result = engine.calculate(&goblins, &party);
    /// assert_eq!(result.difficulty(), DifficultyTier::Easy);
    /// ```
    pub fn calculate(&self, enemies: &[Combatant], party: &[PartyMember]) -> DifficultyResult {
        let resolved: Vec<ResolvedCombatant> = enemies
            .iter()
            .map(|enemy| resolve_enemy(enemy, &self.statblocks))
            .collect();
        let enemy_stats = enemy_stats(&resolved);

        let party_stats = if party.is_empty() {
            warn!(
                "No party data found, assuming {} level-{} characters",
                self.config.default_party_size, self.config.default_party_level
            );
            let stand_in = default_party(
                self.config.default_party_size,
                self.config.default_party_level,
            );
            party_stats(&stand_in, true)
        } else {
            party_stats(party, false)
        };

        let analysis = self.analyze(&enemy_stats, &party_stats);
        info!(
            "Encounter rated {} (survival ratio {:.2})",
            analysis.difficulty, analysis.survival_ratio
        );

        DifficultyResult {
            enemy_stats,
            party_stats,
            analysis,
            enemies: resolved,
        }
    }

    /// Like [`calculate`](Self::calculate), asking `party` for the members.
    pub fn calculate_with<P: PartyResolver + ?Sized>(
        &self,
        enemies: &[Combatant],
        party: &P,
    ) -> DifficultyResult {
        self.calculate(enemies, &party.party_members())
    }

    fn analyze(&self, enemy: &EnemyStats, party: &PartyStats) -> DifficultyAnalysis {
        let party_hit_chance = hit_chance(party.avg_attack_bonus, enemy.avg_ac);
        let enemy_hit_chance = hit_chance(enemy.avg_attack_bonus, party.avg_ac);

        let economy = if self.config.enable_action_economy_adjustment {
            ActionEconomy::for_counts(party.count, enemy.count)
        } else {
            ActionEconomy::NEUTRAL
        };

        let party_effective_dpr =
            effective_dpr(party.total_dpr, party_hit_chance) * economy.party_modifier;
        let enemy_effective_dpr =
            effective_dpr(enemy.total_dpr, enemy_hit_chance) * economy.enemy_modifier;

        let rounds_to_defeat_enemies = rounds_to_defeat(enemy.total_hp, party_effective_dpr);
        let rounds_to_defeat_party = rounds_to_defeat(party.total_hp, enemy_effective_dpr);
        let survival_ratio =
            f64::from(rounds_to_defeat_party) / f64::from(rounds_to_defeat_enemies);
        let difficulty = DifficultyTier::classify(survival_ratio, rounds_to_defeat_enemies);

        DifficultyAnalysis {
            party_hit_chance,
            enemy_hit_chance,
            party_effective_dpr,
            enemy_effective_dpr,
            party_action_economy_mod: economy.party_modifier,
            enemy_action_economy_mod: economy.enemy_modifier,
            rounds_to_defeat_enemies,
            rounds_to_defeat_party,
            survival_ratio,
            difficulty,
            difficulty_color: difficulty.color().to_string(),
            summary: summarize(enemy, party, rounds_to_defeat_enemies, rounds_to_defeat_party),
        }
    }
}

fn summarize(
    enemy: &EnemyStats,
    party: &PartyStats,
    rounds_to_defeat_enemies: u32,
    rounds_to_defeat_party: u32,
) -> String {
    let mut lines = vec![
        format!(
            "Party: {} character{} (avg level {:.1}), {:.0} HP, {:.1} DPR",
            party.count,
            plural(party.count),
            party.avg_level,
            party.total_hp,
            party.total_dpr
        ),
        format!(
            "Enemies: {} combatant{}, {:.0} HP, {:.1} DPR",
            enemy.count,
            plural(enemy.count),
            enemy.total_hp,
            enemy.total_dpr
        ),
        format!(
            "Expected duration: {} (party would fall in {})",
            describe_rounds(rounds_to_defeat_enemies),
            describe_rounds(rounds_to_defeat_party)
        ),
    ];
    if party.used_default_party {
        lines.push(format!(
            "Warning: no party data found, assumed {} level-{:.0} characters",
            party.count, party.avg_level
        ));
    }
    lines.join("\n")
}

fn describe_rounds(rounds: u32) -> String {
    if rounds >= NEVER_ROUNDS {
        "never".to_string()
    } else {
        format!("{} round{}", rounds, plural(rounds))
    }
}

fn plural(n: u32) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Estimates encounter difficulty with the default configuration and no
/// statblock lookups.
pub fn calculate_encounter_difficulty(
    enemies: &[Combatant],
    party: &[PartyMember],
) -> DifficultyResult {
    DifficultyEngine::new(EngineConfig::default()).calculate(enemies, party)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn goblins(count: u32) -> Vec<Combatant> {
        vec![Combatant::creature("Goblin", count).with_cr("1/4")]
    }

    #[test]
    fn test_goblin_ambush_is_easy() {
        let party = vec![PartyMember::new(3); 4];
        let result = calculate_encounter_difficulty(&goblins(4), &party);

        assert_eq!(result.party_stats.total_hp, 72.0);
        assert_eq!(result.party_stats.total_dpr, 52.0);
        assert_eq!(result.enemy_stats.total_hp, 80.0);
        assert_eq!(result.enemy_stats.total_dpr, 12.0);
        assert!(approx(result.analysis.party_hit_chance, 0.6));
        assert!(approx(result.analysis.enemy_hit_chance, 0.6));
        assert!(approx(result.analysis.party_effective_dpr, 31.2));
        assert!(approx(result.analysis.enemy_effective_dpr, 7.2));
        assert_eq!(result.analysis.rounds_to_defeat_enemies, 3);
        assert_eq!(result.analysis.rounds_to_defeat_party, 10);
        assert!(approx(result.analysis.survival_ratio, 10.0 / 3.0));
        assert_eq!(result.difficulty(), DifficultyTier::Easy);
        assert_eq!(result.analysis.difficulty_color, "#00aa00");
    }

    #[test]
    fn test_empty_party_uses_default() {
        let explicit = calculate_encounter_difficulty(&goblins(4), &vec![PartyMember::new(3); 4]);
        let defaulted = calculate_encounter_difficulty(&goblins(4), &[]);

        assert!(defaulted.party_stats.used_default_party);
        assert_eq!(defaulted.party_stats.count, 4);
        assert_eq!(defaulted.analysis.difficulty, explicit.analysis.difficulty);
        assert!(defaulted.analysis.summary.contains("no party data found"));
        assert!(!explicit.analysis.summary.contains("no party data found"));
    }

    #[test]
    fn test_no_enemies_is_trivial() {
        let result = calculate_encounter_difficulty(&[], &[PartyMember::new(5)]);
        assert_eq!(result.enemy_stats.count, 0);
        assert_eq!(result.enemy_stats.total_dpr, 0.0);
        assert_eq!(result.analysis.rounds_to_defeat_enemies, 1);
        assert_eq!(result.analysis.rounds_to_defeat_party, NEVER_ROUNDS);
        assert_eq!(result.difficulty(), DifficultyTier::Trivial);
        assert!(result.analysis.summary.contains("party would fall in never"));
    }

    #[test]
    fn test_action_economy_flag() {
        let horde = goblins(12);
        let party = vec![PartyMember::new(3); 4];

        let plain = DifficultyEngine::new(EngineConfig::new()).calculate(&horde, &party);
        let adjusted =
            DifficultyEngine::new(EngineConfig::with_action_economy()).calculate(&horde, &party);

        assert_eq!(plain.analysis.party_action_economy_mod, 1.0);
        assert_eq!(plain.analysis.enemy_action_economy_mod, 1.0);
        assert!(approx(adjusted.analysis.party_action_economy_mod, 0.95));
        assert!(approx(adjusted.analysis.enemy_action_economy_mod, 1.2));
        assert!(adjusted.analysis.enemy_effective_dpr > plain.analysis.enemy_effective_dpr);
        assert!(adjusted.analysis.party_effective_dpr < plain.analysis.party_effective_dpr);
    }

    #[test]
    fn test_overwhelming_enemy_is_tpk_risk() {
        let dragon = vec![Combatant::creature("Adult Red Dragon", 1).with_cr("17")];
        let result = calculate_encounter_difficulty(&dragon, &vec![PartyMember::new(1); 3]);
        assert_eq!(result.difficulty(), DifficultyTier::TpkRisk);
    }

    #[test]
    fn test_huge_stack_still_classifies() {
        let tarrasques = vec![Combatant::creature("Tarrasque", 30_000).with_cr("30")];
        let result = calculate_encounter_difficulty(&tarrasques, &[PartyMember::new(20)]);
        assert_eq!(result.enemy_stats.count, 30_000);
        assert_eq!(result.enemy_stats.total_xp, u32::MAX);
        assert_eq!(result.difficulty(), DifficultyTier::TpkRisk);
    }

    #[test]
    fn test_config_validation() {
        assert!(EngineConfig::default().validate().is_ok());

        let mut config = EngineConfig::default();
        config.default_party_size = 0;
        assert!(matches!(config.validate(), Err(LorekeeperError::InvalidConfig(_))));

        let mut config = EngineConfig::default();
        config.default_party_level = 21;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_calculate_with_party_resolver() {
        let engine = DifficultyEngine::new(EngineConfig::default());
        let party = vec![PartyMember::new(3); 4];
        let direct = engine.calculate(&goblins(4), &party);
        let resolved = engine.calculate_with(&goblins(4), &party);
        assert_eq!(direct, resolved);
    }
}
