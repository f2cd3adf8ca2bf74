//! # Encounter Records
//!
//! A saved encounter as the command-line front end reads it: the enemies, the
//! party, and any statblocks the enemies refer to, in one JSON document.

use crate::config::MAX_CHARACTER_LEVEL;
use crate::statblock::{Statblock, StatblockLibrary};
use crate::{
    Combatant, DifficultyEngine, DifficultyResult, EngineConfig, LorekeeperError,
    LorekeeperResult, PartyMember,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EncounterRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enemies: Vec<Combatant>,
    #[serde(default)]
    pub party: Vec<PartyMember>,
    #[serde(default)]
    pub statblocks: Vec<Statblock>,
}

impl EncounterRecord {
    /// Parses and validates a record from JSON text.
    pub fn from_json(text: &str) -> LorekeeperResult<Self> {
        let record: Self = serde_json::from_str(text)?;
        record.validate()?;
        Ok(record)
    }

    /// Reads and validates a record from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> LorekeeperResult<Self> {
        let path = path.as_ref();
        debug!("Loading encounter record from {}", path.display());
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Checks the structural rules a saved record must follow.
    ///
    /// The engine tolerates all of these; loading a record does not.
    pub fn validate(&self) -> LorekeeperResult<()> {
        for enemy in &self.enemies {
            if enemy.count == 0 {
                return Err(LorekeeperError::InvalidEncounter(format!(
                    "{:?} has a count of 0",
                    enemy.name
                )));
            }
            if enemy.is_trap && enemy.trap_data.is_none() {
                return Err(LorekeeperError::InvalidEncounter(format!(
                    "{:?} is marked as a trap but has no trap data",
                    enemy.name
                )));
            }
        }
        for member in &self.party {
            if !(1..=MAX_CHARACTER_LEVEL).contains(&member.level) {
                return Err(LorekeeperError::InvalidEncounter(format!(
                    "party member {} has level {}, expected 1 to {}",
                    member.name.as_deref().unwrap_or("(unnamed)"),
                    member.level,
                    MAX_CHARACTER_LEVEL
                )));
            }
        }
        Ok(())
    }

    /// The record's statblocks as a resolver.
    pub fn library(&self) -> StatblockLibrary {
        self.statblocks.iter().cloned().collect()
    }

    /// Runs the difficulty engine over this record.
    pub fn assess(&self, config: EngineConfig) -> DifficultyResult {
        DifficultyEngine::with_statblocks(config, self.library()).calculate(&self.enemies, &self.party)
    }
}
