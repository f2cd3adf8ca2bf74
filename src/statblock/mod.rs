//! # Statblock Module
//!
//! Authored creature statblocks and the resolver seam the engine uses to find
//! them. The engine never looks statblocks up on its own: the host hands it a
//! [`StatblockResolver`] and the engine asks for each combatant's reference.

pub mod dice;
pub mod parser;

pub use dice::*;
pub use parser::*;

use crate::Statline;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A statblock number written either as a bare value or as text with
/// flavour ("45 (6d10+12)", "15 (natural armor)").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

/// One action entry of a statblock.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatblockAction {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_bonus: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_dice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_bonus: Option<i32>,
}

impl StatblockAction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn described(name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            desc: Some(desc.into()),
            ..Self::new(name)
        }
    }
}

/// An authored creature statblock.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Statblock {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ac: Option<StatValue>,
    #[serde(default)]
    pub actions: Vec<StatblockAction>,
}

impl Statblock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_hp(mut self, hp: StatValue) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn with_ac(mut self, ac: StatValue) -> Self {
        self.ac = Some(ac);
        self
    }

    pub fn with_action(mut self, action: StatblockAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Parsed statline, or `None` when no action yields damage.
    pub fn statline(&self) -> Option<Statline> {
        parse_statline(self)
    }
}

/// Looks up real combat numbers for a statblock reference.
///
/// Returning `None` tells the engine to fall back to the challenge rating
/// table for that combatant.
pub trait StatblockResolver {
    fn resolve_statblock(&self, reference: &str) -> Option<Statline>;
}

impl<T: StatblockResolver + ?Sized> StatblockResolver for &T {
    fn resolve_statblock(&self, reference: &str) -> Option<Statline> {
        (**self).resolve_statblock(reference)
    }
}

/// Resolver for hosts with no creature database.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStatblocks;

impl StatblockResolver for NoStatblocks {
    fn resolve_statblock(&self, _reference: &str) -> Option<Statline> {
        None
    }
}

/// In-memory statblock collection keyed by case-insensitive name.
///
/// # Examples
///
/// ```
/// use lorekeeper::statblock::{Statblock, StatblockAction, StatblockLibrary, StatblockResolver};
///
/// let mut library = StatblockLibrary::new();
/// library.insert(Statblock::new("Wolf").with_action(StatblockAction::described(
///     "Bite",
///     "Melee Weapon Attack: +4 to hit. Hit: 7 (2d4 + 2) piercing damage.",
/// )));
///
/// let wolf = library.resolve_statblock("wolf").unwrap();
/// assert_eq!(wolf.dpr, 7.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatblockLibrary {
    blocks: HashMap<String, Statblock>,
}

impl StatblockLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a statblock, replacing any existing one with the same name.
    pub fn insert(&mut self, block: Statblock) -> Option<Statblock> {
        self.blocks.insert(library_key(&block.name), block)
    }

    pub fn get(&self, name: &str) -> Option<&Statblock> {
        self.blocks.get(&library_key(name))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl FromIterator<Statblock> for StatblockLibrary {
    fn from_iter<I: IntoIterator<Item = Statblock>>(iter: I) -> Self {
        let mut library = Self::new();
        for block in iter {
            library.insert(block);
        }
        library
    }
}

impl StatblockResolver for StatblockLibrary {
    fn resolve_statblock(&self, reference: &str) -> Option<Statline> {
        self.get(reference)?.statline()
    }
}

fn library_key(name: &str) -> String {
    name.trim().to_lowercase()
}
