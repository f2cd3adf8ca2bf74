//! # Model Module
//!
//! Plain data consumed by the difficulty engine: enemy combatants (creatures
//! and traps), party members, and challenge ratings.
//!
//! These types deserialize from the same shape the campaign notes store
//! encounters in, so a saved encounter can be fed to the engine unchanged.

pub mod challenge;

pub use challenge::*;

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};

/// Marker used in [`Combatant::source`] for hand-entered creatures.
pub const MANUAL_SOURCE: &str = "manual";

/// One creature or trap stack in an encounter.
///
/// # Examples
///
/// ```
/// use lorekeeper::Combatant;
///
/// let goblins = Combatant::creature("Goblin", 4).with_cr("1/4");
/// assert_eq!(goblins.count, 4);
/// assert!(!goblins.is_trap);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combatant {
    pub name: String,
    /// Stack size; always at least 1
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ac: Option<f64>,
    /// Challenge rating as written in the note ("1/4", "5", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cr: Option<String>,
    /// Statblock identifier, or [`MANUAL_SOURCE`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub is_trap: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trap_data: Option<Trap>,
}

fn default_count() -> u32 {
    1
}

impl Combatant {
    /// Creates a creature stack with no explicit stats.
    pub fn creature(name: impl Into<String>, count: u32) -> Self {
        Self {
            name: name.into(),
            count: count.max(1),
            hp: None,
            ac: None,
            cr: None,
            source: None,
            is_trap: false,
            trap_data: None,
        }
    }

    /// Creates a single trap combatant.
    pub fn trap(name: impl Into<String>, trap: Trap) -> Self {
        Self {
            is_trap: true,
            trap_data: Some(trap),
            ..Self::creature(name, 1)
        }
    }

    pub fn with_cr(mut self, cr: impl Into<String>) -> Self {
        self.cr = Some(cr.into());
        self
    }

    pub fn with_hp(mut self, hp: f64) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn with_ac(mut self, ac: f64) -> Self {
        self.ac = Some(ac);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the statblock reference, if this combatant points at one.
    pub fn statblock_ref(&self) -> Option<&str> {
        self.source
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case(MANUAL_SOURCE))
    }

    /// Stack size used for aggregation, never below 1.
    pub fn stack_size(&self) -> u32 {
        self.count.max(1)
    }
}

/// Severity of a trap, scaling its damage output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatLevel {
    Setback,
    Dangerous,
    Deadly,
}

impl ThreatLevel {
    /// Case-insensitive lookup of a threat level by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "setback" => Some(ThreatLevel::Setback),
            "dangerous" => Some(ThreatLevel::Dangerous),
            "deadly" => Some(ThreatLevel::Deadly),
            _ => None,
        }
    }

    /// Multiplier applied to a trap's aggregate damage per round.
    pub fn dpr_multiplier(self) -> f64 {
        match self {
            ThreatLevel::Setback => 0.75,
            ThreatLevel::Dangerous => 1.25,
            ThreatLevel::Deadly => 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrapType {
    #[default]
    Simple,
    Complex,
}

/// A hazard made of one or more damaging elements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trap {
    #[serde(default)]
    pub trap_type: TrapType,
    /// Unknown names load as no threat level, leaving damage unscaled
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_threat_level"
    )]
    pub threat_level: Option<ThreatLevel>,
    #[serde(default)]
    pub elements: Vec<TrapElement>,
}

impl Trap {
    pub fn new(trap_type: TrapType, threat_level: Option<ThreatLevel>) -> Self {
        Self {
            trap_type,
            threat_level,
            elements: Vec::new(),
        }
    }

    pub fn with_element(mut self, element: TrapElement) -> Self {
        self.elements.push(element);
        self
    }
}

fn lenient_threat_level<'de, D>(deserializer: D) -> Result<Option<ThreatLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name.and_then(|name| {
        let level = ThreatLevel::from_name(&name);
        if level.is_none() {
            debug!("Unknown trap threat level {:?}, leaving damage unscaled", name);
        }
        level
    }))
}

/// One damaging component of a trap.
///
/// Field names follow the snake_case keys used in trap notes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrapElement {
    #[serde(default)]
    pub name: String,
    /// Dice notation, optionally followed by a damage type ("4d10 fire")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_damage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_dc: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_bonus: Option<i32>,
    /// Free text, scanned for area-of-effect language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
}

impl TrapElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_damage(mut self, damage: impl Into<String>) -> Self {
        self.damage = Some(damage.into());
        self
    }

    pub fn with_additional_damage(mut self, damage: impl Into<String>) -> Self {
        self.additional_damage = Some(damage.into());
        self
    }

    pub fn with_save_dc(mut self, dc: i32) -> Self {
        self.save_dc = Some(dc);
        self
    }

    pub fn with_attack_bonus(mut self, bonus: i32) -> Self {
        self.attack_bonus = Some(bonus);
        self
    }

    pub fn with_effect(mut self, effect: impl Into<String>) -> Self {
        self.effect = Some(effect.into());
        self
    }
}

/// Per-unit combat numbers for a single combatant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statline {
    pub hp: f64,
    pub ac: f64,
    /// Expected damage per round before hit chance
    pub dpr: f64,
    pub attack_bonus: f64,
}

impl Statline {
    pub fn new(hp: f64, ac: f64, dpr: f64, attack_bonus: f64) -> Self {
        Self {
            hp,
            ac,
            dpr,
            attack_bonus,
        }
    }
}

/// One player character taking part in the encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyMember {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Character level, 1 through 20
    pub level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ac: Option<f64>,
}

impl PartyMember {
    pub fn new(level: u32) -> Self {
        Self {
            name: None,
            level,
            hp: None,
            ac: None,
        }
    }

    pub fn named(name: impl Into<String>, level: u32) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(level)
        }
    }

    pub fn with_hp(mut self, hp: f64) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn with_ac(mut self, ac: f64) -> Self {
        self.ac = Some(ac);
        self
    }
}
