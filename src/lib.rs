//! # Lorekeeper
//!
//! Encounter difficulty estimation for tabletop RPG campaign notes.
//!
//! ## Architecture Overview
//!
//! The crate is a pure calculator. Surrounding tools (note editors, encounter
//! builders) hand it plain data and get a plain result back:
//!
//! - **Model**: enemy combatants, traps, party members, challenge ratings
//! - **Tables**: challenge rating rows and the character level formula
//! - **Statblocks**: dice-average parsing and statblock → statline resolution
//! - **Traps**: area-of-effect detection and trap stat aggregation
//! - **Engine**: side aggregation, hit chance, attrition, difficulty tiers
//!
//! ## Degrading Gracefully
//!
//! Nothing in the calculation path returns an error. Unknown challenge
//! ratings, unparseable statblocks and empty parties all fall back to table
//! defaults. Errors only exist at the file boundary (loading configuration and
//! encounter records).

pub mod encounter;
pub mod engine;
pub mod model;
pub mod statblock;
pub mod tables;
pub mod traps;
pub mod utils;

// Core module re-exports
pub use encounter::*;
pub use engine::*;
pub use model::*;
pub use utils::*;

pub use statblock::{NoStatblocks, Statblock, StatblockLibrary, StatblockResolver};
pub use traps::{trap_stats, TrapStats};

/// Core error type for Lorekeeper.
#[derive(thiserror::Error, Debug)]
pub enum LorekeeperError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Engine configuration is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Saved encounter breaks a structural rule
    #[error("Invalid encounter: {0}")]
    InvalidEncounter(String),
}

/// Result type used throughout the Lorekeeper codebase.
pub type LorekeeperResult<T> = Result<T, LorekeeperError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine constants.
pub mod config {
    /// Members in the stand-in party used when none is supplied
    pub const DEFAULT_PARTY_SIZE: u32 = 4;

    /// Level of the stand-in party members
    pub const DEFAULT_PARTY_LEVEL: u32 = 3;

    /// Highest character level the level formula covers
    pub const MAX_CHARACTER_LEVEL: u32 = 20;

    /// Rounds-to-defeat value meaning "never"
    pub const NEVER_ROUNDS: u32 = 999;

    /// Targets assumed for effects that hit every creature in an area
    pub const ASSUMED_PARTY_SIZE: u32 = 4;

    /// Enemy armour class assumed when there are no enemies
    pub const DEFAULT_ENEMY_AC: f64 = 13.0;

    /// Enemy attack bonus assumed when there are no enemies
    pub const DEFAULT_ENEMY_ATTACK_BONUS: f64 = 3.0;
}
