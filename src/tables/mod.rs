//! # Tables Module
//!
//! Static balance data: challenge rating rows for creatures and the level
//! formula for player characters. Both are total functions; unknown inputs
//! resolve to a default row instead of failing.

pub mod challenge;
pub mod level;

pub use challenge::*;
pub use level::*;
