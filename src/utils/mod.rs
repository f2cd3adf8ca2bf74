//! # Utilities Module
//!
//! Hit probability, effective damage, and attrition math.

pub mod math;

pub use math::*;
