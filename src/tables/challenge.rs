//! # Challenge Rating Table
//!
//! Calibration constants mapping challenge rating to expected combat numbers,
//! plus the reverse lookups used to estimate a trap's rating.

use crate::{ChallengeRating, Statline};
use serde::Serialize;

/// Expected statistics for a creature of a given challenge rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrStatRow {
    pub cr: ChallengeRating,
    pub hp: u32,
    pub ac: u32,
    pub dpr: u32,
    pub attack_bonus: u32,
    pub xp: u32,
}

impl CrStatRow {
    /// The row as a per-unit statline.
    pub fn statline(&self) -> Statline {
        Statline::new(
            f64::from(self.hp),
            f64::from(self.ac),
            f64::from(self.dpr),
            f64::from(self.attack_bonus),
        )
    }
}

const fn row(eighths: u16, hp: u32, ac: u32, dpr: u32, attack_bonus: u32, xp: u32) -> CrStatRow {
    CrStatRow {
        cr: ChallengeRating::from_eighths_unchecked(eighths),
        hp,
        ac,
        dpr,
        attack_bonus,
        xp,
    }
}

/// Every challenge rating from 0 to 30, in ascending order.
pub const CR_TABLE: [CrStatRow; 34] = [
    row(0, 5, 13, 1, 3, 10),
    row(1, 10, 13, 2, 3, 25),
    row(2, 20, 13, 3, 3, 50),
    row(4, 35, 13, 5, 3, 100),
    row(8, 70, 13, 8, 3, 200),
    row(16, 85, 13, 15, 3, 450),
    row(24, 100, 13, 21, 4, 700),
    row(32, 115, 14, 27, 5, 1_100),
    row(40, 130, 15, 33, 6, 1_800),
    row(48, 145, 15, 39, 6, 2_300),
    row(56, 160, 15, 45, 6, 2_900),
    row(64, 175, 16, 51, 7, 3_900),
    row(72, 190, 16, 57, 7, 5_000),
    row(80, 205, 17, 63, 7, 5_900),
    row(88, 220, 17, 69, 7, 7_200),
    row(96, 235, 17, 75, 8, 8_400),
    row(104, 250, 18, 81, 8, 10_000),
    row(112, 265, 18, 87, 8, 11_500),
    row(120, 280, 18, 93, 8, 13_000),
    row(128, 295, 18, 99, 9, 15_000),
    row(136, 310, 19, 105, 10, 18_000),
    row(144, 325, 19, 111, 10, 20_000),
    row(152, 340, 19, 117, 10, 22_000),
    row(160, 355, 19, 123, 10, 25_000),
    row(168, 370, 19, 129, 11, 33_000),
    row(176, 385, 19, 135, 11, 41_000),
    row(184, 400, 19, 141, 11, 50_000),
    row(192, 415, 19, 147, 12, 62_000),
    row(200, 430, 19, 153, 12, 75_000),
    row(208, 445, 19, 159, 12, 90_000),
    row(216, 460, 19, 165, 13, 105_000),
    row(224, 475, 19, 171, 13, 120_000),
    row(232, 490, 19, 177, 13, 135_000),
    row(240, 505, 19, 183, 14, 155_000),
];

/// Looks up the stat row for a challenge rating.
///
/// Every valid rating has a row; anything else resolves to CR 1/4.
pub fn cr_stats(cr: ChallengeRating) -> &'static CrStatRow {
    CR_TABLE
        .iter()
        .find(|row| row.cr == cr)
        .unwrap_or(&CR_TABLE[2])
}

/// Looks up the stat row for a rating written as text ("1/2", "7").
///
/// # Examples
///
/// ```
/// use lorekeeper::tables::cr_stats_for;
///
/// assert_eq!(cr_stats_for(Some("5")).hp, 130);
/// assert_eq!(cr_stats_for(None).hp, 20); // CR 1/4
/// ```
pub fn cr_stats_for(cr: Option<&str>) -> &'static CrStatRow {
    cr_stats(ChallengeRating::parse_or_default(cr))
}

/// Challenge ratings paired with the save DC a creature of that rating uses.
const SAVE_DC_BY_CR: [(i32, u16); 15] = [
    (13, 0),
    (13, 1),
    (13, 2),
    (13, 3),
    (14, 4),
    (15, 5),
    (16, 8),
    (17, 11),
    (18, 13),
    (19, 17),
    (20, 21),
    (21, 24),
    (22, 27),
    (23, 29),
    (24, 30),
];

/// Estimates a challenge rating from damage per round.
///
/// Picks the CR 0 through 20 row whose damage is nearest; ties keep the
/// lower rating.
pub fn estimate_cr_from_dpr(dpr: f64) -> ChallengeRating {
    nearest(CR_TABLE[..24].iter().map(|row| (f64::from(row.dpr), row.cr)), dpr)
}

/// Estimates a challenge rating from a save DC, nearest match.
pub fn estimate_cr_from_save_dc(dc: i32) -> ChallengeRating {
    nearest(
        SAVE_DC_BY_CR
            .iter()
            .map(|&(table_dc, cr)| (f64::from(table_dc), ChallengeRating::whole(cr))),
        f64::from(dc),
    )
}

fn nearest(candidates: impl Iterator<Item = (f64, ChallengeRating)>, target: f64) -> ChallengeRating {
    let mut best: Option<(f64, ChallengeRating)> = None;
    for (value, cr) in candidates {
        let diff = (value - target).abs();
        if best.map_or(true, |(best_diff, _)| diff < best_diff) {
            best = Some((diff, cr));
        }
    }
    best.map(|(_, cr)| cr).unwrap_or_default()
}
