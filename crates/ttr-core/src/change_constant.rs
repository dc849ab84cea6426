use serde::{Deserialize, Serialize};

/// Change constant for an established adult player
pub const BASE_CHANGE_CONSTANT: u32 = 16;

/// Added once for every eligibility criterion the player meets
pub const CHANGE_CONSTANT_STEP: u32 = 4;

/// Criteria that make a rating more volatile.
///
/// Each flag is independent; a 15 year old who has never played a rated
/// match before may well tick all four.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityFlags {
    /// No rated single in the last 365 days (applies for the next 15 singles)
    pub no_match_in_365_days: bool,
    /// Fewer than 30 rated singles over the whole career
    pub fewer_than_30_career_matches: bool,
    pub age_under_21: bool,
    pub age_under_16: bool,
}

impl EligibilityFlags {
    pub fn all() -> Self {
        Self {
            no_match_in_365_days: true,
            fewer_than_30_career_matches: true,
            age_under_21: true,
            age_under_16: true,
        }
    }

    /// Number of criteria that are met
    pub fn count(&self) -> u32 {
        [
            self.no_match_in_365_days,
            self.fewer_than_30_career_matches,
            self.age_under_21,
            self.age_under_16,
        ]
        .iter()
        .filter(|&&flag| flag)
        .count() as u32
    }

    /// Maximum number of points a single match can move the rating.
    pub fn change_constant(&self) -> u32 {
        BASE_CHANGE_CONSTANT + CHANGE_CONSTANT_STEP * self.count()
    }
}

pub fn change_constant(flags: &EligibilityFlags) -> u32 {
    flags.change_constant()
}
