use serde::{Deserialize, Serialize};

use crate::probability::win_probability;
use crate::Rating;

/// Outcome of a rating update: the new rating and how far it moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatingUpdate {
    pub new_rating: Rating,
    /// Change the formula asked for. Near the ends of `i32` the new rating
    /// saturates, so it may have moved by less than this.
    pub delta: i32,
}

/// Sum of the win probabilities against every opponent.
///
/// This is the number of wins the player "deserved"; zero for no opponents.
pub fn expected_result(current_rating: Rating, opponent_ratings: &[Rating]) -> f64 {
    opponent_ratings
        .iter()
        .map(|&opponent| win_probability(current_rating, opponent))
        .sum()
}

/// Compute the rating after playing `opponent_ratings` and winning
/// `matches_won` of those matches.
///
/// A whole tournament passes every opponent and the total number of wins; a
/// single match is the one-element slice with `matches_won` of 0 or 1. Both go
/// through the same arithmetic, so they round identically.
///
/// `delta = round((matches_won - expected) * change_constant)` where ties
/// round half away from zero. `matches_won` is not checked against the number
/// of opponents: passing more wins than matches yields a proportionally larger
/// gain instead of an error.
pub fn update_rating(
    current_rating: Rating,
    opponent_ratings: &[Rating],
    matches_won: u32,
    change_constant: u32,
) -> RatingUpdate {
    let expected = expected_result(current_rating, opponent_ratings);
    let delta = rating_delta(matches_won as f64, expected, change_constant);
    RatingUpdate {
        new_rating: current_rating.saturating_add(delta),
        delta,
    }
}

fn rating_delta(actual: f64, expected: f64, change_constant: u32) -> i32 {
    // `as` saturates on out-of-range floats
    ((actual - expected) * change_constant as f64).round() as i32
}
