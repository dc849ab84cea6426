//! Rating arithmetic for the TTR table-tennis ranking.
//!
//! Everything here is a pure function of its arguments: callers own the
//! session state and pass ratings, outcomes and eligibility flags in.

pub mod change_constant;
pub mod error;
pub mod probability;
pub mod range;
pub mod rating;
pub mod tournament;

/// A player's TTR score
pub type Rating = i32;

/// Lowest rating the input form accepts
pub const RATING_MIN: Rating = 0;
/// Highest rating the input form accepts
pub const RATING_MAX: Rating = 3000;
/// Starting value for the player's and each opponent's rating field
pub const DEFAULT_RATING: Rating = 1400;

pub use change_constant::{change_constant, EligibilityFlags};
pub use error::RatingError;
pub use probability::win_probability;
pub use range::{probability_curve, project_range, rating_change_curve, ChartSeries};
pub use rating::{expected_result, update_rating, RatingUpdate};
pub use tournament::{Match, MatchBreakdown, Tournament, TournamentReport};
