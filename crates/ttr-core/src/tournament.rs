use serde::{Deserialize, Serialize};

use crate::change_constant::EligibilityFlags;
use crate::error::RatingError;
use crate::probability::win_probability;
use crate::rating::{expected_result, update_rating, RatingUpdate};
use crate::Rating;

/// One single against one opponent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub opponent_rating: Rating,
    pub won: bool,
}

impl Match {
    pub fn new(opponent_rating: Rating, won: bool) -> Self {
        Self {
            opponent_rating,
            won,
        }
    }
}

/// Everything needed to rate one event for one player.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub current_rating: Rating,
    pub flags: EligibilityFlags,
    #[serde(default)]
    pub matches: Vec<Match>,
}

/// What a single match would have done to the rating on its own.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub index: usize,
    pub opponent_rating: Rating,
    pub won: bool,
    /// `opponent - player`; positive means the opponent is stronger
    pub rating_difference: i64,
    pub win_probability: f64,
    pub single_match: RatingUpdate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentReport {
    pub current_rating: Rating,
    pub change_constant: u32,
    pub expected_result: f64,
    pub actual_result: u32,
    pub update: RatingUpdate,
    pub matches: Vec<MatchBreakdown>,
}

impl Tournament {
    pub fn new(current_rating: Rating, flags: EligibilityFlags) -> Self {
        Self {
            current_rating,
            flags,
            matches: Vec::new(),
        }
    }

    /// Pair up opponent ratings with outcomes given as two parallel lists.
    ///
    /// Lists of different length are rejected rather than truncated.
    pub fn from_parallel(
        current_rating: Rating,
        opponent_ratings: Vec<Rating>,
        outcomes: Vec<bool>,
        flags: EligibilityFlags,
    ) -> Result<Self, RatingError> {
        if opponent_ratings.len() != outcomes.len() {
            return Err(RatingError::LengthMismatch {
                opponents: opponent_ratings.len(),
                outcomes: outcomes.len(),
            });
        }
        let matches = opponent_ratings
            .into_iter()
            .zip(outcomes)
            .map(|(opponent_rating, won)| Match::new(opponent_rating, won))
            .collect();
        Ok(Self {
            current_rating,
            flags,
            matches,
        })
    }

    pub fn push(&mut self, m: Match) {
        self.matches.push(m);
    }

    pub fn wins(&self) -> u32 {
        self.matches.iter().filter(|m| m.won).count() as u32
    }

    pub fn opponent_ratings(&self) -> Vec<Rating> {
        self.matches.iter().map(|m| m.opponent_rating).collect()
    }

    pub fn change_constant(&self) -> u32 {
        self.flags.change_constant()
    }

    /// Rate the whole event, plus each match as if it had been the only one.
    pub fn evaluate(&self) -> TournamentReport {
        let change_constant = self.change_constant();
        let opponents = self.opponent_ratings();
        let actual_result = self.wins();

        let matches = self
            .matches
            .iter()
            .enumerate()
            .map(|(index, m)| MatchBreakdown {
                index,
                opponent_rating: m.opponent_rating,
                won: m.won,
                rating_difference: m.opponent_rating as i64 - self.current_rating as i64,
                win_probability: win_probability(self.current_rating, m.opponent_rating),
                single_match: update_rating(
                    self.current_rating,
                    &[m.opponent_rating],
                    u32::from(m.won),
                    change_constant,
                ),
            })
            .collect();

        TournamentReport {
            current_rating: self.current_rating,
            change_constant,
            expected_result: expected_result(self.current_rating, &opponents),
            actual_result,
            update: update_rating(self.current_rating, &opponents, actual_result, change_constant),
            matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tournament_changes_nothing() {
        let report = Tournament::new(1400, EligibilityFlags::default()).evaluate();
        assert_eq!(report.update.new_rating, 1400);
        assert_eq!(report.update.delta, 0);
        assert_eq!(report.expected_result, 0.0);
        assert_eq!(report.actual_result, 0);
        assert!(report.matches.is_empty());
    }

    #[test]
    fn single_win_against_equal_opponent() {
        let mut tournament = Tournament::new(1400, EligibilityFlags::default());
        tournament.push(Match::new(1400, true));
        let report = tournament.evaluate();

        assert_eq!(report.change_constant, 16);
        assert_eq!(report.update.new_rating, 1408);
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.matches[0].win_probability, 0.5);
        assert_eq!(report.matches[0].rating_difference, 0);
        assert_eq!(report.matches[0].single_match, report.update);
    }

    #[test]
    fn aggregate_and_breakdown() {
        let tournament = Tournament::from_parallel(
            1400,
            vec![1300, 1320],
            vec![true, false],
            EligibilityFlags::default(),
        )
        .unwrap();
        let report = tournament.evaluate();

        assert_eq!(report.actual_result, 1);
        assert_eq!(report.update.delta, -10);
        assert_eq!(report.matches[0].single_match.delta, 3);
        assert_eq!(report.matches[1].single_match.delta, -12);
        assert_eq!(report.matches[1].index, 1);
        assert_eq!(report.matches[1].rating_difference, -80);
    }

    #[test]
    fn flags_feed_the_constant() {
        let mut tournament = Tournament::new(1400, EligibilityFlags::all());
        tournament.push(Match::new(1400, false));
        let report = tournament.evaluate();
        assert_eq!(report.change_constant, 32);
        assert_eq!(report.update.new_rating, 1384);
    }

    #[test]
    fn mismatched_lists_are_rejected() {
        let err = Tournament::from_parallel(
            1400,
            vec![1300, 1320, 1500],
            vec![true],
            EligibilityFlags::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            RatingError::LengthMismatch {
                opponents: 3,
                outcomes: 1
            }
        );
        assert_eq!(err.to_string(), "got 3 opponent ratings but 1 match outcomes");
    }

    #[test]
    fn evaluate_is_deterministic() {
        let tournament = Tournament::from_parallel(
            1583,
            vec![1422, 1610, 1777],
            vec![true, true, false],
            EligibilityFlags {
                age_under_21: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(tournament.evaluate(), tournament.evaluate());
    }

    #[test]
    fn report_serializes() {
        let mut tournament = Tournament::new(1400, EligibilityFlags::default());
        tournament.push(Match::new(1500, true));
        let json = serde_json::to_value(tournament.evaluate()).unwrap();
        assert_eq!(json["change_constant"], 16);
        assert_eq!(json["matches"][0]["opponent_rating"], 1500);
        assert_eq!(json["update"]["new_rating"], 1413);
    }
}
