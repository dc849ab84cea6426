use ttr_core::{
    EligibilityFlags, Match, Rating, Tournament, TournamentReport, RATING_MAX, RATING_MIN,
};

use crate::config::Config;

/// The form allows this many singles per event
pub const MAX_MATCHES: usize = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Calculator,
    Explanation,
}

impl Tab {
    pub fn titles() -> [&'static str; 2] {
        ["TTR Calculator", "Explanation"]
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Calculator => 0,
            Tab::Explanation => 1,
        }
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Calculator => Tab::Explanation,
            Tab::Explanation => Tab::Calculator,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flag {
    NoMatchIn365Days,
    FewerThan30Matches,
    AgeUnder21,
    AgeUnder16,
}

impl Flag {
    pub fn all() -> &'static [Flag] {
        &[
            Flag::NoMatchIn365Days,
            Flag::FewerThan30Matches,
            Flag::AgeUnder21,
            Flag::AgeUnder16,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            Flag::NoMatchIn365Days => "No single in the last 365 days",
            Flag::FewerThan30Matches => "Fewer than 30 rated singles",
            Flag::AgeUnder21 => "Younger than 21",
            Flag::AgeUnder16 => "Younger than 16",
        }
    }

    pub fn get(&self, flags: &EligibilityFlags) -> bool {
        match self {
            Flag::NoMatchIn365Days => flags.no_match_in_365_days,
            Flag::FewerThan30Matches => flags.fewer_than_30_career_matches,
            Flag::AgeUnder21 => flags.age_under_21,
            Flag::AgeUnder16 => flags.age_under_16,
        }
    }

    fn toggle(&self, flags: &mut EligibilityFlags) {
        let slot = match self {
            Flag::NoMatchIn365Days => &mut flags.no_match_in_365_days,
            Flag::FewerThan30Matches => &mut flags.fewer_than_30_career_matches,
            Flag::AgeUnder21 => &mut flags.age_under_21,
            Flag::AgeUnder16 => &mut flags.age_under_16,
        };
        *slot = !*slot;
    }
}

/// A focusable row of the input form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    CurrentRating,
    Flag(Flag),
    Opponent(usize),
    Won(usize),
}

/// Session state of the interactive calculator.
///
/// Only the inputs live here; results are recomputed from them on demand.
pub struct Calculator {
    pub tournament: Tournament,
    pub tab: Tab,
    pub focus: usize,
    /// Match shown in the detail panel
    pub detail_index: usize,
    pub show_graphs: bool,
    pub default_opponent_rating: Rating,
    pub explanation_scroll: u16,
    pub status: Option<String>,
}

impl Calculator {
    pub fn new(config: &Config) -> Self {
        let mut tournament = Tournament::new(config.current_rating, config.flags);
        tournament.push(Match::new(config.default_opponent_rating, true));
        Self {
            tournament,
            tab: Tab::Calculator,
            focus: 0,
            detail_index: 0,
            show_graphs: config.show_graphs,
            default_opponent_rating: config.default_opponent_rating,
            explanation_scroll: 0,
            status: None,
        }
    }

    pub fn report(&self) -> TournamentReport {
        self.tournament.evaluate()
    }

    pub fn match_count(&self) -> usize {
        self.tournament.matches.len()
    }

    /// All form rows in display order
    pub fn fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::CurrentRating];
        fields.extend(Flag::all().iter().map(|&f| Field::Flag(f)));
        for i in 0..self.match_count() {
            fields.push(Field::Opponent(i));
            fields.push(Field::Won(i));
        }
        fields
    }

    pub fn focused(&self) -> Field {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn move_focus(&mut self, delta: i32) {
        let len = self.fields().len() as i32;
        self.focus = (self.focus as i32 + delta).rem_euclid(len) as usize;
        if let Field::Opponent(i) | Field::Won(i) = self.focused() {
            self.detail_index = i;
        }
    }

    pub fn cycle_detail(&mut self, delta: i32) {
        let len = self.match_count() as i32;
        if len == 0 {
            return;
        }
        self.detail_index = (self.detail_index as i32 + delta).rem_euclid(len) as usize;
    }

    pub fn add_match(&mut self) {
        if self.match_count() >= MAX_MATCHES {
            self.status = Some(format!("At most {} matches per event", MAX_MATCHES));
            return;
        }
        self.tournament.push(Match::new(self.default_opponent_rating, true));
        self.detail_index = self.match_count() - 1;
        self.status = None;
        tracing::info!(matches = self.match_count(), "match added");
    }

    pub fn remove_last_match(&mut self) {
        if self.match_count() <= 1 {
            self.status = Some("An event needs at least one match".to_string());
            return;
        }
        self.tournament.matches.pop();
        let count = self.match_count();
        self.detail_index = self.detail_index.min(count - 1);
        self.focus = self.focus.min(self.fields().len() - 1);
        self.status = None;
        tracing::info!(matches = count, "match removed");
    }

    /// Space / Enter on a checkbox row
    pub fn toggle(&mut self) {
        match self.focused() {
            Field::Flag(flag) => {
                flag.toggle(&mut self.tournament.flags);
                tracing::debug!(
                    ?flag,
                    change_constant = self.tournament.change_constant(),
                    "eligibility changed"
                );
            }
            Field::Won(i) => {
                let m = &mut self.tournament.matches[i];
                m.won = !m.won;
            }
            Field::CurrentRating | Field::Opponent(_) => {}
        }
    }

    fn focused_rating_mut(&mut self) -> Option<&mut Rating> {
        match self.focused() {
            Field::CurrentRating => Some(&mut self.tournament.current_rating),
            Field::Opponent(i) => Some(&mut self.tournament.matches[i].opponent_rating),
            Field::Flag(_) | Field::Won(_) => None,
        }
    }

    /// Type a digit into the focused rating. A digit that would leave the
    /// allowed range starts a new number instead.
    pub fn type_digit(&mut self, digit: u8) {
        if let Some(rating) = self.focused_rating_mut() {
            let appended = rating.saturating_mul(10).saturating_add(digit as Rating);
            *rating = if appended > RATING_MAX {
                digit as Rating
            } else {
                appended
            };
        }
    }

    pub fn backspace(&mut self) {
        if let Some(rating) = self.focused_rating_mut() {
            *rating /= 10;
        }
    }

    pub fn adjust(&mut self, delta: Rating) {
        if let Some(rating) = self.focused_rating_mut() {
            *rating = rating.saturating_add(delta).clamp(RATING_MIN, RATING_MAX);
        }
    }

    pub fn scroll_explanation(&mut self, delta: i32) {
        self.explanation_scroll = (self.explanation_scroll as i32 + delta).max(0) as u16;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> Calculator {
        Calculator::new(&Config::default())
    }

    fn focus_on(calc: &mut Calculator, field: Field) {
        calc.focus = calc.fields().iter().position(|&f| f == field).unwrap();
    }

    #[test]
    fn starts_with_one_default_win() {
        let calc = calculator();
        assert_eq!(calc.tournament.current_rating, 1400);
        assert_eq!(calc.tournament.matches, vec![Match::new(1400, true)]);
        assert_eq!(calc.report().update.new_rating, 1408);
    }

    #[test]
    fn fields_follow_matches() {
        let mut calc = calculator();
        assert_eq!(calc.fields().len(), 1 + 4 + 2);
        calc.add_match();
        assert_eq!(calc.fields().len(), 1 + 4 + 4);
        assert_eq!(calc.fields()[7], Field::Opponent(1));
    }

    #[test]
    fn match_count_is_bounded() {
        let mut calc = calculator();
        for _ in 0..20 {
            calc.add_match();
        }
        assert_eq!(calc.match_count(), MAX_MATCHES);
        assert!(calc.status.is_some());

        for _ in 0..20 {
            calc.remove_last_match();
        }
        assert_eq!(calc.match_count(), 1);
    }

    #[test]
    fn removing_keeps_focus_in_bounds() {
        let mut calc = calculator();
        calc.add_match();
        calc.add_match();
        calc.move_focus(-1);
        assert_eq!(calc.focused(), Field::Won(2));
        assert_eq!(calc.detail_index, 2);

        calc.remove_last_match();
        assert_eq!(calc.focused(), Field::Won(1));
        assert_eq!(calc.detail_index, 1);
    }

    #[test]
    fn typing_digits_edits_the_rating() {
        let mut calc = calculator();
        calc.backspace();
        calc.backspace();
        assert_eq!(calc.tournament.current_rating, 14);
        calc.type_digit(8);
        calc.type_digit(5);
        assert_eq!(calc.tournament.current_rating, 1485);
        // 14852 is out of range, so the digit starts over
        calc.type_digit(2);
        assert_eq!(calc.tournament.current_rating, 2);
    }

    #[test]
    fn adjust_clamps() {
        let mut calc = calculator();
        focus_on(&mut calc, Field::Opponent(0));
        calc.adjust(5000);
        assert_eq!(calc.tournament.matches[0].opponent_rating, RATING_MAX);
        calc.adjust(-5000);
        assert_eq!(calc.tournament.matches[0].opponent_rating, RATING_MIN);
    }

    #[test]
    fn toggles_flags_and_results() {
        let mut calc = calculator();
        focus_on(&mut calc, Field::Flag(Flag::AgeUnder16));
        calc.toggle();
        assert_eq!(calc.report().change_constant, 20);

        focus_on(&mut calc, Field::Won(0));
        calc.toggle();
        assert!(!calc.tournament.matches[0].won);
        assert_eq!(calc.report().update.new_rating, 1390);
    }

    #[test]
    fn digits_ignored_on_checkboxes() {
        let mut calc = calculator();
        focus_on(&mut calc, Field::Flag(Flag::AgeUnder21));
        calc.type_digit(9);
        assert_eq!(calc.tournament.current_rating, 1400);
    }

    #[test]
    fn focus_wraps() {
        let mut calc = calculator();
        calc.move_focus(-1);
        assert_eq!(calc.focused(), Field::Won(0));
        calc.move_focus(1);
        assert_eq!(calc.focused(), Field::CurrentRating);
    }

    #[test]
    fn uses_config_defaults() {
        let config = Config {
            current_rating: 1650,
            default_opponent_rating: 1500,
            show_graphs: false,
            flags: EligibilityFlags::all(),
        };
        let mut calc = Calculator::new(&config);
        calc.add_match();
        assert_eq!(calc.tournament.matches[1].opponent_rating, 1500);
        assert_eq!(calc.report().change_constant, 32);
        assert!(!calc.show_graphs);
    }
}
