use crate::Rating;

/// Rating difference at which the favourite's win probability reaches ~0.909
pub const SPREAD: f64 = 150.0;

/// Smallest positive normal `f64`
pub const MIN_PROBABILITY: f64 = f64::MIN_POSITIVE;

/// Largest `f64` below 1
pub const MAX_PROBABILITY: f64 = 1.0 - f64::EPSILON / 2.0;

/// Probability that a player rated `rating_a` beats one rated `rating_b`.
///
/// The difference is taken in `f64`, so any pair of `i32` ratings is fine.
/// The result always lies strictly between 0 and 1: gaps too wide for `f64`
/// to resolve (about 2,400 points in the favourite's direction) are pinned
/// to [`MIN_PROBABILITY`] or [`MAX_PROBABILITY`].
pub fn win_probability(rating_a: Rating, rating_b: Rating) -> f64 {
    let exponent = (rating_b as f64 - rating_a as f64) / SPREAD;
    (1.0 / (1.0 + 10f64.powf(exponent))).clamp(MIN_PROBABILITY, MAX_PROBABILITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_ratings_are_a_coin_flip() {
        assert_eq!(win_probability(1400, 1400), 0.5);
        assert_eq!(win_probability(0, 0), 0.5);
        assert_eq!(win_probability(-250, -250), 0.5);
    }

    #[test]
    fn favourite_is_above_half() {
        let p = win_probability(1500, 1300);
        assert!((p - 0.9556).abs() < 1e-3, "got {}", p);
    }

    #[test]
    fn underdog_is_below_half() {
        assert!(win_probability(1300, 1500) < 0.5);
    }

    #[test]
    fn one_spread_ahead() {
        // 10^-1 in the denominator
        let p = win_probability(150, 0);
        assert!((p - 1.0 / 1.1).abs() < 1e-12);
    }

    #[test]
    fn complementary() {
        let pairs = [(1400, 1400), (1500, 1300), (0, 3000), (-20, 17), (2999, 1)];
        for (a, b) in pairs {
            let sum = win_probability(a, b) + win_probability(b, a);
            assert!((sum - 1.0).abs() < 1e-9, "{} vs {}: {}", a, b, sum);
        }
    }

    #[test]
    fn extreme_gaps_stay_inside_the_open_interval() {
        let low = win_probability(i32::MIN, i32::MAX);
        let high = win_probability(i32::MAX, i32::MIN);
        assert_eq!(low, MIN_PROBABILITY);
        assert_eq!(high, MAX_PROBABILITY);
        assert!(low > 0.0);
        assert!(high < 1.0);
        assert!((low + high - 1.0).abs() < 1e-9);

        let p = win_probability(0, 5_000_000);
        assert!(p.is_finite());
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn top_of_the_form_range_is_below_one() {
        for diff in [2300, 2400, 2500, 3000] {
            let p = win_probability(diff, 0);
            assert!(p < 1.0, "p({}, 0) = {}", diff, p);
            assert!(win_probability(0, diff) > 0.0);
        }
        let sum = win_probability(3000, 0) + win_probability(0, 3000);
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn strictly_decreasing_over_the_chart_window() {
        let mut previous = win_probability(0, -400);
        for diff in -399..400 {
            let p = win_probability(0, diff);
            assert!(p < previous, "not decreasing at {}", diff);
            previous = p;
        }
    }
}
