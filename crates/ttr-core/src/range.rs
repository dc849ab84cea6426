//! Chart data: win probability and rating change over a window of rating
//! differences.
//!
//! The x-axis is always `opponent - player`, with the player pinned at 0.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::probability::win_probability;
use crate::rating::update_rating;

/// Half-width of the default chart window
pub const DEFAULT_HALF_WIDTH: i32 = 400;

/// Window of rating differences to chart around `center`.
///
/// Always covers `-400..400` and grows on whichever side is needed so that
/// `center` itself is inside the range. The one exception is `i32::MAX`,
/// which a half-open `Range<i32>` cannot reach.
pub fn project_range(center: i32) -> Range<i32> {
    let start = center.min(-DEFAULT_HALF_WIDTH);
    let end = center.saturating_add(1).max(DEFAULT_HALF_WIDTH);
    start..end
}

/// A curve sampled at every integer rating difference of a window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub differences: Vec<i32>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    fn sample(range: Range<i32>, f: impl Fn(i32) -> f64) -> Self {
        let differences: Vec<i32> = range.collect();
        let values = differences.iter().map(|&d| f(d)).collect();
        Self {
            differences,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.differences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// `(x, y)` pairs, the shape plotting widgets want
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.differences
            .iter()
            .zip(&self.values)
            .map(|(&x, &y)| (x as f64, y))
            .collect()
    }

    /// Smallest and largest value, or `None` for an empty series.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        let mut values = self.values.iter().copied();
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

/// Win probability against an opponent `x` points stronger, for every `x`
/// in `project_range(center)`.
pub fn probability_curve(center: i32) -> ChartSeries {
    ChartSeries::sample(project_range(center), |difference| {
        win_probability(0, difference)
    })
}

/// Points gained (`won`) or lost against an opponent `x` points stronger,
/// as a single match, for every `x` in `project_range(center)`.
pub fn rating_change_curve(center: i32, won: bool, change_constant: u32) -> ChartSeries {
    let result = u32::from(won);
    ChartSeries::sample(project_range(center), |difference| {
        update_rating(0, &[difference], result, change_constant).delta as f64
    })
}
