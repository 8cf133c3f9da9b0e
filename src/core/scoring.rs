//! Price-to-income affordability score.
//!
//! The ratio `home value / income` is rescaled into [`SCORE_MIN`, `SCORE_MAX`]
//! and inverted with `6 - scaled`, so cheaper places score higher.

use crate::domain::model::Score;

pub const SCORE_MIN: f64 = 1.0;
pub const SCORE_MAX: f64 = 5.0;

pub const DEFAULT_RATIO_MIN: f64 = 2.0;
pub const DEFAULT_RATIO_MAX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scaling {
    /// Min-max fitted on the single ratio being scored. The fitted range is
    /// empty, so every valid input lands on the midpoint and scores 3.0.
    SingleSample,
    /// Min-max against a fixed reference range of ratios. Ratios outside the
    /// range are clamped to it.
    ReferenceRange { ratio_min: f64, ratio_max: f64 },
}

impl Default for Scaling {
    fn default() -> Self {
        Self::ReferenceRange {
            ratio_min: DEFAULT_RATIO_MIN,
            ratio_max: DEFAULT_RATIO_MAX,
        }
    }
}

impl Scaling {
    fn rescale(&self, ratio: f64) -> f64 {
        match *self {
            Self::SingleSample => (SCORE_MIN + SCORE_MAX) / 2.0,
            Self::ReferenceRange {
                ratio_min,
                ratio_max,
            } => {
                let span = ratio_max - ratio_min;
                if span <= 0.0 {
                    return (SCORE_MIN + SCORE_MAX) / 2.0;
                }
                let fraction = ((ratio - ratio_min) / span).clamp(0.0, 1.0);
                SCORE_MIN + fraction * (SCORE_MAX - SCORE_MIN)
            }
        }
    }
}

/// Returns `None` when either input is missing or the income is not positive.
/// A negative home value is treated the same way.
pub fn score(home_value: Option<i64>, income: Option<i64>, scaling: &Scaling) -> Option<Score> {
    let (home_value, income) = (home_value?, income?);
    if income <= 0 || home_value < 0 {
        return None;
    }

    let ratio = home_value as f64 / income as f64;
    let scaled = scaling.rescale(ratio);

    Some(Score {
        ratio,
        scaled,
        value: (SCORE_MAX + 1.0) - scaled,
    })
}
