//! Numeric series primitives: moving average, rate of change, interpolation

use chrono::NaiveDate;

use crate::units::Weight;

/// Default smoothing window for weight series
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

/// Mean of every full `window`-sized run of `series`
///
/// Only fully populated windows are used, so the output has
/// `len - window + 1` elements. A series shorter than the window (or a zero
/// window) is returned unchanged.
pub fn moving_average(series: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || series.len() < window {
        return series.to_vec();
    }

    series
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect()
}

/// Weight change per day between two dated measurements
///
/// Returns `None` when both dates are the same day.
pub fn rate(x1: Weight, x2: Weight, t1: NaiveDate, t2: NaiveDate) -> Option<Weight> {
    let days = (t2 - t1).num_days();
    if days == 0 {
        return None;
    }
    Some((x2 - x1) / days as f64)
}

/// Linear interpolation of the weight at `t` between two dated measurements
pub fn interpolate(
    x1: Weight,
    x2: Weight,
    t1: NaiveDate,
    t2: NaiveDate,
    t: NaiveDate,
) -> Option<Weight> {
    let slope = rate(x1, x2, t1, t2)?;
    let days_since_x1 = (t - t1).num_days();
    Some(x1 + slope * days_since_x1 as f64)
}

/// Weight change over the last `n` values
///
/// When `smooth` is set the series first goes through a `window`-sized moving
/// average. Returns `None` if fewer than two values remain after trimming.
pub fn weight_change(weights: &[f64], n: usize, smooth: bool, window: usize) -> Option<f64> {
    let series = if smooth {
        moving_average(weights, window)
    } else {
        weights.to_vec()
    };

    let trimmed = trailing(&series, n);
    if trimmed.len() < 2 {
        return None;
    }
    Some(trimmed[trimmed.len() - 1] - trimmed[0])
}

/// Last `n` elements of a slice (the whole slice if it is shorter)
pub fn trailing<T>(values: &[T], n: usize) -> &[T] {
    &values[values.len().saturating_sub(n)..]
}
