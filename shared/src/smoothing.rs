//! Missing-weight resolution
//!
//! Days without a weight measurement are filled in two passes:
//!
//! 1. **Interpolation**: a gap bounded by measurements on both sides is
//!    resolved on the straight line between them, by day offset.
//! 2. **Previous average**: whatever is left (leading and trailing runs) takes
//!    the mean of the resolved weights among the previous 10 entries, or
//!    failing that the mean of the series' last 10 resolved weights minus the
//!    most recent one.
//!
//! An entry neither pass can reach stays [`WeightSource::Unresolved`] with a
//! weight of zero and must not be shown as a real measurement.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::LogEntry;
use crate::series::{interpolate, trailing};
use crate::units::Weight;

/// Number of preceding entries averaged by the fallback pass
pub const PREVIOUS_AVERAGE_WINDOW: usize = 10;

/// How a smoothed weight was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightSource {
    Measured,
    Interpolated,
    Averaged,
    Unresolved,
}

/// A dated weight after missing-value resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothedWeight {
    pub date: NaiveDate,
    pub weight: Weight,
    pub source: WeightSource,
}

impl SmoothedWeight {
    pub fn is_resolved(&self) -> bool {
        self.source != WeightSource::Unresolved
    }

    fn unresolved(date: NaiveDate) -> Self {
        Self {
            date,
            weight: Weight::ZERO,
            source: WeightSource::Unresolved,
        }
    }
}

/// Resolve missing weights with both passes, interpolation first
pub fn smooth_weights(entries: &[LogEntry]) -> Vec<SmoothedWeight> {
    let points: Vec<SmoothedWeight> = entries
        .iter()
        .map(|entry| match entry.weight {
            Some(weight) => SmoothedWeight {
                date: entry.date,
                weight,
                source: WeightSource::Measured,
            },
            None => SmoothedWeight::unresolved(entry.date),
        })
        .collect();

    if points.iter().all(SmoothedWeight::is_resolved) {
        return points;
    }

    let interpolated = interpolate_missing(&points);
    fill_from_previous_average(&interpolated)
}

/// Interpolation pass: resolves gaps bounded on both sides
pub fn interpolate_missing(points: &[SmoothedWeight]) -> Vec<SmoothedWeight> {
    // nearest resolved index at or before / at or after each position
    let mut previous = vec![None; points.len()];
    let mut last = None;
    for (i, point) in points.iter().enumerate() {
        if point.is_resolved() {
            last = Some(i);
        }
        previous[i] = last;
    }

    let mut next = vec![None; points.len()];
    let mut upcoming = None;
    for (i, point) in points.iter().enumerate().rev() {
        if point.is_resolved() {
            upcoming = Some(i);
        }
        next[i] = upcoming;
    }

    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            if point.is_resolved() {
                return *point;
            }
            let (Some(p), Some(n)) = (previous[i], next[i]) else {
                return *point;
            };
            let (before, after) = (&points[p], &points[n]);
            match interpolate(before.weight, after.weight, before.date, after.date, point.date) {
                Some(weight) => SmoothedWeight {
                    date: point.date,
                    weight,
                    source: WeightSource::Interpolated,
                },
                None => *point,
            }
        })
        .collect()
}

/// Fallback pass: averages preceding resolved weights
pub fn fill_from_previous_average(points: &[SmoothedWeight]) -> Vec<SmoothedWeight> {
    let resolved: Vec<f64> = points
        .iter()
        .filter(|p| p.is_resolved())
        .map(|p| p.weight.lb())
        .collect();

    let recent = trailing(&resolved, PREVIOUS_AVERAGE_WINDOW);
    let series_average = mean(&recent[..recent.len().saturating_sub(1)]);

    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            if point.is_resolved() {
                return *point;
            }
            let preceding: Vec<f64> = points[i.saturating_sub(PREVIOUS_AVERAGE_WINDOW)..i]
                .iter()
                .filter(|p| p.is_resolved())
                .map(|p| p.weight.lb())
                .collect();

            match mean(&preceding).or(series_average) {
                Some(average) => SmoothedWeight {
                    date: point.date,
                    weight: Weight::from_lb(average),
                    source: WeightSource::Averaged,
                },
                None => *point,
            }
        })
        .collect()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
