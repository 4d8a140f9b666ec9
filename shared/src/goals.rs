//! Goal progress and projection
//!
//! Everything here works on canonical pounds. The sign of `weight_to_go`
//! follows the goal direction: negative while losing, positive while gaining.

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Goal, LogEntry};
use crate::series::moving_average;
use crate::smoothing::SmoothedWeight;
use crate::units::{round_to, Weight, KCAL_PER_LB};

/// Below this many logs the current weight is the latest measurement
pub const CURRENT_WEIGHT_MIN_LOGS: usize = 5;

/// Projections further out than this are reported as undetermined
pub const MAX_PROJECTION_DAYS: f64 = 36_500.0;

/// Current weight of a series
///
/// With fewer than [`CURRENT_WEIGHT_MIN_LOGS`] logs this is the latest raw
/// measurement (or the latest resolved weight if that day was not weighed).
/// Otherwise it is the last point of a `window`-sized moving average over the
/// resolved weights. `None` when nothing in the series carries a weight.
pub fn current_weight(
    logs: &[LogEntry],
    smoothed: &[SmoothedWeight],
    window: usize,
) -> Option<Weight> {
    let resolved: Vec<f64> = smoothed
        .iter()
        .filter(|p| p.is_resolved())
        .map(|p| p.weight.lb())
        .collect();

    if logs.len() < CURRENT_WEIGHT_MIN_LOGS {
        return logs
            .last()
            .and_then(|entry| entry.weight)
            .or_else(|| resolved.last().map(|&lb| Weight::from_lb(lb)));
    }

    moving_average(&resolved, window)
        .last()
        .map(|&lb| Weight::from_lb(lb))
}

/// Progress from `initial` towards `goal`, in percent
///
/// `100 × (1 − |to_go / (initial − goal)|)`, clamped to `[0, 100]` and rounded
/// to one decimal. A goal equal to the starting weight counts as reached.
pub fn percent_to_goal(initial: Weight, current: Weight, goal: Weight) -> f64 {
    let span = initial - goal;
    if span.is_zero() {
        return 100.0;
    }
    let to_go = goal - current;
    let percent = 100.0 * (1.0 - (to_go.lb() / span.lb()).abs());
    round_to(percent.clamp(0.0, 100.0), 1)
}

/// Whole days until the goal date, never less than one
pub fn time_left_days(goal_date: NaiveDate, today: NaiveDate) -> i64 {
    (goal_date - today).num_days().max(1)
}

/// Targets needed to hit the goal weight by the goal date
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalTargets {
    pub weight_to_go: Weight,
    pub weekly_change: Weight,
    /// kcal per day above (positive) or below (negative) maintenance
    pub daily_calorie_delta: f64,
}

impl GoalTargets {
    pub fn new(current: Weight, goal: Weight, time_left_days: i64) -> Self {
        let weight_to_go = goal - current;
        let days = time_left_days.max(1) as f64;
        let weekly_change = weight_to_go / days * 7.0;
        let daily_calorie_delta = weekly_change.lb() * KCAL_PER_LB / 7.0;

        Self {
            weight_to_go,
            weekly_change,
            daily_calorie_delta,
        }
    }

    /// Whether the goal weight sits on the wrong side of the current weight
    /// for `goal` (a gain towards a Lose goal or a loss towards a Gain goal)
    pub fn contradicts(&self, goal: Goal) -> bool {
        match goal {
            Goal::Lose => self.weight_to_go.lb() > 0.0,
            Goal::Gain => self.weight_to_go.lb() < 0.0,
            Goal::Maintain => false,
        }
    }

    /// Daily intake target for a TDEE estimate
    pub fn daily_calorie_target(&self, tdee: f64) -> f64 {
        tdee.abs() + self.daily_calorie_delta
    }
}

/// Projected time until the goal weight is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GoalEta {
    /// The current weight already equals the goal weight
    Reached,
    /// No observed rate towards the goal ("TBD")
    Undetermined,
    Days { days: i64, date: NaiveDate },
}

impl GoalEta {
    pub fn days(&self) -> Option<i64> {
        match self {
            GoalEta::Reached => Some(0),
            GoalEta::Undetermined => None,
            GoalEta::Days { days, .. } => Some(*days),
        }
    }
}

impl fmt::Display for GoalEta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalEta::Reached => write!(f, "0"),
            GoalEta::Undetermined => write!(f, "TBD"),
            GoalEta::Days { days, .. } => write!(f, "{}", days),
        }
    }
}

/// Days to the goal at the observed daily rate
///
/// A rate moving away from the goal never reaches it and is `Undetermined`.
pub fn projected_time_to_goal(
    weight_to_go: Weight,
    daily_rate: Option<Weight>,
    today: NaiveDate,
) -> GoalEta {
    if weight_to_go.is_zero() {
        return GoalEta::Reached;
    }
    let Some(rate) = daily_rate.filter(|r| r.lb() * weight_to_go.lb() > 0.0) else {
        return GoalEta::Undetermined;
    };

    let days = (weight_to_go.lb() / rate.lb()).abs().round();
    if !days.is_finite() || days > MAX_PROJECTION_DAYS {
        return GoalEta::Undetermined;
    }
    let days = days as i64;

    match today.checked_add_signed(Duration::days(days)) {
        Some(date) => GoalEta::Days { days, date },
        None => GoalEta::Undetermined,
    }
}

/// Whether the observed rate moves the weight towards the goal
pub fn is_on_track(weight_to_go: Weight, daily_rate: Option<Weight>) -> bool {
    if weight_to_go.is_zero() {
        return true;
    }
    match daily_rate {
        Some(rate) => rate.lb() * weight_to_go.lb() > 0.0,
        None => false,
    }
}
