//! Analytics pipeline
//!
//! `compute_analytics` is a pure function of the log series, the settings,
//! the selected date range and today's date. It keeps no state between calls.
//!
//! # Design Principles
//!
//! 1. **Canonical Units**: every stage works in pounds; conversion to the
//!    display unit happens once, while the result is assembled
//! 2. **Recoverable Gaps**: short histories fall back to formulas and
//!    undetermined projections instead of failing the request
//! 3. **Windowing**: the date range trims the charts and statistics, the
//!    weekly table always covers the whole series

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::breakdown::intake_breakdown;
use crate::errors::AnalyticsError;
use crate::goals::{
    current_weight, is_on_track, percent_to_goal, projected_time_to_goal, time_left_days,
    GoalEta, GoalTargets,
};
use crate::models::{DateRange, LogEntry, UserSettings};
use crate::series::{trailing, weight_change, DEFAULT_SMOOTHING_WINDOW};
use crate::smoothing::{smooth_weights, SmoothedWeight};
use crate::tdee::{estimate_tdee, TdeeMethod};
use crate::types::{Advisory, AnalyticsResult, Notice};
use crate::units::{round_to, Weight};
use crate::validation::{validate_log_series, validate_settings};
use crate::weekly::{weekly_summary, WEEKLY_SMOOTHING_WINDOW};

/// Tunables for the analytics pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsOptions {
    /// Logs required before TDEE switches from Harris-Benedict to energy balance
    pub formula_threshold: usize,
    pub smoothing_window: usize,
    pub weekly_smoothing_window: usize,
    /// Target weekly change (lb) above which the goal is flagged as aggressive
    pub aggressive_weekly_change_lb: f64,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self {
            formula_threshold: 10,
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            weekly_smoothing_window: WEEKLY_SMOOTHING_WINDOW,
            aggressive_weekly_change_lb: 2.0,
        }
    }
}

/// Compute the full analytics payload for one user
///
/// Fails only on invalid input: no logs, settings that do not validate, an
/// unsorted series, or a series without a single weight.
#[instrument(skip_all, fields(logs = logs.len(), range = ?range))]
pub fn compute_analytics(
    logs: &[LogEntry],
    settings: &UserSettings,
    range: DateRange,
    today: NaiveDate,
    options: &AnalyticsOptions,
) -> Result<AnalyticsResult, AnalyticsError> {
    validate_log_series(logs)?;
    validate_settings(settings, today)?;

    let unit = settings.unit_preference.weight_unit();
    let display = |w: Weight| round_to(w.in_unit(unit), 1);

    let smoothed = smooth_weights(logs);
    let current = current_weight(logs, &smoothed, options.smoothing_window).ok_or_else(|| {
        AnalyticsError::InvalidLogSeries("At least one weight measurement is required".to_string())
    })?;
    let initial = smoothed
        .iter()
        .find(|p| p.is_resolved())
        .map_or(current, |p| p.weight);

    // Windowed series
    let n = range.window_len(logs.len());
    let window_logs = trailing(logs, n);
    let window_points = trailing(&smoothed, n);
    let (tdee_calories, weights_lb): (Vec<u32>, Vec<f64>) = window_logs
        .iter()
        .zip(window_points)
        .filter(|(_, point)| point.is_resolved())
        .map(|(entry, point)| (entry.calories_in, point.weight.lb()))
        .unzip();
    debug!(window = n, resolved = weights_lb.len(), "Windowed series");

    // Observed progress
    let window = options.smoothing_window;
    let change_raw = weight_change(&weights_lb, weights_lb.len(), false, window);
    let change_smooth = weight_change(&weights_lb, weights_lb.len(), true, window);
    let daily_rate = change_smooth.map(|lb| Weight::from_lb(lb / weights_lb.len() as f64));
    let short_history = weights_lb.len() < options.formula_threshold;

    // Energy expenditure and targets
    let tdee = estimate_tdee(&tdee_calories, &weights_lb, current, settings, options);
    debug!(method = ?tdee.method, tdee = tdee.value, "Estimated TDEE");

    let time_left = time_left_days(settings.goal_date, today);
    let targets = GoalTargets::new(current, settings.goal_weight, time_left);
    let daily_target = targets.daily_calorie_target(tdee.value);
    // Too few logs to project from the observed trend
    let eta = if short_history && !targets.weight_to_go.is_zero() {
        GoalEta::Undetermined
    } else {
        projected_time_to_goal(targets.weight_to_go, daily_rate, today)
    };
    let on_track = is_on_track(targets.weight_to_go, daily_rate);

    let calories: Vec<u32> = window_logs.iter().map(|entry| entry.calories_in).collect();
    let breakdown = intake_breakdown(&calories, tdee.magnitude(), daily_target, settings.goal);
    let weekly = weekly_summary(
        logs,
        &smoothed,
        unit,
        tdee.magnitude(),
        options.weekly_smoothing_window,
    );

    let advisories = collect_advisories(
        window_logs,
        window_points,
        &targets,
        settings,
        tdee.method,
        weights_lb.len(),
        options,
    );

    Ok(AnalyticsResult {
        units: unit,
        date_range: n,
        timestamps: window_logs.iter().map(|entry| entry.date).collect(),
        weights: window_points
            .iter()
            .map(|p| p.is_resolved().then(|| display(p.weight)))
            .collect(),
        calories,
        current_weight: display(current),
        goal_weight: display(settings.goal_weight),
        weight_to_go: display(targets.weight_to_go),
        percent_to_goal: percent_to_goal(initial, current, settings.goal_weight),
        goal: settings.goal,
        goal_date: settings.goal_date,
        time_left_days: time_left,
        goal_weight_change_per_week: round_to(targets.weekly_change.in_unit(unit), 2),
        weight_change_raw: change_raw.map(|lb| display(Weight::from_lb(lb))),
        weight_change_smooth: change_smooth.map(|lb| display(Weight::from_lb(lb))),
        current_rate_of_weight_change: daily_rate.map(|rate| round_to((rate * 7.0).in_unit(unit), 2)),
        estimated_tdee: tdee.magnitude().round(),
        tdee_method: tdee.method,
        target_daily_calorie_delta: targets.daily_calorie_delta.round(),
        daily_caloric_intake_target: daily_target.round(),
        projected_time_to_goal: eta,
        on_track,
        intake_breakdown: breakdown,
        weekly_summary: weekly,
        advisories: advisories.into_iter().map(Notice::from).collect(),
    })
}

fn collect_advisories(
    logs: &[LogEntry],
    points: &[SmoothedWeight],
    targets: &GoalTargets,
    settings: &UserSettings,
    method: TdeeMethod,
    weighed_logs: usize,
    options: &AnalyticsOptions,
) -> Vec<Advisory> {
    let unit = settings.unit_preference.weight_unit();
    let mut advisories = Vec::new();

    let missing = logs.iter().filter(|entry| entry.weight.is_none()).count();
    if missing > 0 {
        advisories.push(Advisory::MissingWeights { count: missing });
    }

    let unresolved: Vec<NaiveDate> = points
        .iter()
        .filter(|p| !p.is_resolved())
        .map(|p| p.date)
        .collect();
    if !unresolved.is_empty() {
        debug!(count = unresolved.len(), "Unresolved weights");
        advisories.push(Advisory::UnresolvedWeights { dates: unresolved });
    }

    let no_calories = logs.iter().filter(|entry| entry.calories_in == 0).count();
    if no_calories > 0 {
        advisories.push(Advisory::MissingCalories { count: no_calories });
    }

    if targets.weekly_change.lb().abs() > options.aggressive_weekly_change_lb {
        advisories.push(Advisory::AggressiveGoal {
            weekly_change: round_to(targets.weekly_change.in_unit(unit), 2),
        });
    }

    if targets.contradicts(settings.goal) {
        advisories.push(Advisory::GoalDirectionMismatch {
            goal: settings.goal,
            weight_to_go: round_to(targets.weight_to_go.in_unit(unit), 1),
        });
    }

    if method == TdeeMethod::HarrisBenedict {
        advisories.push(Advisory::FormulaBasedEstimate {
            logs: weighed_logs,
            required: options.formula_threshold,
        });
    }

    advisories
}
