//! Weekly summary table
//!
//! Days are grouped into Monday-aligned weeks counted from the Unix epoch,
//! so a week never splits at a year boundary.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::LogEntry;
use crate::smoothing::SmoothedWeight;
use crate::tdee::energy_balance_tdee;
use crate::units::{round_to, WeightUnit};

/// `num_days_from_ce` of 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Smoothing window used for per-week TDEE
pub const WEEKLY_SMOOTHING_WINDOW: usize = 3;

/// Monday-aligned week number counted from the Unix epoch
///
/// 1970-01-01 was a Thursday, hence the three day shift.
pub fn week_bucket(date: NaiveDate) -> i32 {
    let days_since_epoch = date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE;
    (days_since_epoch + 3).div_euclid(7)
}

/// TDEE column of the weekly table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeeklyTdee {
    /// First week: no previous week to compare against
    NotApplicable,
    InsufficientData,
    Estimated { kcal: f64 },
}

/// One row of the weekly summary table, weights in the display unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummaryRow {
    pub week_number: usize,
    /// e.g. "Jan. 2 - Jan. 8"
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub calories_in_mean: u32,
    pub calories_in_total: u32,
    pub mean_weight: Option<f64>,
    pub weight_change: Option<f64>,
    pub tdee: WeeklyTdee,
}

/// Build the weekly table over the full series
///
/// `smoothed` must line up with `logs`. The last (current, possibly partial)
/// week reports `overall_tdee` instead of a week-local estimate.
pub fn weekly_summary(
    logs: &[LogEntry],
    smoothed: &[SmoothedWeight],
    unit: WeightUnit,
    overall_tdee: f64,
    window: usize,
) -> Vec<WeeklySummaryRow> {
    let mut weeks: Vec<Vec<(&LogEntry, &SmoothedWeight)>> = Vec::new();
    let mut current_bucket = None;
    for pair in logs.iter().zip(smoothed) {
        let bucket = week_bucket(pair.0.date);
        if current_bucket != Some(bucket) {
            weeks.push(Vec::new());
            current_bucket = Some(bucket);
        }
        if let Some(week) = weeks.last_mut() {
            week.push(pair);
        }
    }

    let mut rows: Vec<WeeklySummaryRow> = Vec::with_capacity(weeks.len());
    let mut previous_weight: Option<f64> = None;

    for (week_number, week) in weeks.iter().enumerate() {
        let (Some(first), Some(last)) = (week.first(), week.last()) else {
            continue;
        };

        let calories: Vec<u32> = week.iter().map(|(entry, _)| entry.calories_in).collect();
        let total: u32 = calories.iter().sum();
        let mean = (f64::from(total) / calories.len() as f64).round() as u32;

        let resolved: Vec<(u32, f64)> = week
            .iter()
            .filter(|(_, point)| point.is_resolved())
            .map(|(entry, point)| (entry.calories_in, point.weight.lb()))
            .collect();

        let mean_weight_lb = if resolved.is_empty() {
            None
        } else {
            Some(resolved.iter().map(|(_, w)| w).sum::<f64>() / resolved.len() as f64)
        };
        let mean_weight = mean_weight_lb.map(|lb| round_to(unit.from_lb(lb), 2));

        let weight_change = if week_number == 0 {
            Some(0.0)
        } else {
            match (mean_weight_lb, previous_weight) {
                (Some(now), Some(before)) => Some(round_to(unit.from_lb(now - before), 2)),
                _ => None,
            }
        };
        if mean_weight_lb.is_some() {
            previous_weight = mean_weight_lb;
        }

        let tdee = if week_number == 0 {
            WeeklyTdee::NotApplicable
        } else {
            let (week_calories, week_weights): (Vec<u32>, Vec<f64>) = resolved.into_iter().unzip();
            match energy_balance_tdee(
                &week_calories,
                &week_weights,
                week_weights.len(),
                WeightUnit::Lbs,
                true,
                window,
            ) {
                Ok(kcal) => WeeklyTdee::Estimated {
                    kcal: kcal.abs().round(),
                },
                Err(_) => WeeklyTdee::InsufficientData,
            }
        };

        rows.push(WeeklySummaryRow {
            week_number,
            label: format!("{} - {}", short_date(first.0.date), short_date(last.0.date)),
            start: first.0.date,
            end: last.0.date,
            calories_in_mean: mean,
            calories_in_total: total,
            mean_weight,
            weight_change,
            tdee,
        });
    }

    if let Some(current) = rows.last_mut() {
        current.tdee = WeeklyTdee::Estimated {
            kcal: overall_tdee.abs().round(),
        };
    }

    rows
}

/// "Jan. 2" style label
fn short_date(date: NaiveDate) -> String {
    date.format("%b. %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smoothing::smooth_weights;
    use crate::units::Weight;
    use chrono::Duration;
    use rstest::rstest;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
    }

    fn daily(days: usize, start_lb: f64, step_lb: f64, calories: u32) -> Vec<LogEntry> {
        (0..days)
            .map(|i| {
                LogEntry::new(
                    monday() + Duration::days(i as i64),
                    Some(Weight::from_lb(start_lb + step_lb * i as f64)),
                    calories,
                )
            })
            .collect()
    }

    #[rstest]
    #[case(1970, 1, 4, 0)]
    #[case(1970, 1, 5, 1)]
    #[case(1970, 1, 11, 1)]
    #[case(1970, 1, 12, 2)]
    #[case(1969, 12, 28, -1)]
    fn test_week_bucket_is_monday_aligned(
        #[case] y: i32,
        #[case] m: u32,
        #[case] d: u32,
        #[case] expected: i32,
    ) {
        assert_eq!(week_bucket(NaiveDate::from_ymd_opt(y, m, d).unwrap()), expected);
    }

    #[test]
    fn test_year_boundary_stays_in_one_week() {
        // Mon 2024-12-30 through Sun 2025-01-05
        let monday = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(week_bucket(monday), week_bucket(sunday));
        assert_ne!(week_bucket(sunday), week_bucket(sunday + Duration::days(1)));
    }

    #[test]
    fn test_rows_per_week_with_partial_last_week() {
        let logs = daily(10, 200.0, -0.5, 2000);
        let smoothed = smooth_weights(&logs);
        let rows = weekly_summary(&logs, &smoothed, WeightUnit::Lbs, 2400.0, WEEKLY_SMOOTHING_WINDOW);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "Jan. 2 - Jan. 8");
        assert_eq!(rows[1].label, "Jan. 9 - Jan. 11");
        assert_eq!(rows[0].calories_in_total, 14000);
        assert_eq!(rows[0].calories_in_mean, 2000);
        assert_eq!(rows[1].calories_in_total, 6000);
        // week one: mean of 200.0 ..= 197.0
        assert_eq!(rows[0].mean_weight, Some(198.5));
        // week two: mean of 196.5, 196.0, 195.5
        assert_eq!(rows[1].mean_weight, Some(196.0));
        assert_eq!(rows[1].weight_change, Some(-2.5));
    }

    #[test]
    fn test_two_full_weeks_give_two_rows() {
        let logs = daily(14, 200.0, -0.1, 2000);
        let smoothed = smooth_weights(&logs);
        let rows = weekly_summary(&logs, &smoothed, WeightUnit::Lbs, 2350.0, WEEKLY_SMOOTHING_WINDOW);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].weight_change, Some(0.0));
        assert_eq!(rows[0].tdee, WeeklyTdee::NotApplicable);
        assert_eq!(rows[1].tdee, WeeklyTdee::Estimated { kcal: 2350.0 });
    }

    #[test]
    fn test_first_row_not_applicable_last_row_overall() {
        let logs = daily(21, 200.0, -0.25, 2000);
        let smoothed = smooth_weights(&logs);
        let rows = weekly_summary(&logs, &smoothed, WeightUnit::Lbs, 2431.6, WEEKLY_SMOOTHING_WINDOW);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].tdee, WeeklyTdee::NotApplicable);
        assert_eq!(rows[0].weight_change, Some(0.0));
        // 5 smoothed points, -0.25 lb/day: (-1 * 3500 - 10000) / 5
        assert_eq!(rows[1].tdee, WeeklyTdee::Estimated { kcal: 2700.0 });
        assert_eq!(rows[2].tdee, WeeklyTdee::Estimated { kcal: 2432.0 });
    }

    #[test]
    fn test_single_week_reports_overall_estimate() {
        let logs = daily(4, 180.0, 0.0, 1800);
        let smoothed = smooth_weights(&logs);
        let rows = weekly_summary(&logs, &smoothed, WeightUnit::Lbs, -1950.4, WEEKLY_SMOOTHING_WINDOW);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tdee, WeeklyTdee::Estimated { kcal: 1950.0 });
    }

    #[test]
    fn test_short_middle_week_is_insufficient() {
        let mut logs = daily(7, 200.0, 0.0, 2000);
        // two logs in the second week, then one in the third
        logs.push(LogEntry::new(monday() + Duration::days(7), Some(Weight::from_lb(199.0)), 2000));
        logs.push(LogEntry::new(monday() + Duration::days(8), Some(Weight::from_lb(199.0)), 2000));
        logs.push(LogEntry::new(monday() + Duration::days(14), Some(Weight::from_lb(198.0)), 2000));
        let smoothed = smooth_weights(&logs);
        let rows = weekly_summary(&logs, &smoothed, WeightUnit::Lbs, 2000.0, WEEKLY_SMOOTHING_WINDOW);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].tdee, WeeklyTdee::InsufficientData);
    }

    #[test]
    fn test_display_unit_conversion() {
        let logs = daily(7, 220.462_262_18, 0.0, 2000);
        let smoothed = smooth_weights(&logs);
        let rows = weekly_summary(&logs, &smoothed, WeightUnit::Kg, 2000.0, WEEKLY_SMOOTHING_WINDOW);
        assert_eq!(rows[0].mean_weight, Some(100.0));
    }

    #[test]
    fn test_empty_series() {
        assert!(weekly_summary(&[], &[], WeightUnit::Lbs, 2000.0, 3).is_empty());
    }
}
