//! Calorie Tracker WASM Module
//!
//! WebAssembly bindings so the dashboard can recompute analytics in the
//! browser (for example while the user edits a goal) without a round trip.
//! Inputs and outputs cross the boundary as JSON using the shared types.

use calorietracker_shared::tdee::harris_benedict_bmr;
use calorietracker_shared::{
    compute_analytics, series, ActivityLevel, AnalyticsOptions, DateRange, Height, LogEntry, Sex,
    UserSettings, Weight,
};
use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

/// Compute the analytics payload from JSON logs and settings
///
/// `today` is an ISO date; `date_range` takes the same values as the
/// `dateRange` query parameter.
#[wasm_bindgen(js_name = computeAnalytics)]
pub fn compute_analytics_json(
    logs_json: &str,
    settings_json: &str,
    date_range: Option<String>,
    today: &str,
) -> Result<String, JsError> {
    analyze(logs_json, settings_json, date_range.as_deref(), today).map_err(|e| JsError::new(&e))
}

fn analyze(
    logs_json: &str,
    settings_json: &str,
    date_range: Option<&str>,
    today: &str,
) -> Result<String, String> {
    let logs: Vec<LogEntry> =
        serde_json::from_str(logs_json).map_err(|e| format!("Invalid logs: {}", e))?;
    let settings: UserSettings =
        serde_json::from_str(settings_json).map_err(|e| format!("Invalid settings: {}", e))?;
    let today = NaiveDate::parse_from_str(today, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", today, e))?;

    let result = compute_analytics(
        &logs,
        &settings,
        DateRange::from_query(date_range),
        today,
        &AnalyticsOptions::default(),
    )
    .map_err(|e| e.to_string())?;

    serde_json::to_string(&result).map_err(|e| e.to_string())
}

/// Trailing moving average (only full windows are emitted)
#[wasm_bindgen(js_name = movingAverage)]
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    series::moving_average(values, window)
}

/// Harris-Benedict TDEE estimate in kcal/day
///
/// Returns `None` for an activity level outside 1-5.
#[wasm_bindgen(js_name = harrisBenedictTdee)]
pub fn harris_benedict_tdee(
    weight_lb: f64,
    height_cm: f64,
    age_years: u32,
    is_male: bool,
    activity_level: u8,
) -> Option<f64> {
    let activity_level = ActivityLevel::try_from(activity_level).ok()?;
    let sex = if is_male { Sex::Male } else { Sex::Female };
    let bmr = harris_benedict_bmr(Weight::from_lb(weight_lb), Height::from_cm(height_cm), age_years, sex);
    Some(bmr * activity_level.multiplier())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn logs_json(days: u32) -> String {
        let logs: Vec<Value> = (0..days)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + chrono::Duration::days(i as i64);
                json!({
                    "date": date.to_string(),
                    "weight": 200.0 - 0.2 * i as f64,
                    "calories_in": 2000,
                })
            })
            .collect();
        serde_json::to_string(&logs).unwrap()
    }

    fn settings_json() -> String {
        json!({
            "age": 34,
            "sex": "male",
            "height": 180.0,
            "activity_level": "lightly_active",
            "goal": "lose",
            "goal_weight": 175.0,
            "goal_date": "2024-08-01",
            "unit_preference": "imperial",
        })
        .to_string()
    }

    #[test]
    fn test_moving_average() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = moving_average(&values, 3);
        assert_eq!(result.len(), 3);
        assert!((result[0] - 2.0).abs() < 0.001); // avg of [1,2,3]
        assert!((result[2] - 4.0).abs() < 0.001); // avg of [3,4,5]
    }

    #[test]
    fn test_harris_benedict_matches_shared() {
        let tdee = harris_benedict_tdee(180.0, 180.0, 34, true, 2).unwrap();
        assert!(tdee > 2000.0 && tdee < 3500.0);
        assert!(harris_benedict_tdee(180.0, 180.0, 34, true, 9).is_none());
    }

    #[test]
    fn test_analyze_returns_json_payload() {
        let output = analyze(&logs_json(30), &settings_json(), Some("14"), "2024-03-30").unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["date_range"], 14);
        assert_eq!(value["tdee_method"], "energy_balance");
        assert_eq!(value["timestamps"].as_array().unwrap().len(), 14);
    }

    #[test]
    fn test_analyze_reports_engine_errors() {
        let err = analyze("[]", &settings_json(), None, "2024-03-30").unwrap_err();
        assert_eq!(err, "You need to have made at least one log entry");
    }

    #[test]
    fn test_analyze_rejects_bad_input() {
        assert!(analyze("not json", &settings_json(), None, "2024-03-30")
            .unwrap_err()
            .starts_with("Invalid logs"));
        assert!(analyze(&logs_json(3), &settings_json(), None, "30/03/2024")
            .unwrap_err()
            .starts_with("Invalid date"));
    }
}
