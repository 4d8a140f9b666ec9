//! Input validation functions
//!
//! Field validators return a plain message; the series and settings checks
//! wrap them into [`AnalyticsError`] so callers can reject a request before
//! any analytics run.

use chrono::NaiveDate;

use crate::errors::AnalyticsError;
use crate::models::{LogEntry, UserSettings};
use crate::units::{Height, Weight};

/// Validate a body weight
pub fn validate_weight(weight: Weight) -> Result<(), String> {
    let lb = weight.lb();
    if lb.is_nan() || lb.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if lb <= 0.0 {
        return Err("Weight must be positive".to_string());
    }
    if weight.kg() > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate a daily calorie value
pub fn validate_calories(calories: u32) -> Result<(), String> {
    if calories > 50_000 {
        return Err("Calorie value unreasonably high".to_string());
    }
    Ok(())
}

/// Validate height
/// Valid range: 50-300 cm (covers infants to tallest recorded humans)
pub fn validate_height(height: Height) -> Result<(), String> {
    let cm = height.cm();
    if cm.is_nan() || cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate age in years (1-150)
pub fn validate_age(age: u32) -> Result<(), String> {
    match age {
        0 => Err("Age must be at least 1 year".to_string()),
        a if a > 150 => Err("Age cannot exceed 150 years".to_string()),
        _ => Ok(()),
    }
}

/// The goal date must be at least one day after `today`
pub fn validate_goal_date(goal_date: NaiveDate, today: NaiveDate) -> Result<(), String> {
    if goal_date <= today {
        return Err("Goal date must be at least 1 day in the future".to_string());
    }
    Ok(())
}

// ============================================================================
// Aggregate Validation
// ============================================================================

/// Validate every settings field against `today`
pub fn validate_settings(settings: &UserSettings, today: NaiveDate) -> Result<(), AnalyticsError> {
    let checks = [
        ("age", validate_age(settings.age)),
        ("height", validate_height(settings.height)),
        ("goal_weight", validate_weight(settings.goal_weight)),
        ("goal_date", validate_goal_date(settings.goal_date, today)),
    ];

    for (field, result) in checks {
        if let Err(message) = result {
            return Err(AnalyticsError::InvalidSettings(
                ValidationError::new(field, &message).user_message(),
            ));
        }
    }
    Ok(())
}

/// Validate a log series: strictly ascending dates, sane values
pub fn validate_log_series(logs: &[LogEntry]) -> Result<(), AnalyticsError> {
    if logs.is_empty() {
        return Err(AnalyticsError::NoLogs);
    }

    for pair in logs.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(AnalyticsError::InvalidLogSeries(format!(
                "Log dates must be unique and in ascending order ({} follows {})",
                pair[1].date, pair[0].date
            )));
        }
    }

    for entry in logs {
        if let Some(weight) = entry.weight {
            validate_weight(weight).map_err(|message| {
                AnalyticsError::InvalidLogSeries(format!("{}: {}", entry.date, message))
            })?;
        }
        validate_calories(entry.calories_in).map_err(|message| {
            AnalyticsError::InvalidLogSeries(format!("{}: {}", entry.date, message))
        })?;
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map settings field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "age" => "Age",
        "sex" => "Sex",
        "height" => "Height",
        "activity_level" => "Activity Level",
        "goal" => "Goal",
        "goal_weight" => "Goal Weight",
        "goal_date" => "Goal Date",
        "unit_preference" => "Unit Preference",
        _ => field_name,
    }
}

/// Message shown when required settings have not been filled in
pub fn missing_settings_message(fields: &[&str]) -> String {
    let labels: Vec<&str> = fields.iter().map(|f| get_field_display_label(f)).collect();
    format!("Please fill out your settings. Missing: {}", labels.join(", "))
}

/// Validation error with field context
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_validate_weight() {
        assert!(validate_weight(Weight::from_lb(180.0)).is_ok());
        assert!(validate_weight(Weight::from_kg(499.0)).is_ok());
        assert!(validate_weight(Weight::ZERO).is_err());
        assert!(validate_weight(Weight::from_lb(-5.0)).is_err());
        assert!(validate_weight(Weight::from_kg(600.0)).is_err());
        assert!(validate_weight(Weight::from_lb(f64::NAN)).is_err());
    }

    #[test]
    fn test_validate_calories() {
        assert!(validate_calories(0).is_ok());
        assert!(validate_calories(2000).is_ok());
        assert!(validate_calories(100_000).is_err());
    }

    #[test]
    fn test_validate_height() {
        assert!(validate_height(Height::from_cm(170.0)).is_ok());
        assert!(validate_height(Height::from_cm(50.0)).is_ok());
        assert!(validate_height(Height::from_cm(300.0)).is_ok());
        assert!(validate_height(Height::from_cm(49.9)).is_err());
        assert!(validate_height(Height::from_inches(200.0)).is_err());
        assert!(validate_height(Height::from_cm(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_validate_age() {
        assert!(validate_age(30).is_ok());
        assert!(validate_age(0).is_err());
        assert!(validate_age(151).is_err());
    }

    #[test]
    fn test_goal_date_must_be_in_future() {
        assert!(validate_goal_date(today() + Duration::days(1), today()).is_ok());
        assert!(validate_goal_date(today(), today()).is_err());
        assert!(validate_goal_date(today() - Duration::days(3), today()).is_err());
    }

    #[test]
    fn test_validate_settings_reports_field() {
        let mut settings = UserSettings::with_defaults(today());
        assert!(validate_settings(&settings, today()).is_ok());

        settings.goal_date = today();
        assert_eq!(
            validate_settings(&settings, today()),
            Err(AnalyticsError::InvalidSettings(
                "Goal Date: Goal date must be at least 1 day in the future".to_string()
            ))
        );
    }

    #[test]
    fn test_validate_log_series() {
        let d = |n| today() + Duration::days(n);
        assert_eq!(validate_log_series(&[]), Err(AnalyticsError::NoLogs));

        let sorted = vec![
            LogEntry::new(d(0), Some(Weight::from_lb(180.0)), 2000),
            LogEntry::new(d(1), None, 2100),
        ];
        assert!(validate_log_series(&sorted).is_ok());

        let duplicate = vec![
            LogEntry::new(d(0), Some(Weight::from_lb(180.0)), 2000),
            LogEntry::new(d(0), Some(Weight::from_lb(181.0)), 2000),
        ];
        assert!(matches!(
            validate_log_series(&duplicate),
            Err(AnalyticsError::InvalidLogSeries(_))
        ));

        let unsorted = vec![
            LogEntry::new(d(2), None, 2000),
            LogEntry::new(d(1), None, 2000),
        ];
        assert!(validate_log_series(&unsorted).is_err());
    }

    #[test]
    fn test_missing_settings_message() {
        assert_eq!(
            missing_settings_message(&["age", "goal_date"]),
            "Please fill out your settings. Missing: Age, Goal Date"
        );
    }

    #[test]
    fn test_validation_error() {
        let err = ValidationError::new("goal_weight", "must be positive");
        assert_eq!(err.display_label, "Goal Weight");
        assert_eq!(err.user_message(), "Goal Weight: must be positive");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_valid_height_range(cm in 50.0f64..=300.0) {
            prop_assert!(validate_height(Height::from_cm(cm)).is_ok());
        }

        #[test]
        fn prop_valid_weight_range(kg in 1.0f64..=499.0) {
            prop_assert!(validate_weight(Weight::from_kg(kg)).is_ok());
        }
    }
}
