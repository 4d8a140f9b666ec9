//! User settings repository
//!
//! Every profile column is nullable until the user fills out the settings
//! page, so conversion into [`UserSettings`] reports which fields are missing.

use anyhow::Result;
use calorietracker_shared::{ActivityLevel, Goal, Height, Sex, UnitPreference, UserSettings, Weight};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::logs::decimal_to_f64;

/// User settings record from database
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct SettingsRecord {
    pub age: Option<i32>,
    pub sex: Option<String>,
    pub height_cm: Option<Decimal>,
    pub activity_level: Option<i16>,
    pub goal: Option<String>,
    pub goal_weight_lb: Option<Decimal>,
    pub goal_date: Option<NaiveDate>,
    pub unit_preference: Option<String>,
}

impl SettingsRecord {
    /// Convert into engine settings, or list the fields still missing
    pub fn into_settings(self) -> Result<UserSettings, Vec<&'static str>> {
        let mut missing = Vec::new();

        let age = self.age.and_then(|a| u32::try_from(a).ok());
        if age.is_none() {
            missing.push("age");
        }
        let sex = self.sex.as_deref().and_then(|s| s.parse::<Sex>().ok());
        if sex.is_none() {
            missing.push("sex");
        }
        let height = self.height_cm.map(|h| Height::from_cm(decimal_to_f64(&h)));
        if height.is_none() {
            missing.push("height");
        }
        let activity_level = self
            .activity_level
            .and_then(|level| u8::try_from(level).ok())
            .and_then(|level| ActivityLevel::try_from(level).ok());
        if activity_level.is_none() {
            missing.push("activity_level");
        }
        let goal_weight = self.goal_weight_lb.map(|w| Weight::from_lb(decimal_to_f64(&w)));
        if goal_weight.is_none() {
            missing.push("goal_weight");
        }
        if self.goal_date.is_none() {
            missing.push("goal_date");
        }

        match (age, sex, height, activity_level, goal_weight, self.goal_date) {
            (Some(age), Some(sex), Some(height), Some(activity_level), Some(goal_weight), Some(goal_date)) => {
                Ok(UserSettings {
                    age,
                    sex,
                    height,
                    activity_level,
                    goal: self
                        .goal
                        .as_deref()
                        .and_then(|g| g.parse::<Goal>().ok())
                        .unwrap_or_default(),
                    goal_weight,
                    goal_date,
                    unit_preference: self
                        .unit_preference
                        .as_deref()
                        .and_then(|u| u.parse::<UnitPreference>().ok())
                        .unwrap_or_default(),
                })
            }
            _ => Err(missing),
        }
    }
}

/// Settings repository for database operations
pub struct SettingsRepository;

impl SettingsRepository {
    /// Get the settings row of a user
    pub async fn get_for_user(pool: &PgPool, user_id: Uuid) -> Result<Option<SettingsRecord>> {
        let record = sqlx::query_as::<_, SettingsRecord>(
            r#"
            SELECT age, sex, height_cm, activity_level, goal, goal_weight_lb, goal_date, unit_preference
            FROM user_settings
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}
