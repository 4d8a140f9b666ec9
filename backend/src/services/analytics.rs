//! Analytics service
//!
//! Loads a user's logs and settings, then runs the analytics engine:
//! - Own dashboard by user id
//! - Read-only dashboard through a share token

use crate::error::ApiError;
use crate::repositories::{
    LogRecord, LogRepository, SettingsRecord, SettingsRepository, ShareTokenRepository,
    UserRepository,
};
use calorietracker_shared::validation::missing_settings_message;
use calorietracker_shared::{
    compute_analytics, AnalyticsError, AnalyticsOptions, AnalyticsResult, DateRange,
};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

/// Analytics viewed through a share token
#[derive(Debug, Clone, Serialize)]
pub struct SharedAnalytics {
    pub username: String,
    pub notice: String,
    pub analytics: AnalyticsResult,
}

/// Analytics service for business logic
pub struct AnalyticsService;

impl AnalyticsService {
    /// Analytics for a user's own dashboard
    pub async fn user_analytics(
        pool: &PgPool,
        user_id: Uuid,
        range: DateRange,
        today: NaiveDate,
        options: &AnalyticsOptions,
    ) -> Result<AnalyticsResult, ApiError> {
        UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Self::load_and_compute(pool, user_id, range, today, options).await
    }

    /// Analytics for the owner of a share token
    pub async fn shared_analytics(
        pool: &PgPool,
        token: Uuid,
        range: DateRange,
        today: NaiveDate,
        options: &AnalyticsOptions,
    ) -> Result<SharedAnalytics, ApiError> {
        let user_id = ShareTokenRepository::find_user_id(pool, token)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Share link not found".to_string()))?;

        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        info!(user_id = %user.id, "Serving shared analytics");
        let analytics = Self::load_and_compute(pool, user_id, range, today, options).await?;

        Ok(SharedAnalytics {
            notice: format!("You are viewing {}'s analytics dashboard", user.username),
            username: user.username,
            analytics,
        })
    }

    async fn load_and_compute(
        pool: &PgPool,
        user_id: Uuid,
        range: DateRange,
        today: NaiveDate,
        options: &AnalyticsOptions,
    ) -> Result<AnalyticsResult, ApiError> {
        let logs = LogRepository::list_for_user(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;
        let settings = SettingsRepository::get_for_user(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        debug!(user_id = %user_id, logs = logs.len(), "Loaded analytics inputs");
        Self::build(logs, settings, range, today, options)
    }

    /// Run the engine over loaded rows
    ///
    /// Missing logs are reported before incomplete settings.
    pub fn build(
        logs: Vec<LogRecord>,
        settings: Option<SettingsRecord>,
        range: DateRange,
        today: NaiveDate,
        options: &AnalyticsOptions,
    ) -> Result<AnalyticsResult, ApiError> {
        if logs.is_empty() {
            return Err(AnalyticsError::NoLogs.into());
        }

        let settings = settings
            .unwrap_or_default()
            .into_settings()
            .map_err(|missing| ApiError::Unprocessable {
                code: "SETTINGS_INCOMPLETE",
                message: missing_settings_message(&missing),
                field: missing.first().map(|f| f.to_string()),
            })?;

        let entries: Vec<_> = logs.into_iter().map(LogRecord::into_entry).collect();
        Ok(compute_analytics(&entries, &settings, range, today, options)?)
    }
}
