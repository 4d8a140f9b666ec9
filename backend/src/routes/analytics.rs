//! Analytics API routes
//!
//! The caller is authenticated upstream; these handlers only resolve the
//! user (directly or through a share token) and return the computed payload.

use crate::error::ApiError;
use crate::services::{AnalyticsService, SharedAnalytics};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use calorietracker_shared::{AnalyticsResult, DateRange};
use serde::Deserialize;
use uuid::Uuid;

/// Create analytics routes
pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:user_id/analytics", get(get_user_analytics))
        .route("/analytics/shared/:token", get(get_shared_analytics))
}

/// Query parameters for analytics requests
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    /// Trailing window in days: 7, 14, 31, 90 or 180; anything else means all
    #[serde(rename = "dateRange")]
    pub date_range: Option<String>,
}

impl AnalyticsQuery {
    fn range(&self) -> DateRange {
        DateRange::from_query(self.date_range.as_deref())
    }
}

/// GET /api/v1/users/:user_id/analytics - Analytics for a user
async fn get_user_analytics(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResult>, ApiError> {
    let today = chrono::Utc::now().date_naive();
    let result =
        AnalyticsService::user_analytics(state.db(), user_id, query.range(), today, state.analytics())
            .await?;
    Ok(Json(result))
}

/// GET /api/v1/analytics/shared/:token - Read-only analytics through a share link
async fn get_shared_analytics(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<SharedAnalytics>, ApiError> {
    let today = chrono::Utc::now().date_naive();
    let result =
        AnalyticsService::shared_analytics(state.db(), token, query.range(), today, state.analytics())
            .await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("7"), DateRange::Week)]
    #[case(Some("180"), DateRange::HalfYear)]
    #[case(Some("all"), DateRange::All)]
    #[case(None, DateRange::All)]
    fn test_query_range(#[case] raw: Option<&str>, #[case] expected: DateRange) {
        let query = AnalyticsQuery {
            date_range: raw.map(str::to_string),
        };
        assert_eq!(query.range(), expected);
    }
}
