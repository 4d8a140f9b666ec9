//! Daily log repository
//!
//! Logs are only read here; a stored weight of zero is the legacy marker for
//! a day that was not weighed.

use anyhow::Result;
use calorietracker_shared::{ActivityLevel, LogEntry};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Log record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LogRecord {
    pub date: NaiveDate,
    pub weight_lb: Decimal,
    pub calories_in: i32,
    pub calories_out: Option<i32>,
    pub activity_level: Option<i16>,
}

impl LogRecord {
    /// Convert into the engine's entry type
    pub fn into_entry(self) -> LogEntry {
        let calories_in = u32::try_from(self.calories_in).unwrap_or(0);
        let mut entry = LogEntry::from_raw_pounds(self.date, decimal_to_f64(&self.weight_lb), calories_in);
        entry.calories_out = self.calories_out.and_then(|c| u32::try_from(c).ok());
        entry.activity_level = self
            .activity_level
            .and_then(|level| u8::try_from(level).ok())
            .and_then(|level| ActivityLevel::try_from(level).ok());
        entry
    }
}

/// Log repository for database operations
pub struct LogRepository;

impl LogRepository {
    /// All logs of a user, oldest first
    pub async fn list_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<LogRecord>> {
        let records = sqlx::query_as::<_, LogRecord>(
            r#"
            SELECT date, weight_lb, calories_in, calories_out, activity_level
            FROM logs
            WHERE user_id = $1
            ORDER BY date ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}

pub(crate) fn decimal_to_f64(d: &Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}
