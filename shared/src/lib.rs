//! Calorie Tracker Shared Library
//!
//! The analytics engine: weight smoothing, TDEE estimation, goal projection
//! and the weekly summary, shared by the backend and the WASM module.

pub mod analytics;
pub mod breakdown;
pub mod errors;
pub mod goals;
pub mod models;
pub mod series;
pub mod smoothing;
pub mod tdee;
pub mod types;
pub mod units;
pub mod validation;
pub mod weekly;

// Re-export commonly used items
pub use analytics::{compute_analytics, AnalyticsOptions};
pub use breakdown::IntakeBreakdown;
pub use errors::*;
pub use goals::GoalEta;
pub use models::{ActivityLevel, DateRange, Goal, LogEntry, Sex, UserSettings};
pub use smoothing::{SmoothedWeight, WeightSource};
pub use tdee::{TdeeEstimate, TdeeMethod};
pub use types::*;
pub use weekly::{WeeklySummaryRow, WeeklyTdee};

// Export units module items (canonical source for unit types)
pub use units::*;
