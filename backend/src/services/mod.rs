//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the analytics engine.

pub mod analytics;

pub use analytics::{AnalyticsService, SharedAnalytics};
