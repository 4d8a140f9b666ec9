//! Database repositories
//!
//! Provides the read-only data access layer used by analytics.

pub mod logs;
pub mod settings;
pub mod share_tokens;
pub mod user;

pub use logs::{LogRecord, LogRepository};
pub use settings::{SettingsRecord, SettingsRepository};
pub use share_tokens::ShareTokenRepository;
pub use user::{UserRecord, UserRepository};
