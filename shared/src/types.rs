//! Analytics result types
//!
//! Weights here are already converted to the display unit named by `units`
//! and rounded for presentation; calorie values are kcal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::breakdown::IntakeBreakdown;
use crate::goals::GoalEta;
use crate::models::Goal;
use crate::tdee::TdeeMethod;
use crate::units::WeightUnit;
use crate::weekly::WeeklySummaryRow;

/// Full analytics payload for one user and date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResult {
    pub units: WeightUnit,
    /// Number of trailing log entries the windowed statistics cover
    pub date_range: usize,
    pub timestamps: Vec<NaiveDate>,
    /// `None` where a weight could not be resolved
    pub weights: Vec<Option<f64>>,
    pub calories: Vec<u32>,

    // Goals and targets
    pub current_weight: f64,
    pub goal_weight: f64,
    pub weight_to_go: f64,
    pub percent_to_goal: f64,
    pub goal: Goal,
    pub goal_date: NaiveDate,
    pub time_left_days: i64,
    pub goal_weight_change_per_week: f64,

    // Progress
    pub weight_change_raw: Option<f64>,
    pub weight_change_smooth: Option<f64>,
    /// Observed change per week
    pub current_rate_of_weight_change: Option<f64>,
    pub estimated_tdee: f64,
    pub tdee_method: TdeeMethod,
    pub target_daily_calorie_delta: f64,
    pub daily_caloric_intake_target: f64,
    pub projected_time_to_goal: GoalEta,
    pub on_track: bool,

    pub intake_breakdown: IntakeBreakdown,
    pub weekly_summary: Vec<WeeklySummaryRow>,
    pub advisories: Vec<Notice>,
}

/// Notices shown alongside the analytics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Days logged without a weight
    MissingWeights { count: usize },
    /// Days whose weight could not be estimated at all
    UnresolvedWeights { dates: Vec<NaiveDate> },
    /// Days logged with zero calories
    MissingCalories { count: usize },
    /// The goal needs more than the recommended weekly change (display unit)
    AggressiveGoal { weekly_change: f64 },
    /// TDEE comes from the Harris-Benedict formula
    FormulaBasedEstimate { logs: usize, required: usize },
    /// The goal weight lies on the wrong side of the current weight for the goal
    GoalDirectionMismatch { goal: Goal, weight_to_go: f64 },
}

impl Advisory {
    pub fn message(&self) -> String {
        match self {
            Advisory::MissingWeights { count } => format!(
                "{} log entries have no weight; those days use an estimated weight",
                count
            ),
            Advisory::UnresolvedWeights { dates } => format!(
                "Weights for {} days could not be estimated and are left out of the charts",
                dates.len()
            ),
            Advisory::MissingCalories { count } => format!(
                "{} log entries have zero calories, which lowers the TDEE estimate",
                count
            ),
            Advisory::AggressiveGoal { .. } => "Warning: Your goal weight and/or date are very aggressive. \
                We recommend setting goals that require between -2 to 2 lbs (-1 to 1 kgs) of weight change per week."
                .to_string(),
            Advisory::FormulaBasedEstimate { required, .. } => format!(
                "Note: For accuracy, your targets & predictions will be formula based until you have at least {} log entries",
                required
            ),
            Advisory::GoalDirectionMismatch { goal, .. } => {
                let direction = match goal {
                    Goal::Gain => "below",
                    _ => "above",
                };
                format!(
                    "Your goal weight is {} your current weight; targets follow the goal weight",
                    direction
                )
            }
        }
    }
}

/// An advisory as shown to the user: its data plus the rendered message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    #[serde(flatten)]
    pub advisory: Advisory,
    pub message: String,
}

impl From<Advisory> for Notice {
    fn from(advisory: Advisory) -> Self {
        Self {
            message: advisory.message(),
            advisory,
        }
    }
}
