//! Data models consumed by the analytics engine

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::units::{Height, UnitPreference, Weight};

/// Biological sex, used by the Harris-Benedict formula only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[serde(alias = "M")]
    Male,
    #[serde(alias = "F")]
    Female,
}

impl std::str::FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "m" | "male" => Ok(Sex::Male),
            "f" | "female" => Ok(Sex::Female),
            _ => Err(format!("Unknown sex: {}", s)),
        }
    }
}

/// Activity level, keyed 1 through 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    #[default]
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise, physical job
    ExtraActive,
}

impl ActivityLevel {
    /// Harris-Benedict activity multiplier
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    /// Numeric level as stored in settings (1-5)
    pub fn level(&self) -> u8 {
        match self {
            ActivityLevel::Sedentary => 1,
            ActivityLevel::LightlyActive => 2,
            ActivityLevel::ModeratelyActive => 3,
            ActivityLevel::VeryActive => 4,
            ActivityLevel::ExtraActive => 5,
        }
    }
}

impl TryFrom<u8> for ActivityLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(ActivityLevel::Sedentary),
            2 => Ok(ActivityLevel::LightlyActive),
            3 => Ok(ActivityLevel::ModeratelyActive),
            4 => Ok(ActivityLevel::VeryActive),
            5 => Ok(ActivityLevel::ExtraActive),
            _ => Err(format!("Activity level must be between 1 and 5, got {}", level)),
        }
    }
}

/// Direction of the user's weight goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    #[serde(alias = "L")]
    Lose,
    #[default]
    #[serde(alias = "M")]
    Maintain,
    #[serde(alias = "G")]
    Gain,
}

impl std::str::FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "l" | "lose" => Ok(Goal::Lose),
            "m" | "maintain" => Ok(Goal::Maintain),
            "g" | "gain" => Ok(Goal::Gain),
            _ => Err(format!("Unknown goal: {}", s)),
        }
    }
}

/// One day of logged data
///
/// A missing weight measurement is `None`. Stores that still use a zero
/// weight to mean "not measured" go through [`LogEntry::from_raw_pounds`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub date: NaiveDate,
    #[serde(default)]
    pub weight: Option<Weight>,
    pub calories_in: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_out: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
}

impl LogEntry {
    pub fn new(date: NaiveDate, weight: Option<Weight>, calories_in: u32) -> Self {
        Self {
            date,
            weight,
            calories_in,
            calories_out: None,
            activity_level: None,
        }
    }

    /// Build an entry from a stored pound value where zero means missing
    pub fn from_raw_pounds(date: NaiveDate, weight_lb: f64, calories_in: u32) -> Self {
        let weight = (weight_lb != 0.0).then(|| Weight::from_lb(weight_lb));
        Self::new(date, weight, calories_in)
    }
}

/// Per-user settings threaded through every analytics stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub age: u32,
    pub sex: Sex,
    pub height: Height,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub goal_weight: Weight,
    pub goal_date: NaiveDate,
    pub unit_preference: UnitPreference,
}

impl UserSettings {
    /// Settings given to a freshly created account
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            age: 30,
            sex: Sex::Female,
            height: Height::from_cm(170.0),
            activity_level: ActivityLevel::LightlyActive,
            goal: Goal::Maintain,
            goal_weight: Weight::from_lb(150.0),
            goal_date: today + Duration::days(90),
            unit_preference: UnitPreference::Imperial,
        }
    }
}

/// Trailing window selected on the analytics page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    Week,
    Fortnight,
    Month,
    Quarter,
    HalfYear,
    #[default]
    All,
}

impl DateRange {
    /// Number of trailing entries, `None` for the whole series
    pub fn days(&self) -> Option<usize> {
        match self {
            DateRange::Week => Some(7),
            DateRange::Fortnight => Some(14),
            DateRange::Month => Some(31),
            DateRange::Quarter => Some(90),
            DateRange::HalfYear => Some(180),
            DateRange::All => None,
        }
    }

    /// Parse the `dateRange` query value; anything unrecognised selects the whole series
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("7") => DateRange::Week,
            Some("14") => DateRange::Fortnight,
            Some("31") => DateRange::Month,
            Some("90") => DateRange::Quarter,
            Some("180") => DateRange::HalfYear,
            _ => DateRange::All,
        }
    }

    /// Length of the trailing slice of a series of `len` entries
    pub fn window_len(&self, len: usize) -> usize {
        self.days().map_or(len, |days| days.min(len))
    }
}
