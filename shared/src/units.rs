//! Unit conversion and normalization module
//!
//! This module provides type-safe unit handling with automatic conversion.
//! All analytics arithmetic is done in pounds and centimeters, converted to
//! the user's preference only when a result is assembled.
//!
//! # Design Principles
//!
//! 1. **Internal Consistency**: Weights are pounds, heights are centimeters
//! 2. **Type Safety**: Units are explicit in types, not just f64
//! 3. **Conversion at Boundaries**: Convert on input/output, not in business logic

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Kilograms in one international avoirdupois pound
pub const KG_PER_LB: f64 = 0.453_592_37;

/// Centimeters in one inch
pub const CM_PER_INCH: f64 = 2.54;

/// Energy stored in one pound of body mass (kcal)
pub const KCAL_PER_LB: f64 = 3500.0;

/// Energy stored in one kilogram of body mass (kcal)
pub const KCAL_PER_KG: f64 = 7700.0;

// ============================================================================
// Weight
// ============================================================================

/// A body mass (or a change in body mass), stored in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(f64);

impl Weight {
    pub const ZERO: Weight = Weight(0.0);

    pub fn from_lb(lb: f64) -> Self {
        Self(lb)
    }

    pub fn from_kg(kg: f64) -> Self {
        Self(kg / KG_PER_LB)
    }

    pub fn lb(&self) -> f64 {
        self.0
    }

    pub fn kg(&self) -> f64 {
        self.0 * KG_PER_LB
    }

    /// Magnitude of this weight in `unit`
    pub fn in_unit(&self, unit: WeightUnit) -> f64 {
        unit.from_lb(self.0)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Add for Weight {
    type Output = Weight;

    fn add(self, rhs: Weight) -> Weight {
        Weight(self.0 + rhs.0)
    }
}

impl Sub for Weight {
    type Output = Weight;

    fn sub(self, rhs: Weight) -> Weight {
        Weight(self.0 - rhs.0)
    }
}

impl Mul<f64> for Weight {
    type Output = Weight;

    fn mul(self, rhs: f64) -> Weight {
        Weight(self.0 * rhs)
    }
}

impl Div<f64> for Weight {
    type Output = Weight;

    fn div(self, rhs: f64) -> Weight {
        Weight(self.0 / rhs)
    }
}

/// Weight unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Lbs,
    Kg,
}

impl WeightUnit {
    /// Convert from pounds to this unit
    pub fn from_lb(&self, lb: f64) -> f64 {
        match self {
            WeightUnit::Lbs => lb,
            WeightUnit::Kg => lb * KG_PER_LB,
        }
    }

    /// Energy equivalent of one unit of body mass, used by the energy-balance estimator
    pub fn kcal_per_unit(&self) -> f64 {
        match self {
            WeightUnit::Lbs => KCAL_PER_LB,
            WeightUnit::Kg => KCAL_PER_KG,
        }
    }

    /// Get the label shown next to weights
    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Lbs => "lbs",
            WeightUnit::Kg => "kgs",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lbs" | "lb" | "pound" | "pounds" => Ok(WeightUnit::Lbs),
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            _ => Err(format!("Unknown weight unit: {}", s)),
        }
    }
}

// ============================================================================
// Height
// ============================================================================

/// A body height, stored in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Height(f64);

impl Height {
    pub fn from_cm(cm: f64) -> Self {
        Self(cm)
    }

    pub fn from_inches(inches: f64) -> Self {
        Self(inches * CM_PER_INCH)
    }

    pub fn cm(&self) -> f64 {
        self.0
    }

    pub fn inches(&self) -> f64 {
        self.0 / CM_PER_INCH
    }
}

// ============================================================================
// User Unit Preference
// ============================================================================

/// Display unit system chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitPreference {
    #[default]
    #[serde(alias = "I")]
    Imperial,
    #[serde(alias = "M")]
    Metric,
}

impl UnitPreference {
    pub fn weight_unit(&self) -> WeightUnit {
        match self {
            UnitPreference::Imperial => WeightUnit::Lbs,
            UnitPreference::Metric => WeightUnit::Kg,
        }
    }
}

impl std::str::FromStr for UnitPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "i" | "imperial" => Ok(UnitPreference::Imperial),
            "m" | "metric" => Ok(UnitPreference::Metric),
            _ => Err(format!("Unknown unit preference: {}", s)),
        }
    }
}

/// Round to a fixed number of decimal places for display
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
