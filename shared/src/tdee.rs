//! Total daily energy expenditure estimation
//!
//! Two methods are available:
//!
//! - **Energy balance**: inverts the observed weight change and the logged
//!   intake over a trailing window. Needs enough history to be meaningful.
//! - **Harris-Benedict**: the revised BMR equation times an activity
//!   multiplier, used whenever history is too short.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analytics::AnalyticsOptions;
use crate::errors::AnalyticsError;
use crate::models::{Sex, UserSettings};
use crate::series::{moving_average, trailing};
use crate::units::{Height, Weight, WeightUnit};

/// Minimum number of weight points for an energy-balance estimate
pub const MIN_TDEE_POINTS: usize = 3;

/// Method used to produce a TDEE value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TdeeMethod {
    EnergyBalance,
    HarrisBenedict,
}

/// A TDEE value together with how it was obtained
///
/// Energy-balance values are signed (expenditure shows up negative); use
/// [`TdeeEstimate::magnitude`] for anything downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TdeeEstimate {
    pub value: f64,
    pub method: TdeeMethod,
}

impl TdeeEstimate {
    pub fn magnitude(&self) -> f64 {
        self.value.abs()
    }
}

/// Estimate TDEE from weight change and caloric intake
///
/// `weights` are expressed in `unit`. The weights are optionally smoothed
/// with a `window`-sized moving average, then both series are trimmed to the
/// same trailing number of days (at most `n`):
///
/// `TDEE = ((last - first) * kcal_per_unit - sum(calories)) / days`
pub fn energy_balance_tdee(
    calories: &[u32],
    weights: &[f64],
    n: usize,
    unit: WeightUnit,
    smooth: bool,
    window: usize,
) -> Result<f64, AnalyticsError> {
    if weights.len() < MIN_TDEE_POINTS {
        return Err(AnalyticsError::InsufficientData {
            required: MIN_TDEE_POINTS,
            available: weights.len(),
        });
    }

    let series = if smooth {
        moving_average(weights, window)
    } else {
        weights.to_vec()
    };

    let days = n.min(calories.len()).min(series.len());
    if days < 2 {
        return Err(AnalyticsError::InsufficientData {
            required: 2,
            available: days,
        });
    }

    let weights = trailing(&series, days);
    let calories = trailing(calories, days);

    let delta_energy = (weights[days - 1] - weights[0]) * unit.kcal_per_unit();
    let intake: f64 = calories.iter().map(|&c| f64::from(c)).sum();

    Ok((delta_energy - intake) / days as f64)
}

/// Calculate BMR using the revised Harris-Benedict equation
///
/// Men: BMR = 88.362 + 13.397 × weight(kg) + 4.799 × height(cm) - 5.677 × age(y)
/// Women: BMR = 447.593 + 9.247 × weight(kg) + 3.098 × height(cm) - 4.330 × age(y)
pub fn harris_benedict_bmr(weight: Weight, height: Height, age_years: u32, sex: Sex) -> f64 {
    let (weight_kg, height_cm, age) = (weight.kg(), height.cm(), f64::from(age_years));
    match sex {
        Sex::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
        Sex::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age,
    }
}

/// TDEE = Harris-Benedict BMR × activity multiplier
pub fn harris_benedict_tdee(weight: Weight, settings: &UserSettings) -> f64 {
    let bmr = harris_benedict_bmr(weight, settings.height, settings.age, settings.sex);
    bmr * settings.activity_level.multiplier()
}

/// Pick the estimator for a windowed series of pounds and intakes
///
/// Below `options.formula_threshold` logs, or when the energy-balance
/// estimator lacks data, the Harris-Benedict value for `current_weight` is used.
pub fn estimate_tdee(
    calories: &[u32],
    weights_lb: &[f64],
    current_weight: Weight,
    settings: &UserSettings,
    options: &AnalyticsOptions,
) -> TdeeEstimate {
    let formula = || TdeeEstimate {
        value: harris_benedict_tdee(current_weight, settings),
        method: TdeeMethod::HarrisBenedict,
    };

    if weights_lb.len() < options.formula_threshold {
        debug!(
            logs = weights_lb.len(),
            threshold = options.formula_threshold,
            "Using Harris-Benedict estimate"
        );
        return formula();
    }

    match energy_balance_tdee(
        calories,
        weights_lb,
        weights_lb.len(),
        WeightUnit::Lbs,
        true,
        options.smoothing_window,
    ) {
        Ok(value) => TdeeEstimate {
            value,
            method: TdeeMethod::EnergyBalance,
        },
        Err(err) => {
            debug!(error = %err, "Energy balance unavailable, falling back to formula");
            formula()
        }
    }
}
