//! Caloric intake breakdown (pie chart data)

use serde::{Deserialize, Serialize};

use crate::models::Goal;

/// Days of the window counted against the TDEE and the daily target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeBreakdown {
    /// Labels for the red, green and yellow slices, in that order
    pub labels: [String; 3],
    pub red: usize,
    pub yellow: usize,
    pub green: usize,
}

/// Count days by where intake fell relative to `tdee` and `daily_target`
///
/// For losing or maintaining, eating above TDEE is red and below the target
/// green; gaining flips both sides. Yellow days lie strictly in between.
pub fn intake_breakdown(calories: &[u32], tdee: f64, daily_target: f64, goal: Goal) -> IntakeBreakdown {
    let (tdee, target) = (tdee.abs(), daily_target.abs());

    match goal {
        Goal::Lose | Goal::Maintain => IntakeBreakdown {
            labels: [
                "Days Above TDEE".to_string(),
                "Days Below Target".to_string(),
                "Days Above Target but Below TDEE".to_string(),
            ],
            red: count_days(calories, |c| c > tdee),
            green: count_days(calories, |c| c < target),
            yellow: count_days(calories, |c| target < c && c < tdee),
        },
        Goal::Gain => IntakeBreakdown {
            labels: [
                "Days Below TDEE".to_string(),
                "Days Above Target".to_string(),
                "Days Above TDEE but Below Target".to_string(),
            ],
            red: count_days(calories, |c| c < tdee),
            green: count_days(calories, |c| c > target),
            yellow: count_days(calories, |c| tdee < c && c < target),
        },
    }
}

fn count_days(calories: &[u32], pred: impl Fn(f64) -> bool) -> usize {
    calories.iter().filter(|&&c| pred(f64::from(c))).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_losing_breakdown() {
        let calories = [1500, 1900, 2100, 2600, 2800];
        let b = intake_breakdown(&calories, 2500.0, 2000.0, Goal::Lose);
        assert_eq!((b.red, b.yellow, b.green), (2, 1, 2));
        assert_eq!(b.labels[0], "Days Above TDEE");
    }

    #[test]
    fn test_gaining_breakdown() {
        let calories = [2000, 2600, 2900, 3100];
        let b = intake_breakdown(&calories, 2500.0, 3000.0, Goal::Gain);
        assert_eq!((b.red, b.yellow, b.green), (1, 2, 1));
        assert_eq!(b.labels[1], "Days Above Target");
    }

    #[test]
    fn test_boundaries_are_not_counted() {
        let b = intake_breakdown(&[2000, 2500], 2500.0, 2000.0, Goal::Maintain);
        assert_eq!((b.red, b.yellow, b.green), (0, 0, 0));
    }

    #[test]
    fn test_signed_tdee_uses_magnitude() {
        let b = intake_breakdown(&[2600], -2500.0, 2000.0, Goal::Lose);
        assert_eq!(b.red, 1);
    }
}
