//! Month-over-month comparison of the trailing thirty days against the thirty
//! days before them

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::formulas::{percent_change, round_half_up, round_to_tenth};
use crate::hydration::average_glasses;
use crate::lookup::within;
use crate::models::{NutritionLog, WaterIntakeLog, WorkoutLog};
use crate::window::{DateSpan, DateWindow};
use crate::workout::WorkoutTotals;

pub const MONTH_DAYS: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthComparison {
    pub metric: String,
    pub this_month: f64,
    pub last_month: f64,

    /// Signed, unbounded percentage change
    pub change: f64,

    pub unit: String,
}

impl MonthComparison {
    /// `change` is taken from the unrounded figures; `this_month` and
    /// `last_month` are stored as given.
    fn new(metric: &str, unit: &str, current: f64, previous: f64, shown: (f64, f64)) -> Self {
        MonthComparison {
            metric: metric.to_string(),
            this_month: shown.0,
            last_month: shown.1,
            change: percent_change(current, previous),
            unit: unit.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthComparisons {
    pub nutrition: Vec<MonthComparison>,
    pub hydration: Vec<MonthComparison>,
    pub fitness: Vec<MonthComparison>,
}

/// Nutrition figures of one thirty-day window
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct NutritionMonth {
    avg_daily_calories: f64,
    days_logged: u32,
}

impl NutritionMonth {
    fn over(logs: &[NutritionLog], span: &DateSpan) -> Self {
        let mut total = 0.0;
        let mut days = HashSet::new();
        for log in within(logs, span) {
            total += log.total_calories;
            days.insert(log.date);
        }

        NutritionMonth {
            avg_daily_calories: total / MONTH_DAYS as f64,
            days_logged: days.len() as u32,
        }
    }
}

pub fn month_comparisons(
    window: &DateWindow,
    nutrition: &[NutritionLog],
    water: &[WaterIntakeLog],
    workouts: &[WorkoutLog],
) -> MonthComparisons {
    let this_span = window.span(MONTH_DAYS);
    let last_span = window.preceding_span(MONTH_DAYS);

    let this_food = NutritionMonth::over(nutrition, &this_span);
    let last_food = NutritionMonth::over(nutrition, &last_span);

    let nutrition = vec![
        MonthComparison::new(
            "Avg Daily Calories",
            "cal",
            this_food.avg_daily_calories,
            last_food.avg_daily_calories,
            (
                round_half_up(this_food.avg_daily_calories),
                round_half_up(last_food.avg_daily_calories),
            ),
        ),
        MonthComparison::new(
            "Days Logged",
            "days",
            f64::from(this_food.days_logged),
            f64::from(last_food.days_logged),
            (
                f64::from(this_food.days_logged),
                f64::from(last_food.days_logged),
            ),
        ),
    ];

    let this_glasses = average_glasses(water, &this_span);
    let last_glasses = average_glasses(water, &last_span);

    let hydration = vec![MonthComparison::new(
        "Avg Glasses/Day",
        "glasses",
        this_glasses,
        last_glasses,
        (round_to_tenth(this_glasses), round_to_tenth(last_glasses)),
    )];

    let this_training = WorkoutTotals::over(workouts, &this_span);
    let last_training = WorkoutTotals::over(workouts, &last_span);

    let fitness = vec![
        MonthComparison::new(
            "Total Minutes",
            "min",
            this_training.minutes,
            last_training.minutes,
            (this_training.minutes, last_training.minutes),
        ),
        MonthComparison::new(
            "Workouts Logged",
            "workouts",
            f64::from(this_training.sessions),
            f64::from(last_training.sessions),
            (
                f64::from(this_training.sessions),
                f64::from(last_training.sessions),
            ),
        ),
    ];

    MonthComparisons {
        nutrition,
        hydration,
        fitness,
    }
}
