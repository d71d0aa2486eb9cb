//! Nutrition calculators
//!
//! All of them read from [`aggregate_daily_nutrition`], which folds the meal
//! logs into one record per calendar day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::formulas::{mean_or_zero, round_half_up};
use crate::models::NutritionLog;
use crate::window::DateWindow;

/// Lookback for the per-day nutrition series
pub const NUTRITION_LOOKBACK_DAYS: usize = 30;

/// All meals of one day added together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyNutrition {
    pub date: NaiveDate,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,

    /// Distinct meal tags logged that day
    pub meal_types: BTreeSet<String>,

    pub log_count: u32,
}

impl DailyNutrition {
    fn empty(date: NaiveDate) -> Self {
        DailyNutrition {
            date,
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fats: 0.0,
            meal_types: BTreeSet::new(),
            log_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieBalance {
    pub date: NaiveDate,
    pub consumed: f64,
    pub goal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroDistribution {
    pub date: NaiveDate,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealConsistency {
    pub date: NaiveDate,
    pub meals_logged: u32,
    pub expected_meals: u32,
}

/// Mean daily macros over the days that have any nutrition log
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageMacros {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Group nutrition logs per calendar day
pub fn aggregate_daily_nutrition(logs: &[NutritionLog]) -> BTreeMap<NaiveDate, DailyNutrition> {
    let mut daily: BTreeMap<NaiveDate, DailyNutrition> = BTreeMap::new();

    for log in logs {
        let day = daily
            .entry(log.date)
            .or_insert_with(|| DailyNutrition::empty(log.date));

        day.calories += log.total_calories;
        day.protein += log.total_protein;
        day.carbs += log.total_carbs;
        day.fats += log.total_fats;
        day.meal_types.insert(log.meal_type.clone());
        day.log_count += 1;
    }

    daily
}

/// Calories consumed per day against the plan goal; every day of the window
/// is present, unlogged days read zero.
pub fn calorie_balance(
    window: &DateWindow,
    daily: &BTreeMap<NaiveDate, DailyNutrition>,
    daily_goal: f64,
) -> Vec<CalorieBalance> {
    window
        .last(NUTRITION_LOOKBACK_DAYS)
        .into_iter()
        .map(|date| CalorieBalance {
            date,
            consumed: daily.get(&date).map_or(0.0, |d| d.calories),
            goal: daily_goal,
        })
        .collect()
}

/// Macro totals per day; days without logs are left out rather than zeroed
pub fn macro_distribution(
    window: &DateWindow,
    daily: &BTreeMap<NaiveDate, DailyNutrition>,
) -> Vec<MacroDistribution> {
    window
        .last(NUTRITION_LOOKBACK_DAYS)
        .into_iter()
        .filter_map(|date| daily.get(&date))
        .map(|day| MacroDistribution {
            date: day.date,
            protein: day.protein,
            carbs: day.carbs,
            fats: day.fats,
        })
        .collect()
}

/// Distinct meal types per day against the expected count
pub fn meal_consistency(
    window: &DateWindow,
    daily: &BTreeMap<NaiveDate, DailyNutrition>,
    expected_meals: u32,
) -> Vec<MealConsistency> {
    window
        .last(NUTRITION_LOOKBACK_DAYS)
        .into_iter()
        .map(|date| MealConsistency {
            date,
            meals_logged: daily.get(&date).map_or(0, |d| d.meal_types.len() as u32),
            expected_meals,
        })
        .collect()
}

pub fn average_macros(distribution: &[MacroDistribution]) -> AverageMacros {
    if distribution.is_empty() {
        return AverageMacros::default();
    }

    AverageMacros {
        protein: round_half_up(mean_or_zero(distribution.iter().map(|d| d.protein))),
        carbs: round_half_up(mean_or_zero(distribution.iter().map(|d| d.carbs))),
        fats: round_half_up(mean_or_zero(distribution.iter().map(|d| d.fats))),
    }
}
