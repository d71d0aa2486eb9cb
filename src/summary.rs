//! Headline summaries: the last week at a glance and the month's best week

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::formulas::{round_half_up, round_to_tenth};
use crate::lookup::within;
use crate::models::{NutritionLog, WaterIntakeLog, WorkoutLog};
use crate::streak::active_dates;
use crate::window::{short_label, sliding_windows, DateWindow};

pub const WEEK_DAYS: usize = 7;
pub const HIGHLIGHT_LOOKBACK_DAYS: usize = 30;

/// Totals for the trailing seven days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub total_calories: f64,

    /// Calories per calendar day; unlogged days count as zero
    pub avg_calories: f64,

    pub workouts_completed: u32,

    /// Mean glasses over the days that have a water log
    pub avg_hydration: f64,

    /// Distinct days with any log
    pub days_active: u32,
}

/// The most consistent seven-day stretch of the last thirty days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyHighlight {
    pub title: String,
    pub description: String,
    pub value: String,
    pub icon: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active_days: u32,
}

pub fn weekly_summary(
    window: &DateWindow,
    nutrition: &[NutritionLog],
    water: &[WaterIntakeLog],
    workouts: &[WorkoutLog],
) -> WeeklySummary {
    let week = window.span(WEEK_DAYS);

    let total_calories: f64 = within(nutrition, &week).map(|l| l.total_calories).sum();

    let week_water: Vec<&WaterIntakeLog> = within(water, &week).collect();
    let avg_hydration = if week_water.is_empty() {
        0.0
    } else {
        week_water.iter().map(|l| f64::from(l.glasses)).sum::<f64>() / week_water.len() as f64
    };

    let workouts_completed = within(workouts, &week).filter(|w| w.completed).count() as u32;

    let days_active = active_dates(nutrition, water, workouts)
        .into_iter()
        .filter(|date| week.contains(*date))
        .count() as u32;

    WeeklySummary {
        total_calories: round_half_up(total_calories),
        avg_calories: round_half_up(total_calories / WEEK_DAYS as f64),
        workouts_completed,
        avg_hydration: round_to_tenth(avg_hydration),
        days_active,
    }
}

/// Slide a seven-day window across the last thirty days and keep the one
/// with the most active days. Ties go to the earliest window.
pub fn monthly_highlight(
    window: &DateWindow,
    nutrition: &[NutritionLog],
    water: &[WaterIntakeLog],
    workouts: &[WorkoutLog],
) -> MonthlyHighlight {
    let dates = window.last(HIGHLIGHT_LOOKBACK_DAYS);
    let active = active_dates(nutrition, water, workouts);

    let mut best: Option<(&[NaiveDate], usize)> = None;
    for week in sliding_windows(&dates, WEEK_DAYS) {
        let score = week.iter().filter(|date| active.contains(*date)).count();
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((week, score));
        }
    }

    let (week, score) = best.unwrap_or((&dates[..], 0));
    let start_date = week.first().copied().unwrap_or_else(|| window.today());
    let end_date = week.last().copied().unwrap_or_else(|| window.today());

    MonthlyHighlight {
        title: "Most Active Week".to_string(),
        description: format!("{} - {}", short_label(start_date), short_label(end_date)),
        value: format!("{}/{} days", score, WEEK_DAYS),
        icon: "trophy".to_string(),
        start_date,
        end_date,
        active_days: score as u32,
    }
}
