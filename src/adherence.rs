//! Plan adherence scoring over the last four weeks
//!
//! Both scores share one shape: a 0-100 score per day, a 0-100 score per
//! week, and an overall 0-100 figure. Weeks are non-overlapping seven-day
//! chunks of the 28-day range, oldest first.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::formulas::{clamp_score, mean_or_zero, round_half_up};
use crate::models::WorkoutLog;
use crate::nutrition::DailyNutrition;
use crate::window::{chunked_windows, DateWindow};

pub const ADHERENCE_DAYS: usize = 28;
pub const ADHERENCE_WEEK_DAYS: usize = 7;

/// Calorie tolerance band and the linear penalty beyond it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DietScoring {
    /// Deviation from the goal (kcal) that still scores 100
    pub tolerance_kcal: f64,

    /// kcal beyond the tolerance that cost one point
    pub kcal_per_point: f64,
}

impl Default for DietScoring {
    fn default() -> Self {
        DietScoring {
            tolerance_kcal: 200.0,
            kcal_per_point: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyScore {
    pub date: NaiveDate,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdherenceScore {
    pub overall: f64,
    pub daily_scores: Vec<DailyScore>,
    pub weekly_trend: Vec<f64>,
}

impl DietScoring {
    /// Score one day's intake: 100 inside the tolerance band, then one point
    /// off per `kcal_per_point` beyond it, never below zero.
    pub fn daily_score(&self, consumed: f64, goal: f64) -> f64 {
        let diff = (consumed - goal).abs();
        let score = if diff <= self.tolerance_kcal {
            100.0
        } else {
            clamp_score(100.0 - (diff - self.tolerance_kcal) / self.kcal_per_point)
        };
        round_half_up(score)
    }
}

pub fn diet_adherence(
    window: &DateWindow,
    daily: &BTreeMap<NaiveDate, DailyNutrition>,
    daily_goal: f64,
    scoring: &DietScoring,
) -> AdherenceScore {
    let daily_scores: Vec<DailyScore> = window
        .last(ADHERENCE_DAYS)
        .into_iter()
        .map(|date| {
            let score = match daily.get(&date) {
                Some(day) if day.log_count > 0 => scoring.daily_score(day.calories, daily_goal),
                _ => 0.0,
            };
            DailyScore { date, score }
        })
        .collect();

    let overall = round_half_up(mean_or_zero(daily_scores.iter().map(|d| d.score)));

    let weekly_trend = chunked_windows(&daily_scores, ADHERENCE_WEEK_DAYS)
        .map(|week| round_half_up(mean_or_zero(week.iter().map(|d| d.score))))
        .collect();

    AdherenceScore {
        overall,
        daily_scores,
        weekly_trend,
    }
}

/// Completed sessions per week against the planned frequency.
///
/// The per-day scores (100 on days with a completed workout) are reported for
/// display; `overall` is the mean of the weekly figures.
pub fn workout_adherence(
    window: &DateWindow,
    logs: &[WorkoutLog],
    planned_per_week: u32,
) -> AdherenceScore {
    let dates = window.last(ADHERENCE_DAYS);

    let daily_scores = dates
        .iter()
        .map(|&date| {
            let trained = logs.iter().any(|w| w.date == date && w.completed);
            DailyScore {
                date,
                score: if trained { 100.0 } else { 0.0 },
            }
        })
        .collect();

    let planned = f64::from(planned_per_week);
    let weekly_trend: Vec<f64> = chunked_windows(&dates, ADHERENCE_WEEK_DAYS)
        .map(|week| {
            let completed = logs
                .iter()
                .filter(|w| w.completed && week.contains(&w.date))
                .count();
            let adherence = completed as f64 / planned * 100.0;
            round_half_up(if adherence > 100.0 { 100.0 } else { adherence })
        })
        .collect();

    let overall = round_half_up(mean_or_zero(weekly_trend.iter().copied()));

    AdherenceScore {
        overall,
        daily_scores,
        weekly_trend,
    }
}
