use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::formulas::round_half_up;
use crate::lookup::{resolve_by_date, within, DuplicatePolicy};
use crate::models::WorkoutLog;
use crate::window::{short_label, DateSpan, DateWindow};

pub const WORKOUT_LOOKBACK_DAYS: usize = 30;
pub const EFFORT_WEEKS: u64 = 8;

/// Label used when no workout type has been logged
pub const NO_WORKOUT_TYPE: &str = "None";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutCalendarDay {
    pub date: NaiveDate,
    pub workout_type: Option<String>,
    pub duration: f64,
    pub calories_burned: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub total_workouts: u32,
    pub total_minutes: f64,
    pub total_calories_burned: f64,
    pub avg_calories_per_session: f64,
    pub most_common_type: String,
    pub longest_workout: f64,
}

/// Training volume of one seven-day bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyEffort {
    /// Short label of the bucket's first day
    pub week: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_minutes: f64,
    pub total_calories: f64,
}

/// Raw sums over the workouts inside one date span
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTotals {
    pub sessions: u32,
    pub completed: u32,
    pub minutes: f64,
    pub calories: f64,
}

impl WorkoutTotals {
    pub fn over(logs: &[WorkoutLog], span: &DateSpan) -> Self {
        within(logs, span).fold(WorkoutTotals::default(), |mut totals, w| {
            totals.sessions += 1;
            totals.completed += u32::from(w.completed);
            totals.minutes += w.duration_minutes;
            totals.calories += w.calories_burned;
            totals
        })
    }
}

/// One entry per day of the last thirty, with that day's workout if any
pub fn workout_calendar(
    window: &DateWindow,
    logs: &[WorkoutLog],
    policy: DuplicatePolicy,
) -> Vec<WorkoutCalendarDay> {
    let by_date = resolve_by_date(logs, policy);

    window
        .last(WORKOUT_LOOKBACK_DAYS)
        .into_iter()
        .map(|date| match by_date.get(&date) {
            Some(workout) => WorkoutCalendarDay {
                date,
                workout_type: Some(workout.workout_type.clone()),
                duration: workout.duration_minutes,
                calories_burned: workout.calories_burned,
            },
            None => WorkoutCalendarDay {
                date,
                workout_type: None,
                duration: 0.0,
                calories_burned: 0.0,
            },
        })
        .collect()
}

pub fn workout_stats(window: &DateWindow, logs: &[WorkoutLog]) -> WorkoutStats {
    let span = window.span(WORKOUT_LOOKBACK_DAYS);
    let totals = WorkoutTotals::over(logs, &span);

    let avg_calories_per_session = if totals.sessions == 0 {
        0.0
    } else {
        totals.calories / f64::from(totals.sessions)
    };

    // Counts kept in first-seen order so ties resolve to the earliest type.
    let mut type_counts: Vec<(&str, u32)> = Vec::new();
    for workout in within(logs, &span) {
        match type_counts
            .iter_mut()
            .find(|(name, _)| *name == workout.workout_type)
        {
            Some((_, count)) => *count += 1,
            None => type_counts.push((workout.workout_type.as_str(), 1)),
        }
    }

    let most_common_type = type_counts
        .iter()
        .fold(None, |best: Option<(&str, u32)>, &(name, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((name, count)),
        })
        .map_or_else(|| NO_WORKOUT_TYPE.to_string(), |(name, _)| name.to_string());

    let longest_workout = within(logs, &span)
        .map(|w| w.duration_minutes)
        .fold(0.0, |longest, minutes| if minutes > longest { minutes } else { longest });

    WorkoutStats {
        total_workouts: totals.sessions,
        total_minutes: totals.minutes,
        total_calories_burned: totals.calories,
        avg_calories_per_session: round_half_up(avg_calories_per_session),
        most_common_type,
        longest_workout,
    }
}

/// Eight consecutive seven-day buckets ending today, oldest first
pub fn weekly_effort(window: &DateWindow, logs: &[WorkoutLog]) -> Vec<WeeklyEffort> {
    (0..EFFORT_WEEKS)
        .rev()
        .map(|i| {
            let span = DateSpan {
                start: window.days_back(i * 7 + 6),
                end: window.days_back(i * 7),
            };
            let totals = WorkoutTotals::over(logs, &span);

            WeeklyEffort {
                week: short_label(span.start),
                week_start: span.start,
                week_end: span.end,
                total_minutes: totals.minutes,
                total_calories: totals.calories,
            }
        })
        .collect()
}
