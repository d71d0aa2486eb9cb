use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::formulas::round_to_tenth;
use crate::lookup::{resolve_by_date, within, DuplicatePolicy};
use crate::models::WaterIntakeLog;
use crate::window::{DateSpan, DateWindow};

pub const HYDRATION_TREND_DAYS: usize = 14;
pub const HYDRATION_LOOKBACK_DAYS: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydrationTrend {
    pub date: NaiveDate,
    pub glasses: u32,
    pub goal: u32,
}

/// The single best water day on record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestDay {
    /// None until some log records at least one glass
    pub date: Option<NaiveDate>,
    pub glasses: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydrationInsights {
    pub best_day: BestDay,

    /// Consecutive days ending today at or above the goal
    pub current_streak: u32,

    pub avg_glasses_per_day: f64,
    pub last_month_avg: f64,
}

/// Glasses per day over the last two weeks, zero where nothing was logged
pub fn hydration_trend(
    window: &DateWindow,
    logs: &[WaterIntakeLog],
    daily_goal: u32,
    policy: DuplicatePolicy,
) -> Vec<HydrationTrend> {
    let by_date = resolve_by_date(logs, policy);

    window
        .last(HYDRATION_TREND_DAYS)
        .into_iter()
        .map(|date| HydrationTrend {
            date,
            glasses: by_date.get(&date).map_or(0, |log| log.glasses),
            goal: daily_goal,
        })
        .collect()
}

/// Mean glasses across the water logs inside `span`, 0 when there are none
pub fn average_glasses(logs: &[WaterIntakeLog], span: &DateSpan) -> f64 {
    let (total, count) = within(logs, span).fold((0u64, 0u32), |(total, count), log| {
        (total + u64::from(log.glasses), count + 1)
    });

    if count == 0 {
        0.0
    } else {
        total as f64 / f64::from(count)
    }
}

pub fn hydration_insights(
    window: &DateWindow,
    logs: &[WaterIntakeLog],
    daily_goal: u32,
    policy: DuplicatePolicy,
) -> HydrationInsights {
    // Strictly greater keeps the first of equal maxima.
    let mut best_day = BestDay::default();
    for log in logs {
        if log.glasses > best_day.glasses {
            best_day = BestDay {
                date: Some(log.date),
                glasses: log.glasses,
            };
        }
    }

    let by_date = resolve_by_date(logs, policy);
    let current_streak = window
        .last(HYDRATION_LOOKBACK_DAYS)
        .iter()
        .rev()
        .take_while(|date| {
            by_date
                .get(*date)
                .is_some_and(|log| log.glasses >= daily_goal)
        })
        .count() as u32;

    let avg_glasses_per_day = average_glasses(logs, &window.span(HYDRATION_LOOKBACK_DAYS));
    let last_month_avg = average_glasses(logs, &window.preceding_span(HYDRATION_LOOKBACK_DAYS));

    HydrationInsights {
        best_day,
        current_streak,
        avg_glasses_per_day: round_to_tenth(avg_glasses_per_day),
        last_month_avg: round_to_tenth(last_month_avg),
    }
}
