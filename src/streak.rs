use chrono::NaiveDate;
use std::collections::HashSet;

use crate::lookup::dates_of;
use crate::models::{NutritionLog, WaterIntakeLog, WorkoutLog};
use crate::window::DateWindow;

/// How far back the activity streak looks
pub const STREAK_LOOKBACK_DAYS: usize = 30;

/// Days with at least one log of any kind
pub fn active_dates(
    nutrition: &[NutritionLog],
    water: &[WaterIntakeLog],
    workouts: &[WorkoutLog],
) -> HashSet<NaiveDate> {
    let mut dates = dates_of(nutrition);
    dates.extend(dates_of(water));
    dates.extend(dates_of(workouts));
    dates
}

/// Consecutive active days ending today, capped at the lookback window.
///
/// An inactive today yields 0.
pub fn current_streak(
    window: &DateWindow,
    nutrition: &[NutritionLog],
    water: &[WaterIntakeLog],
    workouts: &[WorkoutLog],
) -> u32 {
    let active = active_dates(nutrition, water, workouts);

    window
        .last(STREAK_LOOKBACK_DAYS)
        .iter()
        .rev()
        .take_while(|date| active.contains(*date))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 30).unwrap()
    }

    fn water_on(days_back: u64) -> WaterIntakeLog {
        WaterIntakeLog {
            date: DateWindow::new(today()).days_back(days_back),
            glasses: 3,
        }
    }

    #[test]
    fn test_empty_history_has_no_streak() {
        let window = DateWindow::new(today());
        assert_eq!(current_streak(&window, &[], &[], &[]), 0);
    }

    #[test]
    fn test_streak_stops_at_first_gap() {
        let window = DateWindow::new(today());
        let water = vec![water_on(0), water_on(1), water_on(2), water_on(4)];
        assert_eq!(current_streak(&window, &[], &water, &[]), 3);
    }

    #[test]
    fn test_inactive_today_breaks_streak() {
        let window = DateWindow::new(today());
        let water = vec![water_on(1), water_on(2)];
        assert_eq!(current_streak(&window, &[], &water, &[]), 0);
    }

    #[test]
    fn test_mixed_streams_count_together() {
        let window = DateWindow::new(today());
        let nutrition = vec![NutritionLog {
            date: window.days_back(1),
            meal_type: "dinner".to_string(),
            total_calories: 700.0,
            total_protein: 30.0,
            total_carbs: 80.0,
            total_fats: 25.0,
        }];
        let workouts = vec![WorkoutLog {
            date: window.days_back(2),
            workout_type: "cycling".to_string(),
            duration_minutes: 60.0,
            calories_burned: 500.0,
            completed: false,
        }];

        assert_eq!(current_streak(&window, &nutrition, &[water_on(0)], &workouts), 3);
    }

    #[test]
    fn test_streak_caps_at_lookback() {
        let window = DateWindow::new(today());
        let water: Vec<_> = (0..45).map(water_on).collect();
        assert_eq!(current_streak(&window, &[], &water, &[]), 30);
    }
}
