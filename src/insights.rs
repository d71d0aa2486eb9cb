//! Rule-based observations about the user's recent activity
//!
//! Each rule fires independently. Descriptions quote the same figures the
//! rule compared, so an insight never disagrees with the numbers behind it.

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::formulas::{round_half_up, round_to_tenth};
use crate::lookup::{dates_of, within};
use crate::models::{NutritionLog, WaterIntakeLog, WorkoutLog};
use crate::window::DateWindow;
use crate::workout::WorkoutTotals;

pub const INSIGHT_LOOKBACK_DAYS: usize = 30;

pub const WEEKEND_LOGGING_ID: &str = "weekend-logging";
pub const HYDRATION_WORKOUT_ID: &str = "hydration-workout";
pub const CALORIE_PROGRESS_ID: &str = "calorie-progress";
pub const CONSISTENCY_ID: &str = "consistency";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Success,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    /// Stable identifier of the rule that produced this insight
    pub id: String,

    #[serde(rename = "type")]
    pub kind: InsightKind,

    pub title: String,
    pub description: String,
}

/// Trigger levels for the insight rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightThresholds {
    /// Weekday meal logs must exceed weekend logs by this factor
    pub weekday_weekend_ratio: f64,

    /// Workout-day hydration must exceed the overall mean by this factor
    pub workout_day_hydration_lift: f64,

    /// This month's calorie burn must exceed last month's by this factor
    pub calorie_burn_growth: f64,

    /// Shortest activity streak worth celebrating
    pub min_streak_days: u32,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        InsightThresholds {
            weekday_weekend_ratio: 2.0,
            workout_day_hydration_lift: 1.2,
            calorie_burn_growth: 1.1,
            min_streak_days: 7,
        }
    }
}

fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

fn mean_glasses<'a>(logs: impl Iterator<Item = &'a WaterIntakeLog>) -> f64 {
    let (total, count) = logs.fold((0u64, 0u32), |(total, count), log| {
        (total + u64::from(log.glasses), count + 1)
    });
    if count == 0 {
        0.0
    } else {
        total as f64 / f64::from(count)
    }
}

/// Insight generator bound to one set of thresholds
pub struct InsightGenerator {
    thresholds: InsightThresholds,
}

impl InsightGenerator {
    pub fn new() -> Self {
        InsightGenerator {
            thresholds: InsightThresholds::default(),
        }
    }

    pub fn with_thresholds(thresholds: InsightThresholds) -> Self {
        InsightGenerator { thresholds }
    }

    /// Run every rule. `streak` must be the value reported as the current
    /// activity streak.
    pub fn generate(
        &self,
        window: &DateWindow,
        nutrition: &[NutritionLog],
        water: &[WaterIntakeLog],
        workouts: &[WorkoutLog],
        streak: u32,
    ) -> Vec<Insight> {
        [
            self.weekend_logging_gap(window, nutrition),
            self.hydration_on_workout_days(water, workouts),
            self.calorie_burn_progress(window, workouts),
            self.consistency_streak(streak),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn weekend_logging_gap(
        &self,
        window: &DateWindow,
        nutrition: &[NutritionLog],
    ) -> Option<Insight> {
        let span = window.span(INSIGHT_LOOKBACK_DAYS);
        let (weekend, weekday) = within(nutrition, &span).fold((0u32, 0u32), |(we, wd), log| {
            if is_weekend(log.date.weekday()) {
                (we + 1, wd)
            } else {
                (we, wd + 1)
            }
        });

        let fires = f64::from(weekday) > f64::from(weekend) * self.thresholds.weekday_weekend_ratio;
        if !fires {
            return None;
        }

        Some(Insight {
            id: WEEKEND_LOGGING_ID.to_string(),
            kind: InsightKind::Warning,
            title: "Weekend Logging Gap".to_string(),
            description: format!(
                "You logged {} meals on weekdays but only {} on weekends this month. Try meal prep to stay consistent!",
                weekday, weekend
            ),
        })
    }

    fn hydration_on_workout_days(
        &self,
        water: &[WaterIntakeLog],
        workouts: &[WorkoutLog],
    ) -> Option<Insight> {
        let workout_dates: HashSet<_> = dates_of(workouts);

        let on_workout_days =
            mean_glasses(water.iter().filter(|l| workout_dates.contains(&l.date)));
        let overall = mean_glasses(water.iter());

        let fires = on_workout_days > overall * self.thresholds.workout_day_hydration_lift;
        if !fires {
            return None;
        }

        Some(Insight {
            id: HYDRATION_WORKOUT_ID.to_string(),
            kind: InsightKind::Success,
            title: "Great Hydration Habit".to_string(),
            description: format!(
                "You drink {} glasses on workout days versus {} on average. Keep it up!",
                round_to_tenth(on_workout_days),
                round_to_tenth(overall)
            ),
        })
    }

    fn calorie_burn_progress(
        &self,
        window: &DateWindow,
        workouts: &[WorkoutLog],
    ) -> Option<Insight> {
        let this_month =
            WorkoutTotals::over(workouts, &window.span(INSIGHT_LOOKBACK_DAYS)).calories;
        let last_month =
            WorkoutTotals::over(workouts, &window.preceding_span(INSIGHT_LOOKBACK_DAYS)).calories;

        // A NaN total never fires.
        let fires = this_month > last_month * self.thresholds.calorie_burn_growth;
        if !fires {
            return None;
        }

        Some(Insight {
            id: CALORIE_PROGRESS_ID.to_string(),
            kind: InsightKind::Success,
            title: "Impressive Progress".to_string(),
            description: format!(
                "You've burned {} more calories this month!",
                round_half_up(this_month - last_month)
            ),
        })
    }

    fn consistency_streak(&self, streak: u32) -> Option<Insight> {
        if streak < self.thresholds.min_streak_days {
            return None;
        }

        Some(Insight {
            id: CONSISTENCY_ID.to_string(),
            kind: InsightKind::Success,
            title: format!("{}-Day Streak!", streak),
            description: format!(
                "You've been active {} days in a row. Your consistency is paying off, don't break the chain!",
                streak
            ),
        })
    }
}

impl Default for InsightGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    // 2024-09-30 is a Monday.
    fn window() -> DateWindow {
        DateWindow::new(NaiveDate::from_ymd_opt(2024, 9, 30).unwrap())
    }

    fn meal(date: NaiveDate) -> NutritionLog {
        NutritionLog {
            date,
            meal_type: "lunch".to_string(),
            total_calories: 600.0,
            total_protein: 30.0,
            total_carbs: 60.0,
            total_fats: 20.0,
        }
    }

    fn session(date: NaiveDate, calories: f64) -> WorkoutLog {
        WorkoutLog {
            date,
            workout_type: "run".to_string(),
            duration_minutes: 30.0,
            calories_burned: calories,
            completed: true,
        }
    }

    fn ids(insights: &[Insight]) -> Vec<&str> {
        insights.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_no_data_no_insights() {
        let generator = InsightGenerator::new();
        assert!(generator.generate(&window(), &[], &[], &[], 0).is_empty());
    }

    #[test]
    fn test_weekend_logging_gap() {
        let w = window();
        // Mon..Fri of the current and previous week, nothing on weekends.
        let nutrition: Vec<_> = [0, 3, 4, 5, 6, 7, 10, 11]
            .iter()
            .map(|&n| meal(w.days_back(n)))
            .collect();
        assert!(nutrition.iter().all(|m| !is_weekend(m.date.weekday())));

        let insights = InsightGenerator::new().generate(&w, &nutrition, &[], &[], 0);

        assert_eq!(ids(&insights), vec![WEEKEND_LOGGING_ID]);
        assert_eq!(insights[0].kind, InsightKind::Warning);
        assert!(insights[0].description.contains("8 meals on weekdays"));
    }

    #[test]
    fn test_balanced_week_has_no_gap() {
        let w = window();
        // Sun 1 back, Sat 2 back, Mon today, Fri 3 back
        let nutrition: Vec<_> = [0, 1, 2, 3].iter().map(|&n| meal(w.days_back(n))).collect();

        let insights = InsightGenerator::new().generate(&w, &nutrition, &[], &[], 0);
        assert!(!ids(&insights).contains(&WEEKEND_LOGGING_ID));
    }

    #[test]
    fn test_hydration_on_workout_days() {
        let w = window();
        let water = vec![
            WaterIntakeLog {
                date: w.days_back(1),
                glasses: 10,
            },
            WaterIntakeLog {
                date: w.days_back(2),
                glasses: 4,
            },
            WaterIntakeLog {
                date: w.days_back(3),
                glasses: 4,
            },
        ];
        let workouts = vec![session(w.days_back(1), 0.0)];

        let insights = InsightGenerator::new().generate(&w, &[], &water, &workouts, 0);

        assert_eq!(ids(&insights), vec![HYDRATION_WORKOUT_ID]);
        assert_eq!(
            insights[0].description,
            "You drink 10 glasses on workout days versus 6 on average. Keep it up!"
        );
    }

    #[test]
    fn test_calorie_burn_progress() {
        let w = window();
        let workouts = vec![
            session(w.days_back(45), 1000.0),
            session(w.days_back(3), 1200.0),
        ];

        let insights = InsightGenerator::new().generate(&w, &[], &[], &workouts, 0);

        assert_eq!(ids(&insights), vec![CALORIE_PROGRESS_ID]);
        assert_eq!(
            insights[0].description,
            "You've burned 200 more calories this month!"
        );
    }

    #[test]
    fn test_calorie_burn_below_growth_threshold() {
        let w = window();
        let workouts = vec![
            session(w.days_back(45), 1000.0),
            session(w.days_back(3), 1100.0),
        ];

        let insights = InsightGenerator::new().generate(&w, &[], &[], &workouts, 0);
        assert!(insights.is_empty());
    }

    #[test]
    fn test_non_finite_burn_stays_silent() {
        let w = window();
        let workouts = vec![session(w.days_back(3), f64::NAN)];

        let insights = InsightGenerator::new().generate(&w, &[], &[], &workouts, 0);
        assert!(insights.is_empty());

        let workouts = vec![
            session(w.days_back(45), f64::NAN),
            session(w.days_back(3), 1200.0),
        ];
        let insights = InsightGenerator::new().generate(&w, &[], &[], &workouts, 0);
        assert!(!ids(&insights).contains(&CALORIE_PROGRESS_ID));
    }

    #[test]
    fn test_streak_insight_uses_given_streak() {
        let generator = InsightGenerator::new();

        assert!(generator.generate(&window(), &[], &[], &[], 6).is_empty());

        let insights = generator.generate(&window(), &[], &[], &[], 9);
        assert_eq!(ids(&insights), vec![CONSISTENCY_ID]);
        assert_eq!(insights[0].title, "9-Day Streak!");
        assert!(insights[0].description.contains("9 days in a row"));
    }

    #[test]
    fn test_custom_thresholds() {
        let generator = InsightGenerator::with_thresholds(InsightThresholds {
            min_streak_days: 3,
            ..InsightThresholds::default()
        });

        let insights = generator.generate(&window(), &[], &[], &[], 3);
        assert_eq!(ids(&insights), vec![CONSISTENCY_ID]);
    }
}
