use super::ExportError;
use crate::engine::StatsResult;
use chrono::NaiveDate;
use csv::Writer;
use serde::Serialize;
use std::io;
use std::path::Path;

/// One calendar day of the thirty-day window with every per-day series joined
///
/// Series that cover fewer days (hydration: 14, diet score: 28) or skip
/// unlogged days (macros) leave their columns empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRow {
    pub date: NaiveDate,
    pub calories_consumed: f64,
    pub calorie_goal: f64,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    pub meals_logged: u32,
    pub expected_meals: u32,
    pub glasses: Option<u32>,
    pub hydration_goal: Option<u32>,
    pub workout_type: Option<String>,
    pub workout_minutes: f64,
    pub workout_calories: f64,
    pub diet_score: Option<f64>,
}

/// Join the daily series of a stats result by date
pub fn daily_rows(stats: &StatsResult) -> Vec<DailyRow> {
    stats
        .calorie_balance
        .iter()
        .map(|balance| {
            let date = balance.date;
            let macros = stats.macro_distribution.iter().find(|m| m.date == date);
            let meals = stats.meal_consistency.iter().find(|m| m.date == date);
            let water = stats.hydration_trends.iter().find(|h| h.date == date);
            let workout = stats.workout_calendar.iter().find(|w| w.date == date);
            let diet = stats
                .diet_adherence
                .daily_scores
                .iter()
                .find(|d| d.date == date);

            DailyRow {
                date,
                calories_consumed: balance.consumed,
                calorie_goal: balance.goal,
                protein: macros.map(|m| m.protein),
                carbs: macros.map(|m| m.carbs),
                fats: macros.map(|m| m.fats),
                meals_logged: meals.map_or(0, |m| m.meals_logged),
                expected_meals: meals.map_or(0, |m| m.expected_meals),
                glasses: water.map(|h| h.glasses),
                hydration_goal: water.map(|h| h.goal),
                workout_type: workout.and_then(|w| w.workout_type.clone()),
                workout_minutes: workout.map_or(0.0, |w| w.duration),
                workout_calories: workout.map_or(0.0, |w| w.calories_burned),
                diet_score: diet.map(|d| d.score),
            }
        })
        .collect()
}

/// Write the joined daily rows to any writer
pub fn write_daily_rows<W: io::Write>(stats: &StatsResult, output: W) -> Result<(), ExportError> {
    let mut writer = Writer::from_writer(output);

    for row in daily_rows(stats) {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Export the joined daily rows to a CSV file
pub fn export_daily_rows<P: AsRef<Path>>(
    stats: &StatsResult,
    output_path: P,
) -> Result<(), ExportError> {
    let file = std::fs::File::create(output_path)?;
    write_daily_rows(stats, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_activity_stats;
    use crate::models::{NutritionLog, WaterIntakeLog, WorkoutLog};
    use tempfile::NamedTempFile;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 30).unwrap()
    }

    fn sample_stats() -> StatsResult {
        let yesterday = today().pred_opt().unwrap();
        let nutrition = vec![NutritionLog {
            date: today(),
            meal_type: "lunch".to_string(),
            total_calories: 650.0,
            total_protein: 40.0,
            total_carbs: 70.0,
            total_fats: 18.0,
        }];
        let water = vec![WaterIntakeLog {
            date: yesterday,
            glasses: 7,
        }];
        let workouts = vec![WorkoutLog {
            date: today(),
            workout_type: "yoga".to_string(),
            duration_minutes: 50.0,
            calories_burned: 180.0,
            completed: true,
        }];

        compute_activity_stats(today(), &nutrition, &water, &workouts, None, None)
    }

    #[test]
    fn test_daily_rows_join() {
        let rows = daily_rows(&sample_stats());
        assert_eq!(rows.len(), 30);

        let last = rows.last().unwrap();
        assert_eq!(last.date, today());
        assert_eq!(last.calories_consumed, 650.0);
        assert_eq!(last.protein, Some(40.0));
        assert_eq!(last.meals_logged, 1);
        assert_eq!(last.glasses, Some(0));
        assert_eq!(last.workout_type.as_deref(), Some("yoga"));

        let yesterday = &rows[28];
        assert_eq!(yesterday.protein, None);
        assert_eq!(yesterday.glasses, Some(7));
        assert_eq!(yesterday.workout_minutes, 0.0);

        // Hydration covers 14 days, diet scores 28.
        assert_eq!(rows[0].glasses, None);
        assert_eq!(rows[0].diet_score, None);
        assert_eq!(rows[2].diet_score, Some(0.0));
    }

    #[test]
    fn test_export_daily_rows() {
        let temp_file = NamedTempFile::new().unwrap();
        export_daily_rows(&sample_stats(), temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let mut lines = content.lines();

        assert_eq!(
            lines.next().unwrap(),
            "date,calories_consumed,calorie_goal,protein,carbs,fats,meals_logged,expected_meals,glasses,hydration_goal,workout_type,workout_minutes,workout_calories,diet_score"
        );
        assert_eq!(content.lines().count(), 31);
        assert!(content
            .lines()
            .last()
            .unwrap()
            .starts_with("2024-09-30,650.0,2000.0,40.0,70.0,18.0,1,3,0,8,yoga,50.0,180.0,"));
    }
}
