use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::PlanDefaults;
use crate::error::{Result, StatsError};

/// One logged meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionLog {
    /// Calendar day of the meal
    #[serde(alias = "log_date")]
    pub date: NaiveDate,

    /// Meal tag such as "breakfast" or "snack"
    pub meal_type: String,

    pub total_calories: f64,

    /// Grams
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fats: f64,
}

/// Glasses of water drunk on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterIntakeLog {
    #[serde(alias = "log_date")]
    pub date: NaiveDate,

    pub glasses: u32,
}

/// One workout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLog {
    #[serde(alias = "workout_date")]
    pub date: NaiveDate,

    pub workout_type: String,

    pub duration_minutes: f64,

    pub calories_burned: f64,

    /// False for sessions that were started or planned but not finished
    pub completed: bool,
}

/// Targets taken from the user's active meal plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveMealPlanSummary {
    #[serde(default, alias = "daily_calories")]
    pub daily_calorie_goal: Option<f64>,
}

/// Targets taken from the user's active workout plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveWorkoutPlanSummary {
    #[serde(default, alias = "frequency_per_week")]
    pub planned_sessions_per_week: Option<u32>,
}

/// Plan targets after defaults have been applied
///
/// Resolved once per stats run so calculators never branch on whether a plan
/// exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanTargets {
    pub daily_calorie_goal: f64,
    pub planned_sessions_per_week: u32,
}

impl PlanTargets {
    /// Apply defaults for missing plans and for missing, zero or negative goals
    pub fn resolve(
        meal_plan: Option<&ActiveMealPlanSummary>,
        workout_plan: Option<&ActiveWorkoutPlanSummary>,
        defaults: &PlanDefaults,
    ) -> Self {
        let daily_calorie_goal = meal_plan
            .and_then(|plan| plan.daily_calorie_goal)
            .filter(|goal| *goal > 0.0)
            .unwrap_or(defaults.daily_calorie_goal);

        let planned_sessions_per_week = workout_plan
            .and_then(|plan| plan.planned_sessions_per_week)
            .filter(|sessions| *sessions > 0)
            .unwrap_or(defaults.planned_sessions_per_week);

        PlanTargets {
            daily_calorie_goal,
            planned_sessions_per_week,
        }
    }
}

impl Default for PlanTargets {
    fn default() -> Self {
        Self::resolve(None, None, &PlanDefaults::default())
    }
}

/// Everything a stats run consumes: three log streams and two plan summaries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityInput {
    #[serde(default)]
    pub nutrition_logs: Vec<NutritionLog>,

    #[serde(default)]
    pub water_logs: Vec<WaterIntakeLog>,

    #[serde(default)]
    pub workout_logs: Vec<WorkoutLog>,

    #[serde(default)]
    pub meal_plan: Option<ActiveMealPlanSummary>,

    #[serde(default)]
    pub workout_plan: Option<ActiveWorkoutPlanSummary>,
}

impl ActivityInput {
    /// Parse an input bundle from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load an input bundle from a JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StatsError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let input = Self::from_json_str(&content)?;

        tracing::debug!(
            path = %path.display(),
            nutrition = input.nutrition_logs.len(),
            water = input.water_logs.len(),
            workouts = input.workout_logs.len(),
            "Loaded activity input"
        );

        Ok(input)
    }

    /// Resolve the plan summaries against configured defaults
    pub fn plan_targets(&self, defaults: &PlanDefaults) -> PlanTargets {
        PlanTargets::resolve(self.meal_plan.as_ref(), self.workout_plan.as_ref(), defaults)
    }
}
