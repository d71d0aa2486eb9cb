//! The stats engine: one call turns raw activity logs into every derived
//! figure the dashboard shows.
//!
//! Calculators are pure functions of the logs, the resolved plan targets and
//! a [`DateWindow`]. The engine resolves plan defaults once, aggregates
//! nutrition per day once, and hands the shared pieces to each calculator.
//! [`ActivityStatsEngine::compute_parallel`] runs the four independent
//! sections on the rayon pool and assembles the same result as
//! [`ActivityStatsEngine::compute`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info_span};

use crate::adherence::{diet_adherence, workout_adherence, AdherenceScore};
use crate::comparison::{month_comparisons, MonthComparisons};
use crate::config::StatsConfig;
use crate::hydration::{hydration_insights, hydration_trend, HydrationInsights, HydrationTrend};
use crate::insights::{Insight, InsightGenerator};
use crate::models::{
    ActiveMealPlanSummary, ActiveWorkoutPlanSummary, ActivityInput, NutritionLog, PlanTargets,
    WaterIntakeLog, WorkoutLog,
};
use crate::nutrition::{
    aggregate_daily_nutrition, average_macros, calorie_balance, macro_distribution,
    meal_consistency, AverageMacros, CalorieBalance, DailyNutrition, MacroDistribution,
    MealConsistency,
};
use crate::streak::current_streak;
use crate::summary::{monthly_highlight, weekly_summary, MonthlyHighlight, WeeklySummary};
use crate::window::DateWindow;
use crate::workout::{
    weekly_effort, workout_calendar, workout_stats, WeeklyEffort, WorkoutCalendarDay, WorkoutStats,
};

/// Every derived structure, under the keys the dashboard reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResult {
    pub current_streak: u32,
    pub weekly_summary: WeeklySummary,
    pub monthly_highlight: MonthlyHighlight,
    pub calorie_balance: Vec<CalorieBalance>,
    pub macro_distribution: Vec<MacroDistribution>,
    pub meal_consistency: Vec<MealConsistency>,
    pub avg_macros: AverageMacros,
    pub hydration_trends: Vec<HydrationTrend>,
    pub hydration_insights: HydrationInsights,
    pub workout_calendar: Vec<WorkoutCalendarDay>,
    pub workout_stats: WorkoutStats,
    pub weekly_effort: Vec<WeeklyEffort>,
    pub diet_adherence: AdherenceScore,
    pub workout_adherence: AdherenceScore,
    pub month_comparisons: MonthComparisons,
    pub insights: Vec<Insight>,
}

/// Borrowed view of one run's inputs
#[derive(Clone, Copy)]
struct Sources<'a> {
    window: &'a DateWindow,
    nutrition: &'a [NutritionLog],
    water: &'a [WaterIntakeLog],
    workouts: &'a [WorkoutLog],
    targets: PlanTargets,
}

struct OverviewSection {
    current_streak: u32,
    weekly_summary: WeeklySummary,
    monthly_highlight: MonthlyHighlight,
    month_comparisons: MonthComparisons,
    insights: Vec<Insight>,
}

struct NutritionSection {
    calorie_balance: Vec<CalorieBalance>,
    macro_distribution: Vec<MacroDistribution>,
    meal_consistency: Vec<MealConsistency>,
    avg_macros: AverageMacros,
    diet_adherence: AdherenceScore,
}

struct HydrationSection {
    trends: Vec<HydrationTrend>,
    insights: HydrationInsights,
}

struct WorkoutSection {
    calendar: Vec<WorkoutCalendarDay>,
    stats: WorkoutStats,
    effort: Vec<WeeklyEffort>,
    adherence: AdherenceScore,
}

impl StatsResult {
    fn assemble(
        overview: OverviewSection,
        nutrition: NutritionSection,
        hydration: HydrationSection,
        workouts: WorkoutSection,
    ) -> Self {
        StatsResult {
            current_streak: overview.current_streak,
            weekly_summary: overview.weekly_summary,
            monthly_highlight: overview.monthly_highlight,
            calorie_balance: nutrition.calorie_balance,
            macro_distribution: nutrition.macro_distribution,
            meal_consistency: nutrition.meal_consistency,
            avg_macros: nutrition.avg_macros,
            hydration_trends: hydration.trends,
            hydration_insights: hydration.insights,
            workout_calendar: workouts.calendar,
            workout_stats: workouts.stats,
            weekly_effort: workouts.effort,
            diet_adherence: nutrition.diet_adherence,
            workout_adherence: workouts.adherence,
            month_comparisons: overview.month_comparisons,
            insights: overview.insights,
        }
    }
}

/// Stats engine bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct ActivityStatsEngine {
    config: StatsConfig,
}

impl ActivityStatsEngine {
    pub fn new() -> Self {
        ActivityStatsEngine {
            config: StatsConfig::default(),
        }
    }

    /// Bind a configuration. `AppConfig::load_from_file` has already run
    /// [`StatsConfig::validate`]; configs built in code should call it too.
    pub fn with_config(config: StatsConfig) -> Self {
        ActivityStatsEngine { config }
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    /// Compute every statistic for the window's reference date
    pub fn compute(&self, window: &DateWindow, input: &ActivityInput) -> StatsResult {
        self.run(&self.sources(window, input))
    }

    /// Same result as [`compute`](Self::compute), with the independent
    /// sections evaluated concurrently
    pub fn compute_parallel(&self, window: &DateWindow, input: &ActivityInput) -> StatsResult {
        let sources = self.sources(window, input);
        let span = run_span(&sources);
        let _enter = span.enter();

        let ((overview, nutrition), (hydration, workouts)) = rayon::join(
            || {
                rayon::join(
                    || self.overview(&sources),
                    || {
                        let daily = aggregate_daily_nutrition(sources.nutrition);
                        self.nutrition(&sources, &daily)
                    },
                )
            },
            || rayon::join(|| self.hydration(&sources), || self.workouts(&sources)),
        );

        let result = StatsResult::assemble(overview, nutrition, hydration, workouts);

        log_headline(&result);
        result
    }

    fn run(&self, sources: &Sources<'_>) -> StatsResult {
        let span = run_span(sources);
        let _enter = span.enter();

        let daily = aggregate_daily_nutrition(sources.nutrition);

        let result = StatsResult::assemble(
            self.overview(sources),
            self.nutrition(sources, &daily),
            self.hydration(sources),
            self.workouts(sources),
        );

        log_headline(&result);
        result
    }

    fn sources<'a>(&self, window: &'a DateWindow, input: &'a ActivityInput) -> Sources<'a> {
        Sources {
            window,
            nutrition: &input.nutrition_logs,
            water: &input.water_logs,
            workouts: &input.workout_logs,
            targets: input.plan_targets(&self.config.defaults),
        }
    }

    fn overview(&self, s: &Sources<'_>) -> OverviewSection {
        let streak = current_streak(s.window, s.nutrition, s.water, s.workouts);

        // The insight rules see the same streak that is reported.
        let insights = InsightGenerator::with_thresholds(self.config.insights).generate(
            s.window,
            s.nutrition,
            s.water,
            s.workouts,
            streak,
        );

        OverviewSection {
            current_streak: streak,
            weekly_summary: weekly_summary(s.window, s.nutrition, s.water, s.workouts),
            monthly_highlight: monthly_highlight(s.window, s.nutrition, s.water, s.workouts),
            month_comparisons: month_comparisons(s.window, s.nutrition, s.water, s.workouts),
            insights,
        }
    }

    fn nutrition(
        &self,
        s: &Sources<'_>,
        daily: &BTreeMap<NaiveDate, DailyNutrition>,
    ) -> NutritionSection {
        let goal = s.targets.daily_calorie_goal;
        let macros = macro_distribution(s.window, daily);

        NutritionSection {
            calorie_balance: calorie_balance(s.window, daily, goal),
            avg_macros: average_macros(&macros),
            macro_distribution: macros,
            meal_consistency: meal_consistency(
                s.window,
                daily,
                self.config.targets.expected_meals,
            ),
            diet_adherence: diet_adherence(s.window, daily, goal, &self.config.scoring),
        }
    }

    fn hydration(&self, s: &Sources<'_>) -> HydrationSection {
        let goal = self.config.targets.hydration_goal_glasses;

        HydrationSection {
            trends: hydration_trend(s.window, s.water, goal, self.config.lookup),
            insights: hydration_insights(s.window, s.water, goal, self.config.lookup),
        }
    }

    fn workouts(&self, s: &Sources<'_>) -> WorkoutSection {
        WorkoutSection {
            calendar: workout_calendar(s.window, s.workouts, self.config.lookup),
            stats: workout_stats(s.window, s.workouts),
            effort: weekly_effort(s.window, s.workouts),
            adherence: workout_adherence(
                s.window,
                s.workouts,
                s.targets.planned_sessions_per_week,
            ),
        }
    }
}

fn run_span(s: &Sources<'_>) -> tracing::Span {
    info_span!(
        "compute_activity_stats",
        today = %s.window.today(),
        nutrition = s.nutrition.len(),
        water = s.water.len(),
        workouts = s.workouts.len(),
        calorie_goal = s.targets.daily_calorie_goal,
        planned_sessions = s.targets.planned_sessions_per_week,
    )
}

fn log_headline(result: &StatsResult) {
    debug!(
        streak = result.current_streak,
        diet_adherence = result.diet_adherence.overall,
        workout_adherence = result.workout_adherence.overall,
        insights = result.insights.len(),
        "Activity stats computed"
    );
}

/// Compute every statistic with the default configuration.
///
/// Absent plans fall back to 2000 kcal per day and three sessions per week.
pub fn compute_activity_stats(
    today: NaiveDate,
    nutrition_logs: &[NutritionLog],
    water_logs: &[WaterIntakeLog],
    workout_logs: &[WorkoutLog],
    meal_plan: Option<&ActiveMealPlanSummary>,
    workout_plan: Option<&ActiveWorkoutPlanSummary>,
) -> StatsResult {
    let config = StatsConfig::default();
    let window = DateWindow::new(today);
    let sources = Sources {
        window: &window,
        nutrition: nutrition_logs,
        water: water_logs,
        workouts: workout_logs,
        targets: PlanTargets::resolve(meal_plan, workout_plan, &config.defaults),
    };

    ActivityStatsEngine::with_config(config).run(&sources)
}
