use super::ExportError;
use crate::comparison::MonthComparison;
use crate::engine::StatsResult;
use crate::insights::InsightKind;
use colored::*;
use std::fmt::{self, Write as _};
use std::io::Write;
use std::path::Path;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct ComparisonRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "This Month")]
    this_month: String,
    #[tabled(rename = "Last Month")]
    last_month: String,
    #[tabled(rename = "Change")]
    change: String,
}

#[derive(Tabled)]
struct EffortRow {
    #[tabled(rename = "Week")]
    week: String,
    #[tabled(rename = "Minutes")]
    minutes: String,
    #[tabled(rename = "Calories")]
    calories: String,
}

fn metric(name: &str, value: impl ToString) -> MetricRow {
    MetricRow {
        metric: name.to_string(),
        value: value.to_string(),
    }
}

fn heading(title: &str, colorize: bool) -> String {
    if colorize {
        title.cyan().bold().to_string()
    } else {
        title.to_string()
    }
}

fn comparison_rows(group: &[MonthComparison]) -> impl Iterator<Item = ComparisonRow> + '_ {
    group.iter().map(|c| ComparisonRow {
        metric: c.metric.clone(),
        this_month: format!("{} {}", c.this_month, c.unit),
        last_month: format!("{} {}", c.last_month, c.unit),
        change: format!("{:+.1}%", c.change),
    })
}

/// Render a stats result as a terminal report. With `colorize` off the
/// output carries no ANSI escapes.
pub fn render_report(stats: &StatsResult, colorize: bool) -> String {
    let mut out = String::new();
    // Formatting into a String never fails.
    let _ = write_report(&mut out, stats, colorize);
    out
}

fn write_report(out: &mut String, stats: &StatsResult, colorize: bool) -> fmt::Result {
    writeln!(out, "{}", heading("ACTIVITY STATS", colorize))?;
    writeln!(out)?;

    let summary = &stats.weekly_summary;
    let overview = vec![
        metric("Current streak", format!("{} days", stats.current_streak)),
        metric("Calories this week", summary.total_calories),
        metric("Avg calories / day", summary.avg_calories),
        metric("Workouts completed", summary.workouts_completed),
        metric("Avg hydration", format!("{} glasses", summary.avg_hydration)),
        metric("Days active", format!("{}/7", summary.days_active)),
    ];
    writeln!(out, "{}", heading("THIS WEEK", colorize))?;
    writeln!(out, "{}", Table::new(overview).with(Style::rounded()))?;
    writeln!(out)?;

    let highlight = &stats.monthly_highlight;
    writeln!(out, "{}", heading(&highlight.title.to_uppercase(), colorize))?;
    writeln!(out, "{} ({})", highlight.description, highlight.value)?;
    writeln!(out)?;

    let hydration = &stats.hydration_insights;
    let best_day = hydration
        .best_day
        .date
        .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string());
    let plan = vec![
        metric("Diet adherence", format!("{}%", stats.diet_adherence.overall)),
        metric("Workout adherence", format!("{}%", stats.workout_adherence.overall)),
        metric(
            "Avg macros (P/C/F)",
            format!(
                "{}g / {}g / {}g",
                stats.avg_macros.protein, stats.avg_macros.carbs, stats.avg_macros.fats
            ),
        ),
        metric("Hydration streak", format!("{} days", hydration.current_streak)),
        metric(
            "Best water day",
            format!("{} ({} glasses)", best_day, hydration.best_day.glasses),
        ),
        metric("Most common workout", &stats.workout_stats.most_common_type),
        metric("Longest workout", format!("{} min", stats.workout_stats.longest_workout)),
    ];
    writeln!(out, "{}", heading("LAST 30 DAYS", colorize))?;
    writeln!(out, "{}", Table::new(plan).with(Style::rounded()))?;
    writeln!(out)?;

    let comparisons = &stats.month_comparisons;
    let rows: Vec<ComparisonRow> = comparison_rows(&comparisons.nutrition)
        .chain(comparison_rows(&comparisons.hydration))
        .chain(comparison_rows(&comparisons.fitness))
        .collect();
    writeln!(out, "{}", heading("MONTH OVER MONTH", colorize))?;
    writeln!(out, "{}", Table::new(rows).with(Style::rounded()))?;
    writeln!(out)?;

    let effort: Vec<EffortRow> = stats
        .weekly_effort
        .iter()
        .map(|w| EffortRow {
            week: w.week.clone(),
            minutes: w.total_minutes.to_string(),
            calories: w.total_calories.to_string(),
        })
        .collect();
    writeln!(out, "{}", heading("WEEKLY EFFORT", colorize))?;
    writeln!(out, "{}", Table::new(effort).with(Style::rounded()))?;

    if !stats.insights.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", heading("INSIGHTS", colorize))?;
        for insight in &stats.insights {
            let title = if colorize {
                match insight.kind {
                    InsightKind::Success => insight.title.green().to_string(),
                    InsightKind::Warning => insight.title.yellow().to_string(),
                    InsightKind::Info => insight.title.blue().to_string(),
                }
            } else {
                insight.title.clone()
            };
            writeln!(out, "• {}: {}", title, insight.description)?;
        }
    }

    Ok(())
}

/// Export the report, without colors, to a text file
pub fn export_report<P: AsRef<Path>>(
    stats: &StatsResult,
    output_path: P,
) -> Result<(), ExportError> {
    let mut file = std::fs::File::create(output_path)?;
    file.write_all(render_report(stats, false).as_bytes())?;
    Ok(())
}
