use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fitstats::{
    ActiveMealPlanSummary, ActivityInput, ActivityStatsEngine, DateWindow, NutritionLog,
    WaterIntakeLog, WorkoutLog,
};

/// Performance benchmarks for the stats engine
///
/// Histories grow from a few weeks to several years of daily logging; only
/// the trailing sixty days take part in the statistics, so the cost is
/// dominated by filtering.

fn reference_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 30).unwrap()
}

fn create_history(days: u64) -> ActivityInput {
    let today = reference_day();
    let mut input = ActivityInput {
        meal_plan: Some(ActiveMealPlanSummary {
            daily_calorie_goal: Some(2100.0),
        }),
        ..ActivityInput::default()
    };

    for offset in 0..days {
        let date = today - Days::new(offset);
        for (meal_type, calories) in [("breakfast", 450.0), ("lunch", 700.0), ("dinner", 900.0)] {
            input.nutrition_logs.push(NutritionLog {
                date,
                meal_type: meal_type.to_string(),
                total_calories: calories + (offset % 7) as f64 * 20.0,
                total_protein: calories / 20.0,
                total_carbs: calories / 8.0,
                total_fats: calories / 30.0,
            });
        }
        input.water_logs.push(WaterIntakeLog {
            date,
            glasses: 5 + (offset % 5) as u32,
        });
        if offset % 2 == 0 {
            input.workout_logs.push(WorkoutLog {
                date,
                workout_type: ["run", "cycling", "strength"][(offset % 3) as usize].to_string(),
                duration_minutes: 30.0 + (offset % 4) as f64 * 10.0,
                calories_burned: 250.0 + (offset % 4) as f64 * 60.0,
                completed: offset % 10 != 0,
            });
        }
    }

    input
}

fn bench_compute(c: &mut Criterion) {
    let engine = ActivityStatsEngine::new();
    let window = DateWindow::new(reference_day());

    let mut group = c.benchmark_group("Activity Stats");

    for &days in &[30u64, 90, 365, 1825] {
        let input = create_history(days);
        let logs = input.nutrition_logs.len() + input.water_logs.len() + input.workout_logs.len();

        group.throughput(Throughput::Elements(logs as u64));
        group.bench_with_input(BenchmarkId::new("compute", days), &input, |b, input| {
            b.iter(|| engine.compute(black_box(&window), black_box(input)));
        });
        group.bench_with_input(
            BenchmarkId::new("compute_parallel", days),
            &input,
            |b, input| {
                b.iter(|| engine.compute_parallel(black_box(&window), black_box(input)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_compute);
criterion_main!(benches);
