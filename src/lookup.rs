//! Date-keyed access to log streams
//!
//! Water and workout logs are expected to hold at most one record per day.
//! When a stream does contain same-day duplicates, [`DuplicatePolicy`] decides
//! which record a per-day lookup sees.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::models::{NutritionLog, WaterIntakeLog, WorkoutLog};
use crate::window::DateSpan;

/// How a per-day lookup resolves several records sharing one date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Earliest record in input order wins
    #[default]
    FirstMatch,
    /// Latest record in input order wins
    LastMatch,
    /// Numeric fields are summed; labels come from the first record
    Sum,
}

/// A log row that belongs to one calendar day
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// Folding of a same-day duplicate into an earlier record
pub trait Combine {
    fn combine(&mut self, other: &Self);
}

impl Dated for NutritionLog {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for WaterIntakeLog {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for WorkoutLog {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Combine for WaterIntakeLog {
    fn combine(&mut self, other: &Self) {
        self.glasses += other.glasses;
    }
}

impl Combine for WorkoutLog {
    fn combine(&mut self, other: &Self) {
        self.duration_minutes += other.duration_minutes;
        self.calories_burned += other.calories_burned;
        self.completed |= other.completed;
    }
}

/// Index records by date, resolving duplicates with `policy`
pub fn index_by_date<T>(logs: &[T], policy: DuplicatePolicy) -> HashMap<NaiveDate, &T>
where
    T: Dated,
{
    let mut index: HashMap<NaiveDate, &T> = HashMap::with_capacity(logs.len());
    for log in logs {
        match policy {
            DuplicatePolicy::FirstMatch | DuplicatePolicy::Sum => {
                index.entry(log.date()).or_insert(log);
            }
            DuplicatePolicy::LastMatch => {
                index.insert(log.date(), log);
            }
        }
    }
    index
}

/// Owned per-day records with duplicates resolved by `policy`
pub fn resolve_by_date<T>(logs: &[T], policy: DuplicatePolicy) -> HashMap<NaiveDate, T>
where
    T: Dated + Combine + Clone,
{
    if policy != DuplicatePolicy::Sum {
        return index_by_date(logs, policy)
            .into_iter()
            .map(|(date, log)| (date, log.clone()))
            .collect();
    }

    let mut merged: HashMap<NaiveDate, T> = HashMap::with_capacity(logs.len());
    for log in logs {
        merged
            .entry(log.date())
            .and_modify(|existing| existing.combine(log))
            .or_insert_with(|| log.clone());
    }
    merged
}

/// Distinct dates present in a stream
pub fn dates_of<T: Dated>(logs: &[T]) -> HashSet<NaiveDate> {
    logs.iter().map(Dated::date).collect()
}

/// Records whose date falls inside `span`, in input order
pub fn within<'a, T: Dated>(logs: &'a [T], span: &DateSpan) -> impl Iterator<Item = &'a T> + 'a {
    let span = *span;
    logs.iter().filter(move |log| span.contains(log.date()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water(date: NaiveDate, glasses: u32) -> WaterIntakeLog {
        WaterIntakeLog { date, glasses }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
    }

    #[test]
    fn test_first_match_policy() {
        let logs = vec![water(day(1), 4), water(day(1), 9), water(day(2), 6)];
        let resolved = resolve_by_date(&logs, DuplicatePolicy::FirstMatch);

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[&day(1)].glasses, 4);
        assert_eq!(resolved[&day(2)].glasses, 6);
    }

    #[test]
    fn test_last_match_policy() {
        let logs = vec![water(day(1), 4), water(day(1), 9)];
        let resolved = resolve_by_date(&logs, DuplicatePolicy::LastMatch);
        assert_eq!(resolved[&day(1)].glasses, 9);
    }

    #[test]
    fn test_sum_policy() {
        let logs = vec![
            WorkoutLog {
                date: day(3),
                workout_type: "run".to_string(),
                duration_minutes: 30.0,
                calories_burned: 300.0,
                completed: false,
            },
            WorkoutLog {
                date: day(3),
                workout_type: "yoga".to_string(),
                duration_minutes: 20.0,
                calories_burned: 80.0,
                completed: true,
            },
        ];

        let resolved = resolve_by_date(&logs, DuplicatePolicy::Sum);
        let merged = &resolved[&day(3)];

        assert_eq!(merged.workout_type, "run");
        assert_eq!(merged.duration_minutes, 50.0);
        assert_eq!(merged.calories_burned, 380.0);
        assert!(merged.completed);
    }

    #[test]
    fn test_within_span() {
        let logs = vec![water(day(1), 1), water(day(5), 2), water(day(9), 3)];
        let span = DateSpan {
            start: day(2),
            end: day(9),
        };

        let glasses: Vec<u32> = within(&logs, &span).map(|l| l.glasses).collect();
        assert_eq!(glasses, vec![2, 3]);
    }
}
