//! Calendar windows anchored on an explicit reference date
//!
//! Every calculator in the crate asks a [`DateWindow`] for its dates instead of
//! reading the clock, so a whole stats run is a pure function of "today" and
//! the input logs.

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};

/// Produce the last `days` calendar dates ending at `today`, oldest first.
///
/// The result always holds exactly `days` entries and its last element is
/// `today`. A zero-length request yields an empty list.
pub fn date_range(today: NaiveDate, days: usize) -> Vec<NaiveDate> {
    (0..days as u64)
        .rev()
        .map(|offset| step_back(today, offset))
        .collect()
}

fn step_back(today: NaiveDate, offset: u64) -> NaiveDate {
    today
        .checked_sub_days(Days::new(offset))
        .unwrap_or(NaiveDate::MIN)
}

/// Overlapping windows advancing one element at a time.
///
/// For `n` items there are `n - size + 1` windows (none when `size > n`).
pub fn sliding_windows<T>(items: &[T], size: usize) -> std::slice::Windows<'_, T> {
    items.windows(size.max(1))
}

/// Non-overlapping consecutive chunks, oldest first; the last chunk may be short.
pub fn chunked_windows<T>(items: &[T], size: usize) -> std::slice::Chunks<'_, T> {
    items.chunks(size.max(1))
}

/// Short "Mon D" label, e.g. `Oct 5`
pub fn short_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| StatsError::InvalidDate {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    /// Span covering an ordered date list; empty input gives an empty span.
    pub fn of(dates: &[NaiveDate]) -> Self {
        match (dates.first(), dates.last()) {
            (Some(&start), Some(&end)) => DateSpan { start, end },
            _ => DateSpan {
                start: NaiveDate::MAX,
                end: NaiveDate::MIN,
            },
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// The single source of "today" for a stats run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    today: NaiveDate,
}

impl DateWindow {
    pub fn new(today: NaiveDate) -> Self {
        DateWindow { today }
    }

    /// Window anchored on the local calendar day
    pub fn local_today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Trailing `days` dates ending today, oldest first
    pub fn last(&self, days: usize) -> Vec<NaiveDate> {
        date_range(self.today, days)
    }

    /// The date `n` days before today (`days_back(0)` is today)
    pub fn days_back(&self, n: u64) -> NaiveDate {
        step_back(self.today, n)
    }

    /// Inclusive span of the trailing `days` window
    pub fn span(&self, days: usize) -> DateSpan {
        DateSpan::of(&self.last(days))
    }

    /// Equally long window immediately before the trailing one
    /// (days `days + 1` through `2 * days` back).
    pub fn preceding_span(&self, days: usize) -> DateSpan {
        let both = self.last(days * 2);
        DateSpan::of(&both[..days])
    }
}
