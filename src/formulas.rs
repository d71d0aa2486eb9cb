//! Shared numeric formulas
//!
//! Every rounded figure in the stats output goes through these helpers so the
//! same value is reported identically wherever it appears.

/// Round half up (`2.5 -> 3`, `-2.5 -> -2`).
///
/// Non-finite input is returned unchanged.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to one decimal place, half up
pub fn round_to_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

/// Signed percentage change from `previous` to `current`, rounded.
///
/// Returns 0 when there is no previous value to compare against.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    round_half_up((current - previous) / previous * 100.0)
}

/// Arithmetic mean, 0 for an empty sample
pub fn mean_or_zero<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Clamp a score into `[0, 100]`, letting NaN through untouched
pub fn clamp_score(score: f64) -> f64 {
    if score < 0.0 {
        0.0
    } else if score > 100.0 {
        100.0
    } else {
        score
    }
}
