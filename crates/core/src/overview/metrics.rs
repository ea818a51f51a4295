use crate::domain::overview::{Direction, EquityTrend};
use crate::domain::table::is_missing;

pub const LAG_1D: usize = 1;
pub const LAG_1W: usize = 5;
pub const LAG_1M: usize = 21;
pub const LAG_1Y: usize = 252;

pub const SPARKLINE_LEN: usize = 30;

const TREND_MIN_OBSERVATIONS: usize = 60;
const TREND_MA_WINDOW: usize = 50;
const TREND_LOOKBACK: usize = 5;
const TREND_THRESHOLD_PCT: f64 = 1.0;

/// Lags count rows, gaps included. `None` when the column has no more than `periods`
/// observations, or when either end is missing or the base is zero.
pub fn pct_change(values: &[f64], periods: usize) -> Option<f64> {
    let observed = values.iter().filter(|v| !is_missing(**v)).count();
    if observed <= periods {
        return None;
    }
    let latest = *values.last()?;
    let prev = values[values.len() - 1 - periods];
    if is_missing(prev) || prev == 0.0 || is_missing(latest) {
        return None;
    }
    Some((latest / prev - 1.0) * 100.0)
}

pub fn sparkline(values: &[f64], len: usize) -> Vec<f64> {
    let observed: Vec<f64> = values.iter().copied().filter(|v| !is_missing(*v)).collect();
    let window = &observed[observed.len().saturating_sub(len)..];
    let Some(&base) = window.first() else {
        return Vec::new();
    };
    if base == 0.0 {
        return Vec::new();
    }
    window.iter().map(|v| v / base).collect()
}

pub fn change_bps(values: &[f64]) -> Option<f64> {
    let observed = values.iter().filter(|v| !is_missing(**v)).count();
    if observed < 2 {
        return None;
    }
    let n = values.len();
    let bps = (values[n - 1] - values[n - 2]) * 100.0;
    (!is_missing(bps)).then_some(bps)
}

pub fn direction(current: Option<f64>, previous: Option<f64>) -> Direction {
    match (current, previous) {
        (Some(a), Some(b)) if a > b => Direction::Up,
        (Some(a), Some(b)) if a < b => Direction::Down,
        _ => Direction::Flat,
    }
}

fn moving_average(values: &[f64], window: usize) -> Option<f64> {
    if values.len() < window {
        return None;
    }
    let tail = &values[values.len() - window..];
    if tail.iter().any(|v| is_missing(*v)) {
        return None;
    }
    Some(tail.iter().sum::<f64>() / window as f64)
}

pub fn equity_trend(values: &[f64]) -> EquityTrend {
    let observed = values.iter().filter(|v| !is_missing(**v)).count();
    if observed < TREND_MIN_OBSERVATIONS {
        return EquityTrend::Neutral;
    }

    let ret = pct_change(values, TREND_LOOKBACK);
    let above = match (values.last(), moving_average(values, TREND_MA_WINDOW)) {
        (Some(last), Some(ma)) => *last > ma,
        _ => false,
    };

    match ret {
        Some(r) if r >= TREND_THRESHOLD_PCT && above => EquityTrend::Bullish,
        Some(r) if r <= -TREND_THRESHOLD_PCT && !above => EquityTrend::Bearish,
        _ => EquityTrend::Neutral,
    }
}
