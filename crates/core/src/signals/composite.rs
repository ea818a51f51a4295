use crate::domain::overview::RiskLabel;
use crate::domain::table::TimeSeriesTable;
use crate::signals::groups::{GroupDefinition, GroupScoreTable};
use crate::signals::normalize::pct_returns;
use crate::signals::weights::WeightScheme;
use anyhow::ensure;
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

const RISK_ON_THRESHOLD: f64 = 0.20;
const RISK_OFF_THRESHOLD: f64 = -0.11;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentimentSeries {
    pub dates: Vec<NaiveDate>,
    pub scores: Vec<f64>,
}

impl SentimentSeries {
    pub fn latest(&self) -> Option<f64> {
        self.scores.last().copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn tail(&self, n: usize) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        let skip = self.len().saturating_sub(n);
        self.dates
            .iter()
            .copied()
            .zip(self.scores.iter().copied())
            .skip(skip)
    }
}

/// Flips inverted groups, then takes the weighted sum of the groups present on each date.
///
/// The sum is divided by the total weight of *every* configured group, including groups that
/// are absent from `scores` or non-finite on that date, so missing groups pull the composite
/// toward zero. A date with no finite group score is NaN.
///
/// Returns the composite together with the sign-adjusted group table.
pub fn composite(
    scores: &GroupScoreTable,
    groups: &[GroupDefinition],
    weights: &dyn WeightScheme,
) -> anyhow::Result<(SentimentSeries, GroupScoreTable)> {
    let w = weights.weights(groups, scores);
    ensure!(
        w.len() == groups.len(),
        "weight scheme {} returned {} weights for {} groups",
        weights.name(),
        w.len(),
        groups.len()
    );
    let total_weight: f64 = w.iter().sum();

    let mut adjusted = TimeSeriesTable::new(scores.dates().to_vec())?;
    let mut column_weights = Vec::new();
    for col in scores.columns() {
        let Some(idx) = groups.iter().position(|g| g.name == col.name) else {
            continue;
        };
        let sign = groups[idx].polarity.multiplier();
        adjusted.push_column(
            col.name.clone(),
            col.values.iter().map(|v| v * sign).collect(),
        )?;
        column_weights.push(w[idx]);
    }

    let composite = (0..scores.len())
        .map(|row| {
            let mut sum = 0.0;
            let mut present = 0usize;
            for (col, weight) in adjusted.columns().iter().zip(&column_weights) {
                let v = col.values[row];
                if v.is_finite() {
                    sum += v * weight;
                    present += 1;
                }
            }
            if present == 0 {
                f64::NAN
            } else {
                sum / total_weight
            }
        })
        .collect();

    Ok((
        SentimentSeries {
            dates: scores.dates().to_vec(),
            scores: composite,
        },
        adjusted,
    ))
}

pub fn classify_risk(score: f64) -> RiskLabel {
    if score >= RISK_ON_THRESHOLD {
        RiskLabel::RiskOn
    } else if score <= RISK_OFF_THRESHOLD {
        RiskLabel::RiskOff
    } else {
        RiskLabel::Neutral
    }
}

pub fn top_groups(scores: &GroupScoreTable, n: usize) -> Vec<(String, f64)> {
    let mut latest: Vec<(String, f64)> = scores
        .columns()
        .iter()
        .filter_map(|c| c.values.last().map(|v| (c.name.clone(), *v)))
        .collect();
    latest.sort_by(|a, b| match (a.1.is_nan(), b.1.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.1.abs().partial_cmp(&a.1.abs()).unwrap_or(Ordering::Equal),
    });
    latest.truncate(n);
    latest
}

pub fn correlation_with(
    series: &SentimentSeries,
    prices: &TimeSeriesTable,
    symbol: &str,
) -> Option<f64> {
    let column = prices.column(symbol)?;
    let returns = pct_returns(column);
    let return_dates = prices.dates().iter().skip(1);

    let pairs: Vec<(f64, f64)> = return_dates
        .zip(returns)
        .filter_map(|(date, r)| {
            let idx = series.dates.binary_search(date).ok()?;
            let s = series.scores[idx];
            (s.is_finite() && r.is_finite()).then_some((s, r))
        })
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x).powi(2);
        var_y += (y - mean_y).powi(2);
    }
    let denom = (var_x * var_y).sqrt();
    (denom > 0.0).then(|| cov / denom)
}
