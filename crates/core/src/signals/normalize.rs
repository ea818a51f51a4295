use crate::domain::table::{is_missing, TimeSeriesTable};
use statrs::statistics::Statistics;

pub fn pct_returns(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

pub fn zscore(values: &[f64]) -> Vec<f64> {
    let (mean, std) = mean_std(values);
    values.iter().map(|v| (v - mean) / std).collect()
}

fn mean_std(values: &[f64]) -> (f64, f64) {
    let present: Vec<f64> = values.iter().copied().filter(|v| !is_missing(*v)).collect();
    (present.iter().mean(), present.iter().std_dev())
}

pub fn normalized_returns(prices: &TimeSeriesTable) -> anyhow::Result<TimeSeriesTable> {
    let dates = prices.dates().iter().skip(1).copied().collect();
    let mut out = TimeSeriesTable::new(dates)?;
    for col in prices.columns() {
        out.push_column(col.name.clone(), zscore(&pct_returns(&col.values)))?;
    }
    Ok(out)
}
