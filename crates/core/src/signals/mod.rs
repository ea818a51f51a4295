pub mod composite;
pub mod groups;
pub mod normalize;
pub mod weights;

pub use composite::{classify_risk, correlation_with, top_groups, SentimentSeries};
pub use groups::{GroupDefinition, GroupScoreTable, Polarity, SignalConfig};
pub use weights::{StaticWeights, WeightScheme};

use crate::domain::table::TimeSeriesTable;

#[derive(Debug, Clone)]
pub struct SentimentOutput {
    pub series: SentimentSeries,
    pub groups: GroupScoreTable,
}

pub struct SignalEngine {
    config: SignalConfig,
    weights: Box<dyn WeightScheme>,
}

impl SignalEngine {
    pub fn new(config: SignalConfig) -> Self {
        Self::with_weights(config, Box::new(StaticWeights))
    }

    pub fn with_weights(config: SignalConfig, weights: Box<dyn WeightScheme>) -> Self {
        Self { config, weights }
    }

    pub fn generate(&self, prices: &TimeSeriesTable) -> anyhow::Result<SentimentOutput> {
        let zscores = normalize::normalized_returns(prices)?;
        let scores = groups::group_scores(&zscores, &self.config.groups)?;
        let (series, groups) =
            composite::composite(&scores, &self.config.groups, self.weights.as_ref())?;

        tracing::debug!(
            rows = series.len(),
            groups = groups.columns().len(),
            weights = self.weights.name(),
            latest = ?series.latest(),
            "sentiment series generated"
        );

        Ok(SentimentOutput { series, groups })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn prices() -> TimeSeriesTable {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let dates = (0..6).map(|i| start + chrono::Duration::days(i)).collect();
        TimeSeriesTable::new(dates)
            .unwrap()
            .with_column("sp500", vec![100.0, 101.0, 100.5, 102.0, 103.0, 104.5])
            .unwrap()
            .with_column("vix", vec![20.0, 19.0, 21.0, 18.0, 17.5, 16.0])
            .unwrap()
            .with_column("unknown", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
            .unwrap()
    }

    #[test]
    fn generates_one_score_per_return_date() {
        let out = SignalEngine::new(SignalConfig::default())
            .generate(&prices())
            .unwrap();
        assert_eq!(out.series.len(), 5);
        let names: Vec<_> = out.groups.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["equities", "vol"]);
    }

    #[test]
    fn rising_equities_and_falling_vol_read_risk_on_at_the_end() {
        let out = SignalEngine::new(SignalConfig::default())
            .generate(&prices())
            .unwrap();
        assert!(out.series.latest().unwrap() > 0.0);
    }

    #[test]
    fn custom_weight_scheme_is_used() {
        struct EquitiesOnly;
        impl WeightScheme for EquitiesOnly {
            fn name(&self) -> &str {
                "equities_only"
            }
            fn weights(&self, groups: &[GroupDefinition], _: &GroupScoreTable) -> Vec<f64> {
                groups
                    .iter()
                    .map(|g| if g.name == "equities" { 1.0 } else { 0.0 })
                    .collect()
            }
        }

        let engine = SignalEngine::with_weights(SignalConfig::default(), Box::new(EquitiesOnly));
        let out = engine.generate(&prices()).unwrap();
        let equities = out.groups.column("equities").unwrap();
        assert_eq!(out.series.scores, equities.to_vec());
    }
}
