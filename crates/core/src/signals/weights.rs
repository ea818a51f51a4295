use crate::signals::groups::{GroupDefinition, GroupScoreTable};

pub trait WeightScheme: Send + Sync {
    fn name(&self) -> &str;

    fn weights(&self, groups: &[GroupDefinition], scores: &GroupScoreTable) -> Vec<f64>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StaticWeights;

impl WeightScheme for StaticWeights {
    fn name(&self) -> &str {
        "static"
    }

    fn weights(&self, groups: &[GroupDefinition], _scores: &GroupScoreTable) -> Vec<f64> {
        groups.iter().map(|g| g.weight).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::groups::SignalConfig;

    #[test]
    fn static_weights_follow_config_order() {
        let config = SignalConfig::default();
        let w = StaticWeights.weights(&config.groups, &GroupScoreTable::default());
        assert_eq!(w, vec![0.30, 0.20, 0.15, 0.15, 0.10, 0.05, 0.05]);
    }
}
