use crate::domain::table::TimeSeriesTable;

pub type GroupScoreTable = TimeSeriesTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Direct,
    Inverted,
}

impl Polarity {
    pub fn multiplier(self) -> f64 {
        match self {
            Polarity::Direct => 1.0,
            Polarity::Inverted => -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupDefinition {
    pub name: String,
    pub members: Vec<String>,
    pub weight: f64,
    pub polarity: Polarity,
}

impl GroupDefinition {
    pub fn new(name: &str, members: &[&str], weight: f64) -> Self {
        Self {
            name: name.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
            weight,
            polarity: Polarity::Direct,
        }
    }

    pub fn inverted(mut self) -> Self {
        self.polarity = Polarity::Inverted;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalConfig {
    pub groups: Vec<GroupDefinition>,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            groups: vec![
                GroupDefinition::new(
                    "equities",
                    &["sp500", "nasdaq", "vgk", "ewj", "eem", "mtum", "vtv", "iwf"],
                    0.30,
                ),
                GroupDefinition::new("credit", &["hyg", "lqd"], 0.20),
                GroupDefinition::new("bonds", &["irx", "fvx", "tnx", "tlt"], 0.15),
                GroupDefinition::new(
                    "commodities",
                    &["oil", "natgas", "gold", "silver", "copper"],
                    0.15,
                ),
                GroupDefinition::new(
                    "fx",
                    &["usd_index", "eurusd", "gbpusd", "audusd", "usdjpy", "usdchf", "cew"],
                    0.10,
                ),
                GroupDefinition::new("crypto", &["bitcoin", "ethereum"], 0.05),
                GroupDefinition::new("vol", &["vix"], 0.05).inverted(),
            ],
        }
    }
}

pub fn group_scores(
    zscores: &TimeSeriesTable,
    groups: &[GroupDefinition],
) -> anyhow::Result<GroupScoreTable> {
    let mut out = TimeSeriesTable::new(zscores.dates().to_vec())?;

    for group in groups {
        let members: Vec<&[f64]> = group
            .members
            .iter()
            .filter_map(|m| zscores.column(m))
            .collect();
        if members.is_empty() {
            tracing::debug!(group = %group.name, "no member columns; group omitted");
            continue;
        }

        let scores = (0..zscores.len())
            .map(|row| {
                let (sum, n) = members
                    .iter()
                    .map(|col| col[row])
                    .filter(|v| v.is_finite())
                    .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
                if n == 0 {
                    f64::NAN
                } else {
                    sum / n as f64
                }
            })
            .collect();
        out.push_column(group.name.clone(), scores)?;
    }

    Ok(out)
}
