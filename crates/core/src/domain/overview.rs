use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLabel {
    #[serde(rename = "Risk-On")]
    RiskOn,
    #[serde(rename = "Risk-Off")]
    RiskOff,
    Neutral,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::RiskOn => "Risk-On",
            RiskLabel::RiskOff => "Risk-Off",
            RiskLabel::Neutral => "Neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EquityTrend {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SlopeLabel {
    Normal,
    Inverted,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentPanel {
    pub score: Option<f64>,
    pub label: RiskLabel,
    pub drivers: Vec<String>,
    pub equity_trend: EquityTrend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetCard {
    pub symbol: String,
    pub name: String,
    pub price: Option<f64>,
    pub change_1d: Option<f64>,
    pub change_1w: Option<f64>,
    pub change_1m: Option<f64>,
    pub change_1y: Option<f64>,
    pub sparkline: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroChip {
    pub value: Option<f64>,
    pub prev: Option<f64>,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroChips {
    pub cpi: MacroChip,
    pub unemployment: MacroChip,
    pub policy_rate: MacroChip,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionTile {
    pub region: String,
    pub symbol: String,
    pub change_1m: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorTile {
    pub sector: String,
    pub symbol: String,
    pub change_1m: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldPanel {
    pub ten_year: Option<f64>,
    pub two_year: Option<f64>,
    #[serde(rename = "two_ten_slope_bps")]
    pub slope_bps: Option<f64>,
    pub slope_label: SlopeLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotPayload {
    pub sentiment: SentimentPanel,
    pub market_cards: Vec<AssetCard>,
    #[serde(rename = "macro")]
    pub macro_chips: MacroChips,
    pub regions: Vec<RegionTile>,
    pub sectors: Vec<SectorTile>,
    #[serde(rename = "yield")]
    pub yield_panel: YieldPanel,
    pub narrative: String,
    pub last_updated: DateTime<Utc>,
}
