pub mod config;
pub mod metrics;
pub mod narrative;

pub use config::{DisplayAsset, MacroColumns, OverviewConfig};

use crate::domain::overview::{
    AssetCard, EquityTrend, MacroChip, MacroChips, RegionTile, RiskLabel, SectorTile,
    SentimentPanel, SlopeLabel, SnapshotPayload, YieldPanel,
};
use crate::domain::table::TimeSeriesTable;
use crate::signals::{classify_risk, top_groups, SentimentOutput};
use chrono::{DateTime, Utc};
use metrics::{LAG_1D, LAG_1M, LAG_1W, LAG_1Y, SPARKLINE_LEN};
use narrative::{capitalize, MarketMoves};

const DRIVER_COUNT: usize = 3;

pub struct SnapshotAssembler {
    config: OverviewConfig,
}

impl SnapshotAssembler {
    pub fn new(config: OverviewConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OverviewConfig {
        &self.config
    }

    pub fn assemble(
        &self,
        market: &TimeSeriesTable,
        macro_table: &TimeSeriesTable,
        sentiment: &SentimentOutput,
        built_at: DateTime<Utc>,
    ) -> SnapshotPayload {
        let macro_daily = macro_table.resample_business_days_ffill();

        let mut market_cards: Vec<AssetCard> = self
            .config
            .cards
            .iter()
            .filter_map(|asset| {
                market
                    .column(&asset.symbol)
                    .map(|values| asset_card(asset, values))
            })
            .collect();
        if let Some(card) = &self.config.ten_year_card {
            if let Some(values) = macro_daily.column(&self.config.ten_year_column) {
                market_cards.push(asset_card(card, values));
            }
        }

        let score = sentiment.series.latest();
        let label = score.map(classify_risk).unwrap_or(RiskLabel::Neutral);
        let drivers = top_groups(&sentiment.groups, DRIVER_COUNT)
            .into_iter()
            .map(|(name, value)| format!("{} {}", capitalize(&name), driver_glyph(value)))
            .collect();
        let equity_trend = market
            .column(&self.config.benchmark)
            .map(metrics::equity_trend)
            .unwrap_or(EquityTrend::Neutral);

        let cols = &self.config.macro_columns;
        let macro_chips = MacroChips {
            cpi: macro_chip(macro_table, &cols.cpi),
            unemployment: macro_chip(macro_table, &cols.unemployment),
            policy_rate: macro_chip(macro_table, &cols.policy_rate),
        };

        let regions = self
            .config
            .regions
            .iter()
            .filter_map(|r| {
                market.column(&r.symbol).map(|values| RegionTile {
                    region: r.label.clone(),
                    symbol: r.symbol.clone(),
                    change_1m: metrics::pct_change(values, LAG_1M),
                })
            })
            .collect();

        let sectors = self
            .config
            .sectors
            .iter()
            .filter_map(|s| {
                market.column(&s.symbol).map(|values| SectorTile {
                    sector: s.label.clone(),
                    symbol: s.symbol.clone(),
                    change_1m: metrics::pct_change(values, LAG_1M),
                })
            })
            .collect();

        let yield_panel = self.yield_panel(&macro_daily);

        let moves = MarketMoves {
            equities_pct: market
                .column(&self.config.benchmark)
                .and_then(|v| metrics::pct_change(v, LAG_1D)),
            dollar_pct: market
                .column(&self.config.dollar_index)
                .and_then(|v| metrics::pct_change(v, LAG_1D)),
            ten_year_bps: macro_daily
                .column(&self.config.ten_year_column)
                .and_then(metrics::change_bps),
        };
        let narrative = narrative::narrative(&moves, label);

        SnapshotPayload {
            sentiment: SentimentPanel {
                score,
                label,
                drivers,
                equity_trend,
            },
            market_cards,
            macro_chips,
            regions,
            sectors,
            yield_panel,
            narrative,
            last_updated: built_at,
        }
    }

    fn yield_panel(&self, macro_daily: &TimeSeriesTable) -> YieldPanel {
        let ten_year = macro_daily.latest(&self.config.ten_year_column);
        let two_year = macro_daily.latest(&self.config.two_year_column);
        let slope_bps = match (ten_year, two_year) {
            (Some(ten), Some(two)) => Some((ten - two) * 100.0),
            _ => None,
        };
        let slope_label = match slope_bps {
            Some(bps) if bps < 0.0 => SlopeLabel::Inverted,
            _ => SlopeLabel::Normal,
        };
        YieldPanel {
            ten_year,
            two_year,
            slope_bps,
            slope_label,
        }
    }
}

fn asset_card(asset: &DisplayAsset, values: &[f64]) -> AssetCard {
    AssetCard {
        symbol: asset.symbol.clone(),
        name: asset.label.clone(),
        price: values.last().copied(),
        change_1d: metrics::pct_change(values, LAG_1D),
        change_1w: metrics::pct_change(values, LAG_1W),
        change_1m: metrics::pct_change(values, LAG_1M),
        change_1y: metrics::pct_change(values, LAG_1Y),
        sparkline: metrics::sparkline(values, SPARKLINE_LEN)
            .into_iter()
            .map(Some)
            .collect(),
    }
}

fn macro_chip(table: &TimeSeriesTable, column: &str) -> MacroChip {
    let value = table.latest(column);
    let prev = table.previous(column);
    MacroChip {
        value,
        prev,
        direction: metrics::direction(value, prev),
    }
}

fn driver_glyph(score: f64) -> &'static str {
    if score > 0.0 {
        "↑"
    } else if score < 0.0 {
        "↓"
    } else {
        "→"
    }
}
