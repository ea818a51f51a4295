use crate::domain::overview::{
    AssetCard, MacroChip, MacroChips, RegionTile, SectorTile, SentimentPanel, SnapshotPayload,
    YieldPanel,
};

pub trait Sanitize {
    fn sanitize(self) -> Self;
}

impl Sanitize for Option<f64> {
    fn sanitize(self) -> Self {
        self.filter(|v| v.is_finite())
    }
}

impl<T: Sanitize> Sanitize for Vec<T> {
    fn sanitize(self) -> Self {
        self.into_iter().map(Sanitize::sanitize).collect()
    }
}

impl Sanitize for SentimentPanel {
    fn sanitize(self) -> Self {
        Self {
            score: self.score.sanitize(),
            ..self
        }
    }
}

impl Sanitize for AssetCard {
    fn sanitize(self) -> Self {
        Self {
            price: self.price.sanitize(),
            change_1d: self.change_1d.sanitize(),
            change_1w: self.change_1w.sanitize(),
            change_1m: self.change_1m.sanitize(),
            change_1y: self.change_1y.sanitize(),
            sparkline: self.sparkline.sanitize(),
            ..self
        }
    }
}

impl Sanitize for MacroChip {
    fn sanitize(self) -> Self {
        Self {
            value: self.value.sanitize(),
            prev: self.prev.sanitize(),
            ..self
        }
    }
}

impl Sanitize for MacroChips {
    fn sanitize(self) -> Self {
        Self {
            cpi: self.cpi.sanitize(),
            unemployment: self.unemployment.sanitize(),
            policy_rate: self.policy_rate.sanitize(),
        }
    }
}

impl Sanitize for RegionTile {
    fn sanitize(self) -> Self {
        Self {
            change_1m: self.change_1m.sanitize(),
            ..self
        }
    }
}

impl Sanitize for SectorTile {
    fn sanitize(self) -> Self {
        Self {
            change_1m: self.change_1m.sanitize(),
            ..self
        }
    }
}

impl Sanitize for YieldPanel {
    fn sanitize(self) -> Self {
        Self {
            ten_year: self.ten_year.sanitize(),
            two_year: self.two_year.sanitize(),
            slope_bps: self.slope_bps.sanitize(),
            ..self
        }
    }
}

impl Sanitize for SnapshotPayload {
    fn sanitize(self) -> Self {
        Self {
            sentiment: self.sentiment.sanitize(),
            market_cards: self.market_cards.sanitize(),
            macro_chips: self.macro_chips.sanitize(),
            regions: self.regions.sanitize(),
            sectors: self.sectors.sanitize(),
            yield_panel: self.yield_panel.sanitize(),
            ..self
        }
    }
}
