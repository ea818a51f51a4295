use crate::cache::{SnapshotCache, SystemClock};
use crate::config::Settings;
use crate::domain::overview::SnapshotPayload;
use crate::domain::table::TimeSeriesTable;
use crate::overview::{OverviewConfig, SnapshotAssembler};
use crate::sanitize::Sanitize;
use crate::signals::{SentimentOutput, SignalConfig, SignalEngine};
use crate::storage::{require_rows, TableSource, MACRO_TABLE, MARKET_TABLE};
use anyhow::Context;
use std::sync::Arc;

pub struct OverviewService {
    source: Arc<dyn TableSource>,
    engine: SignalEngine,
    assembler: SnapshotAssembler,
    cache: SnapshotCache<SnapshotPayload>,
}

impl OverviewService {
    pub fn new(
        source: Arc<dyn TableSource>,
        engine: SignalEngine,
        assembler: SnapshotAssembler,
        cache: SnapshotCache<SnapshotPayload>,
    ) -> Self {
        Self {
            source,
            engine,
            assembler,
            cache,
        }
    }

    pub fn from_settings(source: Arc<dyn TableSource>, settings: &Settings) -> Self {
        Self::new(
            source,
            SignalEngine::new(SignalConfig::default()),
            SnapshotAssembler::new(OverviewConfig::default()),
            SnapshotCache::new(settings.overview_cache_ttl, Arc::new(SystemClock)),
        )
    }

    pub fn assembler(&self) -> &SnapshotAssembler {
        &self.assembler
    }

    async fn load_market(&self) -> anyhow::Result<TimeSeriesTable> {
        let table = self
            .source
            .load_market()
            .await
            .context("load market table failed")?;
        require_rows(table, MARKET_TABLE)
    }

    async fn load_macro(&self) -> anyhow::Result<TimeSeriesTable> {
        let table = self
            .source
            .load_macro()
            .await
            .context("load macro table failed")?;
        require_rows(table, MACRO_TABLE)
    }

    pub async fn generate_sentiment_series(&self) -> anyhow::Result<SentimentOutput> {
        let market = self.load_market().await?;
        self.engine.generate(&market)
    }

    pub async fn generate_with_market(&self) -> anyhow::Result<(SentimentOutput, TimeSeriesTable)> {
        let market = self.load_market().await?;
        let output = self.engine.generate(&market)?;
        Ok((output, market))
    }

    pub async fn build_overview_snapshot(
        &self,
        force_refresh: bool,
    ) -> anyhow::Result<Arc<SnapshotPayload>> {
        self.cache
            .get_or_build(force_refresh, |now| async move {
                let market = self.load_market().await?;
                let macro_table = self.load_macro().await?;
                let sentiment = self.engine.generate(&market)?;
                let payload = self
                    .assembler
                    .assemble(&market, &macro_table, &sentiment, now)
                    .sanitize();

                tracing::info!(
                    market_rows = market.len(),
                    macro_rows = macro_table.len(),
                    cards = payload.market_cards.len(),
                    label = payload.sentiment.label.as_str(),
                    "overview snapshot rebuilt"
                );
                Ok(payload)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::test_clock::ManualClock;
    use crate::domain::overview::{Direction, SlopeLabel};
    use crate::error::is_no_data;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    struct MemorySource {
        market: TimeSeriesTable,
        macro_table: TimeSeriesTable,
        loads: AtomicUsize,
        fail: AtomicBool,
    }

    #[async_trait::async_trait]
    impl TableSource for MemorySource {
        async fn load_market(&self) -> anyhow::Result<TimeSeriesTable> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                anyhow::bail!("connection reset");
            }
            Ok(self.market.clone())
        }

        async fn load_macro(&self) -> anyhow::Result<TimeSeriesTable> {
            Ok(self.macro_table.clone())
        }
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    fn market() -> TimeSeriesTable {
        TimeSeriesTable::new(vec![d(12), d(13), d(14), d(15), d(16)])
            .unwrap()
            .with_column("sp500", vec![5000.0, 5010.0, 4990.0, 5000.0, 5025.0])
            .unwrap()
            .with_column("usd_index", vec![104.0, 104.2, 104.1, 104.5, 104.5])
            .unwrap()
            .with_column("vix", vec![16.0, 15.5, 17.0, f64::NAN, 15.0])
            .unwrap()
            .with_column("hyg", vec![77.0; 5])
            .unwrap()
    }

    fn macro_table() -> TimeSeriesTable {
        TimeSeriesTable::new(vec![d(15), d(16)])
            .unwrap()
            .with_column("cpi", vec![300.0, 305.0])
            .unwrap()
            .with_column("two_year_yield", vec![4.5, 4.5])
            .unwrap()
            .with_column("ten_year_yield", vec![4.0, 4.0])
            .unwrap()
    }

    fn service(source: Arc<MemorySource>, clock: Arc<ManualClock>) -> OverviewService {
        OverviewService::new(
            source,
            SignalEngine::new(SignalConfig::default()),
            SnapshotAssembler::new(OverviewConfig::default()),
            SnapshotCache::new(Duration::from_secs(300), clock),
        )
    }

    fn fixture(
        market: TimeSeriesTable,
        macro_table: TimeSeriesTable,
    ) -> (Arc<MemorySource>, Arc<ManualClock>) {
        let source = Arc::new(MemorySource {
            market,
            macro_table,
            loads: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        });
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 10, 16, 21, 0, 0).unwrap(),
        ));
        (source, clock)
    }

    #[tokio::test]
    async fn snapshot_end_to_end() {
        let (source, clock) = fixture(market(), macro_table());
        let svc = service(source, clock);

        let payload = svc.build_overview_snapshot(false).await.unwrap();
        assert_eq!(payload.macro_chips.cpi.value, Some(305.0));
        assert_eq!(payload.macro_chips.cpi.prev, Some(300.0));
        assert_eq!(payload.macro_chips.cpi.direction, Direction::Up);
        assert_eq!(payload.yield_panel.slope_bps, Some(-50.0));
        assert_eq!(payload.yield_panel.slope_label, SlopeLabel::Inverted);
        assert!(payload.narrative.starts_with("Equities higher → "));
        // hyg is constant, so credit scores are non-finite and the panel must not carry NaN.
        assert!(payload.sentiment.score.map_or(true, f64::is_finite));
        serde_json::to_string(payload.as_ref()).unwrap();
    }

    #[tokio::test]
    async fn cached_within_ttl_and_forced_refresh_rebuilds() {
        let (source, clock) = fixture(market(), macro_table());
        let svc = service(source.clone(), clock.clone());

        let first = svc.build_overview_snapshot(false).await.unwrap();
        clock.advance(chrono::Duration::seconds(30));
        let second = svc.build_overview_snapshot(false).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.last_updated, second.last_updated);
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);

        let forced = svc.build_overview_snapshot(true).await.unwrap();
        assert!(forced.last_updated > first.last_updated);
        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn empty_market_is_no_data() {
        let (source, clock) = fixture(TimeSeriesTable::default(), macro_table());
        let svc = service(source, clock);

        let err = svc.build_overview_snapshot(false).await.unwrap_err();
        assert!(is_no_data(&err));
        let err = svc.generate_sentiment_series().await.unwrap_err();
        assert!(is_no_data(&err));
    }

    #[tokio::test]
    async fn empty_macro_is_no_data() {
        let (source, clock) = fixture(market(), TimeSeriesTable::default());
        let svc = service(source, clock);

        let err = svc.build_overview_snapshot(false).await.unwrap_err();
        assert!(is_no_data(&err));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let (source, clock) = fixture(market(), macro_table());
        let svc = service(source.clone(), clock.clone());

        let first = svc.build_overview_snapshot(false).await.unwrap();
        source.fail.store(true, Ordering::SeqCst);
        clock.advance(chrono::Duration::seconds(1));

        let err = svc.build_overview_snapshot(true).await.unwrap_err();
        assert!(!is_no_data(&err));

        let again = svc.build_overview_snapshot(false).await.unwrap();
        assert!(Arc::ptr_eq(&first, &again));
    }

    #[tokio::test]
    async fn sentiment_series_has_one_row_per_return_date() {
        let (source, clock) = fixture(market(), macro_table());
        let svc = service(source, clock);

        let out = svc.generate_sentiment_series().await.unwrap();
        assert_eq!(out.series.dates, vec![d(13), d(14), d(15), d(16)]);
        assert!(out.groups.has_column("credit"));
    }
}
