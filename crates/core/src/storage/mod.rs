use crate::domain::table::TimeSeriesTable;
use crate::error::NoDataError;
use anyhow::Context;

pub mod tables;

pub const MARKET_TABLE: &str = "market_data";
pub const MACRO_TABLE: &str = "macro_data";

pub const MACRO_COLUMNS: &[&str] = &[
    "cpi",
    "unemployment",
    "fed_funds_rate",
    "gdp",
    "two_year_yield",
    "ten_year_yield",
];

/// An empty table is reported as [`NoDataError`].
#[async_trait::async_trait]
pub trait TableSource: Send + Sync {
    async fn load_market(&self) -> anyhow::Result<TimeSeriesTable>;

    async fn load_macro(&self) -> anyhow::Result<TimeSeriesTable>;
}

pub fn require_rows(table: TimeSeriesTable, name: &'static str) -> anyhow::Result<TimeSeriesTable> {
    if table.is_empty() {
        return Err(NoDataError::new(name).into());
    }
    Ok(table)
}

pub async fn migrate(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("sqlx migrations failed")?;
    Ok(())
}
