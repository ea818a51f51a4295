use crate::domain::table::{TimeSeriesTable, MISSING};
use crate::storage::{require_rows, TableSource, MACRO_COLUMNS, MACRO_TABLE, MARKET_TABLE};
use anyhow::Context;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::{Column, Row};

const KEY_COLUMNS: &[&str] = &["id", "date"];

#[derive(Debug, Clone)]
pub struct PgTableSource {
    pool: sqlx::PgPool,
}

impl PgTableSource {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl TableSource for PgTableSource {
    async fn load_market(&self) -> anyhow::Result<TimeSeriesTable> {
        load_table(&self.pool, MARKET_TABLE, None).await
    }

    async fn load_macro(&self) -> anyhow::Result<TimeSeriesTable> {
        load_table(&self.pool, MACRO_TABLE, Some(MACRO_COLUMNS)).await
    }
}

async fn load_table(
    pool: &sqlx::PgPool,
    table: &'static str,
    keep: Option<&[&str]>,
) -> anyhow::Result<TimeSeriesTable> {
    let t0 = std::time::Instant::now();
    let rows: Vec<PgRow> = sqlx::query(&format!("SELECT * FROM {table} ORDER BY date"))
        .persistent(false)
        .fetch_all(pool)
        .await
        .with_context(|| format!("select {table} failed"))?;

    let Some(first) = rows.first() else {
        return require_rows(TimeSeriesTable::default(), table);
    };

    let names: Vec<String> = first
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .filter(|n| !KEY_COLUMNS.contains(&n.as_str()))
        .filter(|n| keep.map_or(true, |k| k.contains(&n.as_str())))
        .collect();

    let mut dates = Vec::with_capacity(rows.len());
    let mut cells: Vec<Vec<f64>> = vec![Vec::with_capacity(rows.len()); names.len()];
    for row in &rows {
        let date: NaiveDate = row
            .try_get("date")
            .with_context(|| format!("{table}.date is not a date"))?;
        dates.push(date);
        for (name, col) in names.iter().zip(cells.iter_mut()) {
            let v: Option<f64> = row
                .try_get(name.as_str())
                .with_context(|| format!("{table}.{name} is not a float column"))?;
            col.push(v.unwrap_or(MISSING));
        }
    }

    let mut out = TimeSeriesTable::new(dates).with_context(|| format!("{table} rows are not date-unique"))?;
    for (name, values) in names.into_iter().zip(cells) {
        out.push_column(name, values)?;
    }

    tracing::debug!(
        table,
        rows = out.len(),
        columns = out.columns().len(),
        elapsed_ms = t0.elapsed().as_millis(),
        "loaded series table"
    );

    require_rows(out, table)
}
