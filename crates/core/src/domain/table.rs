use crate::time::calendar;
use anyhow::ensure;
use chrono::NaiveDate;

/// Marker for a gap in a column. Gaps propagate through arithmetic like any other NaN.
pub const MISSING: f64 = f64::NAN;

pub fn is_missing(v: f64) -> bool {
    v.is_nan()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeriesTable {
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl TimeSeriesTable {
    pub fn new(dates: Vec<NaiveDate>) -> anyhow::Result<Self> {
        for pair in dates.windows(2) {
            ensure!(
                pair[0] < pair[1],
                "dates must be strictly ascending ({} then {})",
                pair[0],
                pair[1]
            );
        }
        Ok(Self {
            dates,
            columns: Vec::new(),
        })
    }

    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> anyhow::Result<Self> {
        self.push_column(name, values)?;
        Ok(self)
    }

    pub fn push_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> anyhow::Result<()> {
        let name = name.into();
        ensure!(
            values.len() == self.dates.len(),
            "column {name} has {} cells for {} dates",
            values.len(),
            self.dates.len()
        );
        ensure!(!self.has_column(&name), "duplicate column {name}");
        self.columns.push(Column { name, values });
        Ok(())
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn latest(&self, name: &str) -> Option<f64> {
        self.column(name).and_then(|v| v.last().copied())
    }

    pub fn previous(&self, name: &str) -> Option<f64> {
        let values = self.column(name)?;
        match values.len() {
            0 => None,
            1 => values.last().copied(),
            n => Some(values[n - 2]),
        }
    }

    pub fn select(&self, names: &[&str]) -> Self {
        let columns = names
            .iter()
            .filter_map(|name| self.columns.iter().find(|c| c.name == *name).cloned())
            .collect();
        Self {
            dates: self.dates.clone(),
            columns,
        }
    }

    pub fn resample_business_days_ffill(&self) -> Self {
        let (Some(first), Some(last)) = (self.dates.first(), self.dates.last()) else {
            return self.clone();
        };
        let days = calendar::business_days(*first, *last);

        let columns = self
            .columns
            .iter()
            .map(|col| {
                let mut values = Vec::with_capacity(days.len());
                let mut src = 0usize;
                let mut carried = MISSING;
                for day in &days {
                    while src < self.dates.len() && self.dates[src] < *day {
                        src += 1;
                    }
                    let v = if src < self.dates.len() && self.dates[src] == *day {
                        col.values[src]
                    } else {
                        MISSING
                    };
                    if !is_missing(v) {
                        carried = v;
                    }
                    values.push(carried);
                }
                Column {
                    name: col.name.clone(),
                    values,
                }
            })
            .collect();

        Self {
            dates: days,
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn rejects_unsorted_dates() {
        assert!(TimeSeriesTable::new(vec![d(2026, 1, 6), d(2026, 1, 5)]).is_err());
        assert!(TimeSeriesTable::new(vec![d(2026, 1, 5), d(2026, 1, 5)]).is_err());
    }

    #[test]
    fn rejects_mismatched_column_length() {
        let table = TimeSeriesTable::new(vec![d(2026, 1, 5), d(2026, 1, 6)]).unwrap();
        assert!(table.with_column("sp500", vec![1.0]).is_err());
    }

    #[test]
    fn previous_falls_back_to_latest_on_single_row() {
        let table = TimeSeriesTable::new(vec![d(2026, 1, 5)])
            .unwrap()
            .with_column("cpi", vec![300.0])
            .unwrap();
        assert_eq!(table.previous("cpi"), Some(300.0));
        assert_eq!(table.previous("gdp"), None);
    }

    #[test]
    fn select_keeps_requested_order_and_skips_unknown() {
        let table = TimeSeriesTable::new(vec![d(2026, 1, 5)])
            .unwrap()
            .with_column("a", vec![1.0])
            .unwrap()
            .with_column("b", vec![2.0])
            .unwrap();
        let picked = table.select(&["b", "zzz", "a"]);
        let names: Vec<_> = picked.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn resample_forward_fills_monthly_series() {
        // Monthly observation on Thu 2026-01-01 and Mon 2026-01-05 with a gap in between.
        let table = TimeSeriesTable::new(vec![d(2026, 1, 1), d(2026, 1, 5), d(2026, 1, 7)])
            .unwrap()
            .with_column("ten_year_yield", vec![4.0, MISSING, 4.2])
            .unwrap();
        let daily = table.resample_business_days_ffill();
        assert_eq!(
            daily.dates(),
            &[d(2026, 1, 1), d(2026, 1, 2), d(2026, 1, 5), d(2026, 1, 6), d(2026, 1, 7)]
        );
        assert_eq!(
            daily.column("ten_year_yield").unwrap(),
            &[4.0, 4.0, 4.0, 4.0, 4.2]
        );
    }

    #[test]
    fn resample_drops_weekend_observations() {
        // 2026-01-03 is Saturday; its value is lost and Friday's value carries into Monday.
        let table = TimeSeriesTable::new(vec![d(2026, 1, 2), d(2026, 1, 3), d(2026, 1, 5)])
            .unwrap()
            .with_column("x", vec![1.0, 2.0, MISSING])
            .unwrap();
        let daily = table.resample_business_days_ffill();
        assert_eq!(daily.dates(), &[d(2026, 1, 2), d(2026, 1, 5)]);
        assert_eq!(daily.column("x").unwrap(), &[1.0, 1.0]);
    }
}
