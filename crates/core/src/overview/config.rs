#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayAsset {
    pub symbol: String,
    pub label: String,
}

impl DisplayAsset {
    pub fn new(symbol: &str, label: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroColumns {
    pub cpi: String,
    pub unemployment: String,
    pub policy_rate: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewConfig {
    pub cards: Vec<DisplayAsset>,
    pub sectors: Vec<DisplayAsset>,
    pub regions: Vec<DisplayAsset>,
    pub macro_columns: MacroColumns,
    pub benchmark: String,
    pub dollar_index: String,
    pub two_year_column: String,
    pub ten_year_column: String,
    pub ten_year_card: Option<DisplayAsset>,
}

impl Default for OverviewConfig {
    fn default() -> Self {
        Self {
            cards: vec![
                DisplayAsset::new("sp500", "S&P 500"),
                DisplayAsset::new("nasdaq", "NASDAQ"),
                DisplayAsset::new("vgk", "Europe (VGK)"),
                DisplayAsset::new("ewj", "Japan (EWJ)"),
                DisplayAsset::new("eem", "Emerging Markets (EEM)"),
                DisplayAsset::new("usd_index", "Dollar Index"),
                DisplayAsset::new("gold", "Gold"),
                DisplayAsset::new("oil", "Brent Crude"),
            ],
            sectors: vec![
                DisplayAsset::new("xlk", "Technology"),
                DisplayAsset::new("xlf", "Financials"),
                DisplayAsset::new("xly", "Consumer Discretionary"),
                DisplayAsset::new("xlp", "Consumer Staples"),
                DisplayAsset::new("xle", "Energy"),
                DisplayAsset::new("xlv", "Health Care"),
                DisplayAsset::new("xli", "Industrials"),
                DisplayAsset::new("xlb", "Materials"),
                DisplayAsset::new("xlre", "Real Estate"),
                DisplayAsset::new("xlc", "Communication Services"),
            ],
            regions: vec![
                DisplayAsset::new("sp500", "US"),
                DisplayAsset::new("vgk", "Europe"),
                DisplayAsset::new("ewj", "Japan"),
                DisplayAsset::new("eem", "Emerging Markets"),
            ],
            macro_columns: MacroColumns {
                cpi: "cpi".to_string(),
                unemployment: "unemployment".to_string(),
                policy_rate: "fed_funds_rate".to_string(),
            },
            benchmark: "sp500".to_string(),
            dollar_index: "usd_index".to_string(),
            two_year_column: "two_year_yield".to_string(),
            ten_year_column: "ten_year_yield".to_string(),
            ten_year_card: Some(DisplayAsset::new("dgs10", "US 10Y Yield")),
        }
    }
}
