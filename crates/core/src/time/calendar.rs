use chrono::{Datelike, Duration, NaiveDate};

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun)
}

pub fn roll_forward(date: NaiveDate) -> NaiveDate {
    let mut cur = date;
    while is_weekend(cur) {
        cur += Duration::days(1);
    }
    cur
}

pub fn business_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut cur = roll_forward(start);
    while cur <= end {
        out.push(cur);
        cur = roll_forward(cur + Duration::days(1));
    }
    out
}
