use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::Result;

/// Date format used for catalog file names and CLI arguments.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const WEEKDAY_LABELS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)?)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The cafeteria only serves on weekdays.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// `date` itself if it is a weekday, otherwise the following Monday.
pub fn nearest_weekday(date: NaiveDate) -> NaiveDate {
    let mut day = date;
    while !is_weekday(day) {
        match day.checked_add_days(Days::new(1)) {
            Some(next) => day = next,
            None => break,
        }
    }
    day
}

/// Short label as shown on the cafeteria site, e.g. `1/12(月)`.
pub fn to_date_label(date: NaiveDate) -> String {
    let weekday = WEEKDAY_LABELS[date.weekday().num_days_from_sunday() as usize];
    format!("{}/{}({})", date.month(), date.day(), weekday)
}
