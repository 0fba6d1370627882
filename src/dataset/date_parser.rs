use chrono::{Datelike, NaiveDate};

const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Source files write dates as `DD-MM-YYYY`.
pub const SOURCE_DATE_FORMAT: &str = "%d-%m-%Y";

/// Parse `"DD-MM-YYYY"`; anything else is `None`.
pub fn parse_day_month_year(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), SOURCE_DATE_FORMAT).ok()
}

/// Filter values may use the source format or ISO `YYYY-MM-DD`.
pub fn parse_filter_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    parse_day_month_year(s).or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

/// Days since the Unix epoch, the Arrow `Date32` representation.
pub fn to_date32(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

pub fn from_date32(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}
