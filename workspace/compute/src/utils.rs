use chrono::{Datelike, NaiveDate};

/// Last calendar day of the given month, `None` for an invalid month or year.
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) {
        return None;
    }

    // Get the first day of the next month, then subtract one day
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Number of days in the given month, 0 for an invalid month or year.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    last_day_of_month(year, month).map_or(0, |d| d.day())
}

/// Calendar days between `today` and December 31 of the same year.
pub fn days_until_year_end(today: NaiveDate) -> i64 {
    NaiveDate::from_ymd_opt(today.year(), 12, 31).map_or(0, |end| (end - today).num_days())
}
