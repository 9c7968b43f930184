// Date utility functions
// Week and month grid arithmetic shared by the layout engines

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// Last day of the week containing the given date.
pub fn get_week_end(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    get_week_start(date, first_day_of_week) + Duration::days(6)
}

/// The seven dates of the week starting at `week_start`.
pub fn week_dates(week_start: NaiveDate) -> Vec<NaiveDate> {
    week_start.iter_days().take(7).collect()
}

/// First and last day of a month, or `None` for an invalid year/month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_first.pred_opt()?))
}

/// Whole-week window covering a month: from the week start containing the
/// 1st through the week end containing the last day.
pub fn month_grid_window(
    year: i32,
    month: u32,
    first_day_of_week: u8,
) -> Option<(NaiveDate, NaiveDate)> {
    let (first, last) = month_bounds(year, month)?;
    Some((
        get_week_start(first, first_day_of_week),
        get_week_end(last, first_day_of_week),
    ))
}

/// Whole days from `from` to `to` (negative when `to` is earlier).
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Fractional hours since midnight, at minute resolution.
pub fn hours_since_midnight(time: NaiveDateTime) -> f32 {
    time.hour() as f32 + time.minute() as f32 / 60.0
}

/// Calendar date of `instant` as seen in `tz`.
pub fn date_in_zone(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Today's date in `tz`, regardless of the machine's local zone.
pub fn today_in(tz: Tz) -> NaiveDate {
    date_in_zone(Utc::now(), tz)
}
