use chrono::{offset::LocalResult, DateTime, Duration, FixedOffset, NaiveTime, TimeZone, Timelike};
use serde_json::json;

use crate::error::{AppError, AppResult};

pub fn parse_datetime(value: &str) -> AppResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value.trim()).map_err(|err| {
        AppError::validation_with_details(
            "invalid datetime format",
            json!({"value": value, "error": err.to_string()}),
        )
    })
}

pub fn format_datetime(dt: DateTime<FixedOffset>) -> String {
    dt.to_rfc3339()
}

/// Saturates at the input instant when the shift would leave chrono's range.
pub fn shift_minutes(dt: DateTime<FixedOffset>, minutes: i64) -> DateTime<FixedOffset> {
    Duration::try_minutes(minutes)
        .and_then(|delta| dt.checked_add_signed(delta))
        .unwrap_or(dt)
}

/// Signed minutes from `start` to `end`; negative when `end` precedes `start`.
pub fn minutes_between(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> i64 {
    end.signed_duration_since(start).num_minutes()
}

/// Half-open overlap test: touching intervals do not overlap.
pub fn overlaps(
    a_start: DateTime<FixedOffset>,
    a_end: DateTime<FixedOffset>,
    b_start: DateTime<FixedOffset>,
    b_end: DateTime<FixedOffset>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Overlap length in minutes, `None` when the intervals do not overlap.
/// Partial minutes round up, so any overlap between items of non-zero length
/// reports at least 1.
pub fn overlap_minutes(
    a_start: DateTime<FixedOffset>,
    a_end: DateTime<FixedOffset>,
    b_start: DateTime<FixedOffset>,
    b_end: DateTime<FixedOffset>,
) -> Option<i64> {
    if !overlaps(a_start, a_end, b_start, b_end) {
        return None;
    }
    let overlap = a_end.min(b_end).signed_duration_since(a_start.max(b_start));
    let whole = overlap.num_minutes();
    if overlap > Duration::minutes(whole) {
        Some(whole + 1)
    } else {
        Some(whole)
    }
}

/// The same calendar day as `day`, at `hour:00` in `day`'s offset.
pub fn at_hour(day: DateTime<FixedOffset>, hour: u32) -> DateTime<FixedOffset> {
    let Some(naive_time) = NaiveTime::from_hms_opt(hour.min(23), 0, 0) else {
        return day;
    };
    let offset = *day.offset();
    let naive = day.date_naive().and_time(naive_time);
    match offset.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(first, _) => first,
        LocalResult::None => day,
    }
}

pub fn hour_of(dt: DateTime<FixedOffset>) -> u32 {
    dt.hour()
}

pub fn format_clock(dt: DateTime<FixedOffset>) -> String {
    dt.format("%H:%M").to_string()
}
