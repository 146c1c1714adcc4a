//! Timestamp display for memo headers.
//!
//! Timestamps are shown in the Korean long form used by the memo list and
//! the detail overlay, e.g. `2024년 1월 15일 오후 02:30`.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike,
    Utc,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),
}

/// Parse ISO timestamp text into `tz`.
///
/// Accepts RFC 3339 with an offset, a naive `YYYY-MM-DDTHH:MM[:SS[.fff]]`
/// (read as wall-clock time in `tz`), or a bare `YYYY-MM-DD` (UTC midnight).
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<DateTime<Tz>, FormatError> {
    let text = raw.trim();
    let invalid = || FormatError::InvalidTimestamp(raw.to_string());

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(tz));
    }

    let naive = text
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M"));
    if let Ok(naive) = naive {
        return resolve_local(&naive, tz).ok_or_else(invalid);
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;
        return Ok(Utc.from_utc_datetime(&midnight).with_timezone(tz));
    }

    Err(invalid())
}

/// Wall-clock time in `tz`. Ambiguous times take the earlier instant; a time
/// skipped by a DST gap is read with the offset in force before the gap.
fn resolve_local<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            let day_before = naive.checked_sub_signed(Duration::hours(24))?;
            let before = tz.from_local_datetime(&day_before).earliest()?;
            let offset = Duration::seconds(i64::from(before.offset().fix().local_minus_utc()));
            let utc = naive.checked_sub_signed(offset)?;
            Some(tz.from_utc_datetime(&utc))
        }
    }
}

/// Long date + time: numeric year, long month, numeric day, 2-digit
/// 12-hour clock with 오전/오후, 2-digit minute.
pub fn format_long<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    let (is_pm, hour) = dt.hour12();
    format!(
        "{}년 {}월 {}일 {} {:02}:{:02}",
        dt.year(),
        dt.month(),
        dt.day(),
        if is_pm { "오후" } else { "오전" },
        hour,
        dt.minute()
    )
}

pub fn format_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<String, FormatError> {
    parse_timestamp(raw, tz).map(|dt| format_long(&dt))
}

/// Format for display, falling back to the raw text when it can't be parsed.
pub fn display_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String {
    match format_timestamp(raw, tz) {
        Ok(s) => s,
        Err(e) => {
            log::debug!("{}; showing raw text", e);
            raw.to_string()
        }
    }
}
