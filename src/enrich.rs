//! Schema enrichment: calendar fields derived from `dteday`, plus label lookups.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::domain::{DayType, EnrichedRecord, RentalRecord, Season, Weather};
use crate::error::DataError;

/// Parse every record's date and attach year/month/day.
///
/// One unparseable date fails the whole dataset.
pub fn enrich(records: Vec<RentalRecord>) -> Result<Vec<EnrichedRecord>, DataError> {
    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| {
            let date = parse_date(&record.dteday).ok_or_else(|| DataError::InvalidDate {
                row: idx + 1,
                value: record.dteday.clone(),
            })?;
            Ok(EnrichedRecord {
                year: date.year(),
                month: date.month(),
                day: date.day(),
                date,
                record,
            })
        })
        .collect()
}

/// Parse a date in one of the accepted formats.
///
/// ISO dates are expected, but `DD/MM/YYYY`, `DD-MM-YYYY` and `YYYY/MM/DD`
/// are accepted too, as are full timestamps (the time part is dropped).
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    const FMTS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];
    let s = s.trim();
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

pub fn season_label(code: i64) -> Option<Season> {
    Season::from_code(code)
}

pub fn weather_label(code: i64) -> Option<Weather> {
    Weather::from_code(code)
}

pub fn day_type(weekday_index: i64) -> DayType {
    DayType::from_weekday(weekday_index)
}
