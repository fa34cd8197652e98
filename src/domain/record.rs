//! Row-level data: raw records, enriched records, and aggregate buckets.

use chrono::NaiveDate;

use super::types::{DayType, Season, Weather};

/// One row of the source file, as loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalRecord {
    /// Raw date text; parsed during enrichment.
    pub dteday: String,
    pub season: i64,
    pub weathersit: i64,
    pub weekday: i64,
    pub cnt: u64,
    /// Every other column as `(header, value)`, in file order. Never interpreted.
    pub extras: Vec<(String, String)>,
}

/// A record plus calendar fields derived from its date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRecord {
    pub record: RentalRecord,
    pub date: NaiveDate,
    pub year: i32,
    /// 1-12.
    pub month: u32,
    /// Day of month, 1-31.
    pub day: u32,
}

impl EnrichedRecord {
    pub fn cnt(&self) -> u64 {
        self.record.cnt
    }

    pub fn season(&self) -> Option<Season> {
        crate::enrich::season_label(self.record.season)
    }

    pub fn weather(&self) -> Option<Weather> {
        crate::enrich::weather_label(self.record.weathersit)
    }

    pub fn day_type(&self) -> DayType {
        crate::enrich::day_type(self.record.weekday)
    }
}

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Short month name for 1-12, `"?"` otherwise.
pub fn month_abbrev(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_ABBREV.get(idx as usize))
        .copied()
        .unwrap_or("?")
}

/// The group a record falls into for a given dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Month(u32),
    Season(Season),
    Weather(Weather),
    DayType(DayType),
}

impl GroupKey {
    /// Label used as the bucket name (`"Jan"`, `"Spring"`, `"Clear"`, `"Weekend"`).
    pub fn label(&self) -> &'static str {
        match self {
            GroupKey::Month(m) => month_abbrev(*m),
            GroupKey::Season(s) => s.label(),
            GroupKey::Weather(w) => w.label(),
            GroupKey::DayType(d) => d.label(),
        }
    }

    /// Label with its decorative marker, for charts and reports.
    pub fn display(&self) -> String {
        match self {
            GroupKey::Season(s) => s.display(),
            GroupKey::Weather(w) => w.display(),
            _ => self.label().to_string(),
        }
    }
}

/// One aggregation result: a group and the summed rental count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub key: GroupKey,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_abbrev_bounds() {
        assert_eq!(month_abbrev(1), "Jan");
        assert_eq!(month_abbrev(12), "Dec");
        assert_eq!(month_abbrev(0), "?");
        assert_eq!(month_abbrev(13), "?");
    }

    #[test]
    fn group_key_display_adds_markers() {
        assert_eq!(GroupKey::Season(Season::Spring).display(), "🌸 Spring");
        assert_eq!(GroupKey::Weather(Weather::Mist).label(), "Mist");
        assert_eq!(GroupKey::DayType(DayType::Weekend).display(), "Weekend");
        assert_eq!(GroupKey::Month(6).display(), "Jun");
    }
}
