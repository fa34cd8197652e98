//! Presentation-side data: chart specs built from aggregate buckets, and
//! formatted terminal output.
//!
//! Chart specs are renderer-agnostic. The TUI draws them with Plotters and the
//! `report` subcommand draws them as text.

use crate::domain::{AnalysisMode, Bucket, DayType, GroupKey, Season, Weather, month_abbrev};

pub mod format;

pub use format::format_analysis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

/// One chart to draw.
///
/// `values[i]` belongs to `categories[i]`; `None` marks a category on the axis
/// with no observations (only used for the fixed Jan..Dec month axis).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub kind: ChartKind,
    pub categories: Vec<String>,
    pub values: Vec<Option<u64>>,
}

impl ChartSpec {
    /// Largest observed value, or 0 when nothing was observed.
    pub fn max_value(&self) -> u64 {
        self.values.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn has_data(&self) -> bool {
        self.values.iter().any(Option::is_some)
    }
}

/// Charts for a mode. Monthly trend gets a line and a bar chart; every other
/// mode gets a single bar chart.
pub fn charts_for(mode: AnalysisMode, buckets: &[Bucket]) -> Vec<ChartSpec> {
    match mode {
        AnalysisMode::Monthly => {
            let (categories, values) = month_axis(buckets);
            vec![
                ChartSpec {
                    title: "Monthly Bike Rental Trend",
                    x_label: "Month",
                    y_label: "Bike Rentals",
                    kind: ChartKind::Line,
                    categories: categories.clone(),
                    values: values.clone(),
                },
                ChartSpec {
                    title: "Total Bike Rentals per Month",
                    x_label: "Month",
                    y_label: "Bike Rentals",
                    kind: ChartKind::Bar,
                    categories,
                    values,
                },
            ]
        }
        AnalysisMode::Seasonal => {
            let order = Season::ALL.map(GroupKey::Season);
            vec![categorical(
                "Total Rentals by Season",
                "Season",
                &order,
                buckets,
            )]
        }
        AnalysisMode::Weather => {
            let order = Weather::ALL.map(GroupKey::Weather);
            vec![categorical(
                "Total Rentals by Weather Condition",
                "Weather Type",
                &order,
                buckets,
            )]
        }
        AnalysisMode::DayType => {
            let order = [GroupKey::DayType(DayType::Weekday), GroupKey::DayType(DayType::Weekend)];
            vec![categorical(
                "Total Rentals: Weekday vs Weekend",
                "Day Type",
                &order,
                buckets,
            )]
        }
    }
}

/// Fixed Jan..Dec axis, with `None` for months that have no bucket.
fn month_axis(buckets: &[Bucket]) -> (Vec<String>, Vec<Option<u64>>) {
    (1..=12u32)
        .map(|m| {
            let value = buckets
                .iter()
                .find(|b| b.key == GroupKey::Month(m))
                .map(|b| b.total);
            (month_abbrev(m).to_string(), value)
        })
        .unzip()
}

/// Observed groups only, arranged in the enum's natural order.
fn categorical(
    title: &'static str,
    x_label: &'static str,
    order: &[GroupKey],
    buckets: &[Bucket],
) -> ChartSpec {
    let (categories, values): (Vec<String>, Vec<Option<u64>>) = order
        .iter()
        .filter_map(|key| {
            buckets
                .iter()
                .find(|b| b.key == *key)
                .map(|b| (key.display(), Some(b.total)))
        })
        .unzip();

    ChartSpec {
        title,
        x_label,
        y_label: "Total Rentals",
        kind: ChartKind::Bar,
        categories,
        values,
    }
}

/// Integer with thousands separators: `1234567 -> "1,234,567"`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(key: GroupKey, total: u64) -> Bucket {
        Bucket { key, total }
    }

    #[test]
    fn format_count_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(43_210), "43,210");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn monthly_axis_is_always_calendar_order() {
        let buckets = [bucket(GroupKey::Month(6), 200), bucket(GroupKey::Month(1), 100)];
        let charts = charts_for(AnalysisMode::Monthly, &buckets);
        assert_eq!(charts.len(), 2);
        assert_eq!(charts[0].kind, ChartKind::Line);
        assert_eq!(charts[1].kind, ChartKind::Bar);

        let chart = &charts[0];
        assert_eq!(chart.categories.len(), 12);
        assert_eq!(chart.categories[0], "Jan");
        assert_eq!(chart.categories[11], "Dec");
        assert_eq!(chart.values[0], Some(100));
        assert_eq!(chart.values[1], None);
        assert_eq!(chart.values[5], Some(200));
        assert_eq!(chart.max_value(), 200);
    }

    #[test]
    fn categorical_charts_keep_only_observed_groups_in_enum_order() {
        let buckets = [
            bucket(GroupKey::Weather(Weather::Snow), 30),
            bucket(GroupKey::Weather(Weather::Clear), 10),
        ];
        let charts = charts_for(AnalysisMode::Weather, &buckets);
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].categories, vec!["☀️ Clear".to_string(), "❄️ Snow".to_string()]);
        assert_eq!(charts[0].values, vec![Some(10), Some(30)]);
    }

    #[test]
    fn empty_buckets_give_blank_charts() {
        for mode in AnalysisMode::ALL {
            for chart in charts_for(mode, &[]) {
                assert!(!chart.has_data(), "{mode:?}");
                assert_eq!(chart.max_value(), 0);
            }
        }
    }
}
