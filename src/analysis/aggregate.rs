//! Group-by aggregation of rental counts.

use crate::domain::{Bucket, Dimension, EnrichedRecord, GroupKey};

/// Group key of `record` along `dimension`.
///
/// `None` when the record's code has no label (season/weather outside 1-4).
pub fn classify(record: &EnrichedRecord, dimension: Dimension) -> Option<GroupKey> {
    match dimension {
        Dimension::Month => Some(GroupKey::Month(record.month)),
        Dimension::Season => record.season().map(GroupKey::Season),
        Dimension::Weather => record.weather().map(GroupKey::Weather),
        Dimension::DayType => Some(GroupKey::DayType(record.day_type())),
    }
}

/// Sum `cnt` per group in a single pass.
///
/// Buckets come out in first-appearance order and only observed groups are
/// present. Records without a label for `dimension` are left out.
pub fn aggregate<'a, I>(records: I, dimension: Dimension) -> Vec<Bucket>
where
    I: IntoIterator<Item = &'a EnrichedRecord>,
{
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut unlabeled = 0usize;

    for record in records {
        let Some(key) = classify(record, dimension) else {
            unlabeled += 1;
            continue;
        };
        // At most 12 groups, so a linear scan beats hashing.
        match buckets.iter_mut().find(|b| b.key == key) {
            Some(bucket) => bucket.total += record.cnt(),
            None => buckets.push(Bucket {
                key,
                total: record.cnt(),
            }),
        }
    }

    if unlabeled > 0 {
        log::debug!("{unlabeled} record(s) have no {dimension:?} label and were skipped");
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::filter;
    use crate::analysis::fixtures::{date, records, two_rows};
    use crate::domain::DateRange;

    const ALL_DIMENSIONS: [Dimension; 4] = [
        Dimension::Month,
        Dimension::Season,
        Dimension::Weather,
        Dimension::DayType,
    ];

    fn labels(buckets: &[Bucket]) -> Vec<(&'static str, u64)> {
        buckets.iter().map(|b| (b.key.label(), b.total)).collect()
    }

    fn year_2011() -> DateRange {
        DateRange::new(date("2011-01-01"), date("2011-12-31"))
    }

    #[test]
    fn two_row_scenario_by_season_and_day_type() {
        let data = two_rows();
        let subset = filter(&data, year_2011());

        let by_season = aggregate(subset.iter().copied(), Dimension::Season);
        assert_eq!(labels(&by_season), vec![("Spring", 100), ("Summer", 200)]);

        let by_day = aggregate(subset.iter().copied(), Dimension::DayType);
        assert_eq!(labels(&by_day), vec![("Weekend", 100), ("Weekday", 200)]);

        let by_weather = aggregate(subset.iter().copied(), Dimension::Weather);
        assert_eq!(labels(&by_weather), vec![("Clear", 100), ("Mist", 200)]);
    }

    #[test]
    fn empty_selection_gives_empty_buckets_for_every_dimension() {
        let data = two_rows();
        let subset = filter(&data, DateRange::new(date("2020-01-01"), date("2020-01-02")));
        for dimension in ALL_DIMENSIONS {
            assert!(aggregate(subset.iter().copied(), dimension).is_empty());
        }
    }

    #[test]
    fn twelve_months_each_present_once() {
        let rows: Vec<(String, u64)> = (1..=12u32)
            .map(|m| (format!("2011-{m:02}-10"), u64::from(m) * 10))
            .collect();
        let tuples: Vec<(&str, i64, i64, i64, u64)> =
            rows.iter().map(|(d, c)| (d.as_str(), 1, 1, 2, *c)).collect();
        let data = records(&tuples);

        let buckets = aggregate(&data, Dimension::Month);
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets.iter().map(|b| b.total).sum::<u64>(), 780);
        for m in 1..=12u32 {
            let matching: Vec<&Bucket> = buckets.iter().filter(|b| b.key == GroupKey::Month(m)).collect();
            assert_eq!(matching.len(), 1);
            assert_eq!(matching[0].total, u64::from(m) * 10);
        }
    }

    #[test]
    fn bucket_totals_conserve_the_filtered_sum() {
        let data = records(&[
            ("2011-01-01", 1, 1, 6, 985),
            ("2011-01-02", 1, 2, 0, 801),
            ("2011-04-15", 2, 1, 5, 1349),
            ("2011-07-04", 3, 3, 1, 4620),
            ("2011-10-30", 4, 2, 0, 2277),
            ("2011-11-29", 4, 1, 2, 3486),
            ("2012-12-25", 1, 4, 2, 441),
        ]);
        let subset = filter(&data, DateRange::new(date("2011-01-02"), date("2012-12-31")));
        let expected: u64 = subset.iter().map(|r| r.cnt()).sum();

        for dimension in ALL_DIMENSIONS {
            let buckets = aggregate(subset.iter().copied(), dimension);
            assert_eq!(buckets.iter().map(|b| b.total).sum::<u64>(), expected, "{dimension:?}");
            assert!(buckets.iter().all(|b| b.total > 0), "{dimension:?}");
        }
    }

    #[test]
    fn unseen_groups_are_omitted() {
        let data = records(&[("2011-01-01", 1, 1, 1, 5), ("2011-01-08", 1, 1, 2, 7)]);
        let by_season = aggregate(&data, Dimension::Season);
        assert_eq!(labels(&by_season), vec![("Spring", 12)]);
        let by_month = aggregate(&data, Dimension::Month);
        assert_eq!(labels(&by_month), vec![("Jan", 12)]);
    }

    #[test]
    fn unknown_codes_produce_no_bucket() {
        let data = records(&[("2011-01-01", 9, 0, 1, 5), ("2011-01-02", 1, 1, 1, 7)]);
        assert_eq!(labels(&aggregate(&data, Dimension::Season)), vec![("Spring", 7)]);
        assert_eq!(labels(&aggregate(&data, Dimension::Weather)), vec![("Clear", 7)]);
        assert_eq!(labels(&aggregate(&data, Dimension::DayType)), vec![("Weekday", 12)]);
    }

    #[test]
    fn rerunning_is_idempotent() {
        let data = two_rows();
        let run = || aggregate(filter(&data, year_2011()), Dimension::Season);
        assert_eq!(run(), run());
    }

    #[test]
    fn sums_widen_beyond_u32() {
        let data = records(&[("2011-01-01", 1, 1, 1, u64::from(u32::MAX)), ("2011-01-02", 1, 1, 1, 10)]);
        let buckets = aggregate(&data, Dimension::Season);
        assert_eq!(buckets[0].total, u64::from(u32::MAX) + 10);
    }
}
