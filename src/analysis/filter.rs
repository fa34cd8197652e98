//! Date-range filtering.

use crate::domain::{DateRange, EnrichedRecord};

/// Records whose date lies in `[range.start, range.end]`, in input order.
///
/// An inverted range yields an empty result rather than an error.
pub fn filter(records: &[EnrichedRecord], range: DateRange) -> Vec<&EnrichedRecord> {
    if range.is_inverted() {
        return Vec::new();
    }
    records.iter().filter(|r| range.contains(r.date)).collect()
}
