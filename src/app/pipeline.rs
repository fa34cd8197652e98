//! Shared "compute" logic used by both the report and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> enrich -> filter -> aggregate -> chart specs
//!
//! The front-ends then only deal with presentation (printing vs widgets).

use std::path::Path;

use chrono::NaiveDate;

use crate::analysis::{aggregate, filter};
use crate::domain::{AnalysisMode, Bucket, DateRange, EnrichedRecord};
use crate::enrich::enrich;
use crate::error::{AppError, DataError};
use crate::io::load_records;
use crate::report::{ChartSpec, charts_for};

/// The loaded dataset, read-only for the rest of the session.
#[derive(Debug, Clone)]
pub struct DataContext {
    records: Vec<EnrichedRecord>,
    min_date: NaiveDate,
    max_date: NaiveDate,
}

impl DataContext {
    /// Load and enrich the CSV at `path`. Any failure here aborts the session.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let records = enrich(load_records(path)?)?;
        let ctx = Self::from_records(records)?;
        log::info!(
            "dataset ready: {} rows, {} to {}",
            ctx.records.len(),
            ctx.min_date,
            ctx.max_date
        );
        Ok(ctx)
    }

    pub fn from_records(records: Vec<EnrichedRecord>) -> Result<Self, DataError> {
        let mut dates = records.iter().map(|r| r.date);
        let first = dates.next().ok_or(DataError::Empty)?;
        let (min_date, max_date) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Ok(Self {
            records,
            min_date,
            max_date,
        })
    }

    pub fn records(&self) -> &[EnrichedRecord] {
        &self.records
    }

    pub fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    /// `[min_date, max_date]`: the default selection.
    pub fn full_range(&self) -> DateRange {
        DateRange::new(self.min_date, self.max_date)
    }

    /// Keep a picker value inside the dataset bounds.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.min_date, self.max_date)
    }
}

/// Everything the presentation layer needs for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub mode: AnalysisMode,
    pub range: DateRange,
    /// Rows that survived the date filter.
    pub rows: usize,
    /// Sum of `cnt` over those rows.
    pub total: u64,
    pub buckets: Vec<Bucket>,
    pub charts: Vec<ChartSpec>,
}

impl Analysis {
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Filter, aggregate and build chart specs for a selection.
pub fn compute(ctx: &DataContext, mode: AnalysisMode, range: DateRange) -> Analysis {
    let subset = filter(ctx.records(), range);
    let total = subset.iter().map(|r| r.cnt()).sum();
    let buckets = aggregate(subset.iter().copied(), mode.dimension());
    let charts = charts_for(mode, &buckets);

    log::debug!(
        "compute mode={mode:?} range={range} rows={} buckets={}",
        subset.len(),
        buckets.len()
    );

    Analysis {
        mode,
        range,
        rows: subset.len(),
        total,
        buckets,
        charts,
    }
}
