//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - closed categorical enums (`Season`, `Weather`, `DayType`)
//! - selection inputs (`AnalysisMode`, `Dimension`, `DateRange`)
//! - row and result types (`RentalRecord`, `EnrichedRecord`, `Bucket`)

pub mod record;
pub mod types;

pub use record::*;
pub use types::*;
