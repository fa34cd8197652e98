//! Query-time computation over the enriched dataset: date filtering and
//! group-by aggregation. Everything here is a pure function of its inputs.

pub mod aggregate;
pub mod filter;

pub use aggregate::{aggregate, classify};
pub use filter::filter;
