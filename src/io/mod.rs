//! Input helpers.
//!
//! - CSV loading of the daily rental dataset (`loader`)

pub mod loader;

pub use loader::*;
