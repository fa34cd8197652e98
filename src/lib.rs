//! `bike-trends` library crate.
//!
//! The binary (`bikes`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the loading/aggregation path is shared by the TUI and the text report

pub mod analysis;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod enrich;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod tui;
