//! Text chart rendering for the `report` subcommand.

pub mod ascii;

pub use ascii::render_chart;
