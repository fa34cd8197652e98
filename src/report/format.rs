//! Formatted terminal output for the `report` subcommand.
//!
//! Formatting lives in one place so output changes stay localized.

use crate::app::pipeline::{Analysis, DataContext};
use crate::plot::render_chart;
use crate::report::format_count;

pub const APP_TITLE: &str = "🚴 Bike Data Analysis 🚴";

/// Message shown in place of charts when the selection matched nothing.
pub const EMPTY_SELECTION: &str = "No data in selected date range.";

/// Format a full analysis: summary header, mode heading, then every chart.
pub fn format_analysis(ctx: &DataContext, analysis: &Analysis, width: usize, height: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {APP_TITLE} ===\n"));
    out.push_str(&format!(
        "Dataset: {} rows | {} → {}\n",
        ctx.records().len(),
        ctx.min_date(),
        ctx.max_date()
    ));
    out.push_str(&format!("Mode: {}\n", analysis.mode.display_name()));
    out.push_str(&format!("Range: {}\n", analysis.range));
    out.push_str(&format!(
        "Selected: {} rows | total rentals: {}\n",
        analysis.rows,
        format_count(analysis.total)
    ));

    out.push('\n');
    out.push_str(analysis.mode.heading());
    out.push('\n');
    out.push_str(analysis.mode.description());
    out.push_str("\n\n");

    if analysis.is_empty() {
        out.push_str(EMPTY_SELECTION);
        out.push('\n');
        return out;
    }

    for chart in &analysis.charts {
        out.push_str(&render_chart(chart, width, height));
        out.push('\n');
    }

    out
}
