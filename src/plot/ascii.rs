//! ASCII/Unicode charts for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks in a terminal or a pipe
//! - deterministic output (helpful for golden tests)
//!
//! Bar charts are horizontal (`█` bars, one row per category). Line charts
//! plot observed values as `o` joined by `.` over a fixed category axis.

use crate::report::{ChartKind, ChartSpec, format_count};

/// Width of one category column in a line chart.
const LINE_COL_WIDTH: usize = 4;

/// Render a chart spec as text.
pub fn render_chart(chart: &ChartSpec, width: usize, height: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("== {} ==\n", chart.title));
    out.push_str(&format!("{} by {}\n", chart.y_label, chart.x_label));

    let body = match chart.kind {
        ChartKind::Bar => render_bars(chart, width),
        ChartKind::Line => render_line(chart, height),
    };
    out.push_str(&body);
    out
}

fn render_bars(chart: &ChartSpec, width: usize) -> String {
    let width = width.max(1);
    let label_width = chart
        .categories
        .iter()
        .map(|c| c.chars().count())
        .max()
        .unwrap_or(0);
    let max = chart.max_value();

    let mut out = String::new();
    for (label, value) in chart.categories.iter().zip(&chart.values) {
        let pad = label_width.saturating_sub(label.chars().count());
        let mut line = format!("{label}{} |", " ".repeat(pad));
        if let Some(v) = value {
            let len = bar_len(*v, max, width);
            line.push(' ');
            line.push_str(&"█".repeat(len));
            line.push(' ');
            line.push_str(&format_count(*v));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn bar_len(value: u64, max: u64, width: usize) -> usize {
    if max == 0 {
        return 0;
    }
    ((value as f64 / max as f64) * width as f64).round() as usize
}

fn render_line(chart: &ChartSpec, height: usize) -> String {
    let height = height.max(3);
    let width = chart.categories.len().max(1) * LINE_COL_WIDTH;
    let max = chart.max_value();

    let mut grid = vec![vec![' '; width]; height];

    let points: Vec<(usize, usize)> = chart
        .values
        .iter()
        .enumerate()
        .filter_map(|(idx, v)| v.map(|v| (idx * LINE_COL_WIDTH + 1, map_y(v, max, height))))
        .collect();

    // Segments first so the markers overlay them.
    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        draw_line(&mut grid, x0, y0, x1, y1, '.');
    }
    for &(x, y) in &points {
        grid[y][x] = 'o';
    }

    let top = format_count(max);
    let gutter = top.len();
    let mut out = String::new();
    for (row_idx, row) in grid.into_iter().enumerate() {
        let label = if row_idx == 0 {
            top.as_str()
        } else if row_idx == height - 1 {
            "0"
        } else {
            ""
        };
        let row: String = row.into_iter().collect();
        out.push_str(format!("{label:>gutter$} |{row}").trim_end());
        out.push('\n');
    }

    out.push_str(&format!("{:>gutter$} +{}\n", "", "-".repeat(width)));
    let col = LINE_COL_WIDTH;
    let axis: String = chart
        .categories
        .iter()
        .map(|c| format!("{c:<col$}"))
        .collect();
    out.push_str(format!("{:>gutter$}  {axis}", "").trim_end());
    out.push('\n');
    out
}

fn map_y(value: u64, max: u64, height: usize) -> usize {
    let height = height.max(2);
    if max == 0 {
        return height - 1;
    }
    let u = (value as f64 / max as f64).clamp(0.0, 1.0);
    // Row 0 is the top of the chart.
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(kind: ChartKind, categories: &[&str], values: Vec<Option<u64>>) -> ChartSpec {
        ChartSpec {
            title: "Test",
            x_label: "X",
            y_label: "Y",
            kind,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            values,
        }
    }

    #[test]
    fn bar_golden_snapshot_small() {
        let spec = chart(ChartKind::Bar, &["Weekday", "Weekend"], vec![Some(2000), Some(1000)]);
        let txt = render_chart(&spec, 10, 5);
        let expected = concat!(
            "== Test ==\n",
            "Y by X\n",
            "Weekday | ██████████ 2,000\n",
            "Weekend | █████ 1,000\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn bar_rows_without_data_are_blank() {
        let spec = chart(ChartKind::Bar, &["Jan", "Feb"], vec![None, Some(5)]);
        let txt = render_chart(&spec, 4, 5);
        assert!(txt.contains("Jan |\n"));
        assert!(txt.contains("Feb | ████ 5\n"));
    }

    #[test]
    fn line_golden_snapshot_small() {
        let spec = chart(ChartKind::Line, &["Jan", "Feb", "Mar"], vec![Some(10), None, Some(20)]);
        let txt = render_chart(&spec, 10, 3);
        let expected = concat!(
            "== Test ==\n",
            "Y by X\n",
            "20 |     ....o\n",
            "   | o...\n",
            " 0 |\n",
            "   +------------\n",
            "    Jan Feb Mar\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_line_chart_still_draws_axis() {
        let spec = chart(ChartKind::Line, &["Jan", "Feb"], vec![None, None]);
        let txt = render_chart(&spec, 10, 4);
        assert!(!txt.contains('o'));
        assert!(txt.ends_with("  Jan Feb\n"));
    }
}
