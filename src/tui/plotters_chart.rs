//! Plotters-powered category chart widget for Ratatui.
//!
//! Plotters draws the axes, the count tick labels and the series. Category
//! names are written straight into the buffer underneath, because Plotters'
//! numeric tick placement does not line up with discrete categories.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
// `ratatui::style::Color` below shadows the prelude's `Color` trait.
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::report::{ChartKind, ChartSpec, format_count};

/// Cells reserved for the count labels on the left.
const Y_LABEL_AREA: u16 = 10;
/// Cells reserved under the plot for category names and the axis title.
const X_LABEL_ROWS: u16 = 2;

/// Half the width of a bar, in category units.
const BAR_HALF_WIDTH: f64 = 0.35;

/// A render-only chart over discrete categories.
pub struct CategoryChart<'a> {
    pub spec: &'a ChartSpec,
    /// Bar colors, cycled per category. Line charts use the first entry.
    pub palette: &'a [RGBColor],
}

impl<'a> Widget for CategoryChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 24 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        if !self.spec.has_data() {
            let msg = crate::report::format::EMPTY_SELECTION;
            let x = area.x + area.width.saturating_sub(msg.len() as u16) / 2;
            buf.set_string(x, area.y + area.height / 2, msg, Style::default().fg(Color::Yellow));
            return;
        }

        let plot_area = Rect {
            height: area.height - X_LABEL_ROWS,
            ..area
        };
        draw_category_labels(self.spec, area, buf);

        let n = self.spec.categories.len().max(1);
        let x0 = -0.5_f64;
        let x1 = n as f64 - 0.5;
        let y1 = (self.spec.max_value() as f64 * 1.1).max(1.0);

        let points: Vec<(f64, f64)> = self
            .spec
            .values
            .iter()
            .enumerate()
            .filter_map(|(idx, v)| v.map(|v| (idx as f64, v as f64)))
            .collect();
        let kind = self.spec.kind;
        let palette = self.palette;
        let primary = palette.first().copied().unwrap_or(WHITE);

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, i32::from(Y_LABEL_AREA))
                .set_label_area_size(LabelAreaPosition::Bottom, 1)
                .build_cartesian_2d(x0..x1, 0.0..y1)?;

            // Category ticks are drawn by hand; Plotters only labels the counts.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(0)
                .y_labels(5)
                .y_label_formatter(&|v| format_count(v.max(0.0).round() as u64))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .draw()?;

            match kind {
                ChartKind::Line => {
                    chart.draw_series(LineSeries::new(points.iter().copied(), &primary))?;
                    // `Circle` radii are mis-scaled by the ratatui backend; a
                    // contrasting pixel marks each observation instead.
                    chart.draw_series(points.iter().map(|&p| Pixel::new(p, WHITE)))?;
                }
                ChartKind::Bar => {
                    chart.draw_series(points.iter().map(|&(x, y)| {
                        Rectangle::new(
                            [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, y)],
                            bar_style(palette, x as usize, primary),
                        )
                    }))?;
                }
            }

            Ok(())
        });

        widget.render(plot_area, buf);
    }
}

/// Solid fill for the bar at `idx`, cycling through the palette.
fn bar_style(palette: &[RGBColor], idx: usize, fallback: RGBColor) -> ShapeStyle {
    palette
        .get(idx % palette.len().max(1))
        .copied()
        .unwrap_or(fallback)
        .filled()
}

/// Category names centered under their slot, then the axis title.
fn draw_category_labels(spec: &ChartSpec, area: Rect, buf: &mut Buffer) {
    let style = Style::default().fg(Color::Gray);
    let plot_x = area.x + 1 + Y_LABEL_AREA;
    let plot_w = area.width.saturating_sub(2 + Y_LABEL_AREA);
    let n = spec.categories.len().max(1) as u16;
    let slot = (plot_w / n).max(1);
    let row = area.y + area.height - X_LABEL_ROWS;

    for (idx, label) in spec.categories.iter().enumerate() {
        let start = plot_x + slot * idx as u16;
        let text: String = label.chars().take(slot.saturating_sub(1).max(1) as usize).collect();
        let len = text.chars().count() as u16;
        let x = start + slot.saturating_sub(len) / 2;
        buf.set_string(x, row, &text, style);
    }

    let title = spec.x_label;
    let x = plot_x + plot_w.saturating_sub(title.len() as u16) / 2;
    buf.set_string(x, row + 1, title, style);
}
