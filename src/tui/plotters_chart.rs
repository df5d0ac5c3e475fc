//! Plotters-powered trend chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - easy to extend later (annotations, exportable PNG/SVG backends, etc.)
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::chart::ChartDataset;

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: datasets and bounds are computed
/// outside the render call. This keeps `render()` focused on drawing and
/// makes the data prep easy to test separately.
pub struct TrendsChart<'a> {
    /// One line series per indicator, in request order.
    pub datasets: &'a [ChartDataset],
    /// X bounds (years).
    pub x_bounds: [f64; 2],
    /// Y bounds (indicator values; units vary by indicator).
    pub y_bounds: [f64; 2],
    /// Axis labels (kept simple for terminal rendering).
    pub x_label: &'a str,
    pub y_label: &'a str,
}

impl Widget for TrendsChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a
        // chart. In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
        // `Canvas` widget, which ultimately writes to the terminal buffer.
        //
        // We delegate rendering to the crate-provided widget helper to avoid
        // coupling our code to its internal backend types.
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Axes + tick labels.
            //
            // Mesh lines are disabled to reduce visual clutter in
            // low-resolution terminal rendering.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| format!("{v:.0}"))
                .y_label_formatter(&|v| fmt_axis_value(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for dataset in self.datasets {
                let color = RGBColor(dataset.color.r, dataset.color.g, dataset.color.b);

                // 1) The connected trend line.
                chart.draw_series(LineSeries::new(dataset.points.iter().copied(), &color))?;

                // 2) The observations themselves.
                //
                // A `Pixel` per point keeps sparse series (or single-point
                // series, which a line alone cannot show) visible.
                chart.draw_series(
                    dataset
                        .points
                        .iter()
                        .map(|&(x, y)| Pixel::new((x, y), color)),
                )?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

fn fmt_axis_value(v: f64) -> String {
    if v.abs() >= 1e6 {
        format!("{v:.1e}")
    } else {
        format!("{v:.1}")
    }
}
