use serde_json::Value;
use std::io::Write;
use textplots::{Chart, Plot, Shape};

use crate::chart::{LineChart, PlotGeometry};
use crate::error::PlotError;

pub const X_AXIS_TITLE: &str = "Epoch";

/// Somewhere a chart can be shown
pub trait Surface {
    fn present(&mut self, chart: &LineChart) -> Result<(), PlotError>;
}

/// Draws charts as braille line plots on a terminal (or any writer)
pub struct TerminalSurface<W: Write> {
    out: W,
    width: u32,
    height: u32,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, width: u32, height: u32) -> Self {
        Self { out, width, height }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TerminalSurface<std::io::Stdout> {
    pub fn stdout(width: u32, height: u32) -> Self {
        Self::new(std::io::stdout(), width, height)
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn present(&mut self, chart: &LineChart) -> Result<(), PlotError> {
        let geometry = chart.geometry();
        let mut frame = draw_geometry(&geometry, self.width, self.height);
        if !frame.ends_with('\n') {
            frame.push('\n');
        }
        // Braille cells are two dots wide
        let columns = (self.width / 2) as usize;
        let padding = columns.saturating_sub(X_AXIS_TITLE.len()) / 2;

        writeln!(self.out, "{}", geometry.y_title(&chart.label))
            .and_then(|_| write!(self.out, "{}", frame))
            .and_then(|_| writeln!(self.out, "{:padding$}{}", "", X_AXIS_TITLE))
            .and_then(|_| self.out.flush())
            .map_err(PlotError::Display)
    }
}

/// Render the chart frame with textplots, axes included
pub fn draw(chart: &LineChart, width: u32, height: u32) -> String {
    draw_geometry(&chart.geometry(), width, height)
}

pub fn draw_geometry(geometry: &PlotGeometry, width: u32, height: u32) -> String {
    let shapes: Vec<Shape> = geometry
        .segments
        .iter()
        .map(|segment| {
            if segment.len() == 1 {
                Shape::Points(segment)
            } else {
                Shape::Lines(segment)
            }
        })
        .collect();

    let (xmin, xmax) = geometry.x_range;
    let (ymin, ymax) = geometry.y_range;
    let mut chart = Chart::new_with_y_range(width, height, xmin, xmax, ymin, ymax);
    let mut plot = &mut chart;
    for shape in &shapes {
        plot = plot.lineplot(shape);
    }
    plot.axis();
    plot.figures();
    plot.to_string()
}

/// Convert `values` into a chart labelled `label` and show it on `surface`
pub fn render<S: Surface + ?Sized>(
    values: &[Value],
    label: &str,
    surface: &mut S,
) -> Result<LineChart, PlotError> {
    let chart = LineChart::from_series(values, label)?;
    tracing::debug!("Presenting {} points for `{}`", chart.len(), label);
    surface.present(&chart)?;

    match chart.summary() {
        Some(summary) => {
            let bound =
                |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{:.6}", v));
            tracing::info!(
                "{}: {} epochs, first {:.6}, last {:.6}, min {}, max {}",
                label,
                summary.epochs,
                summary.first,
                summary.last,
                bound(summary.min),
                bound(summary.max)
            );
            if summary.non_finite > 0 {
                tracing::warn!(
                    "Series `{}` has {} non-finite values, left as gaps",
                    label,
                    summary.non_finite
                );
            }
        }
        None => tracing::warn!("Series `{}` is empty, drew axes only", label),
    }
    Ok(chart)
}
