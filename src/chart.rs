use serde_json::Value;

use crate::error::PlotError;

/// Coordinates of a single line plot, one point per epoch
#[derive(Clone, Debug, PartialEq)]
pub struct LineChart {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl LineChart {
    /// Build the chart for `values`, using the epoch index as X
    pub fn from_series(values: &[Value], label: &str) -> Result<Self, PlotError> {
        let y = values
            .iter()
            .enumerate()
            .map(|(index, value)| to_f64(value).ok_or_else(|| conversion_error(index, value)))
            .collect::<Result<Vec<_>, _>>()?;
        let x = (0..y.len()).map(|i| i as f64).collect();

        Ok(LineChart {
            label: label.to_string(),
            x,
            y,
        })
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// X range to draw. A single epoch still spans one unit.
    pub fn x_bounds(&self) -> (f64, f64) {
        (0.0, self.len().saturating_sub(1).max(1) as f64)
    }

    /// Power of ten the drawn values are divided by. Zero unless the series is far
    /// outside what f32 resolves comfortably.
    pub fn scale_exponent(&self) -> i32 {
        let max_abs = self
            .y
            .iter()
            .filter(|y| y.is_finite())
            .map(|y| y.abs())
            .fold(0.0, f64::max);
        if max_abs == 0.0 || (MIN_UNSCALED..=MAX_UNSCALED).contains(&max_abs) {
            0
        } else {
            max_abs.log10().floor() as i32
        }
    }

    /// f32 coordinates handed to the plotting backend. Non-finite values break the line.
    pub fn geometry(&self) -> PlotGeometry {
        let exponent = self.scale_exponent();
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for (x, y) in self.points() {
            if y.is_finite() {
                current.push((x as f32, scale(y, exponent) as f32));
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        let (xmin, xmax) = self.x_bounds();
        let y_range = padded_range(&segments);
        PlotGeometry {
            segments,
            x_range: (xmin as f32, xmax as f32),
            y_range,
            exponent,
        }
    }

    pub fn summary(&self) -> Option<SeriesSummary> {
        let first = *self.y.first()?;
        let last = *self.y.last()?;
        let finite = || self.y.iter().copied().filter(|y| y.is_finite());
        Some(SeriesSummary {
            epochs: self.len(),
            first,
            last,
            min: finite().reduce(f64::min),
            max: finite().reduce(f64::max),
            non_finite: self.y.iter().filter(|y| !y.is_finite()).count(),
        })
    }
}

const MIN_UNSCALED: f64 = 1e-30;
const MAX_UNSCALED: f64 = 1e30;

#[derive(Clone, Debug, PartialEq)]
pub struct PlotGeometry {
    /// Runs of consecutive finite points
    pub segments: Vec<Vec<(f32, f32)>>,
    pub x_range: (f32, f32),
    /// Never zero-width, so a flat series still gets a line
    pub y_range: (f32, f32),
    pub exponent: i32,
}

impl PlotGeometry {
    pub fn is_blank(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn y_title(&self, label: &str) -> String {
        if self.exponent == 0 {
            label.to_string()
        } else {
            format!("{} (x1e{})", label, self.exponent)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesSummary {
    pub epochs: usize,
    pub first: f64,
    pub last: f64,
    /// Over finite values only
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub non_finite: usize,
}

// Split in two so neither factor over- or underflows
fn scale(y: f64, exponent: i32) -> f64 {
    let half = -exponent / 2;
    y * 10f64.powi(half) * 10f64.powi(-exponent - half)
}

fn padded_range(segments: &[Vec<(f32, f32)>]) -> (f32, f32) {
    let (ymin, ymax) = segments
        .iter()
        .flatten()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &(_, y)| {
            (lo.min(y), hi.max(y))
        });
    if ymin > ymax {
        (0.0, 1.0)
    } else if ymax > ymin {
        (ymin, ymax)
    } else {
        let pad = if ymin == 0.0 { 1.0 } else { ymin.abs() * 0.1 };
        (ymin - pad, ymax + pad)
    }
}

/// Numbers pass through, strings are parsed after trimming, everything else is rejected
fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn conversion_error(index: usize, value: &Value) -> PlotError {
    PlotError::Conversion {
        index,
        value: value.clone(),
    }
}
