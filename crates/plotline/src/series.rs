//! Typed datasets consumed by the chart components.

use plotline_render::Color;

/// A category-indexed series (bar and stacked-bar charts).
#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub color: Color,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(label: impl Into<String>, color: Color, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            color,
            values,
        }
    }
}

/// A point in data space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XyPoint {
    pub x: f64,
    pub y: f64,
}

impl XyPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A continuous series of (x, y) samples (line and scatter charts).
#[derive(Debug, Clone)]
pub struct XySeries {
    pub label: String,
    pub color: Color,
    pub points: Vec<XyPoint>,
}

impl XySeries {
    pub fn new(label: impl Into<String>, color: Color, points: Vec<XyPoint>) -> Self {
        Self {
            label: label.into(),
            color,
            points,
        }
    }
}

/// One horizontal bar on a timeline row.
#[derive(Debug, Clone)]
pub struct TimelineSpan {
    pub row: usize,
    pub start: f64,
    pub end: f64,
    pub color: Color,
    pub label: String,
}

/// Smallest and largest value across category series, covering `baseline`.
pub fn value_extent(series: &[Series], baseline: f64) -> (f64, f64) {
    let mut min = baseline;
    let mut max = baseline;
    for s in series {
        for &v in &s.values {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if (max - min).abs() < f64::EPSILON {
        max = min + 1.0;
    }
    (min, max)
}

/// Bounding extent of all points across xy series.
pub fn xy_extent(series: &[XySeries]) -> ((f64, f64), (f64, f64)) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for s in series {
        for p in &s.points {
            x_min = x_min.min(p.x);
            x_max = x_max.max(p.x);
            y_min = y_min.min(p.y);
            y_max = y_max.max(p.y);
        }
    }
    if !x_min.is_finite() {
        return ((0.0, 1.0), (0.0, 1.0));
    }
    if (x_max - x_min).abs() < f64::EPSILON {
        x_max = x_min + 1.0;
    }
    if (y_max - y_min).abs() < f64::EPSILON {
        y_max = y_min + 1.0;
    }
    ((x_min, x_max), (y_min, y_max))
}
