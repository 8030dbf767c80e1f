//! The raster overlay as data.
//!
//! Text never reaches the GPU canvas: axis lines, tick labels, legends, and
//! the timeline table are composed here as a flat command list that the host
//! rasterizes on its own 2D layer. This keeps the engine free of glyph
//! handling while the two layers stay pixel-aligned (both use container
//! coordinates).

use plotline_core::geometry::{Pos, Rect};
use plotline_render::Color;

use crate::ticks::Ticks;
use crate::viewport::{Axis, ZoomRange};

/// Horizontal anchoring for overlay text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One immediate-mode drawing command on the overlay layer.
#[derive(Debug, Clone)]
pub enum OverlayCmd {
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
        align: Align,
    },
    Rect {
        rect: Rect,
        color: Color,
    },
}

/// The command list for one overlay frame.
#[derive(Debug, Default)]
pub struct OverlayFrame {
    cmds: Vec<OverlayCmd>,
}

impl OverlayFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, cmd: OverlayCmd) {
        self.cmds.push(cmd);
    }

    pub fn cmds(&self) -> &[OverlayCmd] {
        &self.cmds
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }
}

/// Shared styling for overlay composition.
#[derive(Debug, Clone, Copy)]
pub struct OverlayStyle {
    pub axis_color: Color,
    pub text_color: Color,
    pub font_size: f32,
    pub tick_length: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            axis_color: Color::rgba(0.4, 0.4, 0.45, 1.0),
            text_color: Color::rgba(0.25, 0.25, 0.3, 1.0),
            font_size: 12.0,
            tick_length: 5.0,
        }
    }
}

/// The two plot-edge axis lines.
pub fn push_axis_lines(frame: &mut OverlayFrame, plot: Rect, style: &OverlayStyle) {
    frame.push(OverlayCmd::Line {
        x1: plot.x,
        y1: plot.bottom(),
        x2: plot.right(),
        y2: plot.bottom(),
        width: 1.0,
        color: style.axis_color,
    });
    frame.push(OverlayCmd::Line {
        x1: plot.x,
        y1: plot.y,
        x2: plot.x,
        y2: plot.bottom(),
        width: 1.0,
        color: style.axis_color,
    });
}

/// Y ticks and labels for a zoom-adjusted value range.
pub fn push_y_ticks(
    frame: &mut OverlayFrame,
    plot: Rect,
    range: (f64, f64),
    ticks: &Ticks,
    style: &OverlayStyle,
) {
    let (min, max) = range;
    let extent = (max - min).max(f64::EPSILON);
    for &value in &ticks.positions {
        if value < min - f64::EPSILON || value > max + f64::EPSILON {
            continue;
        }
        let y = plot.bottom() - ((value - min) / extent) as f32 * plot.height;
        frame.push(OverlayCmd::Line {
            x1: plot.x - style.tick_length,
            y1: y,
            x2: plot.x,
            y2: y,
            width: 1.0,
            color: style.axis_color,
        });
        frame.push(OverlayCmd::Text {
            text: ticks.label(value),
            x: plot.x - style.tick_length - 2.0,
            y,
            size: style.font_size,
            color: style.text_color,
            align: Align::Right,
        });
    }
}

/// X ticks and labels for a zoom-adjusted value range.
pub fn push_x_ticks(
    frame: &mut OverlayFrame,
    plot: Rect,
    range: (f64, f64),
    ticks: &Ticks,
    style: &OverlayStyle,
) {
    let (min, max) = range;
    let extent = (max - min).max(f64::EPSILON);
    for &value in &ticks.positions {
        if value < min - f64::EPSILON || value > max + f64::EPSILON {
            continue;
        }
        let x = plot.x + ((value - min) / extent) as f32 * plot.width;
        frame.push(OverlayCmd::Line {
            x1: x,
            y1: plot.bottom(),
            x2: x,
            y2: plot.bottom() + style.tick_length,
            width: 1.0,
            color: style.axis_color,
        });
        frame.push(OverlayCmd::Text {
            text: ticks.label(value),
            x,
            y: plot.bottom() + style.tick_length + style.font_size,
            size: style.font_size,
            color: style.text_color,
            align: Align::Center,
        });
    }
}

/// Category labels along the X axis, positioned in the zoomed virtual
/// extent. Labels outside the plot are dropped here (the overlay layer has
/// no scissor), which matches the canvas clip visually.
pub fn push_category_labels(
    frame: &mut OverlayFrame,
    plot: Rect,
    zoom: &ZoomRange,
    labels: &[String],
    style: &OverlayStyle,
) {
    if labels.is_empty() {
        return;
    }
    let (start, size) = zoom.effective_extent(Axis::X, plot.x, plot.width);
    let slot = size / labels.len() as f32;
    for (i, label) in labels.iter().enumerate() {
        let x = start + (i as f32 + 0.5) * slot;
        if x < plot.x || x > plot.right() {
            continue;
        }
        frame.push(OverlayCmd::Text {
            text: label.clone(),
            x,
            y: plot.bottom() + style.tick_length + style.font_size,
            size: style.font_size,
            color: style.text_color,
            align: Align::Center,
        });
    }
}

/// Legend row with color swatches; retains entry rectangles for hit-testing.
#[derive(Debug, Default)]
pub struct Legend {
    entries: Vec<LegendEntry>,
}

#[derive(Debug, Clone)]
struct LegendEntry {
    label: String,
    color: Color,
    rect: Rect,
}

impl Legend {
    const SWATCH: f32 = 10.0;
    const GAP: f32 = 14.0;
    /// Estimated glyph advance as a fraction of font size; the overlay layer
    /// owns real text metrics.
    const GLYPH_ADVANCE: f32 = 0.6;

    pub fn new() -> Self {
        Self::default()
    }

    /// Lay the legend out left-to-right inside `strip`.
    pub fn layout(&mut self, strip: Rect, items: &[(String, Color)], style: &OverlayStyle) {
        self.entries.clear();
        let mut x = strip.x;
        for (label, color) in items {
            let text_width = label.len() as f32 * style.font_size * Self::GLYPH_ADVANCE;
            let width = Self::SWATCH + 4.0 + text_width;
            self.entries.push(LegendEntry {
                label: label.clone(),
                color: *color,
                rect: Rect::new(x, strip.y, width, strip.height),
            });
            x += width + Self::GAP;
        }
    }

    /// Emit swatches and labels; hidden series render dimmed by visibility.
    pub fn compose(&self, frame: &mut OverlayFrame, visibility: &[f32], style: &OverlayStyle) {
        for (i, entry) in self.entries.iter().enumerate() {
            let vis = visibility.get(i).copied().unwrap_or(1.0);
            let alpha = 0.35 + 0.65 * vis;
            let swatch_y = entry.rect.y + (entry.rect.height - Self::SWATCH) / 2.0;
            frame.push(OverlayCmd::Rect {
                rect: Rect::new(entry.rect.x, swatch_y, Self::SWATCH, Self::SWATCH),
                color: entry.color.with_alpha_factor(alpha),
            });
            frame.push(OverlayCmd::Text {
                text: entry.label.clone(),
                x: entry.rect.x + Self::SWATCH + 4.0,
                y: entry.rect.y + entry.rect.height / 2.0 + style.font_size * 0.35,
                size: style.font_size,
                color: style.text_color.with_alpha_factor(alpha),
                align: Align::Left,
            });
        }
    }

    /// Which legend entry a pointer position hits, if any.
    pub fn hit(&self, pos: Pos) -> Option<usize> {
        self.entries.iter().position(|e| e.rect.contains(pos))
    }
}

/// Row labels and separators for the timeline table gutter.
pub fn push_timeline_table(
    frame: &mut OverlayFrame,
    gutter: Rect,
    plot: Rect,
    rows: &[String],
    style: &OverlayStyle,
) {
    if rows.is_empty() {
        return;
    }
    let row_height = plot.height / rows.len() as f32;
    for (i, label) in rows.iter().enumerate() {
        let top = plot.y + i as f32 * row_height;
        frame.push(OverlayCmd::Text {
            text: label.clone(),
            x: gutter.right() - 6.0,
            y: top + row_height / 2.0 + style.font_size * 0.35,
            size: style.font_size,
            color: style.text_color,
            align: Align::Right,
        });
        frame.push(OverlayCmd::Line {
            x1: gutter.x,
            y1: top,
            x2: plot.right(),
            y2: top,
            width: 1.0,
            color: style.axis_color.with_alpha_factor(0.4),
        });
    }
    frame.push(OverlayCmd::Line {
        x1: gutter.x,
        y1: plot.bottom(),
        x2: plot.right(),
        y2: plot.bottom(),
        width: 1.0,
        color: style.axis_color.with_alpha_factor(0.4),
    });
}
