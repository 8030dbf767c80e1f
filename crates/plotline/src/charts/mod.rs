//! Chart components: per-frame scene assembly.
//!
//! A chart component is a value-type description of a dataset plus styling.
//! Each frame the host builds a [`ChartFrame`] (layout, viewport, animation
//! values) and asks the component for a [`Scene`]; the component re-expresses
//! its data as pixel-space primitives in current positions. Components hold
//! no GPU state and never see the renderer.

use plotline_core::geometry::{Rect, Size};
use plotline_render::{RectPrimitive, Scene, SegmentPrimitive};

use crate::viewport::{Axis, SelectionStyle, ZoomRange};

mod bar;
mod composite;
mod line;
mod scatter;
mod stacked;
mod timeline;

pub use bar::BarChart;
pub use composite::CompositeChart;
pub use line::LineChart;
pub use scatter::ScatterChart;
pub use stacked::StackedBarChart;
pub use timeline::TimelineChart;

/// Everything a component needs to express one frame.
#[derive(Debug, Clone, Copy)]
pub struct ChartFrame<'a> {
    pub canvas: Size,
    pub plot: Rect,
    pub zoom: ZoomRange,
    /// Eased entrance progress in `[0, 1]`.
    pub entrance: f32,
    /// Per-series visibility values in `[0, 1]`.
    pub visibility: &'a [f32],
    pub background: plotline_render::Color,
}

impl<'a> ChartFrame<'a> {
    /// Visibility for a series index; absent entries count as fully visible.
    pub fn visibility_of(&self, index: usize) -> f32 {
        self.visibility.get(index).copied().unwrap_or(1.0)
    }

    /// Start a scene for this frame. Zoomed viewports clip to the plot
    /// rectangle so off-window geometry never escapes the plot bounds.
    pub fn new_scene(&self) -> Scene {
        let mut scene = Scene::new(self.background);
        if self.zoom.is_zoomed() {
            scene.clip = Some(self.plot);
        }
        scene
    }

    /// Map a data value to a pixel Y inside the plot (range already
    /// zoom-adjusted; pixel Y grows downward).
    pub fn y_px(&self, value: f64, range: (f64, f64)) -> f32 {
        let (min, max) = range;
        let extent = (max - min).max(f64::EPSILON);
        self.plot.bottom() - (((value - min) / extent) as f32) * self.plot.height
    }

    /// Map a data value to a pixel X inside the plot.
    pub fn x_px(&self, value: f64, range: (f64, f64)) -> f32 {
        let (min, max) = range;
        let extent = (max - min).max(f64::EPSILON);
        self.plot.x + (((value - min) / extent) as f32) * self.plot.width
    }

    /// Virtual category extent along X for the current zoom.
    pub fn category_extent(&self) -> (f32, f32) {
        self.zoom.effective_extent(Axis::X, self.plot.x, self.plot.width)
    }
}

/// Append the selection overlay (fill plus border) to a scene.
///
/// The controller publishes the rectangle; rendering it through the same
/// batched frame keeps the engine at two fixed layers.
pub fn push_selection_overlay(scene: &mut Scene, selection: Rect, style: &SelectionStyle) {
    scene.push_rect(RectPrimitive::new(
        selection.x,
        selection.y,
        selection.width,
        selection.height,
        style.fill,
    ));
    let (x0, y0) = (selection.x, selection.y);
    let (x1, y1) = (selection.right(), selection.bottom());
    for (ax, ay, bx, by) in [
        (x0, y0, x1, y0),
        (x1, y0, x1, y1),
        (x1, y1, x0, y1),
        (x0, y1, x0, y0),
    ] {
        scene.push_segment(SegmentPrimitive::new(
            ax,
            ay,
            bx,
            by,
            style.border_width,
            style.border,
        ));
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use plotline_render::Color;

    pub const PLOT: Rect = Rect::new(50.0, 20.0, 400.0, 300.0);

    pub fn frame<'a>(visibility: &'a [f32], entrance: f32, zoom: ZoomRange) -> ChartFrame<'a> {
        ChartFrame {
            canvas: Size::new(500.0, 360.0),
            plot: PLOT,
            zoom,
            entrance,
            visibility,
            background: Color::WHITE,
        }
    }
}
