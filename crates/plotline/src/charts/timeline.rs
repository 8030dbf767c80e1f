//! Timeline chart: horizontal span bars per row.

use plotline_render::{RectPrimitive, Scene};

use crate::series::TimelineSpan;
use crate::viewport::Axis;

use super::ChartFrame;

/// Row-oriented timeline bars (one row per label, spans in time units).
///
/// Rows live in the Y virtual extent and spans in the zoom-adjusted time
/// range, so both axes pan and zoom like any other chart. Entrance grows
/// each span rightward from its start edge; visibility is indexed by row.
#[derive(Debug, Clone)]
pub struct TimelineChart {
    pub rows: Vec<String>,
    pub spans: Vec<TimelineSpan>,
    pub time_range: (f64, f64),
    /// Fraction of each row height left empty above and below the bar.
    pub row_inset: f32,
}

impl TimelineChart {
    pub fn new(rows: Vec<String>, spans: Vec<TimelineSpan>, time_range: (f64, f64)) -> Self {
        Self {
            rows,
            spans,
            time_range,
            row_inset: 0.25,
        }
    }

    /// Zoom-adjusted time range on the X axis.
    pub fn x_range(&self, frame: &ChartFrame) -> (f64, f64) {
        frame
            .zoom
            .apply_to_range(self.time_range.0, self.time_range.1, Axis::X)
    }

    pub fn build(&self, frame: &ChartFrame) -> Scene {
        let mut scene = frame.new_scene();
        self.build_into(frame, &mut scene);
        scene
    }

    pub fn build_into(&self, frame: &ChartFrame, scene: &mut Scene) {
        if self.rows.is_empty() {
            return;
        }
        let x_range = self.x_range(frame);
        let (row_start, rows_extent) =
            frame
                .zoom
                .effective_extent(Axis::Y, frame.plot.y, frame.plot.height);
        let row_height = rows_extent / self.rows.len() as f32;
        let inset = row_height * self.row_inset;

        for span in &self.spans {
            if span.row >= self.rows.len() {
                continue;
            }
            let grown_end = span.start + (span.end - span.start) * frame.entrance as f64;
            let x0 = frame.x_px(span.start, x_range);
            let x1 = frame.x_px(grown_end, x_range);
            let top = row_start + span.row as f32 * row_height + inset;
            let color = span.color.with_alpha_factor(frame.visibility_of(span.row));
            scene.push_rect(RectPrimitive::new(
                x0,
                top,
                (x1 - x0).max(0.0),
                row_height - 2.0 * inset,
                color,
            ));
        }
    }
}
