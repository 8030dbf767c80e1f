//! Polyline chart with optional point markers.

use plotline_render::{Color, DiskPrimitive, Scene, SegmentPrimitive};

use crate::series::{XySeries, xy_extent};
use crate::viewport::Axis;

use super::ChartFrame;

/// Connected line series over numeric (x, y) samples.
///
/// Entrance rises the polyline from the bottom of the value range; hidden
/// series fade through their visibility alpha.
#[derive(Debug, Clone)]
pub struct LineChart {
    pub series: Vec<XySeries>,
    pub stroke_width: f32,
    pub markers: bool,
    pub marker_radius: f32,
}

impl LineChart {
    pub fn new(series: Vec<XySeries>) -> Self {
        Self {
            series,
            stroke_width: 2.0,
            markers: false,
            marker_radius: 3.0,
        }
    }

    pub fn with_markers(mut self, radius: f32) -> Self {
        self.markers = true;
        self.marker_radius = radius;
        self
    }

    pub fn legend_items(&self) -> Vec<(String, Color)> {
        self.series
            .iter()
            .map(|s| (s.label.clone(), s.color))
            .collect()
    }

    /// Zoom-adjusted (x, y) ranges for this dataset.
    pub fn ranges(&self, frame: &ChartFrame) -> ((f64, f64), (f64, f64)) {
        let ((x_min, x_max), (y_min, y_max)) = xy_extent(&self.series);
        (
            frame.zoom.apply_to_range(x_min, x_max, Axis::X),
            frame.zoom.apply_to_range(y_min, y_max, Axis::Y),
        )
    }

    pub fn build(&self, frame: &ChartFrame) -> Scene {
        let mut scene = frame.new_scene();
        self.build_into(frame, &mut scene);
        scene
    }

    pub fn build_into(&self, frame: &ChartFrame, scene: &mut Scene) {
        if self.series.is_empty() {
            return;
        }
        let (_, (data_y_min, _)) = xy_extent(&self.series);
        let (x_range, y_range) = self.ranges(frame);

        for (index, series) in self.series.iter().enumerate() {
            let color = series.color.with_alpha_factor(frame.visibility_of(index));

            // Rise from the unzoomed bottom so entrance is viewport-stable.
            let risen = |y: f64| data_y_min + (y - data_y_min) * frame.entrance as f64;

            for window in series.points.windows(2) {
                let (a, b) = (window[0], window[1]);
                scene.push_segment(SegmentPrimitive::new(
                    frame.x_px(a.x, x_range),
                    frame.y_px(risen(a.y), y_range),
                    frame.x_px(b.x, x_range),
                    frame.y_px(risen(b.y), y_range),
                    self.stroke_width,
                    color,
                ));
            }

            if self.markers {
                for point in &series.points {
                    scene.push_disk(DiskPrimitive::new(
                        frame.x_px(point.x, x_range),
                        frame.y_px(risen(point.y), y_range),
                        self.marker_radius,
                        color,
                    ));
                }
            }
        }
    }
}
