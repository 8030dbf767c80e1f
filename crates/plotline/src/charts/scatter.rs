//! Scatter chart: one disk per sample.

use plotline_render::{Color, DiskPrimitive, Scene};

use crate::series::{XySeries, xy_extent};
use crate::viewport::Axis;

use super::ChartFrame;

/// Point cloud over numeric (x, y) samples.
///
/// Entrance scales marker radii up from zero; visibility fades each series'
/// alpha.
#[derive(Debug, Clone)]
pub struct ScatterChart {
    pub series: Vec<XySeries>,
    pub radius: f32,
}

impl ScatterChart {
    pub fn new(series: Vec<XySeries>) -> Self {
        Self {
            series,
            radius: 4.0,
        }
    }

    pub fn legend_items(&self) -> Vec<(String, Color)> {
        self.series
            .iter()
            .map(|s| (s.label.clone(), s.color))
            .collect()
    }

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
        let (x_range, y_range) = self.ranges(frame);
        let radius = self.radius * frame.entrance;

        for (index, series) in self.series.iter().enumerate() {
            let color = series.color.with_alpha_factor(frame.visibility_of(index));
            for point in &series.points {
                scene.push_disk(DiskPrimitive::new(
                    frame.x_px(point.x, x_range),
                    frame.y_px(point.y, y_range),
                    radius,
                    color,
                ));
            }
        }
    }
}
