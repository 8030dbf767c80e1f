//! Stacked bar chart.

use plotline_render::{Color, RectPrimitive, Scene};

use crate::series::Series;
use crate::viewport::Axis;

use super::ChartFrame;

/// Per-category cumulative stacking of non-negative series values.
///
/// A hidden series contributes `value * visibility`, so a fade collapses its
/// slice and the layers above slide down smoothly instead of popping.
#[derive(Debug, Clone)]
pub struct StackedBarChart {
    pub series: Vec<Series>,
    /// Fraction of each category slot left empty around the bar.
    pub gap: f32,
}

impl StackedBarChart {
    pub fn new(series: Vec<Series>) -> Self {
        Self { series, gap: 0.3 }
    }

    pub fn category_count(&self) -> usize {
        self.series.iter().map(|s| s.values.len()).max().unwrap_or(0)
    }

    pub fn legend_items(&self) -> Vec<(String, Color)> {
        self.series
            .iter()
            .map(|s| (s.label.clone(), s.color))
            .collect()
    }

    /// Zoom-adjusted value range, from zero to the tallest full stack.
    pub fn y_range(&self, frame: &ChartFrame) -> (f64, f64) {
        let mut tallest = 0.0f64;
        for category in 0..self.category_count() {
            let total: f64 = self
                .series
                .iter()
                .filter_map(|s| s.values.get(category))
                .map(|v| v.max(0.0))
                .sum();
            tallest = tallest.max(total);
        }
        if tallest <= 0.0 {
            tallest = 1.0;
        }
        frame.zoom.apply_to_range(0.0, tallest, Axis::Y)
    }

    pub fn build(&self, frame: &ChartFrame) -> Scene {
        let mut scene = frame.new_scene();
        self.build_into(frame, &mut scene);
        scene
    }

    pub fn build_into(&self, frame: &ChartFrame, scene: &mut Scene) {
        let categories = self.category_count();
        if categories == 0 || self.series.is_empty() {
            return;
        }

        let (start, size) = frame.category_extent();
        let y_range = self.y_range(frame);
        let slot = size / categories as f32;
        let bar_width = slot * (1.0 - self.gap);

        for category in 0..categories {
            let x = start + category as f32 * slot + slot * self.gap * 0.5;
            let mut cumulative = 0.0f64;
            for (index, series) in self.series.iter().enumerate() {
                let value = series.values.get(category).copied().unwrap_or(0.0).max(0.0);
                let contribution =
                    value * frame.visibility_of(index) as f64 * frame.entrance as f64;
                let y_bottom = frame.y_px(cumulative, y_range);
                let y_top = frame.y_px(cumulative + contribution, y_range);
                scene.push_rect(RectPrimitive::new(
                    x,
                    y_top,
                    bar_width,
                    y_bottom - y_top,
                    series.color,
                ));
                cumulative += contribution;
            }
        }
    }
}
