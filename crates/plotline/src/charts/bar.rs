//! Grouped bar chart.

use plotline_render::{Color, RectPrimitive, Scene};

use crate::series::{Series, value_extent};
use crate::viewport::Axis;

use super::ChartFrame;

/// Category-grouped bars, one group slot per category index.
///
/// Bars grow from the baseline scaled by entrance progress and fade with
/// per-series visibility. Categories keep their virtual positions while
/// zoomed; the scene clip hides the off-window ones.
#[derive(Debug, Clone)]
pub struct BarChart {
    pub series: Vec<Series>,
    pub baseline: f64,
    /// Fraction of each category slot left empty around the group.
    pub group_gap: f32,
    /// Fraction of each bar slot left empty between bars.
    pub bar_gap: f32,
}

impl BarChart {
    pub fn new(series: Vec<Series>) -> Self {
        Self {
            series,
            baseline: 0.0,
            group_gap: 0.25,
            bar_gap: 0.1,
        }
    }

    pub fn category_count(&self) -> usize {
        self.series.iter().map(|s| s.values.len()).max().unwrap_or(0)
    }

    /// `(label, color)` pairs for legend composition.
    pub fn legend_items(&self) -> Vec<(String, Color)> {
        self.series
            .iter()
            .map(|s| (s.label.clone(), s.color))
            .collect()
    }

    /// The zoom-adjusted value range this chart plots against.
    pub fn y_range(&self, frame: &ChartFrame) -> (f64, f64) {
        let (min, max) = value_extent(&self.series, self.baseline);
        frame.zoom.apply_to_range(min, max, Axis::Y)
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
        let baseline_px = frame.y_px(self.baseline, y_range);

        let slot = size / categories as f32;
        let group_width = slot * (1.0 - self.group_gap);
        let bar_slot = group_width / self.series.len() as f32;
        let bar_width = bar_slot * (1.0 - self.bar_gap);

        for category in 0..categories {
            let group_x = start + category as f32 * slot + slot * self.group_gap * 0.5;
            for (index, series) in self.series.iter().enumerate() {
                let Some(&value) = series.values.get(category) else {
                    continue;
                };
                let grown = self.baseline + (value - self.baseline) * frame.entrance as f64;
                let value_px = frame.y_px(grown, y_range);

                let x = group_x + index as f32 * bar_slot + bar_slot * self.bar_gap * 0.5;
                let y = value_px.min(baseline_px);
                let height = (value_px - baseline_px).abs();
                let color = series.color.with_alpha_factor(frame.visibility_of(index));
                scene.push_rect(RectPrimitive::new(x, y, bar_width, height, color));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::test_support::{PLOT, frame};
    use crate::viewport::ZoomRange;

    fn chart() -> BarChart {
        BarChart::new(vec![
            Series::new("a", Color::from_hex(0x4477AA), vec![2.0, 4.0, 8.0]),
            Series::new("b", Color::from_hex(0xEE6677), vec![1.0, 3.0, 5.0]),
        ])
    }

    #[test]
    fn one_rect_per_series_per_category() {
        let f = frame(&[1.0, 1.0], 1.0, ZoomRange::IDENTITY);
        let scene = chart().build(&f);
        assert_eq!(scene.rects.len(), 6);
        assert!(scene.segments.is_empty());
        assert!(scene.clip.is_none());
    }

    #[test]
    fn entrance_scales_heights_from_the_baseline() {
        let full = chart().build(&frame(&[1.0, 1.0], 1.0, ZoomRange::IDENTITY));
        let half = chart().build(&frame(&[1.0, 1.0], 0.5, ZoomRange::IDENTITY));
        for (a, b) in full.rects.iter().zip(&half.rects) {
            assert!((b.h - a.h * 0.5).abs() < 1e-3);
            // Bars stay anchored at the baseline while growing.
            assert!((b.y + b.h - (a.y + a.h)).abs() < 1e-3);
        }
        // At zero entrance all bars are flat.
        let flat = chart().build(&frame(&[1.0, 1.0], 0.0, ZoomRange::IDENTITY));
        assert!(flat.rects.iter().all(|r| r.h < 1e-3));
    }

    #[test]
    fn visibility_fades_series_alpha() {
        let f = frame(&[1.0, 0.25], 1.0, ZoomRange::IDENTITY);
        let scene = chart().build(&f);
        // Rects interleave a,b per category.
        assert_eq!(scene.rects[0].color.a, 1.0);
        assert!((scene.rects[1].color.a - 0.25).abs() < 1e-6);
    }

    #[test]
    fn tallest_bar_fills_the_plot() {
        let f = frame(&[1.0, 1.0], 1.0, ZoomRange::IDENTITY);
        let scene = chart().build(&f);
        // Max value 8.0 maps to the plot top, baseline to the bottom.
        let tallest = scene
            .rects
            .iter()
            .map(|r| r.h)
            .fold(f32::NEG_INFINITY, f32::max);
        assert!((tallest - PLOT.height).abs() < 1e-3);
    }

    #[test]
    fn zoom_doubles_virtual_positions_and_clips() {
        let zoom = ZoomRange {
            x_min: 0.5,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        };
        let f = frame(&[1.0, 1.0], 1.0, zoom);
        let scene = chart().build(&f);
        assert_eq!(scene.clip, Some(PLOT));
        // All six bars are still expressed; the left half sits off-plot.
        assert_eq!(scene.rects.len(), 6);
        let leftmost = scene.rects.iter().map(|r| r.x).fold(f32::INFINITY, f32::min);
        assert!(leftmost < PLOT.x);
    }

    #[test]
    fn negative_values_hang_below_the_baseline() {
        let chart = BarChart::new(vec![Series::new(
            "n",
            Color::BLACK,
            vec![-3.0, 6.0],
        )]);
        let f = frame(&[1.0], 1.0, ZoomRange::IDENTITY);
        let y_range = chart.y_range(&f);
        let baseline_px = f.y_px(0.0, y_range);
        let scene = chart.build(&f);
        assert!((scene.rects[0].y - baseline_px).abs() < 1e-3);
        assert!(scene.rects[1].y < baseline_px);
    }
}
