//! Composite chart: bars with overlaid lines in one plot.

use plotline_render::{Color, Scene};

use super::{BarChart, ChartFrame, LineChart};

/// Bars and lines sharing one layout and one scene.
///
/// Visibility indices cover the bar series first, then the line series, so
/// one legend and one hidden-set drive both halves.
#[derive(Debug, Clone)]
pub struct CompositeChart {
    pub bars: BarChart,
    pub lines: LineChart,
}

impl CompositeChart {
    pub fn new(bars: BarChart, lines: LineChart) -> Self {
        Self { bars, lines }
    }

    pub fn series_count(&self) -> usize {
        self.bars.series.len() + self.lines.series.len()
    }

    pub fn legend_items(&self) -> Vec<(String, Color)> {
        let mut items = self.bars.legend_items();
        items.extend(self.lines.legend_items());
        items
    }

    pub fn build(&self, frame: &ChartFrame) -> Scene {
        let mut scene = frame.new_scene();

        let split = self.bars.series.len().min(frame.visibility.len());
        let (bar_visibility, line_visibility) = frame.visibility.split_at(split);

        let bar_frame = ChartFrame {
            visibility: bar_visibility,
            ..*frame
        };
        self.bars.build_into(&bar_frame, &mut scene);

        let line_frame = ChartFrame {
            visibility: line_visibility,
            ..*frame
        };
        self.lines.build_into(&line_frame, &mut scene);

        scene
    }
}
