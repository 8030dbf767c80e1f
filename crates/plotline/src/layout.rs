//! Plot-area layout: canvas size minus gutters.

use plotline_core::geometry::{Rect, Size};

/// Pixel gutters around the plot area for axes, labels, and the legend.
#[derive(Debug, Clone, Copy)]
pub struct ChartLayout {
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    /// Extra space above the plot reserved for a legend row; 0 disables it.
    pub legend_height: f32,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            margin_top: 16.0,
            margin_right: 16.0,
            margin_bottom: 36.0,
            margin_left: 56.0,
            legend_height: 0.0,
        }
    }
}

impl ChartLayout {
    pub fn with_legend(mut self, height: f32) -> Self {
        self.legend_height = height;
        self
    }

    /// The interactive plot rectangle for a canvas size, never negative.
    pub fn plot_rect(&self, canvas: Size) -> Rect {
        let x = self.margin_left;
        let y = self.margin_top + self.legend_height;
        Rect {
            x,
            y,
            width: (canvas.width - x - self.margin_right).max(0.0),
            height: (canvas.height - y - self.margin_bottom).max(0.0),
        }
    }

    /// The legend strip above the plot, if one is reserved.
    pub fn legend_rect(&self, canvas: Size) -> Option<Rect> {
        if self.legend_height <= 0.0 {
            return None;
        }
        Some(Rect {
            x: self.margin_left,
            y: self.margin_top,
            width: (canvas.width - self.margin_left - self.margin_right).max(0.0),
            height: self.legend_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_rect_subtracts_gutters() {
        let layout = ChartLayout::default();
        let plot = layout.plot_rect(Size::new(800.0, 600.0));
        assert_eq!(plot.x, 56.0);
        assert_eq!(plot.y, 16.0);
        assert_eq!(plot.width, 800.0 - 56.0 - 16.0);
        assert_eq!(plot.height, 600.0 - 16.0 - 36.0);
    }

    #[test]
    fn tiny_canvas_clamps_to_zero() {
        let layout = ChartLayout::default();
        let plot = layout.plot_rect(Size::new(40.0, 20.0));
        assert_eq!(plot.width, 0.0);
        assert_eq!(plot.height, 0.0);
    }

    #[test]
    fn legend_reserves_a_strip() {
        let layout = ChartLayout::default().with_legend(24.0);
        let plot = layout.plot_rect(Size::new(800.0, 600.0));
        assert_eq!(plot.y, 40.0);
        let legend = layout.legend_rect(Size::new(800.0, 600.0)).unwrap();
        assert_eq!(legend.y, 16.0);
        assert_eq!(legend.height, 24.0);
    }
}
