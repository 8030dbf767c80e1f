//! Plotline
//!
//! An interactive GPU chart engine. Three pieces cooperate per frame:
//!
//! - the [`viewport`] controller turns pointer gestures into a fractional
//!   zoom/pan window over the data ranges;
//! - the [`animation`] scheduler drives entrance and per-series visibility
//!   interpolation through a host redraw loop;
//! - the [`charts`] components re-express their datasets as pixel-space
//!   primitives each tick and hand them to `plotline-render` for a single
//!   batched draw call.
//!
//! Axis lines, tick labels, and legends are composed as [`overlay`]
//! commands for the host's 2D raster layer; the GPU canvas never draws
//! text.
//!
//! ```no_run
//! use plotline::charts::{BarChart, ChartFrame};
//! use plotline::layout::ChartLayout;
//! use plotline::series::Series;
//! use plotline::viewport::ViewportController;
//! use plotline_core::geometry::Size;
//! use plotline_render::Color;
//!
//! let chart = BarChart::new(vec![Series::new(
//!     "revenue",
//!     Color::parse_css("#4477aa"),
//!     vec![3.0, 5.0, 2.5],
//! )]);
//! let controller = ViewportController::new();
//! let canvas = Size::new(800.0, 600.0);
//! let frame = ChartFrame {
//!     canvas,
//!     plot: ChartLayout::default().plot_rect(canvas),
//!     zoom: controller.zoom(),
//!     entrance: 1.0,
//!     visibility: &[1.0],
//!     background: Color::WHITE,
//! };
//! let scene = chart.build(&frame);
//! assert_eq!(scene.rects.len(), 3);
//! ```

pub mod animation;
pub mod charts;
pub mod events;
pub mod layout;
pub mod overlay;
pub mod series;
pub mod ticks;
pub mod viewport;

pub use animation::{AnimationConfig, AnimationScheduler, HiddenSeries};
pub use charts::ChartFrame;
pub use events::{HandleStatus, PointerButton};
pub use layout::ChartLayout;
pub use viewport::{Axis, ViewportController, ZoomRange};
