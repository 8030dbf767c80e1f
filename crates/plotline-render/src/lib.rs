//! Plotline Render
//!
//! The GPU half of the plotline chart engine. A chart frame is a flat list
//! of pixel-space primitives (rectangles, stroked segments, filled disks);
//! this crate batches them into one triangle list, draws them with a single
//! alpha-blended pipeline into a 4x multisample target, and resolves to the
//! visible surface. Text never passes through here; axis labels and legends
//! live on a separate raster overlay composed by the chart layer.
//!
//! Initialization is the only fallible-by-design path: when no adapter or
//! device can be acquired the caller receives a [`RenderError`] and renders
//! a textual fallback instead of a canvas.

pub mod batch;
pub mod canvas;
pub mod color;
pub mod context;

pub use batch::{
    DEFAULT_DISK_SEGMENTS, DiskPrimitive, NdcTransform, RectPrimitive, Scene, SegmentPrimitive,
    Vertex, expand_scene,
};
pub use canvas::{CanvasRenderer, SAMPLE_COUNT};
pub use color::Color;
pub use context::{GraphicsContext, RenderError};
