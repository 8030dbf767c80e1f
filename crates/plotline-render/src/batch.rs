//! CPU-side primitive batching.
//!
//! Each frame's rectangles, segments, and disks are expanded into one flat
//! triangle list so the renderer can issue a single draw call:
//!
//! ```text
//! rect    -> 2 triangles covering its four corners
//! segment -> an oriented quad, half-width = width / 2 along the
//!            perpendicular unit normal of the segment direction
//! disk    -> an N-slice triangle fan around the center
//! ```
//!
//! Positions are converted to normalized device coordinates on the CPU, so
//! the pipeline needs no uniform data at all. The vertex list lives for one
//! draw call and is rebuilt from scratch every frame.

use glam::Vec2;
use plotline_core::geometry::Rect;

use crate::Color;

/// Number of fan slices a disk expands to unless the caller overrides it.
pub const DEFAULT_DISK_SEGMENTS: u32 = 24;

/// An axis-aligned filled rectangle in canvas pixel space.
#[derive(Debug, Clone, Copy)]
pub struct RectPrimitive {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub color: Color,
}

impl RectPrimitive {
    pub fn new(x: f32, y: f32, w: f32, h: f32, color: Color) -> Self {
        Self { x, y, w, h, color }
    }
}

/// A stroked line segment in canvas pixel space.
#[derive(Debug, Clone, Copy)]
pub struct SegmentPrimitive {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub width: f32,
    pub color: Color,
}

impl SegmentPrimitive {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            width,
            color,
        }
    }
}

/// A filled disk in canvas pixel space.
#[derive(Debug, Clone, Copy)]
pub struct DiskPrimitive {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub color: Color,
    /// Fan resolution; [`DEFAULT_DISK_SEGMENTS`] via [`DiskPrimitive::new`].
    pub segments: u32,
}

impl DiskPrimitive {
    pub fn new(cx: f32, cy: f32, radius: f32, color: Color) -> Self {
        Self {
            cx,
            cy,
            radius,
            color,
            segments: DEFAULT_DISK_SEGMENTS,
        }
    }

    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = segments.max(3);
        self
    }
}

/// One frame's worth of primitives plus background and optional clip.
///
/// The scene is transient caller-owned input: the renderer reads it during
/// [`draw`](crate::CanvasRenderer::draw) and retains nothing.
#[derive(Debug, Clone)]
pub struct Scene {
    pub rects: Vec<RectPrimitive>,
    pub segments: Vec<SegmentPrimitive>,
    pub disks: Vec<DiskPrimitive>,
    pub background: Color,
    /// Pixel-space clip rectangle applied as a scissor, clamped to canvas
    /// bounds. Degenerate clips disable scissoring for the frame.
    pub clip: Option<Rect>,
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Self {
            rects: Vec::new(),
            segments: Vec::new(),
            disks: Vec::new(),
            background,
            clip: None,
        }
    }

    pub fn push_rect(&mut self, rect: RectPrimitive) {
        self.rects.push(rect);
    }

    pub fn push_segment(&mut self, segment: SegmentPrimitive) {
        self.segments.push(segment);
    }

    pub fn push_disk(&mut self, disk: DiskPrimitive) {
        self.disks.push(disk);
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty() && self.segments.is_empty() && self.disks.is_empty()
    }

    /// Triangle count this scene expands to.
    pub fn triangle_count(&self) -> usize {
        let disk_triangles: usize = self.disks.iter().map(|d| d.segments.max(3) as usize).sum();
        2 * self.rects.len() + 2 * self.segments.len() + disk_triangles
    }
}

/// One triangle-list vertex: position in NDC, linear RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x2,
            offset: 0,
            shader_location: 0,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x4,
            offset: 8,
            shader_location: 1,
        },
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Affine pixel-to-NDC map for a canvas of a given pixel size.
///
/// Pixel origin is top-left, device origin is bottom-left, so Y flips:
/// `ndc_x(px) = px / width * 2 - 1`, `ndc_y(py) = 1 - py / height * 2`.
#[derive(Debug, Clone, Copy)]
pub struct NdcTransform {
    width: f32,
    height: f32,
}

impl NdcTransform {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    #[inline]
    pub fn x(&self, px: f32) -> f32 {
        px / self.width * 2.0 - 1.0
    }

    #[inline]
    pub fn y(&self, py: f32) -> f32 {
        1.0 - py / self.height * 2.0
    }

    #[inline]
    pub fn point(&self, p: Vec2) -> [f32; 2] {
        [self.x(p.x), self.y(p.y)]
    }

    /// Inverse of [`NdcTransform::x`].
    #[inline]
    pub fn px(&self, ndc_x: f32) -> f32 {
        (ndc_x + 1.0) * 0.5 * self.width
    }

    /// Inverse of [`NdcTransform::y`].
    #[inline]
    pub fn py(&self, ndc_y: f32) -> f32 {
        (1.0 - ndc_y) * 0.5 * self.height
    }
}

/// Expand a whole scene into one triangle list.
pub fn expand_scene(scene: &Scene, ndc: NdcTransform) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(scene.triangle_count() * 3);
    for rect in &scene.rects {
        expand_rect(rect, ndc, &mut vertices);
    }
    for segment in &scene.segments {
        expand_segment(segment, ndc, &mut vertices);
    }
    for disk in &scene.disks {
        expand_disk(disk, ndc, &mut vertices);
    }
    vertices
}

fn push_triangle(out: &mut Vec<Vertex>, ndc: NdcTransform, color: [f32; 4], a: Vec2, b: Vec2, c: Vec2) {
    out.push(Vertex {
        position: ndc.point(a),
        color,
    });
    out.push(Vertex {
        position: ndc.point(b),
        color,
    });
    out.push(Vertex {
        position: ndc.point(c),
        color,
    });
}

fn expand_rect(rect: &RectPrimitive, ndc: NdcTransform, out: &mut Vec<Vertex>) {
    let color = rect.color.to_array();
    let tl = Vec2::new(rect.x, rect.y);
    let tr = Vec2::new(rect.x + rect.w, rect.y);
    let bl = Vec2::new(rect.x, rect.y + rect.h);
    let br = Vec2::new(rect.x + rect.w, rect.y + rect.h);
    push_triangle(out, ndc, color, tl, tr, bl);
    push_triangle(out, ndc, color, tr, br, bl);
}

fn expand_segment(segment: &SegmentPrimitive, ndc: NdcTransform, out: &mut Vec<Vertex>) {
    let color = segment.color.to_array();
    let start = Vec2::new(segment.x1, segment.y1);
    let end = Vec2::new(segment.x2, segment.y2);

    let delta = end - start;
    let mut length = delta.length();
    if length == 0.0 {
        // Zero-length segments keep a unit divisor; the quad collapses to a
        // point and draws nothing rather than dividing by zero.
        length = 1.0;
    }
    let normal = Vec2::new(-delta.y, delta.x) / length * (segment.width * 0.5);

    let a = start + normal;
    let b = start - normal;
    let c = end + normal;
    let d = end - normal;
    push_triangle(out, ndc, color, a, c, b);
    push_triangle(out, ndc, color, c, d, b);
}

fn expand_disk(disk: &DiskPrimitive, ndc: NdcTransform, out: &mut Vec<Vertex>) {
    let color = disk.color.to_array();
    let center = Vec2::new(disk.cx, disk.cy);
    let segments = disk.segments.max(3);
    let step = std::f32::consts::TAU / segments as f32;

    for i in 0..segments {
        let a0 = i as f32 * step;
        let a1 = (i + 1) as f32 * step;
        let p0 = center + Vec2::new(a0.cos(), a0.sin()) * disk.radius;
        let p1 = center + Vec2::new(a1.cos(), a1.sin()) * disk.radius;
        push_triangle(out, ndc, color, center, p0, p1);
    }
}
