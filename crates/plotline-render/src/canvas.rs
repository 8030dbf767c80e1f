//! Canvas renderer: one pipeline, one draw call per frame.
//!
//! The renderer owns a window/canvas surface, a 4x multisample offscreen
//! target, and a single alpha-blended render pipeline. Every frame it
//! expands the scene to a triangle list ([`crate::batch`]), renders it into
//! the multisample target, and resolves to the visible surface. An empty
//! scene still submits a clear-and-resolve pass, so "draw nothing" is an
//! observable blank frame rather than a skipped one.

use std::sync::Arc;

use plotline_core::geometry::Rect;
use wgpu::util::DeviceExt;

use crate::batch::{self, NdcTransform, Scene, Vertex};
use crate::context::{GraphicsContext, RenderError};

/// Multisample count for the offscreen target and pipeline.
pub const SAMPLE_COUNT: u32 = 4;

const SHADER: &str = r#"
struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) color: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var output: VertexOutput;
    output.position = vec4<f32>(input.position, 0.0, 1.0);
    output.color = input.color;
    return output;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return input.color;
}
"#;

/// The multisample offscreen texture the pipeline renders into.
///
/// Its dimensions must always equal the surface's; it is destroyed and
/// recreated on any size change, never resized in place.
struct MultisampleTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl MultisampleTarget {
    fn new(context: &GraphicsContext, format: wgpu::TextureFormat, width: u32, height: u32) -> Self {
        let texture = context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("plotline msaa target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: SAMPLE_COUNT,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            width,
            height,
        }
    }

    fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}

/// Compute the scissor rectangle for a clip, clamped to canvas bounds.
///
/// Returns `None` for degenerate clips (clamped width/height <= 0), which
/// disables scissoring for the whole call.
pub(crate) fn scissor_rect(clip: Rect, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    let x0 = clip.x.max(0.0).min(width as f32);
    let y0 = clip.y.max(0.0).min(height as f32);
    let x1 = clip.right().max(0.0).min(width as f32);
    let y1 = clip.bottom().max(0.0).min(height as f32);

    let w = (x1 - x0).round() as i64;
    let h = (y1 - y0).round() as i64;
    if w <= 0 || h <= 0 {
        return None;
    }
    Some((x0.round() as u32, y0.round() as u32, w as u32, h as u32))
}

/// Batched primitive renderer for one canvas surface.
pub struct CanvasRenderer {
    context: Arc<GraphicsContext>,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    msaa: MultisampleTarget,
    destroyed: bool,
}

impl CanvasRenderer {
    /// Configure the given surface target and build the render pipeline.
    ///
    /// Fails with a recoverable [`RenderError`] when the surface cannot be
    /// created or offers no default configuration; the embedding chart is
    /// expected to fall back to a non-canvas rendition in that case.
    pub fn new(
        context: Arc<GraphicsContext>,
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let surface = context.instance.create_surface(target)?;
        let mut config = surface
            .get_default_config(&context.adapter, width.max(1), height.max(1))
            .ok_or(RenderError::SurfaceConfig)?;
        config.usage = wgpu::TextureUsages::RENDER_ATTACHMENT;
        surface.configure(&context.device, &config);

        let shader = context
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("plotline primitive shader"),
                source: wgpu::ShaderSource::Wgsl(SHADER.into()),
            });

        let pipeline_layout =
            context
                .device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("plotline pipeline layout"),
                    bind_group_layouts: &[],
                    push_constant_ranges: &[],
                });

        let pipeline = context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("plotline primitive pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::layout()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: config.format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState {
                    count: SAMPLE_COUNT,
                    ..Default::default()
                },
                multiview: None,
                cache: None,
            });

        let msaa = MultisampleTarget::new(&context, config.format, config.width, config.height);

        tracing::debug!(
            width = config.width,
            height = config.height,
            format = ?config.format,
            "canvas renderer ready"
        );

        Ok(Self {
            context,
            surface,
            config,
            pipeline,
            msaa,
            destroyed: false,
        })
    }

    /// Current surface size in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Reconfigure the surface for a new canvas size.
    ///
    /// The multisample target is recreated lazily by the next [`draw`]
    /// (it must always match the surface extent).
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.destroyed {
            return;
        }
        let width = width.max(1);
        let height = height.max(1);
        if width == self.config.width && height == self.config.height {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.context.device, &self.config);
    }

    /// Render one frame: expand, upload, and draw the scene in a single
    /// draw call, then resolve the multisample target to the surface.
    pub fn draw(&mut self, scene: &Scene) -> Result<(), RenderError> {
        if self.destroyed {
            // Inert after destroy; the holder should have stopped calling.
            return Ok(());
        }

        if !self.msaa.matches(self.config.width, self.config.height) {
            self.msaa.texture.destroy();
            self.msaa = MultisampleTarget::new(
                &self.context,
                self.config.format,
                self.config.width,
                self.config.height,
            );
        }

        let frame = self.surface.get_current_texture()?;
        let surface_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let ndc = NdcTransform::new(self.config.width as f32, self.config.height as f32);
        let vertices = batch::expand_scene(scene, ndc);
        tracing::trace!(vertices = vertices.len(), "expanded frame");

        // The buffer is transient: created, used, and dropped within this call.
        let vertex_buffer = (!vertices.is_empty()).then(|| {
            self.context
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("plotline frame vertices"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("plotline frame encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("plotline frame pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.msaa.view,
                    resolve_target: Some(&surface_view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(scene.background.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(vertex_buffer) = &vertex_buffer {
                pass.set_pipeline(&self.pipeline);
                if let Some(clip) = scene.clip {
                    if let Some((x, y, w, h)) =
                        scissor_rect(clip, self.config.width, self.config.height)
                    {
                        pass.set_scissor_rect(x, y, w, h);
                    }
                }
                pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                pass.draw(0..vertices.len() as u32, 0..1);
            }
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Release the offscreen target; idempotent. Subsequent [`draw`] and
    /// [`resize`] calls become inert no-ops.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.msaa.texture.destroy();
        tracing::debug!("canvas renderer destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

impl Drop for CanvasRenderer {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scissor_is_clamped_to_canvas() {
        let clip = Rect::new(-20.0, -10.0, 100.0, 100.0);
        assert_eq!(scissor_rect(clip, 60, 50), Some((0, 0, 60, 50)));

        let clip = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(scissor_rect(clip, 800, 600), Some((10, 20, 30, 40)));
    }

    #[test]
    fn degenerate_scissor_is_skipped() {
        assert_eq!(scissor_rect(Rect::new(10.0, 10.0, 0.0, 50.0), 100, 100), None);
        assert_eq!(scissor_rect(Rect::new(10.0, 10.0, 50.0, -5.0), 100, 100), None);
        // Entirely off-canvas clips clamp to zero area.
        assert_eq!(scissor_rect(Rect::new(200.0, 0.0, 50.0, 50.0), 100, 100), None);
    }
}
