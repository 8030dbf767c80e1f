//! Graphics device acquisition.

use std::sync::Arc;

/// Errors surfaced by the rendering layer.
///
/// Acquisition failures are recoverable: the embedding chart records them as
/// fallback state and renders a textual notice instead of a canvas.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no compatible GPU adapter is available")]
    NoAdapter,
    #[error("failed to create GPU device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),
    #[error("failed to create render surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    #[error("surface does not support a default configuration")]
    SurfaceConfig,
    #[error("failed to acquire surface texture: {0}")]
    SurfaceAcquire(#[from] wgpu::SurfaceError),
}

/// A shared graphics context: instance, adapter, device, and queue.
///
/// Returned behind `Arc` so renderers and offscreen targets can share one
/// device. Acquisition is the only asynchronous operation in the engine;
/// [`GraphicsContext::new_sync`] blocks on it for synchronous hosts.
pub struct GraphicsContext {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GraphicsContext {
    /// Creates a new graphics context asynchronously.
    pub async fn new() -> Result<Arc<Self>, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| RenderError::NoAdapter)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                label: Some("plotline device"),
                ..Default::default()
            })
            .await?;

        tracing::info!(adapter = %adapter.get_info().name, "acquired graphics context");

        Ok(Arc::new(Self {
            instance,
            adapter,
            device,
            queue,
        }))
    }

    /// Creates a new graphics context synchronously.
    ///
    /// See [`GraphicsContext::new`] for the asynchronous version.
    pub fn new_sync() -> Result<Arc<Self>, RenderError> {
        pollster::block_on(Self::new())
    }

    /// Get adapter info for diagnostics.
    pub fn info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }
}
