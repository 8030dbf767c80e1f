pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter("debug,wgpu_core=info,wgpu_hal=info,naga=info,winit=info")
        .init();
}
