/// Represents a single frame in flight.
///
/// Created by `RenderDevice::begin_frame` with its color and depth already
/// cleared, finalized by `RenderDevice::end_frame`. Holding the surface
/// texture prevents acquisition of subsequent frames, so keep it short-lived.
pub struct Frame {
    /// Acquired back buffer; `None` for offscreen targets.
    pub(crate) surface_texture: Option<wgpu::SurfaceTexture>,

    /// Render-target view over the back buffer.
    pub view: wgpu::TextureView,

    pub encoder: wgpu::CommandEncoder,
}
