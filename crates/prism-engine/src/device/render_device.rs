use glam::Mat4;
use winit::window::{Fullscreen, Window};

use crate::pipeline::{
    DepthStencilDesc, PipelineState, RasterizerState, TransformSet, Viewport, STENCIL_REFERENCE,
};

use super::adapter::AdapterDiagnostics;
use super::display::{negotiate_refresh_rate, ModeNegotiation, OutputModes, RefreshRate};
use super::readback::{self, TargetPixels};
use super::surface::{self, SwapChainDesc, COLOR_FORMAT, DEPTH_FORMAT};
use super::{DeviceError, DeviceParams, FeatureLevel, Frame, FrameError};

/// Where the device presents.
#[derive(Debug, Copy, Clone)]
pub enum OutputTarget<'w> {
    /// Swap chain bound to the window's client area.
    Window(&'w Window),

    /// Headless texture of the requested size; frames are read back instead
    /// of presented.
    Offscreen,
}

enum SwapChain<'w> {
    Surface {
        surface: wgpu::Surface<'w>,
        config: wgpu::SurfaceConfiguration,
    },
    Offscreen,
}

enum RenderTarget {
    /// Back buffer is acquired from the surface every frame.
    Surface,
    Texture(wgpu::Texture),
}

/// Owns the GPU device, its swap chain and the per-device render state.
///
/// Every resource slot is optional. `initialize` fills them in creation
/// order; `shutdown` empties them in reverse order and may be called any
/// number of times, including after a partial initialization.
pub struct RenderDevice<'w> {
    window: Option<&'w Window>,

    swap_chain: Option<SwapChain<'w>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    render_target: Option<RenderTarget>,
    depth_buffer: Option<wgpu::Texture>,
    depth_stencil_state: Option<DepthStencilDesc>,
    depth_view: Option<wgpu::TextureView>,
    rasterizer: Option<RasterizerState>,

    swap_chain_desc: Option<SwapChainDesc>,
    viewport: Option<Viewport>,
    transforms: Option<TransformSet>,
    diagnostics: Option<AdapterDiagnostics>,

    feature_level: FeatureLevel,
    vsync: bool,
    fullscreen: bool,
}

impl Default for RenderDevice<'_> {
    fn default() -> Self {
        Self {
            window: None,
            swap_chain: None,
            device: None,
            queue: None,
            render_target: None,
            depth_buffer: None,
            depth_stencil_state: None,
            depth_view: None,
            rasterizer: None,
            swap_chain_desc: None,
            viewport: None,
            transforms: None,
            diagnostics: None,
            feature_level: FeatureLevel::default(),
            vsync: false,
            fullscreen: false,
        }
    }
}

impl RenderDevice<'static> {
    /// Initialized device rendering into an offscreen target.
    pub fn headless(params: DeviceParams) -> Result<Self, DeviceError> {
        let mut device = Self::new();
        device.initialize(OutputTarget::Offscreen, params)?;
        Ok(device)
    }
}

impl<'w> RenderDevice<'w> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates every device resource for `output`.
    ///
    /// Blocks on adapter and device acquisition. On failure the resources
    /// created so far stay in place; `shutdown` (or drop) releases them.
    pub fn initialize(
        &mut self,
        output: OutputTarget<'w>,
        params: DeviceParams,
    ) -> Result<(), DeviceError> {
        pollster::block_on(self.initialize_async(output, params))
    }

    async fn initialize_async(
        &mut self,
        output: OutputTarget<'w>,
        params: DeviceParams,
    ) -> Result<(), DeviceError> {
        if self.device.is_some() || self.swap_chain.is_some() {
            return Err(DeviceError::AlreadyInitialized);
        }
        params.validate()?;
        self.vsync = params.vsync;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let (window, surface) = match output {
            OutputTarget::Window(window) => (Some(window), Some(instance.create_surface(window)?)),
            OutputTarget::Offscreen => (None, None),
        };
        self.window = window;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: surface.as_ref(),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| DeviceError::NoAdapter(e.to_string()))?;

        let output_modes = match window {
            Some(window) => {
                let monitor = window
                    .primary_monitor()
                    .or_else(|| window.current_monitor())
                    .ok_or(DeviceError::NoOutput)?;
                Some(OutputModes::enumerate(&monitor))
            }
            None => None,
        };

        let negotiation = match &output_modes {
            Some(outputs) => {
                let n = negotiate_refresh_rate(&outputs.modes, params.width, params.height);
                if n.matched.is_none() {
                    log::warn!(
                        "no {}x{} display mode on the primary output, assuming {} Hz",
                        params.width,
                        params.height,
                        RefreshRate::DEFAULT.hertz()
                    );
                }
                n
            }
            None => ModeNegotiation {
                refresh_rate: RefreshRate::DEFAULT,
                matched: None,
            },
        };
        let fullscreen_mode = negotiation
            .matched
            .and_then(|i| output_modes.as_ref().and_then(|o| o.video_mode(i)));

        let diagnostics = AdapterDiagnostics::collect(
            &adapter.get_info(),
            &adapter.limits(),
            output_modes.as_ref().and_then(|o| o.name.clone()),
        );
        log::info!("adapter: {diagnostics}");
        if diagnostics.is_software() {
            log::warn!("adapter is a software rasterizer, frame rates will be low");
        }
        drop(output_modes);

        if !self.feature_level.supported_by(&adapter) {
            return Err(DeviceError::UnsupportedFeatureLevel {
                adapter: diagnostics.name,
            });
        }
        self.diagnostics = Some(diagnostics);

        let (format, alpha_mode) = match &surface {
            Some(surface) => {
                let caps = surface.get_capabilities(&adapter);
                let format = surface::choose_color_format(&caps)
                    .ok_or(DeviceError::UnsupportedColorFormat)?;
                (format, surface::choose_alpha_mode(&caps))
            }
            None => (COLOR_FORMAT, wgpu::CompositeAlphaMode::Opaque),
        };
        let desc = SwapChainDesc::describe(&params, negotiation.refresh_rate, format);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("prism device"),
                required_features: self.feature_level.features,
                required_limits: self.feature_level.limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await?;
        drop(adapter);
        drop(instance);

        self.swap_chain = Some(match surface {
            Some(surface) => {
                let config = desc.surface_configuration(alpha_mode);
                surface.configure(&device, &config);
                SwapChain::Surface { surface, config }
            }
            None => SwapChain::Offscreen,
        });

        self.render_target = Some(match self.swap_chain {
            Some(SwapChain::Surface { .. }) => RenderTarget::Surface,
            _ => RenderTarget::Texture(device.create_texture(&wgpu::TextureDescriptor {
                label: Some("prism offscreen target"),
                size: desc.extent(),
                mip_level_count: 1,
                sample_count: desc.sample_count,
                dimension: wgpu::TextureDimension::D2,
                format: desc.format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
                view_formats: &[],
            })),
        });

        let depth_buffer = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("prism depth buffer"),
            size: desc.extent(),
            mip_level_count: 1,
            sample_count: desc.sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        self.depth_stencil_state = Some(DepthStencilDesc::default());
        self.depth_view = Some(depth_buffer.create_view(&wgpu::TextureViewDescriptor {
            label: Some("prism depth view"),
            ..Default::default()
        }));
        self.depth_buffer = Some(depth_buffer);

        self.rasterizer = Some(RasterizerState::default());
        self.viewport = Some(Viewport::full(params.width, params.height));
        self.transforms = Some(TransformSet::new(
            params.width,
            params.height,
            params.screen_near,
            params.screen_depth,
        ));

        self.device = Some(device);
        self.queue = Some(queue);
        self.swap_chain_desc = Some(desc);

        if params.fullscreen {
            if let Some(window) = self.window {
                let mode = match fullscreen_mode {
                    Some(mode) => Fullscreen::Exclusive(mode),
                    None => Fullscreen::Borderless(None),
                };
                window.set_fullscreen(Some(mode));
                self.fullscreen = true;
            }
        }

        log::info!(
            "render device ready: {}x{} {:?}, vsync {} at {:.2} Hz",
            desc.width,
            desc.height,
            desc.format,
            self.vsync,
            desc.refresh_rate.hertz()
        );
        Ok(())
    }

    /// Acquires the back buffer and clears color, depth (to 1.0) and stencil
    /// (to 0).
    pub fn begin_frame(
        &self,
        red: f32,
        green: f32,
        blue: f32,
        alpha: f32,
    ) -> Result<Frame, FrameError> {
        let (Some(device), Some(swap_chain), Some(render_target), Some(depth_view)) = (
            self.device.as_ref(),
            self.swap_chain.as_ref(),
            self.render_target.as_ref(),
            self.depth_view.as_ref(),
        ) else {
            return Err(FrameError::NotInitialized);
        };

        let (surface_texture, view) = match (swap_chain, render_target) {
            (SwapChain::Surface { surface, config }, RenderTarget::Surface) => {
                match surface.get_current_texture() {
                    Ok(texture) => {
                        let view = texture
                            .texture
                            .create_view(&wgpu::TextureViewDescriptor::default());
                        (Some(texture), view)
                    }
                    Err(error) => {
                        let action = surface::map_surface_error(surface, device, config, &error);
                        return Err(FrameError::Surface { error, action });
                    }
                }
            }
            (SwapChain::Offscreen, RenderTarget::Texture(texture)) => {
                (None, texture.create_view(&wgpu::TextureViewDescriptor::default()))
            }
            _ => return Err(FrameError::NotInitialized),
        };

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("prism frame encoder"),
        });

        // Clear-only pass; draws are recorded in passes opened by `begin_pass`.
        {
            let _clear = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("prism clear pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: red as f64,
                            g: green as f64,
                            b: blue as f64,
                            a: alpha as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(0),
                        store: wgpu::StoreOp::Store,
                    }),
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        Ok(Frame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Opens a draw pass over `frame` with the device's viewport and stencil
    /// reference bound.
    pub fn begin_pass<'f>(&self, frame: &'f mut Frame) -> Result<wgpu::RenderPass<'f>, FrameError> {
        let (Some(depth_view), Some(viewport)) = (self.depth_view.as_ref(), self.viewport) else {
            return Err(FrameError::NotInitialized);
        };

        let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("prism draw pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                depth_slice: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                }),
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        viewport.apply(&mut pass);
        pass.set_stencil_reference(STENCIL_REFERENCE);
        Ok(pass)
    }

    /// Submits the frame and presents it.
    ///
    /// With vsync the present waits for the next vertical blank; without it
    /// the frame is shown as soon as possible.
    pub fn end_frame(&self, frame: Frame) -> Result<(), FrameError> {
        let Some(queue) = self.queue.as_ref() else {
            return Err(FrameError::NotInitialized);
        };

        let Frame {
            surface_texture,
            view,
            encoder,
        } = frame;

        if let (Some(window), Some(_)) = (self.window, surface_texture.as_ref()) {
            window.pre_present_notify();
        }
        queue.submit(std::iter::once(encoder.finish()));
        drop(view);

        if let Some(texture) = surface_texture {
            texture.present();
        }
        Ok(())
    }

    /// Reads the offscreen target back to the CPU.
    ///
    /// Waits for all submitted work. Window targets cannot be read back.
    pub fn read_back_target(&self) -> Result<TargetPixels, DeviceError> {
        let (Some(device), Some(queue)) = (self.device.as_ref(), self.queue.as_ref()) else {
            return Err(DeviceError::NotInitialized);
        };
        match self.render_target.as_ref() {
            Some(RenderTarget::Texture(texture)) => readback::read_texture(device, queue, texture),
            Some(RenderTarget::Surface) => Err(DeviceError::Readback(
                "window back buffers cannot be read back".into(),
            )),
            None => Err(DeviceError::NotInitialized),
        }
    }

    /// Releases every resource in reverse creation order.
    ///
    /// Leaves exclusive fullscreen first. Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        if self.fullscreen {
            if let Some(window) = self.window {
                window.set_fullscreen(None);
            }
            self.fullscreen = false;
        }

        let was_initialized = self.device.is_some();

        self.rasterizer = None;
        self.depth_view = None;
        self.depth_stencil_state = None;
        if let Some(depth_buffer) = self.depth_buffer.take() {
            depth_buffer.destroy();
        }
        if let Some(RenderTarget::Texture(texture)) = self.render_target.take() {
            texture.destroy();
        }
        self.queue = None;
        self.device = None;
        self.swap_chain = None;

        self.viewport = None;
        self.transforms = None;
        self.swap_chain_desc = None;
        self.window = None;

        if was_initialized {
            log::debug!("render device released");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.swap_chain.is_some()
            && self.device.is_some()
            && self.queue.is_some()
            && self.render_target.is_some()
            && self.depth_buffer.is_some()
            && self.depth_stencil_state.is_some()
            && self.depth_view.is_some()
            && self.rasterizer.is_some()
    }

    pub fn get_device(&self) -> Result<&wgpu::Device, DeviceError> {
        self.device.as_ref().ok_or(DeviceError::NotInitialized)
    }

    pub fn get_queue(&self) -> Result<&wgpu::Queue, DeviceError> {
        self.queue.as_ref().ok_or(DeviceError::NotInitialized)
    }

    pub fn projection_matrix(&self) -> Option<Mat4> {
        self.transforms.map(|t| t.projection)
    }

    pub fn world_matrix(&self) -> Option<Mat4> {
        self.transforms.map(|t| t.world)
    }

    pub fn ortho_matrix(&self) -> Option<Mat4> {
        self.transforms.map(|t| t.ortho)
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Rasterizer and depth/stencil configuration shared by every pipeline.
    pub fn pipeline_state(&self) -> Option<PipelineState> {
        Some(PipelineState {
            rasterizer: self.rasterizer?,
            depth_stencil: self.depth_stencil_state?,
        })
    }

    pub fn color_format(&self) -> Option<wgpu::TextureFormat> {
        self.swap_chain_desc.map(|d| d.format)
    }

    pub fn depth_format(&self) -> wgpu::TextureFormat {
        DEPTH_FORMAT
    }

    pub fn swap_chain_desc(&self) -> Option<SwapChainDesc> {
        self.swap_chain_desc
    }

    /// Adapter name and memory, kept after the adapter is released.
    pub fn video_card_info(&self) -> Option<&AdapterDiagnostics> {
        self.diagnostics.as_ref()
    }

    pub fn vsync_enabled(&self) -> bool {
        self.vsync
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

impl Drop for RenderDevice<'_> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_device_is_empty() {
        let device = RenderDevice::new();
        assert!(!device.is_initialized());
        assert!(device.get_device().is_err());
        assert!(device.projection_matrix().is_none());
        assert!(device.pipeline_state().is_none());
        assert!(device.video_card_info().is_none());
    }

    #[test]
    fn frames_require_initialization() {
        let device = RenderDevice::new();
        assert!(matches!(device.begin_frame(0.0, 0.0, 0.0, 1.0), Err(FrameError::NotInitialized)));
        assert!(matches!(device.read_back_target(), Err(DeviceError::NotInitialized)));
    }

    #[test]
    fn shutdown_before_initialize_is_a_no_op() {
        let mut device = RenderDevice::new();
        device.shutdown();
        device.shutdown();
        assert!(!device.is_initialized());
    }

    #[test]
    fn invalid_params_fail_before_touching_the_gpu() {
        let mut device = RenderDevice::new();
        let params = DeviceParams {
            width: 0,
            ..DeviceParams::default()
        };
        assert!(matches!(
            device.initialize(OutputTarget::Offscreen, params),
            Err(DeviceError::InvalidSize { width: 0, height: 600 })
        ));
        assert!(!device.is_initialized());
    }
}
