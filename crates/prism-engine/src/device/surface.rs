use super::display::RefreshRate;
use super::{DeviceParams, SurfaceErrorAction};

/// Color format of the back buffer.
pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Accepted when the surface does not offer [`COLOR_FORMAT`].
pub const FALLBACK_COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8Unorm;

/// Format of the depth/stencil buffer.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

/// Swap chain description derived from the device parameters.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SwapChainDesc {
    pub width: u32,
    pub height: u32,
    pub format: wgpu::TextureFormat,

    /// Back buffers in flight; maps to the surface frame latency.
    pub buffer_count: u32,

    /// Negotiated refresh rate with vsync, `0/1` without.
    pub refresh_rate: RefreshRate,

    pub present_mode: wgpu::PresentMode,
    pub windowed: bool,
    pub sample_count: u32,
}

impl SwapChainDesc {
    pub fn describe(
        params: &DeviceParams,
        negotiated: RefreshRate,
        format: wgpu::TextureFormat,
    ) -> Self {
        let (refresh_rate, present_mode) = if params.vsync {
            (negotiated, wgpu::PresentMode::Fifo)
        } else {
            (RefreshRate::UNCAPPED, wgpu::PresentMode::AutoNoVsync)
        };

        Self {
            width: params.width,
            height: params.height,
            format,
            buffer_count: 1,
            refresh_rate,
            present_mode,
            windowed: !params.fullscreen,
            sample_count: 1,
        }
    }

    pub fn surface_configuration(
        &self,
        alpha_mode: wgpu::CompositeAlphaMode,
    ) -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: self.format,
            width: self.width,
            height: self.height,
            present_mode: self.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: self.buffer_count,
        }
    }

    pub fn extent(&self) -> wgpu::Extent3d {
        wgpu::Extent3d {
            width: self.width,
            height: self.height,
            depth_or_array_layers: 1,
        }
    }
}

pub(crate) fn choose_color_format(caps: &wgpu::SurfaceCapabilities) -> Option<wgpu::TextureFormat> {
    [COLOR_FORMAT, FALLBACK_COLOR_FORMAT]
        .into_iter()
        .find(|f| caps.formats.contains(f))
}

pub(crate) fn choose_alpha_mode(caps: &wgpu::SurfaceCapabilities) -> wgpu::CompositeAlphaMode {
    [wgpu::CompositeAlphaMode::Opaque]
        .into_iter()
        .find(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    err: &wgpu::SurfaceError,
) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if config.width > 0 && config.height > 0 {
                surface.configure(device, config);
            }
            SurfaceErrorAction::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(vsync: bool, fullscreen: bool) -> DeviceParams {
        DeviceParams {
            vsync,
            fullscreen,
            ..DeviceParams::default()
        }
    }

    fn caps(formats: Vec<wgpu::TextureFormat>) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            ..Default::default()
        }
    }

    #[test]
    fn vsync_uses_negotiated_rate_and_fifo() {
        let rate = RefreshRate::from_millihertz(75_000);
        let d = SwapChainDesc::describe(&params(true, false), rate, COLOR_FORMAT);
        assert_eq!(d.refresh_rate, rate);
        assert_eq!(d.present_mode, wgpu::PresentMode::Fifo);
    }

    #[test]
    fn no_vsync_is_uncapped_and_non_blocking() {
        let rate = RefreshRate::from_millihertz(75_000);
        let d = SwapChainDesc::describe(&params(false, false), rate, COLOR_FORMAT);
        assert_eq!(d.refresh_rate, RefreshRate { numerator: 0, denominator: 1 });
        assert_eq!(d.present_mode, wgpu::PresentMode::AutoNoVsync);
    }

    #[test]
    fn single_buffer_no_multisampling() {
        let d = SwapChainDesc::describe(&params(true, true), RefreshRate::DEFAULT, COLOR_FORMAT);
        assert_eq!(d.buffer_count, 1);
        assert_eq!(d.sample_count, 1);
        assert!(!d.windowed);
        assert_eq!((d.width, d.height), (800, 600));

        let config = d.surface_configuration(wgpu::CompositeAlphaMode::Opaque);
        assert_eq!(config.desired_maximum_frame_latency, 1);
        assert_eq!(config.format, COLOR_FORMAT);
        assert_eq!(config.usage, wgpu::TextureUsages::RENDER_ATTACHMENT);
    }

    #[test]
    fn color_format_prefers_rgba() {
        let c = caps(vec![FALLBACK_COLOR_FORMAT, COLOR_FORMAT]);
        assert_eq!(choose_color_format(&c), Some(COLOR_FORMAT));
    }

    #[test]
    fn color_format_falls_back_to_bgra() {
        let c = caps(vec![wgpu::TextureFormat::Bgra8UnormSrgb, FALLBACK_COLOR_FORMAT]);
        assert_eq!(choose_color_format(&c), Some(FALLBACK_COLOR_FORMAT));
    }

    #[test]
    fn unknown_formats_are_rejected() {
        let c = caps(vec![wgpu::TextureFormat::Rgba16Float]);
        assert_eq!(choose_color_format(&c), None);
    }

    #[test]
    fn alpha_mode_prefers_opaque() {
        let mut c = caps(vec![COLOR_FORMAT]);
        c.alpha_modes = vec![
            wgpu::CompositeAlphaMode::PreMultiplied,
            wgpu::CompositeAlphaMode::Opaque,
        ];
        assert_eq!(choose_alpha_mode(&c), wgpu::CompositeAlphaMode::Opaque);

        c.alpha_modes = vec![wgpu::CompositeAlphaMode::PreMultiplied];
        assert_eq!(choose_alpha_mode(&c), wgpu::CompositeAlphaMode::PreMultiplied);

        c.alpha_modes.clear();
        assert_eq!(choose_alpha_mode(&c), wgpu::CompositeAlphaMode::Auto);
    }
}
