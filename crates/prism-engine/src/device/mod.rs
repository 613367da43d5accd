//! GPU device + swap chain management.
//!
//! This module is responsible for:
//! - selecting the adapter and negotiating the output's refresh rate
//! - creating the Device/Queue, the swap chain and the depth/stencil buffer
//! - clearing, submitting and presenting frames

mod adapter;
mod display;
mod error;
mod frame;
mod params;
mod readback;
mod render_device;
mod surface;

pub use adapter::AdapterDiagnostics;
pub use display::{
    negotiate_refresh_rate, DisplayMode, ModeNegotiation, RefreshRate, MIN_MODE_BIT_DEPTH,
};
pub use error::{DeviceError, FrameError, SurfaceErrorAction};
pub use frame::Frame;
pub use params::{DeviceParams, FeatureLevel};
pub use readback::TargetPixels;
pub use render_device::{OutputTarget, RenderDevice};
pub use surface::{SwapChainDesc, COLOR_FORMAT, DEPTH_FORMAT, FALLBACK_COLOR_FORMAT};
