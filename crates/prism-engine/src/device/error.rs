use thiserror::Error;

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

/// Environment / hardware failures raised while initializing a device.
///
/// All of these are fatal to `RenderDevice::initialize`; nothing is retried.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("render device is already initialized")]
    AlreadyInitialized,

    #[error("invalid screen size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("invalid clip planes: near {near}, far {far}")]
    InvalidClipPlanes { near: f32, far: f32 },

    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no display adapter available: {0}")]
    NoAdapter(String),

    #[error("window has no display output")]
    NoOutput,

    #[error("adapter '{adapter}' does not meet the required feature level")]
    UnsupportedFeatureLevel { adapter: String },

    #[error("no compatible device: {0}")]
    NoCompatibleDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface supports no usable color format")]
    UnsupportedColorFormat,

    #[error("render device is not initialized")]
    NotInitialized,

    #[error("render target read-back failed: {0}")]
    Readback(String),
}

/// Per-frame failures.
///
/// A frame failure ends the frame loop, except surface errors whose action is
/// not [`SurfaceErrorAction::Fatal`].
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("render device is not initialized")]
    NotInitialized,

    #[error("{0} is not initialized")]
    NotReady(&'static str),

    #[error("failed to acquire back buffer ({action:?}): {error}")]
    Surface {
        error: wgpu::SurfaceError,
        action: SurfaceErrorAction,
    },

    #[error("failed to update constant buffer: {0}")]
    ConstantBuffer(String),
}

impl FrameError {
    /// Whether the frame loop must stop.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            FrameError::Surface {
                action: SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame,
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_recoverable_surface_errors_are_non_fatal() {
        let skip = FrameError::Surface {
            error: wgpu::SurfaceError::Timeout,
            action: SurfaceErrorAction::SkipFrame,
        };
        let lost = FrameError::Surface {
            error: wgpu::SurfaceError::Lost,
            action: SurfaceErrorAction::Reconfigured,
        };
        let oom = FrameError::Surface {
            error: wgpu::SurfaceError::OutOfMemory,
            action: SurfaceErrorAction::Fatal,
        };

        assert!(!skip.is_fatal());
        assert!(!lost.is_fatal());
        assert!(oom.is_fatal());
        assert!(FrameError::ConstantBuffer("x".into()).is_fatal());
        assert!(FrameError::NotInitialized.is_fatal());
    }
}
