use crate::pipeline::Viewport;

use super::DeviceError;

/// Initialization parameters for the render device.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DeviceParams {
    /// Client area width in physical pixels.
    pub width: u32,

    /// Client area height in physical pixels.
    pub height: u32,

    /// Lock presentation to the display refresh.
    pub vsync: bool,

    /// Exclusive fullscreen swap chain.
    pub fullscreen: bool,

    /// Far clip plane.
    pub screen_depth: f32,

    /// Near clip plane.
    pub screen_near: f32,
}

impl Default for DeviceParams {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            vsync: true,
            fullscreen: false,
            screen_depth: 1000.0,
            screen_near: 0.1,
        }
    }
}

impl DeviceParams {
    pub fn validate(&self) -> Result<(), DeviceError> {
        if !Viewport::full(self.width, self.height).is_valid() {
            return Err(DeviceError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }

        let (near, far) = (self.screen_near, self.screen_depth);
        if !(near.is_finite() && far.is_finite() && near > 0.0 && far > near) {
            return Err(DeviceError::InvalidClipPlanes { near, far });
        }
        Ok(())
    }
}

/// The single capability tier requested from the adapter.
///
/// There is no fallback: an adapter that cannot provide this tier fails
/// initialization.
#[derive(Debug, Clone)]
pub struct FeatureLevel {
    pub features: wgpu::Features,
    pub limits: wgpu::Limits,
}

impl Default for FeatureLevel {
    fn default() -> Self {
        Self {
            features: wgpu::Features::empty(),
            limits: wgpu::Limits::default(),
        }
    }
}

impl FeatureLevel {
    /// Whether `adapter` can provide this tier.
    pub fn supported_by(&self, adapter: &wgpu::Adapter) -> bool {
        adapter.features().contains(self.features)
            && adapter.get_downlevel_capabilities().is_webgpu_compliant()
            && self.limits.check_limits(&adapter.limits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(DeviceParams::default().validate().is_ok());
    }

    #[test]
    fn zero_size_is_rejected() {
        let p = DeviceParams {
            width: 0,
            ..DeviceParams::default()
        };
        assert!(matches!(
            p.validate(),
            Err(DeviceError::InvalidSize { width: 0, height: 600 })
        ));
    }

    #[test]
    fn clip_planes_must_be_ordered_and_positive() {
        let planes = [
            (0.0, 1000.0),
            (-1.0, 10.0),
            (10.0, 10.0),
            (5.0, 1.0),
            (0.1, f32::INFINITY),
        ];
        for (near, far) in planes {
            let p = DeviceParams {
                screen_near: near,
                screen_depth: far,
                ..DeviceParams::default()
            };
            assert!(
                matches!(p.validate(), Err(DeviceError::InvalidClipPlanes { .. })),
                "near={near} far={far}"
            );
        }
    }
}
