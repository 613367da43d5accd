#![allow(dead_code)]

use prism_engine::device::{DeviceError, DeviceParams, OutputTarget, RenderDevice};
use prism_engine::geometry::Mesh;
use prism_engine::graphics::{Graphics, GraphicsConfig, InitError};

pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// When set to `1`/`true`, a machine without a usable GPU fails the GPU
/// tests instead of skipping them.
pub const ENV_REQUIRE_GPU: &str = "PRISM_REQUIRE_GPU";

/// Whether `e` means this machine has no usable GPU rather than a bug.
fn unavailable(e: &DeviceError) -> bool {
    matches!(
        e,
        DeviceError::NoAdapter(_)
            | DeviceError::NoCompatibleDevice(_)
            | DeviceError::UnsupportedFeatureLevel { .. }
    )
}

fn gpu_required() -> bool {
    std::env::var(ENV_REQUIRE_GPU)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true"))
        .unwrap_or(false)
}

/// Skips the calling test, or fails it when a GPU is required.
fn skip(e: &DeviceError) {
    if gpu_required() {
        panic!("{ENV_REQUIRE_GPU} is set but no usable GPU was found: {e}");
    }
    eprintln!("skipping: {e}");
}

pub fn headless_device(params: DeviceParams) -> Option<RenderDevice<'static>> {
    match RenderDevice::headless(params) {
        Ok(device) => Some(device),
        Err(e) if unavailable(&e) => {
            skip(&e);
            None
        }
        Err(e) => panic!("device init failed: {e}"),
    }
}

/// Initializes `graphics` offscreen. `None` when the device is unavailable;
/// any other failure is handed back to the test.
pub fn init_offscreen(
    graphics: &mut Graphics<'static>,
    config: &GraphicsConfig,
    mesh: Mesh,
) -> Option<Result<(), InitError>> {
    match graphics.initialize_with(OutputTarget::Offscreen, config, mesh) {
        Err(InitError::Device(e)) if unavailable(&e) => {
            skip(&e);
            None
        }
        result => Some(result),
    }
}

pub fn headless_graphics(config: &GraphicsConfig, mesh: Mesh) -> Option<Graphics<'static>> {
    match Graphics::headless(config, mesh) {
        Ok(graphics) => Some(graphics),
        Err(InitError::Device(e)) if unavailable(&e) => {
            skip(&e);
            None
        }
        Err(e) => panic!("graphics init failed: {e}"),
    }
}

pub fn small_config(clear_color: [f32; 4]) -> GraphicsConfig {
    GraphicsConfig {
        width: 64,
        height: 64,
        vsync: false,
        clear_color,
        ..GraphicsConfig::default()
    }
}

pub fn assert_rgba_near(actual: [u8; 4], expected: [u8; 4]) {
    let close = actual
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| a.abs_diff(*e) <= 2);
    assert!(close, "pixel {actual:?}, expected {expected:?}");
}
