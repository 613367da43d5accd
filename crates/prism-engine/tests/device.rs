mod common;

use glam::Mat4;
use prism_engine::device::{DeviceParams, FrameError, RefreshRate, DEPTH_FORMAT};
use prism_engine::pipeline::Viewport;

use common::{assert_rgba_near, headless_device};

fn params(width: u32, height: u32, vsync: bool) -> DeviceParams {
    DeviceParams {
        width,
        height,
        vsync,
        ..DeviceParams::default()
    }
}

#[test]
fn viewport_covers_the_target() {
    let Some(device) = headless_device(params(320, 200, true)) else {
        return;
    };

    assert!(device.is_initialized());
    assert_eq!(device.viewport(), Some(Viewport::full(320, 200)));

    let viewport = device.viewport().unwrap();
    assert_eq!((viewport.min_depth, viewport.max_depth), (0.0, 1.0));
}

#[test]
fn projection_uses_the_target_aspect() {
    let Some(device) = headless_device(params(800, 600, true)) else {
        return;
    };

    let p = device.projection_matrix().unwrap();
    let ratio = p.y_axis.y / p.x_axis.x;
    assert!((ratio - 800.0 / 600.0).abs() < 1e-5);

    let focal = 1.0 / (std::f32::consts::FRAC_PI_4 * 0.5).tan();
    assert!((p.y_axis.y - focal).abs() < 1e-5);

    assert_eq!(device.world_matrix(), Some(Mat4::IDENTITY));
    assert!(device.ortho_matrix().is_some());
}

#[test]
fn swap_chain_follows_vsync() {
    let Some(vsync_on) = headless_device(params(64, 64, true)) else {
        return;
    };
    let desc = vsync_on.swap_chain_desc().unwrap();
    assert_eq!(desc.present_mode, wgpu::PresentMode::Fifo);
    assert_eq!(desc.refresh_rate, RefreshRate::DEFAULT);
    assert_eq!(desc.buffer_count, 1);
    drop(vsync_on);

    let Some(vsync_off) = headless_device(params(64, 64, false)) else {
        return;
    };
    let desc = vsync_off.swap_chain_desc().unwrap();
    assert_eq!(desc.present_mode, wgpu::PresentMode::AutoNoVsync);
    assert_eq!(desc.refresh_rate, RefreshRate::UNCAPPED);
}

#[test]
fn pipeline_state_and_formats_are_exposed() {
    let Some(device) = headless_device(params(64, 64, false)) else {
        return;
    };

    let state = device.pipeline_state().unwrap();
    assert_eq!(state.rasterizer.cull_mode, Some(wgpu::Face::Back));
    assert_eq!(device.depth_format(), DEPTH_FORMAT);
    assert!(device.color_format().is_some());

    let info = device.video_card_info().unwrap();
    assert!(!info.name.is_empty() || info.is_software());
}

#[test]
fn clear_writes_the_requested_color() {
    let Some(device) = headless_device(params(64, 48, false)) else {
        return;
    };

    let frame = device.begin_frame(1.0, 0.0, 0.0, 1.0).unwrap();
    device.end_frame(frame).unwrap();

    let pixels = device.read_back_target().unwrap();
    assert_eq!((pixels.width, pixels.height), (64, 48));
    assert_eq!(pixels.data.len(), 64 * 48 * 4);
    assert_rgba_near(pixels.pixel(0, 0).unwrap(), [255, 0, 0, 255]);
    assert_rgba_near(pixels.pixel(63, 47).unwrap(), [255, 0, 0, 255]);
}

#[test]
fn shutdown_is_idempotent_and_final() {
    let Some(mut device) = headless_device(params(64, 64, false)) else {
        return;
    };

    device.shutdown();
    device.shutdown();

    assert!(!device.is_initialized());
    assert!(device.get_device().is_err());
    assert!(device.viewport().is_none());
    assert!(matches!(device.begin_frame(0.0, 0.0, 0.0, 1.0), Err(FrameError::NotInitialized)));
}

#[test]
fn second_initialize_is_rejected() {
    use prism_engine::device::{DeviceError, OutputTarget};

    let Some(mut device) = headless_device(params(64, 64, false)) else {
        return;
    };
    assert!(matches!(
        device.initialize(OutputTarget::Offscreen, params(64, 64, false)),
        Err(DeviceError::AlreadyInitialized)
    ));
    assert!(device.is_initialized());
}
