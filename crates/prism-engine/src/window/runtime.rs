use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::graphics::{Graphics, GraphicsConfig};
use crate::input::platform::translate_window_event;
use crate::input::{vk, KeyTable};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub graphics: GraphicsConfig,

    /// How often frame pacing is logged at `debug`.
    pub stats_period: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "prism".to_string(),
            graphics: GraphicsConfig::default(),
            stats_period: Duration::from_secs(5),
        }
    }
}

/// How a run ended once the event loop was up.
///
/// Every variant is an orderly shutdown: whatever was initialized has been
/// released before [`Runtime::run`] returns.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Escape was pressed or the window was closed.
    Requested,

    /// A frame failed with a fatal error.
    FrameFailed,

    /// The window or its graphics could not be initialized; no frame ran.
    StartupFailed,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives frames until Escape, close, or a fatal
    /// frame error.
    ///
    /// Errors are reserved for the platform itself (the event loop cannot be
    /// created or aborts). A failed window or graphics startup is logged,
    /// shut down and reported as [`RunOutcome::StartupFailed`].
    pub fn run(config: RuntimeConfig) -> Result<RunOutcome> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(state.outcome())
    }
}

#[self_referencing]
struct WindowEntry {
    keys: KeyTable,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    graphics: Graphics<'this>,
}

struct AppState {
    config: RuntimeConfig,
    windows: HashMap<WindowId, WindowEntry>,
    started: bool,
    exit_requested: bool,
    outcome: Option<RunOutcome>,
}

impl AppState {
    fn new(config: RuntimeConfig) -> Self {
        Self {
            config,
            windows: HashMap::new(),
            started: false,
            exit_requested: false,
            outcome: None,
        }
    }

    /// Stops the loop; the first reason recorded wins.
    fn finish(&mut self, outcome: RunOutcome) {
        self.outcome.get_or_insert(outcome);
        self.exit_requested = true;
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop, outcome: RunOutcome) {
        self.finish(outcome);
        event_loop.exit();
    }

    fn fail_startup(&mut self, e: &anyhow::Error) {
        log::error!("startup failed: {e:#}");
        self.finish(RunOutcome::StartupFailed);
    }

    fn outcome(&self) -> RunOutcome {
        self.outcome.unwrap_or(RunOutcome::Requested)
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowId> {
        let mut graphics_config = self.config.graphics.clone();

        let monitor_size = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
            .map(|m| m.size());

        // Fullscreen covers the whole monitor; windowed is centred on it.
        let mut attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_resizable(false);
        match monitor_size {
            Some(size) if graphics_config.fullscreen => {
                graphics_config.width = size.width;
                graphics_config.height = size.height;
                attrs = attrs
                    .with_inner_size(size)
                    .with_position(PhysicalPosition::new(0, 0))
                    .with_decorations(false);
            }
            Some(size) => {
                let (width, height) = (graphics_config.width, graphics_config.height);
                attrs = attrs
                    .with_inner_size(PhysicalSize::new(width, height))
                    .with_position(centred(size, width, height));
            }
            None => {
                let (width, height) = (graphics_config.width, graphics_config.height);
                attrs = attrs.with_inner_size(PhysicalSize::new(width, height));
            }
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        window.set_cursor_visible(false);

        let id = window.id();

        let entry = WindowEntryTryBuilder {
            keys: KeyTable::new(),
            clock: FrameClock::new(),
            window,
            graphics_builder: |w| {
                let mut graphics = Graphics::new();
                graphics.initialize(w, &graphics_config).map(move |()| graphics)
            },
        }
        .try_build()
        .context("could not initialize graphics")?;

        entry.with_graphics(|g| {
            let device = g.device();
            log::info!(
                "window ready: vsync {}, fullscreen {}",
                device.vsync_enabled(),
                device.is_fullscreen()
            );
        });

        self.windows.insert(id, entry);
        Ok(id)
    }

    fn destroy_window_entry(&mut self, id: WindowId) {
        // Graphics shuts down before the window it borrows is dropped.
        if let Some(mut entry) = self.windows.remove(&id) {
            entry.with_graphics_mut(|g| g.shutdown());
            entry.with_window(|w| w.set_cursor_visible(true));
        }
    }

    /// Runs one frame. Returns the reason to stop, if any.
    fn frame(&mut self, id: WindowId) -> Option<RunOutcome> {
        let stats_period = self.config.stats_period;
        let entry = self.windows.get_mut(&id)?;

        entry.with_mut(|fields| {
            if fields.keys.is_key_down(vk::ESCAPE) {
                log::info!("escape pressed, exiting");
                return Some(RunOutcome::Requested);
            }

            if let Err(e) = fields.graphics.frame() {
                if e.is_fatal() {
                    log::error!("frame failed: {e}");
                    return Some(RunOutcome::FrameFailed);
                }
                log::debug!("frame skipped: {e}");
                return None;
            }

            fields.clock.tick();
            if let Some(stats) = fields.clock.take_stats(stats_period) {
                log::debug!(
                    "{} frames, {:.1} fps, interval min {:?} max {:?}",
                    stats.frames,
                    stats.rate().unwrap_or(0.0),
                    stats.min.unwrap_or_default(),
                    stats.max.unwrap_or_default()
                );
            }
            None
        })
    }
}

fn centred(monitor: PhysicalSize<u32>, width: u32, height: u32) -> PhysicalPosition<i32> {
    let x = (monitor.width as i32 - width as i32) / 2;
    let y = (monitor.height as i32 - height as i32) / 2;
    PhysicalPosition::new(x.max(0), y.max(0))
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;

        match self.create_window_entry(event_loop) {
            Ok(id) => {
                if let Some(entry) = self.windows.get(&id) {
                    entry.with_window(|w| w.request_redraw());
                }
            }
            Err(e) => {
                self.fail_startup(&e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Render continuously; vsync, when on, paces the loop.
        event_loop.set_control_flow(ControlFlow::Poll);
        for entry in self.windows.values() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.windows.get_mut(&window_id) else {
            return;
        };

        if let Some(ev) = translate_window_event(&event) {
            entry.with_keys_mut(|keys| keys.apply_event(ev));
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.destroy_window_entry(window_id);
                self.request_exit(event_loop, RunOutcome::Requested);
            }

            WindowEvent::RedrawRequested => {
                if let Some(outcome) = self.frame(window_id) {
                    self.destroy_window_entry(window_id);
                    self.request_exit(event_loop, outcome);
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        let ids: Vec<WindowId> = self.windows.keys().copied().collect();
        for id in ids {
            self.destroy_window_entry(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_centred_on_the_monitor() {
        let p = centred(PhysicalSize::new(1920, 1080), 800, 600);
        assert_eq!(p, PhysicalPosition::new(560, 240));
    }

    #[test]
    fn oversized_windows_stick_to_the_corner() {
        let p = centred(PhysicalSize::new(640, 480), 800, 600);
        assert_eq!(p, PhysicalPosition::new(0, 0));
    }

    #[test]
    fn default_config_matches_graphics_defaults() {
        let c = RuntimeConfig::default();
        assert_eq!(c.graphics, GraphicsConfig::default());
        assert_eq!(c.title, "prism");
    }

    #[test]
    fn failed_startup_is_an_orderly_outcome() {
        let mut state = AppState::new(RuntimeConfig::default());
        state.fail_startup(&anyhow::anyhow!("no compatible adapter"));

        assert!(state.exit_requested);
        assert!(state.windows.is_empty());
        assert_eq!(state.outcome(), RunOutcome::StartupFailed);
    }

    #[test]
    fn first_exit_reason_is_kept() {
        let mut state = AppState::new(RuntimeConfig::default());
        assert_eq!(state.outcome(), RunOutcome::Requested);

        state.finish(RunOutcome::FrameFailed);
        state.finish(RunOutcome::Requested);
        assert_eq!(state.outcome(), RunOutcome::FrameFailed);
    }
}
