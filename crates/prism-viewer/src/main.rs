use std::process::ExitCode;

use prism_engine::graphics::GraphicsConfig;
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::window::{RunOutcome, Runtime, RuntimeConfig};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "Prism".to_string(),
        graphics: GraphicsConfig::from_env(),
        ..RuntimeConfig::default()
    };
    log::info!(
        "starting {}x{}, vsync {}, fullscreen {}",
        config.graphics.width,
        config.graphics.height,
        config.graphics.vsync,
        config.graphics.fullscreen
    );

    let result = Runtime::run(config);
    match &result {
        Ok(RunOutcome::Requested) => log::info!("shut down"),
        Ok(RunOutcome::FrameFailed) => log::warn!("shut down after a frame failure"),
        Ok(RunOutcome::StartupFailed) => log::warn!("shut down after a failed startup"),
        Err(e) => log::error!("{e:#}"),
    }
    ExitCode::from(exit_status(&result))
}

/// Process status: 0 for any orderly shutdown, including a failed
/// initialization, and -1 (255) when the platform loop never came up.
fn exit_status<E>(result: &Result<RunOutcome, E>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 255,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_startup_still_exits_cleanly() {
        let ok: Result<RunOutcome, ()> = Ok(RunOutcome::StartupFailed);
        assert_eq!(exit_status(&ok), 0);
        assert_eq!(exit_status::<()>(&Ok(RunOutcome::FrameFailed)), 0);
        assert_eq!(exit_status::<()>(&Ok(RunOutcome::Requested)), 0);
    }

    #[test]
    fn platform_failure_maps_to_minus_one() {
        assert_eq!(exit_status(&Err("no event loop")), 255);
    }
}
