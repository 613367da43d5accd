//! Frame driver tying the device, camera, geometry and shader together.

mod config;
mod driver;
mod error;

pub use config::{GraphicsConfig, ENV_FULLSCREEN, ENV_VSYNC, SCREEN_DEPTH, SCREEN_NEAR};
pub use driver::Graphics;
pub use error::InitError;
