use thiserror::Error;

use crate::device::DeviceError;
use crate::geometry::GeometryError;
use crate::shader::ShaderError;

/// Failure while bringing up the frame driver.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("could not initialize the render device: {0}")]
    Device(#[from] DeviceError),

    #[error("could not initialize the geometry buffer: {0}")]
    Geometry(#[from] GeometryError),

    #[error("could not initialize the shader program: {0}")]
    Shader(#[from] ShaderError),
}
