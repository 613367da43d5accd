//! Vertex/pixel shader program.
//!
//! WGSL sources are validated with naga before any GPU object is created, so
//! a bad shader surfaces as a [`ShaderError::Compile`] carrying the compiler
//! report instead of a device error. Pipeline creation runs inside a
//! validation error scope, so a pair that does not link surfaces as
//! [`ShaderError::Link`].

mod error;
mod matrix_buffer;
mod program;
mod source;
mod validate;

pub use error::ShaderError;
pub use matrix_buffer::MatrixBuffer;
pub use program::ShaderProgram;
pub use source::{load_source, ShaderPaths, PIXEL_ENTRY, VERTEX_ENTRY};
pub use validate::validate_wgsl;
