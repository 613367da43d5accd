//! Prism engine crate.
//!
//! A minimal real-time 3D harness: a render device with its swap chain and
//! depth/stencil state, one static mesh, and a vertex/pixel shader pair,
//! driven once per frame by a winit runtime.

pub mod camera;
pub mod device;
pub mod geometry;
pub mod graphics;
pub mod input;
pub mod logging;
pub mod pipeline;
pub mod shader;
pub mod time;
pub mod window;
