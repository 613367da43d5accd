//! Static geometry.
//!
//! A `Mesh` is CPU-side vertex/index data. `GeometryBuffer` uploads it once
//! into immutable GPU buffers and drops the CPU copy; after that the GPU
//! buffers are the only copy.
//!
//! Winding convention: front faces are clockwise as seen by the viewer.
//! Counter-clockwise triangles are culled.

mod buffer;
mod mesh;
mod vertex;

pub use buffer::{GeometryBuffer, GeometryError};
pub use mesh::Mesh;
pub use vertex::ColorVertex;

/// Topology of every primitive list drawn by this crate.
pub const PRIMITIVE_TOPOLOGY: wgpu::PrimitiveTopology = wgpu::PrimitiveTopology::TriangleList;

/// Index element type of the index buffer.
pub const INDEX_FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint32;
