use thiserror::Error;
use wgpu::util::DeviceExt;

use crate::device::FrameError;

use super::mesh::Mesh;
use super::INDEX_FORMAT;

/// Geometry upload failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("mesh has no vertices or no indices")]
    EmptyMesh,

    #[error("index count {index_count} is not a multiple of 3")]
    IncompleteTriangle { index_count: usize },

    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("geometry buffer is already initialized")]
    AlreadyInitialized,
}

/// One immutable vertex/index buffer pair.
///
/// Buffers have `VERTEX` / `INDEX` usage only: no CPU access and no further
/// writes after creation.
#[derive(Default)]
pub struct GeometryBuffer {
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,

    vertex_count: u32,
    index_count: u32,
}

impl GeometryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads `mesh` and drops the CPU-side arrays.
    pub fn initialize(&mut self, device: &wgpu::Device, mesh: Mesh) -> Result<(), GeometryError> {
        if self.vertex_buffer.is_some() || self.index_buffer.is_some() {
            return Err(GeometryError::AlreadyInitialized);
        }
        mesh.validate()?;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism vertex buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        self.vertex_buffer = Some(vertex_buffer);

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("prism index buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        self.index_buffer = Some(index_buffer);

        self.vertex_count = mesh.vertex_count() as u32;
        self.index_count = mesh.index_count() as u32;

        // Front faces are clockwise; the rest is culled by the rasterizer.
        let culled = (0..mesh.index_count() / 3)
            .filter(|&tri| mesh.signed_area(tri).is_some_and(|area| area > 0.0))
            .count();
        if culled > 0 {
            log::debug!("{culled} counter-clockwise triangles will be culled");
        }

        log::debug!(
            "geometry uploaded: {} vertices, {} indices",
            self.vertex_count,
            self.index_count
        );

        // GPU buffers are now the only copy.
        drop(mesh);
        Ok(())
    }

    /// Binds the vertex and index buffers for the next draw.
    ///
    /// Issues no draw; the shader program draws `index_count()` indices.
    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>) -> Result<(), FrameError> {
        let (Some(vertex_buffer), Some(index_buffer)) =
            (self.vertex_buffer.as_ref(), self.index_buffer.as_ref())
        else {
            return Err(FrameError::NotReady("geometry buffer"));
        };

        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        pass.set_index_buffer(index_buffer.slice(..), INDEX_FORMAT);
        Ok(())
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn is_initialized(&self) -> bool {
        self.vertex_buffer.is_some() && self.index_buffer.is_some()
    }

    /// Releases the index buffer, then the vertex buffer.
    ///
    /// No-op for buffers that were never created.
    pub fn shutdown(&mut self) {
        if let Some(index_buffer) = self.index_buffer.take() {
            index_buffer.destroy();
        }
        if let Some(vertex_buffer) = self.vertex_buffer.take() {
            vertex_buffer.destroy();
        }
        self.index_count = 0;
        self.vertex_count = 0;
    }
}

impl Drop for GeometryBuffer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shutdown_without_initialize_is_noop() {
        let mut g = GeometryBuffer::new();
        g.shutdown();
        g.shutdown();
        assert!(!g.is_initialized());
        assert_eq!(g.index_count(), 0);
    }
}
