use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Constant buffer contents shared with `color.vs.wgsl`.
///
/// Matrices are stored column by column, the layout WGSL `mat4x4<f32>`
/// expects.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MatrixBuffer {
    pub world: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl MatrixBuffer {
    pub const SIZE: u64 = std::mem::size_of::<MatrixBuffer>() as u64;

    pub fn new(world: Mat4, view: Mat4, projection: Mat4) -> Self {
        Self {
            world: world.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
        }
    }
}
