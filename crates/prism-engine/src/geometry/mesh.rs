use super::buffer::GeometryError;
use super::vertex::ColorVertex;

const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

/// CPU-side primitive list.
///
/// Consumed by [`GeometryBuffer::initialize`](super::GeometryBuffer::initialize);
/// the arrays are freed once uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<ColorVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<ColorVertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// The fixed primitive: one green triangle, clockwise from bottom-left.
    pub fn triangle() -> Self {
        Self::new(
            vec![
                ColorVertex::new([-1.0, -1.0, 0.0], GREEN),
                ColorVertex::new([0.0, 1.0, 0.0], GREEN),
                ColorVertex::new([1.0, -1.0, 0.0], GREEN),
            ],
            vec![0, 1, 2],
        )
    }

    /// Axis-aligned square of side `size` centred on the origin at `z = 0`.
    ///
    /// Two clockwise triangles.
    pub fn square(size: f32, color: [f32; 4]) -> Self {
        let h = size * 0.5;
        Self::new(
            vec![
                ColorVertex::new([-h, -h, 0.0], color),
                ColorVertex::new([-h, h, 0.0], color),
                ColorVertex::new([h, h, 0.0], color),
                ColorVertex::new([h, -h, 0.0], color),
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Checks the list is drawable as a triangle list.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.vertices.is_empty() || self.indices.is_empty() {
            return Err(GeometryError::EmptyMesh);
        }
        if self.indices.len() % 3 != 0 {
            return Err(GeometryError::IncompleteTriangle {
                index_count: self.indices.len(),
            });
        }
        let vertex_count = self.vertices.len();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(GeometryError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
        Ok(())
    }

    /// Signed screen-space winding of triangle `tri` (x/y only, +Y up).
    ///
    /// Negative is clockwise, positive counter-clockwise.
    pub fn signed_area(&self, tri: usize) -> Option<f32> {
        let idx = self.indices.get(tri * 3..tri * 3 + 3)?;
        let p = |i: u32| self.vertices.get(i as usize).map(|v| v.position);
        let (a, b, c) = (p(idx[0])?, p(idx[1])?, p(idx[2])?);
        Some(0.5 * ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])))
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::triangle()
    }
}
