use glam::Mat4;

/// Vertical field of view of the perspective projection (45°).
pub const FIELD_OF_VIEW: f32 = std::f32::consts::FRAC_PI_4;

/// Device-owned matrices.
///
/// The view matrix is not part of the set: it belongs to the camera and is
/// supplied per frame.
///
/// All matrices are left-handed with a `[0, 1]` depth range, matching wgpu
/// clip space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransformSet {
    pub world: Mat4,
    pub projection: Mat4,
    pub ortho: Mat4,
}

impl TransformSet {
    /// Computes projection matrices for a `width` x `height` target.
    ///
    /// Callers validate the inputs (non-zero size, `0 < near < far`).
    pub fn new(width: u32, height: u32, screen_near: f32, screen_depth: f32) -> Self {
        let (w, h) = (width as f32, height as f32);
        let aspect = w / h;

        let projection = Mat4::perspective_lh(FIELD_OF_VIEW, aspect, screen_near, screen_depth);

        // Window-sized volume centred on the origin.
        let ortho = Mat4::orthographic_lh(
            -w * 0.5,
            w * 0.5,
            -h * 0.5,
            h * 0.5,
            screen_near,
            screen_depth,
        );

        Self {
            world: Mat4::IDENTITY,
            projection,
            ortho,
        }
    }
}
