use crate::geometry::PRIMITIVE_TOPOLOGY;

/// Stencil reference value bound alongside the depth/stencil state.
pub const STENCIL_REFERENCE: u32 = 1;

/// Rasterizer configuration.
///
/// wgpu has no standalone rasterizer object; this description is converted
/// into the `PrimitiveState` / `MultisampleState` of every pipeline built
/// against the device. Flags wgpu does not expose (scissor enable,
/// antialiased lines) are kept so the configuration stays inspectable; they
/// are always `false` here.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RasterizerState {
    /// Faces discarded before rasterization.
    pub cull_mode: Option<wgpu::Face>,

    /// Solid or wireframe fill.
    pub fill_mode: wgpu::PolygonMode,

    /// Winding treated as front facing.
    pub front_face: wgpu::FrontFace,

    /// Clip primitives against the depth range.
    pub depth_clip: bool,

    /// Constant / slope / clamp depth bias.
    pub depth_bias: wgpu::DepthBiasState,

    pub scissor_enabled: bool,
    pub multisample_enabled: bool,
    pub antialiased_lines: bool,
}

impl Default for RasterizerState {
    /// Back-face culling, solid fill, clockwise front faces, depth clip on.
    fn default() -> Self {
        Self {
            cull_mode: Some(wgpu::Face::Back),
            fill_mode: wgpu::PolygonMode::Fill,
            front_face: wgpu::FrontFace::Cw,
            depth_clip: true,
            depth_bias: wgpu::DepthBiasState {
                constant: 0,
                slope_scale: 0.0,
                clamp: 0.0,
            },
            scissor_enabled: false,
            multisample_enabled: false,
            antialiased_lines: false,
        }
    }
}

impl RasterizerState {
    pub fn primitive_state(&self) -> wgpu::PrimitiveState {
        wgpu::PrimitiveState {
            topology: PRIMITIVE_TOPOLOGY,
            strip_index_format: None,
            front_face: self.front_face,
            cull_mode: self.cull_mode,
            polygon_mode: self.fill_mode,
            unclipped_depth: !self.depth_clip,
            conservative: false,
        }
    }

    pub fn multisample_state(&self) -> wgpu::MultisampleState {
        wgpu::MultisampleState {
            count: if self.multisample_enabled { 4 } else { 1 },
            mask: !0,
            alpha_to_coverage_enabled: false,
        }
    }
}

/// Depth/stencil test configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DepthStencilDesc {
    pub depth_enabled: bool,
    pub depth_write_enabled: bool,
    pub depth_compare: wgpu::CompareFunction,

    pub stencil_enabled: bool,
    pub stencil_read_mask: u32,
    pub stencil_write_mask: u32,

    /// Stencil ops for front-facing pixels.
    pub front: wgpu::StencilFaceState,

    /// Stencil ops for back-facing pixels.
    pub back: wgpu::StencilFaceState,
}

impl Default for DepthStencilDesc {
    fn default() -> Self {
        Self {
            depth_enabled: true,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,

            stencil_enabled: true,
            stencil_read_mask: 0xFF,
            stencil_write_mask: 0xFF,

            front: wgpu::StencilFaceState {
                compare: wgpu::CompareFunction::Always,
                fail_op: wgpu::StencilOperation::Keep,
                depth_fail_op: wgpu::StencilOperation::IncrementWrap,
                pass_op: wgpu::StencilOperation::Keep,
            },
            back: wgpu::StencilFaceState {
                compare: wgpu::CompareFunction::Always,
                fail_op: wgpu::StencilOperation::Keep,
                depth_fail_op: wgpu::StencilOperation::DecrementWrap,
                pass_op: wgpu::StencilOperation::Keep,
            },
        }
    }
}

impl DepthStencilDesc {
    /// Builds the wgpu depth/stencil state for an attachment of `format`.
    ///
    /// Disabled tests map to `Always` compares and `Keep` ops so the
    /// attachment can stay bound without affecting output.
    pub fn to_wgpu(
        &self,
        format: wgpu::TextureFormat,
        bias: wgpu::DepthBiasState,
    ) -> wgpu::DepthStencilState {
        let stencil = if self.stencil_enabled {
            wgpu::StencilState {
                front: self.front,
                back: self.back,
                read_mask: self.stencil_read_mask,
                write_mask: self.stencil_write_mask,
            }
        } else {
            wgpu::StencilState::default()
        };

        let (depth_write_enabled, depth_compare) = if self.depth_enabled {
            (self.depth_write_enabled, self.depth_compare)
        } else {
            (false, wgpu::CompareFunction::Always)
        };

        wgpu::DepthStencilState {
            format,
            depth_write_enabled,
            depth_compare,
            stencil,
            bias,
        }
    }
}

/// Immutable rasterizer + depth/stencil pair used by every pipeline of a device.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct PipelineState {
    pub rasterizer: RasterizerState,
    pub depth_stencil: DepthStencilDesc,
}

impl PipelineState {
    /// Derives the fixed pipeline configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Depth/stencil state for pipelines targeting a `depth_format` attachment.
    pub fn depth_stencil_state(
        &self,
        depth_format: wgpu::TextureFormat,
    ) -> wgpu::DepthStencilState {
        self.depth_stencil.to_wgpu(depth_format, self.rasterizer.depth_bias)
    }
}
