//! Pipeline state derivation.
//!
//! Everything here is pure: the device layer feeds in the screen size, clip
//! planes and vsync flag, and gets back immutable descriptions:
//! - rasterizer + depth/stencil configuration (`PipelineState`)
//! - the full-window `Viewport`
//! - world / projection / orthographic matrices (`TransformSet`)
//!
//! Identical inputs always produce identical outputs.

mod state;
mod transform;
mod viewport;

pub use state::{DepthStencilDesc, PipelineState, RasterizerState, STENCIL_REFERENCE};
pub use transform::{TransformSet, FIELD_OF_VIEW};
pub use viewport::Viewport;
