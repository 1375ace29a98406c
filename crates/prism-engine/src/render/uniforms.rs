//! Uniform byte layouts shared with `shaders/prism.wgsl`.
//!
//! Both blocks are 16 bytes so they satisfy uniform alignment on every backend.

use bytemuck::{Pod, Zeroable};

use crate::coords::Offset;
use crate::paint::Color;

/// Vertex-stage offset, `@group(0) @binding(0)`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct OffsetUniform {
    pub offset: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

/// Fragment-stage fill color, `@group(0) @binding(1)`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColorUniform {
    pub color: [f32; 4],
}

pub(crate) const OFFSET_BINDING: u32 = 0;
pub(crate) const COLOR_BINDING: u32 = 1;
pub(crate) const UNIFORM_BLOCK_SIZE: u64 = 16;

impl From<Offset> for OffsetUniform {
    #[inline]
    fn from(offset: Offset) -> Self {
        Self {
            offset: offset.vertex_bytes(),
            _pad: [0.0; 2],
        }
    }
}

impl From<Color> for ColorUniform {
    #[inline]
    fn from(color: Color) -> Self {
        Self { color: color.fragment_bytes() }
    }
}

/// Returns the `wgpu` minimum binding size shared by both uniform blocks.
pub(crate) fn uniform_min_binding_size() -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(UNIFORM_BLOCK_SIZE)
}
