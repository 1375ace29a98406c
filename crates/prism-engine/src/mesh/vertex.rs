use bytemuck::{Pod, Zeroable};

/// Interleaved mesh vertex (24 bytes):
///
///  offset  0  position  [f32; 3]   loc 0
///  offset 12  normal    [f32; 3]   loc 1
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3  // normal
    ];

    #[inline]
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    /// Vertex layout describing this type.
    pub fn layout() -> VertexLayout {
        VertexLayout {
            stride: std::mem::size_of::<MeshVertex>() as u64,
            attributes: Self::ATTRS.to_vec(),
        }
    }
}

/// Owned description of a mesh's vertex buffer layout.
///
/// Pipeline states are derived from this, so a mesh and the pipeline drawing it
/// always agree on attribute locations.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexLayout {
    pub stride: u64,
    pub attributes: Vec<wgpu::VertexAttribute>,
}

impl VertexLayout {
    /// Borrowed wgpu layout for pipeline creation.
    pub fn as_wgpu(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.attributes,
        }
    }
}
