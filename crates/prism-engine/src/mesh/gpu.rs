use crate::device::DeviceResourceError;

use super::{MeshData, ShapeKind, VertexLayout};

/// Allocates GPU-visible buffers for mesh data.
///
/// Implementations own the device handle; meshes only see opaque buffers.
pub trait BufferAllocator {
    type Buffer;

    fn alloc_vertex(&mut self, label: &str, bytes: &[u8]) -> Result<Self::Buffer, DeviceResourceError>;

    fn alloc_index(&mut self, label: &str, bytes: &[u8]) -> Result<Self::Buffer, DeviceResourceError>;
}

/// One indexed draw range of a GPU mesh.
#[derive(Debug)]
pub struct GpuSubmesh<B> {
    pub index_buffer: B,
    pub index_count: u32,
    pub index_format: wgpu::IndexFormat,
}

/// Mesh uploaded to the device.
///
/// Built once during scene setup and never modified afterwards.
#[derive(Debug)]
pub struct GpuMesh<B> {
    pub kind: ShapeKind,
    pub vertex_buffer: B,
    pub vertex_count: u32,
    pub submeshes: Vec<GpuSubmesh<B>>,
    pub layout: VertexLayout,
    pub topology: wgpu::PrimitiveTopology,
}

impl<B> GpuMesh<B> {
    /// Uploads `data` through `allocator`.
    ///
    /// The first failed allocation aborts the upload; buffers allocated before
    /// it are dropped.
    pub fn upload<A>(data: &MeshData, allocator: &mut A) -> Result<Self, DeviceResourceError>
    where
        A: BufferAllocator<Buffer = B>,
    {
        let kind = data.kind;
        let vertex_buffer = allocator.alloc_vertex(&format!("prism {kind} vbo"), data.vertex_bytes())?;

        let submeshes = data
            .submeshes
            .iter()
            .map(|sub| {
                let label = format!("prism {kind} {} ibo", sub.name);
                let index_buffer = allocator.alloc_index(&label, bytemuck::cast_slice(&sub.indices))?;
                Ok(GpuSubmesh {
                    index_buffer,
                    index_count: sub.index_count(),
                    index_format: wgpu::IndexFormat::Uint16,
                })
            })
            .collect::<Result<Vec<_>, DeviceResourceError>>()?;

        Ok(Self {
            kind,
            vertex_buffer,
            vertex_count: data.vertices.len() as u32,
            submeshes,
            layout: data.layout(),
            topology: data.topology,
        })
    }
}
