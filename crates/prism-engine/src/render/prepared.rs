use crate::mesh::{GpuMesh, MeshData};
use crate::scene::{Primitive, Scene};

use super::{Backend, PipelineDesc, Resources, SetupError};

/// A primitive together with its GPU resources.
pub struct PreparedPrimitive<R: Resources> {
    pub primitive: Primitive,
    pub mesh: GpuMesh<R::Buffer>,
    pub pipeline: R::Pipeline,
    pub bindings: R::Bindings,
}

/// A scene whose primitives all have meshes and pipeline states.
///
/// Built once by [`prepare_scene`] and reused for every frame.
pub struct PreparedScene<R: Resources> {
    primitives: Vec<PreparedPrimitive<R>>,
    format: wgpu::TextureFormat,
}

impl<R: Resources> PreparedScene<R> {
    #[inline]
    pub fn primitives(&self) -> &[PreparedPrimitive<R>] {
        &self.primitives
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Pixel format the pipelines were built for.
    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

/// Builds meshes, pipeline states and uniform slots for every primitive.
///
/// Primitives are processed in scene order. The first failure aborts setup and
/// drops everything built so far.
pub fn prepare_scene<B: Backend>(
    backend: &mut B,
    scene: Scene,
    format: wgpu::TextureFormat,
) -> Result<PreparedScene<B::Res>, SetupError> {
    log::info!("preparing scene: {} primitives, target {format:?}", scene.len());

    let mut primitives = Vec::with_capacity(scene.len());

    for (index, primitive) in scene.into_primitives().into_iter().enumerate() {
        let kind = primitive.kind();
        let data = MeshData::build(kind, primitive.size());

        let mesh = {
            let mut allocator = backend.allocator();
            GpuMesh::upload(&data, &mut allocator)
        }
        .map_err(|source| SetupError::Mesh { index, kind, source })?;

        let label = format!("prism {kind} #{index}");
        let pipeline = backend
            .create_pipeline(&PipelineDesc {
                label: &label,
                layout: &mesh.layout,
                topology: mesh.topology,
                format,
            })
            .map_err(|source| SetupError::Pipeline { index, kind, source })?;

        let bindings = backend
            .create_bindings(&label)
            .map_err(|source| SetupError::Bindings { index, kind, source })?;

        log::debug!(
            "primitive #{index}: {kind} size {} -> {} vertices, {} submeshes, {} indices",
            primitive.size(),
            mesh.vertex_count,
            mesh.submeshes.len(),
            data.index_count(),
        );

        primitives.push(PreparedPrimitive {
            primitive,
            mesh,
            pipeline,
            bindings,
        });
    }

    Ok(PreparedScene { primitives, format })
}
