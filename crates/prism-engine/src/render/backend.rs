use crate::device::{DeviceResourceError, SurfaceErrorAction};
use crate::mesh::{BufferAllocator, GpuSubmesh, VertexLayout};
use crate::paint::Color;

use super::{ColorUniform, DrawError, OffsetUniform, PipelineStateError};

/// GPU resource types of a backend.
///
/// Split from [`Backend`] so prepared scenes can be stored without naming the
/// (borrowing) backend type itself.
pub trait Resources {
    type Buffer;
    type Pipeline;
    /// Per-primitive uniform slot (offset + color).
    type Bindings;
}

pub type BufferOf<B> = <<B as Backend>::Res as Resources>::Buffer;
pub type PipelineOf<B> = <<B as Backend>::Res as Resources>::Pipeline;
pub type BindingsOf<B> = <<B as Backend>::Res as Resources>::Bindings;

/// GPU memory retention hint for a buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PurgeableState {
    /// Contents must survive memory pressure.
    NonPurgeable,
    /// Contents may be discarded by the system.
    Purgeable,
}

/// Inputs for one pipeline state.
#[derive(Debug, Clone)]
pub struct PipelineDesc<'a> {
    pub label: &'a str,
    pub layout: &'a VertexLayout,
    pub topology: wgpu::PrimitiveTopology,
    pub format: wgpu::TextureFormat,
}

/// Recording interface for one render pass.
pub trait DrawPass<R: Resources> {
    fn set_pipeline(&mut self, pipeline: &R::Pipeline);

    fn set_vertex_buffer(&mut self, slot: u32, buffer: &R::Buffer);

    fn set_offset(&mut self, bindings: &R::Bindings, offset: OffsetUniform);

    fn set_color(&mut self, bindings: &R::Bindings, color: ColorUniform);

    /// Records one indexed draw of `submesh` using the bound vertex buffer.
    fn draw_indexed(&mut self, submesh: &GpuSubmesh<R::Buffer>) -> Result<(), DrawError>;
}

/// The device-facing side of scene setup and the frame loop.
pub trait Backend {
    type Res: Resources;

    /// Acquired frame: render target plus, when available, a drawable to present.
    type Frame;

    type Allocator<'a>: BufferAllocator<Buffer = BufferOf<Self>>
    where
        Self: 'a;

    type Pass<'f>: DrawPass<Self::Res>
    where
        Self: 'f;

    fn allocator(&mut self) -> Self::Allocator<'_>;

    fn create_pipeline(&mut self, desc: &PipelineDesc<'_>) -> Result<PipelineOf<Self>, PipelineStateError>;

    fn create_bindings(&mut self, label: &str) -> Result<BindingsOf<Self>, DeviceResourceError>;

    /// Acquires the next frame. Any `Err` means no frame this refresh.
    fn acquire_frame(&mut self) -> Result<Self::Frame, SurfaceErrorAction>;

    /// Opens the frame's render pass, clearing the target to `clear`.
    fn begin_pass<'f>(&'f self, frame: &'f mut Self::Frame, clear: Color) -> Self::Pass<'f>;

    /// Confirms `pipeline` is usable for the current frame.
    fn realize_pipeline<'p>(
        &self,
        pipeline: &'p PipelineOf<Self>,
    ) -> Result<&'p PipelineOf<Self>, PipelineStateError>;

    /// Applies a retention hint. Backends without purgeable memory ignore it.
    fn set_purgeable(&self, buffer: &BufferOf<Self>, state: PurgeableState);

    /// Submits the frame. Returns `true` if a drawable was presented; without one
    /// nothing is submitted.
    fn finish_frame(&mut self, frame: Self::Frame) -> bool;
}
