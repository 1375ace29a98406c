//! Recording [`Backend`] double for renderer tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};

use crate::device::{check_request, DeviceResourceError, SurfaceErrorAction};
use crate::mesh::{BufferAllocator, GpuSubmesh};
use crate::paint::Color;

use super::{
    Backend, ColorUniform, DrawError, DrawPass, OffsetUniform, PipelineDesc, PipelineStateError,
    PurgeableState, Resources,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    AllocVertex { id: u32, len: usize },
    AllocIndex { id: u32, len: usize },
    CreatePipeline { id: u32, format: wgpu::TextureFormat, stride: u64 },
    CreateBindings { id: u32 },
    AcquireFrame,
    BeginPass { clear: [f32; 4] },
    Realize { pipeline: u32 },
    Purgeable { buffer: u32, state: PurgeableState },
    SetPipeline { pipeline: u32 },
    SetVertexBuffer { slot: u32, buffer: u32 },
    SetOffset { bindings: u32, offset: [f32; 2] },
    SetColor { bindings: u32, color: [f32; 4] },
    DrawIndexed { index_buffer: u32, count: u32 },
    Present,
    Discard,
}

pub(crate) struct MockResources;

impl Resources for MockResources {
    type Buffer = u32;
    type Pipeline = u32;
    type Bindings = u32;
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct MockFrame {
    pub drawable: bool,
}

#[derive(Default)]
pub(crate) struct RecordingBackend {
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u32>,
    max_alloc: Option<u64>,
    rejected_formats: Vec<wgpu::TextureFormat>,
    frames: VecDeque<Result<MockFrame, SurfaceErrorAction>>,
    failing_pipelines: HashSet<u32>,
    failing_draws: HashSet<u32>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            ..Default::default()
        }
    }

    /// Refuses buffers larger than `max` bytes.
    pub fn with_max_alloc(mut self, max: u64) -> Self {
        self.max_alloc = Some(max);
        self
    }

    pub fn with_rejected_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.rejected_formats.push(format);
        self
    }

    /// Queues the result of a future `acquire_frame`. Unscripted frames are drawable.
    pub fn script_frame(&mut self, frame: Result<MockFrame, SurfaceErrorAction>) {
        self.frames.push_back(frame);
    }

    pub fn fail_pipeline(&mut self, pipeline: u32) {
        self.failing_pipelines.insert(pipeline);
    }

    pub fn heal_pipeline(&mut self, pipeline: u32) {
        self.failing_pipelines.remove(&pipeline);
    }

    pub fn fail_draw(&mut self, index_buffer: u32) {
        self.failing_draws.insert(index_buffer);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn take_calls(&self) -> Vec<Call> {
        self.calls.take()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn id(&self) -> u32 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

pub(crate) struct RecordingAllocator<'a> {
    backend: &'a RecordingBackend,
}

impl RecordingAllocator<'_> {
    fn alloc(&self, label: &str, bytes: &[u8]) -> Result<u32, DeviceResourceError> {
        check_request(label, bytes.len() as u64, self.backend.max_alloc.unwrap_or(u64::MAX))?;
        Ok(self.backend.id())
    }
}

impl BufferAllocator for RecordingAllocator<'_> {
    type Buffer = u32;

    fn alloc_vertex(&mut self, label: &str, bytes: &[u8]) -> Result<u32, DeviceResourceError> {
        let id = self.alloc(label, bytes)?;
        self.backend.record(Call::AllocVertex { id, len: bytes.len() });
        Ok(id)
    }

    fn alloc_index(&mut self, label: &str, bytes: &[u8]) -> Result<u32, DeviceResourceError> {
        let id = self.alloc(label, bytes)?;
        self.backend.record(Call::AllocIndex { id, len: bytes.len() });
        Ok(id)
    }
}

pub(crate) struct RecordingPass<'f> {
    backend: &'f RecordingBackend,
}

impl DrawPass<MockResources> for RecordingPass<'_> {
    fn set_pipeline(&mut self, pipeline: &u32) {
        self.backend.record(Call::SetPipeline { pipeline: *pipeline });
    }

    fn set_vertex_buffer(&mut self, slot: u32, buffer: &u32) {
        self.backend.record(Call::SetVertexBuffer { slot, buffer: *buffer });
    }

    fn set_offset(&mut self, bindings: &u32, offset: OffsetUniform) {
        self.backend.record(Call::SetOffset { bindings: *bindings, offset: offset.offset });
    }

    fn set_color(&mut self, bindings: &u32, color: ColorUniform) {
        self.backend.record(Call::SetColor { bindings: *bindings, color: color.color });
    }

    fn draw_indexed(&mut self, submesh: &GpuSubmesh<u32>) -> Result<(), DrawError> {
        if submesh.index_count == 0 {
            return Err(DrawError::EmptySubmesh);
        }
        self.backend.record(Call::DrawIndexed {
            index_buffer: submesh.index_buffer,
            count: submesh.index_count,
        });
        if self.backend.failing_draws.contains(&submesh.index_buffer) {
            return Err(DrawError::Rejected(format!("index buffer {}", submesh.index_buffer)));
        }
        Ok(())
    }
}

impl Backend for RecordingBackend {
    type Res = MockResources;
    type Frame = MockFrame;
    type Allocator<'a> = RecordingAllocator<'a>;
    type Pass<'f> = RecordingPass<'f>;

    fn allocator(&mut self) -> RecordingAllocator<'_> {
        RecordingAllocator { backend: self }
    }

    fn create_pipeline(&mut self, desc: &PipelineDesc<'_>) -> Result<u32, PipelineStateError> {
        if self.rejected_formats.contains(&desc.format) {
            return Err(PipelineStateError::UnsupportedFormat(desc.format));
        }
        let id = self.id();
        self.record(Call::CreatePipeline { id, format: desc.format, stride: desc.layout.stride });
        Ok(id)
    }

    fn create_bindings(&mut self, _label: &str) -> Result<u32, DeviceResourceError> {
        let id = self.id();
        self.record(Call::CreateBindings { id });
        Ok(id)
    }

    fn acquire_frame(&mut self) -> Result<MockFrame, SurfaceErrorAction> {
        self.record(Call::AcquireFrame);
        self.frames.pop_front().unwrap_or(Ok(MockFrame { drawable: true }))
    }

    fn begin_pass<'f>(&'f self, _frame: &'f mut MockFrame, clear: Color) -> RecordingPass<'f> {
        self.record(Call::BeginPass { clear: clear.fragment_bytes() });
        RecordingPass { backend: self }
    }

    fn realize_pipeline<'p>(&self, pipeline: &'p u32) -> Result<&'p u32, PipelineStateError> {
        self.record(Call::Realize { pipeline: *pipeline });
        if self.failing_pipelines.contains(pipeline) {
            return Err(PipelineStateError::Unavailable { reason: format!("pipeline {pipeline} lost") });
        }
        Ok(pipeline)
    }

    fn set_purgeable(&self, buffer: &u32, state: PurgeableState) {
        self.record(Call::Purgeable { buffer: *buffer, state });
    }

    fn finish_frame(&mut self, frame: MockFrame) -> bool {
        if frame.drawable {
            self.record(Call::Present);
        } else {
            self.record(Call::Discard);
        }
        frame.drawable
    }
}
