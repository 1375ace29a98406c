use crate::mesh::GpuSubmesh;
use crate::render::{ColorUniform, DrawError, DrawPass, OffsetUniform};

use super::{WgpuBindings, WgpuResources};

/// Render pass over the frame's surface view.
pub struct WgpuPass<'f> {
    pub(super) rpass: wgpu::RenderPass<'f>,
    pub(super) queue: &'f wgpu::Queue,
}

impl DrawPass<WgpuResources> for WgpuPass<'_> {
    fn set_pipeline(&mut self, pipeline: &wgpu::RenderPipeline) {
        self.rpass.set_pipeline(pipeline);
    }

    fn set_vertex_buffer(&mut self, slot: u32, buffer: &wgpu::Buffer) {
        self.rpass.set_vertex_buffer(slot, buffer.slice(..));
    }

    // Uniform writes are staged on the queue and land before this frame's
    // commands execute. Each primitive owns its buffers, so writes never alias.
    fn set_offset(&mut self, bindings: &WgpuBindings, offset: OffsetUniform) {
        self.queue.write_buffer(&bindings.offset_ubo, 0, bytemuck::bytes_of(&offset));
        self.rpass.set_bind_group(0, &bindings.bind_group, &[]);
    }

    fn set_color(&mut self, bindings: &WgpuBindings, color: ColorUniform) {
        self.queue.write_buffer(&bindings.color_ubo, 0, bytemuck::bytes_of(&color));
        self.rpass.set_bind_group(0, &bindings.bind_group, &[]);
    }

    fn draw_indexed(&mut self, submesh: &GpuSubmesh<wgpu::Buffer>) -> Result<(), DrawError> {
        if submesh.index_count == 0 {
            return Err(DrawError::EmptySubmesh);
        }
        self.rpass.set_index_buffer(submesh.index_buffer.slice(..), submesh.index_format);
        self.rpass.draw_indexed(0..submesh.index_count, 0, 0..1);
        Ok(())
    }
}
