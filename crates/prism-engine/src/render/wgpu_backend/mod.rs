//! [`Backend`] implementation over [`Gpu`].

mod library;
mod pass;

pub use library::ShaderLibrary;
pub use pass::WgpuPass;

use winit::window::Window;

use crate::device::{DeviceResourceError, Gpu, GpuFrame, SurfaceErrorAction, WgpuAllocator};
use crate::paint::Color;

use super::uniforms::{COLOR_BINDING, OFFSET_BINDING, UNIFORM_BLOCK_SIZE};
use super::{
    validate_pipeline, Backend, PipelineDesc, PipelineLimits, PipelineStateError, PurgeableState,
    Resources,
};
use library::{FRAGMENT_ENTRY, VERTEX_ENTRY};

/// wgpu resource types.
pub struct WgpuResources;

impl Resources for WgpuResources {
    type Buffer = wgpu::Buffer;
    type Pipeline = wgpu::RenderPipeline;
    type Bindings = WgpuBindings;
}

/// Per-primitive uniform buffers and their bind group.
pub struct WgpuBindings {
    pub(crate) offset_ubo: wgpu::Buffer,
    pub(crate) color_ubo: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

/// Borrowed view of the GPU context for one setup or frame.
pub struct WgpuBackend<'g, 'w> {
    gpu: &'g mut Gpu<'w>,
    library: &'g ShaderLibrary,
    window: Option<&'g Window>,
}

impl<'g, 'w> WgpuBackend<'g, 'w> {
    pub fn new(gpu: &'g mut Gpu<'w>, library: &'g ShaderLibrary) -> Self {
        Self {
            gpu,
            library,
            window: None,
        }
    }

    /// Window notified right before each present.
    pub fn with_window(mut self, window: &'g Window) -> Self {
        self.window = Some(window);
        self
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.gpu.surface_format()
    }

    fn uniform_buffer(&self, label: String) -> wgpu::Buffer {
        self.gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some(&label),
            size: UNIFORM_BLOCK_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }
}

impl Backend for WgpuBackend<'_, '_> {
    type Res = WgpuResources;
    type Frame = GpuFrame;
    type Allocator<'a>
        = WgpuAllocator<'a>
    where
        Self: 'a;
    type Pass<'f>
        = WgpuPass<'f>
    where
        Self: 'f;

    fn allocator(&mut self) -> WgpuAllocator<'_> {
        self.gpu.allocator()
    }

    fn create_pipeline(
        &mut self,
        desc: &PipelineDesc<'_>,
    ) -> Result<wgpu::RenderPipeline, PipelineStateError> {
        let device = self.gpu.device();
        validate_pipeline(
            desc,
            PipelineLimits::from_wgpu(&device.limits()),
            self.gpu.supports_render_format(desc.format),
        )?;

        let module = &self.library.module;
        Ok(device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(desc.label),
            layout: Some(&self.library.pipeline_layout),

            vertex: wgpu::VertexState {
                module,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[desc.layout.as_wgpu()],
            },

            fragment: Some(wgpu::FragmentState {
                module,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: desc.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: desc.topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        }))
    }

    fn create_bindings(&mut self, label: &str) -> Result<WgpuBindings, DeviceResourceError> {
        let offset_ubo = self.uniform_buffer(format!("{label} offset ubo"));
        let color_ubo = self.uniform_buffer(format!("{label} color ubo"));

        let bind_group = self.gpu.device().create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.library.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: OFFSET_BINDING,
                    resource: offset_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: COLOR_BINDING,
                    resource: color_ubo.as_entire_binding(),
                },
            ],
        });

        Ok(WgpuBindings {
            offset_ubo,
            color_ubo,
            bind_group,
        })
    }

    fn acquire_frame(&mut self) -> Result<GpuFrame, SurfaceErrorAction> {
        let size = self.gpu.size();
        if size.width == 0 || size.height == 0 {
            return Err(SurfaceErrorAction::SkipFrame);
        }

        match self.gpu.begin_frame() {
            Ok(frame) => Ok(frame),
            Err(err) => {
                let action = self.gpu.handle_surface_error(err);
                log::debug!("surface acquire failed: {action:?}");
                Err(action)
            }
        }
    }

    fn begin_pass<'f>(&'f self, frame: &'f mut GpuFrame, clear: Color) -> WgpuPass<'f> {
        let GpuFrame { view, encoder, .. } = frame;

        let rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("prism pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear.to_clear_color()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        WgpuPass {
            rpass,
            queue: self.gpu.queue(),
        }
    }

    fn realize_pipeline<'p>(
        &self,
        pipeline: &'p wgpu::RenderPipeline,
    ) -> Result<&'p wgpu::RenderPipeline, PipelineStateError> {
        if self.gpu.is_device_lost() {
            return Err(PipelineStateError::Unavailable { reason: "graphics device lost".into() });
        }
        Ok(pipeline)
    }

    fn set_purgeable(&self, _buffer: &wgpu::Buffer, state: PurgeableState) {
        // wgpu manages residency itself.
        log::trace!("purgeable hint: {state:?}");
    }

    fn finish_frame(&mut self, frame: GpuFrame) -> bool {
        if let Some(window) = self.window {
            window.pre_present_notify();
        }
        self.gpu.present(frame);
        true
    }
}
