use crate::render::uniforms::{COLOR_BINDING, OFFSET_BINDING, uniform_min_binding_size};

pub(crate) const VERTEX_ENTRY: &str = "vs_offset";
pub(crate) const FRAGMENT_ENTRY: &str = "fs_color";

/// Compiled shader pair and the binding layout every primitive shares.
///
/// The WGSL source is embedded at build time, so loading cannot fail for
/// missing files. Shader compilation errors surface through wgpu's
/// uncaptured-error handler.
pub struct ShaderLibrary {
    pub(crate) module: wgpu::ShaderModule,
    pub(crate) bind_group_layout: wgpu::BindGroupLayout,
    pub(crate) pipeline_layout: wgpu::PipelineLayout,
}

impl ShaderLibrary {
    pub fn load(device: &wgpu::Device) -> Self {
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("prism shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/prism.wgsl").into()),
        });

        let uniform_entry = |binding, visibility| wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: uniform_min_binding_size(),
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("prism bgl"),
            entries: &[
                uniform_entry(OFFSET_BINDING, wgpu::ShaderStages::VERTEX),
                uniform_entry(COLOR_BINDING, wgpu::ShaderStages::FRAGMENT),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        log::debug!("shader library loaded ({VERTEX_ENTRY}, {FRAGMENT_ENTRY})");

        Self {
            module,
            bind_group_layout,
            pipeline_layout,
        }
    }
}
