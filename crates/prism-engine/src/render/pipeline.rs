use super::{PipelineDesc, PipelineStateError};

/// Device limits relevant to primitive pipelines.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PipelineLimits {
    pub max_vertex_attributes: u32,
    pub max_vertex_stride: u64,
}

impl PipelineLimits {
    pub fn from_wgpu(limits: &wgpu::Limits) -> Self {
        Self {
            max_vertex_attributes: limits.max_vertex_attributes,
            max_vertex_stride: limits.max_vertex_buffer_array_stride as u64,
        }
    }
}

impl Default for PipelineLimits {
    fn default() -> Self {
        Self::from_wgpu(&wgpu::Limits::default())
    }
}

/// Checks a pipeline description before it reaches the device.
///
/// `format_renderable` is the backend's answer for `desc.format`.
pub fn validate_pipeline(
    desc: &PipelineDesc<'_>,
    limits: PipelineLimits,
    format_renderable: bool,
) -> Result<(), PipelineStateError> {
    let count = desc.layout.attributes.len() as u32;
    if count == 0 {
        return Err(PipelineStateError::EmptyVertexLayout);
    }
    if count > limits.max_vertex_attributes {
        return Err(PipelineStateError::TooManyAttributes {
            count,
            max: limits.max_vertex_attributes,
        });
    }
    if desc.layout.stride > limits.max_vertex_stride {
        return Err(PipelineStateError::StrideTooLarge {
            stride: desc.layout.stride,
            max: limits.max_vertex_stride,
        });
    }
    if !format_renderable {
        return Err(PipelineStateError::UnsupportedFormat(desc.format));
    }
    Ok(())
}
