use std::fmt;

use crate::device::DeviceResourceError;
use crate::mesh::ShapeKind;

/// A pipeline state could not be created or realized.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineStateError {
    /// The vertex layout has no attributes.
    EmptyVertexLayout,
    /// More vertex attributes than the device supports.
    TooManyAttributes { count: u32, max: u32 },
    /// Vertex stride exceeds the device limit.
    StrideTooLarge { stride: u64, max: u64 },
    /// The target pixel format cannot be rendered to.
    UnsupportedFormat(wgpu::TextureFormat),
    /// The pipeline exists but cannot be used this frame (e.g. device lost).
    Unavailable { reason: String },
}

impl fmt::Display for PipelineStateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStateError::EmptyVertexLayout => f.write_str("vertex layout has no attributes"),
            PipelineStateError::TooManyAttributes { count, max } => {
                write!(f, "vertex layout has {count} attributes, device allows {max}")
            }
            PipelineStateError::StrideTooLarge { stride, max } => {
                write!(f, "vertex stride {stride} exceeds device limit {max}")
            }
            PipelineStateError::UnsupportedFormat(format) => {
                write!(f, "pixel format {format:?} is not renderable")
            }
            PipelineStateError::Unavailable { reason } => write!(f, "pipeline unavailable: {reason}"),
        }
    }
}

impl std::error::Error for PipelineStateError {}

/// An indexed draw was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawError {
    EmptySubmesh,
    Rejected(String),
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::EmptySubmesh => f.write_str("submesh has no indices"),
            DrawError::Rejected(msg) => write!(f, "draw rejected: {msg}"),
        }
    }
}

impl std::error::Error for DrawError {}

/// Scene setup failed. Setup is all-or-nothing: no partial scene is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupError {
    Mesh { index: usize, kind: ShapeKind, source: DeviceResourceError },
    Pipeline { index: usize, kind: ShapeKind, source: PipelineStateError },
    Bindings { index: usize, kind: ShapeKind, source: DeviceResourceError },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::Mesh { index, kind, .. } => {
                write!(f, "failed to upload mesh for primitive #{index} ({kind})")
            }
            SetupError::Pipeline { index, kind, .. } => {
                write!(f, "failed to create pipeline state for primitive #{index} ({kind})")
            }
            SetupError::Bindings { index, kind, .. } => {
                write!(f, "failed to allocate uniforms for primitive #{index} ({kind})")
            }
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::Mesh { source, .. } | SetupError::Bindings { source, .. } => Some(source),
            SetupError::Pipeline { source, .. } => Some(source),
        }
    }
}

/// A per-primitive failure during a frame.
///
/// The primitive is skipped for that frame; the rest of the frame is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    Pipeline { index: usize, kind: ShapeKind, source: PipelineStateError },
    Draw { index: usize, kind: ShapeKind, submesh: usize, source: DrawError },
}

impl RenderError {
    /// Scene index of the primitive that failed.
    pub fn index(&self) -> usize {
        match self {
            RenderError::Pipeline { index, .. } | RenderError::Draw { index, .. } => *index,
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Pipeline { index, kind, source } => {
                write!(f, "primitive #{index} ({kind}) skipped: {source}")
            }
            RenderError::Draw { index, kind, submesh, source } => {
                write!(f, "primitive #{index} ({kind}) submesh {submesh} not drawn: {source}")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Pipeline { source, .. } => Some(source),
            RenderError::Draw { source, .. } => Some(source),
        }
    }
}
