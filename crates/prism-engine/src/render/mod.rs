//! Primitive rendering.
//!
//! Scene setup turns a [`Scene`](crate::scene::Scene) into a [`PreparedScene`]
//! once; [`FrameRenderer`] then draws it every display refresh through a
//! [`Backend`].
//!
//! Convention:
//! - Geometry is in normalized device coordinates; there is no camera.
//! - Each primitive owns its mesh, pipeline state and uniform buffers.

mod backend;
mod config;
mod error;
mod frame;
mod pipeline;
mod prepared;
mod retain;
mod sink;
mod uniforms;
pub mod wgpu_backend;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{
    Backend, BindingsOf, BufferOf, DrawPass, PipelineDesc, PipelineOf, PurgeableState, Resources,
};
pub use config::RendererConfig;
pub use error::{DrawError, PipelineStateError, RenderError, SetupError};
pub use frame::{FatalReason, FrameOutcome, FrameRenderer};
pub use pipeline::{validate_pipeline, PipelineLimits};
pub use prepared::{prepare_scene, PreparedPrimitive, PreparedScene};
pub use retain::Retained;
pub use sink::{ErrorSink, LogSink};
pub use uniforms::{ColorUniform, OffsetUniform};
pub use wgpu_backend::{ShaderLibrary, WgpuBackend, WgpuBindings, WgpuPass, WgpuResources};
