//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering
//! - allocating mesh buffers on the device

mod allocator;
mod error;
mod frame;
mod gpu;
mod init;
mod surface;

#[cfg(test)]
pub(crate) use allocator::check_request;
pub use allocator::WgpuAllocator;
pub use error::{DeviceResourceError, SurfaceErrorAction};
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
