use winit::window::{Window, WindowId};

use crate::device::Gpu;
use crate::render::{ShaderLibrary, WgpuBackend};
use crate::window::RuntimeCtx;

/// Per-window handles and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id:     WindowId,
    pub window: &'a Window,
}

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window:  WindowCtx<'a>,
    pub gpu:     &'a mut Gpu<'w>,
    pub runtime: &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Returns a render backend over this window's GPU context.
    ///
    /// The backend notifies the window before presenting.
    pub fn backend<'s>(&'s mut self, library: &'s ShaderLibrary) -> WgpuBackend<'s, 'w> {
        WgpuBackend::new(self.gpu, library).with_window(self.window.window)
    }
}
