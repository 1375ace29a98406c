use super::{Backend, BufferOf, PurgeableState};

/// Scoped non-purgeable hint on a buffer.
///
/// Marks the buffer non-purgeable on creation and purgeable again on drop, so
/// every exit path of a draw (including early returns on errors) releases it.
#[must_use = "the buffer becomes purgeable again as soon as the guard is dropped"]
pub struct Retained<'a, B: Backend + ?Sized> {
    backend: &'a B,
    buffer: &'a BufferOf<B>,
}

impl<'a, B: Backend + ?Sized> Retained<'a, B> {
    pub fn acquire(backend: &'a B, buffer: &'a BufferOf<B>) -> Self {
        backend.set_purgeable(buffer, PurgeableState::NonPurgeable);
        Self { backend, buffer }
    }
}

impl<B: Backend + ?Sized> Drop for Retained<'_, B> {
    fn drop(&mut self) {
        self.backend.set_purgeable(self.buffer, PurgeableState::Purgeable);
    }
}
