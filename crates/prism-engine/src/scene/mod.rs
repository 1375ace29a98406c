//! Scene description.
//!
//! A [`Scene`] is an ordered list of [`Primitive`]s. Insertion order is draw
//! order; no depth sorting or culling is performed.

mod behaviour;
mod controls;
mod primitive;

pub use behaviour::Behaviour;
pub use controls::RotationControls;
pub use primitive::{Primitive, SceneError};

/// Ordered collection of primitives.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a primitive; it is drawn after every primitive already present.
    #[inline]
    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Builder-style [`push`](Self::push).
    #[inline]
    pub fn with(mut self, primitive: Primitive) -> Self {
        self.push(primitive);
        self
    }

    #[inline]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    #[inline]
    pub fn into_primitives(self) -> Vec<Primitive> {
        self.primitives
    }
}

impl FromIterator<Primitive> for Scene {
    fn from_iter<I: IntoIterator<Item = Primitive>>(iter: I) -> Self {
        Self { primitives: iter.into_iter().collect() }
    }
}
