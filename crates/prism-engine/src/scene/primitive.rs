use std::fmt;

use crate::coords::Offset;
use crate::mesh::ShapeKind;
use crate::paint::Color;

use super::Behaviour;

/// Invalid primitive parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Size must be finite and strictly positive.
    InvalidSize { kind: ShapeKind, size: f32 },
    /// Color channels must be finite.
    InvalidColor { kind: ShapeKind, color: Color },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::InvalidSize { kind, size } => {
                write!(f, "{kind} size must be positive and finite, got {size}")
            }
            SceneError::InvalidColor { kind, color } => {
                write!(f, "{kind} color must be finite, got {color:?}")
            }
        }
    }
}

impl std::error::Error for SceneError {}

/// One drawable shape: geometry kind, size, fill color and behaviour.
///
/// Immutable once created. GPU resources derived from it live in
/// [`PreparedPrimitive`](crate::render::PreparedPrimitive).
#[derive(Debug, Clone)]
pub struct Primitive {
    kind: ShapeKind,
    size: f32,
    color: Color,
    behaviour: Behaviour,
}

impl Primitive {
    /// Creates a primitive without a behaviour.
    ///
    /// Color channels outside `[0, 1]` are clamped.
    pub fn new(kind: ShapeKind, size: f32, color: Color) -> Result<Self, SceneError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(SceneError::InvalidSize { kind, size });
        }
        if !color.is_finite() {
            return Err(SceneError::InvalidColor { kind, color });
        }
        Ok(Self {
            kind,
            size,
            color: color.clamped(),
            behaviour: Behaviour::none(),
        })
    }

    /// Sets the behaviour, replacing any previous one.
    pub fn with_behaviour(mut self, behaviour: impl Into<Behaviour>) -> Self {
        self.behaviour = behaviour.into();
        self
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn behaviour(&self) -> &Behaviour {
        &self.behaviour
    }

    /// Offset of this primitive at time `t`.
    #[inline]
    pub fn offset_at(&self, t: f32) -> Offset {
        self.behaviour.offset_at(t)
    }
}
