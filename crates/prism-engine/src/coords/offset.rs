use core::ops::{Add, Mul};

/// Positional displacement applied to a primitive for one frame.
///
/// Offsets are expressed in normalized device units. Behaviours may produce a
/// depth component, but the vertex stage only consumes `x` and `y`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// 2-D offset in the view plane.
    #[inline]
    pub const fn planar(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Bytes consumed by the vertex stage (`x`, `y`).
    #[inline]
    pub const fn vertex_bytes(self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl Add for Offset {
    type Output = Offset;
    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Mul<f32> for Offset {
    type Output = Offset;
    #[inline]
    fn mul(self, rhs: f32) -> Offset {
        Offset::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}
