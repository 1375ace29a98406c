use std::fmt;

/// Kind of primitive shape.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShapeKind {
    Box,
    Sphere,
    Cone,
    Icosahedron,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Box,
        ShapeKind::Sphere,
        ShapeKind::Cone,
        ShapeKind::Icosahedron,
    ];

    /// Fixed tessellation for this kind.
    pub const fn tessellation(self) -> Tessellation {
        match self {
            ShapeKind::Box => Tessellation::Box { segments: [1, 1, 1] },
            ShapeKind::Sphere => Tessellation::Sphere { radial: 20, vertical: 20 },
            ShapeKind::Cone => Tessellation::Cone { radial: 2, vertical: 20, capped: true },
            ShapeKind::Icosahedron => Tessellation::Icosahedron,
        }
    }

    /// Bounding extent (full width along each axis) for a primitive of `size`.
    ///
    /// Spheres are generated at half the nominal size.
    pub fn extent(self, size: f32) -> f32 {
        match self {
            ShapeKind::Sphere => size / 2.0,
            ShapeKind::Box | ShapeKind::Cone | ShapeKind::Icosahedron => size,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShapeKind::Box => "box",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cone => "cone",
            ShapeKind::Icosahedron => "icosahedron",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Segment counts used when generating a shape's wireframe.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Tessellation {
    Box { segments: [u32; 3] },
    Sphere { radial: u32, vertical: u32 },
    Cone { radial: u32, vertical: u32, capped: bool },
    Icosahedron,
}
