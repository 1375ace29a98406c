//! CPU-side wireframe generation.
//!
//! Every shape is emitted as a line list: each pair of indices is one edge.
//! Generation is a pure function of `(kind, size)`; tessellation constants come
//! from [`ShapeKind::tessellation`].

use std::collections::BTreeSet;
use std::f32::consts::{PI, TAU};

use super::{MeshVertex, ShapeKind, Tessellation, VertexLayout};

/// Index list for one sub-mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmeshData {
    pub name: &'static str,
    pub indices: Vec<u16>,
}

impl SubmeshData {
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Generated geometry for one primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub kind: ShapeKind,
    pub vertices: Vec<MeshVertex>,
    pub submeshes: Vec<SubmeshData>,
    pub topology: wgpu::PrimitiveTopology,
}

impl MeshData {
    /// Builds the wireframe mesh for a primitive of `kind` with nominal `size`.
    pub fn build(kind: ShapeKind, size: f32) -> Self {
        let extent = kind.extent(size);
        let (vertices, submeshes) = match kind.tessellation() {
            Tessellation::Box { segments } => box_lines(extent, segments),
            Tessellation::Sphere { radial, vertical } => sphere_lines(extent / 2.0, radial, vertical),
            Tessellation::Cone { radial, vertical, capped } => {
                cone_lines(extent / 2.0, extent, radial, vertical, capped)
            }
            Tessellation::Icosahedron => icosahedron_lines(extent / 2.0),
        };

        debug_assert!(vertices.len() <= u16::MAX as usize, "mesh exceeds u16 index range");

        Self {
            kind,
            vertices,
            submeshes,
            topology: wgpu::PrimitiveTopology::LineList,
        }
    }

    #[inline]
    pub fn layout(&self) -> VertexLayout {
        MeshVertex::layout()
    }

    #[inline]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Total number of indices across all sub-meshes.
    pub fn index_count(&self) -> u32 {
        self.submeshes.iter().map(SubmeshData::index_count).sum()
    }
}

type Geometry = (Vec<MeshVertex>, Vec<SubmeshData>);

fn normalized(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len <= f32::EPSILON {
        [0.0, 0.0, 0.0]
    } else {
        [v[0] / len, v[1] / len, v[2] / len]
    }
}

fn vertex(position: [f32; 3]) -> MeshVertex {
    MeshVertex::new(position, normalized(position))
}

// ── box ───────────────────────────────────────────────────────────────────

/// Lattice of `(sx + 1) * (sy + 1) * (sz + 1)` points; edges run along the
/// twelve outer edges of the box, split per segment.
fn box_lines(extent: f32, segments: [u32; 3]) -> Geometry {
    let [sx, sy, sz] = segments.map(|s| s.max(1));
    let half = extent / 2.0;
    let (nx, ny, nz) = (sx + 1, sy + 1, sz + 1);

    let idx = |i: u32, j: u32, k: u32| (i + nx * (j + ny * k)) as u16;
    let coord = |i: u32, n: u32| -half + extent * i as f32 / n as f32;

    let mut vertices = Vec::with_capacity((nx * ny * nz) as usize);
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                vertices.push(vertex([coord(i, sx), coord(j, sy), coord(k, sz)]));
            }
        }
    }

    // A lattice point lies on an outer edge when at least two of its
    // coordinates sit on a boundary plane.
    let on_boundary = |v: u32, n: u32| v == 0 || v == n;

    let mut indices = Vec::new();
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                if i < sx && on_boundary(j, sy) && on_boundary(k, sz) {
                    indices.extend([idx(i, j, k), idx(i + 1, j, k)]);
                }
                if j < sy && on_boundary(i, sx) && on_boundary(k, sz) {
                    indices.extend([idx(i, j, k), idx(i, j + 1, k)]);
                }
                if k < sz && on_boundary(i, sx) && on_boundary(j, sy) {
                    indices.extend([idx(i, j, k), idx(i, j, k + 1)]);
                }
            }
        }
    }

    (vertices, vec![SubmeshData { name: "edges", indices }])
}

// ── sphere ────────────────────────────────────────────────────────────────

/// UV sphere: `vertical + 1` latitude rows of `radial` points each.
/// Edges are the interior latitude rings plus every meridian.
fn sphere_lines(radius: f32, radial: u32, vertical: u32) -> Geometry {
    let radial = radial.max(3);
    let vertical = vertical.max(2);

    let idx = |lat: u32, lon: u32| (lat * radial + lon % radial) as u16;

    let mut vertices = Vec::with_capacity(((vertical + 1) * radial) as usize);
    for lat in 0..=vertical {
        let theta = lat as f32 * PI / vertical as f32;
        let (sin_t, cos_t) = theta.sin_cos();
        for lon in 0..radial {
            let phi = lon as f32 * TAU / radial as f32;
            let (sin_p, cos_p) = phi.sin_cos();
            let unit = [sin_t * cos_p, cos_t, sin_t * sin_p];
            vertices.push(MeshVertex::new(unit.map(|c| c * radius), unit));
        }
    }

    let mut indices = Vec::new();
    // Rows 0 and `vertical` collapse onto the poles; skip their rings.
    for lat in 1..vertical {
        for lon in 0..radial {
            indices.extend([idx(lat, lon), idx(lat, lon + 1)]);
        }
    }
    for lat in 0..vertical {
        for lon in 0..radial {
            indices.extend([idx(lat, lon), idx(lat + 1, lon)]);
        }
    }

    (vertices, vec![SubmeshData { name: "surface", indices }])
}

// ── cone ──────────────────────────────────────────────────────────────────

/// Cone with its apex at `+height / 2` and the base ring at `-height / 2`.
///
/// The side is split into `vertical` bands; the optional cap is a separate
/// sub-mesh of spokes from the base center. Two radial points make each ring a
/// single diameter, so it is emitted once.
fn cone_lines(radius: f32, height: f32, radial: u32, vertical: u32, capped: bool) -> Geometry {
    let radial = radial.max(2);
    let vertical = vertical.max(1);
    let half = height / 2.0;
    let slope = radius / height.max(f32::EPSILON);

    let mut vertices = Vec::new();
    for band in 0..vertical {
        let f = band as f32 / vertical as f32;
        let ring_radius = radius * (1.0 - f);
        let y = -half + height * f;
        for lon in 0..radial {
            let phi = lon as f32 * TAU / radial as f32;
            let (sin_p, cos_p) = phi.sin_cos();
            vertices.push(MeshVertex::new(
                [ring_radius * cos_p, y, ring_radius * sin_p],
                normalized([cos_p, slope, sin_p]),
            ));
        }
    }
    let apex = vertices.len() as u16;
    vertices.push(MeshVertex::new([0.0, half, 0.0], [0.0, 1.0, 0.0]));

    let ring = |band: u32, lon: u32| (band * radial + lon % radial) as u16;

    let ring_edges = if radial == 2 { 1 } else { radial };

    let mut side = Vec::new();
    for band in 0..vertical {
        for lon in 0..ring_edges {
            side.extend([ring(band, lon), ring(band, lon + 1)]);
        }
        for lon in 0..radial {
            let up = if band + 1 < vertical { ring(band + 1, lon) } else { apex };
            side.extend([ring(band, lon), up]);
        }
    }

    let mut submeshes = vec![SubmeshData { name: "side", indices: side }];

    if capped {
        let center = vertices.len() as u16;
        vertices.push(MeshVertex::new([0.0, -half, 0.0], [0.0, -1.0, 0.0]));
        let cap = (0..radial).flat_map(|lon| [center, ring(0, lon)]).collect();
        submeshes.push(SubmeshData { name: "cap", indices: cap });
    }

    (vertices, submeshes)
}

// ── icosahedron ───────────────────────────────────────────────────────────

const ICOSAHEDRON_FACES: [[u16; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// Regular icosahedron inscribed in a sphere of `radius`: 12 vertices, 30 edges.
fn icosahedron_lines(radius: f32) -> Geometry {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let a = radius / (phi * phi + 1.0).sqrt();
    let b = a * phi;

    let positions = [
        [-a, b, 0.0], [a, b, 0.0], [-a, -b, 0.0], [a, -b, 0.0],
        [0.0, -a, b], [0.0, a, b], [0.0, -a, -b], [0.0, a, -b],
        [b, 0.0, -a], [b, 0.0, a], [-b, 0.0, -a], [-b, 0.0, a],
    ];
    let vertices = positions.into_iter().map(vertex).collect();

    let edges: BTreeSet<(u16, u16)> = ICOSAHEDRON_FACES
        .iter()
        .flat_map(|&[i, j, k]| [(i, j), (j, k), (k, i)])
        .map(|(p, q)| (p.min(q), p.max(q)))
        .collect();
    let indices = edges.into_iter().flat_map(|(p, q)| [p, q]).collect();

    (vertices, vec![SubmeshData { name: "edges", indices }])
}
