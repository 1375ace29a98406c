//! Primitive geometry.
//!
//! - `builder`: pure CPU generation of wireframe meshes per shape kind
//! - `gpu`: upload of generated meshes through a [`BufferAllocator`]

mod builder;
mod gpu;
mod shape;
mod vertex;

pub use builder::{MeshData, SubmeshData};
pub use gpu::{BufferAllocator, GpuMesh, GpuSubmesh};
pub use shape::{ShapeKind, Tessellation};
pub use vertex::{MeshVertex, VertexLayout};
