//! Prism engine crate.
//!
//! Draws a small scene of wireframe primitives (box, sphere, cone,
//! icosahedron), each displaced every frame by its own behaviour function.
//! Owns the platform + GPU runtime pieces the demo binary is built on.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod mesh;
pub mod render;
pub mod paint;
pub mod scene;
