//! Coordinate types.
//!
//! Geometry is authored in normalized device units: origin at the center of the
//! view, +X right, +Y up. There is no camera or projection step.

mod offset;

pub use offset::Offset;
