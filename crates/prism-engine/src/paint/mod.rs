//! Paint model for primitives.
//!
//! Every primitive is filled with a single solid color; there are no gradients
//! or textures.

pub mod color;

pub use color::Color;
