//! Time subsystem.
//!
//! Provides the fixed-step animation clock fed to primitive behaviours.
//! Intended usage:
//! - one `AnimationClock` per frame renderer
//! - call `tick()` once per rendered frame, before any behaviour is evaluated

mod anim_clock;

pub use anim_clock::AnimationClock;
