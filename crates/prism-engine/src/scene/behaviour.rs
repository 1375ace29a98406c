use std::fmt;
use std::sync::Arc;

use crate::coords::Offset;

type OffsetFn = dyn Fn(f32) -> Offset + Send + Sync;

/// Time-varying position function of a primitive.
///
/// A primitive without a behaviour stays at the origin: [`Behaviour::none`]
/// yields [`Offset::ZERO`] for every time value. The draw loop never has to
/// special-case the absence of a function.
#[derive(Clone, Default)]
pub struct Behaviour {
    f: Option<Arc<OffsetFn>>,
}

impl Behaviour {
    /// The zero-offset behaviour.
    #[inline]
    pub const fn none() -> Self {
        Self { f: None }
    }

    /// Wraps a pure function of time.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(f32) -> Offset + Send + Sync + 'static,
    {
        Self { f: Some(Arc::new(f)) }
    }

    /// Convenience for 2-D behaviours returning `(x, y)`.
    pub fn planar<F>(f: F) -> Self
    where
        F: Fn(f32) -> (f32, f32) + Send + Sync + 'static,
    {
        Self::new(move |t| {
            let (x, y) = f(t);
            Offset::planar(x, y)
        })
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        self.f.is_none()
    }

    /// Evaluates the offset at time `t`.
    #[inline]
    pub fn offset_at(&self, t: f32) -> Offset {
        match &self.f {
            Some(f) => f(t),
            None => Offset::ZERO,
        }
    }
}

impl fmt::Debug for Behaviour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_none() { "Behaviour(none)" } else { "Behaviour(fn)" })
    }
}

impl<F> From<F> for Behaviour
where
    F: Fn(f32) -> Offset + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Behaviour::new(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_zero_for_all_times() {
        let b = Behaviour::none();
        for t in [0.0, 0.02, 1.0, -3.5, 999.98, f32::MAX] {
            assert_eq!(b.offset_at(t), Offset::ZERO);
        }
    }

    #[test]
    fn default_is_none() {
        assert!(Behaviour::default().is_none());
    }

    #[test]
    fn function_is_evaluated_at_given_time() {
        let b = Behaviour::planar(|t| (t.sin(), t.sin()));
        assert_eq!(b.offset_at(0.0), Offset::ZERO);
        let o = b.offset_at(std::f32::consts::FRAC_PI_2);
        assert!((o.x - 1.0).abs() < 1e-6 && (o.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn clones_share_the_function() {
        let b = Behaviour::new(|t| Offset::new(t, 2.0 * t, 0.0));
        let c = b.clone();
        assert_eq!(b.offset_at(1.5), c.offset_at(1.5));
    }
}
