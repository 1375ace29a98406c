/// Rotation angles set by the host UI, in degrees.
///
/// The 2-D renderer does not consume these; they are stored for a renderer
/// variant that applies a view rotation.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct RotationControls {
    vertical_deg: f32,
    horizontal_deg: f32,
}

impl RotationControls {
    pub const MIN_DEG: f32 = -180.0;
    pub const MAX_DEG: f32 = 180.0;

    #[inline]
    pub fn vertical_deg(&self) -> f32 {
        self.vertical_deg
    }

    #[inline]
    pub fn horizontal_deg(&self) -> f32 {
        self.horizontal_deg
    }

    pub fn set_vertical_deg(&mut self, deg: f32) {
        self.vertical_deg = clamp_deg(deg, self.vertical_deg);
    }

    pub fn set_horizontal_deg(&mut self, deg: f32) {
        self.horizontal_deg = clamp_deg(deg, self.horizontal_deg);
    }

    /// Adds `(dv, dh)` degrees to the current angles.
    pub fn nudge(&mut self, dv: f32, dh: f32) {
        self.set_vertical_deg(self.vertical_deg + dv);
        self.set_horizontal_deg(self.horizontal_deg + dh);
    }
}

// Non-finite input keeps the previous value.
fn clamp_deg(deg: f32, previous: f32) -> f32 {
    if deg.is_finite() {
        deg.clamp(RotationControls::MIN_DEG, RotationControls::MAX_DEG)
    } else {
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_clamp_to_range() {
        let mut c = RotationControls::default();
        c.set_vertical_deg(270.0);
        c.set_horizontal_deg(-400.0);
        assert_eq!(c.vertical_deg(), 180.0);
        assert_eq!(c.horizontal_deg(), -180.0);
    }

    #[test]
    fn nudge_accumulates() {
        let mut c = RotationControls::default();
        c.nudge(5.0, -5.0);
        c.nudge(5.0, 0.0);
        assert_eq!((c.vertical_deg(), c.horizontal_deg()), (10.0, -5.0));
    }

    #[test]
    fn nan_is_ignored() {
        let mut c = RotationControls::default();
        c.set_vertical_deg(30.0);
        c.set_vertical_deg(f32::NAN);
        assert_eq!(c.vertical_deg(), 30.0);
    }
}
