/// Fixed-step animation clock.
///
/// The clock advances by a constant step once per rendered frame and wraps at
/// `wrap` so the accumulated time never grows large enough to lose `f32`
/// precision in behaviour functions.
///
/// The clock is frame-driven, not wall-clock driven: animation speed follows the
/// display refresh rate.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    time: f32,
    step: f32,
    wrap: f32,
    frame_index: u64,
}

impl AnimationClock {
    /// Step used by the demo scene.
    pub const DEFAULT_STEP: f32 = 0.02;

    /// Wrap bound used by the demo scene.
    pub const DEFAULT_WRAP: f32 = 1000.0;

    /// Creates a clock at `t = 0` with the given step and wrap bound.
    pub fn new(step: f32, wrap: f32) -> Self {
        debug_assert!(step >= 0.0 && step.is_finite(), "clock step must be finite and >= 0");
        debug_assert!(wrap > 0.0 && wrap.is_finite(), "clock wrap must be finite and > 0");
        Self {
            time: 0.0,
            step,
            wrap,
            frame_index: 0,
        }
    }

    /// Current time value.
    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    #[inline]
    pub fn wrap(&self) -> f32 {
        self.wrap
    }

    /// Number of ticks since creation or the last reset.
    #[inline]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock by one step and returns the new time.
    ///
    /// `time(n + 1) = (time(n) + step) mod wrap`.
    pub fn tick(&mut self) -> f32 {
        self.time = (self.time + self.step) % self.wrap;
        self.frame_index = self.frame_index.wrapping_add(1);
        self.time
    }

    /// Rewinds the clock to `t = 0`.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.frame_index = 0;
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STEP, Self::DEFAULT_WRAP)
    }
}
