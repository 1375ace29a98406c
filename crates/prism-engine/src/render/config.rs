use crate::paint::Color;
use crate::time::AnimationClock;

/// Frame renderer configuration.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Animation time added per rendered frame.
    pub clock_step: f32,

    /// Animation time wraps to zero at this bound.
    pub clock_wrap: f32,

    /// Consecutive frames with at least one failed primitive before the
    /// renderer reports a fatal outcome. `0` never escalates.
    pub max_consecutive_failures: u32,

    /// Clear color of every frame.
    pub clear_color: Color,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clock_step: AnimationClock::DEFAULT_STEP,
            clock_wrap: AnimationClock::DEFAULT_WRAP,
            max_consecutive_failures: 3,
            clear_color: Color::rgb_black(),
        }
    }
}
