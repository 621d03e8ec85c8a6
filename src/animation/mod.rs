mod animatable;
mod spring;
mod timing;

pub use animatable::Animatable;
pub use spring::{Spring, SpringConfig};
pub use timing::{TimingFunction, DEFAULT_BACK_OVERSHOOT};

/// Clock parameters of a time-driven tween.
#[derive(Clone, Debug)]
pub struct Transition {
    pub duration_ms: f32,
    pub timing: TimingFunction,
    /// Wait before progress starts moving
    pub delay_ms: f32,
}

impl Transition {
    pub fn new(duration_ms: f32, timing: TimingFunction) -> Self {
        Self {
            duration_ms,
            timing,
            delay_ms: 0.0,
        }
    }

    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Linear progress at `elapsed_ms` after the start, delay included.
    pub fn progress_at(&self, elapsed_ms: f32) -> f32 {
        let active = elapsed_ms - self.delay_ms;
        if active <= 0.0 {
            0.0
        } else if self.duration_ms <= 0.0 {
            1.0
        } else {
            (active / self.duration_ms).min(1.0)
        }
    }

    /// Delay plus duration.
    pub fn total_ms(&self) -> f32 {
        self.delay_ms + self.duration_ms
    }
}
