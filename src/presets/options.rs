use std::str::FromStr;

use crate::animation::TimingFunction;
use crate::error::ConfigError;
use crate::geometry::Point;
use crate::trigger::Anchor;

/// Side an element slides in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Rises into place from below
    #[default]
    Up,
    Down,
    /// Moves left into place, starting to the right
    Left,
    Right,
    /// Fade only
    None,
}

impl Direction {
    /// Starting offset for a slide of `distance` px.
    pub fn offset(self, distance: f32) -> Point {
        match self {
            Direction::Up => Point::new(0.0, distance),
            Direction::Down => Point::new(0.0, -distance),
            Direction::Left => Point::new(distance, 0.0),
            Direction::Right => Point::new(-distance, 0.0),
            Direction::None => Point::ZERO,
        }
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "none" => Ok(Direction::None),
            other => Err(ConfigError::UnknownOption(other.to_string())),
        }
    }
}

/// Scroll-triggered fade and slide.
#[derive(Debug, Clone)]
pub struct RevealOptions {
    pub delay_ms: f32,
    pub duration_ms: f32,
    pub direction: Direction,
    /// Slide distance in px
    pub distance: f32,
    pub easing: TimingFunction,
    /// Play once and stay, instead of reversing when scrolled back above
    pub once: bool,
    /// Delay between targets of a staggered reveal
    pub stagger_ms: f32,
    /// Overrides [`AnimatorConfig::reveal_start`](crate::AnimatorConfig)
    pub start: Option<Anchor>,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            delay_ms: 0.0,
            duration_ms: 1000.0,
            direction: Direction::Up,
            distance: 50.0,
            easing: TimingFunction::PowerOut(4.0),
            once: false,
            stagger_ms: 0.0,
            start: None,
        }
    }
}

impl RevealOptions {
    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    pub fn easing(mut self, easing: TimingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    pub fn stagger(mut self, stagger_ms: f32) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    pub fn start(mut self, start: Anchor) -> Self {
        self.start = Some(start);
        self
    }
}

/// Which way a parallax layer drifts as the page scrolls down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Drift {
    #[default]
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxOptions {
    /// Travel over the whole range is `100 × speed` px
    pub speed: f32,
    pub drift: Drift,
    /// Rotation in degrees reached at the end of the range
    pub rotation: Option<f32>,
    /// Fixed scale applied up front so the drifting layer never shows
    /// its edges
    pub scale: Option<f32>,
}

impl Default for ParallaxOptions {
    fn default() -> Self {
        Self {
            speed: 0.5,
            drift: Drift::Up,
            rotation: None,
            scale: None,
        }
    }
}

impl ParallaxOptions {
    /// Preset for a full-bleed image: slower drift, scaled up 1.2.
    pub fn image() -> Self {
        Self {
            speed: 0.3,
            scale: Some(1.2),
            ..Self::default()
        }
    }

    pub fn speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn drift(mut self, drift: Drift) -> Self {
        self.drift = drift;
        self
    }

    pub fn rotation(mut self, degrees: f32) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Vertical offset at the end of the range.
    pub fn travel(&self) -> f32 {
        match self.drift {
            Drift::Up => -100.0 * self.speed,
            Drift::Down => 100.0 * self.speed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CounterOptions {
    pub duration_ms: f32,
    pub prefix: String,
    pub suffix: String,
    pub easing: TimingFunction,
    pub once: bool,
}

impl Default for CounterOptions {
    fn default() -> Self {
        Self {
            duration_ms: 2000.0,
            prefix: String::new(),
            suffix: String::new(),
            easing: TimingFunction::PowerOut(3.0),
            once: false,
        }
    }
}

impl CounterOptions {
    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn easing(mut self, easing: TimingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }
}

/// How a block of text enters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnimation {
    /// Fade while rising 50px
    #[default]
    FadeUp,
    FadeIn,
    /// Rise by the block's own height
    SlideUp,
    /// Each split unit rises by its own height, staggered
    Split,
}

impl FromStr for TextAnimation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fade-up" => Ok(TextAnimation::FadeUp),
            "fade-in" => Ok(TextAnimation::FadeIn),
            "slide-up" => Ok(TextAnimation::SlideUp),
            "split" | "split-chars" | "split-words" => Ok(TextAnimation::Split),
            other => Err(ConfigError::UnknownOption(other.to_string())),
        }
    }
}

/// When a text reveal starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealOn {
    /// When the block scrolls into view
    #[default]
    Scroll,
    /// Immediately
    Load,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRevealOptions {
    pub animation: TextAnimation,
    pub on: RevealOn,
    pub delay_ms: f32,
    pub duration_ms: f32,
    /// Delay between split units
    pub stagger_ms: f32,
    /// Stay revealed after scrolling back above the start
    pub once: bool,
}

impl Default for TextRevealOptions {
    fn default() -> Self {
        Self {
            animation: TextAnimation::FadeUp,
            on: RevealOn::Scroll,
            delay_ms: 0.0,
            duration_ms: 1000.0,
            stagger_ms: 20.0,
            once: false,
        }
    }
}

impl TextRevealOptions {
    pub fn animation(mut self, animation: TextAnimation) -> Self {
        self.animation = animation;
        self
    }

    pub fn on(mut self, on: RevealOn) -> Self {
        self.on = on;
        self
    }

    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn stagger(mut self, stagger_ms: f32) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }
}
