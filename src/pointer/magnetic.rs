use crate::animation::{Spring, SpringConfig};
use crate::error::ConfigError;
use crate::geometry::{Point, Rect};
use crate::host::{ElementId, PropertyMask, Property, Style};
use crate::jobs::WriteQueue;

/// Pulls an element toward the pointer while it is within `radius` of the
/// element's center.
pub struct Magnet {
    element: ElementId,
    strength: f32,
    radius: f32,
    x: Spring,
    y: Spring,
    written: Option<Point>,
}

impl Magnet {
    /// `strength` in `(0, 1]`, `radius` in px.
    pub fn new(element: ElementId, strength: f32, radius: f32) -> Result<Self, ConfigError> {
        if !(strength > 0.0 && strength <= 1.0) {
            return Err(ConfigError::InvalidStrength(strength));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ConfigError::InvalidRadius(radius));
        }
        Ok(Self {
            element,
            strength,
            radius,
            x: Spring::new(0.0, SpringConfig::MAGNETIC),
            y: Spring::new(0.0, SpringConfig::MAGNETIC),
            written: None,
        })
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Current displacement.
    pub fn offset(&self) -> Point {
        Point::new(self.x.position, self.y.position)
    }

    /// Where the element wants to be given the pointer and its layout box.
    pub fn target_offset(&self, pointer: Option<Point>, rect: Rect) -> Point {
        let center = rect.center();
        match pointer {
            Some(pointer) if center.distance_to(pointer) < self.radius => {
                (pointer - center) * self.strength
            }
            _ => Point::ZERO,
        }
    }

    pub fn step(&mut self, target: Point, dt_secs: f32, writes: &mut WriteQueue) {
        self.x.set_target(target.x);
        self.y.set_target(target.y);
        let offset = Point::new(self.x.step(dt_secs), self.y.step(dt_secs));

        let resting = offset == Point::ZERO && self.written.is_none();
        if !resting && self.written != Some(offset) {
            writes.push_style(
                self.element,
                &Style::new()
                    .with(Property::X, offset.x)
                    .with(Property::Y, offset.y),
            );
            self.written = Some(offset);
        }
    }

    pub fn release(&self, writes: &mut WriteQueue) {
        if self.written.is_some() {
            writes.push_revert(self.element, PropertyMask::TRANSLATE);
        }
    }
}
