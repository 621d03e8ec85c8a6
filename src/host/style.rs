//! Animated style channels and the sparse [`Style`] written to hosts.

use bitflags::bitflags;

use crate::geometry::Rect;

const PROPERTY_COUNT: usize = 12;

/// A single animatable channel of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Opacity,
    /// Horizontal translation in px
    X,
    /// Vertical translation in px
    Y,
    Scale,
    ScaleX,
    ScaleY,
    /// Rotation in degrees, never wrapped
    Rotation,
    /// Vertical skew in degrees
    SkewY,
    Width,
    Height,
    /// Background fill alpha (cursor ring)
    FillOpacity,
    /// Extra space reserved below a pinned section
    PinSpacing,
}

impl Property {
    pub const ALL: [Property; PROPERTY_COUNT] = [
        Property::Opacity,
        Property::X,
        Property::Y,
        Property::Scale,
        Property::ScaleX,
        Property::ScaleY,
        Property::Rotation,
        Property::SkewY,
        Property::Width,
        Property::Height,
        Property::FillOpacity,
        Property::PinSpacing,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn mask(self) -> PropertyMask {
        PropertyMask::from_bits_truncate(1 << self.index())
    }

    /// Value the channel has when nothing is animating it.
    pub fn resting_value(self) -> f32 {
        match self {
            Property::Opacity | Property::Scale | Property::ScaleX | Property::ScaleY => 1.0,
            _ => 0.0,
        }
    }
}

bitflags! {
    /// A set of [`Property`] channels.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PropertyMask: u16 {
        const OPACITY = 1 << 0;
        const X = 1 << 1;
        const Y = 1 << 2;
        const SCALE = 1 << 3;
        const SCALE_X = 1 << 4;
        const SCALE_Y = 1 << 5;
        const ROTATION = 1 << 6;
        const SKEW_Y = 1 << 7;
        const WIDTH = 1 << 8;
        const HEIGHT = 1 << 9;
        const FILL_OPACITY = 1 << 10;
        const PIN_SPACING = 1 << 11;

        const TRANSLATE = Self::X.bits() | Self::Y.bits();
    }
}

impl PropertyMask {
    pub fn properties(self) -> impl Iterator<Item = Property> {
        Property::ALL.into_iter().filter(move |p| self.contains(p.mask()))
    }
}

/// A tween endpoint. Percentages resolve against the target's own box,
/// width for `X`, height for everything else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Px(f32),
    Percent(f32),
}

impl Value {
    pub fn resolve(self, property: Property, rect: Option<Rect>) -> f32 {
        match self {
            Value::Px(v) => v,
            Value::Percent(p) => {
                let basis = rect
                    .map(|r| match property {
                        Property::X | Property::Width => r.width,
                        _ => r.height,
                    })
                    .unwrap_or(0.0);
                basis * p / 100.0
            }
        }
    }

    pub fn is_relative(&self) -> bool {
        matches!(self, Value::Percent(_))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Px(v)
    }
}

// lets bare float literals pass as `impl Into<Value>`
impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Px(v as f32)
    }
}

/// A sparse set of channel values to write to one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    values: [Option<f32>; PROPERTY_COUNT],
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: Property) -> Option<f32> {
        self.values[property.index()]
    }

    pub fn set(&mut self, property: Property, value: f32) {
        self.values[property.index()] = Some(value);
    }

    pub fn with(mut self, property: Property, value: f32) -> Self {
        self.set(property, value);
        self
    }

    /// Overlay `other` on top of `self`; later writes win per channel.
    pub fn merge(&mut self, other: &Style) {
        for (slot, value) in self.values.iter_mut().zip(other.values.iter()) {
            if value.is_some() {
                *slot = *value;
            }
        }
    }

    pub fn mask(&self) -> PropertyMask {
        self.iter()
            .fold(PropertyMask::empty(), |mask, (p, _)| mask | p.mask())
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, f32)> + '_ {
        Property::ALL
            .iter()
            .filter_map(move |p| self.get(*p).map(|v| (*p, v)))
    }

    pub fn remove(&mut self, mask: PropertyMask) {
        for property in mask.properties() {
            self.values[property.index()] = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_later_wins() {
        let mut a = Style::new().with(Property::Opacity, 0.5).with(Property::Y, 10.0);
        let b = Style::new().with(Property::Y, 20.0);
        a.merge(&b);
        assert_eq!(a.get(Property::Opacity), Some(0.5));
        assert_eq!(a.get(Property::Y), Some(20.0));
    }

    #[test]
    fn test_mask_roundtrips_properties() {
        let style = Style::new().with(Property::X, 1.0).with(Property::Rotation, 90.0);
        let mask = style.mask();
        assert_eq!(mask, PropertyMask::X | PropertyMask::ROTATION);
        let props: Vec<_> = mask.properties().collect();
        assert_eq!(props, vec![Property::X, Property::Rotation]);
    }

    #[test]
    fn test_percent_resolves_against_own_box() {
        let rect = Some(Rect::new(0.0, 0.0, 200.0, 400.0));
        assert_eq!(Value::Percent(100.0).resolve(Property::Y, rect), 400.0);
        assert_eq!(Value::Percent(50.0).resolve(Property::X, rect), 100.0);
        assert_eq!(Value::Px(12.0).resolve(Property::Y, rect), 12.0);
    }
}
