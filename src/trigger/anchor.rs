//! Scroll anchors: where along the scroll axis a trigger starts and ends.
//!
//! An anchor pairs an edge of the element with an edge of the viewport and
//! resolves to the scroll offset at which the two meet. `"top 85%"` is the
//! offset where the element's top reaches 85% of the viewport height;
//! `"top+=1100 top+=96"` is where a point 1100px below the element's top
//! reaches 96px below the viewport top.

use std::str::FromStr;

use crate::error::ConfigError;
use crate::geometry::{Rect, Viewport};

/// A line across a box: a fraction of its height plus a pixel offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub fraction: f32,
    pub offset: f32,
}

impl Edge {
    pub const TOP: Self = Self::new(0.0, 0.0);
    pub const CENTER: Self = Self::new(0.5, 0.0);
    pub const BOTTOM: Self = Self::new(1.0, 0.0);

    pub const fn new(fraction: f32, offset: f32) -> Self {
        Self { fraction, offset }
    }

    pub fn percent(percent: f32) -> Self {
        Self::new(percent / 100.0, 0.0)
    }

    pub fn plus(self, px: f32) -> Self {
        Self::new(self.fraction, self.offset + px)
    }

    fn resolve(&self, extent: f32) -> f32 {
        self.fraction * extent + self.offset
    }
}

impl FromStr for Edge {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidAnchor(s.to_string());

        let (base, offset) = match s.find("+=").or_else(|| s.find("-=")) {
            Some(pos) => {
                let amount: f32 = s[pos + 2..].trim().parse().map_err(|_| invalid())?;
                let sign = if &s[pos..pos + 1] == "-" { -1.0 } else { 1.0 };
                (&s[..pos], sign * amount)
            }
            None => (s, 0.0),
        };

        let edge = match base {
            "top" => Edge::TOP,
            "center" => Edge::CENTER,
            "bottom" => Edge::BOTTOM,
            _ => {
                if let Some(pct) = base.strip_suffix('%') {
                    Edge::percent(pct.parse().map_err(|_| invalid())?)
                } else {
                    let px = base.strip_suffix("px").unwrap_or(base);
                    Edge::new(0.0, px.parse().map_err(|_| invalid())?)
                }
            }
        };

        Ok(edge.plus(offset))
    }
}

/// The scroll offset where an element edge meets a viewport edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub element: Edge,
    pub viewport: Edge,
}

impl Anchor {
    pub fn new(element: Edge, viewport: Edge) -> Self {
        Self { element, viewport }
    }

    /// Resolve against `rect` (viewport-relative) at the current `scroll_y`.
    pub fn scroll_position(&self, rect: Rect, scroll_y: f32, viewport: Viewport) -> f32 {
        let doc_top = rect.y + scroll_y;
        doc_top + self.element.resolve(rect.height) - self.viewport.resolve(viewport.height)
    }
}

impl FromStr for Anchor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(element), Some(viewport), None) => {
                Ok(Anchor::new(element.parse()?, viewport.parse()?))
            }
            _ => Err(ConfigError::InvalidAnchor(s.to_string())),
        }
    }
}

/// End boundary of a ranged trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EndAnchor {
    At(Anchor),
    /// A fixed distance past the start.
    Relative(f32),
}

impl EndAnchor {
    pub fn scroll_position(&self, start: f32, rect: Rect, scroll_y: f32, viewport: Viewport) -> f32 {
        match self {
            EndAnchor::At(anchor) => anchor.scroll_position(rect, scroll_y, viewport),
            EndAnchor::Relative(distance) => start + distance,
        }
    }
}

impl FromStr for EndAnchor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().strip_prefix("+=") {
            Some(distance) => distance
                .trim()
                .parse()
                .map(EndAnchor::Relative)
                .map_err(|_| ConfigError::InvalidAnchor(s.to_string())),
            None => s.parse().map(EndAnchor::At),
        }
    }
}

impl From<Anchor> for EndAnchor {
    fn from(anchor: Anchor) -> Self {
        EndAnchor::At(anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(1440.0, 1000.0)
    }

    #[test]
    fn test_parse_keywords_and_percent() {
        let anchor: Anchor = "top 85%".parse().unwrap();
        assert_eq!(anchor.element, Edge::TOP);
        assert!((anchor.viewport.fraction - 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_parse_offsets() {
        let anchor: Anchor = "top+=1100 top+=96".parse().unwrap();
        assert_eq!(anchor.element, Edge::new(0.0, 1100.0));
        assert_eq!(anchor.viewport, Edge::new(0.0, 96.0));

        let edge: Edge = "bottom-=20".parse().unwrap();
        assert_eq!(edge, Edge::new(1.0, -20.0));

        let px: Edge = "120px".parse().unwrap();
        assert_eq!(px, Edge::new(0.0, 120.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("top".parse::<Anchor>().is_err());
        assert!("top middle".parse::<Anchor>().is_err());
        assert!("top 85% extra".parse::<Anchor>().is_err());
        assert!("+=abc".parse::<EndAnchor>().is_err());
    }

    #[test]
    fn test_scroll_position() {
        // element 2000px down the document, currently scrolled 500px
        let rect = Rect::new(0.0, 1500.0, 800.0, 600.0);
        let start: Anchor = "top 85%".parse().unwrap();
        assert_eq!(start.scroll_position(rect, 500.0, viewport()), 2000.0 - 850.0);

        let end: EndAnchor = "bottom top".parse().unwrap();
        assert_eq!(end.scroll_position(0.0, rect, 500.0, viewport()), 2600.0);

        let relative: EndAnchor = "+=2500".parse().unwrap();
        assert_eq!(relative.scroll_position(1904.0, rect, 500.0, viewport()), 4404.0);
    }

    #[test]
    fn test_position_is_scroll_invariant() {
        let anchor: Anchor = "top top+=96".parse().unwrap();
        let doc = Rect::new(0.0, 3000.0, 800.0, 600.0);
        let a = anchor.scroll_position(doc.offset(0.0, -100.0), 100.0, viewport());
        let b = anchor.scroll_position(doc.offset(0.0, -2500.0), 2500.0, viewport());
        assert_eq!(a, b);
        assert_eq!(a, 2904.0);
    }
}
