//! Decorative cursor: a dot and a ring chasing the pointer on springs.

use crate::animation::{Spring, SpringConfig};
use crate::geometry::Point;
use crate::host::{ElementId, HoverTarget, PointerEnvironment, Property, Style};
use crate::jobs::WriteQueue;

const MOBILE_AGENTS: [&str; 8] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Whether the environment guarantees a real mouse.
///
/// Touch capability of any kind, or a mobile user agent, rules the
/// decorative cursor out. With `chromium_only` the agent must also be
/// Chrome proper (not Edge or Opera).
pub fn is_fine_pointer(environment: &PointerEnvironment, chromium_only: bool) -> bool {
    if environment.has_touch_events || environment.max_touch_points > 0 {
        return false;
    }

    let agent = environment.user_agent.to_lowercase();
    if MOBILE_AGENTS.iter().any(|token| agent.contains(token)) {
        return false;
    }

    if chromium_only {
        let ua = &environment.user_agent;
        return ua.contains("Chrome") && !ua.contains("Edg") && !ua.contains("OPR");
    }
    true
}

#[derive(Debug, Clone, PartialEq)]
pub struct CursorOptions {
    /// Only activate on Chrome desktop
    pub chromium_only: bool,
    pub ring_size: f32,
    pub ring_hover_size: f32,
    /// Ring fill alpha while hovering
    pub hover_fill: f32,
    /// Scale of dot and ring while the button is held
    pub click_scale: f32,
}

impl Default for CursorOptions {
    fn default() -> Self {
        Self {
            chromium_only: false,
            ring_size: 28.0,
            ring_hover_size: 64.0,
            hover_fill: 0.1,
            click_scale: 0.8,
        }
    }
}

impl CursorOptions {
    pub fn chromium_only(mut self, chromium_only: bool) -> Self {
        self.chromium_only = chromium_only;
        self
    }

    pub fn ring_sizes(mut self, rest: f32, hover: f32) -> Self {
        self.ring_size = rest;
        self.ring_hover_size = hover;
        self
    }

    pub fn click_scale(mut self, scale: f32) -> Self {
        self.click_scale = scale;
        self
    }
}

/// Elements making up the decorative cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorParts {
    pub dot: ElementId,
    pub ring: ElementId,
    /// Text shown inside the ring over labeled targets
    pub label: Option<ElementId>,
}

pub struct CursorFollower {
    parts: CursorParts,
    options: CursorOptions,
    x: Spring,
    y: Spring,
    ring: Spring,
    fill: Spring,
    click: Spring,
    /// Raw pointer seen at least once
    tracking: bool,
    label: String,
    label_dirty: bool,
    written: Option<[f32; 6]>,
}

impl CursorFollower {
    pub fn new(parts: CursorParts, options: CursorOptions) -> Self {
        Self {
            parts,
            x: Spring::new(0.0, SpringConfig::CURSOR),
            y: Spring::new(0.0, SpringConfig::CURSOR),
            ring: Spring::new(options.ring_size, SpringConfig::RING),
            fill: Spring::new(0.0, SpringConfig::RING),
            click: Spring::new(1.0, SpringConfig::CLICK),
            options,
            tracking: false,
            label: String::new(),
            label_dirty: false,
            written: None,
        }
    }

    pub fn parts(&self) -> CursorParts {
        self.parts
    }

    /// Smoothed position.
    pub fn position(&self) -> Point {
        Point::new(self.x.position, self.y.position)
    }

    pub fn ring_size(&self) -> f32 {
        self.ring.position
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn pointer_moved(&mut self, position: Point, hover: Option<&HoverTarget>) {
        if self.tracking {
            self.x.set_target(position.x);
            self.y.set_target(position.y);
        } else {
            // first sighting: appear under the pointer instead of flying in
            self.x.snap(position.x);
            self.y.snap(position.y);
            self.tracking = true;
        }

        let (size, fill) = match hover {
            Some(_) => (self.options.ring_hover_size, self.options.hover_fill),
            None => (self.options.ring_size, 0.0),
        };
        self.ring.set_target(size);
        self.fill.set_target(fill);

        let label = hover.and_then(|h| h.label.clone()).unwrap_or_default();
        if label != self.label {
            self.label = label;
            self.label_dirty = true;
        }
    }

    pub fn pressed(&mut self, down: bool) {
        let scale = if down { self.options.click_scale } else { 1.0 };
        self.click.set_target(scale);
    }

    pub fn left(&mut self) {
        self.ring.set_target(self.options.ring_size);
        self.fill.set_target(0.0);
        self.click.set_target(1.0);
        if !self.label.is_empty() {
            self.label.clear();
            self.label_dirty = true;
        }
    }

    pub fn step(&mut self, dt_secs: f32, writes: &mut WriteQueue) {
        let values = [
            self.x.step(dt_secs),
            self.y.step(dt_secs),
            self.click.step(dt_secs),
            self.ring.step(dt_secs),
            self.fill.step(dt_secs),
            self.tracking as u8 as f32,
        ];

        if self.tracking && self.written != Some(values) {
            let [x, y, scale, size, fill, _] = values;
            writes.push_style(
                self.parts.dot,
                &Style::new()
                    .with(Property::X, x)
                    .with(Property::Y, y)
                    .with(Property::Scale, scale),
            );
            writes.push_style(
                self.parts.ring,
                &Style::new()
                    .with(Property::X, x)
                    .with(Property::Y, y)
                    .with(Property::Scale, scale)
                    .with(Property::Width, size)
                    .with(Property::Height, size)
                    .with(Property::FillOpacity, fill),
            );
            self.written = Some(values);
        }

        if self.label_dirty {
            if let Some(label) = self.parts.label {
                writes.push_text(label, self.label.clone());
            }
            self.label_dirty = false;
        }
    }

    /// Queue reverts for everything this follower wrote.
    pub fn release(&self, writes: &mut WriteQueue) {
        if self.written.is_some() {
            let dot = Property::X.mask() | Property::Y.mask() | Property::Scale.mask();
            writes.push_revert(self.parts.dot, dot);
            writes.push_revert(
                self.parts.ring,
                dot | Property::Width.mask()
                    | Property::Height.mask()
                    | Property::FillOpacity.mask(),
            );
        }
        if let Some(label) = self.parts.label {
            if !self.label.is_empty() {
                writes.push_text(label, String::new());
            }
        }
    }
}
