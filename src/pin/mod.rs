//! Pinned sections: hold an element in place while scroll drives what is
//! inside it.
//!
//! A pin is a ranged trigger whose local scroll is consumed by the pinned
//! element: each frame the element is translated down by exactly the
//! distance scrolled past the pin start, so it stays still on screen, and
//! the section reserves the pin distance as spacing so the content below
//! resumes where it should once the pin releases.
//!
//! Two layouts are built on that primitive:
//!
//! - a **card stack** ([`PinController::register_stack`]), where card 0
//!   enters when the pin engages and every later card is scrubbed in over
//!   its own slot (see [`StackLayout`]). Below the mobile breakpoint the
//!   stack is not pinned at all; every card fades in on its own.
//! - a **horizontal track** ([`PinController::register_horizontal`]),
//!   scrolled sideways by the vertical distance consumed.
//!
//! Distances depend on the viewport and on child sizes, so
//! [`PinController::refresh`] recomputes every pin, including switching a
//! stack between its pinned and list modes when the breakpoint is crossed.

mod stack;

pub use stack::StackLayout;

use slotmap::{new_key_type, SlotMap};

use crate::animation::TimingFunction;
use crate::error::ConfigError;
use crate::host::{ElementId, Host, Property, PropertyMask, Style, Value};
use crate::jobs::WriteQueue;
use crate::presets::{reveal_spec, RevealOptions};
use crate::trigger::{Anchor, Edge, EndAnchor, ToggleActions, TriggerId, TriggerRegistry, TriggerSpec};
use crate::tween::{TweenEngine, TweenId, TweenSpec};

new_key_type! {
    /// Handle to a pinned section.
    pub struct PinId;
}

/// Scroll units consumed per card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinDistance {
    Fixed(f32),
    /// Fraction of the viewport height
    ViewportFraction(f32),
    /// Height of the first card
    ChildHeight,
}

impl PinDistance {
    fn resolve(&self, host: &dyn Host, cards: &[ElementId]) -> f32 {
        match *self {
            PinDistance::Fixed(distance) => distance,
            PinDistance::ViewportFraction(fraction) => host.viewport().height * fraction,
            PinDistance::ChildHeight => cards
                .first()
                .and_then(|card| host.measure(*card).ok())
                .map(|rect| rect.height)
                .unwrap_or(0.0),
        }
    }
}

/// Options for a pinned card stack.
#[derive(Debug, Clone, PartialEq)]
pub struct StackOptions {
    /// Class selector of the cards inside the section
    pub child_selector: String,
    /// Element held in place; the section itself when `None`
    pub pin_selector: Option<String>,
    pub distance: PinDistance,
    /// Falls back to the animator's header offset when `None`
    pub header_offset: Option<f32>,
    pub lead: f32,
    pub stack_offset: f32,
    /// Falls back to the animator's breakpoint when `None`
    pub breakpoint: Option<f32>,
}

impl Default for StackOptions {
    fn default() -> Self {
        Self {
            child_selector: ".stacking-card".to_string(),
            pin_selector: None,
            distance: PinDistance::Fixed(500.0),
            header_offset: None,
            lead: 100.0,
            stack_offset: 10.0,
            breakpoint: None,
        }
    }
}

impl StackOptions {
    pub fn child_selector(mut self, selector: impl Into<String>) -> Self {
        self.child_selector = selector.into();
        self
    }

    pub fn pin_selector(mut self, selector: impl Into<String>) -> Self {
        self.pin_selector = Some(selector.into());
        self
    }

    pub fn distance(mut self, distance: PinDistance) -> Self {
        self.distance = distance;
        self
    }

    pub fn header_offset(mut self, offset: f32) -> Self {
        self.header_offset = Some(offset);
        self
    }

    pub fn lead(mut self, lead: f32) -> Self {
        self.lead = lead;
        self
    }

    pub fn stack_offset(mut self, offset: f32) -> Self {
        self.stack_offset = offset;
        self
    }

    pub fn breakpoint(mut self, width: f32) -> Self {
        self.breakpoint = Some(width);
        self
    }
}

/// Duration of card 0's entrance
const FIRST_CARD_MS: f32 = 800.0;
/// Delay between cards in the mobile list
const LIST_STAGGER_MS: f32 = 100.0;

/// The part every pin shares: a ranged trigger and the element it holds.
struct Hold {
    section: ElementId,
    pinned: ElementId,
    trigger: TriggerId,
    distance: f32,
    /// (translate, spacing) last queued
    written: Option<(f32, f32)>,
}

impl Hold {
    /// Queue this frame's hold translation; returns the local scroll.
    fn evaluate(&mut self, triggers: &TriggerRegistry, writes: &mut WriteQueue) -> Option<f32> {
        let bounds = triggers.get(self.trigger)?.bounds()?;
        let local = bounds.local_scroll();
        let state = (local, self.distance);
        if self.written != Some(state) {
            writes.push_style(self.pinned, &Style::new().with(Property::Y, local));
            writes.push_style(
                self.section,
                &Style::new().with(Property::PinSpacing, self.distance),
            );
            self.written = Some(state);
        }
        Some(local)
    }

    fn release(self, triggers: &mut TriggerRegistry, writes: &mut WriteQueue) {
        triggers.unregister(self.trigger);
        if self.written.is_some() {
            writes.push_revert(self.pinned, PropertyMask::Y);
            writes.push_revert(self.section, PropertyMask::PIN_SPACING);
        }
    }
}

enum StackMode {
    Pinned {
        hold: Hold,
        /// Card 0's entrance, toggled when the pin engages
        first: (TriggerId, TweenId),
        /// Scrubbed entrances of cards 1..
        rest: Vec<(TriggerId, TweenId)>,
    },
    List {
        reveals: Vec<(TriggerId, TweenId)>,
    },
}

struct CardStack {
    section: ElementId,
    pinned: ElementId,
    cards: Vec<ElementId>,
    options: StackOptions,
    breakpoint: f32,
    layout: StackLayout,
    mode: StackMode,
}

struct HorizontalTrack {
    hold: Hold,
    container: ElementId,
    track: ElementId,
    /// Last queued track offset
    written: Option<f32>,
}

enum Pin {
    Stack(CardStack),
    Horizontal(HorizontalTrack),
}

impl Pin {
    /// Whether this pin holds `element` or reserves spacing on it.
    fn claims(&self, element: ElementId) -> bool {
        match self {
            Pin::Stack(stack) => stack.section == element || stack.pinned == element,
            Pin::Horizontal(horizontal) => {
                horizontal.hold.section == element || horizontal.hold.pinned == element
            }
        }
    }
}

fn release_pairs(
    pairs: Vec<(TriggerId, TweenId)>,
    triggers: &mut TriggerRegistry,
    tweens: &mut TweenEngine,
    writes: &mut WriteQueue,
) {
    for (trigger, tween) in pairs.into_iter().rev() {
        tweens.remove(tween, writes);
        triggers.unregister(trigger);
    }
}

impl CardStack {
    fn build_pinned(
        &self,
        triggers: &mut TriggerRegistry,
        tweens: &mut TweenEngine,
    ) -> Result<StackMode, ConfigError> {
        let layout = self.layout;
        let trigger = triggers.register(
            TriggerSpec::new(self.section, layout.pin_start()).end(layout.pin_end()),
        );
        let hold = Hold {
            section: self.section,
            pinned: self.pinned,
            trigger,
            distance: layout.total_distance(),
            written: None,
        };

        let first_card = self.cards[0];
        let first_trigger = triggers.register(TriggerSpec::new(self.section, layout.pin_start()));
        let first_tween = tweens.register(
            TweenSpec::new(first_card)
                .from_to(Property::Opacity, 0.0, 1.0)
                .from_to(Property::Y, Value::Percent(100.0), layout.resting_offset(0))
                .duration(FIRST_CARD_MS)
                .easing(TimingFunction::PowerOut(4.0))
                .toggled_by(first_trigger, ToggleActions::PLAY),
            triggers,
        )?;

        let mut rest = Vec::with_capacity(self.cards.len() - 1);
        for (index, card) in self.cards.iter().enumerate().skip(1) {
            let (start, end) = layout.card_anchors(index);
            let card_trigger = triggers.register(TriggerSpec::new(self.section, start).end(end));
            let tween = tweens.register(
                TweenSpec::new(*card)
                    .from_to(Property::Y, Value::Percent(100.0), layout.resting_offset(index))
                    .from_to(Property::Opacity, 0.0, 1.0)
                    .easing(TimingFunction::PowerOut(3.0))
                    .scrub(card_trigger),
                triggers,
            )?;
            rest.push((card_trigger, tween));
        }

        log::debug!(
            "Pinned {} cards on {:?} for {}px",
            self.cards.len(),
            self.section,
            layout.total_distance()
        );
        Ok(StackMode::Pinned {
            hold,
            first: (first_trigger, first_tween),
            rest,
        })
    }

    fn build_list(
        &self,
        start: Anchor,
        triggers: &mut TriggerRegistry,
        tweens: &mut TweenEngine,
    ) -> Result<StackMode, ConfigError> {
        let mut reveals = Vec::with_capacity(self.cards.len());
        for (index, card) in self.cards.iter().enumerate() {
            let trigger = triggers.register(TriggerSpec::new(*card, start));
            let options = RevealOptions::default().delay(index as f32 * LIST_STAGGER_MS);
            let tween = tweens.register(reveal_spec(*card, trigger, &options), triggers)?;
            reveals.push((trigger, tween));
        }
        log::debug!("Stack on {:?} rendered as a list", self.section);
        Ok(StackMode::List { reveals })
    }

    fn is_pinned(&self) -> bool {
        matches!(self.mode, StackMode::Pinned { .. })
    }

    fn teardown(
        mode: StackMode,
        triggers: &mut TriggerRegistry,
        tweens: &mut TweenEngine,
        writes: &mut WriteQueue,
    ) {
        match mode {
            StackMode::Pinned { hold, first, rest } => {
                release_pairs(rest, triggers, tweens, writes);
                release_pairs(vec![first], triggers, tweens, writes);
                hold.release(triggers, writes);
            }
            StackMode::List { reveals } => release_pairs(reveals, triggers, tweens, writes),
        }
    }
}

/// Owner of every pinned section.
#[derive(Default)]
pub struct PinController {
    pins: SlotMap<PinId, Pin>,
}

impl PinController {
    pub fn new() -> Self {
        Self::default()
    }

    /// One pin per element: a second would consume the same scroll distance.
    fn ensure_unclaimed(&self, elements: &[ElementId]) -> Result<(), ConfigError> {
        match elements
            .iter()
            .find(|el| self.pins.values().any(|pin| pin.claims(**el)))
        {
            Some(el) => Err(ConfigError::SectionAlreadyPinned(*el)),
            None => Ok(()),
        }
    }

    /// Pin `section` and stack the cards matching `options.child_selector`.
    ///
    /// `header_offset`, `breakpoint` and `list_start` are the animator-wide
    /// defaults for options left unset.
    #[allow(clippy::too_many_arguments)]
    pub fn register_stack(
        &mut self,
        host: &dyn Host,
        triggers: &mut TriggerRegistry,
        tweens: &mut TweenEngine,
        section: ElementId,
        options: StackOptions,
        header_offset: f32,
        breakpoint: f32,
        list_start: Anchor,
    ) -> Result<PinId, ConfigError> {
        let cards = host.query(section, &options.child_selector);
        if cards.is_empty() {
            return Err(ConfigError::EmptyPinSequence {
                section,
                selector: options.child_selector,
            });
        }

        let pinned = match &options.pin_selector {
            Some(selector) => host.query(section, selector).first().copied().ok_or_else(|| {
                ConfigError::EmptyPinSequence {
                    section,
                    selector: selector.clone(),
                }
            })?,
            None => section,
        };
        self.ensure_unclaimed(&[section, pinned])?;

        let distance = options.distance.resolve(host, &cards);
        if !distance.is_finite() || distance <= 0.0 {
            return Err(ConfigError::InvalidDistance(distance));
        }
        if options.lead < 0.0 || options.lead >= distance {
            return Err(ConfigError::LeadExceedsDistance {
                lead: options.lead,
                distance,
            });
        }

        let layout = StackLayout {
            count: cards.len(),
            distance,
            lead: options.lead,
            header_offset: options.header_offset.unwrap_or(header_offset),
            stack_offset: options.stack_offset,
        };
        let breakpoint = options.breakpoint.unwrap_or(breakpoint);

        let mut stack = CardStack {
            section,
            pinned,
            cards,
            options,
            breakpoint,
            layout,
            // replaced below once the real mode is built
            mode: StackMode::List { reveals: Vec::new() },
        };
        stack.mode = if host.viewport().width < breakpoint {
            stack.build_list(list_start, triggers, tweens)?
        } else {
            stack.build_pinned(triggers, tweens)?
        };

        Ok(self.pins.insert(Pin::Stack(stack)))
    }

    /// Pin `container` while `track` scrolls sideways by its overflow.
    pub fn register_horizontal(
        &mut self,
        host: &dyn Host,
        triggers: &mut TriggerRegistry,
        container: ElementId,
        track: ElementId,
    ) -> Result<PinId, ConfigError> {
        self.ensure_unclaimed(&[container])?;
        let distance = Self::overflow(host, container, track);
        if distance <= 0.0 {
            return Err(ConfigError::InvalidDistance(distance));
        }

        let trigger = triggers.register(
            TriggerSpec::new(container, Anchor::new(Edge::TOP, Edge::TOP))
                .end(EndAnchor::Relative(distance)),
        );
        Ok(self.pins.insert(Pin::Horizontal(HorizontalTrack {
            hold: Hold {
                section: container,
                pinned: container,
                trigger,
                distance,
                written: None,
            },
            container,
            track,
            written: None,
        })))
    }

    fn overflow(host: &dyn Host, container: ElementId, track: ElementId) -> f32 {
        match (host.measure(container), host.measure(track)) {
            (Ok(container), Ok(track)) => track.width - container.width,
            _ => 0.0,
        }
    }

    /// Remove a pin and everything it registered. Returns `false` if it
    /// was already gone.
    pub fn remove(
        &mut self,
        id: PinId,
        triggers: &mut TriggerRegistry,
        tweens: &mut TweenEngine,
        writes: &mut WriteQueue,
    ) -> bool {
        match self.pins.remove(id) {
            Some(Pin::Stack(stack)) => {
                CardStack::teardown(stack.mode, triggers, tweens, writes);
                true
            }
            Some(Pin::Horizontal(horizontal)) => {
                if horizontal.written.is_some() {
                    writes.push_revert(horizontal.track, PropertyMask::X);
                }
                horizontal.hold.release(triggers, writes);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Total scroll distance the pin consumes; zero for a stack in list mode.
    pub fn total_distance(&self, id: PinId) -> Option<f32> {
        self.pins.get(id).map(|pin| match pin {
            Pin::Stack(stack) if stack.is_pinned() => stack.layout.total_distance(),
            Pin::Stack(_) => 0.0,
            Pin::Horizontal(horizontal) => horizontal.hold.distance,
        })
    }

    /// Whether a stack is currently pinned (desktop) rather than a list.
    pub fn is_stacked(&self, id: PinId) -> bool {
        matches!(self.pins.get(id), Some(Pin::Stack(stack)) if stack.is_pinned())
    }

    /// Whether the section is currently held in place.
    pub fn is_holding(&self, id: PinId, triggers: &TriggerRegistry) -> bool {
        let hold = match self.pins.get(id) {
            Some(Pin::Stack(CardStack {
                mode: StackMode::Pinned { hold, .. },
                ..
            })) => hold,
            Some(Pin::Horizontal(horizontal)) => &horizontal.hold,
            _ => return false,
        };
        triggers
            .get(hold.trigger)
            .is_some_and(|t| t.state() == crate::trigger::TriggerState::Active)
    }

    /// Topmost card of a pinned stack that has started entering.
    pub fn active_child(&self, id: PinId, triggers: &TriggerRegistry) -> Option<usize> {
        match self.pins.get(id)? {
            Pin::Stack(CardStack {
                mode: StackMode::Pinned { hold, .. },
                layout,
                ..
            }) => {
                let local = triggers.get(hold.trigger)?.bounds()?.local_scroll();
                Some(layout.active_child(local))
            }
            _ => None,
        }
    }

    /// Recompute distances and anchors, switching stacks between pinned
    /// and list mode when the viewport crosses their breakpoint.
    pub fn refresh(
        &mut self,
        host: &dyn Host,
        triggers: &mut TriggerRegistry,
        tweens: &mut TweenEngine,
        writes: &mut WriteQueue,
        list_start: Anchor,
    ) {
        let width = host.viewport().width;

        for pin in self.pins.values_mut() {
            match pin {
                Pin::Stack(stack) => {
                    let distance = stack.options.distance.resolve(host, &stack.cards);
                    if distance.is_finite() && distance > 0.0 {
                        stack.layout.distance = distance;
                    } else {
                        log::warn!(
                            "Stack on {:?} measured an invalid distance {}, keeping {}",
                            stack.section,
                            distance,
                            stack.layout.distance
                        );
                    }

                    let want_pinned = width >= stack.breakpoint;
                    if want_pinned != stack.is_pinned() {
                        log::info!(
                            "Viewport {}px crossed breakpoint {}px, rebuilding stack on {:?}",
                            width,
                            stack.breakpoint,
                            stack.section
                        );
                        let placeholder = StackMode::List { reveals: Vec::new() };
                        let old = std::mem::replace(&mut stack.mode, placeholder);
                        CardStack::teardown(old, triggers, tweens, writes);
                        let rebuilt = if want_pinned {
                            stack.build_pinned(triggers, tweens)
                        } else {
                            stack.build_list(list_start, triggers, tweens)
                        };
                        match rebuilt {
                            Ok(mode) => stack.mode = mode,
                            Err(e) => log::warn!("Stack rebuild failed: {}", e),
                        }
                        continue;
                    }

                    let layout = stack.layout;
                    if let StackMode::Pinned { hold, rest, .. } = &mut stack.mode {
                        hold.distance = layout.total_distance();
                        triggers.set_range(hold.trigger, layout.pin_start(), Some(layout.pin_end()));
                        for (index, (trigger, _)) in rest.iter().enumerate() {
                            let (start, end) = layout.card_anchors(index + 1);
                            triggers.set_range(*trigger, start, Some(end));
                        }
                    }
                }
                Pin::Horizontal(horizontal) => {
                    let distance = Self::overflow(host, horizontal.container, horizontal.track);
                    if distance > 0.0 {
                        horizontal.hold.distance = distance;
                        triggers.set_range(
                            horizontal.hold.trigger,
                            Anchor::new(Edge::TOP, Edge::TOP),
                            Some(EndAnchor::Relative(distance)),
                        );
                    }
                }
            }
        }
    }

    /// Queue this frame's hold translations and track offsets.
    pub fn evaluate(&mut self, triggers: &TriggerRegistry, writes: &mut WriteQueue) {
        for pin in self.pins.values_mut() {
            match pin {
                Pin::Stack(stack) => {
                    if let StackMode::Pinned { hold, .. } = &mut stack.mode {
                        hold.evaluate(triggers, writes);
                    }
                }
                Pin::Horizontal(horizontal) => {
                    if let Some(local) = horizontal.hold.evaluate(triggers, writes) {
                        let x = -local;
                        if horizontal.written != Some(x) {
                            writes.push_style(horizontal.track, &Style::new().with(Property::X, x));
                            horizontal.written = Some(x);
                        }
                    }
                }
            }
        }
    }
}
