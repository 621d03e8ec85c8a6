//! Ready-made effects for pages.
//!
//! Each preset registers the triggers and tweens for one effect and hands
//! back a single [`Disposer`] owning all of them.

mod options;

pub use options::{
    CounterOptions, Direction, Drift, ParallaxOptions, RevealOn, RevealOptions, TextAnimation,
    TextRevealOptions,
};

use crate::animation::TimingFunction;
use crate::animator::Animator;
use crate::error::ConfigError;
use crate::host::{ElementId, Host, Property, Value};
use crate::pin::StackOptions;
use crate::pointer::{is_fine_pointer, CursorFollower, CursorOptions, CursorParts, Magnet};
use crate::scope::{Disposer, Registration};
use crate::trigger::{Anchor, Edge, ToggleActions, TriggerId, TriggerSpec};
use crate::tween::TweenSpec;

/// Magnetic pull used by buttons unless told otherwise
pub const MAGNETIC_STRENGTH: f32 = 0.3;
/// Radius of the magnetic field around a button's center, in px
pub const MAGNETIC_RADIUS: f32 = 200.0;

const HEADING_DISTANCE: f32 = 80.0;
const HEADING_SKEW: f32 = 3.0;
const HEADING_MS: f32 = 1200.0;
const PAGE_ENTER_MS: f32 = 400.0;
const PAGE_ENTER_OFFSET: f32 = 20.0;

/// The fade-and-slide tween behind every reveal, toggled by `trigger`.
pub fn reveal_spec(target: ElementId, trigger: TriggerId, options: &RevealOptions) -> TweenSpec {
    let offset = options.direction.offset(options.distance);
    let mut spec = TweenSpec::new(target).from(Property::Opacity, 0.0);
    if offset.x != 0.0 {
        spec = spec.from(Property::X, offset.x);
    }
    if offset.y != 0.0 {
        spec = spec.from(Property::Y, offset.y);
    }

    let actions = if options.once {
        ToggleActions::PLAY
    } else {
        ToggleActions::PLAY_REVERSE
    };
    spec.duration(options.duration_ms)
        .delay(options.delay_ms)
        .easing(options.easing.clone())
        .toggled_by(trigger, actions)
}

impl Animator {
    fn reveal_start(&self, start: Option<Anchor>) -> Anchor {
        start.unwrap_or_else(|| self.config().reveal_start)
    }

    /// Register a trigger and the tweens `build` derives from it.
    ///
    /// This is the general form behind the presets; use it for one-off
    /// scroll effects such as a line scrubbed in over a section.
    pub fn register_scroll(
        &self,
        trigger: TriggerSpec,
        build: impl FnOnce(TriggerId) -> Vec<TweenSpec>,
    ) -> Result<Disposer, ConfigError> {
        let registration = self.scene().borrow_mut().bind(trigger, build)?;
        Ok(self.disposer(registration))
    }

    /// Fade `element` in when it scrolls into view, reversing when it
    /// scrolls back below the start unless `once` is set.
    pub fn register_fade_in(&self, element: ElementId, options: RevealOptions) -> Result<Disposer, ConfigError> {
        let start = self.reveal_start(options.start);
        self.register_scroll(TriggerSpec::new(element, start).once(options.once), |trigger| {
            vec![reveal_spec(element, trigger, &options)]
        })
    }

    /// Reveal `targets` one after another once `container` scrolls into view.
    pub fn register_staggered_fade_in(
        &self,
        container: ElementId,
        targets: &[ElementId],
        options: RevealOptions,
    ) -> Result<Disposer, ConfigError> {
        if targets.is_empty() {
            return Err(ConfigError::EmptyTargets(container));
        }
        let start = self.reveal_start(options.start);
        self.register_scroll(TriggerSpec::new(container, start).once(options.once), |trigger| {
            reveal_spec(targets[0], trigger, &options).expand_stagger(targets, options.stagger_ms)
        })
    }

    /// Section heading entrance: a taller rise with a slight skew.
    pub fn register_heading(&self, element: ElementId, delay_ms: f32) -> Result<Disposer, ConfigError> {
        let options = RevealOptions::default()
            .delay(delay_ms)
            .duration(HEADING_MS)
            .distance(HEADING_DISTANCE);
        let start = self.reveal_start(None);
        self.register_scroll(TriggerSpec::new(element, start), |trigger| {
            vec![reveal_spec(element, trigger, &options).from(Property::SkewY, HEADING_SKEW)]
        })
    }

    /// Drift `inner` vertically while `container` crosses the viewport.
    pub fn register_parallax(
        &self,
        container: ElementId,
        inner: ElementId,
        options: ParallaxOptions,
    ) -> Result<Disposer, ConfigError> {
        let trigger = TriggerSpec::new(container, Anchor::new(Edge::TOP, Edge::BOTTOM))
            .end(Anchor::new(Edge::BOTTOM, Edge::TOP));
        self.register_scroll(trigger, |trigger| {
            let mut spec = TweenSpec::new(inner)
                .from_to(Property::Y, 0.0, options.travel())
                .easing(TimingFunction::Linear)
                .scrub(trigger);
            if let Some(rotation) = options.rotation {
                spec = spec.from_to(Property::Rotation, 0.0, rotation);
            }
            if let Some(scale) = options.scale {
                spec = spec.from_to(Property::Scale, scale, scale);
            }
            vec![spec]
        })
    }

    /// Pin `section` and stack its cards over the scroll distance.
    pub fn register_pinned_stack(
        &self,
        host: &dyn Host,
        section: ElementId,
        options: StackOptions,
    ) -> Result<Disposer, ConfigError> {
        let id = {
            let mut scene = self.scene().borrow_mut();
            let scene = &mut *scene;
            scene.pins.register_stack(
                host,
                &mut scene.triggers,
                &mut scene.tweens,
                section,
                options,
                scene.config.header_offset,
                scene.config.breakpoint,
                scene.config.reveal_start,
            )?
        };
        Ok(self.disposer(Registration::Pin(id)))
    }

    /// Pin `container` and scroll `track` sideways through its overflow.
    pub fn register_horizontal_scroll(
        &self,
        host: &dyn Host,
        container: ElementId,
        track: ElementId,
    ) -> Result<Disposer, ConfigError> {
        let id = {
            let mut scene = self.scene().borrow_mut();
            let scene = &mut *scene;
            scene
                .pins
                .register_horizontal(host, &mut scene.triggers, container, track)?
        };
        Ok(self.disposer(Registration::Pin(id)))
    }

    /// Count the text of `element` up from zero to `end` when it scrolls
    /// into view.
    pub fn register_counter(
        &self,
        element: ElementId,
        end: f32,
        options: CounterOptions,
    ) -> Result<Disposer, ConfigError> {
        let actions = if options.once {
            ToggleActions::PLAY
        } else {
            ToggleActions::PLAY_REVERSE
        };
        let start = self.reveal_start(None);
        self.register_scroll(TriggerSpec::new(element, start).once(options.once), |trigger| {
            vec![TweenSpec::new(element)
                .duration(options.duration_ms)
                .easing(options.easing.clone())
                .count(0.0, end, options.prefix.clone(), options.suffix.clone())
                .toggled_by(trigger, actions)]
        })
    }

    /// Reveal a block of text. With [`TextAnimation::Split`] each of
    /// `units` (the elements wrapping the pieces from
    /// [`split_text`](crate::tween::split_text)) rises on its own.
    pub fn register_text_reveal(
        &self,
        container: ElementId,
        units: &[ElementId],
        options: TextRevealOptions,
    ) -> Result<Disposer, ConfigError> {
        let base = TweenSpec::new(container)
            .duration(options.duration_ms)
            .delay(options.delay_ms)
            .easing(TimingFunction::PowerOut(4.0));
        let (base, targets): (TweenSpec, Vec<ElementId>) = match options.animation {
            TextAnimation::FadeUp => (
                base.from(Property::Opacity, 0.0).from(Property::Y, 50.0),
                vec![container],
            ),
            TextAnimation::FadeIn => (base.from(Property::Opacity, 0.0), vec![container]),
            TextAnimation::SlideUp => (base.from(Property::Y, Value::Percent(100.0)), vec![container]),
            TextAnimation::Split if units.is_empty() => {
                return Err(ConfigError::EmptyTargets(container));
            }
            TextAnimation::Split => (base.from(Property::Y, Value::Percent(100.0)), units.to_vec()),
        };

        match options.on {
            RevealOn::Load => {
                let specs = base.expand_stagger(&targets, options.stagger_ms);
                let registration = self.scene().borrow_mut().register_tweens(Vec::new(), specs)?;
                Ok(self.disposer(registration))
            }
            RevealOn::Scroll => {
                let start = self.reveal_start(None);
                let actions = if options.once {
                    ToggleActions::PLAY
                } else {
                    ToggleActions::PLAY_REVERSE
                };
                self.register_scroll(TriggerSpec::new(container, start).once(options.once), |trigger| {
                    base.toggled_by(trigger, actions)
                        .expand_stagger(&targets, options.stagger_ms)
                })
            }
        }
    }

    /// Page transition enter: fade the new page's root up into place.
    pub fn register_page_enter(&self, root: ElementId) -> Result<Disposer, ConfigError> {
        self.tween(
            TweenSpec::new(root)
                .from(Property::Opacity, 0.0)
                .from(Property::Y, PAGE_ENTER_OFFSET)
                .duration(PAGE_ENTER_MS)
                .easing(TimingFunction::CubicBezier(0.25, 0.1, 0.25, 1.0)),
        )
    }

    /// Let `element` lean toward the pointer while it is within `radius`.
    pub fn bind_magnetic(&self, element: ElementId, strength: f32, radius: f32) -> Result<Disposer, ConfigError> {
        let magnet = Magnet::new(element, strength, radius)?;
        let id = self.scene().borrow_mut().pointers.bind_magnet(magnet);
        Ok(self.disposer(Registration::Magnet(id)))
    }

    /// Replace the platform cursor with `parts` chasing the pointer.
    ///
    /// On touch or mobile environments, or before a document exists, this
    /// binds nothing and returns a no-op disposer.
    pub fn bind_cursor_follower(&self, host: &dyn Host, options: CursorOptions, parts: CursorParts) -> Disposer {
        let Some(environment) = host.pointer_environment() else {
            log::debug!("No document yet, cursor follower not bound");
            return Disposer::noop();
        };
        if !is_fine_pointer(&environment, options.chromium_only) {
            log::info!("Coarse pointer or unsupported agent, keeping the native cursor");
            return Disposer::noop();
        }

        let id = {
            let mut scene = self.scene().borrow_mut();
            let scene = &mut *scene;
            scene
                .pointers
                .bind_follower(CursorFollower::new(parts, options), &mut scene.writes)
        };
        self.disposer(Registration::Follower(id))
    }
}
