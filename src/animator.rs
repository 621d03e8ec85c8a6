//! The per-frame driver tying triggers, tweens, pins and pointer effects
//! together.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ConfigError;
use crate::geometry::Viewport;
use crate::host::Host;
use crate::jobs::WriteQueue;
use crate::pin::{PinController, PinId};
use crate::pointer::{PointerEffects, PointerEvent};
use crate::scope::{Disposer, PageScope, Registration};
use crate::trigger::{Anchor, Edge, TriggerId, TriggerRegistry, TriggerSpec};
use crate::tween::{Timeline, TweenEngine, TweenSpec};

#[derive(Debug, Clone, PartialEq)]
pub struct AnimatorConfig {
    /// Viewport width below which pinned stacks render as plain lists
    pub breakpoint: f32,
    /// Height of the fixed header pins engage under
    pub header_offset: f32,
    /// Where scroll reveals start unless told otherwise
    pub reveal_start: Anchor,
    /// Consecutive unmeasurable frames before a trigger counts as detached
    pub detach_threshold: u32,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            breakpoint: 1024.0,
            header_offset: 96.0,
            reveal_start: Anchor::new(Edge::TOP, Edge::percent(85.0)),
            detach_threshold: 60,
        }
    }
}

impl AnimatorConfig {
    pub fn breakpoint(mut self, width: f32) -> Self {
        self.breakpoint = width;
        self
    }

    pub fn header_offset(mut self, offset: f32) -> Self {
        self.header_offset = offset;
        self
    }

    pub fn reveal_start(mut self, anchor: Anchor) -> Self {
        self.reveal_start = anchor;
        self
    }

    pub fn detach_threshold(mut self, frames: u32) -> Self {
        self.detach_threshold = frames;
        self
    }
}

/// Everything the animator owns, shared with the disposers it hands out.
pub(crate) struct Scene {
    pub(crate) config: AnimatorConfig,
    pub(crate) triggers: TriggerRegistry,
    pub(crate) tweens: TweenEngine,
    pub(crate) pins: PinController,
    pub(crate) pointers: PointerEffects,
    pub(crate) writes: WriteQueue,
    last_time_ms: Option<f64>,
    last_viewport: Option<Viewport>,
}

impl Scene {
    fn new(config: AnimatorConfig) -> Self {
        Self {
            triggers: TriggerRegistry::new(config.detach_threshold),
            tweens: TweenEngine::new(),
            pins: PinController::new(),
            pointers: PointerEffects::new(),
            writes: WriteQueue::new(),
            last_time_ms: None,
            last_viewport: None,
            config,
        }
    }

    pub(crate) fn release(&mut self, registration: Registration) {
        match registration {
            Registration::Trigger(id) => {
                self.triggers.unregister(id);
            }
            Registration::Tween(id) => {
                self.tweens.remove(id, &mut self.writes);
            }
            Registration::Pin(id) => {
                self.pins
                    .remove(id, &mut self.triggers, &mut self.tweens, &mut self.writes);
            }
            Registration::Follower(id) => {
                self.pointers.remove_follower(id, &mut self.writes);
            }
            Registration::Magnet(id) => {
                self.pointers.remove_magnet(id, &mut self.writes);
            }
            Registration::Group(registrations) => {
                for registration in registrations.into_iter().rev() {
                    self.release(registration);
                }
            }
        }
    }

    /// Register tweens as one unit; if any is rejected, the ones already
    /// registered are released again.
    pub(crate) fn register_tweens(
        &mut self,
        mut group: Vec<Registration>,
        specs: Vec<TweenSpec>,
    ) -> Result<Registration, ConfigError> {
        for spec in specs {
            match self.tweens.register(spec, &self.triggers) {
                Ok(id) => group.push(Registration::Tween(id)),
                Err(e) => {
                    self.release(Registration::Group(group));
                    return Err(e);
                }
            }
        }
        Ok(Registration::Group(group))
    }

    /// Register a trigger and the tweens it drives as one unit.
    pub(crate) fn bind(
        &mut self,
        trigger: TriggerSpec,
        build: impl FnOnce(TriggerId) -> Vec<TweenSpec>,
    ) -> Result<Registration, ConfigError> {
        let id = self.triggers.register(trigger);
        let specs = build(id);
        self.register_tweens(vec![Registration::Trigger(id)], specs)
    }

    fn refresh(&mut self, host: &dyn Host) {
        let start = self.config.reveal_start;
        self.pins
            .refresh(host, &mut self.triggers, &mut self.tweens, &mut self.writes, start);
    }
}

/// Scroll and pointer animation driver.
///
/// Call [`tick`](Self::tick) once per display refresh and
/// [`pointer_event`](Self::pointer_event) from pointer handlers. All
/// registration methods return a [`Disposer`].
pub struct Animator {
    scene: Rc<RefCell<Scene>>,
    page: PageScope,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator {
    pub fn new() -> Self {
        Self::with_config(AnimatorConfig::default())
    }

    pub fn with_config(config: AnimatorConfig) -> Self {
        Self {
            scene: Rc::new(RefCell::new(Scene::new(config))),
            page: PageScope::new(),
        }
    }

    pub fn config(&self) -> AnimatorConfig {
        self.scene.borrow().config.clone()
    }

    pub(crate) fn scene(&self) -> &Rc<RefCell<Scene>> {
        &self.scene
    }

    pub(crate) fn disposer(&self, registration: Registration) -> Disposer {
        Disposer::new(&self.scene, registration)
    }

    /// Run one frame at `time_ms` (a monotonic clock).
    pub fn tick(&self, host: &mut dyn Host, time_ms: f64) {
        let (dt_ms, calls) = {
            let mut scene = self.scene.borrow_mut();
            let scene = &mut *scene;

            let dt_ms = match scene.last_time_ms {
                Some(last) => (time_ms - last).max(0.0) as f32,
                None => 0.0,
            };
            scene.last_time_ms = Some(time_ms);

            let viewport = host.viewport();
            if scene.last_viewport.is_some_and(|last| last != viewport) {
                log::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
                scene.refresh(host);
            }
            scene.last_viewport = Some(viewport);

            let events = scene.triggers.measure(host);
            for event in &events {
                scene.tweens.handle_event(event);
            }
            (dt_ms, scene.triggers.listeners_for(&events))
        };

        // no borrow held: listeners may dispose registrations
        for (listener, event) in calls {
            match listener.try_borrow_mut() {
                Ok(mut listener) => (*listener)(&event),
                Err(_) => log::warn!("Listener for {:?} re-entered, skipped", event.kind),
            };
        }

        let mut scene = self.scene.borrow_mut();
        let scene = &mut *scene;
        scene.tweens.advance(dt_ms);
        scene.tweens.evaluate(host, &scene.triggers, &mut scene.writes);
        scene.pins.evaluate(&scene.triggers, &mut scene.writes);
        scene.pointers.evaluate(host, dt_ms / 1000.0, &mut scene.writes);
        scene.writes.flush(host);
    }

    /// Re-measure every pin now, as after a resize.
    pub fn refresh(&self, host: &dyn Host) {
        self.scene.borrow_mut().refresh(host);
    }

    pub fn pointer_event(&self, event: PointerEvent) {
        self.scene.borrow_mut().pointers.handle(&event);
    }

    /// Triggers whose element has been unmeasurable for the configured
    /// number of frames; their owners should dispose them.
    pub fn detached_triggers(&self) -> Vec<TriggerId> {
        self.scene.borrow().triggers.detached()
    }

    pub fn register_trigger(&self, spec: TriggerSpec) -> Disposer {
        let id = self.scene.borrow_mut().triggers.register(spec);
        self.disposer(Registration::Trigger(id))
    }

    pub fn tween(&self, spec: TweenSpec) -> Result<Disposer, ConfigError> {
        let registration = self.scene.borrow_mut().register_tweens(Vec::new(), vec![spec])?;
        Ok(self.disposer(registration))
    }

    /// Register a timeline; it starts playing on the next tick.
    pub fn register_timeline(&self, timeline: Timeline) -> Result<Disposer, ConfigError> {
        let specs = timeline.resolve()?;
        let registration = self.scene.borrow_mut().register_tweens(Vec::new(), specs)?;
        Ok(self.disposer(registration))
    }

    /// Revoke everything the current page registered and start a new page.
    pub fn begin_page(&mut self) -> &mut PageScope {
        if !self.page.is_empty() {
            log::debug!("Releasing {} registrations of the previous page", self.page.len());
        }
        self.page.dispose();
        &mut self.page
    }

    /// Scope of the current page.
    pub fn page(&mut self) -> &mut PageScope {
        &mut self.page
    }

    pub fn trigger_count(&self) -> usize {
        self.scene.borrow().triggers.len()
    }

    pub fn tween_count(&self) -> usize {
        self.scene.borrow().tweens.len()
    }

    pub fn pin_count(&self) -> usize {
        self.scene.borrow().pins.len()
    }

    /// Last measured progress of a trigger.
    pub fn trigger_progress(&self, id: TriggerId) -> Option<f32> {
        self.scene.borrow().triggers.get(id).map(|t| t.progress())
    }

    /// Scroll distance a pin consumes.
    pub fn pin_distance(&self, id: PinId) -> Option<f32> {
        self.scene.borrow().pins.total_distance(id)
    }

    /// Whether a card stack is in its pinned (desktop) mode.
    pub fn is_stacked(&self, id: PinId) -> bool {
        self.scene.borrow().pins.is_stacked(id)
    }

    /// Whether a pin is currently holding its section in place.
    pub fn is_holding(&self, id: PinId) -> bool {
        let scene = self.scene.borrow();
        scene.pins.is_holding(id, &scene.triggers)
    }

    /// Topmost card of a pinned stack that has started entering.
    pub fn active_child(&self, id: PinId) -> Option<usize> {
        let scene = self.scene.borrow();
        scene.pins.active_child(id, &scene.triggers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::host::{MemoryHost, Property};
    use crate::trigger::TriggerEventKind;

    #[test]
    fn test_listener_sees_consistent_snapshot_and_can_dispose() {
        let mut host = MemoryHost::new(Viewport::new(1280.0, 1000.0));
        let el = host.add_element(Rect::new(0.0, 2000.0, 800.0, 400.0));
        let animator = Animator::new();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let slot: Rc<RefCell<Option<Disposer>>> = Rc::new(RefCell::new(None));
        let trigger = {
            let seen = seen.clone();
            let slot = slot.clone();
            TriggerSpec::new(el, "top 85%".parse().unwrap()).on_enter(move |event| {
                seen.borrow_mut().push(event.kind);
                if let Some(mut disposer) = slot.borrow_mut().take() {
                    disposer.dispose();
                }
            })
        };
        *slot.borrow_mut() = Some(animator.register_trigger(trigger));

        animator.tick(&mut host, 0.0);
        host.set_scroll(1500.0);
        animator.tick(&mut host, 16.0);
        assert_eq!(*seen.borrow(), vec![TriggerEventKind::Enter]);
        assert_eq!(animator.trigger_count(), 0);
    }

    #[test]
    fn test_first_frame_has_no_elapsed_time() {
        let mut host = MemoryHost::new(Viewport::default());
        let el = host.add_element(Rect::new(0.0, 0.0, 100.0, 100.0));
        let animator = Animator::new();
        let _fade = animator
            .tween(
                TweenSpec::new(el)
                    .from(Property::Opacity, 0.0)
                    .duration(500.0)
                    .easing(crate::animation::TimingFunction::Linear),
            )
            .unwrap();

        animator.tick(&mut host, 10_000.0);
        assert_eq!(host.style(el).get(Property::Opacity), Some(0.0));
        animator.tick(&mut host, 10_250.0);
        assert_eq!(host.style(el).get(Property::Opacity), Some(0.5));
    }

    #[test]
    fn test_rejected_group_leaves_nothing_behind() {
        let animator = Animator::new();
        let result = animator
            .scene()
            .borrow_mut()
            .bind(TriggerSpec::new(crate::host::ElementId(1), "top top".parse().unwrap()), |trigger| {
                vec![
                    TweenSpec::new(crate::host::ElementId(1))
                        .from(Property::Y, 10.0)
                        .scrub(trigger),
                    // no drive at all
                    TweenSpec::new(crate::host::ElementId(1)).from(Property::Y, 10.0),
                ]
            });
        assert!(result.is_err());
        assert_eq!(animator.trigger_count(), 0);
        assert_eq!(animator.tween_count(), 0);
    }
}
