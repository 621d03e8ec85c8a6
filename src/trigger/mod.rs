//! Scroll triggers: (element, scroll range) pairs measured once per frame.
//!
//! The registry owns every live trigger. Each frame [`TriggerRegistry::measure`]
//! re-measures all of them against the host before anything else reads
//! their progress, so tweens and pins always see one consistent snapshot.
//!
//! A ranged trigger (start and end) reports fractional progress in
//! `[0, 1]`. A trigger without an end is one-shot: it only ever reports
//! fired (`1.0`) or not fired (`0.0`).

mod anchor;
mod toggle;

pub use anchor::{Anchor, Edge, EndAnchor};
pub use toggle::{ToggleAction, ToggleActions};

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use crate::host::{ElementId, Host};

new_key_type! {
    /// Handle to a registered trigger.
    pub struct TriggerId;
}

/// Where the scroll position sits relative to a trigger's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TriggerState {
    /// Not yet entered
    Before,
    /// Inside the range (or fired, for one-shot triggers)
    Active,
    /// Left after entering
    After,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerEventKind {
    /// Progress changed
    Update,
    /// Crossed the start scrolling forward
    Enter,
    /// Crossed the end scrolling forward
    Leave,
    /// Crossed the end scrolling backward
    EnterBack,
    /// Crossed the start scrolling backward
    LeaveBack,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerEvent {
    pub trigger: TriggerId,
    pub kind: TriggerEventKind,
    pub progress: f32,
}

/// A user callback attached to one kind of trigger event.
pub type Listener = Rc<RefCell<dyn FnMut(&TriggerEvent)>>;

/// Resolved scroll offsets of a trigger for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub start: f32,
    pub end: Option<f32>,
    /// Scroll offset the bounds were measured at
    pub scroll: f32,
}

impl Bounds {
    /// Scroll distance consumed past the start, clamped to the range.
    pub fn local_scroll(&self) -> f32 {
        let past = (self.scroll - self.start).max(0.0);
        match self.end {
            Some(end) => past.min((end - self.start).max(0.0)),
            None => past,
        }
    }
}

/// Registration parameters for a trigger.
pub struct TriggerSpec {
    pub target: ElementId,
    pub start: Anchor,
    pub end: Option<EndAnchor>,
    pub once: bool,
    listeners: Vec<(TriggerEventKind, Listener)>,
}

impl TriggerSpec {
    pub fn new(target: ElementId, start: Anchor) -> Self {
        Self {
            target,
            start,
            end: None,
            once: false,
            listeners: Vec::new(),
        }
    }

    pub fn end(mut self, end: impl Into<EndAnchor>) -> Self {
        self.end = Some(end.into());
        self
    }

    pub fn once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    fn listen(mut self, kind: TriggerEventKind, f: impl FnMut(&TriggerEvent) + 'static) -> Self {
        self.listeners.push((kind, Rc::new(RefCell::new(f))));
        self
    }

    pub fn on_update(self, f: impl FnMut(&TriggerEvent) + 'static) -> Self {
        self.listen(TriggerEventKind::Update, f)
    }

    pub fn on_enter(self, f: impl FnMut(&TriggerEvent) + 'static) -> Self {
        self.listen(TriggerEventKind::Enter, f)
    }

    pub fn on_leave(self, f: impl FnMut(&TriggerEvent) + 'static) -> Self {
        self.listen(TriggerEventKind::Leave, f)
    }

    pub fn on_enter_back(self, f: impl FnMut(&TriggerEvent) + 'static) -> Self {
        self.listen(TriggerEventKind::EnterBack, f)
    }

    pub fn on_leave_back(self, f: impl FnMut(&TriggerEvent) + 'static) -> Self {
        self.listen(TriggerEventKind::LeaveBack, f)
    }
}

/// One registered trigger and its last measured state.
pub struct Trigger {
    target: ElementId,
    start: Anchor,
    end: Option<EndAnchor>,
    once: bool,
    listeners: Vec<(TriggerEventKind, Listener)>,
    state: Option<TriggerState>,
    progress: Option<f32>,
    bounds: Option<Bounds>,
    retired: bool,
    missed_frames: u32,
}

impl Trigger {
    pub fn target(&self) -> ElementId {
        self.target
    }

    pub fn is_ranged(&self) -> bool {
        self.end.is_some()
    }

    /// Last measured progress; `0.0` before the first measurement.
    pub fn progress(&self) -> f32 {
        self.progress.unwrap_or(0.0)
    }

    pub fn state(&self) -> TriggerState {
        self.state.unwrap_or(TriggerState::Before)
    }

    /// Whether the trigger has been measured at least once.
    pub fn is_measured(&self) -> bool {
        self.state.is_some()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// A `once` trigger that has fired stops being measured.
    pub fn is_retired(&self) -> bool {
        self.retired
    }

    fn classify(&self, scroll: f32, start: f32, end: Option<f32>) -> (TriggerState, f32) {
        match end {
            None => {
                if scroll >= start {
                    (TriggerState::Active, 1.0)
                } else {
                    (TriggerState::Before, 0.0)
                }
            }
            Some(end) => {
                let progress = if end > start {
                    ((scroll - start) / (end - start)).clamp(0.0, 1.0)
                } else if scroll >= start {
                    1.0
                } else {
                    0.0
                };
                let state = if scroll < start {
                    TriggerState::Before
                } else if scroll > end {
                    TriggerState::After
                } else {
                    TriggerState::Active
                };
                (state, progress)
            }
        }
    }
}

fn crossing_events(previous: TriggerState, current: TriggerState) -> &'static [TriggerEventKind] {
    use TriggerEventKind::*;
    use TriggerState::*;

    match (previous, current) {
        (Before, Active) => &[Enter],
        (Before, After) => &[Enter, Leave],
        (Active, After) => &[Leave],
        (After, Active) => &[EnterBack],
        (After, Before) => &[EnterBack, LeaveBack],
        (Active, Before) => &[LeaveBack],
        _ => &[],
    }
}

/// Owner of every live trigger.
#[derive(Default)]
pub struct TriggerRegistry {
    triggers: SlotMap<TriggerId, Trigger>,
    /// Consecutive unmeasurable frames before a trigger is reported detached
    detach_threshold: u32,
}

impl TriggerRegistry {
    pub fn new(detach_threshold: u32) -> Self {
        Self {
            triggers: SlotMap::with_key(),
            detach_threshold,
        }
    }

    pub fn register(&mut self, spec: TriggerSpec) -> TriggerId {
        self.triggers.insert(Trigger {
            target: spec.target,
            start: spec.start,
            end: spec.end,
            once: spec.once,
            listeners: spec.listeners,
            state: None,
            progress: None,
            bounds: None,
            retired: false,
            missed_frames: 0,
        })
    }

    /// Remove a trigger. Returns `false` if it was already gone.
    pub fn unregister(&mut self, id: TriggerId) -> bool {
        self.triggers.remove(id).is_some()
    }

    pub fn get(&self, id: TriggerId) -> Option<&Trigger> {
        self.triggers.get(id)
    }

    pub fn contains(&self, id: TriggerId) -> bool {
        self.triggers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Replace the boundaries of a live trigger, e.g. after a resize.
    pub fn set_range(&mut self, id: TriggerId, start: Anchor, end: Option<EndAnchor>) {
        if let Some(trigger) = self.triggers.get_mut(id) {
            trigger.start = start;
            trigger.end = end;
        }
    }

    /// Triggers whose element could not be measured for the configured
    /// number of consecutive frames.
    pub fn detached(&self) -> Vec<TriggerId> {
        self.triggers
            .iter()
            .filter(|(_, t)| t.missed_frames >= self.detach_threshold.max(1))
            .map(|(id, _)| id)
            .collect()
    }

    /// Measure every live trigger and return the events it produced.
    ///
    /// A trigger whose element is detached or has no box is skipped for the
    /// frame: it keeps its previous state and emits nothing.
    pub fn measure(&mut self, host: &dyn Host) -> Vec<TriggerEvent> {
        let scroll = host.scroll_y();
        let viewport = host.viewport();
        let threshold = self.detach_threshold.max(1);
        let mut events = Vec::new();

        for (id, trigger) in self.triggers.iter_mut() {
            if trigger.retired {
                continue;
            }

            let rect = match host.measure(trigger.target) {
                Ok(rect) if !rect.is_empty() => rect,
                outcome => {
                    trigger.missed_frames = trigger.missed_frames.saturating_add(1);
                    if trigger.missed_frames == threshold {
                        log::warn!(
                            "Trigger on {:?} unmeasurable for {} frames ({:?})",
                            trigger.target,
                            threshold,
                            outcome.err()
                        );
                    }
                    continue;
                }
            };
            trigger.missed_frames = 0;

            let start = trigger.start.scroll_position(rect, scroll, viewport);
            let end = trigger
                .end
                .map(|e| e.scroll_position(start, rect, scroll, viewport));
            trigger.bounds = Some(Bounds { start, end, scroll });

            let (mut state, mut progress) = trigger.classify(scroll, start, end);
            if trigger.once {
                // latch: a `once` trigger never goes backward
                state = state.max(trigger.state());
                progress = progress.max(trigger.progress());
            }

            let previous_state = trigger.state();
            let first = trigger.state.is_none();

            if trigger.is_ranged() && (first || trigger.progress != Some(progress)) {
                events.push(TriggerEvent {
                    trigger: id,
                    kind: TriggerEventKind::Update,
                    progress,
                });
            }
            for kind in crossing_events(previous_state, state) {
                events.push(TriggerEvent {
                    trigger: id,
                    kind: *kind,
                    progress,
                });
            }

            trigger.state = Some(state);
            trigger.progress = Some(progress);

            let finished = match trigger.end {
                None => state == TriggerState::Active,
                Some(_) => progress >= 1.0,
            };
            if trigger.once && finished {
                log::debug!("Trigger on {:?} fired once, retiring", trigger.target);
                trigger.retired = true;
            }
        }

        events
    }

    /// Pair each event with the listeners subscribed to it.
    pub fn listeners_for(&self, events: &[TriggerEvent]) -> Vec<(Listener, TriggerEvent)> {
        let mut calls = Vec::new();
        for event in events {
            if let Some(trigger) = self.triggers.get(event.trigger) {
                for (kind, listener) in &trigger.listeners {
                    if *kind == event.kind {
                        calls.push((listener.clone(), *event));
                    }
                }
            }
        }
        calls
    }
}
