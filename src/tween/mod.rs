//! Tweens: property interpolation driven by time or by scroll.
//!
//! A tween animates one element between two styles. What moves its
//! playhead is its [`Drive`]:
//!
//! - [`Drive::Time`] plays once from registration, honoring the delay.
//! - [`Drive::Toggle`] is a time tween whose playhead is controlled by a
//!   trigger's [`ToggleActions`] (play on enter, reverse on leave-back...).
//! - [`Drive::Scrub`] has no clock at all: every frame its value is a pure
//!   function of the trigger's progress, so scrolling back rewinds it.
//!
//! The engine never writes to the host directly. [`TweenEngine::evaluate`]
//! pushes changed values into the frame's [`WriteQueue`].

mod text;
mod timeline;

pub use text::{split_text, SplitBy, TextUnit};
pub use timeline::{Position, Timeline};

use slotmap::{new_key_type, SlotMap};

use crate::animation::{Animatable, TimingFunction, Transition};
use crate::error::ConfigError;
use crate::host::{ElementId, Host, Property, PropertyMask, Style, Value};
use crate::jobs::WriteQueue;
use crate::trigger::{ToggleAction, ToggleActions, TriggerEvent, TriggerId, TriggerRegistry};

new_key_type! {
    /// Handle to a registered tween.
    pub struct TweenId;
}

/// One animated channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub property: Property,
    pub from: Value,
    pub to: Value,
}

/// What advances a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drive {
    Time,
    Toggle {
        trigger: TriggerId,
        actions: ToggleActions,
    },
    Scrub {
        trigger: TriggerId,
    },
}

impl Drive {
    pub fn trigger(&self) -> Option<TriggerId> {
        match self {
            Drive::Time => None,
            Drive::Toggle { trigger, .. } | Drive::Scrub { trigger } => Some(*trigger),
        }
    }
}

/// Where a tween's value ends up.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Output {
    /// Tracks only
    #[default]
    Style,
    /// A number counted from `from` to `to`, rounded and written as the
    /// element's text (`prefix 42 suffix`), next to any tracks.
    Text {
        from: f32,
        to: f32,
        prefix: String,
        suffix: String,
    },
}

impl Output {
    /// Counted value at eased progress `t`.
    fn count_at(&self, t: f32) -> Option<f32> {
        match self {
            Output::Style => None,
            Output::Text { from, to, .. } => Some(f32::lerp(from, to, t)),
        }
    }

    fn format(&self, value: f32) -> Option<String> {
        match self {
            Output::Style => None,
            Output::Text { prefix, suffix, .. } => {
                Some(format!("{}{}{}", prefix, value.round() as i64, suffix))
            }
        }
    }
}

/// Registration parameters for a tween.
///
/// ```ignore
/// let spec = TweenSpec::new(card)
///     .from_to(Property::Y, Value::Percent(100.0), 20.0)
///     .from_to(Property::Opacity, 0.0, 1.0)
///     .easing(TimingFunction::PowerOut(3.0))
///     .scrub(trigger);
/// ```
#[derive(Debug, Clone)]
pub struct TweenSpec {
    target: ElementId,
    tracks: Vec<Track>,
    duration_ms: Option<f32>,
    scrub: Option<TriggerId>,
    toggle: Option<(TriggerId, ToggleActions)>,
    timing: TimingFunction,
    delay_ms: f32,
    output: Output,
}

impl TweenSpec {
    pub fn new(target: ElementId) -> Self {
        Self {
            target,
            tracks: Vec::new(),
            duration_ms: None,
            scrub: None,
            toggle: None,
            timing: TimingFunction::ease_out_cubic(),
            delay_ms: 0.0,
            output: Output::Style,
        }
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    /// Animate `property` between two explicit values.
    pub fn from_to(mut self, property: Property, from: impl Into<Value>, to: impl Into<Value>) -> Self {
        self.tracks.retain(|t| t.property != property);
        self.tracks.push(Track {
            property,
            from: from.into(),
            to: to.into(),
        });
        self
    }

    /// Animate `property` from `from` to its resting value.
    pub fn from(self, property: Property, from: impl Into<Value>) -> Self {
        self.from_to(property, from, property.resting_value())
    }

    /// Animate `property` from its resting value to `to`.
    pub fn to(self, property: Property, to: impl Into<Value>) -> Self {
        self.from_to(property, property.resting_value(), to)
    }

    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn easing(mut self, timing: TimingFunction) -> Self {
        self.timing = timing;
        self
    }

    /// Bind the tween's progress to a ranged trigger.
    pub fn scrub(mut self, trigger: TriggerId) -> Self {
        self.scrub = Some(trigger);
        self
    }

    /// Let `trigger`'s crossings play, reverse or reset the tween.
    pub fn toggled_by(mut self, trigger: TriggerId, actions: ToggleActions) -> Self {
        self.toggle = Some((trigger, actions));
        self
    }

    /// Count from `from` to `to` in the element's text. Needs no track.
    pub fn count(mut self, from: f32, to: f32, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.output = Output::Text {
            from,
            to,
            prefix: prefix.into(),
            suffix: suffix.into(),
        };
        self
    }

    pub fn delay_ms(&self) -> f32 {
        self.delay_ms
    }

    /// Delay plus duration; zero for scrubbed tweens.
    pub fn total_ms(&self) -> f32 {
        self.delay_ms.max(0.0) + self.duration_ms.unwrap_or(0.0).max(0.0)
    }

    pub fn is_scrubbed(&self) -> bool {
        self.scrub.is_some()
    }

    /// Same tween for each of `targets`, each starting `stagger_ms` after
    /// the previous one.
    pub fn expand_stagger(&self, targets: &[ElementId], stagger_ms: f32) -> Vec<TweenSpec> {
        targets
            .iter()
            .enumerate()
            .map(|(i, target)| {
                let mut spec = self.clone();
                spec.target = *target;
                spec.delay_ms = self.delay_ms + i as f32 * stagger_ms;
                spec
            })
            .collect()
    }

    /// Check the drive configuration and resolve it.
    pub fn validate(&self) -> Result<(Drive, Transition), ConfigError> {
        if self.tracks.is_empty() && self.output == Output::Style {
            return Err(ConfigError::NoProperties(self.target));
        }

        let drive = match (self.duration_ms, self.scrub) {
            (None, None) => return Err(ConfigError::MissingDrive(self.target)),
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingDrive(self.target)),
            (None, Some(trigger)) => {
                if self.toggle.is_some() {
                    return Err(ConfigError::ConflictingDrive(self.target));
                }
                Drive::Scrub { trigger }
            }
            (Some(duration), None) => {
                if !duration.is_finite() || duration <= 0.0 {
                    return Err(ConfigError::InvalidDuration(duration));
                }
                match self.toggle {
                    Some((trigger, actions)) => Drive::Toggle { trigger, actions },
                    None => Drive::Time,
                }
            }
        };

        let transition = Transition::new(self.duration_ms.unwrap_or(0.0), self.timing.clone())
            .delay(self.delay_ms.max(0.0));
        Ok((drive, transition))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
    Paused,
}

/// Clock of a time-driven tween.
#[derive(Debug, Clone, Copy)]
struct Playhead {
    elapsed_ms: f32,
    direction: Direction,
    /// Direction to return to on `resume`
    last_motion: Direction,
}

impl Playhead {
    fn new(direction: Direction) -> Self {
        Self {
            elapsed_ms: 0.0,
            direction,
            last_motion: Direction::Forward,
        }
    }

    fn set_direction(&mut self, direction: Direction) {
        if direction != Direction::Paused {
            self.last_motion = direction;
        }
        self.direction = direction;
    }

    fn apply(&mut self, action: ToggleAction, total_ms: f32) {
        match action {
            ToggleAction::None => {}
            ToggleAction::Play => self.set_direction(Direction::Forward),
            ToggleAction::Pause => self.set_direction(Direction::Paused),
            ToggleAction::Resume => self.set_direction(self.last_motion),
            ToggleAction::Reverse => self.set_direction(Direction::Backward),
            ToggleAction::Restart => {
                self.elapsed_ms = 0.0;
                self.set_direction(Direction::Forward);
            }
            ToggleAction::Reset => {
                self.elapsed_ms = 0.0;
                self.set_direction(Direction::Paused);
            }
            ToggleAction::Complete => {
                self.elapsed_ms = total_ms;
                self.set_direction(Direction::Paused);
            }
        }
    }

    fn advance(&mut self, dt_ms: f32, total_ms: f32) {
        match self.direction {
            Direction::Forward => self.elapsed_ms = (self.elapsed_ms + dt_ms).min(total_ms),
            Direction::Backward => self.elapsed_ms = (self.elapsed_ms - dt_ms).max(0.0),
            Direction::Paused => {}
        }
    }
}

struct Tween {
    target: ElementId,
    tracks: Vec<Track>,
    drive: Drive,
    transition: Transition,
    output: Output,
    playhead: Playhead,
    /// Values last queued, one per track
    written: Option<Vec<f32>>,
}

impl Tween {
    fn mask(&self) -> PropertyMask {
        self.tracks
            .iter()
            .fold(PropertyMask::empty(), |mask, t| mask | t.property.mask())
    }

    fn has_relative_values(&self) -> bool {
        self.tracks
            .iter()
            .any(|t| t.from.is_relative() || t.to.is_relative())
    }

    /// Linear progress for this frame, or `None` if the tween has nothing
    /// to show yet.
    fn linear_progress(&self, triggers: &TriggerRegistry) -> Option<f32> {
        match self.drive {
            Drive::Scrub { trigger } => {
                let trigger = triggers.get(trigger)?;
                trigger.is_measured().then(|| trigger.progress())
            }
            Drive::Time | Drive::Toggle { .. } => {
                Some(self.transition.progress_at(self.playhead.elapsed_ms))
            }
        }
    }
}

/// Owner of every live tween.
#[derive(Default)]
pub struct TweenEngine {
    tweens: SlotMap<TweenId, Tween>,
}

impl TweenEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `spec` and start it. Triggers it names must be registered.
    pub fn register(&mut self, spec: TweenSpec, triggers: &TriggerRegistry) -> Result<TweenId, ConfigError> {
        let (drive, transition) = spec.validate()?;
        if let Some(trigger) = drive.trigger() {
            if !triggers.contains(trigger) {
                return Err(ConfigError::UnknownTrigger(trigger));
            }
        }

        let playhead = match drive {
            Drive::Time => Playhead::new(Direction::Forward),
            _ => Playhead::new(Direction::Paused),
        };

        log::debug!("Tween registered on {:?} ({:?})", spec.target, drive);
        Ok(self.tweens.insert(Tween {
            target: spec.target,
            tracks: spec.tracks,
            drive,
            transition,
            output: spec.output,
            playhead,
            written: None,
        }))
    }

    /// Remove a tween and queue a revert of everything it wrote.
    /// Returns `false` if it was already gone.
    pub fn remove(&mut self, id: TweenId, writes: &mut WriteQueue) -> bool {
        let Some(tween) = self.tweens.remove(id) else {
            return false;
        };
        if tween.written.is_some() {
            if !tween.tracks.is_empty() {
                writes.push_revert(tween.target, tween.mask());
            }
            // back to the text shown before the count started
            if let Some(text) = tween.output.count_at(0.0).and_then(|v| tween.output.format(v)) {
                writes.push_text(tween.target, text);
            }
        }
        true
    }

    pub fn contains(&self, id: TweenId) -> bool {
        self.tweens.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn drive(&self, id: TweenId) -> Option<Drive> {
        self.tweens.get(id).map(|t| t.drive)
    }

    /// Elapsed time of a time-driven tween, delay included.
    pub fn elapsed_ms(&self, id: TweenId) -> Option<f32> {
        self.tweens.get(id).map(|t| t.playhead.elapsed_ms)
    }

    /// Whether a time-driven tween has reached its end. Scrubbed tweens
    /// never finish.
    pub fn is_finished(&self, id: TweenId) -> bool {
        self.tweens.get(id).is_some_and(|t| match t.drive {
            Drive::Scrub { .. } => false,
            _ => t.playhead.elapsed_ms >= t.transition.total_ms(),
        })
    }

    /// Apply the toggle action `event` maps to on every tween it controls.
    pub fn handle_event(&mut self, event: &TriggerEvent) {
        for tween in self.tweens.values_mut() {
            if let Drive::Toggle { trigger, actions } = tween.drive {
                if trigger == event.trigger {
                    let action = actions.action_for(event.kind);
                    if action != ToggleAction::None {
                        log::trace!("Toggle {:?} on {:?}", action, tween.target);
                    }
                    tween.playhead.apply(action, tween.transition.total_ms());
                }
            }
        }
    }

    /// Move every running clock forward by `dt_ms`.
    pub fn advance(&mut self, dt_ms: f32) {
        for tween in self.tweens.values_mut() {
            if !matches!(tween.drive, Drive::Scrub { .. }) {
                let total = tween.transition.total_ms();
                tween.playhead.advance(dt_ms, total);
            }
        }
    }

    /// Compute every tween's current value and queue the ones that changed.
    pub fn evaluate(&mut self, host: &dyn Host, triggers: &TriggerRegistry, writes: &mut WriteQueue) {
        for tween in self.tweens.values_mut() {
            let Some(linear) = tween.linear_progress(triggers) else {
                continue;
            };
            let eased = tween.transition.timing.evaluate(linear);

            let rect = if tween.has_relative_values() {
                match host.measure(tween.target) {
                    Ok(rect) => Some(rect),
                    Err(e) => {
                        log::debug!("Tween skipped: {}", e);
                        continue;
                    }
                }
            } else {
                None
            };

            let mut values: Vec<f32> = tween
                .tracks
                .iter()
                .map(|t| {
                    let from = t.from.resolve(t.property, rect);
                    let to = t.to.resolve(t.property, rect);
                    f32::lerp(&from, &to, eased)
                })
                .collect();

            let count = tween.output.count_at(eased);
            values.extend(count);

            if tween.written.as_ref() == Some(&values) {
                continue;
            }

            if !tween.tracks.is_empty() {
                let mut style = Style::new();
                for (track, value) in tween.tracks.iter().zip(&values) {
                    style.set(track.property, *value);
                }
                writes.push_style(tween.target, &style);
            }
            if let Some(text) = count.and_then(|v| tween.output.format(v)) {
                writes.push_text(tween.target, text);
            }
            tween.written = Some(values);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Rect, Viewport};
    use crate::host::MemoryHost;
    use crate::trigger::{Anchor, TriggerSpec};

    struct Fixture {
        host: MemoryHost,
        triggers: TriggerRegistry,
        engine: TweenEngine,
        el: ElementId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut host = MemoryHost::new(Viewport::new(1280.0, 1000.0));
            let el = host.add_element(Rect::new(0.0, 2000.0, 800.0, 400.0));
            Self {
                host,
                triggers: TriggerRegistry::new(3),
                engine: TweenEngine::new(),
                el,
            }
        }

        fn frame(&mut self, dt_ms: f32) -> Style {
            let events = self.triggers.measure(&self.host);
            for event in &events {
                self.engine.handle_event(event);
            }
            self.engine.advance(dt_ms);
            let mut writes = WriteQueue::new();
            self.engine.evaluate(&self.host, &self.triggers, &mut writes);
            writes.flush(&mut self.host);
            self.host.style(self.el)
        }
    }

    #[test]
    fn test_validate_requires_exactly_one_drive() {
        let el = ElementId(1);
        let none = TweenSpec::new(el).from(Property::Opacity, 0.0);
        assert_eq!(none.validate().unwrap_err(), ConfigError::MissingDrive(el));

        let mut registry = TriggerRegistry::new(3);
        let trigger = registry.register(TriggerSpec::new(el, "top top".parse().unwrap()));
        let both = TweenSpec::new(el)
            .from(Property::Opacity, 0.0)
            .duration(500.0)
            .scrub(trigger);
        assert_eq!(both.validate().unwrap_err(), ConfigError::ConflictingDrive(el));

        let empty = TweenSpec::new(el).duration(500.0);
        assert_eq!(empty.validate().unwrap_err(), ConfigError::NoProperties(el));

        let zero = TweenSpec::new(el).from(Property::Opacity, 0.0).duration(0.0);
        assert_eq!(zero.validate().unwrap_err(), ConfigError::InvalidDuration(0.0));
    }

    #[test]
    fn test_unknown_trigger_rejected() {
        let mut f = Fixture::new();
        let trigger = f.triggers.register(TriggerSpec::new(f.el, "top top".parse().unwrap()));
        f.triggers.unregister(trigger);
        let spec = TweenSpec::new(f.el).from(Property::Y, 50.0).scrub(trigger);
        assert_eq!(
            f.engine.register(spec, &f.triggers).unwrap_err(),
            ConfigError::UnknownTrigger(trigger)
        );
    }

    #[test]
    fn test_time_tween_runs_once_with_delay() {
        let mut f = Fixture::new();
        let spec = TweenSpec::new(f.el)
            .from(Property::Opacity, 0.0)
            .duration(1000.0)
            .delay(500.0)
            .easing(TimingFunction::Linear);
        let id = f.engine.register(spec, &f.triggers).unwrap();

        assert_eq!(f.frame(0.0).get(Property::Opacity), Some(0.0));
        assert_eq!(f.frame(400.0).get(Property::Opacity), Some(0.0));
        assert_eq!(f.frame(600.0).get(Property::Opacity), Some(0.5));
        assert_eq!(f.frame(5000.0).get(Property::Opacity), Some(1.0));
        assert!(f.engine.is_finished(id));

        // finished tweens stop writing
        let writes = f.host.write_count(f.el);
        f.frame(16.0);
        assert_eq!(f.host.write_count(f.el), writes);
    }

    #[test]
    fn test_toggle_plays_and_reverses() {
        let mut f = Fixture::new();
        let anchor: Anchor = "top 85%".parse().unwrap();
        let trigger = f.triggers.register(TriggerSpec::new(f.el, anchor));
        let spec = TweenSpec::new(f.el)
            .from(Property::Y, 50.0)
            .duration(1000.0)
            .easing(TimingFunction::Linear)
            .toggled_by(trigger, ToggleActions::PLAY_REVERSE);
        f.engine.register(spec, &f.triggers).unwrap();

        // renders the from state before the trigger fires
        assert_eq!(f.frame(0.0).get(Property::Y), Some(50.0));
        assert_eq!(f.frame(500.0).get(Property::Y), Some(50.0));

        f.host.set_scroll(1500.0);
        f.frame(0.0);
        assert_eq!(f.frame(500.0).get(Property::Y), Some(25.0));
        assert_eq!(f.frame(1000.0).get(Property::Y), Some(0.0));

        // back above the start: animate back, not freeze
        f.host.set_scroll(0.0);
        f.frame(0.0);
        assert_eq!(f.frame(250.0).get(Property::Y), Some(12.5));
        assert_eq!(f.frame(1000.0).get(Property::Y), Some(50.0));
    }

    #[test]
    fn test_scrub_is_pure_function_of_progress() {
        let mut f = Fixture::new();
        let trigger = f.triggers.register(
            TriggerSpec::new(f.el, "top bottom".parse().unwrap())
                .end("top top".parse::<Anchor>().unwrap()),
        );
        let spec = TweenSpec::new(f.el)
            .from_to(Property::Rotation, -180.0, 0.0)
            .easing(TimingFunction::Linear)
            .scrub(trigger);
        f.engine.register(spec, &f.triggers).unwrap();

        f.host.set_scroll(1600.0);
        f.frame(16.0);
        f.host.set_scroll(1200.0);
        let after_reversal = f.frame(16.0).get(Property::Rotation);

        let mut fresh = Fixture::new();
        let trigger = fresh.triggers.register(
            TriggerSpec::new(fresh.el, "top bottom".parse().unwrap())
                .end("top top".parse::<Anchor>().unwrap()),
        );
        fresh
            .engine
            .register(
                TweenSpec::new(fresh.el)
                    .from_to(Property::Rotation, -180.0, 0.0)
                    .easing(TimingFunction::Linear)
                    .scrub(trigger),
                &fresh.triggers,
            )
            .unwrap();
        fresh.host.set_scroll(1200.0);
        let direct = fresh.frame(5000.0).get(Property::Rotation);

        assert_eq!(after_reversal, direct);
        assert_eq!(direct, Some(-144.0));
    }

    #[test]
    fn test_percent_values_follow_own_box() {
        let mut f = Fixture::new();
        let trigger = f.triggers.register(
            TriggerSpec::new(f.el, "top bottom".parse().unwrap())
                .end("top top".parse::<Anchor>().unwrap()),
        );
        let spec = TweenSpec::new(f.el)
            .from_to(Property::Y, Value::Percent(100.0), 0.0)
            .easing(TimingFunction::Linear)
            .scrub(trigger);
        f.engine.register(spec, &f.triggers).unwrap();
        assert_eq!(f.frame(0.0).get(Property::Y), Some(400.0));

        f.host.set_rect(f.el, Rect::new(0.0, 2000.0, 800.0, 600.0));
        assert_eq!(f.frame(0.0).get(Property::Y), Some(600.0));
    }

    #[test]
    fn test_text_output_rounds_value() {
        let mut f = Fixture::new();
        let spec = TweenSpec::new(f.el)
            .duration(1000.0)
            .easing(TimingFunction::Linear)
            .count(0.0, 250.0, "+", "%");
        let id = f.engine.register(spec, &f.triggers).unwrap();

        f.frame(0.0);
        assert_eq!(f.host.text(f.el), Some("+0%"));
        f.frame(501.0);
        assert_eq!(f.host.text(f.el), Some("+125%"));
        f.frame(1000.0);
        assert_eq!(f.host.text(f.el), Some("+250%"));
        assert!(f.host.style(f.el).is_empty());

        let mut writes = WriteQueue::new();
        assert!(f.engine.remove(id, &mut writes));
        writes.flush(&mut f.host);
        assert_eq!(f.host.text(f.el), Some("+0%"));
    }

    #[test]
    fn test_remove_reverts_written_channels() {
        let mut f = Fixture::new();
        let spec = TweenSpec::new(f.el)
            .from(Property::Opacity, 0.0)
            .from(Property::Y, 20.0)
            .duration(400.0);
        let id = f.engine.register(spec, &f.triggers).unwrap();
        f.frame(100.0);
        assert!(f.host.style(f.el).get(Property::Y).is_some());

        let mut writes = WriteQueue::new();
        assert!(f.engine.remove(id, &mut writes));
        assert!(!f.engine.remove(id, &mut writes));
        writes.flush(&mut f.host);
        assert!(f.host.style(f.el).is_empty());
    }

    #[test]
    fn test_stagger_offsets_delays() {
        let spec = TweenSpec::new(ElementId(0))
            .from(Property::Y, 30.0)
            .duration(800.0)
            .delay(100.0);
        let expanded = spec.expand_stagger(&[ElementId(1), ElementId(2), ElementId(3)], 50.0);
        let delays: Vec<f32> = expanded.iter().map(|s| s.delay_ms()).collect();
        assert_eq!(delays, vec![100.0, 150.0, 200.0]);
        assert_eq!(expanded[2].target(), ElementId(3));
    }

    #[test]
    fn test_complete_and_reset_actions() {
        let mut head = Playhead::new(Direction::Paused);
        head.apply(ToggleAction::Complete, 900.0);
        assert_eq!(head.elapsed_ms, 900.0);
        head.apply(ToggleAction::Reverse, 900.0);
        head.advance(300.0, 900.0);
        head.apply(ToggleAction::Pause, 900.0);
        head.advance(300.0, 900.0);
        assert_eq!(head.elapsed_ms, 600.0);
        head.apply(ToggleAction::Resume, 900.0);
        assert_eq!(head.direction, Direction::Backward);
        head.apply(ToggleAction::Reset, 900.0);
        assert_eq!((head.elapsed_ms, head.direction), (0.0, Direction::Paused));
    }
}
