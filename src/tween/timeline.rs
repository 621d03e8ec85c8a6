use std::str::FromStr;

use super::TweenSpec;
use crate::error::ConfigError;
use crate::host::ElementId;

/// Where a timeline entry starts, relative to what came before it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// When the previous entry ends (`">"`)
    AfterPrevious,
    /// Shifted from the end of the whole timeline so far (`"+=200"`,
    /// `"-=1000"`), which is later than the previous entry's end when an
    /// earlier entry runs longer
    Offset(f32),
    /// Absolute time from the timeline start, in ms
    At(f32),
}

impl FromStr for Position {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ConfigError::InvalidAnchor(s.to_string());

        if s.is_empty() || s == ">" {
            return Ok(Position::AfterPrevious);
        }
        if let Some(ms) = s.strip_prefix("+=") {
            return ms.trim().parse().map(Position::Offset).map_err(|_| invalid());
        }
        if let Some(ms) = s.strip_prefix("-=") {
            return ms
                .trim()
                .parse::<f32>()
                .map(|ms| Position::Offset(-ms))
                .map_err(|_| invalid());
        }
        s.parse().map(Position::At).map_err(|_| invalid())
    }
}

struct Entry {
    specs: Vec<TweenSpec>,
    position: Position,
}

/// A sequence of time-driven tweens laid out on one clock.
///
/// Entries are placed one after another; a [`Position`] lets an entry
/// overlap or trail the previous one. Resolving the timeline bakes each
/// entry's start into its tweens' delays, so the engine plays them as
/// ordinary time tweens.
///
/// ```ignore
/// let intro = Timeline::new()
///     .then(line.from(Property::ScaleX, 0.0).duration(1500.0), Position::AfterPrevious)
///     .then(title.from(Property::Y, 200.0).duration(1200.0), "-=1000".parse()?);
/// ```
#[derive(Default)]
pub struct Timeline {
    entries: Vec<Entry>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, spec: TweenSpec, position: Position) -> Self {
        self.entries.push(Entry {
            specs: vec![spec],
            position,
        });
        self
    }

    /// One entry animating several targets, `stagger_ms` apart.
    pub fn then_staggered(
        mut self,
        spec: TweenSpec,
        targets: &[ElementId],
        stagger_ms: f32,
        position: Position,
    ) -> Self {
        self.entries.push(Entry {
            specs: spec.expand_stagger(targets, stagger_ms),
            position,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten into tweens whose delays encode their place on the timeline.
    pub fn resolve(self) -> Result<Vec<TweenSpec>, ConfigError> {
        let mut previous_end = 0.0f32;
        let mut timeline_end = 0.0f32;
        let mut resolved = Vec::new();

        for entry in self.entries {
            let start = match entry.position {
                Position::AfterPrevious => previous_end,
                Position::Offset(ms) => timeline_end + ms,
                Position::At(ms) => ms,
            }
            .max(0.0);

            let mut end = start;
            for spec in entry.specs {
                if spec.is_scrubbed() {
                    return Err(ConfigError::ConflictingDrive(spec.target()));
                }
                spec.validate()?;
                let delay = start + spec.delay_ms();
                end = end.max(start + spec.total_ms());
                resolved.push(spec.delay(delay));
            }
            previous_end = end;
            timeline_end = timeline_end.max(end);
        }

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Property;

    fn spec(target: u64, duration: f32) -> TweenSpec {
        TweenSpec::new(ElementId(target))
            .from(Property::Opacity, 0.0)
            .duration(duration)
    }

    #[test]
    fn test_parse_positions() {
        assert_eq!(">".parse::<Position>().unwrap(), Position::AfterPrevious);
        assert_eq!("-=1000".parse::<Position>().unwrap(), Position::Offset(-1000.0));
        assert_eq!("+=250".parse::<Position>().unwrap(), Position::Offset(250.0));
        assert_eq!("300".parse::<Position>().unwrap(), Position::At(300.0));
        assert!("later".parse::<Position>().is_err());
    }

    #[test]
    fn test_hero_sequence_overlaps() {
        let resolved = Timeline::new()
            .then(spec(1, 1500.0), Position::AfterPrevious)
            .then(spec(2, 1200.0), Position::Offset(-1000.0))
            .then(spec(3, 1000.0), Position::Offset(-500.0))
            .resolve()
            .unwrap();

        let delays: Vec<f32> = resolved.iter().map(|s| s.delay_ms()).collect();
        assert_eq!(delays, vec![0.0, 500.0, 1200.0]);
    }

    #[test]
    fn test_offset_counts_from_timeline_end() {
        let resolved = Timeline::new()
            .then(spec(1, 3000.0), Position::At(0.0))
            .then(spec(2, 200.0), Position::At(100.0))
            .then(spec(3, 500.0), Position::Offset(-1000.0))
            .then(spec(4, 500.0), Position::AfterPrevious)
            .resolve()
            .unwrap();

        let delays: Vec<f32> = resolved.iter().map(|s| s.delay_ms()).collect();
        // entry 2 ends at 300 but entry 1 runs on to 3000
        assert_eq!(delays, vec![0.0, 100.0, 2000.0, 2500.0]);
    }

    #[test]
    fn test_staggered_entry_ends_with_last_target() {
        let targets = [ElementId(10), ElementId(11), ElementId(12)];
        let resolved = Timeline::new()
            .then_staggered(spec(0, 800.0), &targets, 100.0, Position::AfterPrevious)
            .then(spec(4, 500.0), Position::AfterPrevious)
            .resolve()
            .unwrap();

        assert_eq!(resolved.len(), 4);
        // last staggered target ends at 200 + 800
        assert_eq!(resolved[3].delay_ms(), 1000.0);
    }

    #[test]
    fn test_offsets_never_start_before_zero() {
        let resolved = Timeline::new()
            .then(spec(1, 300.0), Position::Offset(-2500.0))
            .resolve()
            .unwrap();
        assert_eq!(resolved[0].delay_ms(), 0.0);
    }

    #[test]
    fn test_scrubbed_entries_rejected() {
        let mut registry = crate::trigger::TriggerRegistry::new(3);
        let trigger = registry.register(crate::trigger::TriggerSpec::new(
            ElementId(1),
            "top top".parse().unwrap(),
        ));
        let scrubbed = TweenSpec::new(ElementId(1))
            .from(Property::Y, 10.0)
            .scrub(trigger);
        let result = Timeline::new().then(scrubbed, Position::AfterPrevious).resolve();
        assert_eq!(result.unwrap_err(), ConfigError::ConflictingDrive(ElementId(1)));
    }
}
