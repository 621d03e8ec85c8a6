use thiserror::Error;

use crate::host::ElementId;

/// A registration was rejected because its configuration can never work.
///
/// These are programming errors surfaced at registration time; nothing in
/// the per-frame loop produces them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("tween on {0:?} has neither a duration nor a scrub source")]
    MissingDrive(ElementId),
    #[error("tween on {0:?} has both a duration and a scrub source")]
    ConflictingDrive(ElementId),
    #[error("tween on {0:?} animates no properties")]
    NoProperties(ElementId),
    #[error("nothing to animate under {0:?}")]
    EmptyTargets(ElementId),
    #[error("pinned section {section:?} has no children matching `{selector}`")]
    EmptyPinSequence { section: ElementId, selector: String },
    #[error("invalid scroll anchor `{0}`")]
    InvalidAnchor(String),
    #[error("unknown easing `{0}`")]
    UnknownEasing(String),
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("invalid toggle actions `{0}`")]
    InvalidToggleActions(String),
    #[error("magnetic strength must be within (0, 1], got {0}")]
    InvalidStrength(f32),
    #[error("radius must be positive, got {0}")]
    InvalidRadius(f32),
    #[error("scroll distance must be positive, got {0}")]
    InvalidDistance(f32),
    #[error("{0:?} is already pinned")]
    SectionAlreadyPinned(ElementId),
    #[error("lead {lead} must be smaller than the per-item distance {distance}")]
    LeadExceedsDistance { lead: f32, distance: f32 },
    #[error("duration must be positive, got {0}ms")]
    InvalidDuration(f32),
    #[error("trigger {0:?} is not registered")]
    UnknownTrigger(crate::trigger::TriggerId),
}

/// Failure reported by a [`Host`](crate::host::Host) while measuring or writing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("element {0:?} is not attached to the document")]
    Detached(ElementId),
    #[error("the document is not available")]
    Unavailable,
}
