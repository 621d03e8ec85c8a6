//! Scroll-driven animation orchestration.
//!
//! The crate measures where elements sit relative to the viewport, turns
//! that into trigger progress and crossing events, and drives tweens, pinned
//! sections and pointer-following springs from it. It never touches a
//! document itself: everything goes through a [`Host`](host::Host).
//!
//! ```ignore
//! scrollfx::init();
//!
//! let mut animator = Animator::new();
//! let page = animator.begin_page();
//! page.add(animator.register_fade_in(heading, RevealOptions::default())?);
//!
//! // on every display refresh
//! animator.tick(&mut host, now_ms);
//! ```

pub mod animation;
pub mod error;
pub mod geometry;
pub mod host;
pub mod pin;
pub mod pointer;
pub mod presets;
pub mod trigger;
pub mod tween;

mod animator;
mod jobs;
mod scope;

use std::sync::Once;

pub use animator::{Animator, AnimatorConfig};
pub use jobs::{JobType, WriteQueue};
pub use scope::{Disposer, PageScope};

pub mod prelude {
    pub use crate::animation::{Spring, SpringConfig, TimingFunction, Transition};
    pub use crate::error::{ConfigError, HostError};
    pub use crate::geometry::{Point, Rect, Viewport};
    pub use crate::host::{
        ElementId, Host, HoverTarget, MemoryHost, PointerEnvironment, Property, PropertyMask,
        Style, Value,
    };
    pub use crate::pin::{PinDistance, PinId, StackOptions};
    pub use crate::pointer::{CursorOptions, CursorParts, PointerEvent};
    pub use crate::presets::{
        CounterOptions, Direction, Drift, ParallaxOptions, RevealOn, RevealOptions, TextAnimation,
        TextRevealOptions,
    };
    pub use crate::trigger::{
        Anchor, Edge, EndAnchor, ToggleAction, ToggleActions, TriggerEvent, TriggerEventKind,
        TriggerId, TriggerSpec,
    };
    pub use crate::tween::{split_text, Position, SplitBy, Timeline, TweenSpec};
    pub use crate::{Animator, AnimatorConfig, Disposer, PageScope};
}

static INIT: Once = Once::new();

/// Install the logger. Safe to call more than once; only the first call
/// does anything, and an already installed logger is left alone.
pub fn init() {
    INIT.call_once(|| {
        let installed = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init()
            .is_ok();
        if installed {
            log::info!("scrollfx {} ready", env!("CARGO_PKG_VERSION"));
        }
    });
}
