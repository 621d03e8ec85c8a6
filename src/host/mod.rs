//! The boundary between the animation core and whatever owns the document.
//!
//! The engine never touches a DOM directly. Everything it needs from the
//! environment (viewport size, scroll offset, element boxes, style writes)
//! goes through the [`Host`] trait, so the same core can sit behind a
//! wasm shell, a native renderer or the in-memory [`MemoryHost`] used by
//! the tests.

mod memory;
mod style;

pub use memory::MemoryHost;
pub use style::{Property, PropertyMask, Style, Value};

use crate::error::HostError;
use crate::geometry::{Rect, Viewport};

/// Opaque handle to an element owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// What the host knows about the pointing device, used to gate cursor effects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PointerEnvironment {
    pub user_agent: String,
    /// `navigator.maxTouchPoints`
    pub max_touch_points: u32,
    /// `'ontouchstart' in window`
    pub has_touch_events: bool,
}

/// The element under the pointer, as resolved by the host.
///
/// A target flagged with a cursor marker may carry a label; plain links and
/// buttons hover without one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HoverTarget {
    pub label: Option<String>,
}

impl HoverTarget {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
        }
    }
}

/// Services the animation core consumes from its environment.
pub trait Host {
    /// Current viewport size.
    fn viewport(&self) -> Viewport;

    /// Current vertical scroll offset of the document.
    fn scroll_y(&self) -> f32;

    /// Untransformed layout box of `element`, relative to the viewport.
    fn measure(&self, element: ElementId) -> Result<Rect, HostError>;

    /// Descendants of `element` matching `selector`, in document order.
    fn query(&self, element: ElementId, selector: &str) -> Vec<ElementId>;

    /// Write the channels present in `style`, leaving the others untouched.
    fn apply_style(&mut self, element: ElementId, style: &Style) -> Result<(), HostError>;

    /// Drop any inline value previously written for the channels in `mask`.
    fn clear_style(&mut self, element: ElementId, mask: PropertyMask) -> Result<(), HostError>;

    fn set_text(&mut self, element: ElementId, text: &str) -> Result<(), HostError>;

    /// `None` when no document is available yet.
    fn pointer_environment(&self) -> Option<PointerEnvironment>;

    /// Hide or restore the platform cursor while a decorative one is shown.
    fn set_native_cursor_hidden(&mut self, hidden: bool);
}
