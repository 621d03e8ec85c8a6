//! A headless document model implementing [`Host`].
//!
//! Elements have a fixed layout box in document coordinates; `measure`
//! reports it relative to the current scroll offset, the way
//! `getBoundingClientRect` would for an untransformed node. Written styles
//! are recorded but never feed back into layout.

use std::collections::HashMap;

use super::{ElementId, Host, PointerEnvironment, PropertyMask, Style};
use crate::error::HostError;
use crate::geometry::{Rect, Viewport};

struct Node {
    rect: Rect,
    parent: Option<ElementId>,
    class: Option<String>,
    attached: bool,
    style: Style,
    text: Option<String>,
    writes: usize,
}

pub struct MemoryHost {
    viewport: Viewport,
    scroll_y: f32,
    nodes: HashMap<ElementId, Node>,
    order: Vec<ElementId>,
    next_id: u64,
    environment: Option<PointerEnvironment>,
    cursor_hidden: bool,
}

impl MemoryHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            scroll_y: 0.0,
            nodes: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
            environment: Some(PointerEnvironment {
                user_agent: "Mozilla/5.0 (X11; Linux x86_64) Chrome/126.0 Safari/537.36"
                    .to_string(),
                max_touch_points: 0,
                has_touch_events: false,
            }),
            cursor_hidden: false,
        }
    }

    /// Add a top-level element with a box in document coordinates.
    pub fn add_element(&mut self, rect: Rect) -> ElementId {
        self.insert(rect, None, None)
    }

    /// Add an element nested under `parent`, matchable by `.class`.
    pub fn add_child(&mut self, parent: ElementId, class: &str, rect: Rect) -> ElementId {
        self.insert(rect, Some(parent), Some(class.to_string()))
    }

    fn insert(&mut self, rect: Rect, parent: Option<ElementId>, class: Option<String>) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                rect,
                parent,
                class,
                attached: true,
                style: Style::new(),
                text: None,
                writes: 0,
            },
        );
        self.order.push(id);
        id
    }

    pub fn set_scroll(&mut self, scroll_y: f32) {
        self.scroll_y = scroll_y;
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_rect(&mut self, element: ElementId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.rect = rect;
        }
    }

    /// Remove `element` from the document without telling the engine.
    pub fn detach(&mut self, element: ElementId) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.attached = false;
        }
    }

    pub fn set_pointer_environment(&mut self, environment: Option<PointerEnvironment>) {
        self.environment = environment;
    }

    /// Inline style currently written on `element`.
    pub fn style(&self, element: ElementId) -> Style {
        self.nodes
            .get(&element)
            .map(|n| n.style.clone())
            .unwrap_or_default()
    }

    pub fn text(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(&element).and_then(|n| n.text.as_deref())
    }

    /// Number of style writes `element` has received.
    pub fn write_count(&self, element: ElementId) -> usize {
        self.nodes.get(&element).map(|n| n.writes).unwrap_or(0)
    }

    pub fn native_cursor_hidden(&self) -> bool {
        self.cursor_hidden
    }

    fn attached_mut(&mut self, element: ElementId) -> Result<&mut Node, HostError> {
        match self.nodes.get_mut(&element) {
            Some(node) if node.attached => Ok(node),
            _ => Err(HostError::Detached(element)),
        }
    }

    fn is_descendant(&self, mut element: ElementId, ancestor: ElementId) -> bool {
        while let Some(parent) = self.nodes.get(&element).and_then(|n| n.parent) {
            if parent == ancestor {
                return true;
            }
            element = parent;
        }
        false
    }
}

impl Host for MemoryHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    fn measure(&self, element: ElementId) -> Result<Rect, HostError> {
        match self.nodes.get(&element) {
            Some(node) if node.attached => Ok(node.rect.offset(0.0, -self.scroll_y)),
            _ => Err(HostError::Detached(element)),
        }
    }

    fn query(&self, element: ElementId, selector: &str) -> Vec<ElementId> {
        let class = selector.trim_start_matches('.');
        self.order
            .iter()
            .copied()
            .filter(|id| {
                self.nodes
                    .get(id)
                    .is_some_and(|n| n.attached && n.class.as_deref() == Some(class))
            })
            .filter(|id| self.is_descendant(*id, element))
            .collect()
    }

    fn apply_style(&mut self, element: ElementId, style: &Style) -> Result<(), HostError> {
        let node = self.attached_mut(element)?;
        node.style.merge(style);
        node.writes += 1;
        Ok(())
    }

    fn clear_style(&mut self, element: ElementId, mask: PropertyMask) -> Result<(), HostError> {
        let node = self.attached_mut(element)?;
        node.style.remove(mask);
        Ok(())
    }

    fn set_text(&mut self, element: ElementId, text: &str) -> Result<(), HostError> {
        let node = self.attached_mut(element)?;
        node.text = Some(text.to_string());
        Ok(())
    }

    fn pointer_environment(&self) -> Option<PointerEnvironment> {
        self.environment.clone()
    }

    fn set_native_cursor_hidden(&mut self, hidden: bool) {
        self.cursor_hidden = hidden;
    }
}
