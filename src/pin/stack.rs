//! Scroll layout of a pinned card stack.
//!
//! The section stays pinned for `count × distance` scroll units. Card 0
//! is on screen from the start; card `i ≥ 1` slides in over the local
//! range `[(i-1)·distance + lead, i·distance]`. The `lead` at the start of
//! each slot is a hold where nothing moves, so consecutive ranges never
//! overlap, and the last slot after the final card settles is a hold too.

use crate::trigger::{Anchor, Edge, EndAnchor};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackLayout {
    pub count: usize,
    /// Scroll units per card
    pub distance: f32,
    pub lead: f32,
    /// Pin threshold below the viewport top (fixed header height)
    pub header_offset: f32,
    /// Resting vertical offset added per card index
    pub stack_offset: f32,
}

impl StackLayout {
    pub fn total_distance(&self) -> f32 {
        self.count as f32 * self.distance
    }

    fn effective_lead(&self) -> f32 {
        self.lead.clamp(0.0, self.distance)
    }

    /// Where the pin engages: the section top meets the header bottom.
    pub fn pin_start(&self) -> Anchor {
        Anchor::new(Edge::TOP, Edge::TOP.plus(self.header_offset))
    }

    pub fn pin_end(&self) -> EndAnchor {
        EndAnchor::Relative(self.total_distance())
    }

    /// Local scroll range over which card `index` (≥ 1) enters.
    pub fn card_range(&self, index: usize) -> (f32, f32) {
        let slot_start = index.saturating_sub(1) as f32 * self.distance;
        (
            slot_start + self.effective_lead(),
            index as f32 * self.distance,
        )
    }

    /// `card_range` as anchors on the section, for a scrubbed trigger.
    pub fn card_anchors(&self, index: usize) -> (Anchor, EndAnchor) {
        let (start, end) = self.card_range(index);
        let viewport = Edge::TOP.plus(self.header_offset);
        (
            Anchor::new(Edge::TOP.plus(start), viewport),
            EndAnchor::At(Anchor::new(Edge::TOP.plus(end), viewport)),
        )
    }

    /// Vertical offset card `index` settles at.
    pub fn resting_offset(&self, index: usize) -> f32 {
        index as f32 * self.stack_offset
    }

    /// The topmost card that has started entering at `local` scroll units
    /// past the pin start.
    pub fn active_child(&self, local: f32) -> usize {
        (1..self.count)
            .take_while(|i| local >= self.card_range(*i).0)
            .last()
            .unwrap_or(0)
    }
}
