//! Pointer-driven effects: the decorative cursor and magnetic elements.
//!
//! Pointer handlers feed [`PointerEvent`]s in as they arrive; the springs
//! only move on [`PointerEffects::evaluate`], once per frame, so the
//! smoothing is independent of how often the platform reports motion.

mod follower;
mod magnetic;

pub use follower::{is_fine_pointer, CursorFollower, CursorOptions, CursorParts};
pub use magnetic::Magnet;

use slotmap::{new_key_type, SlotMap};

use crate::geometry::Point;
use crate::host::{Host, HoverTarget};
use crate::jobs::WriteQueue;

new_key_type! {
    /// Handle to a bound cursor follower.
    pub struct FollowerId;
    /// Handle to a bound magnetic element.
    pub struct MagnetId;
}

#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to `position` (viewport px) over `hover`, if the host
    /// resolved an interactive target under it.
    Move {
        position: Point,
        hover: Option<HoverTarget>,
    },
    Down,
    Up,
    /// Pointer left the window
    Leave,
}

#[derive(Default)]
pub struct PointerEffects {
    followers: SlotMap<FollowerId, CursorFollower>,
    magnets: SlotMap<MagnetId, Magnet>,
    pointer: Option<Point>,
}

impl PointerEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last raw pointer position, `None` once it left the window.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn handle(&mut self, event: &PointerEvent) {
        match event {
            PointerEvent::Move { position, hover } => {
                self.pointer = Some(*position);
                for follower in self.followers.values_mut() {
                    follower.pointer_moved(*position, hover.as_ref());
                }
            }
            PointerEvent::Down | PointerEvent::Up => {
                let down = matches!(event, PointerEvent::Down);
                for follower in self.followers.values_mut() {
                    follower.pressed(down);
                }
            }
            PointerEvent::Leave => {
                self.pointer = None;
                for follower in self.followers.values_mut() {
                    follower.left();
                }
            }
        }
    }

    pub fn bind_follower(&mut self, follower: CursorFollower, writes: &mut WriteQueue) -> FollowerId {
        writes.push_native_cursor(true);
        self.followers.insert(follower)
    }

    pub fn remove_follower(&mut self, id: FollowerId, writes: &mut WriteQueue) -> bool {
        let Some(follower) = self.followers.remove(id) else {
            return false;
        };
        follower.release(writes);
        if self.followers.is_empty() {
            writes.push_native_cursor(false);
        }
        true
    }

    pub fn follower(&self, id: FollowerId) -> Option<&CursorFollower> {
        self.followers.get(id)
    }

    pub fn bind_magnet(&mut self, magnet: Magnet) -> MagnetId {
        self.magnets.insert(magnet)
    }

    pub fn remove_magnet(&mut self, id: MagnetId, writes: &mut WriteQueue) -> bool {
        match self.magnets.remove(id) {
            Some(magnet) => {
                magnet.release(writes);
                true
            }
            None => false,
        }
    }

    pub fn magnet(&self, id: MagnetId) -> Option<&Magnet> {
        self.magnets.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.followers.is_empty() && self.magnets.is_empty()
    }

    /// Step every spring by `dt_secs` and queue the changed styles.
    pub fn evaluate(&mut self, host: &dyn Host, dt_secs: f32, writes: &mut WriteQueue) {
        for follower in self.followers.values_mut() {
            follower.step(dt_secs, writes);
        }

        for magnet in self.magnets.values_mut() {
            let target = match host.measure(magnet.element()) {
                Ok(rect) => magnet.target_offset(self.pointer, rect),
                Err(e) => {
                    log::debug!("Magnet skipped: {}", e);
                    continue;
                }
            };
            magnet.step(target, dt_secs, writes);
        }
    }
}
