//! Revocable registrations.
//!
//! Every registration hands back a [`Disposer`]. Disposing it (explicitly
//! or by dropping it) removes everything the registration created and
//! queues a revert of the styles it wrote, so the element returns to its
//! pre-animation state on the next tick.
//!
//! A [`PageScope`] collects the disposers of one page and releases them
//! together, most recent first, the way nested cleanups unwind.
//!
//! ```ignore
//! animator.begin_page();
//! let reveal = animator.register_fade_in(heading, RevealOptions::default())?;
//! animator.page().add(reveal);
//!
//! // navigating away: everything registered above is revoked
//! animator.begin_page();
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::animator::Scene;
use crate::pin::PinId;
use crate::pointer::{FollowerId, MagnetId};
use crate::trigger::TriggerId;
use crate::tween::TweenId;

/// Something the scene owns on behalf of a caller.
#[derive(Debug)]
pub(crate) enum Registration {
    Trigger(TriggerId),
    Tween(TweenId),
    Pin(PinId),
    Follower(FollowerId),
    Magnet(MagnetId),
    /// Released in reverse order
    Group(Vec<Registration>),
}

impl Registration {
    fn find<T>(&self, f: &impl Fn(&Registration) -> Option<T>) -> Option<T> {
        match self {
            Registration::Group(group) => group.iter().find_map(|r| r.find(f)),
            other => f(other),
        }
    }
}

/// Handle that revokes a registration.
///
/// Dropping it revokes too; keep it alive (usually in a [`PageScope`])
/// for as long as the effect should run.
#[must_use = "dropping a Disposer revokes its registration immediately"]
pub struct Disposer {
    scene: Weak<RefCell<Scene>>,
    registration: Option<Registration>,
}

impl Disposer {
    pub(crate) fn new(scene: &Rc<RefCell<Scene>>, registration: Registration) -> Self {
        Self {
            scene: Rc::downgrade(scene),
            registration: Some(registration),
        }
    }

    /// A disposer for a binding that never happened.
    pub fn noop() -> Self {
        Self {
            scene: Weak::new(),
            registration: None,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.registration.is_none()
    }

    /// The pinned section this disposer owns, if any.
    pub fn pin(&self) -> Option<PinId> {
        self.registration.as_ref()?.find(&|r| match r {
            Registration::Pin(id) => Some(*id),
            _ => None,
        })
    }

    /// The first trigger this disposer owns, if any.
    pub fn trigger(&self) -> Option<TriggerId> {
        self.registration.as_ref()?.find(&|r| match r {
            Registration::Trigger(id) => Some(*id),
            _ => None,
        })
    }

    /// Revoke the registration. Calling this again does nothing.
    pub fn dispose(&mut self) {
        let Some(registration) = self.registration.take() else {
            return;
        };
        // animator already gone: nothing left to release
        let Some(scene) = self.scene.upgrade() else {
            return;
        };
        match scene.try_borrow_mut() {
            Ok(mut scene) => scene.release(registration),
            Err(_) => log::warn!("Disposer ran while the animator was busy, {:?} leaked", registration),
        };
    }
}

impl Drop for Disposer {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for Disposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disposer")
            .field("registration", &self.registration)
            .finish()
    }
}

/// Disposers of one page, released together in reverse order.
#[derive(Debug, Default)]
pub struct PageScope {
    disposers: Vec<Disposer>,
}

impl PageScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, disposer: Disposer) {
        self.disposers.push(disposer);
    }

    pub fn len(&self) -> usize {
        self.disposers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disposers.is_empty()
    }

    /// Release everything collected so far, most recent first.
    pub fn dispose(&mut self) {
        while let Some(mut disposer) = self.disposers.pop() {
            disposer.dispose();
        }
    }
}

impl Drop for PageScope {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl Extend<Disposer> for PageScope {
    fn extend<I: IntoIterator<Item = Disposer>>(&mut self, iter: I) {
        self.disposers.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::Animator;
    use crate::host::ElementId;
    use crate::trigger::TriggerSpec;

    #[test]
    fn test_dispose_is_idempotent() {
        let animator = Animator::new();
        let mut disposer = animator.register_trigger(TriggerSpec::new(
            ElementId(1),
            "top top".parse().unwrap(),
        ));
        assert_eq!(animator.trigger_count(), 1);
        disposer.dispose();
        disposer.dispose();
        assert!(disposer.is_disposed());
        assert_eq!(animator.trigger_count(), 0);
    }

    #[test]
    fn test_drop_revokes() {
        let animator = Animator::new();
        {
            let _kept = animator.register_trigger(TriggerSpec::new(
                ElementId(1),
                "top top".parse().unwrap(),
            ));
            assert_eq!(animator.trigger_count(), 1);
        }
        assert_eq!(animator.trigger_count(), 0);
    }

    #[test]
    fn test_disposer_outliving_animator_is_harmless() {
        let animator = Animator::new();
        let mut disposer = animator.register_trigger(TriggerSpec::new(
            ElementId(1),
            "top top".parse().unwrap(),
        ));
        drop(animator);
        disposer.dispose();
        assert!(disposer.is_disposed());
        Disposer::noop().dispose();
    }

    #[test]
    fn test_page_scope_releases_everything() {
        let animator = Animator::new();
        let mut scope = PageScope::new();
        for i in 0..3 {
            scope.add(animator.register_trigger(TriggerSpec::new(
                ElementId(i),
                "top top".parse().unwrap(),
            )));
        }
        assert_eq!(scope.len(), 3);
        scope.dispose();
        assert!(scope.is_empty());
        assert_eq!(animator.trigger_count(), 0);
    }
}
