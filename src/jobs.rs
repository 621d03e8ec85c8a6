// ============================================================================
// Per-frame write queue
// ============================================================================
//
// Nothing writes to the host while a frame is being computed. Tweens, pins
// and pointer effects push jobs here; the animator flushes the queue once
// at the end of the tick, after every measurement of the frame is done.

use std::collections::HashMap;

use crate::host::{ElementId, Host, PropertyMask, Style};

/// Job types for pending host writes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JobType {
    /// Drop inline channels left behind by a disposed registration
    Revert,
    /// Write animated channels
    Style,
    /// Replace text content
    Text,
}

/// Deduplicated writes for one frame.
///
/// Each (element, job type) pair appears once; style jobs for the same
/// element merge channel by channel, later pushes winning.
#[derive(Default)]
pub struct WriteQueue {
    order: Vec<(ElementId, JobType)>,
    styles: HashMap<ElementId, Style>,
    texts: HashMap<ElementId, String>,
    reverts: HashMap<ElementId, PropertyMask>,
    native_cursor_hidden: Option<bool>,
}

impl WriteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn touch(&mut self, element: ElementId, job_type: JobType, fresh: bool) {
        if fresh {
            self.order.push((element, job_type));
        }
    }

    pub fn push_style(&mut self, element: ElementId, style: &Style) {
        if style.is_empty() {
            return;
        }
        let fresh = !self.styles.contains_key(&element);
        self.styles.entry(element).or_default().merge(style);
        self.touch(element, JobType::Style, fresh);
    }

    pub fn push_text(&mut self, element: ElementId, text: String) {
        let fresh = self.texts.insert(element, text).is_none();
        self.touch(element, JobType::Text, fresh);
    }

    pub fn push_revert(&mut self, element: ElementId, mask: PropertyMask) {
        if mask.is_empty() {
            return;
        }
        // a revert supersedes values queued earlier in the frame
        if let Some(style) = self.styles.get_mut(&element) {
            style.remove(mask);
        }
        let fresh = !self.reverts.contains_key(&element);
        *self.reverts.entry(element).or_default() |= mask;
        self.touch(element, JobType::Revert, fresh);
    }

    /// Hide or restore the platform cursor; the last request wins.
    pub fn push_native_cursor(&mut self, hidden: bool) {
        self.native_cursor_hidden = Some(hidden);
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty() && self.native_cursor_hidden.is_none()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Style queued for `element` this frame, if any.
    pub fn style(&self, element: ElementId) -> Option<&Style> {
        self.styles.get(&element)
    }

    /// Apply every job to `host`: reverts first, then styles and text in
    /// push order. Failures (detached elements) are logged and dropped.
    /// Returns the number of successful writes.
    pub fn flush(&mut self, host: &mut dyn Host) -> usize {
        let mut written = 0;
        let order = std::mem::take(&mut self.order);

        for (element, _) in order.iter().filter(|(_, t)| *t == JobType::Revert) {
            if let Some(mask) = self.reverts.remove(element) {
                match host.clear_style(*element, mask) {
                    Ok(()) => written += 1,
                    Err(e) => log::debug!("Revert skipped: {}", e),
                }
            }
        }

        for (element, job_type) in order.iter() {
            let result = match job_type {
                JobType::Revert => continue,
                JobType::Style => match self.styles.remove(element) {
                    Some(style) => host.apply_style(*element, &style),
                    None => continue,
                },
                JobType::Text => match self.texts.remove(element) {
                    Some(text) => host.set_text(*element, &text),
                    None => continue,
                },
            };
            match result {
                Ok(()) => written += 1,
                Err(e) => log::debug!("Write skipped: {}", e),
            }
        }

        if let Some(hidden) = self.native_cursor_hidden.take() {
            host.set_native_cursor_hidden(hidden);
        }

        self.styles.clear();
        self.texts.clear();
        self.reverts.clear();
        written
    }
}
