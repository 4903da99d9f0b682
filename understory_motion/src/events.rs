// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Motion-end listener bridge.
//!
//! Tracks the single element currently wired for transition-end and
//! animation-end signals. Each controller owns exactly one bridge; the wired
//! element is never shared across controllers.

use crate::host::MotionHost;

/// Wiring state for motion-end listeners on one element.
pub(crate) struct MotionEvents<E> {
    wired: Option<E>,
}

impl<E> Default for MotionEvents<E> {
    fn default() -> Self {
        Self { wired: None }
    }
}

impl<E: Clone + PartialEq> MotionEvents<E> {
    /// Wire `element`, detaching the previously wired element first when it
    /// differs. Re-patching the same element is a no-op, so listeners are
    /// never duplicated and never leak across element changes.
    pub(crate) fn patch<H: MotionHost<Element = E>>(&mut self, host: &mut H, element: &E) {
        if self.wired.as_ref() == Some(element) {
            return;
        }
        if let Some(old) = self.wired.take() {
            host.detach_motion_listeners(&old);
        }
        host.attach_motion_listeners(element);
        // Keep the handle so a deadline can still resolve the element after
        // the host has dropped its node.
        self.wired = Some(element.clone());
    }

    /// Detach from whatever element is currently wired.
    pub(crate) fn remove<H: MotionHost<Element = E>>(&mut self, host: &mut H) {
        if let Some(old) = self.wired.take() {
            host.detach_motion_listeners(&old);
        }
    }

    /// The currently wired element.
    pub(crate) fn element(&self) -> Option<&E> {
        self.wired.as_ref()
    }
}
