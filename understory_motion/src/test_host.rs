// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic [`MotionHost`] used by the unit tests.

use alloc::vec::Vec;

use crate::host::{MotionHost, TimerToken};

/// Records every host interaction; frames and timers are fired manually by
/// the test driving the controller.
#[derive(Clone, Debug)]
pub(crate) struct TestHost {
    pub(crate) supported: bool,
    pub(crate) frame_requests: usize,
    pub(crate) scheduled: Vec<(TimerToken, u64)>,
    pub(crate) canceled: Vec<TimerToken>,
    pub(crate) attached: Vec<u32>,
    pub(crate) detached: Vec<u32>,
    next_timer: u64,
}

impl TestHost {
    pub(crate) fn new() -> Self {
        Self {
            supported: true,
            frame_requests: 0,
            scheduled: Vec::new(),
            canceled: Vec::new(),
            attached: Vec::new(),
            detached: Vec::new(),
            next_timer: 0,
        }
    }

    pub(crate) fn without_transitions() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    /// The most recently armed timer that has not been canceled.
    pub(crate) fn live_timer(&self) -> Option<TimerToken> {
        self.scheduled
            .iter()
            .rev()
            .map(|(token, _)| *token)
            .find(|token| !self.canceled.contains(token))
    }
}

impl MotionHost for TestHost {
    type Element = u32;

    fn transitions_supported(&self) -> bool {
        self.supported
    }

    fn request_frame(&mut self) {
        self.frame_requests += 1;
    }

    fn schedule_timeout(&mut self, after_ms: u64) -> TimerToken {
        self.next_timer += 1;
        let token = TimerToken(self.next_timer);
        self.scheduled.push((token, after_ms));
        token
    }

    fn cancel_timeout(&mut self, token: TimerToken) {
        self.canceled.push(token);
    }

    fn attach_motion_listeners(&mut self, element: &u32) {
        self.attached.push(*element);
    }

    fn detach_motion_listeners(&mut self, element: &u32) {
        self.detached.push(*element);
    }
}
