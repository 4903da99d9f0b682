// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic [`MotionHost`] used by the unit tests.

use alloc::vec::Vec;

use understory_motion::{MotionHost, TimerToken};

/// Records host interactions; frames and timers are fired manually.
#[derive(Clone, Debug)]
pub(crate) struct ListHost {
    pub(crate) supported: bool,
    pub(crate) attached: Vec<u32>,
    pub(crate) detached: Vec<u32>,
    next_timer: u64,
}

impl ListHost {
    pub(crate) fn new() -> Self {
        Self {
            supported: true,
            attached: Vec::new(),
            detached: Vec::new(),
            next_timer: 0,
        }
    }
}

impl MotionHost for ListHost {
    type Element = u32;

    fn transitions_supported(&self) -> bool {
        self.supported
    }

    fn request_frame(&mut self) {}

    fn schedule_timeout(&mut self, _after_ms: u64) -> TimerToken {
        self.next_timer += 1;
        TimerToken(self.next_timer)
    }

    fn cancel_timeout(&mut self, _token: TimerToken) {}

    fn attach_motion_listeners(&mut self, element: &u32) {
        self.attached.push(*element);
    }

    fn detach_motion_listeners(&mut self, element: &u32) {
        self.detached.push(*element);
    }
}
