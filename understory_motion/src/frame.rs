// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Next-frame scheduling.

use crate::host::MotionHost;

/// Number of frame boundaries a deferred step waits for. The extra boundary
/// guarantees the style committed on the previous step has been flushed
/// before the next step's style applies.
const FRAME_DELAY: u8 = 2;

/// One pending next-frame slot.
///
/// Re-scheduling replaces any pending slot, and ticks delivered while nothing
/// is pending are ignored, so a superseded schedule can never fire.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct NextFrame {
    remaining: Option<u8>,
}

impl NextFrame {
    /// Schedule the slot [`FRAME_DELAY`] boundaries from now, replacing any
    /// pending schedule.
    pub(crate) fn schedule<H: MotionHost>(&mut self, host: &mut H) {
        self.remaining = Some(FRAME_DELAY);
        host.request_frame();
    }

    /// Drop the pending slot, if any.
    pub(crate) fn cancel(&mut self) {
        self.remaining = None;
    }

    /// Process one host tick. Returns `true` when the scheduled slot is due.
    pub(crate) fn on_frame<H: MotionHost>(&mut self, host: &mut H) -> bool {
        match self.remaining {
            Some(n) if n > 1 => {
                self.remaining = Some(n - 1);
                host.request_frame();
                false
            }
            Some(_) => {
                self.remaining = None;
                true
            }
            None => false,
        }
    }
}
