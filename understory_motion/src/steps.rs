// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-phase step queue: fixed step order, synchronous skip, frame deferral,
//! and asynchronous prepare gating.

use crate::frame::NextFrame;
use crate::host::MotionHost;
use crate::types::StepStatus;

/// Full queue driving a real transition.
const FULL_QUEUE: &[StepStatus] = &[
    StepStatus::Prepare,
    StepStatus::Start,
    StepStatus::Active,
    StepStatus::Activated,
];

/// Reduced queue for a measurement-only pass (no transition support).
const PREPARE_QUEUE: &[StepStatus] = &[StepStatus::Prepare, StepStatus::Prepared];

/// Token identifying one pending asynchronous prepare gate.
///
/// A token captured before a phase was superseded no longer matches; resolving
/// it is a no-op. The externally requested reset always wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PrepareToken(u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Pending {
    #[default]
    Idle,
    /// Advance once the frame delay elapses.
    Frame,
    /// Advance once the frame delay elapses *and* the prepare gate resolves.
    Prepare { frame_done: bool, resolved: bool },
}

/// Step progression for the phase currently owned by the status machine.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct StepQueue {
    queue: &'static [StepStatus],
    step: StepStatus,
    frame: NextFrame,
    pending: Pending,
    generation: u64,
}

impl StepQueue {
    /// Restart at `Prepare` on the queue matching the phase kind. Supersedes
    /// any in-flight advancement.
    pub(crate) fn begin(&mut self, prepare_only: bool) {
        self.queue = if prepare_only { PREPARE_QUEUE } else { FULL_QUEUE };
        self.step = StepStatus::Prepare;
        self.pending = Pending::Idle;
        self.frame.cancel();
        self.generation += 1;
    }

    /// Drop any scheduled advancement and return to the idle step.
    pub(crate) fn reset(&mut self) {
        self.queue = &[];
        self.step = StepStatus::None;
        self.pending = Pending::Idle;
        self.frame.cancel();
        self.generation += 1;
    }

    pub(crate) fn step(&self) -> StepStatus {
        self.step
    }

    fn next(&self) -> Option<StepStatus> {
        let index = self.queue.iter().position(|s| *s == self.step)?;
        self.queue.get(index + 1).copied()
    }

    /// Advance synchronously. Returns `false` at the end of the queue.
    pub(crate) fn skip(&mut self) -> bool {
        match self.next() {
            Some(next) => {
                self.step = next;
                true
            }
            None => false,
        }
    }

    /// Schedule advancement after the frame delay, optionally gated on an
    /// asynchronous prepare. No-op on the last step.
    pub(crate) fn defer<H: MotionHost>(&mut self, host: &mut H, await_prepare: bool) {
        if self.next().is_none() {
            return;
        }
        self.frame.schedule(host);
        self.pending = if await_prepare {
            Pending::Prepare {
                frame_done: false,
                resolved: false,
            }
        } else {
            Pending::Frame
        };
    }

    /// Process one host tick; returns `true` when the queue advanced.
    pub(crate) fn on_frame<H: MotionHost>(&mut self, host: &mut H) -> bool {
        if !self.frame.on_frame(host) {
            return false;
        }
        match self.pending {
            Pending::Frame | Pending::Prepare { resolved: true, .. } => {
                self.pending = Pending::Idle;
                self.advance();
                true
            }
            Pending::Prepare { resolved: false, .. } => {
                self.pending = Pending::Prepare {
                    frame_done: true,
                    resolved: false,
                };
                false
            }
            Pending::Idle => false,
        }
    }

    /// Resolve the prepare gate; returns `true` when the queue advanced.
    pub(crate) fn finish_prepare(&mut self) -> bool {
        match self.pending {
            Pending::Prepare { frame_done: true, .. } => {
                self.pending = Pending::Idle;
                self.advance();
                true
            }
            Pending::Prepare { frame_done: false, .. } => {
                self.pending = Pending::Prepare {
                    frame_done: false,
                    resolved: true,
                };
                false
            }
            Pending::Idle | Pending::Frame => false,
        }
    }

    fn advance(&mut self) {
        if let Some(next) = self.next() {
            self.step = next;
        }
    }

    /// Token for the currently pending prepare gate, if any.
    pub(crate) fn pending_prepare(&self) -> Option<PrepareToken> {
        matches!(self.pending, Pending::Prepare { .. }).then_some(PrepareToken(self.generation))
    }

    /// Whether `token` still refers to the pending prepare gate.
    pub(crate) fn token_matches(&self, token: PrepareToken) -> bool {
        token.0 == self.generation && matches!(self.pending, Pending::Prepare { .. })
    }
}
