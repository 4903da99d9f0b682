// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core status, step, and event types shared by the motion state machine.

/// Lifecycle phase currently driving an element.
///
/// `None` is both the initial and the settled state; the other three values
/// mark an in-flight transition triggered by a visibility change. At most one
/// phase is active per controller at any time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MotionStatus {
    /// No transition in progress; visibility is reflected directly.
    #[default]
    None,
    /// First mount of visible content.
    Appear,
    /// Hidden content becoming visible.
    Enter,
    /// Visible content becoming hidden.
    Leave,
}

impl MotionStatus {
    /// Class-name fragment for this status, or `None` when idle.
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Appear => Some("appear"),
            Self::Enter => Some("enter"),
            Self::Leave => Some("leave"),
        }
    }

    /// Returns `true` while a transition is in progress.
    pub fn in_motion(self) -> bool {
        self != Self::None
    }
}

/// Progress within a phase.
///
/// The full queue is `Prepare → Start → Active → Activated`; the reduced
/// measurement-only queue is `Prepare → Prepared`. Terminal steps hold until
/// the owning phase resets back to `None`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StepStatus {
    /// No step running.
    #[default]
    None,
    /// Optional measurement/setup stage; may gate on asynchronous work.
    Prepare,
    /// Terminal step of the measurement-only queue.
    Prepared,
    /// Initial style applied; transitions suppressed for this frame.
    Start,
    /// Target style applied; motion-end events are now honored.
    Active,
    /// Terminal step of the full queue.
    Activated,
}

impl StepStatus {
    /// The step has reached the point where motion-end events are honored.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active | Self::Activated)
    }
}

/// A motion completion signal delivered to the state machine.
///
/// Hosts construct one from a native transition-end or animation-end event
/// (either can end a phase). The deadline timer synthesizes one with no
/// target, which always passes the target-identity check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MotionEndEvent<E> {
    /// The element the native event fired on, if any. Completion is only
    /// honored when this is exactly the controller's resolved host element;
    /// events bubbling up from descendants are ignored.
    pub target: Option<E>,
    /// Set when synthesized by the phase deadline instead of a native event.
    pub deadline: bool,
}

impl<E> MotionEndEvent<E> {
    /// Completion reported by the host for a native end event on `target`.
    pub fn native(target: E) -> Self {
        Self {
            target: Some(target),
            deadline: false,
        }
    }

    /// Completion synthesized by the deadline timer.
    pub(crate) fn deadline() -> Self {
        Self {
            target: None,
            deadline: true,
        }
    }
}
