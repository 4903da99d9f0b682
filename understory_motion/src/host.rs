// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host environment abstraction.
//!
//! The motion crates never talk to a real UI tree. Everything the state
//! machine needs from the outside — animation-frame ticks, deadline timers,
//! motion-end event subscriptions, and the transition capability probe — goes
//! through [`MotionHost`]. Hosts deliver the requested signals back through
//! the driving methods on [`Motion`](crate::Motion) (`on_frame`, `on_timeout`,
//! `on_motion_end`).

/// Identifier for a deadline timer armed through
/// [`MotionHost::schedule_timeout`].
///
/// Tokens route expiry back to the controller that armed the timer; a token
/// from a phase that has since ended no longer matches and its expiry is
/// ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u64);

/// Scheduling and event plumbing supplied by the embedding UI stack.
///
/// ## Contract
///
/// - [`request_frame`](Self::request_frame) asks for at least one more
///   animation-frame tick; the host delivers ticks by calling `on_frame` on
///   the controllers it drives. Requests may be coalesced — one tick serves
///   every pending request — and ticks delivered while nothing is scheduled
///   are ignored by the controllers.
/// - [`schedule_timeout`](Self::schedule_timeout) arms a one-shot wall-clock
///   timer and returns a fresh token; on expiry the host calls `on_timeout`
///   with that token.
/// - [`attach_motion_listeners`](Self::attach_motion_listeners) subscribes to
///   both the transition-end and animation-end native signals on an element;
///   the host reports them via `on_motion_end` with the event's target.
///
/// Elements are opaque handles compared by identity (handle equality), never
/// by deep comparison.
pub trait MotionHost {
    /// Handle to a realized host element.
    type Element: Clone + PartialEq;

    /// Whether the environment can deliver transition/animation end events at
    /// all. When `false`, controllers snap directly between states (running
    /// only measurement passes for phases with a prepare callback).
    fn transitions_supported(&self) -> bool;

    /// Ask for one more animation-frame tick.
    fn request_frame(&mut self);

    /// Arm a one-shot timer firing after `after_ms` milliseconds.
    fn schedule_timeout(&mut self, after_ms: u64) -> TimerToken;

    /// Cancel a previously armed timer. Cancelling an already-fired or
    /// unknown token is a no-op.
    fn cancel_timeout(&mut self, token: TimerToken);

    /// Subscribe to transition-end and animation-end signals on `element`.
    fn attach_motion_listeners(&mut self, element: &Self::Element);

    /// Remove the subscription installed by
    /// [`attach_motion_listeners`](Self::attach_motion_listeners).
    fn detach_motion_listeners(&mut self, element: &Self::Element);
}
