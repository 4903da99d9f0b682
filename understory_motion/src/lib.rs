// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Motion: frame-driven transition lifecycle primitives.
//!
//! ## Overview
//!
//! This crate orchestrates *when* a transition runs, never *what* it looks
//! like. Given a visibility toggle, a [`Motion`] controller derives a
//! lifecycle phase — appear, enter, or leave — and walks it through a fixed
//! step queue (`prepare → start → active → activated`), one step per
//! animation-frame boundary, resolving the caller-supplied class names and
//! styles for each step. The phase ends on a motion-end signal whose target
//! is exactly the controller's element, or on a deadline timer, and the
//! settled visibility is reported back exactly once.
//!
//! There is no DOM and no rendering here. The host environment is reached
//! through the [`MotionHost`] trait (frame ticks, timers, motion-end listener
//! registration, capability probe), and elements are opaque handles compared
//! by identity. Keyed collections of controllers live in the companion
//! `understory_motion_list` crate.
//!
//! Host frameworks are responsible for:
//!
//! - Owning the rendered content and applying the [`MotionProps`] resolved by
//!   [`Motion::render`].
//! - Reporting the realized element through [`Motion::set_node`].
//! - Delivering animation-frame ticks, timer expiries, and native
//!   transition/animation end events back into the controller.
//! - Disposing controllers they drop, so no listener or timer leaks.
//!
//! ## Minimal example
//!
//! ```
//! use understory_motion::{Motion, MotionConfig, MotionEndEvent, MotionHost, StyleProps, TimerToken};
//!
//! // A tiny host: transition support, manual frames, manual timers.
//! #[derive(Default)]
//! struct Host {
//!     next_timer: u64,
//! }
//!
//! impl MotionHost for Host {
//!     type Element = u32;
//!     fn transitions_supported(&self) -> bool {
//!         true
//!     }
//!     fn request_frame(&mut self) {}
//!     fn schedule_timeout(&mut self, _after_ms: u64) -> TimerToken {
//!         self.next_timer += 1;
//!         TimerToken(self.next_timer)
//!     }
//!     fn cancel_timeout(&mut self, _token: TimerToken) {}
//!     fn attach_motion_listeners(&mut self, _element: &u32) {}
//!     fn detach_motion_listeners(&mut self, _element: &u32) {}
//! }
//!
//! let mut host = Host::default();
//! let mut cfg = MotionConfig::new("fade");
//! cfg.on_enter_start = Some(Box::new(|_| Some(StyleProps::new().with("opacity", "0"))));
//! cfg.on_enter_active = Some(Box::new(|_| Some(StyleProps::new().with("opacity", "1"))));
//!
//! let mut motion: Motion<Host> = Motion::new();
//! motion.set_visible(&mut host, &mut cfg, false);
//! motion.set_node(Some(7));
//! motion.set_visible(&mut host, &mut cfg, true);
//!
//! let props = motion.render(&host, &cfg).unwrap();
//! assert_eq!(props.class_name.as_deref(), Some("fade-enter fade-enter-start fade"));
//! assert_eq!(props.style.unwrap().get("opacity"), Some("0"));
//!
//! // Two ticks per step: the start style flushes before active applies.
//! motion.on_frame(&mut host, &mut cfg);
//! motion.on_frame(&mut host, &mut cfg);
//! let props = motion.render(&host, &cfg).unwrap();
//! assert_eq!(props.class_name.as_deref(), Some("fade-enter fade-enter-active fade"));
//! assert_eq!(props.style.unwrap().get("opacity"), Some("1"));
//!
//! // The native end event on the element settles the transition.
//! let settled = motion.on_motion_end(&mut host, &mut cfg, &MotionEndEvent::native(7));
//! assert_eq!(settled, Some(true));
//! assert!(!motion.in_motion());
//! ```
//!
//! ## Concurrency
//!
//! Everything is single-threaded and cooperatively driven; controllers are
//! not `Send`. A new phase always supersedes in-flight step advancement of
//! the previous one, and a disposed controller never fires anything again.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod context;
mod events;
mod frame;
mod host;
mod motion;
mod name;
mod status;
mod steps;
mod style;
mod types;

#[cfg(test)]
pub(crate) mod test_host;

pub use config::{
    MotionConfig, MotionEndHandler, MotionPrepareHandler, MotionStyleHandler, PrepareAction,
};
pub use context::MotionContext;
pub use host::{MotionHost, TimerToken};
pub use motion::{Motion, MotionProps};
pub use name::{MotionName, StatusNames};
pub use steps::PrepareToken;
pub use style::StyleProps;
pub use types::{MotionEndEvent, MotionStatus, StepStatus};
