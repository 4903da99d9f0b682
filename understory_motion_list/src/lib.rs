// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Motion List: a keyed reconciler over motion controllers.
//!
//! ## Overview
//!
//! Given an ordered list of keys, [`MotionList`] classifies every key as
//! added, kept, or removed against the previous pass ([`diff_keys`]), keeps
//! one [`understory_motion::Motion`] controller alive per key, and drives
//! each controller's visibility from that classification. Removed keys stay
//! rendered (invisible, leaving) until their leave motion settles; they are
//! then marked [`KeyStatus::Removed`] and pruned on the next pass. When the
//! last surviving entity drains, a single [`ListEvent::AllRemoved`] fires.
//!
//! Host frameworks are responsible for:
//!
//! - Calling [`MotionList::set_keys`] whenever the key list changes.
//! - Rendering the entries from [`MotionList::render`] in order and binding
//!   each realized element via [`MotionList::set_node`].
//! - Fanning host signals into the list ([`MotionList::on_frame`],
//!   [`MotionList::on_motion_end`], [`MotionList::on_timeout`]); the per-key
//!   routing happens inside.
//!
//! ## Minimal example
//!
//! Without a motion name, visibility changes settle immediately, which keeps
//! the example host trivial:
//!
//! ```
//! use understory_motion::{MotionConfig, MotionHost, TimerToken};
//! use understory_motion_list::{KeyRecord, ListEvent, MotionList};
//!
//! struct Host;
//! impl MotionHost for Host {
//!     type Element = u32;
//!     fn transitions_supported(&self) -> bool {
//!         true
//!     }
//!     fn request_frame(&mut self) {}
//!     fn schedule_timeout(&mut self, _after_ms: u64) -> TimerToken {
//!         TimerToken(0)
//!     }
//!     fn cancel_timeout(&mut self, _token: TimerToken) {}
//!     fn attach_motion_listeners(&mut self, _element: &u32) {}
//!     fn detach_motion_listeners(&mut self, _element: &u32) {}
//! }
//!
//! let mut host = Host;
//! let mut cfg: MotionConfig<u32> = MotionConfig::default();
//! let mut list: MotionList<Host, &str> = MotionList::new();
//!
//! list.set_keys(&mut host, &mut cfg, &[KeyRecord::bare("a"), KeyRecord::bare("b")]);
//! let events = list.set_keys(&mut host, &mut cfg, &[KeyRecord::bare("b")]);
//! assert!(events.contains(&ListEvent::VisibleChanged { key: "a", visible: false }));
//!
//! // The drained entity is pruned on the next reconciliation pass.
//! list.set_keys(&mut host, &mut cfg, &[KeyRecord::bare("b")]);
//! assert_eq!(list.len(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod diff;
mod list;

#[cfg(test)]
pub(crate) mod test_host;

pub use diff::{KeyEntity, KeyRecord, KeyStatus, diff_keys, parse_keys};
pub use list::{ListEvent, MotionList, RenderedEntry};
