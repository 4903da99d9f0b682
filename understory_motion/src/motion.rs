// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-element motion controller.
//!
//! [`Motion`] composes the status machine with node binding and resolves
//! per-render props. The host owns the actual content; the controller only
//! answers "should anything render, and with which class/style".
//!
//! ## Call order
//!
//! 1. Bind the realized element with [`Motion::set_node`] whenever it exists
//!    (hosts without direct handles may resolve one however they like — the
//!    controller only needs the opaque handle).
//! 2. Feed visibility changes through [`Motion::set_visible`].
//! 3. Resolve [`Motion::render`] and apply the returned props; re-bind the
//!    node if the render changed it.
//! 4. Deliver frame ticks, motion-end events, and timer expiries.
//!
//! Prepare callbacks run synchronously inside [`Motion::set_visible`], so
//! content appearing for the first time should be mounted (and its node
//! bound) before the visibility change is fed in; otherwise the measurement
//! callback sees no element — which is not an error, just an absent handle.

use alloc::string::String;
use core::fmt;

use crate::config::MotionConfig;
use crate::host::{MotionHost, TimerToken};
use crate::status::StatusMachine;
use crate::steps::PrepareToken;
use crate::style::StyleProps;
use crate::types::{MotionEndEvent, MotionStatus, StepStatus};

/// Props resolved for one render pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MotionProps {
    /// Target visibility. While a transition runs this already reflects the
    /// end state, so callers can tell where an in-progress leave or enter is
    /// headed.
    pub visible: bool,
    /// Space-separated motion classes, when any apply.
    pub class_name: Option<String>,
    /// Resolved inline style for the current step, when any.
    pub style: Option<StyleProps>,
}

/// Controller for one element's transition lifecycle.
///
/// Driving methods take the host and the configuration by `&mut` so one
/// configuration can serve many controllers (the keyed list does exactly
/// that). Each returns `Some(visible)` when the visibility settles: when a
/// change starts no phase and applies directly, and when a phase ends —
/// normally, by deadline, or by a mid-phase flag toggle. Superseded
/// intermediate transitions never settle, and an initial invisible mount
/// with no prior visible state stays silent.
pub struct Motion<H: MotionHost> {
    machine: StatusMachine<H::Element>,
    node: Option<H::Element>,
    /// Content has rendered visible at least once; gates the leaved class.
    rendered: bool,
    disposed: bool,
}

impl<H: MotionHost> fmt::Debug for Motion<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Motion")
            .field("status", &self.machine.status())
            .field("step", &self.machine.step())
            .field("rendered", &self.rendered)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl<H: MotionHost> Default for Motion<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: MotionHost> Motion<H> {
    /// A fresh, unmounted controller.
    pub fn new() -> Self {
        Self {
            machine: StatusMachine::default(),
            node: None,
            rendered: false,
            disposed: false,
        }
    }

    /// Report the realized host element (the ref-setter analog). Call with
    /// the current handle after each render, and with `None` once the node is
    /// dropped.
    pub fn set_node(&mut self, node: Option<H::Element>) {
        self.node = node;
    }

    /// Current host element: the bound node, else the element last wired for
    /// motion-end events (which outlives the node across a deadline race).
    pub fn native_element(&self) -> Option<&H::Element> {
        self.node.as_ref().or_else(|| self.machine.wired_element())
    }

    /// Whether a transition is currently in progress.
    pub fn in_motion(&self) -> bool {
        self.machine.status().in_motion()
    }

    /// Whether motion is structurally possible under `cfg` in this
    /// environment.
    pub fn motion_enabled(&self, host: &H, cfg: &MotionConfig<H::Element>) -> bool {
        cfg.supports_motion(host)
    }

    /// The phase currently driving the element.
    pub fn status(&self) -> MotionStatus {
        self.machine.status()
    }

    /// Progress within the current phase.
    pub fn step(&self) -> StepStatus {
        self.machine.step()
    }

    /// Token for an outstanding asynchronous prepare gate, if any. Pass it
    /// back through [`finish_prepare`](Self::finish_prepare) when the work
    /// completes.
    pub fn pending_prepare(&self) -> Option<PrepareToken> {
        self.machine.pending_prepare()
    }

    /// Feed a visibility change; evaluated on change only.
    pub fn set_visible(
        &mut self,
        host: &mut H,
        cfg: &mut MotionConfig<H::Element>,
        visible: bool,
    ) -> Option<bool> {
        if self.disposed {
            return None;
        }
        self.machine.set_visible(host, cfg, self.node.as_ref(), visible)
    }

    /// Re-check configuration flags; cancels a phase whose enable flag was
    /// toggled off.
    pub fn update(&mut self, host: &mut H, cfg: &mut MotionConfig<H::Element>) -> Option<bool> {
        if self.disposed {
            return None;
        }
        self.machine.update(host, cfg)
    }

    /// Deliver one animation-frame tick.
    pub fn on_frame(&mut self, host: &mut H, cfg: &mut MotionConfig<H::Element>) -> Option<bool> {
        if self.disposed {
            return None;
        }
        self.machine.on_frame(host, cfg, self.node.as_ref())
    }

    /// Deliver a motion completion signal from the host.
    pub fn on_motion_end(
        &mut self,
        host: &mut H,
        cfg: &mut MotionConfig<H::Element>,
        event: &MotionEndEvent<H::Element>,
    ) -> Option<bool> {
        if self.disposed {
            return None;
        }
        self.machine.on_motion_end(host, cfg, self.node.as_ref(), event)
    }

    /// Deliver a timer expiry.
    pub fn on_timeout(
        &mut self,
        host: &mut H,
        cfg: &mut MotionConfig<H::Element>,
        token: TimerToken,
    ) -> Option<bool> {
        if self.disposed {
            return None;
        }
        self.machine.on_timeout(host, cfg, self.node.as_ref(), token)
    }

    /// Resolve an asynchronous prepare gate.
    pub fn finish_prepare(
        &mut self,
        host: &mut H,
        cfg: &mut MotionConfig<H::Element>,
        token: PrepareToken,
    ) -> Option<bool> {
        if self.disposed {
            return None;
        }
        self.machine
            .finish_prepare(host, cfg, self.node.as_ref(), token)
    }

    /// Resolve render props for the current state. `None` means render
    /// nothing (unmount).
    pub fn render(&mut self, host: &H, cfg: &MotionConfig<H::Element>) -> Option<MotionProps> {
        if self.disposed {
            return None;
        }
        let visible = self.machine.target_visible().unwrap_or(true);
        if visible {
            self.rendered = true;
        }
        let status = self.machine.status();

        if !status.in_motion() || !cfg.supports_motion(host) {
            if visible {
                return Some(MotionProps {
                    visible: true,
                    class_name: None,
                    style: None,
                });
            }
            if !cfg.remove_on_leave && self.rendered && cfg.leaved_class_name.is_some() {
                return Some(MotionProps {
                    visible: false,
                    class_name: cfg.leaved_class_name.clone().map(String::from),
                    style: None,
                });
            }
            if cfg.force_render || (!cfg.remove_on_leave && cfg.leaved_class_name.is_none()) {
                return Some(MotionProps {
                    visible: false,
                    class_name: None,
                    style: Some(StyleProps::display_none()),
                });
            }
            return None;
        }

        let step = self.machine.step();
        let name = cfg.motion_name.as_ref()?;

        let mut classes = String::new();
        push_class(&mut classes, name.class_for(status, None));
        if step == StepStatus::Prepare {
            push_class(&mut classes, name.class_for(status, Some(StepStatus::Prepare)));
        }
        if step == StepStatus::Start {
            push_class(&mut classes, name.class_for(status, Some(StepStatus::Start)));
        }
        if step.is_active() {
            push_class(&mut classes, name.class_for(status, Some(StepStatus::Active)));
        }
        push_class(&mut classes, name.as_prefix().map(String::from));

        let mut style = self.machine.style().cloned();
        if cfg.has_prepare(status) && step == StepStatus::Start {
            style = Some(style.unwrap_or_default().prefixed_transition_none());
        }

        Some(MotionProps {
            visible,
            class_name: (!classes.is_empty()).then_some(classes),
            style,
        })
    }

    /// Tear the controller down: cancels scheduled work, clears the deadline,
    /// and detaches listeners. Every driving method is a no-op afterwards.
    pub fn dispose(&mut self, host: &mut H) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.machine.dispose(host);
        self.node = None;
    }
}

fn push_class(buffer: &mut String, class: Option<String>) {
    if let Some(class) = class {
        if !class.is_empty() {
            if !buffer.is_empty() {
                buffer.push(' ');
            }
            buffer.push_str(&class);
        }
    }
}
