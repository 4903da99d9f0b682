// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Motion configuration: flags plus one callback per (status × step) cell.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::fmt;

use crate::context::MotionContext;
use crate::host::MotionHost;
use crate::name::MotionName;
use crate::style::StyleProps;
use crate::types::{MotionEndEvent, MotionStatus, StepStatus};

/// Result of a prepare callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrepareAction {
    /// Measurement finished; advance after the frame delay.
    Done,
    /// Asynchronous work is outstanding; advance once
    /// [`finish_prepare`](crate::Motion::finish_prepare) is called with the
    /// matching token (and the frame delay has elapsed).
    Pending,
}

/// Style callback for the start/active steps. Receives the resolved host
/// element when available; the return value becomes the element's inline
/// style for that step.
pub type MotionStyleHandler<E> = Box<dyn FnMut(Option<&E>) -> Option<StyleProps>>;

/// Measurement callback for the prepare step.
pub type MotionPrepareHandler<E> = Box<dyn FnMut(Option<&E>) -> PrepareAction>;

/// Completion callback. Returning `false` vetoes the completion and keeps the
/// phase active until a later end event is not vetoed.
pub type MotionEndHandler<E> = Box<dyn FnMut(Option<&E>, &MotionEndEvent<E>) -> bool>;

/// Configuration for a motion controller.
///
/// Passed by `&mut` to every driving call, like render props: the same value
/// can drive a whole keyed list. Treated as immutable while a phase runs,
/// with one exception — toggling a phase's enable flag to `false` mid-phase
/// cancels that phase back to idle on the next driving call (or via
/// [`update`](crate::Motion::update)).
pub struct MotionConfig<E> {
    /// Transition name; motion is structurally disabled when absent.
    pub motion_name: Option<MotionName>,
    /// Run the appear phase when content first mounts visible.
    pub appear: bool,
    /// Run the enter phase on hidden → visible changes.
    pub enter: bool,
    /// Run the leave phase on visible → hidden changes.
    pub leave: bool,
    /// Start an initially hidden element directly in its leave phase.
    pub leave_immediately: bool,
    /// Force-complete a phase after this many milliseconds without a native
    /// end event. Ignored when zero.
    pub deadline: Option<u64>,
    /// Unmount hidden content once its leave finishes (the default).
    pub remove_on_leave: bool,
    /// Keep hidden content mounted (with `display: none`) even when
    /// [`remove_on_leave`](Self::remove_on_leave) would unmount it.
    pub force_render: bool,
    /// Class applied to content that stays mounted after leaving.
    pub leaved_class_name: Option<Cow<'static, str>>,
    /// Ambient scope override; see [`MotionContext`].
    pub context: MotionContext,

    /// Appear-phase measurement callback.
    pub on_appear_prepare: Option<MotionPrepareHandler<E>>,
    /// Enter-phase measurement callback.
    pub on_enter_prepare: Option<MotionPrepareHandler<E>>,
    /// Leave-phase measurement callback.
    pub on_leave_prepare: Option<MotionPrepareHandler<E>>,

    /// Appear-phase initial style.
    pub on_appear_start: Option<MotionStyleHandler<E>>,
    /// Enter-phase initial style.
    pub on_enter_start: Option<MotionStyleHandler<E>>,
    /// Leave-phase initial style.
    pub on_leave_start: Option<MotionStyleHandler<E>>,

    /// Appear-phase target style.
    pub on_appear_active: Option<MotionStyleHandler<E>>,
    /// Enter-phase target style.
    pub on_enter_active: Option<MotionStyleHandler<E>>,
    /// Leave-phase target style.
    pub on_leave_active: Option<MotionStyleHandler<E>>,

    /// Appear-phase completion callback.
    pub on_appear_end: Option<MotionEndHandler<E>>,
    /// Enter-phase completion callback.
    pub on_enter_end: Option<MotionEndHandler<E>>,
    /// Leave-phase completion callback.
    pub on_leave_end: Option<MotionEndHandler<E>>,
}

impl<E> Default for MotionConfig<E> {
    fn default() -> Self {
        Self {
            motion_name: None,
            appear: true,
            enter: true,
            leave: true,
            leave_immediately: false,
            deadline: None,
            remove_on_leave: true,
            force_render: false,
            leaved_class_name: None,
            context: MotionContext::INHERIT,
            on_appear_prepare: None,
            on_enter_prepare: None,
            on_leave_prepare: None,
            on_appear_start: None,
            on_enter_start: None,
            on_leave_start: None,
            on_appear_active: None,
            on_enter_active: None,
            on_leave_active: None,
            on_appear_end: None,
            on_enter_end: None,
            on_leave_end: None,
        }
    }
}

impl<E> fmt::Debug for MotionConfig<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotionConfig")
            .field("motion_name", &self.motion_name)
            .field("appear", &self.appear)
            .field("enter", &self.enter)
            .field("leave", &self.leave)
            .field("leave_immediately", &self.leave_immediately)
            .field("deadline", &self.deadline)
            .field("remove_on_leave", &self.remove_on_leave)
            .field("force_render", &self.force_render)
            .field("leaved_class_name", &self.leaved_class_name)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl<E> MotionConfig<E> {
    /// Configuration using the basic name form with all phases enabled.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            motion_name: Some(MotionName::prefix(name)),
            ..Self::default()
        }
    }

    /// Whether motion can run at all given this configuration, the ambient
    /// scope, and the host environment.
    pub fn supports_motion<H: MotionHost<Element = E>>(&self, host: &H) -> bool {
        self.motion_name.is_some() && host.transitions_supported() && self.context.permits()
    }

    pub(crate) fn status_enabled(&self, status: MotionStatus) -> bool {
        match status {
            MotionStatus::None => true,
            MotionStatus::Appear => self.appear,
            MotionStatus::Enter => self.enter,
            MotionStatus::Leave => self.leave,
        }
    }

    pub(crate) fn has_prepare(&self, status: MotionStatus) -> bool {
        match status {
            MotionStatus::None => false,
            MotionStatus::Appear => self.on_appear_prepare.is_some(),
            MotionStatus::Enter => self.on_enter_prepare.is_some(),
            MotionStatus::Leave => self.on_leave_prepare.is_some(),
        }
    }

    pub(crate) fn prepare_handler(
        &mut self,
        status: MotionStatus,
    ) -> Option<&mut MotionPrepareHandler<E>> {
        match status {
            MotionStatus::None => None,
            MotionStatus::Appear => self.on_appear_prepare.as_mut(),
            MotionStatus::Enter => self.on_enter_prepare.as_mut(),
            MotionStatus::Leave => self.on_leave_prepare.as_mut(),
        }
    }

    pub(crate) fn style_handler(
        &mut self,
        status: MotionStatus,
        step: StepStatus,
    ) -> Option<&mut MotionStyleHandler<E>> {
        match (status, step) {
            (MotionStatus::Appear, StepStatus::Start) => self.on_appear_start.as_mut(),
            (MotionStatus::Enter, StepStatus::Start) => self.on_enter_start.as_mut(),
            (MotionStatus::Leave, StepStatus::Start) => self.on_leave_start.as_mut(),
            (MotionStatus::Appear, StepStatus::Active) => self.on_appear_active.as_mut(),
            (MotionStatus::Enter, StepStatus::Active) => self.on_enter_active.as_mut(),
            (MotionStatus::Leave, StepStatus::Active) => self.on_leave_active.as_mut(),
            _ => None,
        }
    }

    /// Run the completion callback for `status`; completion is allowed when
    /// no callback is configured.
    pub(crate) fn run_end(
        &mut self,
        status: MotionStatus,
        element: Option<&E>,
        event: &MotionEndEvent<E>,
    ) -> bool {
        let handler = match status {
            MotionStatus::None => None,
            MotionStatus::Appear => self.on_appear_end.as_mut(),
            MotionStatus::Enter => self.on_enter_end.as_mut(),
            MotionStatus::Leave => self.on_leave_end.as_mut(),
        };
        match handler {
            Some(handler) => handler(element, event),
            None => true,
        }
    }
}
