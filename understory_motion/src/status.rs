// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Motion status machine.
//!
//! Derives which lifecycle phase should run from visibility changes, walks
//! that phase's step queue (invoking the configured callback per step), and
//! ends the phase on a matching motion-end signal or the deadline timer.
//!
//! Driving methods return `Some(visible)` exactly once per settled
//! visibility: when a change that started no phase is reflected directly,
//! when a phase ends (normally, by deadline, or by a mid-phase flag toggle),
//! and when a measurement-only pass reaches `Prepared`. Superseded
//! intermediate transitions never settle, and an initial invisible mount with
//! no prior visible state stays silent.

use crate::config::{MotionConfig, PrepareAction};
use crate::events::MotionEvents;
use crate::host::{MotionHost, TimerToken};
use crate::steps::{PrepareToken, StepQueue};
use crate::style::StyleProps;
use crate::types::{MotionEndEvent, MotionStatus, StepStatus};

/// State machine for one element's transition lifecycle.
pub(crate) struct StatusMachine<E> {
    status: MotionStatus,
    queue: StepQueue,
    style: Option<StyleProps>,
    /// Last visibility input; the target visibility while a phase runs.
    async_visible: Option<bool>,
    mounted: bool,
    /// Guards the initial-invisible case: nothing settles until the element
    /// has been visible at least once.
    ever_visible: bool,
    settle_dirty: bool,
    deadline: Option<TimerToken>,
    events: MotionEvents<E>,
}

impl<E> Default for StatusMachine<E> {
    fn default() -> Self {
        Self {
            status: MotionStatus::None,
            queue: StepQueue::default(),
            style: None,
            async_visible: None,
            mounted: false,
            ever_visible: false,
            settle_dirty: false,
            deadline: None,
            events: MotionEvents::default(),
        }
    }
}

impl<E: Clone + PartialEq> StatusMachine<E> {
    pub(crate) fn status(&self) -> MotionStatus {
        self.status
    }

    pub(crate) fn step(&self) -> StepStatus {
        self.queue.step()
    }

    pub(crate) fn style(&self) -> Option<&StyleProps> {
        self.style.as_ref()
    }

    pub(crate) fn target_visible(&self) -> Option<bool> {
        self.async_visible
    }

    pub(crate) fn wired_element(&self) -> Option<&E> {
        self.events.element()
    }

    pub(crate) fn pending_prepare(&self) -> Option<PrepareToken> {
        self.queue.pending_prepare()
    }

    /// The element callbacks and completion checks resolve against: the bound
    /// node, else the element last wired for motion-end events.
    fn element<'a>(&'a self, node: Option<&'a E>) -> Option<&'a E> {
        node.or_else(|| self.events.element())
    }

    fn set_status(&mut self, status: MotionStatus) {
        if self.status != status {
            self.status = status;
            self.settle_dirty = true;
        }
    }

    /// Feed a visibility change. Evaluated on change only; repeating the
    /// current value is a no-op.
    pub(crate) fn set_visible<H: MotionHost<Element = E>>(
        &mut self,
        host: &mut H,
        cfg: &mut MotionConfig<E>,
        node: Option<&E>,
        visible: bool,
    ) -> Option<bool> {
        if self.mounted && self.async_visible == Some(visible) {
            return None;
        }
        if self.async_visible != Some(visible) {
            self.settle_dirty = true;
        }
        self.async_visible = Some(visible);
        self.ever_visible |= visible;
        let was_mounted = core::mem::replace(&mut self.mounted, true);

        let mut next = MotionStatus::None;
        if !was_mounted && visible && cfg.appear {
            next = MotionStatus::Appear;
        }
        if was_mounted && visible && cfg.enter {
            next = MotionStatus::Enter;
        }
        if (was_mounted && !visible && cfg.leave)
            || (!was_mounted && cfg.leave_immediately && !visible && cfg.leave)
        {
            next = MotionStatus::Leave;
        }

        let support = cfg.supports_motion(host);
        if next.in_motion() && (support || cfg.has_prepare(next)) {
            self.set_status(next);
            self.clear_deadline(host);
            self.queue.begin(!support);
            self.pump(host, cfg, node);
        } else {
            // No phase for this change: reflect the visibility directly,
            // cancelling whatever was in flight.
            self.set_status(MotionStatus::None);
            self.style = None;
            self.queue.reset();
            self.clear_deadline(host);
        }
        self.maybe_settle()
    }

    /// Process the current step, continuing synchronously through skipped
    /// steps until advancement defers to a frame or the queue is terminal.
    fn pump<H: MotionHost<Element = E>>(
        &mut self,
        host: &mut H,
        cfg: &mut MotionConfig<E>,
        node: Option<&E>,
    ) {
        loop {
            match self.queue.step() {
                StepStatus::None | StepStatus::Activated => break,
                StepStatus::Prepared => {
                    // Measurement-only pass: settles as soon as prepare ran.
                    self.end_phase(host);
                    break;
                }
                StepStatus::Prepare => {
                    let Some(handler) = cfg.prepare_handler(self.status) else {
                        if self.queue.skip() {
                            continue;
                        }
                        break;
                    };
                    let element = self.element(node).cloned();
                    let action = handler(element.as_ref());
                    self.queue.defer(host, action == PrepareAction::Pending);
                    break;
                }
                step @ (StepStatus::Start | StepStatus::Active) => {
                    let element = self.element(node).cloned();
                    self.style = match cfg.style_handler(self.status, step) {
                        Some(handler) => handler(element.as_ref()),
                        None => None,
                    };
                    if step == StepStatus::Active && self.status.in_motion() {
                        if let Some(element) = element.as_ref() {
                            self.events.patch(host, element);
                        }
                        if let Some(ms) = cfg.deadline.filter(|ms| *ms > 0) {
                            self.clear_deadline(host);
                            self.deadline = Some(host.schedule_timeout(ms));
                        }
                    }
                    self.queue.defer(host, false);
                    break;
                }
            }
        }
    }

    /// Deliver one animation-frame tick.
    pub(crate) fn on_frame<H: MotionHost<Element = E>>(
        &mut self,
        host: &mut H,
        cfg: &mut MotionConfig<E>,
        node: Option<&E>,
    ) -> Option<bool> {
        self.apply_cancel_rule(host, cfg);
        if self.queue.on_frame(host) {
            self.pump(host, cfg, node);
        }
        self.maybe_settle()
    }

    /// Resolve the asynchronous prepare gate identified by `token`. Stale
    /// tokens (from a superseded phase) are ignored: the reset wins.
    pub(crate) fn finish_prepare<H: MotionHost<Element = E>>(
        &mut self,
        host: &mut H,
        cfg: &mut MotionConfig<E>,
        node: Option<&E>,
        token: PrepareToken,
    ) -> Option<bool> {
        self.apply_cancel_rule(host, cfg);
        if self.queue.token_matches(token) && self.queue.finish_prepare() {
            self.pump(host, cfg, node);
        }
        self.maybe_settle()
    }

    /// Deliver a motion completion signal.
    pub(crate) fn on_motion_end<H: MotionHost<Element = E>>(
        &mut self,
        host: &mut H,
        cfg: &mut MotionConfig<E>,
        node: Option<&E>,
        event: &MotionEndEvent<E>,
    ) -> Option<bool> {
        self.apply_cancel_rule(host, cfg);
        self.handle_motion_end(host, cfg, node, event);
        self.maybe_settle()
    }

    fn handle_motion_end<H: MotionHost<Element = E>>(
        &mut self,
        host: &mut H,
        cfg: &mut MotionConfig<E>,
        node: Option<&E>,
        event: &MotionEndEvent<E>,
    ) {
        let element = self.element(node).cloned();
        if !event.deadline && (element.is_none() || event.target.as_ref() != element.as_ref()) {
            // Fired by a descendant (or unresolvable host element): not ours.
            return;
        }
        if !self.status.in_motion() || !self.queue.step().is_active() {
            return;
        }
        if cfg.run_end(self.status, element.as_ref(), event) {
            self.end_phase(host);
        }
    }

    /// Deliver a timer expiry. Only the token armed for the current phase's
    /// deadline synthesizes a completion event.
    pub(crate) fn on_timeout<H: MotionHost<Element = E>>(
        &mut self,
        host: &mut H,
        cfg: &mut MotionConfig<E>,
        node: Option<&E>,
        token: TimerToken,
    ) -> Option<bool> {
        if self.deadline != Some(token) {
            return None;
        }
        self.deadline = None;
        self.on_motion_end(host, cfg, node, &MotionEndEvent::deadline())
    }

    /// Re-check the phase enable flags against the current status.
    pub(crate) fn update<H: MotionHost<Element = E>>(
        &mut self,
        host: &mut H,
        cfg: &mut MotionConfig<E>,
    ) -> Option<bool> {
        self.apply_cancel_rule(host, cfg);
        self.maybe_settle()
    }

    /// A phase whose enable flag was toggled off is forced back to idle.
    fn apply_cancel_rule<H: MotionHost<Element = E>>(
        &mut self,
        host: &mut H,
        cfg: &MotionConfig<E>,
    ) {
        if self.status.in_motion() && !cfg.status_enabled(self.status) {
            self.end_phase(host);
        }
    }

    fn end_phase<H: MotionHost<Element = E>>(&mut self, host: &mut H) {
        self.set_status(MotionStatus::None);
        self.style = None;
        self.queue.reset();
        self.clear_deadline(host);
    }

    fn clear_deadline<H: MotionHost<Element = E>>(&mut self, host: &mut H) {
        if let Some(token) = self.deadline.take() {
            host.cancel_timeout(token);
        }
    }

    fn maybe_settle(&mut self) -> Option<bool> {
        if !self.settle_dirty || self.status.in_motion() {
            return None;
        }
        let visible = self.async_visible?;
        self.settle_dirty = false;
        (visible || self.ever_visible).then_some(visible)
    }

    pub(crate) fn dispose<H: MotionHost<Element = E>>(&mut self, host: &mut H) {
        self.queue.reset();
        self.clear_deadline(host);
        self.events.remove(host);
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use super::*;
    use crate::test_host::TestHost;

    fn style(name: &'static str, value: &'static str) -> Option<StyleProps> {
        Some(StyleProps::new().with(name, value))
    }

    /// Drive the two frame boundaries of one deferred step advance.
    fn tick(
        machine: &mut StatusMachine<u32>,
        host: &mut TestHost,
        cfg: &mut MotionConfig<u32>,
        node: Option<&u32>,
    ) -> Option<bool> {
        let first = machine.on_frame(host, cfg, node);
        first.or(machine.on_frame(host, cfg, node))
    }

    fn appear_cfg() -> MotionConfig<u32> {
        let mut cfg = MotionConfig::new("m");
        cfg.on_appear_start = Some(Box::new(|_| style("height", "0")));
        cfg.on_appear_active = Some(Box::new(|_| style("height", "100")));
        cfg
    }

    #[test]
    fn appear_walks_start_then_active_styles() {
        let mut host = TestHost::new();
        let mut cfg = appear_cfg();
        let mut machine = StatusMachine::default();

        let settled = machine.set_visible(&mut host, &mut cfg, Some(&5), true);
        assert_eq!(settled, None);
        assert_eq!(machine.status(), MotionStatus::Appear);
        // Prepare is skipped synchronously; the start style applies at once.
        assert_eq!(machine.step(), StepStatus::Start);
        assert_eq!(machine.style().unwrap().get("height"), Some("0"));

        assert_eq!(tick(&mut machine, &mut host, &mut cfg, Some(&5)), None);
        assert_eq!(machine.step(), StepStatus::Active);
        assert_eq!(machine.style().unwrap().get("height"), Some("100"));
        assert_eq!(host.attached, [5]);

        let settled = machine.on_motion_end(
            &mut host,
            &mut cfg,
            Some(&5),
            &MotionEndEvent::native(5),
        );
        assert_eq!(settled, Some(true));
        assert_eq!(machine.status(), MotionStatus::None);
        assert_eq!(machine.step(), StepStatus::None);
        assert!(machine.style().is_none());
    }

    #[test]
    fn enter_runs_only_after_mount() {
        let mut host = TestHost::new();
        let mut cfg = MotionConfig::new("m");
        let mut machine: StatusMachine<u32> = StatusMachine::default();

        machine.set_visible(&mut host, &mut cfg, None, false);
        assert_eq!(machine.status(), MotionStatus::None);

        machine.set_visible(&mut host, &mut cfg, Some(&1), true);
        assert_eq!(machine.status(), MotionStatus::Enter);
        assert_eq!(machine.target_visible(), Some(true));
    }

    #[test]
    fn leave_immediately_starts_leave_on_first_mount() {
        let mut host = TestHost::new();
        let mut cfg: MotionConfig<u32> = MotionConfig::new("m");
        cfg.leave_immediately = true;
        let mut machine = StatusMachine::default();

        machine.set_visible(&mut host, &mut cfg, None, false);
        assert_eq!(machine.status(), MotionStatus::Leave);
    }

    #[test]
    fn initial_invisible_mount_settles_silently() {
        let mut host = TestHost::new();
        let mut cfg: MotionConfig<u32> = MotionConfig::new("m");
        let mut machine = StatusMachine::default();

        assert_eq!(machine.set_visible(&mut host, &mut cfg, None, false), None);
        assert_eq!(machine.status(), MotionStatus::None);
        // Becoming visible later does settle (no motion configured for it).
        cfg.enter = false;
        assert_eq!(
            machine.set_visible(&mut host, &mut cfg, None, true),
            Some(true)
        );
    }

    #[test]
    fn without_motion_name_visibility_applies_immediately() {
        let mut host = TestHost::new();
        let mut cfg: MotionConfig<u32> = MotionConfig::default();
        let mut machine = StatusMachine::default();

        assert_eq!(
            machine.set_visible(&mut host, &mut cfg, None, true),
            Some(true)
        );
        assert_eq!(
            machine.set_visible(&mut host, &mut cfg, None, false),
            Some(false)
        );
        assert_eq!(machine.status(), MotionStatus::None);
    }

    #[test]
    fn repeated_visibility_is_evaluated_on_change_only() {
        let mut host = TestHost::new();
        let mut cfg: MotionConfig<u32> = MotionConfig::default();
        let mut machine = StatusMachine::default();

        assert_eq!(
            machine.set_visible(&mut host, &mut cfg, None, true),
            Some(true)
        );
        assert_eq!(machine.set_visible(&mut host, &mut cfg, None, true), None);
    }

    #[test]
    fn completion_from_descendant_is_ignored() {
        let mut host = TestHost::new();
        let mut cfg = appear_cfg();
        let mut machine = StatusMachine::default();
        machine.set_visible(&mut host, &mut cfg, Some(&5), true);
        tick(&mut machine, &mut host, &mut cfg, Some(&5));
        assert_eq!(machine.step(), StepStatus::Active);

        let settled = machine.on_motion_end(
            &mut host,
            &mut cfg,
            Some(&5),
            &MotionEndEvent::native(99),
        );
        assert_eq!(settled, None);
        assert_eq!(machine.status(), MotionStatus::Appear);
    }

    #[test]
    fn completion_before_the_active_step_is_ignored() {
        let mut host = TestHost::new();
        let mut cfg = appear_cfg();
        let mut machine = StatusMachine::default();
        machine.set_visible(&mut host, &mut cfg, Some(&5), true);
        assert_eq!(machine.step(), StepStatus::Start);

        let settled = machine.on_motion_end(
            &mut host,
            &mut cfg,
            Some(&5),
            &MotionEndEvent::native(5),
        );
        assert_eq!(settled, None);
        assert_eq!(machine.status(), MotionStatus::Appear);
    }

    #[test]
    fn duplicate_completion_settles_once() {
        let mut host = TestHost::new();
        let mut cfg = appear_cfg();
        let mut machine = StatusMachine::default();
        machine.set_visible(&mut host, &mut cfg, Some(&5), true);
        tick(&mut machine, &mut host, &mut cfg, Some(&5));

        let event = MotionEndEvent::native(5);
        assert_eq!(
            machine.on_motion_end(&mut host, &mut cfg, Some(&5), &event),
            Some(true)
        );
        assert_eq!(
            machine.on_motion_end(&mut host, &mut cfg, Some(&5), &event),
            None
        );
    }

    #[test]
    fn end_callback_can_veto_completion_once() {
        let mut host = TestHost::new();
        let mut cfg = MotionConfig::new("m");
        let calls = Rc::new(RefCell::new(0));
        let seen = calls.clone();
        cfg.on_enter_end = Some(Box::new(move |_, _| {
            *seen.borrow_mut() += 1;
            *seen.borrow() > 1
        }));
        let mut machine: StatusMachine<u32> = StatusMachine::default();
        machine.set_visible(&mut host, &mut cfg, Some(&5), false);
        machine.set_visible(&mut host, &mut cfg, Some(&5), true);
        tick(&mut machine, &mut host, &mut cfg, Some(&5));
        assert_eq!(machine.step(), StepStatus::Active);

        let event = MotionEndEvent::native(5);
        assert_eq!(
            machine.on_motion_end(&mut host, &mut cfg, Some(&5), &event),
            None
        );
        assert_eq!(machine.status(), MotionStatus::Enter);
        assert_eq!(
            machine.on_motion_end(&mut host, &mut cfg, Some(&5), &event),
            Some(true)
        );
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn deadline_force_completes_regardless_of_target() {
        let mut host = TestHost::new();
        let mut cfg = appear_cfg();
        cfg.deadline = Some(1000);
        let ended = Rc::new(RefCell::new(Vec::new()));
        let log = ended.clone();
        cfg.on_appear_end = Some(Box::new(move |_, event| {
            log.borrow_mut().push(event.deadline);
            true
        }));
        let mut machine = StatusMachine::default();
        machine.set_visible(&mut host, &mut cfg, Some(&5), true);
        tick(&mut machine, &mut host, &mut cfg, Some(&5));

        let token = host.live_timer().unwrap();
        assert_eq!(host.scheduled, [(token, 1000)]);

        // A stale token does nothing.
        let stale = TimerToken(token.0 + 17);
        assert_eq!(
            machine.on_timeout(&mut host, &mut cfg, Some(&5), stale),
            None
        );

        let settled = machine.on_timeout(&mut host, &mut cfg, Some(&5), token);
        assert_eq!(settled, Some(true));
        assert_eq!(*ended.borrow(), [true]);
        assert_eq!(machine.status(), MotionStatus::None);
    }

    #[test]
    fn deadline_is_cleared_when_the_phase_ends_normally() {
        let mut host = TestHost::new();
        let mut cfg = appear_cfg();
        cfg.deadline = Some(500);
        let mut machine = StatusMachine::default();
        machine.set_visible(&mut host, &mut cfg, Some(&5), true);
        tick(&mut machine, &mut host, &mut cfg, Some(&5));
        let token = host.live_timer().unwrap();

        machine.on_motion_end(&mut host, &mut cfg, Some(&5), &MotionEndEvent::native(5));
        assert!(host.canceled.contains(&token));
        // The fired-and-cleared token is then inert.
        assert_eq!(
            machine.on_timeout(&mut host, &mut cfg, Some(&5), token),
            None
        );
    }

    #[test]
    fn deadline_resolves_the_cached_element_when_the_node_is_gone() {
        let mut host = TestHost::new();
        let mut cfg = appear_cfg();
        cfg.deadline = Some(100);
        let element_seen = Rc::new(RefCell::new(None));
        let log = element_seen.clone();
        cfg.on_appear_end = Some(Box::new(move |element, _| {
            *log.borrow_mut() = element.copied();
            true
        }));
        let mut machine = StatusMachine::default();
        machine.set_visible(&mut host, &mut cfg, Some(&5), true);
        tick(&mut machine, &mut host, &mut cfg, Some(&5));
        let token = host.live_timer().unwrap();

        // Node dropped while the deadline was pending: the wired element is
        // still resolvable.
        let settled = machine.on_timeout(&mut host, &mut cfg, None, token);
        assert_eq!(settled, Some(true));
        assert_eq!(*element_seen.borrow(), Some(5));
    }

    #[test]
    fn native_event_without_a_resolvable_element_is_ignored() {
        let mut host = TestHost::new();
        let mut cfg = MotionConfig::new("m");
        let mut machine: StatusMachine<u32> = StatusMachine::default();
        machine.set_visible(&mut host, &mut cfg, None, false);
        machine.set_visible(&mut host, &mut cfg, None, true);
        tick(&mut machine, &mut host, &mut cfg, None);
        assert_eq!(machine.step(), StepStatus::Active);

        let settled =
            machine.on_motion_end(&mut host, &mut cfg, None, &MotionEndEvent::native(5));
        assert_eq!(settled, None);
        assert_eq!(machine.status(), MotionStatus::Enter);
    }

    #[test]
    fn rapid_toggle_ends_in_the_final_leave() {
        let mut host = TestHost::new();
        let mut cfg: MotionConfig<u32> = MotionConfig::new("m");
        cfg.appear = false;
        let mut machine = StatusMachine::default();

        assert_eq!(
            machine.set_visible(&mut host, &mut cfg, Some(&5), true),
            Some(true)
        );
        machine.set_visible(&mut host, &mut cfg, Some(&5), false);
        assert_eq!(machine.status(), MotionStatus::Leave);
        machine.set_visible(&mut host, &mut cfg, Some(&5), true);
        assert_eq!(machine.status(), MotionStatus::Enter);
        machine.set_visible(&mut host, &mut cfg, Some(&5), false);
        assert_eq!(machine.status(), MotionStatus::Leave);
        assert_eq!(machine.target_visible(), Some(false));

        tick(&mut machine, &mut host, &mut cfg, Some(&5));
        assert_eq!(machine.step(), StepStatus::Active);
        let settled = machine.on_motion_end(
            &mut host,
            &mut cfg,
            Some(&5),
            &MotionEndEvent::native(5),
        );
        assert_eq!(settled, Some(false));
    }

    #[test]
    fn toggling_the_phase_flag_cancels_mid_phase() {
        let mut host = TestHost::new();
        let mut cfg: MotionConfig<u32> = MotionConfig::new("m");
        cfg.appear = false;
        let mut machine = StatusMachine::default();
        machine.set_visible(&mut host, &mut cfg, Some(&5), true);
        machine.set_visible(&mut host, &mut cfg, Some(&5), false);
        assert_eq!(machine.status(), MotionStatus::Leave);

        cfg.leave = false;
        let settled = machine.update(&mut host, &mut cfg);
        assert_eq!(settled, Some(false));
        assert_eq!(machine.status(), MotionStatus::None);
        assert_eq!(machine.step(), StepStatus::None);
    }

    #[test]
    fn pending_prepare_gates_advancement() {
        let mut host = TestHost::new();
        let mut cfg: MotionConfig<u32> = MotionConfig::new("m");
        cfg.on_enter_prepare = Some(Box::new(|_| PrepareAction::Pending));
        cfg.on_enter_start = Some(Box::new(|_| style("width", "0")));
        let mut machine = StatusMachine::default();
        machine.set_visible(&mut host, &mut cfg, Some(&5), false);
        machine.set_visible(&mut host, &mut cfg, Some(&5), true);
        assert_eq!(machine.step(), StepStatus::Prepare);
        let token = machine.pending_prepare().unwrap();

        // Frames alone do not advance past a pending prepare.
        tick(&mut machine, &mut host, &mut cfg, Some(&5));
        assert_eq!(machine.step(), StepStatus::Prepare);

        machine.finish_prepare(&mut host, &mut cfg, Some(&5), token);
        assert_eq!(machine.step(), StepStatus::Start);
        assert_eq!(machine.style().unwrap().get("width"), Some("0"));
    }

    #[test]
    fn superseded_prepare_resolution_is_ignored() {
        let mut host = TestHost::new();
        let mut cfg: MotionConfig<u32> = MotionConfig::new("m");
        cfg.on_leave_prepare = Some(Box::new(|_| PrepareAction::Pending));
        let mut machine: StatusMachine<u32> = StatusMachine::default();
        machine.set_visible(&mut host, &mut cfg, Some(&5), true);
        machine.set_visible(&mut host, &mut cfg, Some(&5), false);
        assert_eq!(machine.status(), MotionStatus::Leave);
        let stale = machine.pending_prepare().unwrap();

        // The enter phase supersedes the pending leave prepare.
        machine.set_visible(&mut host, &mut cfg, Some(&5), true);
        assert_eq!(machine.status(), MotionStatus::Enter);
        tick(&mut machine, &mut host, &mut cfg, Some(&5));
        assert_eq!(machine.step(), StepStatus::Active);

        machine.finish_prepare(&mut host, &mut cfg, Some(&5), stale);
        assert_eq!(machine.step(), StepStatus::Active);
        assert_eq!(machine.status(), MotionStatus::Enter);
    }

    #[test]
    fn measurement_only_pass_without_transition_support() {
        let mut host = TestHost::without_transitions();
        let mut cfg: MotionConfig<u32> = MotionConfig::new("m");
        let ran = Rc::new(RefCell::new(0));
        let log = ran.clone();
        cfg.on_enter_prepare = Some(Box::new(move |_| {
            *log.borrow_mut() += 1;
            PrepareAction::Done
        }));
        cfg.on_enter_start = Some(Box::new(|_| style("width", "0")));
        let mut machine = StatusMachine::default();
        machine.set_visible(&mut host, &mut cfg, Some(&5), false);
        let settled = machine.set_visible(&mut host, &mut cfg, Some(&5), true);
        assert_eq!(settled, None);
        assert_eq!(machine.status(), MotionStatus::Enter);
        assert_eq!(machine.step(), StepStatus::Prepare);

        // Prepare → Prepared settles without styles or listeners.
        let settled = tick(&mut machine, &mut host, &mut cfg, Some(&5));
        assert_eq!(settled, Some(true));
        assert_eq!(machine.status(), MotionStatus::None);
        assert_eq!(*ran.borrow(), 1);
        assert!(machine.style().is_none());
        assert!(host.attached.is_empty());
    }

    #[test]
    fn unsupported_environment_without_prepare_skips_the_phase() {
        let mut host = TestHost::without_transitions();
        let mut cfg: MotionConfig<u32> = MotionConfig::new("m");
        let mut machine: StatusMachine<u32> = StatusMachine::default();
        assert_eq!(
            machine.set_visible(&mut host, &mut cfg, Some(&5), true),
            Some(true)
        );
        assert_eq!(machine.status(), MotionStatus::None);
    }

    #[test]
    fn style_resets_when_a_step_has_no_handler() {
        let mut host = TestHost::new();
        let mut cfg: MotionConfig<u32> = MotionConfig::new("m");
        cfg.on_enter_start = Some(Box::new(|_| style("width", "0")));
        let mut machine = StatusMachine::default();
        machine.set_visible(&mut host, &mut cfg, Some(&5), false);
        machine.set_visible(&mut host, &mut cfg, Some(&5), true);
        assert!(machine.style().is_some());

        tick(&mut machine, &mut host, &mut cfg, Some(&5));
        assert_eq!(machine.step(), StepStatus::Active);
        assert!(machine.style().is_none());
    }

    #[test]
    fn dispose_detaches_listeners_and_clears_timers() {
        let mut host = TestHost::new();
        let mut cfg = appear_cfg();
        cfg.deadline = Some(250);
        let mut machine = StatusMachine::default();
        machine.set_visible(&mut host, &mut cfg, Some(&5), true);
        tick(&mut machine, &mut host, &mut cfg, Some(&5));
        let token = host.live_timer().unwrap();

        machine.dispose(&mut host);
        assert!(host.canceled.contains(&token));
        assert_eq!(host.detached, [5]);
    }
}
