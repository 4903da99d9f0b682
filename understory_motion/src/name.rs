// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition class-name resolution.

use alloc::borrow::Cow;
use alloc::format;
use alloc::string::String;

use crate::types::{MotionStatus, StepStatus};

/// Transition name configuration.
///
/// Either one prefix from which every status and step class is derived
/// (`{prefix}-{status}`, `{prefix}-{status}-{step}`, plus the bare prefix
/// itself), or an explicit per-status map. The map form only names the base
/// and active cells; prepare/start step classes are simply absent for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MotionName {
    /// Derive all class names from one prefix.
    Prefix(Cow<'static, str>),
    /// Explicit names per status; unnamed cells produce no class.
    Statuses(StatusNames),
}

/// Explicit class names for the per-status form of [`MotionName`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusNames {
    /// Base class while the appear phase runs.
    pub appear: Option<Cow<'static, str>>,
    /// Base class while the enter phase runs.
    pub enter: Option<Cow<'static, str>>,
    /// Base class while the leave phase runs.
    pub leave: Option<Cow<'static, str>>,
    /// Class added once the appear phase reaches its active step.
    pub appear_active: Option<Cow<'static, str>>,
    /// Class added once the enter phase reaches its active step.
    pub enter_active: Option<Cow<'static, str>>,
    /// Class added once the leave phase reaches its active step.
    pub leave_active: Option<Cow<'static, str>>,
}

impl MotionName {
    /// Basic-form constructor.
    pub fn prefix(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Prefix(name.into())
    }

    /// The raw prefix when the basic form is used; emitted as its own class.
    pub fn as_prefix(&self) -> Option<&str> {
        match self {
            Self::Prefix(name) => Some(name.as_ref()),
            Self::Statuses(_) => None,
        }
    }

    /// Resolve the class for `status`, optionally suffixed by a step.
    ///
    /// Only `Prepare`, `Start`, and `Active` produce suffixes; `Activated`
    /// maps onto the active suffix. Returns `None` for the idle status, for
    /// steps without a suffix, and for unnamed cells of the map form.
    pub fn class_for(&self, status: MotionStatus, step: Option<StepStatus>) -> Option<String> {
        let status_str = status.as_str()?;
        let suffix = match step {
            None => None,
            Some(StepStatus::Prepare) => Some("prepare"),
            Some(StepStatus::Start) => Some("start"),
            Some(StepStatus::Active | StepStatus::Activated) => Some("active"),
            Some(StepStatus::None | StepStatus::Prepared) => return None,
        };
        match self {
            Self::Prefix(name) => Some(match suffix {
                Some(s) => format!("{name}-{status_str}-{s}"),
                None => format!("{name}-{status_str}"),
            }),
            Self::Statuses(names) => {
                let cell = match (status, suffix) {
                    (MotionStatus::Appear, None) => &names.appear,
                    (MotionStatus::Enter, None) => &names.enter,
                    (MotionStatus::Leave, None) => &names.leave,
                    (MotionStatus::Appear, Some("active")) => &names.appear_active,
                    (MotionStatus::Enter, Some("active")) => &names.enter_active,
                    (MotionStatus::Leave, Some("active")) => &names.leave_active,
                    _ => &None,
                };
                cell.as_ref().map(|c| String::from(c.as_ref()))
            }
        }
    }
}
