// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ambient motion override.
//!
//! A scope can disable motion for everything below it without threading a
//! flag through every call site. Hosts hold one [`MotionContext`] per scope,
//! combine nested scopes with [`MotionContext::merge`], and place the result
//! on [`MotionConfig::context`](crate::MotionConfig::context).
//!
//! Precedence: an explicit `false` always disables; an explicit `true` still
//! requires local capability (a motion name plus host transition support); an
//! unset value inherits from the enclosing scope.

/// Scoped "motion enabled" override inherited down a UI tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionContext {
    /// Explicit override, or `None` to inherit local capability.
    pub motion: Option<bool>,
}

impl MotionContext {
    /// Scope value with no opinion; local capability decides.
    pub const INHERIT: Self = Self { motion: None };

    /// Scope value that force-disables motion for everything below it.
    pub const fn disabled() -> Self {
        Self {
            motion: Some(false),
        }
    }

    /// Scope value that explicitly allows motion (local capability still
    /// applies).
    pub const fn enabled() -> Self {
        Self { motion: Some(true) }
    }

    /// Nearest-wins combination of this scope with a nested `child` scope.
    #[must_use]
    pub fn merge(self, child: Self) -> Self {
        Self {
            motion: child.motion.or(self.motion),
        }
    }

    /// Returns `false` only for an explicit disable.
    pub fn permits(self) -> bool {
        self.motion != Some(false)
    }
}
