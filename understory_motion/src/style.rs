// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inline style fragments resolved from step callbacks.

use alloc::borrow::Cow;

use smallvec::SmallVec;

/// A small ordered list of inline style properties.
///
/// Last write wins per property name; iteration preserves insertion order so
/// hosts can serialize the list directly into whatever style representation
/// they use. Step callbacks return one of these, and the controller exposes
/// the resolved value on [`MotionProps`](crate::MotionProps).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleProps {
    props: SmallVec<[(Cow<'static, str>, Cow<'static, str>); 4]>,
}

impl StyleProps {
    /// An empty style list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The `display: none` style used to keep hidden content mounted.
    pub fn display_none() -> Self {
        Self::new().with("display", "none")
    }

    /// Set `name` to `value`, replacing any existing entry in place.
    pub fn set(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) {
        let name = name.into();
        let value = value.into();
        match self.props.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.props.push((name, value)),
        }
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.set(name, value);
        self
    }

    /// Look up a property by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.props
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_ref())
    }

    /// Iterate properties in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.props.iter().map(|(n, v)| (n.as_ref(), v.as_ref()))
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.props.len()
    }

    /// Returns `true` when no properties are set.
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Prefix the list with `transition: none` unless a transition was set
    /// explicitly. Applied on the start step of phases with a prepare
    /// callback so the snap to the initial state is not animated.
    #[must_use]
    pub(crate) fn prefixed_transition_none(mut self) -> Self {
        if self.get("transition").is_none() {
            self.props.insert(0, (Cow::Borrowed("transition"), Cow::Borrowed("none")));
        }
        self
    }
}
