// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed list reconciler.
//!
//! [`MotionList`] owns one [`Motion`] controller per key and drives each
//! controller's visibility from the reconciliation status of its entity:
//! `Add`/`Keep` render visible, `Remove` drives the leave phase, and a leave
//! that settles marks the entity `Removed` until the next pass prunes it.
//! Removal completion is allowed out of order — any entity may finish its
//! leave first.

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use understory_motion::{
    Motion, MotionConfig, MotionEndEvent, MotionHost, MotionProps, PrepareToken, TimerToken,
};

use crate::diff::{KeyEntity, KeyRecord, KeyStatus, diff_keys};

/// Notification produced by a driving call on [`MotionList`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListEvent<K> {
    /// One entity's visibility settled. Fires for both directions, even when
    /// no motion is configured.
    VisibleChanged {
        /// The entity's key.
        key: K,
        /// The settled visibility.
        visible: bool,
    },
    /// The last surviving entity finished its leave motion. Fires exactly
    /// once per drained list.
    AllRemoved,
}

/// One resolved entry from [`MotionList::render`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedEntry<K, P = ()> {
    /// The entity's key.
    pub key: K,
    /// Payload from the most recent record for this key.
    pub payload: P,
    /// Render props, or `None` when the entry renders nothing.
    pub props: Option<MotionProps>,
}

struct Entry<H: MotionHost, K, P> {
    entity: KeyEntity<K, P>,
    motion: Motion<H>,
}

/// Keyed collection of motion controllers.
///
/// The same `MotionConfig` drives every entry, like shared render props. All
/// driving calls return the [`ListEvent`]s they caused, in order.
pub struct MotionList<H: MotionHost, K, P = ()> {
    entries: Vec<Entry<H, K, P>>,
}

impl<H: MotionHost, K, P> fmt::Debug for MotionList<H, K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotionList")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<H: MotionHost, K, P> Default for MotionList<H, K, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: MotionHost, K, P> MotionList<H, K, P> {
    /// An empty list.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of live entities, including ones still leaving.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no entities remain.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the reconciled entities in render order.
    pub fn entities(&self) -> impl Iterator<Item = &KeyEntity<K, P>> {
        self.entries.iter().map(|entry| &entry.entity)
    }
}

impl<H, K, P> MotionList<H, K, P>
where
    H: MotionHost,
    K: Eq + Hash + Clone,
    P: Clone,
{
    /// Reconcile against the latest ordered key list and drive every entry's
    /// visibility accordingly.
    pub fn set_keys(
        &mut self,
        host: &mut H,
        cfg: &mut MotionConfig<H::Element>,
        keys: &[KeyRecord<K, P>],
    ) -> Vec<ListEvent<K>> {
        let prev: Vec<KeyEntity<K, P>> = self
            .entries
            .iter()
            .map(|entry| entry.entity.clone())
            .collect();
        let mut mixed = diff_keys(&prev, keys);

        // Entities whose leave already settled drop out when they diff as
        // removed again; a re-added key keeps its fresh entity instead.
        let prev_status: HashMap<&K, KeyStatus> = prev
            .iter()
            .map(|entity| (&entity.key, entity.status))
            .collect();
        mixed.retain(|entity| {
            !(entity.status == KeyStatus::Remove
                && prev_status.get(&entity.key) == Some(&KeyStatus::Removed))
        });

        let mut old: HashMap<K, Entry<H, K, P>> = self
            .entries
            .drain(..)
            .map(|entry| (entry.entity.key.clone(), entry))
            .collect();
        self.entries = mixed
            .into_iter()
            .map(|entity| match old.remove(&entity.key) {
                Some(mut entry) => {
                    entry.entity = entity;
                    entry
                }
                None => Entry {
                    entity,
                    motion: Motion::new(),
                },
            })
            .collect();
        // Pruned entries are torn down so no listener or timer leaks.
        for (_, mut entry) in old {
            entry.motion.dispose(host);
        }

        let mut events = Vec::new();
        for index in 0..self.entries.len() {
            let visible = matches!(
                self.entries[index].entity.status,
                KeyStatus::Add | KeyStatus::Keep
            );
            if let Some(settled) = self.entries[index].motion.set_visible(host, cfg, visible) {
                self.settle(index, settled, &mut events);
            }
        }
        events
    }

    /// Re-check configuration flags on every entry.
    pub fn update(&mut self, host: &mut H, cfg: &mut MotionConfig<H::Element>) -> Vec<ListEvent<K>> {
        self.drive(|entry| entry.motion.update(host, cfg))
    }

    /// Deliver one animation-frame tick to every entry.
    pub fn on_frame(
        &mut self,
        host: &mut H,
        cfg: &mut MotionConfig<H::Element>,
    ) -> Vec<ListEvent<K>> {
        self.drive(|entry| entry.motion.on_frame(host, cfg))
    }

    /// Deliver a motion completion signal. The target-identity check routes
    /// it to the matching entry; everyone else ignores it.
    pub fn on_motion_end(
        &mut self,
        host: &mut H,
        cfg: &mut MotionConfig<H::Element>,
        event: &MotionEndEvent<H::Element>,
    ) -> Vec<ListEvent<K>> {
        self.drive(|entry| entry.motion.on_motion_end(host, cfg, event))
    }

    /// Deliver a timer expiry; only the entry that armed `token` reacts.
    pub fn on_timeout(
        &mut self,
        host: &mut H,
        cfg: &mut MotionConfig<H::Element>,
        token: TimerToken,
    ) -> Vec<ListEvent<K>> {
        self.drive(|entry| entry.motion.on_timeout(host, cfg, token))
    }

    /// Resolve an asynchronous prepare gate for `key`.
    pub fn finish_prepare(
        &mut self,
        host: &mut H,
        cfg: &mut MotionConfig<H::Element>,
        key: &K,
        token: PrepareToken,
    ) -> Vec<ListEvent<K>> {
        let mut events = Vec::new();
        if let Some(index) = self.index_of(key) {
            if let Some(settled) = self.entries[index].motion.finish_prepare(host, cfg, token) {
                self.settle(index, settled, &mut events);
            }
        }
        events
    }

    /// Outstanding asynchronous prepare gates, per key.
    pub fn pending_prepares(&self) -> Vec<(K, PrepareToken)> {
        self.entries
            .iter()
            .filter_map(|entry| {
                entry
                    .motion
                    .pending_prepare()
                    .map(|token| (entry.entity.key.clone(), token))
            })
            .collect()
    }

    /// Resolve render props for every entity, in order.
    pub fn render(
        &mut self,
        host: &H,
        cfg: &MotionConfig<H::Element>,
    ) -> Vec<RenderedEntry<K, P>> {
        self.entries
            .iter_mut()
            .map(|entry| RenderedEntry {
                key: entry.entity.key.clone(),
                payload: entry.entity.payload.clone(),
                props: entry.motion.render(host, cfg),
            })
            .collect()
    }

    /// Bind the realized element for `key`.
    pub fn set_node(&mut self, key: &K, node: Option<H::Element>) {
        if let Some(index) = self.index_of(key) {
            self.entries[index].motion.set_node(node);
        }
    }

    /// The controller driving `key`, for imperative inspection.
    pub fn motion(&self, key: &K) -> Option<&Motion<H>> {
        self.index_of(key).map(|index| &self.entries[index].motion)
    }

    /// Tear down every entry.
    pub fn dispose(&mut self, host: &mut H) {
        for entry in &mut self.entries {
            entry.motion.dispose(host);
        }
        self.entries.clear();
    }

    fn index_of(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|entry| entry.entity.key == *key)
    }

    fn drive(
        &mut self,
        mut f: impl FnMut(&mut Entry<H, K, P>) -> Option<bool>,
    ) -> Vec<ListEvent<K>> {
        let mut events = Vec::new();
        for index in 0..self.entries.len() {
            if let Some(settled) = f(&mut self.entries[index]) {
                self.settle(index, settled, &mut events);
            }
        }
        events
    }

    fn settle(&mut self, index: usize, visible: bool, events: &mut Vec<ListEvent<K>>) {
        let key = self.entries[index].entity.key.clone();
        events.push(ListEvent::VisibleChanged { key, visible });
        if !visible {
            self.entries[index].entity.status = KeyStatus::Removed;
            if self
                .entries
                .iter()
                .all(|entry| entry.entity.status == KeyStatus::Removed)
            {
                events.push(ListEvent::AllRemoved);
            }
        }
    }
}
