// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed diffing.
//!
//! [`diff_keys`] classifies every key as added, kept, or removed across two
//! ordered key lists, preserving the new list's relative order while leaving
//! previous-only keys at their original relative position — so still-leaving
//! items keep rendering in a stable place instead of jumping to the end.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

/// Reconciliation status of one keyed entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyStatus {
    /// Key is new in the latest list.
    Add,
    /// Key is present in both lists.
    Keep,
    /// Key was dropped from the latest list but its leave motion has not
    /// finished; still rendered (invisible) meanwhile.
    Remove,
    /// Leave motion finished; pruned on the next reconciliation pass.
    Removed,
}

/// One input item for the reconciler: a key plus an arbitrary payload handed
/// back with every rendered entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyRecord<K, P = ()> {
    /// Identity of the item.
    pub key: K,
    /// Caller data carried alongside the key.
    pub payload: P,
}

impl<K> KeyRecord<K, ()> {
    /// A record with no payload.
    pub fn bare(key: K) -> Self {
        Self { key, payload: () }
    }
}

impl<K, P> KeyRecord<K, P> {
    /// A record carrying `payload`.
    pub fn new(key: K, payload: P) -> Self {
        Self { key, payload }
    }
}

/// One reconciled entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEntity<K, P = ()> {
    /// Identity of the item.
    pub key: K,
    /// Reconciliation status.
    pub status: KeyStatus,
    /// Caller data from the most recent record for this key.
    pub payload: P,
}

/// Normalize records into entities tagged [`KeyStatus::Add`].
pub fn parse_keys<K: Clone, P: Clone>(records: &[KeyRecord<K, P>]) -> Vec<KeyEntity<K, P>> {
    records
        .iter()
        .map(|record| KeyEntity {
            key: record.key.clone(),
            status: KeyStatus::Add,
            payload: record.payload.clone(),
        })
        .collect()
}

/// Diff the previous entities against the latest key list.
///
/// Entities present in both lists are tagged `Keep` (with the new payload);
/// previous-only entities become `Remove` (keeping their old payload); new
/// keys become `Add`. A key that is both leaving and re-added is merged down
/// to a single entity preferring the newer intent, with `Add` upgraded to
/// `Keep` so the entity is not treated as a fresh mount.
pub fn diff_keys<K, P>(prev: &[KeyEntity<K, P>], next: &[KeyRecord<K, P>]) -> Vec<KeyEntity<K, P>>
where
    K: Eq + Hash + Clone,
    P: Clone,
{
    let mut list: Vec<KeyEntity<K, P>> = Vec::with_capacity(prev.len() + next.len());
    let mut current_index = 0;

    for prev_entity in prev {
        let mut hit = false;
        for index in current_index..next.len() {
            if next[index].key == prev_entity.key {
                // Keys added before the match land first, in the new order.
                for record in &next[current_index..index] {
                    list.push(KeyEntity {
                        key: record.key.clone(),
                        status: KeyStatus::Add,
                        payload: record.payload.clone(),
                    });
                }
                list.push(KeyEntity {
                    key: next[index].key.clone(),
                    status: KeyStatus::Keep,
                    payload: next[index].payload.clone(),
                });
                current_index = index + 1;
                hit = true;
                break;
            }
        }
        if !hit {
            list.push(KeyEntity {
                key: prev_entity.key.clone(),
                status: KeyStatus::Remove,
                payload: prev_entity.payload.clone(),
            });
        }
    }

    for record in &next[current_index..] {
        list.push(KeyEntity {
            key: record.key.clone(),
            status: KeyStatus::Add,
            payload: record.payload.clone(),
        });
    }

    // Merge keys that are removed and re-added in the same pass:
    //   [a - add, b - keep, a - remove] -> [a - keep, b - keep]
    let mut counts: HashMap<K, usize> = HashMap::new();
    for entity in &list {
        *counts.entry(entity.key.clone()).or_insert(0) += 1;
    }
    if counts.values().any(|count| *count > 1) {
        list.retain(|entity| counts[&entity.key] == 1 || entity.status != KeyStatus::Remove);
        for entity in &mut list {
            if counts[&entity.key] > 1 && entity.status == KeyStatus::Add {
                entity.status = KeyStatus::Keep;
            }
        }
    }
    list
}
