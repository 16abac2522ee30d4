// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared storage behind every registration category.
//!
//! A [`Registry`] is an insertion-ordered ID namespace guarded by the
//! duplicate-ID policy. [`Slot`] holds a single value under the same policy,
//! and [`AppendList`] is an unordered-by-ID list that accepts anything.
//!
//! All three are cheap handles over shared storage: the copy captured by an
//! SDK hook sees every later registration. Entries are stored behind `Arc`
//! so hooks can clone one out and release the lock before running user code.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use datokit_core::{DuplicateIdHandling, KitError};

use crate::validation::{check_reconfigure, check_unique};

/// An ordered ID namespace for one registration category.
pub struct Registry<T> {
    entity: &'static str,
    mode: DuplicateIdHandling,
    entries: Arc<RwLock<IndexMap<String, Arc<T>>>>,
}

impl<T> Clone for Registry<T> {
    fn clone(&self) -> Self {
        Self {
            entity: self.entity,
            mode: self.mode,
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T> std::fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("entity", &self.entity)
            .field("mode", &self.mode)
            .field("ids", &self.ids())
            .finish()
    }
}

impl<T> Registry<T> {
    /// Create an empty registry. `entity` names entries in errors and logs.
    pub fn new(entity: &'static str, mode: DuplicateIdHandling) -> Self {
        Self {
            entity,
            mode,
            entries: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    /// Store `entry` under `id`, applying the duplicate policy first.
    ///
    /// A replaced entry keeps its original position.
    pub fn insert(&self, id: impl Into<String>, entry: T) -> Result<(), KitError> {
        let id = id.into();
        let mut entries = self.write();
        check_unique(&id, entries.keys(), self.entity, self.mode)?;
        entries.insert(id, Arc::new(entry));
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Arc<T>> {
        self.read().get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().contains_key(id)
    }

    /// Entries in registration order.
    pub fn values(&self) -> Vec<Arc<T>> {
        self.read().values().cloned().collect()
    }

    pub fn ids(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexMap<String, Arc<T>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<String, Arc<T>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A single value that may be configured once, then replaced per policy.
pub struct Slot<T> {
    what: &'static str,
    mode: DuplicateIdHandling,
    value: Arc<RwLock<Option<Arc<T>>>>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            what: self.what,
            mode: self.mode,
            value: Arc::clone(&self.value),
        }
    }
}

impl<T> Slot<T> {
    pub fn new(what: &'static str, mode: DuplicateIdHandling) -> Self {
        Self {
            what,
            mode,
            value: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the value, applying the policy if one is already present.
    pub fn set(&self, value: T) -> Result<(), KitError> {
        let mut slot = self.value.write().unwrap_or_else(PoisonError::into_inner);
        check_reconfigure(slot.is_some(), self.what, self.mode)?;
        *slot = Some(Arc::new(value));
        Ok(())
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_set(&self) -> bool {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// An append-only list without an ID namespace.
pub struct AppendList<T> {
    items: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for AppendList<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for AppendList<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<T: Clone> AppendList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, item: T) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(item);
    }

    /// Copy of the current items, in push order.
    pub fn snapshot(&self) -> Vec<T> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.items.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
