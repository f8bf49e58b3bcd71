// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Process-wide registry of in-flight loads

use crate::error::LoaderError;
use crate::handle::{Deferred, LoadHandle};
use crate::namespace::ModuleNamespace;
use crate::script::ErrorEvent;
use dashmap::DashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

/// Well-known key under which the registry must be reachable from injected
/// module code.
///
/// An injected script body and the code that injected it run as separately
/// scoped program units; this key is their only meeting point. In a literal
/// browser host the registry lives at `window[Symbol.for(REGISTRY_KEY)]`.
pub const REGISTRY_KEY: &str = "@pegasusheavy/gantry/loading-modules";

/// Unique identifier for one in-flight load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadId(pub u64);

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One in-flight module fetch
#[derive(Debug)]
pub struct PendingLoad {
    deferred: Deferred,
}

impl PendingLoad {
    fn new(deferred: Deferred) -> Self {
        Self { deferred }
    }

    /// Check whether this load has already settled
    pub fn is_settled(&self) -> bool {
        self.deferred.is_settled()
    }
}

/// Registry of pending loads, shared between loaders and the script bodies
/// they inject.
///
/// Ids are allocated by a monotonic counter and never reused. An entry is
/// removed exactly once, on either the on-load or the on-error path of its
/// script element.
pub struct LoaderRegistry {
    /// Counter for generating unique load ids
    next_id: AtomicU64,
    /// Pending loads keyed by id
    pending: DashMap<LoadId, PendingLoad>,
}

static GLOBAL: OnceLock<LoaderRegistry> = OnceLock::new();

impl LoaderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            pending: DashMap::new(),
        }
    }

    /// The page-lifetime registry, lazily created on first use.
    ///
    /// This is the registry reachable under [`REGISTRY_KEY`]; it lives until
    /// the process (page) goes away.
    pub fn global() -> &'static LoaderRegistry {
        GLOBAL.get_or_init(LoaderRegistry::new)
    }

    /// Allocate the next id, register a pending load under it, and return
    /// the handle that load will settle.
    pub fn begin(&self) -> (LoadId, LoadHandle) {
        let id = LoadId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (deferred, rx) = Deferred::new();
        self.pending.insert(id, PendingLoad::new(deferred));
        (id, LoadHandle::new(id, rx))
    }

    /// Settle the pending load `id` with a loaded namespace.
    ///
    /// This is the call an injected script body makes after its import
    /// evaluates. The entry stays registered until the element's on-load
    /// hook runs [`LoaderRegistry::complete`].
    pub fn resolve(&self, id: LoadId, namespace: Arc<ModuleNamespace>) -> bool {
        match self.pending.get(&id) {
            Some(entry) => {
                let settled = entry.deferred.resolve(namespace);
                if settled {
                    tracing::debug!(%id, "load resolved");
                } else {
                    tracing::warn!(%id, "resolve after load already settled");
                }
                settled
            }
            None => {
                tracing::warn!(%id, "resolve for unknown load id");
                false
            }
        }
    }

    /// Settle the pending load `id` with the host-reported error and remove
    /// its entry (the on-error path).
    pub fn reject(&self, id: LoadId, event: ErrorEvent) -> bool {
        match self.pending.remove(&id) {
            Some((_, entry)) => {
                let settled = entry.deferred.reject(LoaderError::Load(event));
                if settled {
                    tracing::debug!(%id, "load rejected");
                } else {
                    tracing::warn!(%id, "reject after load already settled");
                }
                settled
            }
            None => {
                tracing::warn!(%id, "reject for unknown load id");
                false
            }
        }
    }

    /// Remove the entry for a load whose script element finished (the
    /// on-load path; the entry was already consumed by `resolve`).
    pub fn complete(&self, id: LoadId) -> bool {
        self.pending.remove(&id).is_some()
    }

    /// Check whether a load is still registered
    pub fn contains(&self, id: LoadId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Number of loads currently registered
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
