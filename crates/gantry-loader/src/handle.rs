// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! One-shot completion handles for in-flight loads

use crate::error::{LoaderError, Result};
use crate::namespace::ModuleNamespace;
use crate::registry::LoadId;
use parking_lot::Mutex;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

/// The value a settled load delivers to its handle
pub type Settlement = Result<Arc<ModuleNamespace>>;

/// External resolve/reject control for one pending load.
///
/// Settles the paired [`LoadHandle`] at most once; once either side has
/// fired, later calls are no-ops that report `false`.
pub struct Deferred {
    tx: Mutex<Option<oneshot::Sender<Settlement>>>,
}

impl Deferred {
    /// Create a deferred together with the receiver its handle is built on
    pub(crate) fn new() -> (Self, oneshot::Receiver<Settlement>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                tx: Mutex::new(Some(tx)),
            },
            rx,
        )
    }

    /// Settle the handle with a loaded namespace.
    ///
    /// Returns false if the load already settled or its handle was dropped.
    pub fn resolve(&self, namespace: Arc<ModuleNamespace>) -> bool {
        self.settle(Ok(namespace))
    }

    /// Settle the handle with a failure.
    ///
    /// Returns false if the load already settled or its handle was dropped.
    pub fn reject(&self, error: LoaderError) -> bool {
        self.settle(Err(error))
    }

    /// Check whether this load has already settled
    pub fn is_settled(&self) -> bool {
        self.tx.lock().is_none()
    }

    fn settle(&self, settlement: Settlement) -> bool {
        match self.tx.lock().take() {
            Some(tx) => tx.send(settlement).is_ok(),
            None => false,
        }
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// Awaitable completion handle returned by a `load` call.
///
/// Yields the loaded namespace, or the rejection error, on a later
/// event-loop turn. There is no cancellation: dropping the handle does not
/// abort the underlying load.
#[derive(Debug)]
pub struct LoadHandle {
    id: LoadId,
    rx: oneshot::Receiver<Settlement>,
}

impl LoadHandle {
    pub(crate) fn new(id: LoadId, rx: oneshot::Receiver<Settlement>) -> Self {
        Self { id, rx }
    }

    /// Id of the registry entry this handle is bound to
    pub fn id(&self) -> LoadId {
        self.id
    }
}

impl Future for LoadHandle {
    type Output = Settlement;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|received| match received {
            Ok(settlement) => settlement,
            Err(_) => Err(LoaderError::Abandoned),
        })
    }
}
