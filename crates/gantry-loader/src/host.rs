// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Host seam for the document and its module pipeline

use crate::namespace::ModuleNamespace;
use crate::registry::{LoadId, LoaderRegistry};
use crate::script::{ErrorEvent, ModuleScript};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;

/// The document a loader injects script elements into, together with the
/// module pipeline that fetches and evaluates them.
///
/// Host obligations: after successfully evaluating an appended element's
/// module body, deliver the namespace through
/// [`LoaderRegistry::global`]`().resolve(id, namespace)` — exactly what the
/// generated body in [`ModuleScript::source`] does in a literal browser
/// host — and then fire the element's [`ModuleScript::notify_load`]. On
/// fetch, parse, or evaluation failure, fire
/// [`ModuleScript::notify_error`] with the error event instead. Completion
/// must happen on a later event-loop turn, never re-entrantly inside
/// [`ScriptHost::append_script`].
pub trait ScriptHost: Send + Sync {
    /// Construct a fresh error in the currently executing module's context
    /// and return its textual stack trace.
    fn capture_stack(&self) -> String;

    /// Append a synthesized script element to the document body, starting
    /// the host's fetch/evaluate pipeline for it.
    fn append_script(&self, script: Arc<ModuleScript>);

    /// Detach a previously appended script element.
    fn remove_script(&self, id: LoadId);
}

/// Reference host backed by a static URL table.
///
/// Serves registered namespaces on a spawned task, after an optional per-URL
/// delay so tests can drive completion out of call order, and reports
/// unregistered URLs through the error path. Stack captures answer with a
/// header-plus-frame-list trace naming the configured own URL. Requires a
/// running tokio runtime.
pub struct StaticHost {
    own_url: String,
    modules: DashMap<String, ModuleNamespace>,
    delays: DashMap<String, Duration>,
    attached: DashMap<LoadId, Arc<ModuleScript>>,
}

impl StaticHost {
    /// Create a host whose own module lives at `own_url`
    pub fn new(own_url: impl Into<String>) -> Self {
        Self {
            own_url: own_url.into(),
            modules: DashMap::new(),
            delays: DashMap::new(),
            attached: DashMap::new(),
        }
    }

    /// Serve `namespace` for loads of `url`
    pub fn register(&self, url: impl Into<String>, namespace: ModuleNamespace) {
        self.modules.insert(url.into(), namespace);
    }

    /// Delay completion of loads for `url`
    pub fn set_delay(&self, url: impl Into<String>, delay: Duration) {
        self.delays.insert(url.into(), delay);
    }

    /// Number of script elements currently attached to the document
    pub fn attached_count(&self) -> usize {
        self.attached.len()
    }

    /// Check whether the element for `id` is still attached
    pub fn is_attached(&self, id: LoadId) -> bool {
        self.attached.contains_key(&id)
    }
}

impl ScriptHost for StaticHost {
    fn capture_stack(&self) -> String {
        format!("Error\n    at {}:1:1", self.own_url)
    }

    fn append_script(&self, script: Arc<ModuleScript>) {
        self.attached.insert(script.id(), Arc::clone(&script));

        let url = script.url().as_str().to_string();
        let namespace = self.modules.get(&url).map(|entry| entry.clone());
        let delay = self.delays.get(&url).map(|entry| *entry);

        tokio::spawn(async move {
            match delay {
                Some(delay) => tokio::time::sleep(delay).await,
                // Completion must not land on the appending turn
                None => tokio::task::yield_now().await,
            }
            match namespace {
                Some(namespace) => {
                    LoaderRegistry::global().resolve(script.id(), Arc::new(namespace));
                    script.notify_load();
                }
                None => script.notify_error(ErrorEvent::new(
                    url,
                    "Failed to fetch dynamically imported module",
                )),
            }
        });
    }

    fn remove_script(&self, id: LoadId) {
        self.attached.remove(&id);
    }
}
