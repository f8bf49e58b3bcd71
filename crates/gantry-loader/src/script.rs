// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Synthesized `<script type="module">` elements

use crate::registry::{LoadId, REGISTRY_KEY};
use parking_lot::Mutex;
use serde_json::Value as JsonValue;
use std::fmt;
use url::Url;

/// Error event reported by the host's module pipeline for a failed script.
///
/// Carried through to the caller unmodified; the loader does not normalize
/// host failure reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEvent {
    /// URL of the script that failed
    pub url: String,
    /// Host-supplied failure message
    pub message: String,
}

impl ErrorEvent {
    /// Create a new error event
    pub fn new(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.url)
    }
}

type LoadHook = Box<dyn FnOnce() + Send>;
type ErrorHook = Box<dyn FnOnce(ErrorEvent) + Send>;

/// A module script element synthesized for one load.
///
/// [`ModuleScript::source`] is the body a literal browser host injects
/// verbatim; a native host instead delivers the namespace through the global
/// registry's `resolve` and then fires [`ModuleScript::notify_load`], or
/// fires [`ModuleScript::notify_error`] on failure. The two hooks are
/// mutually exclusive and fire at most once per element.
pub struct ModuleScript {
    id: LoadId,
    url: Url,
    on_load: Mutex<Option<LoadHook>>,
    on_error: Mutex<Option<ErrorHook>>,
}

impl ModuleScript {
    /// Create a script element for load `id` of the resolved `url`
    pub fn new(id: LoadId, url: Url) -> Self {
        Self {
            id,
            url,
            on_load: Mutex::new(None),
            on_error: Mutex::new(None),
        }
    }

    /// Id of the load this element belongs to
    pub fn id(&self) -> LoadId {
        self.id
    }

    /// The resolved URL this element imports
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The generated module body: imports the resolved module's namespace,
    /// looks the registry up under the well-known key, and resolves this
    /// load's entry with the namespace.
    pub fn source(&self) -> String {
        let url = JsonValue::String(self.url.as_str().to_string());
        let key = JsonValue::String(REGISTRY_KEY.to_string());
        format!(
            "import * as module from {url};\
             const registry = window[Symbol.for({key})];\
             registry.pending[{id}].resolve(module);",
            id = self.id,
        )
    }

    /// Install the on-load hook
    pub fn set_on_load(&self, hook: impl FnOnce() + Send + 'static) {
        *self.on_load.lock() = Some(Box::new(hook));
    }

    /// Install the on-error hook
    pub fn set_on_error(&self, hook: impl FnOnce(ErrorEvent) + Send + 'static) {
        *self.on_error.lock() = Some(Box::new(hook));
    }

    /// Fire the on-load hook; a no-op (with a warning) if either hook
    /// already fired.
    pub fn notify_load(&self) {
        let hook = self.on_load.lock().take();
        self.on_error.lock().take();
        match hook {
            Some(hook) => hook(),
            None => tracing::warn!(id = %self.id, "load notification for settled script element"),
        }
    }

    /// Fire the on-error hook with the host-reported event; a no-op (with a
    /// warning) if either hook already fired.
    pub fn notify_error(&self, event: ErrorEvent) {
        let hook = self.on_error.lock().take();
        self.on_load.lock().take();
        match hook {
            Some(hook) => hook(event),
            None => tracing::warn!(id = %self.id, "error notification for settled script element"),
        }
    }
}

impl fmt::Debug for ModuleScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleScript")
            .field("id", &self.id)
            .field("url", &self.url.as_str())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn script() -> ModuleScript {
        let url = Url::parse("https://example.com/app/util.js").unwrap();
        ModuleScript::new(LoadId(7), url)
    }

    #[test]
    fn test_source_text() {
        let source = script().source();
        assert_eq!(
            source,
            "import * as module from \"https://example.com/app/util.js\";\
             const registry = window[Symbol.for(\"@pegasusheavy/gantry/loading-modules\")];\
             registry.pending[7].resolve(module);"
        );
    }

    #[test]
    fn test_source_escapes_url() {
        let url = Url::parse("https://example.com/a\"b.js").unwrap();
        let source = ModuleScript::new(LoadId(0), url).source();
        // The URL standard percent-encodes the quote before it reaches the body
        assert!(source.contains("a%22b.js"));
        assert!(!source.contains("a\"b.js"));
    }

    #[test]
    fn test_hooks_fire_at_most_once() {
        let script = script();
        let fired = Arc::new(AtomicU32::new(0));

        let counter = Arc::clone(&fired);
        script.set_on_load(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        script.set_on_error(|_| panic!("error hook must not fire after load"));

        script.notify_load();
        script.notify_load();
        script.notify_error(ErrorEvent::new("u", "m"));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_error_hook_receives_event() {
        let script = script();
        let fired = Arc::new(AtomicU32::new(0));

        script.set_on_load(|| panic!("load hook must not fire after error"));
        let counter = Arc::clone(&fired);
        script.set_on_error(move |event| {
            assert_eq!(event.message, "fetch failed");
            counter.fetch_add(1, Ordering::SeqCst);
        });

        script.notify_error(ErrorEvent::new("https://example.com/x.js", "fetch failed"));
        script.notify_load();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
