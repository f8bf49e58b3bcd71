// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Dynamic module loading via script-tag injection

use crate::error::Result;
use crate::handle::LoadHandle;
use crate::host::ScriptHost;
use crate::registry::LoaderRegistry;
use crate::script::ModuleScript;
use std::sync::Arc;
use url::Url;

/// The compiled `import.meta` object for the loader's own module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportMeta {
    /// The current module's resolved URL
    pub url: String,
}

/// Loads modules by synthesizing module script elements and handing them to
/// the host's own fetch/evaluate pipeline.
///
/// A compiled dynamic-import call site invokes [`ScriptLoader::load`]; a
/// compiled `import.meta` reference reads [`ScriptLoader::import_meta`]. The
/// base URL is resolved once, at construction time.
pub struct ScriptLoader {
    host: Arc<dyn ScriptHost>,
    base_url: Url,
}

impl ScriptLoader {
    /// Create a loader whose base URL is the injecting module's own URL,
    /// recovered from a stack trace captured by the host.
    pub fn new(host: Arc<dyn ScriptHost>) -> Result<Self> {
        let trace = host.capture_stack();
        let own_url = gantry_trace::resolve_url(&trace)?;
        let base_url = Url::parse(&own_url)?;
        Ok(Self { host, base_url })
    }

    /// Create a loader with an explicit base URL
    pub fn with_base_url(host: Arc<dyn ScriptHost>, base_url: Url) -> Self {
        Self { host, base_url }
    }

    /// The base URL specifiers are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The `import.meta` object for the loader's own module
    pub fn import_meta(&self) -> ImportMeta {
        ImportMeta {
            url: self.base_url.to_string(),
        }
    }

    /// Resolve a specifier against the base URL, with the same semantics as
    /// resolving an href against a base.
    pub fn resolve_specifier(&self, specifier: &str) -> Result<Url> {
        Ok(self.base_url.join(specifier)?)
    }

    /// Start a load for `specifier` and return its completion handle.
    ///
    /// Fails synchronously only if the specifier does not resolve to a URL.
    /// The handle settles on a later event-loop turn, when the host's
    /// pipeline either delivers the namespace or reports a failure. Each
    /// call is a fresh load: concurrent calls for the same URL get distinct
    /// ids and independent script elements, with no deduplication.
    pub fn load(&self, specifier: &str) -> Result<LoadHandle> {
        let resolved = self.resolve_specifier(specifier)?;
        let (id, handle) = LoaderRegistry::global().begin();

        let script = Arc::new(ModuleScript::new(id, resolved.clone()));

        let host = Arc::clone(&self.host);
        script.set_on_load(move || {
            LoaderRegistry::global().complete(id);
            host.remove_script(id);
        });

        let host = Arc::clone(&self.host);
        script.set_on_error(move |event| {
            LoaderRegistry::global().reject(id, event);
            host.remove_script(id);
        });

        tracing::debug!(%id, url = %resolved, "starting module load");
        self.host.append_script(script);
        Ok(handle)
    }
}
