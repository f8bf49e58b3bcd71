// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # gantry-loader
//!
//! Dynamic module loading by `<script type="module">` injection.
//!
//! [`ScriptLoader`] resolves a module specifier against its base URL,
//! registers a pending load in the process-wide [`LoaderRegistry`], and hands
//! the host a synthesized [`ModuleScript`] whose body re-exports the target
//! module's namespace back into the registry. The caller gets a [`LoadHandle`]
//! that settles exactly once, on a later event-loop turn, when the host's
//! module pipeline reports success or failure.
//!
//! The registry is keyed by the well-known name [`REGISTRY_KEY`] because the
//! injected script body and the injecting code run as separately scoped
//! program units that can only meet through a shared namespace. Loads are
//! never deduplicated: two calls for the same URL are two fresh loads with
//! distinct ids.
//!
//! The document and its module pipeline sit behind the [`ScriptHost`] trait;
//! [`StaticHost`] is a reference host for tests and embedders.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod handle;
pub mod host;
pub mod loader;
pub mod namespace;
pub mod registry;
pub mod script;

// Re-exports
pub use error::{LoaderError, Result};
pub use handle::{Deferred, LoadHandle};
pub use host::{ScriptHost, StaticHost};
pub use loader::{ImportMeta, ScriptLoader};
pub use namespace::{ExportValue, ModuleNamespace};
pub use registry::{LoadId, LoaderRegistry, PendingLoad, REGISTRY_KEY};
pub use script::{ErrorEvent, ModuleScript};
