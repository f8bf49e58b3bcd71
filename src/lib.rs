// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # gantry
//!
//! Runtime shim for dynamic `import()` and `import.meta` in environments
//! without native support. A compiling transform splices this shim into a
//! program: dynamic-import call sites become [`ScriptLoader::load`] calls,
//! and `import.meta` references become reads of the URL the shim recovered
//! once, at injection time, from a stack trace.
//!
//! Two components do the work:
//!
//! - [`gantry_trace`] parses a freshly thrown error's stack-trace text to
//!   recover the current module's URL, across the four major browser engine
//!   formats.
//! - [`gantry_loader`] performs a load by injecting a
//!   `<script type="module">` element whose body hands the loaded namespace
//!   back through a page-global registry, and settles an awaitable handle
//!   when the host's pipeline reports success or failure.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gantry::{ScriptLoader, StaticHost};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> gantry::Result<()> {
//!     let host = Arc::new(StaticHost::new("https://example.com/app/main.js"));
//!     let loader = ScriptLoader::new(host)?;
//!     let namespace = loader.load("./util.js")?.await?;
//!     println!("value = {:?}", namespace.get("value"));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-exports
pub use gantry_loader::{
    Deferred, ErrorEvent, ExportValue, ImportMeta, LoadHandle, LoadId, LoaderError,
    LoaderRegistry, ModuleNamespace, ModuleScript, PendingLoad, Result, ScriptHost,
    ScriptLoader, StaticHost, REGISTRY_KEY,
};
pub use gantry_trace::{detect_format, resolve_url, TraceFormat, UnparseableStack};

/// Version of the gantry runtime shim
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
