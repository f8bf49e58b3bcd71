// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # gantry-trace
//!
//! Recovers the URL of the currently executing script from the text of a
//! freshly thrown error's stack trace.
//!
//! Stack-trace text is engine-specific and carries no formal contract. This
//! crate recognizes the four formats the major browser engines emit and tries
//! them in a fixed precedence order:
//!
//! 1. `Error` header line followed by `at <url>:<line>:<col>` frames (Chrome)
//! 2. `Error` header line followed by `at <fn> (<url>:<line>:<col>)` frames (Edge)
//! 3. `@<url>:<line>:<col>` inline on the first line (Firefox)
//! 4. `module code@<url>:<line>:<col>` / `global code@...` inline (Safari)
//!
//! A trace matching none of them fails loudly with [`UnparseableStack`] rather
//! than guessing. Parsing is a pure function of the trace text: no I/O, no
//! shared state, same output (or same failure) for the same input.
//!
//! ```rust
//! use gantry_trace::resolve_url;
//!
//! let trace = "Error\n    at https://example.com/app/main.js:10:15";
//! assert_eq!(resolve_url(trace).unwrap(), "https://example.com/app/main.js");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod formats;
pub mod resolver;

// Re-exports
pub use error::{Result, UnparseableStack};
pub use formats::TraceFormat;
pub use resolver::{detect_format, resolve_url};
