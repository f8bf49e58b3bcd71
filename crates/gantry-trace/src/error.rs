// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for stack-trace resolution

use thiserror::Error;

/// Result type for stack-trace resolution
pub type Result<T> = std::result::Result<T, UnparseableStack>;

/// The stack trace matched none of the known browser formats.
///
/// Carries the raw trace text so an unsupported engine format can be
/// diagnosed from the failure alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("couldn't parse error stack to determine the current module URL")]
pub struct UnparseableStack {
    /// The trace text that failed to parse
    pub trace: String,
}

impl UnparseableStack {
    /// Create a new error from the offending trace text
    pub fn new(trace: impl Into<String>) -> Self {
        Self {
            trace: trace.into(),
        }
    }
}
