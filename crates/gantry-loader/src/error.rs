// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Error types for the module loader

use crate::script::ErrorEvent;
use gantry_trace::UnparseableStack;
use thiserror::Error;

/// Result type for loader operations
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Errors that can occur while loading a module
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Specifier or base URL failed standard URL parsing (propagated unmodified)
    #[error("{0}")]
    Url(#[from] url::ParseError),

    /// The current module URL could not be recovered from a stack trace
    #[error("{0}")]
    Stack(#[from] UnparseableStack),

    /// The host's module pipeline reported a fetch, parse, or evaluation failure
    #[error("module load failed: {0}")]
    Load(ErrorEvent),

    /// The load's registry entry was dropped before its handle settled
    #[error("module load was abandoned before it settled")]
    Abandoned,
}
