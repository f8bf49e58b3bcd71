// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Per-engine stack-trace patterns
//!
//! Each supported engine format gets its own named parser function so the
//! precedence chain in [`crate::resolver`] stays explicit. Every parser takes
//! one line of trace text and returns the captured URL, or `None` if the line
//! does not have that engine's shape.

use regex::Regex;

/// Stack-trace formats recognized by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceFormat {
    /// `Error` header, then `at <url>:<line>:<col>` frames
    Chrome,
    /// `Error` header, then `at <function> (<url>:<line>:<col>)` frames
    Edge,
    /// `@<url>:<line>:<col>` inline on the first line
    Firefox,
    /// `module code@<url>:<line>:<col>` or `global code@<url>:<line>:<col>`
    Safari,
}

impl std::fmt::Display for TraceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceFormat::Chrome => write!(f, "chrome"),
            TraceFormat::Edge => write!(f, "edge"),
            TraceFormat::Firefox => write!(f, "firefox"),
            TraceFormat::Safari => write!(f, "safari"),
        }
    }
}

/// Check whether a line is the bare `Error` header that signals the
/// header-plus-frame-list layout (Chrome and Edge).
pub fn is_header_line(line: &str) -> bool {
    let pattern = Regex::new(r"^Error$").unwrap();
    pattern.is_match(line.trim())
}

/// Parse a Chrome-style frame line: `at <url>:<line>:<col>`, no parens.
pub fn parse_chrome_frame(line: &str) -> Option<String> {
    let pattern = Regex::new(r"^\s*at\s*(.*):[0-9]+:[0-9]+$").unwrap();
    capture_url(&pattern, line)
}

/// Parse an Edge-style frame line: `at <function> (<url>:<line>:<col>)`.
pub fn parse_edge_frame(line: &str) -> Option<String> {
    let pattern = Regex::new(r"^\s*at\s*.*\((.*):[0-9]+:[0-9]+\)").unwrap();
    capture_url(&pattern, line)
}

/// Parse a Firefox-style first line: `@<url>:<line>:<col>`.
pub fn parse_firefox_line(line: &str) -> Option<String> {
    let pattern = Regex::new(r"^@(.*):[0-9]+:[0-9]+").unwrap();
    capture_url(&pattern, line)
}

/// Parse a Safari-style first line: `module code@<url>:<line>:<col>` or
/// `global code@<url>:<line>:<col>`.
pub fn parse_safari_line(line: &str) -> Option<String> {
    let pattern = Regex::new(r"^(?:module|global) code@(.*):[0-9]+:[0-9]+").unwrap();
    capture_url(&pattern, line)
}

fn capture_url(pattern: &Regex, line: &str) -> Option<String> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
