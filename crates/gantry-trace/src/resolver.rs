// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Precedence chain over the per-engine trace parsers

use crate::error::{Result, UnparseableStack};
use crate::formats::{self, TraceFormat};

/// Resolve the URL of the script that constructed the error whose trace
/// text is given.
///
/// The caller is expected to have constructed the error at the site whose
/// URL it wants, so the first meaningful frame names that site. Fails with
/// [`UnparseableStack`] when no supported format matches; never returns a
/// partially matched URL.
pub fn resolve_url(trace: &str) -> Result<String> {
    match detect_format(trace) {
        Some((format, url)) => {
            tracing::debug!(%format, %url, "resolved module URL from stack trace");
            Ok(url)
        }
        None => {
            tracing::warn!("stack trace matched no supported engine format");
            Err(UnparseableStack::new(trace))
        }
    }
}

/// Try every supported format in precedence order and return the first
/// match together with the format that produced it.
///
/// The header-plus-frame-list layout is tried first: a bare `Error` first
/// line signals it, and the first frame line is then parsed as Chrome and
/// then Edge. If that layout is absent or its frame parses fail, the first
/// line itself is parsed inline as Firefox and then Safari.
pub fn detect_format(trace: &str) -> Option<(TraceFormat, String)> {
    let mut lines = trace.lines();
    let first = lines.next()?;
    let second = lines.next();

    if formats::is_header_line(first) {
        if let Some(frame) = second {
            if let Some(url) = formats::parse_chrome_frame(frame) {
                return Some((TraceFormat::Chrome, url));
            }
            if let Some(url) = formats::parse_edge_frame(frame) {
                return Some((TraceFormat::Edge, url));
            }
        }
    }

    if let Some(url) = formats::parse_firefox_line(first) {
        return Some((TraceFormat::Firefox, url));
    }
    formats::parse_safari_line(first).map(|url| (TraceFormat::Safari, url))
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.com/app/main.js";

    #[test]
    fn test_chrome_trace() {
        let trace = format!("Error\n    at {URL}:10:15\n    at {URL}:20:1");
        assert_eq!(detect_format(&trace), Some((TraceFormat::Chrome, URL.to_string())));
        assert_eq!(resolve_url(&trace).unwrap(), URL);
    }

    #[test]
    fn test_edge_trace() {
        let trace = format!("Error\n   at Anonymous function ({URL}:1:1)");
        assert_eq!(detect_format(&trace), Some((TraceFormat::Edge, URL.to_string())));
        assert_eq!(resolve_url(&trace).unwrap(), URL);
    }

    #[test]
    fn test_firefox_trace() {
        let trace = format!("@{URL}:4:9\nrun@https://example.com/app/other.js:1:1");
        assert_eq!(detect_format(&trace), Some((TraceFormat::Firefox, URL.to_string())));
        assert_eq!(resolve_url(&trace).unwrap(), URL);
    }

    #[test]
    fn test_safari_trace() {
        let trace = format!("module code@{URL}:3:26");
        assert_eq!(detect_format(&trace), Some((TraceFormat::Safari, URL.to_string())));

        let trace = format!("global code@{URL}:1:1");
        assert_eq!(detect_format(&trace), Some((TraceFormat::Safari, URL.to_string())));
    }

    #[test]
    fn test_url_independent_of_line_and_column() {
        let a = format!("Error\n    at {URL}:1:1");
        let b = format!("Error\n    at {URL}:9999:120");
        assert_eq!(resolve_url(&a).unwrap(), resolve_url(&b).unwrap());
    }

    #[test]
    fn test_unknown_format_fails_with_trace_text() {
        let trace = "SomeError: something went wrong\n    in unknownFrame";
        let err = resolve_url(trace).unwrap_err();
        assert_eq!(err.trace, trace);
    }

    #[test]
    fn test_header_without_frame_line_fails() {
        assert!(resolve_url("Error").is_err());
    }

    #[test]
    fn test_empty_trace_fails() {
        assert!(resolve_url("").is_err());
    }

    #[test]
    fn test_deterministic() {
        let trace = format!("Error\n    at {URL}:10:15");
        assert_eq!(resolve_url(&trace).unwrap(), resolve_url(&trace).unwrap());
    }
}
