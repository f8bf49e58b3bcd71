// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Module namespace objects and their export values

use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// The value of one exported binding.
///
/// Data exports map directly; non-data exports (functions, classes) appear as
/// [`ExportValue::External`] references whose meaning is host-assigned.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportValue {
    /// undefined
    Undefined,
    /// null
    Null,
    /// Boolean value
    Boolean(bool),
    /// Number (IEEE 754 double)
    Number(f64),
    /// String
    String(String),
    /// Array of values
    Array(Vec<ExportValue>),
    /// Plain object
    Object(HashMap<String, ExportValue>),
    /// Host-assigned reference to a non-data export
    External(u64),
}

impl ExportValue {
    /// Returns true if this value is undefined.
    pub fn is_undefined(&self) -> bool {
        matches!(self, ExportValue::Undefined)
    }

    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, ExportValue::Null)
    }

    /// Returns the boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ExportValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ExportValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ExportValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Build an export value from JSON (JSON has no undefined or external
    /// references, so those variants are never produced here).
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => ExportValue::Null,
            JsonValue::Bool(b) => ExportValue::Boolean(*b),
            JsonValue::Number(n) => ExportValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            JsonValue::String(s) => ExportValue::String(s.clone()),
            JsonValue::Array(items) => {
                ExportValue::Array(items.iter().map(Self::from_json).collect())
            }
            JsonValue::Object(map) => ExportValue::Object(
                map.iter()
                    .map(|(name, value)| (name.clone(), Self::from_json(value)))
                    .collect(),
            ),
        }
    }
}

/// Namespace object: exported-binding name to current value, in the shape a
/// native dynamic-import expression would produce.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleNamespace {
    exports: HashMap<String, ExportValue>,
}

impl ModuleNamespace {
    /// Create an empty namespace
    pub fn new() -> Self {
        Self {
            exports: HashMap::new(),
        }
    }

    /// Build a namespace from a JSON object; non-objects have no namespace shape
    pub fn from_json(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Object(map) => Some(Self {
                exports: map
                    .iter()
                    .map(|(name, value)| (name.clone(), ExportValue::from_json(value)))
                    .collect(),
            }),
            _ => None,
        }
    }

    /// Get an exported value
    pub fn get(&self, name: &str) -> Option<&ExportValue> {
        self.exports.get(name)
    }

    /// Get the default export
    pub fn get_default(&self) -> Option<&ExportValue> {
        self.exports.get("default")
    }

    /// Set an exported value
    pub fn set_export(&mut self, name: impl Into<String>, value: ExportValue) {
        self.exports.insert(name.into(), value);
    }

    /// Check whether a binding is exported
    pub fn contains(&self, name: &str) -> bool {
        self.exports.contains_key(name)
    }

    /// All exported binding names
    pub fn names(&self) -> Vec<&str> {
        self.exports.keys().map(|name| name.as_str()).collect()
    }

    /// Number of exported bindings
    pub fn len(&self) -> usize {
        self.exports.len()
    }

    /// Check whether the namespace has no exports
    pub fn is_empty(&self) -> bool {
        self.exports.is_empty()
    }
}
