// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sinks for resolved values.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::value::StyleValue;

/// Receiver of resolved property values.
///
/// Resolvers call [`set_value`](Self::set_value) once per longhand they
/// produce, and only after the whole value has been accepted.
pub trait StylePropertySetter {
    /// Store `value` for the longhand property `name`.
    fn set_value(&mut self, name: &str, value: StyleValue);
}

/// A setter that records every value in call order.
///
/// Useful for inspecting what a shorthand expands to, or for collecting
/// declarations before applying them to a style.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedProperties {
    entries: Vec<(String, StyleValue)>,
}

impl ResolvedProperties {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent value set for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<StyleValue> {
        self.entries
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Number of `set_value` calls recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recorded `(name, value)` pairs in call order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, StyleValue)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Replay the recorded values into another setter.
    pub fn apply_to(&self, setter: &mut dyn StylePropertySetter) {
        for (name, value) in self.iter() {
            setter.set_value(name, value);
        }
    }

    /// Forget all recorded values.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl StylePropertySetter for ResolvedProperties {
    fn set_value(&mut self, name: &str, value: StyleValue) {
        self.entries.push((name.to_string(), value));
    }
}
