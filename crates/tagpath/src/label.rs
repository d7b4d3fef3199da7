// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Label value object.

use crate::config::TAG_SEPARATOR;
use crate::value::{ParameterMap, Value};
use std::fmt;

/// Canonical identifier plus call parameters.
///
/// The identifier is the stable, transmissible key (`"j_dev"`); the
/// parameters are keyed by parameter tag (`{"xp": "Senior"}`).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label {
    identifier: String,
    #[cfg_attr(feature = "serde", serde(default))]
    parameters: ParameterMap,
}

impl Label {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            parameters: ParameterMap::new(),
        }
    }

    /// Join tags root to leaf.
    pub fn from_tags<'a>(tags: impl IntoIterator<Item = &'a str>) -> Self {
        let mut identifier = String::new();
        for tag in tags {
            if !identifier.is_empty() {
                identifier.push(TAG_SEPARATOR);
            }
            identifier.push_str(tag);
        }
        Self::new(identifier)
    }

    /// Builder-style parameter insertion (an existing tag is overwritten).
    #[must_use]
    pub fn with_parameter(mut self, tag: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(tag, value);
        self
    }

    pub(crate) fn insert(&mut self, tag: impl Into<String>, value: impl Into<Value>) {
        self.parameters.insert(tag.into(), value.into());
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    pub fn parameter(&self, tag: &str) -> Option<&Value> {
        self.parameters.get(tag)
    }

    /// Tags of the identifier, root to leaf (empty segments skipped).
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.identifier
            .split(TAG_SEPARATOR)
            .filter(|tag| !tag.is_empty())
    }

    pub fn into_parts(self) -> (String, ParameterMap) {
        (self.identifier, self.parameters)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Identifier: {}", self.identifier)?;
        f.write_str("Parameters: { ")?;
        for (i, (tag, value)) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", tag, value)?;
        }
        f.write_str(" }")
    }
}
