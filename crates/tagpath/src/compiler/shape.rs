// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compiled accessor shapes.
//!
//! A shape is a short instruction list: zero or more section steps followed
//! by exactly one leaf (a text read or a call with its extraction steps).
//! It holds no parameter values and is shared by every consumer built for
//! the same identifier.

use crate::error::{LabelError, Result};
use crate::registry::{Invoke, MemberRef, Navigate, ReadValue, SectionKey};
use crate::value::{coerce, ParameterMap, Value, ValueKind};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Step into a nested section.
#[derive(Clone)]
pub(crate) struct Enter {
    pub(crate) member: MemberRef,
    pub(crate) navigate: Arc<dyn Navigate>,
}

/// Pull one declared parameter out of the label's parameter map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Extract {
    pub(crate) tag: &'static str,
    pub(crate) kind: ValueKind,
}

impl Extract {
    fn apply(&self, parameters: &ParameterMap) -> Value {
        let value = parameters.get(self.tag);
        if value.and_then(Value::kind) != Some(self.kind) {
            log::trace!(
                "[compiler] parameter '{}' missing or not {}, using default",
                self.tag,
                self.kind
            );
        }
        coerce(value, self.kind)
    }
}

/// Terminal instruction.
#[derive(Clone)]
pub(crate) enum Leaf {
    Read {
        member: MemberRef,
        read: Arc<dyn ReadValue>,
    },
    Invoke {
        member: MemberRef,
        extract: Vec<Extract>,
        invoke: Arc<dyn Invoke>,
    },
}

impl Leaf {
    fn member(&self) -> MemberRef {
        match self {
            Self::Read { member, .. } | Self::Invoke { member, .. } => *member,
        }
    }
}

/// Cached executable form of one identifier.
pub struct CompiledShape {
    identifier: Arc<str>,
    root: SectionKey,
    steps: Vec<Enter>,
    leaf: Leaf,
}

impl CompiledShape {
    pub(crate) fn new(identifier: &str, root: SectionKey, steps: Vec<Enter>, leaf: Leaf) -> Self {
        Self {
            identifier: Arc::from(identifier),
            root,
            steps,
            leaf,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn root(&self) -> SectionKey {
        self.root
    }

    /// Number of section steps before the leaf.
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// Tags of the declared parameters, in call order (empty for reads).
    pub fn parameter_tags(&self) -> Vec<&'static str> {
        match &self.leaf {
            Leaf::Read { .. } => Vec::new(),
            Leaf::Invoke { extract, .. } => extract.iter().map(|e| e.tag).collect(),
        }
    }

    /// Run the shape against `provider`.
    pub(crate) fn execute(&self, provider: &dyn Any, parameters: &ParameterMap) -> Result<String> {
        let mut current = provider;
        for step in &self.steps {
            current = step
                .navigate
                .navigate(current)
                .ok_or(LabelError::ProviderMismatch {
                    expected: step.member.owner.name(),
                })?;
        }

        let expected = self.leaf.member().owner.name();
        match &self.leaf {
            Leaf::Read { read, .. } => read
                .read(current)
                .ok_or(LabelError::ProviderMismatch { expected }),
            Leaf::Invoke {
                extract, invoke, ..
            } => {
                let args: Vec<Value> = extract.iter().map(|e| e.apply(parameters)).collect();
                invoke
                    .invoke(current, &args)
                    .ok_or(LabelError::ProviderMismatch { expected })
            }
        }
    }
}

impl fmt::Debug for CompiledShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steps: Vec<String> = self.steps.iter().map(|s| s.member.to_string()).collect();
        let leaf = match &self.leaf {
            Leaf::Read { member, .. } => format!("Read({})", member),
            Leaf::Invoke {
                member, extract, ..
            } => format!("Invoke({}, {:?})", member, extract),
        };
        f.debug_struct("CompiledShape")
            .field("identifier", &self.identifier)
            .field("steps", &steps)
            .field("leaf", &leaf)
            .finish()
    }
}
