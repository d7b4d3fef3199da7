// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Accessor descriptors stored in the registry.

use crate::value::{Value, ValueKind};
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identity of a section type.
///
/// Equality and hashing use the [`TypeId`] only; the name is kept for
/// diagnostics.
#[derive(Clone, Copy)]
pub struct SectionKey {
    id: TypeId,
    name: &'static str,
}

impl SectionKey {
    /// Key of section type `S`.
    pub fn of<S: Any>() -> Self {
        Self {
            id: TypeId::of::<S>(),
            name: std::any::type_name::<S>(),
        }
    }

    /// Fully qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path.
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for SectionKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SectionKey {}

impl Hash for SectionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SectionKey({})", self.short_name())
    }
}

/// Identity of one accessor, independent of its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberRef {
    pub owner: SectionKey,
    pub name: &'static str,
}

impl MemberRef {
    pub fn new(owner: SectionKey, name: &'static str) -> Self {
        Self { owner, name }
    }
}

impl fmt::Display for MemberRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.owner.short_name(), self.name)
    }
}

/// Identity of one call parameter (declaration position on its member).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterRef {
    pub member: MemberRef,
    pub position: usize,
}

/// Declared parameter of a call accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// Rust parameter name.
    pub name: &'static str,
    /// Key used in the label parameter map.
    pub tag: &'static str,
    /// Declared kind.
    pub kind: ValueKind,
}

/// What a value accessor yields.
#[derive(Clone)]
pub enum ValueTarget {
    /// A nested section; navigation continues into it.
    Section {
        target: SectionKey,
        navigate: Arc<dyn Navigate>,
    },
    /// A terminal text value.
    Text { read: Arc<dyn ReadValue> },
}

/// Accessor kind.
#[derive(Clone)]
pub enum AccessorKind {
    /// Plain read (section or text).
    Value(ValueTarget),
    /// Call with parameters, producing text.
    Call {
        parameters: Vec<ParameterDescriptor>,
        invoke: Arc<dyn Invoke>,
    },
}

/// One navigable member of a section type.
#[derive(Clone)]
pub struct AccessorDescriptor {
    pub member: MemberRef,
    pub tag: &'static str,
    pub kind: AccessorKind,
}

impl AccessorDescriptor {
    pub fn owner(&self) -> SectionKey {
        self.member.owner
    }

    pub fn is_value_accessor(&self) -> bool {
        matches!(self.kind, AccessorKind::Value(_))
    }

    pub fn is_call_accessor(&self) -> bool {
        matches!(self.kind, AccessorKind::Call { .. })
    }

    /// Section reached through this accessor, if it is a section read.
    pub fn section_target(&self) -> Option<SectionKey> {
        match &self.kind {
            AccessorKind::Value(ValueTarget::Section { target, .. }) => Some(*target),
            _ => None,
        }
    }

    /// Declared parameters (empty for value accessors).
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        match &self.kind {
            AccessorKind::Call { parameters, .. } => parameters,
            AccessorKind::Value(_) => &[],
        }
    }
}

impl fmt::Debug for AccessorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            AccessorKind::Value(ValueTarget::Section { target, .. }) => {
                format!("Section({})", target.short_name())
            }
            AccessorKind::Value(ValueTarget::Text { .. }) => "Value".to_string(),
            AccessorKind::Call { parameters, .. } => format!("Call({:?})", parameters),
        };
        f.debug_struct("AccessorDescriptor")
            .field("member", &self.member)
            .field("tag", &self.tag)
            .field("kind", &kind)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Type-erased accessor functions
// ---------------------------------------------------------------------------

/// Section read on a type-erased owner.
pub trait Navigate: Send + Sync {
    /// `None` when `owner` is not of the expected section type.
    fn navigate<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any>;
}

/// Text read on a type-erased owner.
pub trait ReadValue: Send + Sync {
    fn read(&self, owner: &dyn Any) -> Option<String>;
}

/// Call on a type-erased owner with positional arguments.
pub trait Invoke: Send + Sync {
    fn invoke(&self, owner: &dyn Any, args: &[Value]) -> Option<String>;
}

pub(crate) struct SectionFn<S, C> {
    pub(crate) read: fn(&S) -> &C,
}

impl<S: Any, C: Any> Navigate for SectionFn<S, C> {
    fn navigate<'a>(&self, owner: &'a dyn Any) -> Option<&'a dyn Any> {
        let owner = owner.downcast_ref::<S>()?;
        Some((self.read)(owner) as &dyn Any)
    }
}

pub(crate) struct ValueFn<S> {
    pub(crate) read: fn(&S) -> String,
}

impl<S: Any> ReadValue for ValueFn<S> {
    fn read(&self, owner: &dyn Any) -> Option<String> {
        owner.downcast_ref::<S>().map(self.read)
    }
}

pub(crate) struct CallFn<S> {
    pub(crate) invoke: fn(&S, &[Value]) -> String,
}

impl<S: Any> Invoke for CallFn<S> {
    fn invoke(&self, owner: &dyn Any, args: &[Value]) -> Option<String> {
        owner
            .downcast_ref::<S>()
            .map(|owner| (self.invoke)(owner, args))
    }
}
