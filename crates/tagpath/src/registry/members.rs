// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Static registration table of a section type.
//!
//! Every section type implements [`Section`] and lists its tagged members
//! through a [`Members`] registrar. The `#[section]` attribute macro writes
//! this impl from annotated methods; it can also be written by hand:
//!
//! ```
//! use tagpath::{Members, Parameter, Section};
//!
//! struct Jobs;
//!
//! impl Jobs {
//!     fn dev(&self, experience: String) -> String {
//!         format!("{} Software Developer", experience)
//!     }
//! }
//!
//! impl Section for Jobs {
//!     fn describe(members: &mut Members<'_, Self>) {
//!         members
//!             .value("qa", "qa", |_| "Quality Assurance Engineer".to_string())
//!             .call(
//!                 "dev",
//!                 "dev",
//!                 [Parameter::of::<String>("experience").tagged("xp")],
//!                 |jobs, args| jobs.dev(tagpath::extract(args, 0)),
//!             );
//!     }
//! }
//! ```

use super::descriptor::{
    AccessorDescriptor, AccessorKind, CallFn, MemberRef, ParameterDescriptor, SectionFn,
    SectionKey, ValueFn, ValueTarget,
};
use super::Traversal;
use crate::value::{ParamValue, Value, ValueKind};
use std::marker::PhantomData;
use std::sync::Arc;

/// A type whose tagged members can be navigated by label identifiers.
pub trait Section: Sized + 'static {
    /// Register the tagged members of this section.
    fn describe(members: &mut Members<'_, Self>);
}

/// Declared parameter of a call member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter {
    name: &'static str,
    tag: Option<&'static str>,
    kind: ValueKind,
}

impl Parameter {
    /// Parameter `name` of Rust type `T`.
    pub fn of<T: ParamValue>(name: &'static str) -> Self {
        Self::new(name, T::KIND)
    }

    pub fn new(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            tag: None,
            kind,
        }
    }

    /// Explicit parameter tag (defaults to the parameter name).
    #[must_use]
    pub fn tagged(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    pub(crate) fn into_descriptor(self) -> ParameterDescriptor {
        let tag = match self.tag {
            Some(tag) if !tag.trim().is_empty() => tag,
            _ => self.name,
        };
        ParameterDescriptor {
            name: self.name,
            tag,
            kind: self.kind,
        }
    }
}

/// Registrar handed to [`Section::describe`].
pub struct Members<'t, S> {
    traversal: &'t mut Traversal,
    _owner: PhantomData<fn(&S)>,
}

impl<'t, S: Section> Members<'t, S> {
    pub(crate) fn new(traversal: &'t mut Traversal) -> Self {
        Self {
            traversal,
            _owner: PhantomData,
        }
    }

    fn member(name: &'static str) -> MemberRef {
        MemberRef::new(SectionKey::of::<S>(), name)
    }

    /// Register a nested section reached through `read`.
    ///
    /// The nested section type is described right after (depth-first).
    pub fn section<C: Section>(
        &mut self,
        name: &'static str,
        tag: &'static str,
        read: fn(&S) -> &C,
    ) -> &mut Self {
        let descriptor = AccessorDescriptor {
            member: Self::member(name),
            tag,
            kind: AccessorKind::Value(ValueTarget::Section {
                target: SectionKey::of::<C>(),
                navigate: Arc::new(SectionFn { read }),
            }),
        };
        if self.traversal.register(descriptor) {
            self.traversal.visit::<C>();
        }
        self
    }

    /// Register a terminal text value.
    pub fn value(&mut self, name: &'static str, tag: &'static str, read: fn(&S) -> String) -> &mut Self {
        self.traversal.register(AccessorDescriptor {
            member: Self::member(name),
            tag,
            kind: AccessorKind::Value(ValueTarget::Text {
                read: Arc::new(ValueFn { read }),
            }),
        });
        self
    }

    /// Register a call; `invoke` receives the arguments in declaration order.
    pub fn call(
        &mut self,
        name: &'static str,
        tag: &'static str,
        parameters: impl IntoIterator<Item = Parameter>,
        invoke: fn(&S, &[Value]) -> String,
    ) -> &mut Self {
        self.traversal.register(AccessorDescriptor {
            member: Self::member(name),
            tag,
            kind: AccessorKind::Call {
                parameters: parameters
                    .into_iter()
                    .map(Parameter::into_descriptor)
                    .collect(),
                invoke: Arc::new(CallFn { invoke }),
            },
        });
        self
    }
}
