// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Label compiler: identifier -> cached [`CompiledShape`] -> [`Consumer`].
//!
//! # Decoding
//!
//! The identifier is split on `_` (empty segments dropped). Starting at the
//! root section, every segment but the last must resolve to a section read;
//! the last one must resolve to a text read or a call.
//!
//! ```text
//! "j_dev"   Provider --j--> Jobs --dev(xp)--> String
//!            Enter(Provider::jobs)  Invoke(Jobs::dev, [Extract{xp, string}])
//! ```
//!
//! # Caching
//!
//! Shapes are keyed by canonical identifier in a `DashMap`. Compilation runs
//! inside the map's entry guard, so concurrent first requests for one
//! identifier compile it exactly once; [`LabelCompiler::compilations`]
//! exposes the count. Failed compilations are not cached.

mod shape;

pub use shape::CompiledShape;

use crate::config::TAG_SEPARATOR;
use crate::consumer::Consumer;
use crate::error::{LabelError, Result};
use crate::label::Label;
use crate::registry::{AccessorDescriptor, AccessorKind, Registry, Section, SectionKey, ValueTarget};
use dashmap::DashMap;
use shape::{Enter, Extract, Leaf};
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Builds consumers for labels rooted at section `R`.
pub struct LabelCompiler<R> {
    registry: Arc<Registry>,
    shapes: DashMap<String, Arc<CompiledShape>>,
    compilations: AtomicUsize,
    _root: PhantomData<fn(&R)>,
}

impl<R: Section> LabelCompiler<R> {
    /// The registry must be (or later be) initialized from `R`.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            shapes: DashMap::new(),
            compilations: AtomicUsize::new(0),
            _root: PhantomData,
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Build a consumer for `label`.
    ///
    /// A blank identifier yields `Ok(None)`. Unknown segments and accessors
    /// of the wrong kind are errors.
    pub fn build(&self, label: &Label) -> Result<Option<Consumer<R>>> {
        let identifier = label.identifier();
        if identifier.trim().is_empty() {
            return Ok(None);
        }
        let shape = self.shape(identifier)?;
        Ok(Some(Consumer::new(shape, label.parameters().clone())))
    }

    /// Cached shape for `identifier`, compiling it on first use.
    ///
    /// Identifiers differing only by empty segments share one shape.
    pub fn shape(&self, identifier: &str) -> Result<Arc<CompiledShape>> {
        let key = canonical(identifier);
        if key.is_empty() {
            return Err(LabelError::InvalidIdentifier(identifier.to_string()));
        }
        if let Some(shape) = self.shapes.get(key.as_ref()) {
            return Ok(Arc::clone(shape.value()));
        }
        let shape = self
            .shapes
            .entry(key.to_string())
            .or_try_insert_with(|| self.compile(&key))?;
        Ok(Arc::clone(shape.value()))
    }

    /// Number of shapes synthesized so far.
    pub fn compilations(&self) -> usize {
        self.compilations.load(Ordering::Relaxed)
    }

    /// Number of identifiers currently cached.
    pub fn cached_shapes(&self) -> usize {
        self.shapes.len()
    }

    /// Whether `identifier` (or an identifier sharing its shape) is cached.
    pub fn is_cached(&self, identifier: &str) -> bool {
        self.shapes.contains_key(canonical(identifier).as_ref())
    }

    fn compile(&self, identifier: &str) -> Result<Arc<CompiledShape>> {
        let tables = self.registry.tables()?;
        let root = SectionKey::of::<R>();
        if tables.root() != root {
            return Err(LabelError::RootMismatch {
                expected: root.name(),
                found: tables.root().name(),
            });
        }

        let tags: Vec<&str> = identifier
            .split(TAG_SEPARATOR)
            .filter(|tag| !tag.is_empty())
            .collect();
        let Some((leaf_tag, section_tags)) = tags.split_last() else {
            return Err(LabelError::InvalidIdentifier(identifier.to_string()));
        };

        let mut owner = root;
        let mut steps = Vec::with_capacity(section_tags.len());
        for tag in section_tags {
            let descriptor = self.resolve(identifier, owner, tag)?;
            match &descriptor.kind {
                AccessorKind::Value(ValueTarget::Section { target, navigate }) => {
                    steps.push(Enter {
                        member: descriptor.member,
                        navigate: Arc::clone(navigate),
                    });
                    owner = *target;
                }
                AccessorKind::Value(ValueTarget::Text { .. }) => {
                    return Err(wrong_kind(identifier, tag, "a section"));
                }
                AccessorKind::Call { .. } => {
                    return Err(wrong_kind(identifier, tag, "a value accessor"));
                }
            }
        }

        let descriptor = self.resolve(identifier, owner, leaf_tag)?;
        let leaf = match &descriptor.kind {
            AccessorKind::Value(ValueTarget::Text { read }) => Leaf::Read {
                member: descriptor.member,
                read: Arc::clone(read),
            },
            AccessorKind::Call { parameters, invoke } => Leaf::Invoke {
                member: descriptor.member,
                extract: parameters
                    .iter()
                    .map(|p| Extract {
                        tag: p.tag,
                        kind: p.kind,
                    })
                    .collect(),
                invoke: Arc::clone(invoke),
            },
            AccessorKind::Value(ValueTarget::Section { .. }) => {
                return Err(wrong_kind(identifier, leaf_tag, "a text value or call"));
            }
        };

        let shape = CompiledShape::new(identifier, root, steps, leaf);
        let count = self.compilations.fetch_add(1, Ordering::Relaxed) + 1;
        log::debug!(
            "[compiler] compiled '{}' ({} step(s), compilation #{})",
            identifier,
            shape.depth(),
            count
        );
        Ok(Arc::new(shape))
    }

    fn resolve(
        &self,
        identifier: &str,
        owner: SectionKey,
        tag: &str,
    ) -> Result<&AccessorDescriptor> {
        self.registry
            .resolve(owner, tag)
            .ok_or_else(|| LabelError::UnknownSegment {
                identifier: identifier.to_string(),
                segment: tag.to_string(),
                owner: owner.name(),
            })
    }
}

/// `identifier` without empty segments.
fn canonical(identifier: &str) -> Cow<'_, str> {
    if identifier.split(TAG_SEPARATOR).any(str::is_empty) {
        let tags: Vec<&str> = identifier
            .split(TAG_SEPARATOR)
            .filter(|tag| !tag.is_empty())
            .collect();
        Cow::Owned(tags.join(&TAG_SEPARATOR.to_string()))
    } else {
        Cow::Borrowed(identifier)
    }
}

fn wrong_kind(identifier: &str, segment: &str, expected: &'static str) -> LabelError {
    LabelError::WrongAccessorKind {
        identifier: identifier.to_string(),
        segment: segment.to_string(),
        expected,
    }
}

impl<R> fmt::Debug for LabelCompiler<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelCompiler")
            .field("registry", &self.registry)
            .field("cached_shapes", &self.shapes.len())
            .field("compilations", &self.compilations.load(Ordering::Relaxed))
            .finish()
    }
}
