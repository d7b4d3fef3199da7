// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Accessor registry.
//!
//! Built once per [`Registry`] instance by walking the section graph that is
//! reachable from a root [`Section`] type.
//!
//! # Architecture
//!
//! ```text
//! Registry
//! +-- config: RegistryConfig
//! +-- tables: OnceLock<Result<RegistryTables>>   (populated once)
//!
//! RegistryTables (read-only after population)
//! +-- by_owner_and_tag: (SectionKey, tag) -> AccessorDescriptor   (decode)
//! +-- by_identity:      MemberRef         -> tag                  (encode)
//! +-- by_parameter:     ParameterRef      -> tag                  (encode)
//! ```
//!
//! # Thread Safety
//!
//! [`Registry::initialize`] runs the traversal under the `OnceLock` guard:
//! concurrent callers block until the first one finishes and then observe
//! the same outcome. Lookups after that are plain reads.

mod descriptor;
mod members;

pub use descriptor::{
    AccessorDescriptor, AccessorKind, Invoke, MemberRef, Navigate, ParameterDescriptor,
    ParameterRef, ReadValue, SectionKey, ValueTarget,
};
pub use members::{Members, Parameter, Section};

use crate::config::{CollisionPolicy, RegistryConfig, TAG_SEPARATOR};
use crate::error::{LabelError, Result};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::OnceLock;

/// Populated lookup tables.
pub(crate) struct RegistryTables {
    root: SectionKey,
    by_owner_and_tag: HashMap<SectionKey, HashMap<&'static str, AccessorDescriptor>>,
    by_identity: HashMap<MemberRef, &'static str>,
    by_parameter: HashMap<ParameterRef, &'static str>,
}

impl RegistryTables {
    fn new(root: SectionKey) -> Self {
        Self {
            root,
            by_owner_and_tag: HashMap::new(),
            by_identity: HashMap::new(),
            by_parameter: HashMap::new(),
        }
    }

    pub(crate) fn root(&self) -> SectionKey {
        self.root
    }
}

/// Depth-first population state.
pub(crate) struct Traversal {
    policy: CollisionPolicy,
    tables: RegistryTables,
    visited: HashSet<SectionKey>,
    error: Option<LabelError>,
}

impl Traversal {
    /// Describe section `S` unless it was already described.
    pub(crate) fn visit<S: Section>(&mut self) {
        let key = SectionKey::of::<S>();
        if self.error.is_some() || !self.visited.insert(key) {
            return;
        }
        log::debug!("[registry] describing section {}", key.short_name());
        S::describe(&mut Members::<S>::new(self));
    }

    /// Insert one accessor; `false` when it was skipped or rejected.
    pub(crate) fn register(&mut self, descriptor: AccessorDescriptor) -> bool {
        if self.error.is_some() {
            return false;
        }
        if !is_valid_tag(descriptor.tag) {
            log::warn!(
                "[registry] skipping {}: tag {:?} is blank or contains '{}'",
                descriptor.member,
                descriptor.tag,
                TAG_SEPARATOR
            );
            return false;
        }

        let owner = descriptor.owner();
        let tag = descriptor.tag;
        let previous = self
            .tables
            .by_owner_and_tag
            .get(&owner)
            .and_then(|members| members.get(tag))
            .map(|previous| previous.member);

        if let Some(previous) = previous.filter(|previous| *previous != descriptor.member) {
            match self.policy {
                CollisionPolicy::LastWins => {
                    log::warn!(
                        "[registry] tag '{}' on {} moves from '{}' to '{}'",
                        tag,
                        owner.short_name(),
                        previous.name,
                        descriptor.member.name
                    );
                    self.forget(previous);
                }
                CollisionPolicy::Reject => {
                    log::error!(
                        "[registry] tag '{}' declared by both '{}' and '{}' on {}",
                        tag,
                        previous.name,
                        descriptor.member.name,
                        owner.short_name()
                    );
                    self.error = Some(LabelError::DuplicateTag {
                        owner: owner.name(),
                        tag: tag.to_string(),
                    });
                    return false;
                }
            }
        }

        for (position, parameter) in descriptor.parameters().iter().enumerate() {
            let parameter_ref = ParameterRef {
                member: descriptor.member,
                position,
            };
            self.tables.by_parameter.insert(parameter_ref, parameter.tag);
        }
        self.tables.by_identity.insert(descriptor.member, tag);
        self.tables
            .by_owner_and_tag
            .entry(owner)
            .or_default()
            .insert(tag, descriptor);
        true
    }

    /// Drop the encode-side entries of a member whose tag was taken over.
    fn forget(&mut self, member: MemberRef) {
        self.tables.by_identity.remove(&member);
        self.tables
            .by_parameter
            .retain(|parameter, _| parameter.member != member);
    }
}

fn is_valid_tag(tag: &str) -> bool {
    !tag.trim().is_empty() && !tag.contains(TAG_SEPARATOR)
}

/// Metadata index mapping tags to accessors and accessors to tags.
pub struct Registry {
    config: RegistryConfig,
    tables: OnceLock<Result<RegistryTables>>,
}

impl Registry {
    /// Create an empty registry with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            tables: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Populate the registry from root section `R`.
    ///
    /// Only the first call performs the traversal; every call returns its
    /// outcome. Calling again with another root fails with
    /// [`LabelError::RootMismatch`] and leaves the registry untouched.
    pub fn initialize<R: Section>(&self) -> Result<()> {
        let outcome = self.tables.get_or_init(|| self.populate::<R>());
        let tables = outcome.as_ref().map_err(Clone::clone)?;

        let requested = SectionKey::of::<R>();
        if tables.root != requested {
            log::warn!(
                "[registry] already initialized from {}, ignoring {}",
                tables.root.short_name(),
                requested.short_name()
            );
            return Err(LabelError::RootMismatch {
                expected: requested.name(),
                found: tables.root.name(),
            });
        }
        Ok(())
    }

    fn populate<R: Section>(&self) -> Result<RegistryTables> {
        let root = SectionKey::of::<R>();
        let mut traversal = Traversal {
            policy: self.config.get_collision_policy(),
            tables: RegistryTables::new(root),
            visited: HashSet::new(),
            error: None,
        };
        traversal.visit::<R>();

        if let Some(err) = traversal.error {
            return Err(err);
        }

        let tables = traversal.tables;
        log::debug!(
            "[registry] initialized from {}: {} section(s), {} accessor(s), {} parameter(s)",
            root.short_name(),
            traversal.visited.len(),
            tables.by_identity.len(),
            tables.by_parameter.len()
        );
        Ok(tables)
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.tables.get(), Some(Ok(_)))
    }

    pub(crate) fn tables(&self) -> Result<&RegistryTables> {
        match self.tables.get() {
            Some(Ok(tables)) => Ok(tables),
            Some(Err(err)) => Err(err.clone()),
            None => Err(LabelError::NotInitialized),
        }
    }

    /// Root section the registry was populated from.
    pub fn root(&self) -> Option<SectionKey> {
        self.tables().ok().map(|tables| tables.root)
    }

    /// Accessor tagged `tag` on section `owner`.
    pub fn resolve(&self, owner: SectionKey, tag: &str) -> Option<&AccessorDescriptor> {
        self.tables()
            .ok()?
            .by_owner_and_tag
            .get(&owner)?
            .get(tag)
    }

    /// Tag of an accessor.
    pub fn tag_of(&self, member: &MemberRef) -> Option<&'static str> {
        self.tables().ok()?.by_identity.get(member).copied()
    }

    /// Tag of a call parameter.
    pub fn parameter_tag_of(&self, parameter: &ParameterRef) -> Option<&'static str> {
        self.tables().ok()?.by_parameter.get(parameter).copied()
    }

    /// Accessors registered on `owner`, ordered by tag.
    pub fn members_of(&self, owner: SectionKey) -> Vec<&AccessorDescriptor> {
        let Some(members) = self
            .tables()
            .ok()
            .and_then(|tables| tables.by_owner_and_tag.get(&owner))
        else {
            return Vec::new();
        };
        let mut members: Vec<_> = members.values().collect();
        members.sort_by_key(|descriptor| descriptor.tag);
        members
    }

    /// Number of registered accessors.
    pub fn len(&self) -> usize {
        self.tables()
            .map(|tables| tables.by_identity.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("root", &self.root())
            .field("accessors", &self.len())
            .finish()
    }
}
