// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tagpath configuration.
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: identifier format constants. These are part of the
//!   persisted identifier format and never change at runtime.
//! - **Level 2 (Dynamic)**: [`RegistryConfig`], fixed when a
//!   [`Registry`](crate::Registry) is created.
//!
//! # Example
//!
//! ```
//! use tagpath::config::{CollisionPolicy, RegistryConfig};
//! use tagpath::Registry;
//!
//! let registry = Registry::with_config(
//!     RegistryConfig::default().collision_policy(CollisionPolicy::Reject),
//! );
//! assert!(!registry.is_initialized());
//! ```

use std::fmt;
use std::str::FromStr;

// =======================================================================
// Identifier format
// =======================================================================

/// Separator between tags inside an identifier (`"j_dev"`).
///
/// Tags containing this character are refused at registration.
pub const TAG_SEPARATOR: char = '_';

/// Environment variable read by [`RegistryConfig::from_env`].
pub const ENV_COLLISION_POLICY: &str = "TAGPATH_COLLISION_POLICY";

// =======================================================================
// Runtime configuration
// =======================================================================

/// What happens when two members of one section declare the same tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// The later registration replaces the earlier one (logged at warn level).
    #[default]
    LastWins,
    /// Initialization fails with [`LabelError::DuplicateTag`](crate::LabelError::DuplicateTag).
    Reject,
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last-wins" | "last_wins" | "lastwins" => Ok(Self::LastWins),
            "reject" | "strict" => Ok(Self::Reject),
            other => Err(format!("unknown collision policy '{}'", other)),
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastWins => f.write_str("last-wins"),
            Self::Reject => f.write_str("reject"),
        }
    }
}

/// Registry construction settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    collision_policy: CollisionPolicy,
}

impl RegistryConfig {
    /// Defaults overridden by `TAGPATH_COLLISION_POLICY` when set.
    ///
    /// Unknown values are logged and ignored (fail-safe).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(ENV_COLLISION_POLICY).ok().as_deref())
    }

    fn from_env_value(raw: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = raw {
            match raw.parse() {
                Ok(policy) => config.collision_policy = policy,
                Err(err) => log::warn!(
                    "[config] {}={:?}: {}. Using '{}'.",
                    ENV_COLLISION_POLICY,
                    raw,
                    err,
                    config.collision_policy
                ),
            }
        }
        config
    }

    /// Set the tag collision policy.
    #[must_use]
    pub fn collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Current tag collision policy.
    pub fn get_collision_policy(&self) -> CollisionPolicy {
        self.collision_policy
    }
}
