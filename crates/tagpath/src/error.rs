// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types shared by the registry, encoder and compiler.
//!
//! Two outcomes are deliberately *not* errors: a path with an untagged
//! segment encodes to `Ok(None)`, and a missing call parameter is replaced
//! by its zero value at invocation time.

use crate::value::ValueKind;
use std::fmt;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, LabelError>;

/// Label encoding/decoding errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// A call argument cannot be evaluated when the path is encoded.
    UnsupportedArgument { position: usize, reason: String },
    /// A call description carries a different number of arguments than declared.
    ArityMismatch {
        member: String,
        expected: usize,
        found: usize,
    },
    /// A call argument's value kind differs from the declared parameter kind.
    ArgumentKindMismatch {
        member: String,
        position: usize,
        expected: ValueKind,
        found: ValueKind,
    },
    /// An identifier segment does not name any member of the section reached so far.
    UnknownSegment {
        identifier: String,
        segment: String,
        owner: &'static str,
    },
    /// An identifier segment names a member of the wrong accessor kind.
    WrongAccessorKind {
        identifier: String,
        segment: String,
        expected: &'static str,
    },
    /// Identifier is not blank but contains no segments.
    InvalidIdentifier(String),
    /// The registry was used before `initialize`.
    NotInitialized,
    /// The registry was populated from another root section.
    RootMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// Two members of the same section share a tag (strict collision policy).
    DuplicateTag { owner: &'static str, tag: String },
    /// A navigation step received an instance of an unexpected section type.
    ProviderMismatch { expected: &'static str },
}

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedArgument { position, reason } => write!(
                f,
                "Unsupported argument expression at position {}: {}",
                position, reason
            ),
            Self::ArityMismatch {
                member,
                expected,
                found,
            } => write!(
                f,
                "Call to '{}' expects {} argument(s), got {}",
                member, expected, found
            ),
            Self::ArgumentKindMismatch {
                member,
                position,
                expected,
                found,
            } => write!(
                f,
                "Argument {} of '{}' is {}, declared {}",
                position, member, found, expected
            ),
            Self::UnknownSegment {
                identifier,
                segment,
                owner,
            } => write!(
                f,
                "Invalid label identifier '{}': member '{}' not found on {}",
                identifier, segment, owner
            ),
            Self::WrongAccessorKind {
                identifier,
                segment,
                expected,
            } => write!(
                f,
                "Invalid label identifier '{}': member '{}' is not {}",
                identifier, segment, expected
            ),
            Self::InvalidIdentifier(identifier) => {
                write!(f, "Invalid label identifier '{}'", identifier)
            }
            Self::NotInitialized => write!(f, "Registry has not been initialized"),
            Self::RootMismatch { expected, found } => write!(
                f,
                "Registry root mismatch: expected {}, registry holds {}",
                expected, found
            ),
            Self::DuplicateTag { owner, tag } => {
                write!(f, "Duplicate tag '{}' on {}", tag, owner)
            }
            Self::ProviderMismatch { expected } => {
                write!(f, "Provider mismatch: expected an instance of {}", expected)
            }
        }
    }
}

impl std::error::Error for LabelError {}
