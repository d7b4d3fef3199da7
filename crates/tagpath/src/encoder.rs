// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Path encoder: [`PathExpr`] -> [`Label`].

use crate::error::{LabelError, Result};
use crate::label::Label;
use crate::path::{ArgExpr, PathExpr};
use crate::registry::{AccessorDescriptor, AccessorKind, MemberRef, Registry, ValueTarget};
use crate::value::Value;

/// Turns typed navigation paths into labels using the registry's tags.
#[derive(Debug, Clone, Copy)]
pub struct LabelEncoder<'r> {
    registry: &'r Registry,
}

impl<'r> LabelEncoder<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Encode `expr`.
    ///
    /// Returns `Ok(None)` when a member on the path carries no tag or the
    /// path does not start at the registry root; such paths simply have no
    /// label. Every label returned decodes back to the same accessors:
    /// inner steps must be sections, a read must end on a text value and a
    /// call on a call accessor whose parameter kinds match the arguments.
    pub fn encode(&self, expr: &PathExpr) -> Result<Option<Label>> {
        let root = self.registry.tables()?.root();
        if root != expr.root() {
            log::debug!(
                "[encoder] {} is not rooted at the registry root, no label",
                expr
            );
            return Ok(None);
        }

        let members = expr.members();
        if members.is_empty() {
            return Ok(None);
        }

        // Leaf to root, so the first untagged segment short-circuits.
        let mut descriptors = Vec::with_capacity(members.len());
        for member in members.iter().rev() {
            let Some(descriptor) = self.descriptor(member) else {
                log::debug!("[encoder] {} has no tag, no label for {}", member, expr);
                return Ok(None);
            };
            descriptors.push(descriptor);
        }
        descriptors.reverse();

        let mut label = Label::from_tags(descriptors.iter().map(|d| d.tag));
        let identifier = label.identifier().to_string();

        let mut owner = root;
        for (index, descriptor) in descriptors.iter().enumerate() {
            if descriptor.owner() != owner {
                return Err(LabelError::UnknownSegment {
                    identifier,
                    segment: descriptor.tag.to_string(),
                    owner: owner.name(),
                });
            }
            if index + 1 == descriptors.len() {
                break;
            }
            match &descriptor.kind {
                AccessorKind::Value(ValueTarget::Section { target, .. }) => owner = *target,
                AccessorKind::Value(ValueTarget::Text { .. }) => {
                    return Err(wrong_kind(identifier, descriptor.tag, "a section"));
                }
                AccessorKind::Call { .. } => {
                    return Err(wrong_kind(identifier, descriptor.tag, "a value accessor"));
                }
            }
        }

        let Some(leaf) = descriptors.last() else {
            return Ok(None);
        };
        match (expr, &leaf.kind) {
            (PathExpr::Read(_), AccessorKind::Value(ValueTarget::Text { .. })) => {}
            (PathExpr::Call { args, member, .. }, AccessorKind::Call { parameters, .. }) => {
                if parameters.len() != args.len() {
                    return Err(LabelError::ArityMismatch {
                        member: member.to_string(),
                        expected: parameters.len(),
                        found: args.len(),
                    });
                }
                for (position, (arg, parameter)) in args.iter().zip(parameters).enumerate() {
                    let value = evaluate(position, arg)?;
                    // Null stands for "absent" and decodes to the default.
                    if let Some(found) = value.kind() {
                        if found != parameter.kind {
                            return Err(LabelError::ArgumentKindMismatch {
                                member: member.to_string(),
                                position,
                                expected: parameter.kind,
                                found,
                            });
                        }
                    }
                    label.insert(parameter.tag, value);
                }
            }
            (PathExpr::Read(_), _) => {
                return Err(wrong_kind(identifier, leaf.tag, "a text value"));
            }
            (PathExpr::Call { .. }, _) => {
                return Err(wrong_kind(identifier, leaf.tag, "a call"));
            }
        }

        Ok(Some(label))
    }

    /// Descriptor `member` is registered as, if it carries a tag.
    fn descriptor(&self, member: &MemberRef) -> Option<&'r AccessorDescriptor> {
        let tag = self.registry.tag_of(member)?;
        self.registry
            .resolve(member.owner, tag)
            .filter(|descriptor| descriptor.member == *member)
    }
}

fn wrong_kind(identifier: String, segment: &str, expected: &'static str) -> LabelError {
    LabelError::WrongAccessorKind {
        identifier,
        segment: segment.to_string(),
        expected,
    }
}

/// Value of an argument known at description time.
fn evaluate(position: usize, arg: &ArgExpr) -> Result<Value> {
    match arg {
        ArgExpr::Literal(value)
        | ArgExpr::Captured { value, .. }
        | ArgExpr::Static { value, .. } => Ok(value.clone()),
        ArgExpr::Provider(expr) => Err(LabelError::UnsupportedArgument {
            position,
            reason: format!("'{}' reads the provider", expr),
        }),
        ArgExpr::Computed(description) => Err(LabelError::UnsupportedArgument {
            position,
            reason: format!("'{}' is computed at runtime", description),
        }),
    }
}
