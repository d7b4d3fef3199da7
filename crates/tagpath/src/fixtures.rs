// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Section fixtures shared by unit tests.

use crate::{section, Members, Parameter, Section, Value};

// ---------------------------------------------------------------------------
// Provider (generated registration)
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LabelProvider {
    jobs: JobsSection,
    technologies: TechnologiesSection,
}

#[section]
impl LabelProvider {
    #[label("j")]
    pub fn jobs(&self) -> &JobsSection {
        &self.jobs
    }

    #[label("t")]
    pub fn technologies(&self) -> &TechnologiesSection {
        &self.technologies
    }
}

#[derive(Debug, Default)]
pub struct JobsSection;

#[section]
impl JobsSection {
    #[label("dev")]
    pub fn dev(&self, #[label("xp")] experience: String) -> String {
        format!("{} Software Developer", experience)
    }

    #[label("qa")]
    pub fn qa(&self) -> &'static str {
        "Quality Assurance Engineer"
    }

    #[label("pm")]
    pub fn pm(&self) -> String {
        "Project Manager".to_string()
    }

    /// Deliberately untagged.
    pub fn test(&self) -> String {
        "Test".to_string()
    }
}

#[derive(Debug, Default)]
pub struct TechnologiesSection;

#[section]
impl TechnologiesSection {
    #[label("c#")]
    pub fn csharp(
        &self,
        #[label("asp")] with_asp: bool,
        #[label("ef")] with_ef: bool,
        #[label("blazor")] with_blazor: bool,
    ) -> String {
        let mut parts = vec!["C#"];
        if with_asp {
            parts.push("ASP.NET Core");
        }
        if with_ef {
            parts.push("EF Core");
        }
        if with_blazor {
            parts.push("Blazor");
        }
        parts.join("; ")
    }

    #[label("exp")]
    pub fn experience(&self, years: i32) -> String {
        format!("{} year(s)", years)
    }
}

// ---------------------------------------------------------------------------
// Hand-written registrations for registry edge cases
// ---------------------------------------------------------------------------

/// Two members claiming tag `x`.
#[derive(Debug, Default)]
pub struct Colliding;

impl Section for Colliding {
    fn describe(members: &mut Members<'_, Self>) {
        members
            .value("first", "x", |_| "first".to_string())
            .value("second", "x", |_| "second".to_string())
            .value("other", "o", |_| "other".to_string());
    }
}

/// Tags that cannot round-trip through an identifier.
#[derive(Debug, Default)]
pub struct BadTags;

impl Section for BadTags {
    fn describe(members: &mut Members<'_, Self>) {
        members
            .value("blank", "  ", |_| "blank".to_string())
            .value("joined", "a_b", |_| "joined".to_string())
            .value("fine", "ok", |_| "fine".to_string());
    }
}

/// A section that contains itself.
#[derive(Debug, Default)]
pub struct Ring {
    pub name: String,
}

impl Section for Ring {
    fn describe(members: &mut Members<'_, Self>) {
        members
            .section::<Ring>("inner", "r", |ring| ring)
            .value("name", "n", |ring| ring.name.clone())
            .call(
                "greet",
                "g",
                [
                    Parameter::of::<String>("greeting").tagged("hi"),
                    Parameter::of::<u8>("times"),
                ],
                |ring, args: &[Value]| {
                    let greeting: String = crate::extract(args, 0);
                    let times: u8 = crate::extract(args, 1);
                    format!("{} {}", greeting, ring.name).repeat(usize::from(times))
                },
            );
    }
}

/// Unrelated root, for mismatch checks.
#[derive(Debug, Default)]
pub struct OtherRoot;

impl Section for OtherRoot {
    fn describe(members: &mut Members<'_, Self>) {
        members.value("only", "only", |_| "only".to_string());
    }
}
