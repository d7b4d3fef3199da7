// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared label provider for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use tagpath::{section, LabelCompiler, Registry};

#[derive(Debug, Default)]
pub struct LabelProvider {
    jobs: JobsSection,
    technologies: TechnologiesSection,
    ui: UiSection,
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

    #[label("ui")]
    pub fn ui(&self) -> &UiSection {
        &self.ui
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
}

#[derive(Debug, Default)]
pub struct UiSection {
    buttons: ButtonsSection,
}

#[section]
impl UiSection {
    #[label("btn")]
    pub fn buttons(&self) -> &ButtonsSection {
        &self.buttons
    }
}

#[derive(Debug, Default)]
pub struct ButtonsSection;

#[section]
impl ButtonsSection {
    #[label("ok")]
    pub fn ok(&self) -> &'static str {
        "OK"
    }

    #[label("save")]
    pub fn save(&self, item: String, #[label("n")] count: u32, ratio: f64) -> String {
        format!("Save {} {} ({:.1})", count, item, ratio)
    }
}

pub fn setup() -> (Arc<Registry>, LabelCompiler<LabelProvider>) {
    let registry = Arc::new(Registry::new());
    registry
        .initialize::<LabelProvider>()
        .expect("initialize registry");
    let compiler = LabelCompiler::new(Arc::clone(&registry));
    (registry, compiler)
}
