// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # tagpath - typed label paths
//!
//! Encodes a typed navigation path through nested "section" types into a
//! compact string identifier (`"j_dev"`) plus a parameter map, and compiles
//! such identifiers back into cached accessors that produce the label text
//! from a provider instance.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use tagpath::{section, LabelCompiler, LabelEncoder, Path, Registry, Result};
//!
//! pub struct Provider {
//!     jobs: Jobs,
//! }
//!
//! pub struct Jobs;
//!
//! #[section]
//! impl Provider {
//!     #[label("j")]
//!     pub fn jobs(&self) -> &Jobs {
//!         &self.jobs
//!     }
//! }
//!
//! #[section]
//! impl Jobs {
//!     #[label("dev")]
//!     pub fn dev(&self, #[label("xp")] experience: String) -> String {
//!         format!("{} Software Developer", experience)
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let registry = Arc::new(Registry::new());
//!     registry.initialize::<Provider>()?;
//!
//!     // Encode: typed path -> transmissible label
//!     let expr = Path::<Provider>::root().jobs().dev("Senior");
//!     let label = LabelEncoder::new(&registry).encode(&expr)?.expect("tagged");
//!     assert_eq!(label.identifier(), "j_dev");
//!
//!     // Decode: label -> cached consumer -> text
//!     let compiler = LabelCompiler::<Provider>::new(Arc::clone(&registry));
//!     let consumer = compiler.build(&label)?.expect("non-blank");
//!     assert_eq!(consumer.get_label(&Provider { jobs: Jobs })?, "Senior Software Developer");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +-------------------------------------------------------------------+
//! |  #[section] impl blocks  ->  Section::describe (static tables)     |
//! +-------------------------------------------------------------------+
//! |  Registry      (SectionKey, tag) <-> MemberRef, ParameterRef       |
//! +-------------------------------+-----------------------------------+
//! |  LabelEncoder                 |  LabelCompiler                    |
//! |  PathExpr -> Label            |  Label -> CompiledShape (cached)  |
//! |                               |        -> Consumer -> String      |
//! +-------------------------------+-----------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Registry`] | Tag tables built once from a root section |
//! | [`Path`] / [`PathExpr`] | Typed navigation path descriptions |
//! | [`LabelEncoder`] | Path -> [`Label`] |
//! | [`LabelCompiler`] | [`Label`] -> [`Consumer`], at most one compilation per identifier |
//! | [`Value`] | Untyped parameter value carried by labels |
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade with `[registry]`, `[encoder]`
//! and `[compiler]` prefixes; install any logger to see them.

// Generated code refers to `::tagpath`, including inside this crate.
extern crate self as tagpath;

/// Separator and registry settings
pub mod config;
/// Label compiler and compiled shapes
pub mod compiler;
/// Consumers produced by the compiler
pub mod consumer;
/// Path encoder
pub mod encoder;
/// Error types
pub mod error;
/// Label value object
pub mod label;
/// Navigation path descriptions
pub mod path;
/// Accessor registry
pub mod registry;
/// Parameter values
pub mod value;

pub use compiler::{CompiledShape, LabelCompiler};
pub use config::{CollisionPolicy, RegistryConfig};
pub use consumer::{Consumer, FnConsumer, LabelConsumer};
pub use encoder::LabelEncoder;
pub use error::{LabelError, Result};
pub use label::Label;
pub use path::{Arg, ArgExpr, NavPath, Path, PathExpr};
pub use registry::{MemberRef, Members, Parameter, ParameterRef, Registry, Section, SectionKey};
pub use value::{coerce, extract, ParamValue, ParameterMap, Value, ValueKind};

pub use tagpath_codegen::section; // Attribute macro (for #[tagpath::section])

#[cfg(test)]
mod fixtures;
