// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Navigation path descriptions consumed by the encoder.
//!
//! A [`PathExpr`] is a chain of value reads from a root section, optionally
//! terminated by one call with argument expressions. [`Path`] builds such a
//! chain while tracking the section type it currently points at, so every
//! step names a member of the right section:
//!
//! ```
//! use tagpath::{ArgExpr, Path, PathExpr};
//!
//! struct Provider;
//! struct Jobs;
//!
//! let expr: PathExpr = Path::<Provider>::root()
//!     .section::<Jobs>("jobs")
//!     .call("dev", [ArgExpr::from("Senior")]);
//! assert_eq!(expr.to_string(), "Provider.jobs.dev(\"Senior\")");
//! ```
//!
//! Sections annotated with `#[section]` also get a generated `<Type>Path`
//! extension trait with one method per tagged member. Its call methods take
//! [`Arg<T>`] for each declared parameter type `T`, so a mistyped argument
//! does not compile.

use crate::registry::{MemberRef, SectionKey};
use crate::value::{ParamValue, Value};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

/// Value-read chain starting at a root section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavPath {
    pub root: SectionKey,
    pub steps: Vec<MemberRef>,
}

impl NavPath {
    pub fn new(root: SectionKey) -> Self {
        Self {
            root,
            steps: Vec::new(),
        }
    }
}

/// A complete navigation expression.
#[derive(Debug, Clone, PartialEq)]
pub enum PathExpr {
    /// A chain of value reads (the last one is the label).
    Read(NavPath),
    /// A chain of value reads followed by a call.
    Call {
        target: NavPath,
        member: MemberRef,
        args: Vec<ArgExpr>,
    },
}

impl PathExpr {
    pub fn root(&self) -> SectionKey {
        match self {
            Self::Read(path) => path.root,
            Self::Call { target, .. } => target.root,
        }
    }

    /// Every member on the path, root to leaf.
    pub fn members(&self) -> Vec<MemberRef> {
        match self {
            Self::Read(path) => path.steps.clone(),
            Self::Call { target, member, .. } => {
                let mut members = target.steps.clone();
                members.push(*member);
                members
            }
        }
    }
}

impl fmt::Display for PathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (path, call) = match self {
            Self::Read(path) => (path, None),
            Self::Call {
                target,
                member,
                args,
            } => (target, Some((member, args))),
        };
        f.write_str(path.root.short_name())?;
        for step in &path.steps {
            write!(f, ".{}", step.name)?;
        }
        if let Some((member, args)) = call {
            write!(f, ".{}(", member.name)?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", arg)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// Call argument expression.
///
/// Only arguments whose value is known when the path is described can be
/// encoded; the last two shapes are rejected by the encoder.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgExpr {
    /// A literal constant.
    Literal(Value),
    /// A local value captured by the describing code.
    Captured { name: &'static str, value: Value },
    /// A `const`/`static` item.
    Static { path: &'static str, value: Value },
    /// A value read from the provider itself.
    Provider(Box<PathExpr>),
    /// Any runtime computation (operator, function call...).
    Computed(String),
}

impl ArgExpr {
    pub fn captured(name: &'static str, value: impl Into<Value>) -> Self {
        Self::Captured {
            name,
            value: value.into(),
        }
    }

    pub fn constant(path: &'static str, value: impl Into<Value>) -> Self {
        Self::Static {
            path,
            value: value.into(),
        }
    }

    pub fn computed(description: impl Into<String>) -> Self {
        Self::Computed(description.into())
    }
}

impl fmt::Display for ArgExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(Value::Str(s)) => write!(f, "{:?}", s),
            Self::Literal(Value::Null) => f.write_str("null"),
            Self::Literal(v) => write!(f, "{}", v),
            Self::Captured { name, .. } => f.write_str(name),
            Self::Static { path, .. } => f.write_str(path),
            Self::Provider(expr) => write!(f, "{}", expr),
            Self::Computed(description) => write!(f, "<{}>", description),
        }
    }
}

macro_rules! literal_arg {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ArgExpr {
                fn from(v: $ty) -> Self {
                    Self::Literal(Value::from(v))
                }
            }
        )*
    };
}

literal_arg!(bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, String, &str);

impl From<Value> for ArgExpr {
    fn from(v: Value) -> Self {
        Self::Literal(v)
    }
}

impl From<PathExpr> for ArgExpr {
    fn from(expr: PathExpr) -> Self {
        Self::Provider(Box::new(expr))
    }
}

/// Argument for a parameter declared with type `T`.
///
/// Literals convert with `From`; the other [`ArgExpr`] shapes have named
/// constructors that keep the `T` check.
pub struct Arg<T> {
    expr: ArgExpr,
    _ty: PhantomData<fn() -> T>,
}

impl<T: ParamValue + Into<Value>> Arg<T> {
    fn wrap(expr: ArgExpr) -> Self {
        Self {
            expr,
            _ty: PhantomData,
        }
    }

    pub fn captured(name: &'static str, value: impl Into<T>) -> Self {
        Self::wrap(ArgExpr::captured(name, value.into()))
    }

    pub fn constant(path: &'static str, value: impl Into<T>) -> Self {
        Self::wrap(ArgExpr::constant(path, value.into()))
    }

    /// Value read from the provider; the encoder rejects it.
    pub fn provider(expr: PathExpr) -> Self {
        Self::wrap(ArgExpr::Provider(Box::new(expr)))
    }

    /// Runtime computation; the encoder rejects it.
    pub fn computed(description: impl Into<String>) -> Self {
        Self::wrap(ArgExpr::computed(description))
    }

    pub fn into_expr(self) -> ArgExpr {
        self.expr
    }
}

impl<T: ParamValue + Into<Value>> From<T> for Arg<T> {
    fn from(value: T) -> Self {
        Self::wrap(ArgExpr::Literal(value.into()))
    }
}

impl From<&str> for Arg<String> {
    fn from(value: &str) -> Self {
        Self::wrap(ArgExpr::Literal(Value::from(value)))
    }
}

impl<T> From<Arg<T>> for ArgExpr {
    fn from(arg: Arg<T>) -> Self {
        arg.expr
    }
}

impl<T> Clone for Arg<T> {
    fn clone(&self) -> Self {
        Self {
            expr: self.expr.clone(),
            _ty: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Arg<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Arg").field(&self.expr).finish()
    }
}

/// Typed path builder pointing at section `S`.
pub struct Path<S> {
    nav: NavPath,
    _section: PhantomData<fn() -> S>,
}

impl<S: Any> Path<S> {
    /// Empty path at root section `S`.
    pub fn root() -> Self {
        Self {
            nav: NavPath::new(SectionKey::of::<S>()),
            _section: PhantomData,
        }
    }

    fn member(name: &'static str) -> MemberRef {
        MemberRef::new(SectionKey::of::<S>(), name)
    }

    /// Step into nested section `C` through member `name`.
    pub fn section<C: Any>(mut self, name: &'static str) -> Path<C> {
        self.nav.steps.push(Self::member(name));
        Path {
            nav: self.nav,
            _section: PhantomData,
        }
    }

    /// Finish with a read of member `name`.
    pub fn value(mut self, name: &'static str) -> PathExpr {
        self.nav.steps.push(Self::member(name));
        PathExpr::Read(self.nav)
    }

    /// Finish with a call of member `name`.
    pub fn call(self, name: &'static str, args: impl IntoIterator<Item = ArgExpr>) -> PathExpr {
        PathExpr::Call {
            target: self.nav,
            member: Self::member(name),
            args: args.into_iter().collect(),
        }
    }

    /// Steps taken so far.
    pub fn nav(&self) -> &NavPath {
        &self.nav
    }
}

impl<S> Clone for Path<S> {
    fn clone(&self) -> Self {
        Self {
            nav: self.nav.clone(),
            _section: PhantomData,
        }
    }
}

impl<S> fmt::Debug for Path<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Path").field(&self.nav).finish()
    }
}
