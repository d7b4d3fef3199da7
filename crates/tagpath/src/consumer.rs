// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Label consumers.

use crate::compiler::CompiledShape;
use crate::error::Result;
use crate::value::ParameterMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Something that produces a label text from a provider.
pub trait LabelConsumer<R> {
    fn get_label(&self, provider: &R) -> Result<String>;
}

/// A compiled shape bound to one label's parameters.
///
/// Cheap to clone; consumers built from labels with the same identifier
/// share their shape.
pub struct Consumer<R> {
    shape: Arc<CompiledShape>,
    parameters: ParameterMap,
    _root: PhantomData<fn(&R)>,
}

impl<R: 'static> Consumer<R> {
    pub(crate) fn new(shape: Arc<CompiledShape>, parameters: ParameterMap) -> Self {
        Self {
            shape,
            parameters,
            _root: PhantomData,
        }
    }

    /// Evaluate against `provider`.
    pub fn get_label(&self, provider: &R) -> Result<String> {
        self.shape.execute(provider, &self.parameters)
    }

    /// Same shape, other parameters.
    #[must_use]
    pub fn with_parameters(&self, parameters: ParameterMap) -> Self {
        Self::new(Arc::clone(&self.shape), parameters)
    }

    pub fn identifier(&self) -> &str {
        self.shape.identifier()
    }

    pub fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    pub fn shape(&self) -> &Arc<CompiledShape> {
        &self.shape
    }
}

impl<R: 'static> LabelConsumer<R> for Consumer<R> {
    fn get_label(&self, provider: &R) -> Result<String> {
        Consumer::get_label(self, provider)
    }
}

impl<R> Clone for Consumer<R> {
    fn clone(&self) -> Self {
        Self {
            shape: Arc::clone(&self.shape),
            parameters: self.parameters.clone(),
            _root: PhantomData,
        }
    }
}

impl<R> fmt::Debug for Consumer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer")
            .field("identifier", &self.shape.identifier())
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// Closure-backed consumer, for labels that are not registry members.
pub struct FnConsumer<F>(F);

impl<F> FnConsumer<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<R, F> LabelConsumer<R> for FnConsumer<F>
where
    F: Fn(&R) -> String,
{
    fn get_label(&self, provider: &R) -> Result<String> {
        Ok((self.0)(provider))
    }
}

impl<F> fmt::Debug for FnConsumer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnConsumer")
    }
}
