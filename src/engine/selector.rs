// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Choosing an engine for a generating set.

use log::debug;

use super::{EngineContext, EngineKind, EnumerationEngine, FastEngine, GenericEngine};
use crate::element::{ElementCapability, ElementHandle, TypeTag};
use crate::error::{EnumerationError, Result};
use crate::options::BackendPreference;

/// Inspects generators and builds the engine that will enumerate them.
pub struct BackendSelector;

impl BackendSelector {
    /// Check that `generators` is non-empty and of one type and degree.
    ///
    /// Returns the common type tag and degree.
    pub fn validate<C: ElementCapability + ?Sized>(
        capability: &C,
        generators: &[C::Handle],
    ) -> Result<(TypeTag, usize)> {
        let (&first, rest) = generators.split_first().ok_or_else(|| {
            EnumerationError::InvalidArgument("at least one generator is required".to_string())
        })?;
        let tag = capability.type_tag(first);
        let degree = capability.degree(first);
        Self::check_compatible(capability, rest, tag, degree)?;
        Ok((tag, degree))
    }

    /// Check that every handle has the given tag and degree.
    pub fn check_compatible<C: ElementCapability + ?Sized>(
        capability: &C,
        handles: &[C::Handle],
        tag: TypeTag,
        degree: usize,
    ) -> Result<()> {
        for (i, &x) in handles.iter().enumerate() {
            let (other_tag, other_degree) = (capability.type_tag(x), capability.degree(x));
            if other_tag != tag || other_degree != degree {
                return Err(EnumerationError::InvalidArgument(format!(
                    "element {} is a {} of degree {}, expected a {} of degree {}",
                    i, other_tag, other_degree, tag, degree
                )));
            }
        }
        Ok(())
    }

    pub fn choose(tag: TypeTag, preference: BackendPreference) -> EngineKind {
        match preference {
            BackendPreference::Auto if tag.is_canonical() => EngineKind::Fast,
            BackendPreference::Auto | BackendPreference::Generic => EngineKind::Generic,
        }
    }

    pub fn build<H: ElementHandle>(
        ctx: &mut EngineContext<'_, H>,
        generators: &[H],
        kind: EngineKind,
    ) -> Box<dyn EnumerationEngine<H>> {
        debug!(
            "building {} engine for {} generators",
            kind,
            generators.len()
        );
        match kind {
            EngineKind::Fast => Box::new(FastEngine::new(ctx, generators)),
            EngineKind::Generic => Box::new(GenericEngine::new(ctx, generators)),
        }
    }
}
