// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Element capabilities.
//!
//! The enumeration core never performs element arithmetic itself. Every
//! equality test, product, hash, comparison and type query goes through an
//! [`ElementCapability`], and elements are referred to by small `Copy`
//! handles whose backing memory belongs to the capability.
//!
//! Two reference capabilities are provided:
//! - [`Transformations`]: an interning arena of full transformations. Its tag
//!   is a canonical encoding, so the fast engine is selected for it.
//! - [`MultiplicationTable`]: a semigroup given by its Cayley table. Its tag
//!   is [`TypeTag::Opaque`], so the generic engine is selected.

pub mod table;
pub mod transformation;

pub use table::{MultiplicationTable, TableElement};
pub use transformation::{Transformation, Transformations};

use std::cmp::Ordering;
use std::fmt::Debug;

/// Kind of element encoding, as reported by a capability.
///
/// Every tag except [`TypeTag::Opaque`] names a canonical encoding that the
/// fast engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum TypeTag {
    Transformation,
    PartialPerm,
    Bipartition,
    BooleanMatrix,
    MaxPlusMatrix,
    MinPlusMatrix,
    TropicalMaxPlusMatrix,
    TropicalMinPlusMatrix,
    ProjectiveMaxPlusMatrix,
    NaturalMatrix,
    IntegerMatrix,
    Pbr,
    Opaque,
}

impl TypeTag {
    /// Whether the encoding is one the fast engine recognizes.
    pub fn is_canonical(self) -> bool {
        !matches!(self, TypeTag::Opaque)
    }
}

/// Bounds every element handle satisfies.
pub trait ElementHandle: Copy + Debug + 'static {}

impl<T: Copy + Debug + 'static> ElementHandle for T {}

/// Equality, product, hash, total order and type information for element handles.
///
/// Implementations must be consistent: `equal(a, b)` implies
/// `hash(a) == hash(b)` and `compare(a, b) == Ordering::Equal`, and
/// `product` must be associative.
pub trait ElementCapability {
    /// Small copyable identifier for one element.
    type Handle: ElementHandle;

    fn equal(&self, a: Self::Handle, b: Self::Handle) -> bool;

    /// The product `a * b` ("a then b").
    fn product(&self, a: Self::Handle, b: Self::Handle) -> Self::Handle;

    fn hash(&self, a: Self::Handle) -> u64;

    /// Total order used for sorted access.
    fn compare(&self, a: Self::Handle, b: Self::Handle) -> Ordering;

    fn type_tag(&self, a: Self::Handle) -> TypeTag;

    fn degree(&self, a: Self::Handle) -> usize;
}

/// Evaluate a word of 1-based generator letters as a left-to-right product.
///
/// Returns `None` for an empty word or a letter outside `generators`.
pub fn evaluate<C: ElementCapability>(
    capability: &C,
    generators: &[C::Handle],
    word: &[usize],
) -> Option<C::Handle> {
    let mut letters = word.iter();
    let first = generator_for(generators, *letters.next()?)?;
    letters.try_fold(first, |acc, &letter| {
        generator_for(generators, letter).map(|g| capability.product(acc, g))
    })
}

fn generator_for<H: Copy>(generators: &[H], letter: usize) -> Option<H> {
    letter.checked_sub(1).and_then(|i| generators.get(i)).copied()
}
