// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Enumeration engines.
//!
//! An engine grows an [`ElementTable`] breadth-first from the generators,
//! in shortlex order of discovery words, stopping whenever a requested size
//! has been reached and resuming from saved state on the next call.
//!
//! # Architecture
//!
//! Two engines implement the [`EnumerationEngine`] trait:
//! - [`FastEngine`]: Froidure–Pin with the reduced-word shortcut. Products
//!   whose result can be read off the Cayley graphs are never multiplied.
//!   Supports incremental closure when generators are added.
//! - [`GenericEngine`]: multiplies every right and left product through the
//!   capability and records each coincidence as a candidate relation,
//!   reducing to a minimal set only when asked.
//!
//! Both engines discover elements in the same order, so positions, words,
//! Cayley graphs and relations agree between them for the same generators.
//! [`BackendSelector`] picks one from the element type tag.
//!
//! Engines are 0-based throughout and use [`UNDEFINED`] for missing entries.
//! Translation to the 1-based outward numbering happens in the facade.
//!
//! # Example
//!
//! ```
//! use semigroup_enum::element::MultiplicationTable;
//! use semigroup_enum::engine::{EngineContext, EnumerationEngine, FastEngine};
//! use semigroup_enum::state::Statistics;
//!
//! // Cyclic group of order 5, generated by 1.
//! let table = MultiplicationTable::from_fn(5, |i, j| (i + j) % 5).unwrap();
//! let mut stats = Statistics::new();
//! let mut ctx = EngineContext::new(&table, &mut stats);
//! let mut engine = FastEngine::new(&mut ctx, &[table.element(1).unwrap()]);
//! engine.run(&mut ctx, usize::MAX).unwrap();
//! assert!(engine.is_done());
//! assert_eq!(engine.table().len(), 5);
//! ```

pub mod fast;
pub mod generic;
pub mod selector;
pub mod table;

pub use fast::FastEngine;
pub use generic::GenericEngine;
pub use selector::BackendSelector;
pub use table::{CayleyTable, ElementTable, PositionIndex};

use std::fmt::Debug;

use crate::element::{ElementCapability, ElementHandle};
use crate::error::{EnumerationError, Result};
use crate::state::{Counters, Statistics};

/// Marker for a missing position or letter.
pub const UNDEFINED: usize = usize::MAX;

/// Which engine implementation is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum EngineKind {
    Fast,
    Generic,
}

/// Side of a Cayley graph: `Right` holds `x * g`, `Left` holds `g * x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Side {
    Left,
    Right,
}

/// A relation in engine coordinates.
///
/// Words are implied: a position stands for its discovery word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawRelation {
    /// Generator `letter` equals the element at `position`.
    Duplicate { letter: usize, position: usize },
    /// `word(position) · letter` equals `word(result)`.
    Product {
        position: usize,
        letter: usize,
        result: usize,
    },
}

/// What an engine may use while it runs: the capability, and the counters
/// to charge for the work.
pub struct EngineContext<'a, H> {
    pub capability: &'a dyn ElementCapability<Handle = H>,
    pub statistics: &'a mut Statistics,
}

impl<'a, H: ElementHandle> EngineContext<'a, H> {
    pub fn new(
        capability: &'a dyn ElementCapability<Handle = H>,
        statistics: &'a mut Statistics,
    ) -> Self {
        Self {
            capability,
            statistics,
        }
    }

    /// Multiply through the capability, counting the product.
    pub fn product(&mut self, a: H, b: H) -> H {
        self.statistics.increment_counter(Counters::Products);
        self.capability.product(a, b)
    }
}

/// Contract shared by both engines.
///
/// An engine owns its element table and any algorithm state needed to
/// resume. It never touches the facade's caches.
pub trait EnumerationEngine<H: ElementHandle>: Debug {
    fn kind(&self) -> EngineKind;

    fn table(&self) -> &ElementTable<H>;

    /// Whether every product of every known element with every generator is known.
    fn is_done(&self) -> bool;

    /// Grow until the table holds at least `target` elements or is closed.
    fn run(&mut self, ctx: &mut EngineContext<'_, H>, target: usize) -> Result<()>;

    /// Number of leading rows of the given Cayley graph that are fully defined.
    fn complete_rows(&self, side: Side) -> usize;

    /// Relations defining the structure, in position order.
    ///
    /// Complete only once [`is_done`](Self::is_done) holds.
    fn relations(&self) -> Vec<RawRelation>;

    /// Number of relations known so far.
    fn nr_rules(&self) -> usize;

    /// Whether [`add_generators`](Self::add_generators) keeps the existing table.
    fn supports_closure(&self) -> bool {
        false
    }

    /// Extend the generating set, keeping every existing position.
    fn add_generators(&mut self, _ctx: &mut EngineContext<'_, H>, _generators: &[H]) -> Result<()> {
        Err(EnumerationError::UnsupportedOperation(format!(
            "{} engine cannot extend its generators in place",
            self.kind()
        )))
    }

    /// A word for `position` found by searching the engine's own structures.
    fn word(&self, position: usize) -> Result<Vec<usize>> {
        self.table().word(position)
    }

    /// Position of the product of the elements at `i` and `j`.
    fn product_by_position(
        &self,
        _ctx: &mut EngineContext<'_, H>,
        i: usize,
        j: usize,
    ) -> Result<Option<usize>> {
        self.table().product_by_reduction(i, j)
    }

    /// Number of idempotents, if the engine counts them itself.
    fn count_idempotents(&self, _ctx: &mut EngineContext<'_, H>) -> Option<usize> {
        None
    }

    fn boxed_clone(&self) -> Box<dyn EnumerationEngine<H>>;
}

/// Minimal relation set from a closed shortlex table.
///
/// Keeps the duplicate generators, then every pair `(i, j)` whose product
/// is not the one that discovered its result, unless that coincidence is
/// already implied by the suffix of `i`.
pub(crate) fn minimal_relations<H: ElementHandle>(
    table: &ElementTable<H>,
    rows: usize,
) -> Vec<RawRelation> {
    let mut relations: Vec<RawRelation> = table
        .duplicates()
        .iter()
        .map(|&(letter, position)| RawRelation::Duplicate { letter, position })
        .collect();
    for i in 0..rows {
        let s = table.suffix(i);
        for j in 0..table.nr_generators() {
            if is_minimal_rule(table, i, j, s) {
                relations.push(RawRelation::Product {
                    position: i,
                    letter: j,
                    result: table.right(i, j),
                });
            }
        }
    }
    relations
}

pub(crate) fn is_minimal_rule<H: ElementHandle>(
    table: &ElementTable<H>,
    i: usize,
    j: usize,
    s: usize,
) -> bool {
    table.right(i, j) != UNDEFINED
        && !table.is_reduced(i, j)
        && (s == UNDEFINED || table.is_reduced(s, j))
}
