// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The enumeration facade.
//!
//! [`EnumerationFacade`] is the one entry point callers use. It owns an
//! engine chosen by the [`BackendSelector`] and every cache derived from
//! the engine's table, grows the table lazily in batches just far enough to
//! answer each query, and memoizes what it computes.
//!
//! # Numbering
//!
//! Positions, letters inside words, Cayley graph entries and snapshot
//! records are 1-based here. Position `0` is never valid.
//!
//! # Growth
//!
//! Every query that needs more elements runs growth steps of at most
//! `batch_size` new elements each, checking after each step whether the
//! request is satisfied. A step never restarts enumeration. The lifecycle
//! is tracked in [`FacadeState`].
//!
//! # Example
//!
//! ```
//! use semigroup_enum::element::Transformations;
//! use semigroup_enum::facade::EnumerationFacade;
//! use semigroup_enum::options::EnumerationOptions;
//!
//! let arena = Transformations::new();
//! let gens = [arena.make(&[1, 2, 0]).unwrap(), arena.make(&[1, 0, 2]).unwrap()];
//! let mut facade = EnumerationFacade::create(&arena, &gens, EnumerationOptions::default()).unwrap();
//!
//! assert_eq!(facade.size().unwrap(), 6);
//! let swap = facade.element_at(2).unwrap();
//! assert_eq!(facade.position(swap).unwrap(), Some(2));
//! assert_eq!(facade.factorization(2).unwrap(), vec![2]);
//! ```

pub mod iter;
pub mod snapshot;

pub use iter::{Cursor, Elements, Order};
pub use snapshot::Snapshot;

use std::fmt;

use log::{debug, error, log, Level};

use crate::element::{ElementCapability, TypeTag};
use crate::engine::{
    BackendSelector, EngineContext, EngineKind, EnumerationEngine, RawRelation, Side, UNDEFINED,
};
use crate::error::{EnumerationError, Result};
use crate::memo::{self, FactorizationCache, Relation, SortedIndex, Word};
use crate::options::EnumerationOptions;
use crate::state::{Counters, FacadeState, Statistics};

/// How far [`EnumerationFacade::enumerate`] should grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// Stop once at least this many elements are known.
    AtLeast(usize),
    /// Run to completion.
    Unbounded,
}

impl From<usize> for Limit {
    fn from(n: usize) -> Self {
        Limit::AtLeast(n)
    }
}

/// One side of the Cayley graph, restricted to its complete rows.
///
/// Rows are indexed by position and columns by letter, both 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CayleyGraph {
    side: Side,
    nr_generators: usize,
    rows: Vec<Vec<usize>>,
}

impl CayleyGraph {
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn nr_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn nr_generators(&self) -> usize {
        self.nr_generators
    }

    /// Row for `position`, if that row is complete.
    pub fn row(&self, position: usize) -> Option<&[usize]> {
        position
            .checked_sub(1)
            .and_then(|p| self.rows.get(p))
            .map(Vec::as_slice)
    }

    /// Position of the product of `position` and generator `letter`.
    pub fn get(&self, position: usize, letter: usize) -> Option<usize> {
        let row = self.row(position)?;
        letter.checked_sub(1).and_then(|j| row.get(j)).copied()
    }

    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }
}

/// Incrementally growable, memoized view of the semigroup generated by a
/// set of elements.
///
/// The facade borrows the capability, which must outlive it, and holds
/// element handles by value.
pub struct EnumerationFacade<'a, C: ElementCapability> {
    capability: &'a C,
    engine: Box<dyn EnumerationEngine<C::Handle>>,
    options: EnumerationOptions,
    tag: TypeTag,
    degree: usize,
    state: FacadeState,
    statistics: Statistics,
    words: FactorizationCache,
    sorted: Option<SortedIndex>,
    relations: Option<Vec<Relation>>,
    idempotents: Option<usize>,
}

impl<'a, C: ElementCapability> EnumerationFacade<'a, C> {
    /// Validate the generators, pick an engine and wrap it.
    ///
    /// Fails with [`EnumerationError::InvalidArgument`] if `generators` is
    /// empty, mixes element types or degrees, or `options` is invalid.
    pub fn create(
        capability: &'a C,
        generators: &[C::Handle],
        options: EnumerationOptions,
    ) -> Result<Self> {
        options.validate()?;
        let (tag, degree) = BackendSelector::validate(capability, generators)?;
        let kind = BackendSelector::choose(tag, options.backend);
        let mut statistics = Statistics::new();
        let engine = {
            let mut ctx = Self::context(capability, &mut statistics);
            BackendSelector::build(&mut ctx, generators, kind)
        };
        debug!(
            "created facade: {} generators of type {} and degree {}, {} engine",
            generators.len(),
            tag,
            degree,
            kind
        );
        Ok(Self {
            capability,
            engine,
            options,
            tag,
            degree,
            state: FacadeState::Created,
            statistics,
            words: FactorizationCache::new(),
            sorted: None,
            relations: None,
            idempotents: None,
        })
    }

    /// [`create`](Self::create) with default options.
    pub fn new(capability: &'a C, generators: &[C::Handle]) -> Result<Self> {
        Self::create(capability, generators, EnumerationOptions::default())
    }

    fn context<'s>(
        capability: &'s C,
        statistics: &'s mut Statistics,
    ) -> EngineContext<'s, C::Handle> {
        EngineContext::new(capability, statistics)
    }

    // Growth

    /// Grow until at least `limit` elements are known, or to completion.
    ///
    /// A limit already satisfied is a no-op. `Limit::AtLeast(0)` is
    /// rejected.
    pub fn enumerate(&mut self, limit: impl Into<Limit>) -> Result<()> {
        match limit.into() {
            Limit::AtLeast(0) => Err(EnumerationError::InvalidArgument(
                "limit must be positive".to_string(),
            )),
            Limit::AtLeast(n) => self.grow_to(n),
            Limit::Unbounded => self.run_to_completion("enumerate"),
        }
    }

    fn run_to_completion(&mut self, operation: &str) -> Result<()> {
        self.require_full(operation)?;
        self.grow_to(usize::MAX)
    }

    fn grow_to(&mut self, target: usize) -> Result<()> {
        while !self.engine.is_done() && self.current_size() < target {
            self.step(target)?;
        }
        Ok(())
    }

    /// Run one growth step of at most `batch_size` new elements.
    fn step(&mut self, target: usize) -> Result<()> {
        let before = self.current_size();
        let step_target = target.min(before.saturating_add(self.options.batch_size));
        self.state = FacadeState::Growing;
        let result = {
            let mut ctx = Self::context(self.capability, &mut self.statistics);
            self.engine.run(&mut ctx, step_target)
        };
        self.check_fatal(result)?;
        self.statistics.increment_counter(Counters::Batches);

        let after = self.current_size();
        if after != before {
            self.sorted = None;
            self.relations = None;
            self.idempotents = None;
        }
        self.state = if self.engine.is_done() {
            FacadeState::Done
        } else {
            FacadeState::Idle
        };
        let level = if self.options.report {
            Level::Info
        } else {
            Level::Debug
        };
        log!(
            level,
            "batch {}: {} elements (+{}), {} rules, state {}",
            self.statistics.get(Counters::Batches),
            after,
            after - before,
            self.engine.nr_rules(),
            self.state
        );
        Ok(())
    }

    fn require_full(&self, operation: &str) -> Result<()> {
        if self.options.allow_full_enumeration || self.engine.is_done() {
            Ok(())
        } else {
            Err(EnumerationError::UnsupportedOperation(format!(
                "{} needs a complete enumeration, which the options forbid",
                operation
            )))
        }
    }

    fn check_fatal<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            if err.is_fatal() {
                error!("{} engine: {}", self.engine.kind(), err);
            }
        }
        result
    }

    // Size and membership

    /// Total number of elements, enumerating to completion.
    pub fn size(&mut self) -> Result<usize> {
        self.run_to_completion("size")?;
        Ok(self.current_size())
    }

    /// Number of elements discovered so far.
    pub fn current_size(&self) -> usize {
        self.engine.table().len()
    }

    pub fn is_done(&self) -> bool {
        self.engine.is_done()
    }

    /// Element at `position` in discovery order, growing as far as needed.
    pub fn element_at(&mut self, position: usize) -> Result<C::Handle> {
        Self::check_nonzero(position)?;
        self.grow_to(position)?;
        let index = self.check_current(position)?;
        Ok(self.engine.table().element(index))
    }

    /// Element of rank `position` in the capability's order.
    pub fn element_at_sorted(&mut self, position: usize) -> Result<C::Handle> {
        Self::check_nonzero(position)?;
        self.sorted_index()?;
        let rank = self.check_current(position)?;
        let index = self.sorted_index()?.position_at(rank);
        Ok(self.engine.table().element(index))
    }

    /// Position of `x`, growing in batches until found or exhausted.
    pub fn position(&mut self, x: C::Handle) -> Result<Option<usize>> {
        self.check_compatible(x)?;
        loop {
            if let Some(position) = self.lookup(x) {
                return Ok(Some(position));
            }
            if self.engine.is_done() {
                return Ok(None);
            }
            self.step(usize::MAX)?;
        }
    }

    /// Position of `x` among the elements discovered so far. Never grows.
    pub fn position_current(&self, x: C::Handle) -> Result<Option<usize>> {
        self.check_compatible(x)?;
        Ok(self.lookup(x))
    }

    /// Rank of `x` in the capability's order, 1-based.
    pub fn position_sorted(&mut self, x: C::Handle) -> Result<Option<usize>> {
        self.run_to_completion("sorted position")?;
        match self.position(x)? {
            Some(position) => Ok(Some(self.sorted_index()?.rank_of(position - 1) + 1)),
            None => Ok(None),
        }
    }

    fn lookup(&self, x: C::Handle) -> Option<usize> {
        self.engine.table().find(self.capability, x).map(|p| p + 1)
    }

    fn sorted_index(&mut self) -> Result<&SortedIndex> {
        self.run_to_completion("sorted access")?;
        let capability = self.capability;
        let table = self.engine.table();
        Ok(self
            .sorted
            .get_or_insert_with(|| SortedIndex::build::<C::Handle>(capability, table.elements())))
    }

    /// Every element, in discovery order.
    pub fn elements(&mut self) -> Result<Vec<C::Handle>> {
        self.run_to_completion("elements")?;
        Ok(self.engine.table().elements().to_vec())
    }

    /// Every element, in the capability's order.
    pub fn sorted_elements(&mut self) -> Result<Vec<C::Handle>> {
        let order = self.sorted_index()?.order().to_vec();
        let table = self.engine.table();
        Ok(order.into_iter().map(|p| table.element(p)).collect())
    }

    // Generators

    /// Extend the generating set.
    ///
    /// Engines that support it keep the current table and words. Otherwise
    /// every cache is discarded and the table is rebuilt from the current
    /// elements followed by the new generators; existing positions are kept
    /// either way.
    pub fn add_generators(&mut self, generators: &[C::Handle]) -> Result<()> {
        if generators.is_empty() {
            return Err(EnumerationError::InvalidArgument(
                "no generators to add".to_string(),
            ));
        }
        BackendSelector::check_compatible(self.capability, generators, self.tag, self.degree)?;

        if self.engine.supports_closure() {
            let result = {
                let mut ctx = Self::context(self.capability, &mut self.statistics);
                self.engine.add_generators(&mut ctx, generators)
            };
            self.check_fatal(result)?;
            self.sorted = None;
            self.relations = None;
            self.idempotents = None;
        } else {
            self.rebuild(generators);
        }
        self.state = FacadeState::Growing;
        Ok(())
    }

    fn rebuild(&mut self, generators: &[C::Handle]) {
        let table = self.engine.table();
        let existing = table.len();
        let mut union: Vec<C::Handle> = table.elements().to_vec();
        for &x in generators {
            let known = table.find(self.capability, x).is_some()
                || union[existing..]
                    .iter()
                    .any(|&y| self.capability.equal(x, y));
            if !known {
                union.push(x);
            }
        }
        debug!(
            "rebuilding {} engine from {} generators ({} new)",
            self.engine.kind(),
            union.len(),
            union.len() - existing
        );
        let kind = self.engine.kind();
        self.statistics.increment_counter(Counters::Rebuilds);
        self.engine = {
            let mut ctx = Self::context(self.capability, &mut self.statistics);
            BackendSelector::build(&mut ctx, &union, kind)
        };
        self.words.clear();
        self.sorted = None;
        self.relations = None;
        self.idempotents = None;
    }

    /// A new facade for the structure generated by these generators and
    /// `generators`, leaving `self` untouched.
    ///
    /// Generators already in the structure are skipped.
    pub fn closure(&self, generators: &[C::Handle]) -> Result<Self> {
        if generators.is_empty() {
            return Err(EnumerationError::InvalidArgument(
                "no generators to add".to_string(),
            ));
        }
        let mut result = self.clone();
        let mut fresh: Vec<C::Handle> = Vec::new();
        for &x in generators {
            if result.position(x)?.is_none()
                && !fresh.iter().any(|&y| self.capability.equal(x, y))
            {
                fresh.push(x);
            }
        }
        if !fresh.is_empty() {
            result.add_generators(&fresh)?;
        }
        Ok(result)
    }

    /// Generator with the given 1-based letter.
    pub fn generator(&self, letter: usize) -> Result<C::Handle> {
        letter
            .checked_sub(1)
            .and_then(|i| self.engine.table().generators().get(i))
            .copied()
            .ok_or_else(|| {
                EnumerationError::InvalidArgument(format!(
                    "letter {} is not one of the {} generators",
                    letter,
                    self.nr_generators()
                ))
            })
    }

    pub fn generators(&self) -> &[C::Handle] {
        self.engine.table().generators()
    }

    pub fn nr_generators(&self) -> usize {
        self.engine.table().nr_generators()
    }

    // Words

    /// A word over the generators equal to the element at `position`.
    ///
    /// Served from the cache, or by extending a cached neighbor by one
    /// letter, and only otherwise by walking the engine's tree.
    pub fn factorization(&mut self, position: usize) -> Result<Word> {
        Self::check_nonzero(position)?;
        let index = self.check_current(position)?;
        if let Some(word) = self.words.get(index) {
            return Ok(word.clone());
        }
        let table = self.engine.table();
        let word = if let Some(word) = self.words.extend_from_neighbor(table, index) {
            self.statistics
                .increment_counter(Counters::CachedWordExtensions);
            word
        } else if table.prefix(index) == UNDEFINED {
            vec![table.final_letter(index) + 1]
        } else {
            self.statistics.increment_counter(Counters::WordSearches);
            let word = self.engine.word(index);
            self.check_fatal(word)?
                .into_iter()
                .map(|letter| letter + 1)
                .collect()
        };
        self.words.insert(index, word.clone());
        Ok(word)
    }

    pub fn word_length(&mut self, position: usize) -> Result<usize> {
        Ok(self.factorization(position)?.len())
    }

    /// Length of the longest discovery word so far.
    pub fn current_max_word_length(&self) -> usize {
        self.engine.table().max_length()
    }

    // Schreier tree

    /// Position reached by deleting the last letter, `None` for a generator.
    pub fn prefix(&self, position: usize) -> Result<Option<usize>> {
        let index = self.check_position(position)?;
        Ok(Self::one_based(self.engine.table().prefix(index)))
    }

    /// Position equal to the element with its first letter deleted, `None` for a generator.
    pub fn suffix(&self, position: usize) -> Result<Option<usize>> {
        let index = self.check_position(position)?;
        Ok(Self::one_based(self.engine.table().suffix(index)))
    }

    pub fn first_letter(&self, position: usize) -> Result<usize> {
        let index = self.check_position(position)?;
        Ok(self.engine.table().first_letter(index) + 1)
    }

    pub fn final_letter(&self, position: usize) -> Result<usize> {
        let index = self.check_position(position)?;
        Ok(self.engine.table().final_letter(index) + 1)
    }

    // Derived artifacts

    /// The defining relations, enumerating to completion.
    pub fn relations(&mut self) -> Result<&[Relation]> {
        if self.relations.is_none() {
            self.run_to_completion("relations")?;
            let raw = self.engine.relations();
            let mut relations = Vec::with_capacity(raw.len());
            for relation in raw {
                relations.push(self.relation_words(relation)?);
            }
            self.relations = Some(relations);
        }
        Ok(self.relations.as_deref().unwrap_or_default())
    }

    fn relation_words(&mut self, relation: RawRelation) -> Result<Relation> {
        match relation {
            RawRelation::Duplicate { letter, position } => Ok(Relation::new(
                vec![letter + 1],
                self.factorization(position + 1)?,
            )),
            RawRelation::Product {
                position,
                letter,
                result,
            } => {
                let mut lhs = self.factorization(position + 1)?;
                lhs.push(letter + 1);
                Ok(Relation::new(lhs, self.factorization(result + 1)?))
            }
        }
    }

    /// Number of relations known so far. Never grows.
    pub fn current_nr_rules(&self) -> usize {
        self.engine.nr_rules()
    }

    /// One side of the Cayley graph over the rows known to be complete.
    pub fn cayley_graph(&self, side: Side) -> CayleyGraph {
        let rows = self.engine.complete_rows(side);
        let graph = self.engine.table().graph(side);
        CayleyGraph {
            side,
            nr_generators: self.nr_generators(),
            rows: (0..rows)
                .map(|i| graph.row(i).iter().map(|&p| p + 1).collect())
                .collect(),
        }
    }

    /// Position of the product of the elements at positions `i` and `j`.
    pub fn product_by_position(&mut self, i: usize, j: usize) -> Result<usize> {
        self.run_to_completion("product by position")?;
        let (a, b) = (self.check_position(i)?, self.check_position(j)?);
        let result = {
            let mut ctx = Self::context(self.capability, &mut self.statistics);
            self.engine.product_by_position(&mut ctx, a, b)
        };
        let product = self.check_fatal(result)?;
        let product = product.ok_or_else(|| {
            EnumerationError::InternalInconsistency(format!(
                "product of positions {} and {} is missing from a closed table",
                i, j
            ))
        });
        Ok(self.check_fatal(product)? + 1)
    }

    /// Full multiplication table by position; `table[i - 1][j - 1]` is `i * j`.
    pub fn cayley_table(&mut self) -> Result<Vec<Vec<usize>>> {
        let n = self.size()?;
        let mut table = Vec::with_capacity(n);
        for i in 1..=n {
            let mut row = Vec::with_capacity(n);
            for j in 1..=n {
                row.push(self.product_by_position(i, j)?);
            }
            table.push(row);
        }
        Ok(table)
    }

    /// Number of idempotents, enumerating to completion.
    pub fn nr_idempotents(&mut self) -> Result<usize> {
        if let Some(count) = self.idempotents {
            return Ok(count);
        }
        self.run_to_completion("idempotent count")?;
        let counted = {
            let mut ctx = Self::context(self.capability, &mut self.statistics);
            self.engine.count_idempotents(&mut ctx)
        };
        let count = match counted {
            Some(count) => count,
            None => self.check_fatal(memo::count_idempotents(self.engine.table()))?,
        };
        self.idempotents = Some(count);
        Ok(count)
    }

    // Iteration and persistence

    /// Elements in discovery order, growing as the iteration advances.
    pub fn iter(&mut self) -> Elements<'_, 'a, C> {
        Elements::new(self, Order::Discovery)
    }

    /// Elements in the capability's order.
    pub fn iter_sorted(&mut self) -> Elements<'_, 'a, C> {
        Elements::new(self, Order::Sorted)
    }

    /// Snapshot of the table and of the caches computed so far.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(
            self.engine.table(),
            self.sorted.as_ref(),
            self.relations.as_deref(),
        )
    }

    // Introspection

    pub fn state(&self) -> FacadeState {
        self.state
    }

    pub fn engine_kind(&self) -> EngineKind {
        self.engine.kind()
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn options(&self) -> &EnumerationOptions {
        &self.options
    }

    pub fn type_tag(&self) -> TypeTag {
        self.tag
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn capability(&self) -> &'a C {
        self.capability
    }

    // Argument checks

    fn check_nonzero(position: usize) -> Result<()> {
        if position == 0 {
            Err(EnumerationError::InvalidArgument(
                "positions start at 1".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    /// 0-based index of a discovered `position`.
    fn check_current(&self, position: usize) -> Result<usize> {
        let size = self.current_size();
        if position > size {
            Err(EnumerationError::PositionOutOfRange { position, size })
        } else {
            Ok(position - 1)
        }
    }

    fn check_position(&self, position: usize) -> Result<usize> {
        Self::check_nonzero(position)?;
        self.check_current(position)
    }

    fn check_compatible(&self, x: C::Handle) -> Result<()> {
        BackendSelector::check_compatible(self.capability, &[x], self.tag, self.degree)
    }

    fn one_based(index: usize) -> Option<usize> {
        (index != UNDEFINED).then(|| index + 1)
    }
}

impl<C: ElementCapability> Clone for EnumerationFacade<'_, C> {
    fn clone(&self) -> Self {
        Self {
            capability: self.capability,
            engine: self.engine.boxed_clone(),
            options: self.options.clone(),
            tag: self.tag,
            degree: self.degree,
            state: self.state,
            statistics: self.statistics.clone(),
            words: self.words.clone(),
            sorted: self.sorted.clone(),
            relations: self.relations.clone(),
            idempotents: self.idempotents,
        }
    }
}

impl<C: ElementCapability> fmt::Debug for EnumerationFacade<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumerationFacade")
            .field("engine", &self.engine.kind())
            .field("state", &self.state)
            .field("current_size", &self.current_size())
            .field("nr_generators", &self.nr_generators())
            .field("type_tag", &self.tag)
            .field("degree", &self.degree)
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{MultiplicationTable, Transformations};
    use crate::options::BackendPreference;

    fn right_zero() -> MultiplicationTable {
        MultiplicationTable::from_fn(2, |_, j| j).unwrap()
    }

    #[test]
    fn test_create_rejects_empty() {
        let table = right_zero();
        assert!(matches!(
            EnumerationFacade::new(&table, &[]),
            Err(EnumerationError::InvalidArgument(_))
        ));
        let options = EnumerationOptions::default().with_batch_size(0);
        assert!(matches!(
            EnumerationFacade::create(&table, &table.elements(), options),
            Err(EnumerationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_engine_selection() {
        let table = right_zero();
        let facade = EnumerationFacade::new(&table, &table.elements()).unwrap();
        assert_eq!(facade.engine_kind(), EngineKind::Generic);

        let arena = Transformations::new();
        let gens = [arena.make(&[1, 0]).unwrap()];
        let facade = EnumerationFacade::new(&arena, &gens).unwrap();
        assert_eq!(facade.engine_kind(), EngineKind::Fast);

        let options = EnumerationOptions::default().with_backend(BackendPreference::Generic);
        let facade = EnumerationFacade::create(&arena, &gens, options).unwrap();
        assert_eq!(facade.engine_kind(), EngineKind::Generic);
    }

    #[test]
    fn test_state_machine() {
        let table = MultiplicationTable::from_fn(6, |i, j| (i + j) % 6).unwrap();
        let options = EnumerationOptions::default().with_batch_size(2);
        let mut facade =
            EnumerationFacade::create(&table, &[table.element(1).unwrap()], options).unwrap();
        assert_eq!(facade.state(), FacadeState::Created);

        facade.enumerate(3).unwrap();
        assert_eq!(facade.state(), FacadeState::Idle);
        assert_eq!(facade.current_size(), 3);
        let batches = facade.statistics().get(Counters::Batches);
        facade.enumerate(2).unwrap();
        assert_eq!(facade.statistics().get(Counters::Batches), batches);

        facade.enumerate(Limit::Unbounded).unwrap();
        assert_eq!(facade.state(), FacadeState::Done);
        assert_eq!(facade.current_size(), 6);
        assert!(matches!(
            facade.enumerate(0),
            Err(EnumerationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_element_at_out_of_range() {
        let table = right_zero();
        let mut facade = EnumerationFacade::new(&table, &table.elements()).unwrap();
        assert_eq!(facade.element_at(2).unwrap(), table.element(1).unwrap());
        assert_eq!(
            facade.element_at(3),
            Err(EnumerationError::PositionOutOfRange {
                position: 3,
                size: 2
            })
        );
        assert!(matches!(
            facade.element_at(0),
            Err(EnumerationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_policy_forbids_full_enumeration() {
        let table = MultiplicationTable::from_fn(5, |i, j| (i + j) % 5).unwrap();
        let options = EnumerationOptions::default()
            .with_batch_size(1)
            .with_full_enumeration(false);
        let mut facade =
            EnumerationFacade::create(&table, &[table.element(1).unwrap()], options).unwrap();

        assert!(matches!(
            facade.size(),
            Err(EnumerationError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            facade.relations(),
            Err(EnumerationError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            facade.element_at_sorted(1),
            Err(EnumerationError::UnsupportedOperation(_))
        ));

        // Discovery order access still grows on demand, and completion lifts the restriction.
        assert_eq!(facade.element_at(5).unwrap(), table.element(0).unwrap());
        facade.enumerate(6).unwrap();
        assert!(facade.is_done());
        assert_eq!(facade.size().unwrap(), 5);
        assert_eq!(facade.relations().unwrap().len(), 1);
    }

    #[test]
    fn test_generator_letters() {
        let table = right_zero();
        let facade = EnumerationFacade::new(&table, &table.elements()).unwrap();
        assert_eq!(facade.generator(2).unwrap(), table.element(1).unwrap());
        assert!(facade.generator(0).is_err());
        assert!(facade.generator(3).is_err());
        assert_eq!(facade.nr_generators(), 2);
    }

    #[test]
    fn test_cayley_graph_accessors() {
        let table = right_zero();
        let mut facade = EnumerationFacade::new(&table, &table.elements()).unwrap();
        assert_eq!(facade.cayley_graph(Side::Right).nr_rows(), 0);
        facade.size().unwrap();
        let right = facade.cayley_graph(Side::Right);
        assert_eq!(right.nr_rows(), 2);
        assert_eq!(right.get(1, 2), Some(2));
        assert_eq!(right.get(2, 1), Some(1));
        assert_eq!(right.get(3, 1), None);
        assert_eq!(right.row(1), Some(&[1, 2][..]));
    }

    #[test]
    fn test_debug_output() {
        let table = right_zero();
        let facade = EnumerationFacade::new(&table, &table.elements()).unwrap();
        let text = format!("{:?}", facade);
        assert!(text.contains("Generic"));
        assert!(text.contains("Created"));
    }
}
