// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Froidure–Pin enumeration with the reduced-word shortcut.
//!
//! Rows are processed level by level, where level `k` holds the elements
//! whose discovery word has length `k`. For row `i = b · s` (first letter
//! `b`, suffix `s`) and letter `j`, if `s · j` was not discovered as
//! `s · j` then `i · j` is already known and is read from the graphs:
//!
//! ```text
//! i · j = b · (s · j) = b · r = (b · prefix(r)) · final(r)
//! ```
//!
//! Only the remaining products are multiplied. When a level is finished the
//! left graph for it is filled without any multiplication.
//!
//! After [`add_generators`](EnumerationEngine::add_generators) the engine
//! switches to closure mode: every row is revisited in position order and
//! each missing right product is multiplied directly. Positions and words
//! of existing elements are unchanged.

use log::{debug, trace};

use super::table::ElementTable;
use super::{
    minimal_relations, EngineContext, EngineKind, EnumerationEngine, RawRelation, Side, UNDEFINED,
};
use crate::element::ElementHandle;
use crate::error::{EnumerationError, Result};
use crate::state::Counters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Shortlex,
    Closure,
}

#[derive(Debug, Clone)]
pub struct FastEngine<H> {
    table: ElementTable<H>,
    /// Next row to process.
    pos: usize,
    /// Current level, minus one.
    wordlen: usize,
    /// `lenindex[k]` is the first position of level `k + 1`.
    lenindex: Vec<usize>,
    nr_rules: usize,
    mode: Mode,
}

impl<H: ElementHandle> FastEngine<H> {
    pub fn new(ctx: &mut EngineContext<'_, H>, generators: &[H]) -> Self {
        let table = ElementTable::new(ctx, generators);
        let nr_rules = table.duplicates().len();
        let lenindex = vec![0, table.len()];
        Self {
            table,
            pos: 0,
            wordlen: 0,
            lenindex,
            nr_rules,
            mode: Mode::Shortlex,
        }
    }

    fn run_shortlex(&mut self, ctx: &mut EngineContext<'_, H>, target: usize) {
        while self.pos < self.table.len() && self.table.len() < target {
            self.process_row(ctx, self.pos);
            self.pos += 1;
            if self.pos == self.lenindex[self.wordlen + 1] {
                self.finish_level();
            }
        }
    }

    fn process_row(&mut self, ctx: &mut EngineContext<'_, H>, i: usize) {
        let b = self.table.first_letter(i);
        let s = self.table.suffix(i);
        for j in 0..self.table.nr_generators() {
            if s != UNDEFINED && !self.table.is_reduced(s, j) {
                let r = self.table.right(s, j);
                let p = self.table.prefix(r);
                let product = if p == UNDEFINED {
                    self.table
                        .right(self.table.letter_to_pos(b), self.table.final_letter(r))
                } else {
                    self.table
                        .right(self.table.left(p, b), self.table.final_letter(r))
                };
                self.table.set_right(i, j, product);
                continue;
            }
            let x = ctx.product(self.table.element(i), self.table.generator(j));
            let (hash, found) = self.table.lookup(ctx, x);
            let position = match found {
                Some(position) => {
                    self.nr_rules += 1;
                    position
                }
                None => {
                    let suffix = if s == UNDEFINED {
                        self.table.letter_to_pos(j)
                    } else {
                        self.table.right(s, j)
                    };
                    let length = self.table.length(i) + 1;
                    self.table.push_element(hash, x, i, suffix, b, j, length)
                }
            };
            self.table.set_right(i, j, position);
        }
    }

    /// Fill the left graph for the level just completed.
    fn finish_level(&mut self) {
        let start = self.lenindex[self.wordlen];
        let end = self.lenindex[self.wordlen + 1];
        for i in start..end {
            let p = self.table.prefix(i);
            let last = self.table.final_letter(i);
            for j in 0..self.table.nr_generators() {
                let q = if p == UNDEFINED {
                    self.table.right(self.table.letter_to_pos(j), last)
                } else {
                    self.table.right(self.table.left(p, j), last)
                };
                self.table.set_left(i, j, q);
            }
        }
        self.lenindex.push(self.table.len());
        self.wordlen += 1;
        trace!(
            "level {} complete: {} elements",
            self.wordlen,
            self.table.len()
        );
    }

    fn run_closure(&mut self, ctx: &mut EngineContext<'_, H>, target: usize) -> Result<()> {
        while self.pos < self.table.len() && self.table.len() < target {
            self.close_row(ctx, self.pos);
            self.pos += 1;
        }
        if self.pos == self.table.len() {
            self.close_left(ctx)?;
        }
        Ok(())
    }

    fn close_row(&mut self, ctx: &mut EngineContext<'_, H>, i: usize) {
        let s = self.table.suffix(i);
        for j in 0..self.table.nr_generators() {
            if self.table.right(i, j) != UNDEFINED {
                continue;
            }
            let x = ctx.product(self.table.element(i), self.table.generator(j));
            let (hash, found) = self.table.lookup(ctx, x);
            let position = match found {
                Some(position) => position,
                None => {
                    let suffix = if s == UNDEFINED {
                        self.table.letter_to_pos(j)
                    } else {
                        self.table.right(s, j)
                    };
                    let first = self.table.first_letter(i);
                    let length = self.table.length(i) + 1;
                    self.table.push_element(hash, x, i, suffix, first, j, length)
                }
            };
            self.table.set_right(i, j, position);
        }
    }

    /// Multiply out every missing left entry once the right graph is closed.
    fn close_left(&mut self, ctx: &mut EngineContext<'_, H>) -> Result<()> {
        for i in 0..self.table.len() {
            for j in 0..self.table.nr_generators() {
                if self.table.left(i, j) != UNDEFINED {
                    continue;
                }
                let x = ctx.product(self.table.generator(j), self.table.element(i));
                let (_, found) = self.table.lookup(ctx, x);
                let position = found.ok_or_else(|| {
                    EnumerationError::InternalInconsistency(format!(
                        "left product of generator {} and position {} is missing from a closed table",
                        j, i
                    ))
                })?;
                self.table.set_left(i, j, position);
            }
        }
        Ok(())
    }
}

impl<H: ElementHandle> EnumerationEngine<H> for FastEngine<H> {
    fn kind(&self) -> EngineKind {
        EngineKind::Fast
    }

    fn table(&self) -> &ElementTable<H> {
        &self.table
    }

    fn is_done(&self) -> bool {
        self.pos == self.table.len()
    }

    fn run(&mut self, ctx: &mut EngineContext<'_, H>, target: usize) -> Result<()> {
        match self.mode {
            Mode::Shortlex => {
                self.run_shortlex(ctx, target);
                Ok(())
            }
            Mode::Closure => self.run_closure(ctx, target),
        }
    }

    fn complete_rows(&self, side: Side) -> usize {
        match (side, self.mode) {
            (Side::Right, _) => self.pos,
            (Side::Left, Mode::Shortlex) => self.lenindex[self.wordlen],
            (Side::Left, Mode::Closure) if self.is_done() => self.table.len(),
            (Side::Left, Mode::Closure) => 0,
        }
    }

    fn relations(&self) -> Vec<RawRelation> {
        match self.mode {
            Mode::Shortlex => minimal_relations(&self.table, self.pos),
            Mode::Closure => {
                let mut relations: Vec<RawRelation> = self
                    .table
                    .duplicates()
                    .iter()
                    .map(|&(letter, position)| RawRelation::Duplicate { letter, position })
                    .collect();
                for i in 0..self.pos {
                    for j in 0..self.table.nr_generators() {
                        let result = self.table.right(i, j);
                        if result != UNDEFINED && !self.table.is_reduced(i, j) {
                            relations.push(RawRelation::Product {
                                position: i,
                                letter: j,
                                result,
                            });
                        }
                    }
                }
                relations
            }
        }
    }

    fn nr_rules(&self) -> usize {
        match self.mode {
            Mode::Shortlex => self.nr_rules,
            Mode::Closure => self.relations().len(),
        }
    }

    fn supports_closure(&self) -> bool {
        true
    }

    fn add_generators(&mut self, ctx: &mut EngineContext<'_, H>, generators: &[H]) -> Result<()> {
        ctx.statistics
            .increment_counter(Counters::IncrementalClosures);
        let before = self.table.len();
        self.table.add_generators(ctx, generators);
        self.mode = Mode::Closure;
        self.pos = 0;
        debug!(
            "closure: {} new generators, {} new elements, restarting at row 0",
            generators.len(),
            self.table.len() - before
        );
        Ok(())
    }

    fn product_by_position(
        &self,
        ctx: &mut EngineContext<'_, H>,
        i: usize,
        j: usize,
    ) -> Result<Option<usize>> {
        let x = ctx.product(self.table.element(i), self.table.element(j));
        Ok(self.table.lookup(ctx, x).1)
    }

    fn count_idempotents(&self, ctx: &mut EngineContext<'_, H>) -> Option<usize> {
        let count = self
            .table
            .elements()
            .iter()
            .filter(|&&x| {
                let square = ctx.product(x, x);
                ctx.capability.equal(square, x)
            })
            .count();
        Some(count)
    }

    fn boxed_clone(&self) -> Box<dyn EnumerationEngine<H>> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementCapability, MultiplicationTable, Transformations};
    use crate::state::Statistics;

    fn full_transformation_monoid_generators(arena: &Transformations) -> Vec<crate::element::Transformation> {
        vec![
            arena.make(&[1, 2, 0]).unwrap(),
            arena.make(&[1, 0, 2]).unwrap(),
            arena.make(&[0, 0, 2]).unwrap(),
        ]
    }

    #[test]
    fn test_full_transformation_monoid() {
        let arena = Transformations::new();
        let gens = full_transformation_monoid_generators(&arena);
        let mut stats = Statistics::new();
        let mut ctx = EngineContext::new(&arena, &mut stats);
        let mut engine = FastEngine::new(&mut ctx, &gens);
        engine.run(&mut ctx, usize::MAX).unwrap();

        assert!(engine.is_done());
        assert_eq!(engine.table().len(), 27);
        assert_eq!(engine.count_idempotents(&mut ctx), Some(10));
        assert_eq!(engine.nr_rules(), engine.relations().len());
        assert_eq!(engine.complete_rows(Side::Left), 27);
        assert_eq!(engine.complete_rows(Side::Right), 27);
    }

    #[test]
    fn test_graphs_agree_with_products() {
        let arena = Transformations::new();
        let gens = full_transformation_monoid_generators(&arena);
        let mut stats = Statistics::new();
        let mut ctx = EngineContext::new(&arena, &mut stats);
        let mut engine = FastEngine::new(&mut ctx, &gens);
        engine.run(&mut ctx, usize::MAX).unwrap();

        let table = engine.table();
        for i in 0..table.len() {
            for (j, &g) in gens.iter().enumerate() {
                let right = arena.product(table.element(i), g);
                let left = arena.product(g, table.element(i));
                assert_eq!(table.element(table.right(i, j)), right);
                assert_eq!(table.element(table.left(i, j)), left);
            }
        }
    }

    #[test]
    fn test_shortcut_saves_products() {
        let arena = Transformations::new();
        let gens = full_transformation_monoid_generators(&arena);
        let mut stats = Statistics::new();
        let mut ctx = EngineContext::new(&arena, &mut stats);
        let mut engine = FastEngine::new(&mut ctx, &gens);
        engine.run(&mut ctx, usize::MAX).unwrap();
        assert!(stats.get(Counters::Products) < 27 * 3);
    }

    #[test]
    fn test_run_stops_near_target() {
        let table = MultiplicationTable::from_fn(10, |i, j| (i + j) % 10).unwrap();
        let mut stats = Statistics::new();
        let mut ctx = EngineContext::new(&table, &mut stats);
        let mut engine = FastEngine::new(&mut ctx, &[table.element(1).unwrap()]);
        engine.run(&mut ctx, 4).unwrap();
        assert_eq!(engine.table().len(), 4);
        assert!(!engine.is_done());
        engine.run(&mut ctx, usize::MAX).unwrap();
        assert_eq!(engine.table().len(), 10);
        assert!(engine.is_done());
    }

    #[test]
    fn test_incremental_closure_keeps_positions() {
        let arena = Transformations::new();
        let gens = full_transformation_monoid_generators(&arena);
        let mut stats = Statistics::new();
        let mut ctx = EngineContext::new(&arena, &mut stats);
        let mut engine = FastEngine::new(&mut ctx, &gens[..2]);
        engine.run(&mut ctx, usize::MAX).unwrap();
        assert_eq!(engine.table().len(), 6);
        let before: Vec<_> = engine.table().elements().to_vec();
        let words: Vec<_> = (0..6).map(|p| engine.word(p).unwrap()).collect();

        engine.add_generators(&mut ctx, &gens[2..]).unwrap();
        engine.run(&mut ctx, usize::MAX).unwrap();

        assert!(engine.is_done());
        assert_eq!(engine.table().len(), 27);
        assert_eq!(&engine.table().elements()[..6], &before[..]);
        for (p, word) in words.iter().enumerate() {
            assert_eq!(&engine.word(p).unwrap(), word);
        }
        assert_eq!(engine.complete_rows(Side::Left), 27);
        assert_eq!(stats.get(Counters::IncrementalClosures), 1);
    }

    #[test]
    fn test_closure_left_graph() {
        let arena = Transformations::new();
        let gens = full_transformation_monoid_generators(&arena);
        let mut stats = Statistics::new();
        let mut ctx = EngineContext::new(&arena, &mut stats);
        let mut engine = FastEngine::new(&mut ctx, &gens[..1]);
        engine.run(&mut ctx, usize::MAX).unwrap();
        engine.add_generators(&mut ctx, &gens[1..]).unwrap();
        engine.run(&mut ctx, usize::MAX).unwrap();

        let table = engine.table();
        for i in 0..table.len() {
            for j in 0..table.nr_generators() {
                let left = arena.product(table.generator(j), table.element(i));
                assert_eq!(table.element(table.left(i, j)), left);
            }
        }
    }
}
