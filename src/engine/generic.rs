// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Breadth-first enumeration through the capability alone.
//!
//! Every right product `x * g` and every left product `g * x` is
//! multiplied and looked up. A product that lands on an existing element is
//! kept as a candidate relation; the candidates are reduced to the minimal
//! set only when relations are asked for.
//!
//! Rows are processed in the same shortlex order as [`FastEngine`], so the
//! two engines produce identical tables.
//!
//! [`FastEngine`]: super::FastEngine

use log::trace;

use super::table::ElementTable;
use super::{
    is_minimal_rule, EngineContext, EngineKind, EnumerationEngine, RawRelation, Side, UNDEFINED,
};
use crate::element::ElementHandle;
use crate::error::{EnumerationError, Result};

#[derive(Debug, Clone)]
pub struct GenericEngine<H> {
    table: ElementTable<H>,
    pos: usize,
    wordlen: usize,
    lenindex: Vec<usize>,
    /// `(position, letter)` pairs whose product was already known.
    candidates: Vec<(usize, usize)>,
}

impl<H: ElementHandle> GenericEngine<H> {
    pub fn new(ctx: &mut EngineContext<'_, H>, generators: &[H]) -> Self {
        let table = ElementTable::new(ctx, generators);
        let lenindex = vec![0, table.len()];
        Self {
            table,
            pos: 0,
            wordlen: 0,
            lenindex,
            candidates: Vec::new(),
        }
    }

    /// Candidate relations recorded so far.
    pub fn candidates(&self) -> &[(usize, usize)] {
        &self.candidates
    }

    fn process_row(&mut self, ctx: &mut EngineContext<'_, H>, i: usize) {
        let s = self.table.suffix(i);
        let first = self.table.first_letter(i);
        for j in 0..self.table.nr_generators() {
            let x = ctx.product(self.table.element(i), self.table.generator(j));
            let (hash, found) = self.table.lookup(ctx, x);
            let position = match found {
                Some(position) => {
                    self.candidates.push((i, j));
                    position
                }
                None => {
                    let suffix = if s == UNDEFINED {
                        self.table.letter_to_pos(j)
                    } else {
                        self.table.right(s, j)
                    };
                    let length = self.table.length(i) + 1;
                    self.table.push_element(hash, x, i, suffix, first, j, length)
                }
            };
            self.table.set_right(i, j, position);
        }
    }

    /// Multiply out the left graph for the level just completed.
    ///
    /// Every `g * x` for `x` in the level is at most one letter longer, and
    /// that whole level has been discovered, so a failed lookup is a broken
    /// table.
    fn finish_level(&mut self, ctx: &mut EngineContext<'_, H>) -> Result<()> {
        let start = self.lenindex[self.wordlen];
        let end = self.lenindex[self.wordlen + 1];
        for i in start..end {
            for j in 0..self.table.nr_generators() {
                let x = ctx.product(self.table.generator(j), self.table.element(i));
                let (_, found) = self.table.lookup(ctx, x);
                let position = found.ok_or_else(|| {
                    EnumerationError::InternalInconsistency(format!(
                        "left product of generator {} and position {} was never discovered",
                        j, i
                    ))
                })?;
                self.table.set_left(i, j, position);
            }
        }
        self.lenindex.push(self.table.len());
        self.wordlen += 1;
        trace!(
            "level {} complete: {} elements, {} candidate relations",
            self.wordlen,
            self.table.len(),
            self.candidates.len()
        );
        Ok(())
    }
}

impl<H: ElementHandle> EnumerationEngine<H> for GenericEngine<H> {
    fn kind(&self) -> EngineKind {
        EngineKind::Generic
    }

    fn table(&self) -> &ElementTable<H> {
        &self.table
    }

    fn is_done(&self) -> bool {
        self.pos == self.table.len()
    }

    fn run(&mut self, ctx: &mut EngineContext<'_, H>, target: usize) -> Result<()> {
        while self.pos < self.table.len() && self.table.len() < target {
            self.process_row(ctx, self.pos);
            self.pos += 1;
            if self.pos == self.lenindex[self.wordlen + 1] {
                self.finish_level(ctx)?;
            }
        }
        Ok(())
    }

    fn complete_rows(&self, side: Side) -> usize {
        match side {
            Side::Right => self.pos,
            Side::Left => self.lenindex[self.wordlen],
        }
    }

    fn relations(&self) -> Vec<RawRelation> {
        let duplicates = self
            .table
            .duplicates()
            .iter()
            .map(|&(letter, position)| RawRelation::Duplicate { letter, position });
        let products = self
            .candidates
            .iter()
            .filter(|&&(i, j)| is_minimal_rule(&self.table, i, j, self.table.suffix(i)))
            .map(|&(i, j)| RawRelation::Product {
                position: i,
                letter: j,
                result: self.table.right(i, j),
            });
        duplicates.chain(products).collect()
    }

    fn nr_rules(&self) -> usize {
        self.table.duplicates().len()
            + self
                .candidates
                .iter()
                .filter(|&&(i, j)| is_minimal_rule(&self.table, i, j, self.table.suffix(i)))
                .count()
    }

    fn boxed_clone(&self) -> Box<dyn EnumerationEngine<H>> {
        Box::new(self.clone())
    }
}
