// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Element table shared by both engines.
//!
//! The table is append-only: an element's position is fixed once assigned,
//! rows of the Cayley tables are added as elements are discovered, and
//! columns are added when generators are. All indices here are 0-based and
//! missing entries hold [`UNDEFINED`].
//!
//! # Schreier tree
//!
//! For every element that is not a generator,
//! - `word(p) = word(prefix(p)) · final_letter(p)`, and
//! - `p = first_letter(p) · suffix(p)` as elements.
//!
//! Following `prefix` strictly decreases the discovery-word length;
//! following `suffix` strictly decreases the position. Both end at an
//! element of length 1.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::{EngineContext, Side, UNDEFINED};
use crate::element::{ElementCapability, ElementHandle};
use crate::error::{EnumerationError, Result};
use crate::state::Counters;

/// Dense `rows × columns` table of positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CayleyTable {
    nr_cols: usize,
    data: Vec<usize>,
}

impl CayleyTable {
    pub fn new(nr_cols: usize) -> Self {
        Self {
            nr_cols,
            data: Vec::new(),
        }
    }

    pub fn nr_rows(&self) -> usize {
        if self.nr_cols == 0 {
            0
        } else {
            self.data.len() / self.nr_cols
        }
    }

    pub fn nr_cols(&self) -> usize {
        self.nr_cols
    }

    /// Append a row of undefined entries.
    pub fn add_row(&mut self) {
        self.data.resize(self.data.len() + self.nr_cols, UNDEFINED);
    }

    /// Append `extra` undefined columns to every existing row.
    pub fn add_cols(&mut self, extra: usize) {
        if extra == 0 {
            return;
        }
        let rows = self.nr_rows();
        let width = self.nr_cols + extra;
        let mut data = Vec::with_capacity(rows * width);
        for row in self.data.chunks(self.nr_cols.max(1)).take(rows) {
            data.extend_from_slice(row);
            data.extend(std::iter::repeat(UNDEFINED).take(extra));
        }
        self.data = data;
        self.nr_cols = width;
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> usize {
        self.data[row * self.nr_cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: usize) {
        self.data[row * self.nr_cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[usize] {
        &self.data[row * self.nr_cols..(row + 1) * self.nr_cols]
    }
}

/// Map from element hash to the positions with that hash.
///
/// Hashing and equality are both delegated to the capability, so handles
/// need not be canonical.
#[derive(Debug, Clone, Default)]
pub struct PositionIndex {
    buckets: FxHashMap<u64, SmallVec<[usize; 1]>>,
}

impl PositionIndex {
    pub fn insert(&mut self, hash: u64, position: usize) {
        self.buckets.entry(hash).or_default().push(position);
    }

    pub fn find<H: ElementHandle>(
        &self,
        capability: &dyn ElementCapability<Handle = H>,
        elements: &[H],
        hash: u64,
        x: H,
    ) -> Option<usize> {
        self.buckets
            .get(&hash)?
            .iter()
            .copied()
            .find(|&p| capability.equal(elements[p], x))
    }
}

/// Elements, Schreier tree and Cayley graphs discovered so far.
#[derive(Debug, Clone)]
pub struct ElementTable<H> {
    generators: Vec<H>,
    letter_to_pos: Vec<usize>,
    /// `(letter, position)` for generators equal to an element already present.
    duplicates: Vec<(usize, usize)>,
    elements: Vec<H>,
    index: PositionIndex,
    prefix: Vec<usize>,
    suffix: Vec<usize>,
    first: Vec<usize>,
    last: Vec<usize>,
    length: Vec<usize>,
    right: CayleyTable,
    left: CayleyTable,
    max_length: usize,
}

impl<H: ElementHandle> ElementTable<H> {
    /// Table containing just the distinct generators, in letter order.
    pub fn new(ctx: &mut EngineContext<'_, H>, generators: &[H]) -> Self {
        let mut table = Self {
            generators: Vec::with_capacity(generators.len()),
            letter_to_pos: Vec::with_capacity(generators.len()),
            duplicates: Vec::new(),
            elements: Vec::new(),
            index: PositionIndex::default(),
            prefix: Vec::new(),
            suffix: Vec::new(),
            first: Vec::new(),
            last: Vec::new(),
            length: Vec::new(),
            right: CayleyTable::new(0),
            left: CayleyTable::new(0),
            max_length: 0,
        };
        table.add_generators(ctx, generators);
        table
    }

    /// Append generators as new letters.
    ///
    /// A generator equal to an element already in the table becomes a
    /// duplicate letter for that position; any other generator is appended
    /// as a new element of length 1.
    pub fn add_generators(&mut self, ctx: &mut EngineContext<'_, H>, generators: &[H]) {
        self.right.add_cols(generators.len());
        self.left.add_cols(generators.len());
        for &x in generators {
            let letter = self.generators.len();
            self.generators.push(x);
            let (hash, found) = self.lookup(ctx, x);
            match found {
                Some(position) => {
                    self.duplicates.push((letter, position));
                    self.letter_to_pos.push(position);
                }
                None => {
                    let position =
                        self.push_element(hash, x, UNDEFINED, UNDEFINED, letter, letter, 1);
                    self.letter_to_pos.push(position);
                }
            }
        }
    }

    /// Hash `x` and look it up, counting the lookup.
    pub fn lookup(&self, ctx: &mut EngineContext<'_, H>, x: H) -> (u64, Option<usize>) {
        ctx.statistics.increment_counter(Counters::Lookups);
        let hash = ctx.capability.hash(x);
        (hash, self.index.find(ctx.capability, &self.elements, hash, x))
    }

    /// Look up `x` without touching any statistics.
    pub fn find(&self, capability: &dyn ElementCapability<Handle = H>, x: H) -> Option<usize> {
        self.index
            .find(capability, &self.elements, capability.hash(x), x)
    }

    /// Append a new element and return its position.
    #[allow(clippy::too_many_arguments)]
    pub fn push_element(
        &mut self,
        hash: u64,
        x: H,
        prefix: usize,
        suffix: usize,
        first: usize,
        last: usize,
        length: usize,
    ) -> usize {
        let position = self.elements.len();
        self.elements.push(x);
        self.index.insert(hash, position);
        self.prefix.push(prefix);
        self.suffix.push(suffix);
        self.first.push(first);
        self.last.push(last);
        self.length.push(length);
        self.right.add_row();
        self.left.add_row();
        self.max_length = self.max_length.max(length);
        position
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[H] {
        &self.elements
    }

    pub fn element(&self, position: usize) -> H {
        self.elements[position]
    }

    pub fn generators(&self) -> &[H] {
        &self.generators
    }

    pub fn nr_generators(&self) -> usize {
        self.generators.len()
    }

    pub fn generator(&self, letter: usize) -> H {
        self.generators[letter]
    }

    /// Position of the element equal to generator `letter`.
    pub fn letter_to_pos(&self, letter: usize) -> usize {
        self.letter_to_pos[letter]
    }

    pub fn duplicates(&self) -> &[(usize, usize)] {
        &self.duplicates
    }

    pub fn prefix(&self, position: usize) -> usize {
        self.prefix[position]
    }

    pub fn suffix(&self, position: usize) -> usize {
        self.suffix[position]
    }

    pub fn first_letter(&self, position: usize) -> usize {
        self.first[position]
    }

    pub fn final_letter(&self, position: usize) -> usize {
        self.last[position]
    }

    /// Length of the discovery word of `position`.
    pub fn length(&self, position: usize) -> usize {
        self.length[position]
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn graph(&self, side: Side) -> &CayleyTable {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn right(&self, position: usize, letter: usize) -> usize {
        self.right.get(position, letter)
    }

    pub fn left(&self, position: usize, letter: usize) -> usize {
        self.left.get(position, letter)
    }

    pub fn set_right(&mut self, position: usize, letter: usize, value: usize) {
        self.right.set(position, letter, value);
    }

    pub fn set_left(&mut self, position: usize, letter: usize, value: usize) {
        self.left.set(position, letter, value);
    }

    /// Whether `position · letter` is the product that discovered its result.
    pub fn is_reduced(&self, position: usize, letter: usize) -> bool {
        let r = self.right.get(position, letter);
        r != UNDEFINED && self.prefix[r] == position && self.last[r] == letter
    }

    /// Discovery word of `position` (0-based letters), by walking the prefix chain.
    ///
    /// The walk takes at most `length(position)` steps; a longer chain is a
    /// broken table.
    pub fn word(&self, position: usize) -> Result<Vec<usize>> {
        let length = self.length[position];
        let mut word = Vec::with_capacity(length);
        let mut p = position;
        while p != UNDEFINED {
            if word.len() == length {
                return Err(EnumerationError::InternalInconsistency(format!(
                    "prefix chain of position {} is longer than its word length {}",
                    position, length
                )));
            }
            word.push(self.last[p]);
            p = self.prefix[p];
        }
        word.reverse();
        Ok(word)
    }

    /// Position of `i * j`, read from the right Cayley graph along the word of `j`.
    ///
    /// Returns `None` if an entry on the way is not yet known.
    pub fn product_by_reduction(&self, i: usize, j: usize) -> Result<Option<usize>> {
        Ok(self.word(j)?.into_iter().try_fold(i, |p, letter| {
            let q = self.right.get(p, letter);
            (q != UNDEFINED).then_some(q)
        }))
    }
}
