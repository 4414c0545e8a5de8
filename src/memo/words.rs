// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Sparse cache of factorizations.
//!
//! A position's word can be rebuilt in constant time from a cached
//! neighbor: `word(p) = word(prefix(p)) · final(p)` and
//! `p = first(p) · suffix(p)`.

use rustc_hash::FxHashMap;

use crate::element::ElementHandle;
use crate::engine::{ElementTable, UNDEFINED};

/// Sequence of 1-based generator letters.
pub type Word = Vec<usize>;

#[derive(Debug, Clone, Default)]
pub struct FactorizationCache {
    words: FxHashMap<usize, Word>,
}

impl FactorizationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, position: usize) -> Option<&Word> {
        self.words.get(&position)
    }

    pub fn insert(&mut self, position: usize, word: Word) {
        self.words.insert(position, word);
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// Word for `position` built by extending a cached neighbor by one letter.
    ///
    /// Tries the prefix first, then the suffix. Returns `None` if neither
    /// is cached or `position` is a generator.
    pub fn extend_from_neighbor<H: ElementHandle>(
        &self,
        table: &ElementTable<H>,
        position: usize,
    ) -> Option<Word> {
        let prefix = table.prefix(position);
        if prefix != UNDEFINED {
            if let Some(word) = self.words.get(&prefix) {
                let mut extended = Vec::with_capacity(word.len() + 1);
                extended.extend_from_slice(word);
                extended.push(table.final_letter(position) + 1);
                return Some(extended);
            }
        }
        let suffix = table.suffix(position);
        if suffix != UNDEFINED {
            if let Some(word) = self.words.get(&suffix) {
                let mut extended = Vec::with_capacity(word.len() + 1);
                extended.push(table.first_letter(position) + 1);
                extended.extend_from_slice(word);
                return Some(extended);
            }
        }
        None
    }
}
