// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Defining relations as pairs of words.

use serde::{Deserialize, Serialize};

use super::words::Word;

/// Two words over the 1-based generator letters that denote the same element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    pub lhs: Word,
    pub rhs: Word,
}

impl Relation {
    pub fn new(lhs: Word, rhs: Word) -> Self {
        Self { lhs, rhs }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} = {:?}", self.lhs, self.rhs)
    }
}
