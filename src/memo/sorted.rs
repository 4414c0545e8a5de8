// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Permutation between discovery order and the capability's total order.

use crate::element::{ElementCapability, ElementHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedIndex {
    /// `order[k]` is the position of the element of rank `k`.
    order: Vec<usize>,
    /// `rank[p]` is the rank of the element at position `p`.
    rank: Vec<usize>,
}

impl SortedIndex {
    /// Sort `elements` with the capability's comparison.
    pub fn build<H: ElementHandle>(
        capability: &dyn ElementCapability<Handle = H>,
        elements: &[H],
    ) -> Self {
        let mut order: Vec<usize> = (0..elements.len()).collect();
        order.sort_by(|&a, &b| capability.compare(elements[a], elements[b]));
        let mut rank = vec![0; order.len()];
        for (k, &p) in order.iter().enumerate() {
            rank[p] = k;
        }
        Self { order, rank }
    }

    pub fn position_at(&self, rank: usize) -> usize {
        self.order[rank]
    }

    pub fn rank_of(&self, position: usize) -> usize {
        self.rank[position]
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
