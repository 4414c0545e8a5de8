// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Semigroups given by an explicit multiplication table.
//!
//! Elements are the indices `0..order`; the product of `i` and `j` is read
//! from row `i`, column `j`. The encoding is opaque to the fast engine, so a
//! table-backed facade always runs the generic engine.
//!
//! # Example
//!
//! ```
//! use semigroup_enum::element::{ElementCapability, MultiplicationTable};
//!
//! // Right zero semigroup: x * y = y.
//! let table = MultiplicationTable::new(vec![vec![0, 1], vec![0, 1]]).unwrap();
//! let (a, b) = (table.element(0).unwrap(), table.element(1).unwrap());
//! assert_eq!(table.product(a, b), b);
//! assert!(table.is_associative());
//! ```

use std::cmp::Ordering;

use super::{ElementCapability, TypeTag};
use crate::error::{EnumerationError, Result};

/// Handle to one element of a [`MultiplicationTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableElement(u32);

impl TableElement {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Capability for a semigroup defined by its Cayley table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiplicationTable {
    order: usize,
    products: Vec<u32>,
}

impl MultiplicationTable {
    /// Build from rows; `rows[i][j]` is the index of `i * j`.
    pub fn new(rows: Vec<Vec<usize>>) -> Result<Self> {
        let order = rows.len();
        if order == 0 {
            return Err(EnumerationError::InvalidArgument(
                "a multiplication table needs at least one element".to_string(),
            ));
        }
        let mut products = Vec::with_capacity(order * order);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != order {
                return Err(EnumerationError::InvalidArgument(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    order
                )));
            }
            for &entry in row {
                if entry >= order {
                    return Err(EnumerationError::InvalidArgument(format!(
                        "entry {} in row {} is not an element",
                        entry, i
                    )));
                }
                products.push(entry as u32);
            }
        }
        Ok(Self { order, products })
    }

    /// Build from a product function on indices.
    pub fn from_fn(order: usize, product: impl Fn(usize, usize) -> usize) -> Result<Self> {
        let rows = (0..order)
            .map(|i| (0..order).map(|j| product(i, j)).collect())
            .collect();
        Self::new(rows)
    }

    /// Handle for the element with the given index.
    pub fn element(&self, index: usize) -> Option<TableElement> {
        (index < self.order).then_some(TableElement(index as u32))
    }

    /// All elements in index order.
    pub fn elements(&self) -> Vec<TableElement> {
        (0..self.order as u32).map(TableElement).collect()
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Check `(x * y) * z == x * (y * z)` for every triple.
    pub fn is_associative(&self) -> bool {
        let n = self.order;
        let mul = |i: usize, j: usize| self.products[i * n + j] as usize;
        (0..n).all(|x| (0..n).all(|y| (0..n).all(|z| mul(mul(x, y), z) == mul(x, mul(y, z)))))
    }
}

impl ElementCapability for MultiplicationTable {
    type Handle = TableElement;

    fn equal(&self, a: TableElement, b: TableElement) -> bool {
        a == b
    }

    fn product(&self, a: TableElement, b: TableElement) -> TableElement {
        TableElement(self.products[a.index() * self.order + b.index()])
    }

    fn hash(&self, a: TableElement) -> u64 {
        a.0 as u64
    }

    fn compare(&self, a: TableElement, b: TableElement) -> Ordering {
        a.cmp(&b)
    }

    fn type_tag(&self, _a: TableElement) -> TypeTag {
        TypeTag::Opaque
    }

    fn degree(&self, _a: TableElement) -> usize {
        self.order
    }
}
