// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Idempotents counted from the Cayley graphs, without multiplying.
//!
//! For a position `p` with word `a1 · a2 · ... · ak`, the product `p · p`
//! is obtained by prepending the letters of `p` to `p` from the last one
//! back: start at `j = p`, then for each step along the prefix chain
//! `j = left(j, final(i))`, `i = prefix(i)`. `p` is idempotent iff the walk
//! ends at `p`.

use crate::element::ElementHandle;
use crate::engine::{ElementTable, UNDEFINED};
use crate::error::{EnumerationError, Result};

/// Number of idempotents in a closed table.
///
/// The left graph must be complete. A prefix chain longer than the
/// element's recorded length, or a missing left entry, is reported as
/// [`EnumerationError::InternalInconsistency`].
pub fn count_idempotents<H: ElementHandle>(table: &ElementTable<H>) -> Result<usize> {
    let mut count = 0;
    for p in 0..table.len() {
        if square(table, p)? == p {
            count += 1;
        }
    }
    Ok(count)
}

fn square<H: ElementHandle>(table: &ElementTable<H>, p: usize) -> Result<usize> {
    let bound = table.length(p);
    let (mut i, mut j) = (p, p);
    let mut steps = 0;
    while i != UNDEFINED {
        steps += 1;
        if steps > bound {
            return Err(EnumerationError::InternalInconsistency(format!(
                "prefix chain from position {} does not reach a generator within {} steps",
                p, bound
            )));
        }
        j = table.left(j, table.final_letter(i));
        if j == UNDEFINED {
            return Err(EnumerationError::InternalInconsistency(format!(
                "left graph is missing an entry needed to square position {}",
                p
            )));
        }
        i = table.prefix(i);
    }
    Ok(j)
}
