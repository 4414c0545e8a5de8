// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Derived artifacts memoized by the facade.
//!
//! Everything here is computed from an engine's [`ElementTable`] and can be
//! thrown away and rebuilt at any time:
//! - [`FactorizationCache`]: words for positions, filled on demand
//! - [`SortedIndex`]: discovery order to sorted order and back
//! - [`Relation`]: defining relations as pairs of words
//! - [`count_idempotents`]: idempotent count from the left graph
//!
//! [`ElementTable`]: crate::engine::ElementTable

pub mod idempotents;
pub mod relations;
pub mod sorted;
pub mod words;

pub use idempotents::count_idempotents;
pub use relations::Relation;
pub use sorted::SortedIndex;
pub use words::{FactorizationCache, Word};
