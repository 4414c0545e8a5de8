// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mutable bookkeeping owned by a facade: lifecycle phase and statistics.

pub mod statistics;

pub use statistics::{Counters, Statistics};

/// Lifecycle of a facade.
///
/// ```text
/// Created ──> Growing ──> Idle ──> Growing ──> ... ──> Done
///                 ^                                     │
///                 └──────────── add_generators ─────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum FacadeState {
    /// Only the generators are known; no growth step has run.
    Created,
    /// A growth step is running, or new generators are waiting to be applied.
    Growing,
    /// The last growth step satisfied its request; more elements may exist.
    Idle,
    /// The engine has proven that no further elements exist.
    Done,
}
