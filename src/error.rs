// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for enumeration.
//!
//! "Not found" is not an error: lookups return `Ok(None)` when an element is
//! absent from the (current or final) element table.

use thiserror::Error;

/// Errors reported by the facade and its engines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumerationError {
    /// Rejected before any engine call (empty or inconsistent generators,
    /// zero limits, zero positions, malformed snapshots).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The position lies beyond the final, or currently provable, size.
    #[error("position {position} is out of range (size {size})")]
    PositionOutOfRange { position: usize, size: usize },

    /// The caller's policy forbids the full enumeration this operation needs.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A table or cache invariant is broken. Fatal.
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),
}

impl EnumerationError {
    /// True for errors that indicate a broken invariant rather than a bad request.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EnumerationError::InternalInconsistency(_))
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EnumerationError>;
