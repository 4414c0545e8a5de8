// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Incremental, resumable enumeration of finitely generated semigroups.
//!
//! Given generators and an [`ElementCapability`] that knows how to multiply,
//! compare and hash them, an [`EnumerationFacade`] discovers the elements of
//! the generated semigroup on demand, together with its Cayley graphs,
//! defining relations and a factorization of every element.
//!
//! # Architecture
//!
//! ## Engines
//!
//! Enumeration is breadth-first in shortlex order of words over the
//! generators (Froidure–Pin). Two engines share one element table layout:
//! - [`FastEngine`]: reads most products off the Cayley graphs instead of
//!   multiplying; chosen for canonical element encodings
//! - [`GenericEngine`]: multiplies every product through the capability;
//!   chosen for opaque elements
//!
//! Both produce the same positions, words, graphs and relations.
//!
//! ## Facade
//!
//! The facade owns the engine and all derived caches: factorizations, the
//! sorted index, relations and the idempotent count. It grows the table in
//! batches just far enough to answer each query. Growth is resumable and
//! never renumbers positions, including when generators are added.
//!
//! ## Numbering
//!
//! Outward positions and letters are 1-based. Lookups of absent elements
//! return `Ok(None)`.
//!
//! # Example
//!
//! ```
//! use semigroup_enum::{EnumerationFacade, Transformations};
//!
//! let arena = Transformations::new();
//! let gens = [
//!     arena.make(&[1, 2, 0]).unwrap(),
//!     arena.make(&[1, 0, 2]).unwrap(),
//!     arena.make(&[0, 0, 2]).unwrap(),
//! ];
//! let mut facade = EnumerationFacade::new(&arena, &gens).unwrap();
//! assert_eq!(facade.size().unwrap(), 27);
//! assert_eq!(facade.nr_idempotents().unwrap(), 10);
//! ```
//!
//! # References
//!
//! - Froidure, V. and Pin, J.-E. (1997). "Algorithms for computing finite
//!   semigroups." Foundations of Computational Mathematics, 112-126.

pub mod element;
pub mod engine;
pub mod error;
pub mod facade;
pub mod memo;
pub mod options;
pub mod state;

// Re-export commonly used types
pub use element::{
    ElementCapability, ElementHandle, MultiplicationTable, Transformations, TypeTag,
};
pub use engine::{EngineKind, EnumerationEngine, FastEngine, GenericEngine, Side};
pub use error::{EnumerationError, Result};
pub use facade::{CayleyGraph, Cursor, EnumerationFacade, Limit, Order, Snapshot};
pub use memo::{Relation, Word};
pub use options::{BackendPreference, EnumerationOptions};
pub use state::{Counters, FacadeState, Statistics};
