// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Full transformations stored in an interning arena.
//!
//! A transformation of degree `n` maps `{0, ..., n-1}` to itself and is
//! written as its image list. The arena interns every image list it sees, so
//! two handles are equal exactly when the transformations are equal and
//! handle equality and hashing never touch the images.
//!
//! # Example
//!
//! ```
//! use semigroup_enum::element::{ElementCapability, Transformations};
//!
//! let arena = Transformations::new();
//! let cycle = arena.make(&[1, 2, 0]).unwrap();
//! let square = arena.product(cycle, cycle);
//! assert_eq!(arena.images(square), vec![2, 0, 1]);
//! assert_eq!(arena.product(square, cycle), arena.identity(3).unwrap());
//! ```

use std::cell::RefCell;
use std::cmp::Ordering;

use rustc_hash::FxHashMap;

use super::{ElementCapability, TypeTag};
use crate::error::{EnumerationError, Result};

/// Handle to a transformation interned in a [`Transformations`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transformation(u32);

impl Transformation {
    /// Index of this transformation in its arena.
    pub fn id(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Default)]
struct Arena {
    images: Vec<Box<[u32]>>,
    ids: FxHashMap<Box<[u32]>, u32>,
}

/// Interning arena and capability for full transformations.
///
/// Products allocate into the arena through interior mutability; the arena
/// must outlive every facade that holds its handles.
#[derive(Debug, Default)]
pub struct Transformations {
    arena: RefCell<Arena>,
}

impl Transformations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern the transformation with the given image list.
    pub fn make(&self, images: &[usize]) -> Result<Transformation> {
        let degree = images.len();
        check_degree(degree)?;
        if let Some(&bad) = images.iter().find(|&&x| x >= degree) {
            return Err(EnumerationError::InvalidArgument(format!(
                "image {} is not a point of degree {}",
                bad, degree
            )));
        }
        let images: Box<[u32]> = images.iter().map(|&x| x as u32).collect();
        Ok(self.intern(images))
    }

    /// The identity transformation of the given degree.
    pub fn identity(&self, degree: usize) -> Result<Transformation> {
        check_degree(degree)?;
        let images: Box<[u32]> = (0..degree as u32).collect();
        Ok(self.intern(images))
    }

    /// Image list of an interned transformation.
    pub fn images(&self, x: Transformation) -> Vec<usize> {
        self.arena.borrow().images[x.id()]
            .iter()
            .map(|&i| i as usize)
            .collect()
    }

    /// Number of distinct transformations interned so far.
    pub fn len(&self) -> usize {
        self.arena.borrow().images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn intern(&self, images: Box<[u32]>) -> Transformation {
        let mut arena = self.arena.borrow_mut();
        if let Some(&id) = arena.ids.get(&images) {
            return Transformation(id);
        }
        let id = arena.images.len() as u32;
        arena.images.push(images.clone());
        arena.ids.insert(images, id);
        Transformation(id)
    }
}

impl ElementCapability for Transformations {
    type Handle = Transformation;

    fn equal(&self, a: Transformation, b: Transformation) -> bool {
        a == b
    }

    fn product(&self, a: Transformation, b: Transformation) -> Transformation {
        let images: Box<[u32]> = {
            let arena = self.arena.borrow();
            let (x, y) = (&arena.images[a.id()], &arena.images[b.id()]);
            x.iter().map(|&i| y[i as usize]).collect()
        };
        self.intern(images)
    }

    fn hash(&self, a: Transformation) -> u64 {
        a.0 as u64
    }

    fn compare(&self, a: Transformation, b: Transformation) -> Ordering {
        let arena = self.arena.borrow();
        let (x, y) = (&arena.images[a.id()], &arena.images[b.id()]);
        x.len().cmp(&y.len()).then_with(|| x.cmp(y))
    }

    fn type_tag(&self, _a: Transformation) -> TypeTag {
        TypeTag::Transformation
    }

    fn degree(&self, a: Transformation) -> usize {
        self.arena.borrow().images[a.id()].len()
    }
}

fn check_degree(degree: usize) -> Result<()> {
    if degree == 0 {
        return Err(EnumerationError::InvalidArgument(
            "a transformation needs at least one point".to_string(),
        ));
    }
    if degree > u32::MAX as usize {
        return Err(EnumerationError::InvalidArgument(format!(
            "degree {} is too large",
            degree
        )));
    }
    Ok(())
}
