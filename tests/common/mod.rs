// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use semigroup_enum::element::{evaluate, ElementCapability, Transformation};
use semigroup_enum::{EnumerationFacade, MultiplicationTable, Transformations};

/// Right zero band on two elements: `x * y = y`.
pub fn right_zero() -> MultiplicationTable {
    MultiplicationTable::from_fn(2, |_, j| j).unwrap()
}

/// Monogenic semigroup `<g | g^(index + period) = g^index>`.
///
/// Element `k` is `g^(k + 1)`.
pub fn monogenic(index: usize, period: usize) -> MultiplicationTable {
    let order = index + period - 1;
    let reduce = |m: usize| {
        if m <= order {
            m
        } else {
            index + (m - index) % period
        }
    };
    MultiplicationTable::from_fn(order, |i, j| reduce(i + j + 2) - 1).unwrap()
}

/// Cyclic group of order `n` as a table, generated by element 1.
pub fn cyclic(n: usize) -> MultiplicationTable {
    MultiplicationTable::from_fn(n, |i, j| (i + j) % n).unwrap()
}

/// A cycle and a transposition, generating the symmetric group.
pub fn symmetric_generators(arena: &Transformations, n: usize) -> Vec<Transformation> {
    let cycle: Vec<usize> = (0..n).map(|i| (i + 1) % n).collect();
    let mut swap: Vec<usize> = (0..n).collect();
    swap.swap(0, 1);
    vec![arena.make(&cycle).unwrap(), arena.make(&swap).unwrap()]
}

/// Map collapsing 1 onto 0, which together with the symmetric group
/// generates the full transformation monoid.
pub fn collapse(arena: &Transformations, n: usize) -> Transformation {
    let mut images: Vec<usize> = (0..n).collect();
    images[1] = 0;
    arena.make(&images).unwrap()
}

pub fn full_transformation_generators(arena: &Transformations, n: usize) -> Vec<Transformation> {
    let mut gens = symmetric_generators(arena, n);
    gens.push(collapse(arena, n));
    gens
}

/// Check the tree, word and lookup identities at every discovered position.
pub fn check_consistency<C: ElementCapability>(facade: &mut EnumerationFacade<'_, C>) {
    let capability = facade.capability();
    let generators = facade.generators().to_vec();
    for p in 1..=facade.current_size() {
        let x = facade.element_at(p).unwrap();
        assert_eq!(facade.position(x).unwrap(), Some(p));

        let word = facade.factorization(p).unwrap();
        let value = evaluate(capability, &generators, &word).unwrap();
        assert!(capability.equal(value, x), "word {:?} of {}", word, p);

        if let Some(prefix) = facade.prefix(p).unwrap() {
            let last = generators[facade.final_letter(p).unwrap() - 1];
            let y = capability.product(facade.element_at(prefix).unwrap(), last);
            assert!(capability.equal(y, x));
        }
        if let Some(suffix) = facade.suffix(p).unwrap() {
            assert!(suffix < p);
            let first = generators[facade.first_letter(p).unwrap() - 1];
            let y = capability.product(first, facade.element_at(suffix).unwrap());
            assert!(capability.equal(y, x));
        }
    }
}
