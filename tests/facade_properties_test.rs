// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Invariants that must hold for every facade, on both engines.

mod common;

use std::cmp::Ordering;

use semigroup_enum::element::evaluate;
use semigroup_enum::{
    BackendPreference, ElementCapability, EnumerationError, EnumerationFacade,
    EnumerationOptions, Side, Transformations,
};

fn options(backend: BackendPreference) -> EnumerationOptions {
    EnumerationOptions::default()
        .with_batch_size(5)
        .with_backend(backend)
}

#[test]
fn test_tree_and_word_identities() {
    for backend in [BackendPreference::Auto, BackendPreference::Generic] {
        let arena = Transformations::new();
        let gens = common::full_transformation_generators(&arena, 3);
        let mut facade = EnumerationFacade::create(&arena, &gens, options(backend)).unwrap();

        facade.enumerate(12).unwrap();
        common::check_consistency(&mut facade);
        facade.size().unwrap();
        common::check_consistency(&mut facade);
    }
}

#[test]
fn test_done_means_size_is_final() {
    let arena = Transformations::new();
    let gens = common::full_transformation_generators(&arena, 3);
    let mut facade = EnumerationFacade::new(&arena, &gens).unwrap();
    facade.enumerate(27).unwrap();
    // Row processing stops as soon as the target is met.
    assert!(!facade.is_done());

    let size = facade.size().unwrap();
    assert!(facade.is_done());
    assert_eq!(facade.current_size(), size);
    facade.relations().unwrap();
    facade.nr_idempotents().unwrap();
    facade.enumerate(1000).unwrap();
    assert_eq!(facade.size().unwrap(), size);
}

#[test]
fn test_word_lengths_follow_prefix_chain() {
    let arena = Transformations::new();
    let gens = common::full_transformation_generators(&arena, 3);
    let mut facade = EnumerationFacade::new(&arena, &gens).unwrap();
    let size = facade.size().unwrap();
    let mut longest = 0;
    for p in 1..=size {
        let length = facade.word_length(p).unwrap();
        match facade.prefix(p).unwrap() {
            Some(q) => assert_eq!(facade.word_length(q).unwrap() + 1, length),
            None => assert_eq!(length, 1),
        }
        longest = longest.max(length);
    }
    assert_eq!(facade.current_max_word_length(), longest);
}

#[test]
fn test_relations_hold() {
    for backend in [BackendPreference::Auto, BackendPreference::Generic] {
        let arena = Transformations::new();
        let gens = common::full_transformation_generators(&arena, 3);
        let mut facade = EnumerationFacade::create(&arena, &gens, options(backend)).unwrap();
        let relations = facade.relations().unwrap().to_vec();
        assert!(!relations.is_empty());
        assert_eq!(relations.len(), facade.current_nr_rules());
        for relation in &relations {
            let lhs = evaluate(&arena, &gens, &relation.lhs).unwrap();
            let rhs = evaluate(&arena, &gens, &relation.rhs).unwrap();
            assert_eq!(lhs, rhs, "{}", relation);
        }
    }
}

#[test]
fn test_cayley_graphs_and_table() {
    for backend in [BackendPreference::Auto, BackendPreference::Generic] {
        let arena = Transformations::new();
        let gens = common::symmetric_generators(&arena, 3);
        let mut facade = EnumerationFacade::create(&arena, &gens, options(backend)).unwrap();
        let table = facade.cayley_table().unwrap();
        let elements = facade.elements().unwrap();
        assert_eq!(table.len(), 6);

        for (i, row) in table.iter().enumerate() {
            for (j, &k) in row.iter().enumerate() {
                assert_eq!(arena.product(elements[i], elements[j]), elements[k - 1]);
            }
        }

        let right = facade.cayley_graph(Side::Right);
        let left = facade.cayley_graph(Side::Left);
        assert_eq!((right.nr_rows(), left.nr_rows()), (6, 6));
        for p in 1..=6 {
            for (letter, &g) in gens.iter().enumerate() {
                let x = elements[p - 1];
                let r = right.get(p, letter + 1).unwrap();
                let l = left.get(p, letter + 1).unwrap();
                assert_eq!(elements[r - 1], arena.product(x, g));
                assert_eq!(elements[l - 1], arena.product(g, x));
            }
        }
    }
}

#[test]
fn test_partial_cayley_graph() {
    let arena = Transformations::new();
    let gens = common::full_transformation_generators(&arena, 4);
    let mut facade =
        EnumerationFacade::create(&arena, &gens, options(BackendPreference::Auto)).unwrap();
    facade.enumerate(20).unwrap();
    let right = facade.cayley_graph(Side::Right);
    assert!(right.nr_rows() > 0);
    assert!(right.nr_rows() < facade.current_size());
    for row in right.rows() {
        assert!(row.iter().all(|&p| p >= 1 && p <= facade.current_size()));
    }
}

#[test]
fn test_sorted_access() {
    let arena = Transformations::new();
    let gens = common::full_transformation_generators(&arena, 3);
    let mut facade = EnumerationFacade::new(&arena, &gens).unwrap();
    let sorted = facade.sorted_elements().unwrap();
    assert_eq!(sorted.len(), 27);
    for pair in sorted.windows(2) {
        assert_eq!(arena.compare(pair[0], pair[1]), Ordering::Less);
    }
    assert_eq!(arena.images(sorted[0]), vec![0, 0, 0]);

    for (rank, &x) in sorted.iter().enumerate() {
        assert_eq!(facade.element_at_sorted(rank + 1).unwrap(), x);
        assert_eq!(facade.position_sorted(x).unwrap(), Some(rank + 1));
    }
    let from_iter: Vec<_> = facade.iter_sorted().map(|x| x.unwrap()).collect();
    assert_eq!(from_iter, sorted);
}

#[test]
fn test_absent_element() {
    let arena = Transformations::new();
    let gens = common::symmetric_generators(&arena, 3);
    let mut facade = EnumerationFacade::new(&arena, &gens).unwrap();
    let constant = arena.make(&[0, 0, 0]).unwrap();
    assert_eq!(facade.position(constant).unwrap(), None);
    assert!(facade.is_done());
    assert_eq!(facade.position_sorted(constant).unwrap(), None);
    assert_eq!(facade.position_current(constant).unwrap(), None);
}

#[test]
fn test_add_empty_generators_rejected() {
    for backend in [BackendPreference::Auto, BackendPreference::Generic] {
        let arena = Transformations::new();
        let gens = common::symmetric_generators(&arena, 3);
        let mut facade = EnumerationFacade::create(&arena, &gens, options(backend)).unwrap();
        facade.size().unwrap();
        assert!(matches!(
            facade.add_generators(&[]),
            Err(EnumerationError::InvalidArgument(_))
        ));
        assert!(matches!(
            facade.closure(&[]),
            Err(EnumerationError::InvalidArgument(_))
        ));
        assert_eq!(facade.size().unwrap(), 6);
    }
}
