// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Snapshots of facade state and option records.

mod common;

use semigroup_enum::{
    BackendPreference, EnumerationError, EnumerationFacade, EnumerationOptions, MultiplicationTable,
    Snapshot,
};

#[test]
fn test_snapshot_tracks_caches() {
    let table = common::monogenic(3, 2);
    let g = table.element(0).unwrap();
    let mut facade = EnumerationFacade::new(&table, &[g]).unwrap();
    facade.enumerate(2).unwrap();

    let partial = facade.snapshot();
    assert_eq!(partial.generators, vec![1]);
    assert!(partial.sorted.is_none());
    assert!(partial.relations.is_none());

    assert_eq!(facade.size().unwrap(), 4);
    let relations = facade.relations().unwrap().to_vec();
    facade.sorted_elements().unwrap();
    let full = facade.snapshot();
    assert_eq!(full.nr_elements(), 4);
    assert_eq!(full.prefix, vec![0, 1, 2, 3]);
    assert_eq!(full.final_letter, vec![1, 1, 1, 1]);
    assert_eq!(full.sorted, Some(vec![1, 2, 3, 4]));
    assert_eq!(full.relations, Some(relations));

    let bytes = full.to_bytes().unwrap();
    assert_eq!(Snapshot::from_bytes(&bytes).unwrap(), full);
    assert!(matches!(
        Snapshot::from_bytes(&bytes[..bytes.len() - 8]),
        Err(EnumerationError::InvalidArgument(_))
    ));
}

fn right_zero_snapshot(table: &MultiplicationTable) -> Vec<u8> {
    let gens = [table.element(1).unwrap(), table.element(0).unwrap()];
    let mut facade = EnumerationFacade::new(table, &gens).unwrap();
    facade.relations().unwrap();
    facade.snapshot().to_bytes().unwrap()
}

#[test]
fn test_snapshot_is_stable() {
    let table = common::right_zero();
    assert_eq!(right_zero_snapshot(&table), right_zero_snapshot(&table));
}

#[test]
fn test_snapshot_json() {
    let table = common::cyclic(4);
    let mut facade = EnumerationFacade::new(&table, &[table.element(1).unwrap()]).unwrap();
    facade.relations().unwrap();
    let snapshot = facade.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}

#[test]
fn test_ragged_snapshot_from_json() {
    let json = r#"{
        "generators": [1],
        "prefix": [0, 1],
        "suffix": [0],
        "first_letter": [1, 1],
        "final_letter": [1, 1],
        "sorted": null,
        "relations": null
    }"#;
    let snapshot: Snapshot = serde_json::from_str(json).unwrap();
    assert!(matches!(
        snapshot.to_bytes(),
        Err(EnumerationError::InvalidArgument(_))
    ));
}

#[test]
fn test_options_from_json() {
    let options: EnumerationOptions =
        serde_json::from_str(r#"{"batch_size": 16, "backend": "generic"}"#).unwrap();
    assert_eq!(options.batch_size, 16);
    assert_eq!(options.backend, BackendPreference::Generic);
    assert!(!options.report);
    assert!(options.allow_full_enumeration);

    let defaults: EnumerationOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(defaults, EnumerationOptions::default());

    let zero: EnumerationOptions = serde_json::from_str(r#"{"batch_size": 0}"#).unwrap();
    let table = common::right_zero();
    assert!(matches!(
        EnumerationFacade::create(&table, &table.elements(), zero),
        Err(EnumerationError::InvalidArgument(_))
    ));
}
