//! Handle lifecycle: create, emit, destroy.

use crate::*;
use chronicle::prelude::*;
use chronicle::{EventLogReader, GuidAllocator};
use std::collections::HashSet;

#[test]
fn new_handle_is_empty() {
    let (ids, log) = setup();
    let handle = log.create::<u64, _>(&ids, &alice()).unwrap();

    assert_eq!(handle.position(), 0);
    assert_eq!(handle.identifier().creator_address(), alice());
    assert!(log.is_empty(handle.identifier()));
    handle.destroy();
}

#[test]
fn reference_scenario() {
    let (ids, log) = setup();
    let mut h = log.create::<u64, _>(&ids, &alice()).unwrap();
    let id_h = *h.identifier();

    log.emit(&mut h, 42).unwrap();
    assert_eq!(h.position(), 1);
    let first = log.sink().get(&id_h, 0).unwrap();
    assert_eq!(first.payload, CODEC.encode(&42u64).unwrap());

    log.emit(&mut h, 7).unwrap();
    assert_eq!(h.position(), 2);
    let second = log.sink().get(&id_h, 1).unwrap();
    assert_eq!(second.payload, CODEC.encode(&7u64).unwrap());

    let summary = h.destroy();
    assert_eq!(summary.identifier, id_h);
    assert_eq!(summary.length, 2);

    // Log still holds both entries, unchanged
    assert_eq!(log.len(&id_h), 2);
    assert_eq!(log.sink().get(&id_h, 0).unwrap(), first);
    assert_eq!(log.sink().get(&id_h, 1).unwrap(), second);
    assert_eq!(
        log.read_range::<u64>(&id_h, 0, 2).unwrap(),
        vec![(0, 42), (1, 7)]
    );
}

#[test]
fn identifiers_pairwise_distinct_same_owner_same_type() {
    let (ids, log) = setup();
    let handles: Vec<EventHandle<u64>> = (0..100)
        .map(|_| log.create(&ids, &alice()).unwrap())
        .collect();

    let distinct: HashSet<Guid> = handles.iter().map(|h| *h.identifier()).collect();
    assert_eq!(distinct.len(), handles.len());

    for h in handles {
        h.destroy();
    }
}

#[test]
fn identifiers_distinct_across_owners_and_types() {
    let (ids, log) = setup();
    let a = log.create::<u64, _>(&ids, &alice()).unwrap();
    let b = log.create::<String, _>(&ids, &alice()).unwrap();
    let c = log.create::<u64, _>(&ids, &bob()).unwrap();

    assert_ne!(a.identifier(), b.identifier());
    assert_ne!(a.identifier(), c.identifier());
    assert_ne!(b.identifier(), c.identifier());

    // Same creation number is fine across owners
    assert_eq!(a.identifier().creation_num(), 0);
    assert_eq!(c.identifier().creation_num(), 0);

    a.destroy();
    b.destroy();
    c.destroy();
}

#[test]
fn destroyed_guid_is_never_reissued() {
    let (ids, log) = setup();
    let first = log.create::<u64, _>(&ids, &alice()).unwrap();
    let old = first.destroy().identifier;

    let second = log.create::<u64, _>(&ids, &alice()).unwrap();
    assert_ne!(*second.identifier(), old);
    second.destroy();
}

#[test]
fn moving_a_handle_moves_emission_rights() {
    struct Account {
        deposits: EventHandle<u64>,
    }

    let (ids, log) = setup();
    let mut handle = log.create::<u64, _>(&ids, &alice()).unwrap();
    log.emit(&mut handle, 1).unwrap();

    let mut account = Account { deposits: handle };
    log.emit(&mut account.deposits, 2).unwrap();

    assert_eq!(account.deposits.position(), 2);
    assert!(log.verify_handle(&account.deposits).is_valid);
    account.deposits.destroy();
}

#[test]
fn chronicle_facade_end_to_end() {
    init_tracing();
    let chronicle = Chronicle::builder().codec(CodecKind::Json).build().unwrap();
    let mut handle = chronicle.create::<String>(&bob()).unwrap();

    chronicle.emit(&mut handle, "opened".to_string()).unwrap();
    chronicle.emit(&mut handle, "closed".to_string()).unwrap();

    let guid = *handle.identifier();
    assert_eq!(
        chronicle.read::<String>(&guid, 0).unwrap().as_deref(),
        Some("opened")
    );
    assert!(chronicle.verify(&handle).is_valid);

    let summary = handle.destroy();
    assert_eq!(summary.length, 2);
    assert!(chronicle.verify_stream(&guid, summary.length).is_valid);
    assert_eq!(chronicle.metrics().entries, 2);
}

#[test]
fn guid_key_round_trips_through_observer() {
    let (ids, log) = setup();
    let mut handle = log.create::<u64, _>(&ids, &alice()).unwrap();
    log.emit(&mut handle, 5).unwrap();

    // An observer that only saw the 40-byte key
    let key_bytes = handle.identifier().to_bytes();
    let guid = Guid::from_bytes(&key_bytes).unwrap();
    assert_eq!(log.read::<u64>(&guid, 0).unwrap(), Some(5));
    handle.destroy();
}

#[test]
fn seeded_allocator_continues_after_restore() {
    init_tracing();
    let ids = GuidAllocator::new();
    ids.seed(&alice(), 17);

    let chronicle = Chronicle::ephemeral().unwrap();
    let handle = chronicle
        .events()
        .create::<u64, _>(&ids, &alice())
        .unwrap();
    assert_eq!(handle.identifier().creation_num(), 17);
    handle.destroy();
}
