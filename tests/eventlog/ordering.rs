//! Ordering within a stream and independence across streams.

use crate::*;
use chronicle::prelude::*;
use chronicle::EventLogReader;
use std::thread;

#[test]
fn positions_follow_emission_order() {
    let (ids, log) = setup();
    let mut handle = log.create::<u64, _>(&ids, &alice()).unwrap();
    for value in (0..20u64).rev() {
        log.emit(&mut handle, value).unwrap();
    }

    let records = log.read_range::<u64>(handle.identifier(), 0, 20).unwrap();
    for (position, value) in records {
        assert_eq!(value, 19 - position);
    }
    handle.destroy();
}

#[test]
fn interleaved_streams_stay_independent() {
    let (ids, log) = setup();
    let mut a = log.create::<u64, _>(&ids, &alice()).unwrap();
    let mut b = log.create::<u64, _>(&ids, &alice()).unwrap();

    log.emit(&mut a, 1).unwrap();
    log.emit(&mut b, 100).unwrap();
    log.emit(&mut a, 2).unwrap();
    log.emit(&mut a, 3).unwrap();

    assert_eq!(a.position(), 3);
    assert_eq!(b.position(), 1);
    assert!(log.verify_handle(&a).is_valid);
    assert!(log.verify_handle(&b).is_valid);
    assert_eq!(log.read::<u64>(b.identifier(), 0).unwrap(), Some(100));

    a.destroy();
    b.destroy();
}

#[test]
fn concurrent_emission_on_distinct_handles() {
    init_tracing();
    let chronicle = Chronicle::builder().stream_capacity(16).build().unwrap();
    let owners: Vec<AccountAddress> = (1..=8u8).map(|b| AccountAddress::new([b; 32])).collect();

    let summaries: Vec<StreamSummary> = thread::scope(|scope| {
        let workers: Vec<_> = owners
            .iter()
            .map(|owner| {
                let chronicle = &chronicle;
                scope.spawn(move || {
                    let mut handle = chronicle.create::<u64>(owner).unwrap();
                    for i in 0..250 {
                        chronicle.emit(&mut handle, i).unwrap();
                    }
                    handle.destroy()
                })
            })
            .collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });

    for summary in &summaries {
        assert_eq!(summary.length, 250);
        let v = chronicle.verify_stream(&summary.identifier, summary.length);
        assert!(v.is_valid, "{:?}", v);
        let values: Vec<u64> = chronicle
            .read_range::<u64>(&summary.identifier, 0, 250)
            .unwrap()
            .into_iter()
            .map(|(_, v)| v)
            .collect();
        assert_eq!(values, (0..250).collect::<Vec<_>>());
    }
    assert_eq!(chronicle.metrics().entries, 8 * 250);
}

#[test]
fn observers_agree_on_digest() {
    let (ids, log) = setup();
    let mut handle = log.create::<String, _>(&ids, &alice()).unwrap();
    for word in ["mint", "transfer", "burn"] {
        log.emit(&mut handle, word.to_string()).unwrap();
    }
    let guid = *handle.identifier();

    // A second observer replays the raw entries into its own sink
    let mirror: EventLog<ShardedSink> = EventLog::new(Arc::new(ShardedSink::new()));
    for entry in log.sink().range_from(&guid, 0) {
        mirror
            .sink()
            .append(&entry.key, entry.position, entry.payload)
            .unwrap();
    }

    assert_eq!(log.stream_digest(&guid), mirror.stream_digest(&guid));
    assert_ne!(log.stream_digest(&guid), [0u8; 32]);

    // One more emission changes the digest
    let before = log.stream_digest(&guid);
    log.emit(&mut handle, "audit".to_string()).unwrap();
    assert_ne!(log.stream_digest(&guid), before);
    handle.destroy();
}

#[test]
fn tampered_mirror_changes_digest() {
    let (ids, log) = setup();
    let mut handle = log.create::<u64, _>(&ids, &bob()).unwrap();
    log.emit(&mut handle, 1).unwrap();
    log.emit(&mut handle, 2).unwrap();
    let guid = *handle.identifier();

    let mirror: EventLog<ShardedSink> = EventLog::new(Arc::new(ShardedSink::new()));
    mirror.sink().append(&guid, 0, CODEC.encode(&1u64).unwrap()).unwrap();
    mirror.sink().append(&guid, 1, CODEC.encode(&3u64).unwrap()).unwrap();

    assert_ne!(log.stream_digest(&guid), mirror.stream_digest(&guid));
    handle.destroy();
}
