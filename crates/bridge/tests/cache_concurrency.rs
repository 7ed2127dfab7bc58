//! The cache under one writer and many concurrent readers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use agrolink_bridge::cache::SensorCache;
use agrolink_core::sensor::{SensorKind, SensorReading};
use chrono::{DateTime, Utc};

/// Each write encodes its value in the timestamp so a torn read would show
/// a mismatch.
fn reading_for(i: u32) -> SensorReading {
    let at = DateTime::<Utc>::from_timestamp(1_700_000_000 + i64::from(i), 0).unwrap();
    SensorReading::online(f64::from(i), at)
}

fn is_consistent(reading: &SensorReading) -> bool {
    match (reading.value, reading.timestamp) {
        (None, None) => true,
        (Some(value), Some(at)) => at.timestamp() == 1_700_000_000 + value as i64,
        _ => false,
    }
}

#[test]
fn readers_never_observe_torn_or_partial_snapshots() {
    let cache = SensorCache::new();
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let cache = cache.clone();
        let done = Arc::clone(&done);
        thread::spawn(move || {
            for i in 0..5_000 {
                let kind = SensorKind::ALL[i as usize % 3];
                cache.set(kind, reading_for(i));
                if i % 97 == 0 {
                    cache.mark_all_error();
                }
            }
            done.store(true, Ordering::Release);
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let cache = cache.clone();
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut observed = 0u64;
                while !done.load(Ordering::Acquire) {
                    let snapshot = cache.snapshot();
                    assert_eq!(snapshot.len(), 3);
                    for (_, reading) in snapshot.iter() {
                        assert!(is_consistent(reading), "torn reading: {reading:?}");
                    }
                    let single = cache.get("soil_moisture").unwrap();
                    assert!(is_consistent(&single), "torn reading: {single:?}");
                    observed += 1;
                }
                observed
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(cache.snapshot().len(), 3);
}
