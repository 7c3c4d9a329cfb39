#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use mars_core::{HandleState, StoreStatus, VisitCount, COUNTER_KEY};
use mars_server::counter::VisitCounter;
use mars_server::store::MemoryStore;

fn counter_with_store() -> (VisitCounter, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (VisitCounter::new(store.clone()), store)
}

#[tokio::test]
async fn sequential_increments_strictly_increase() {
    let (counter, store) = counter_with_store();
    store.set_raw(COUNTER_KEY, "41");

    let start = counter.read().await.unwrap();
    let mut last = start;
    for i in 1..=10 {
        match counter.increment_and_read().await.unwrap() {
            VisitCount::Known(n) => {
                assert_eq!(n, start + i);
                assert!(n > last);
                last = n;
            }
            VisitCount::Unknown => panic!("store is present"),
        }
    }
    assert_eq!(counter.read().await.unwrap(), 51);
}

#[tokio::test]
async fn absent_handle_degrades() {
    let counter = VisitCounter::unavailable();

    assert_eq!(counter.handle_state(), HandleState::Unavailable);
    assert_eq!(counter.increment_and_read().await.unwrap(), VisitCount::Unknown);
    assert_eq!(counter.read().await.unwrap(), 0);
    assert!(!counter.is_alive().await);
    assert_eq!(counter.store_status().await, StoreStatus::Disconnected);
}

#[tokio::test]
async fn missing_key_reads_zero() {
    let (counter, _store) = counter_with_store();
    assert_eq!(counter.read().await.unwrap(), 0);
}

#[tokio::test]
async fn outage_is_observed_but_handle_stays() {
    let (counter, store) = counter_with_store();
    assert!(counter.is_alive().await);

    store.set_available(false);
    assert!(!counter.is_alive().await);
    assert_eq!(counter.handle_state(), HandleState::Connected);
    assert_eq!(counter.read().await.unwrap(), 0);

    let err = counter.increment_and_read().await.expect_err("store is down");
    assert!(err.is_transient());

    store.set_available(true);
    assert!(counter.is_alive().await);
    assert_eq!(counter.increment_and_read().await.unwrap(), VisitCount::Known(1));
}

#[tokio::test]
async fn non_integer_value_is_an_error() {
    let (counter, store) = counter_with_store();
    store.set_raw(COUNTER_KEY, "lots");

    let err = counter.read().await.expect_err("not an integer");
    assert_eq!(err.code().as_str(), "STORE");
    assert!(counter.increment_and_read().await.is_err());
}

#[tokio::test]
async fn concurrent_increments_are_not_lost() {
    let (counter, _store) = counter_with_store();

    let tasks: Vec<_> = (0..50)
        .map(|_| {
            let c = counter.clone();
            tokio::spawn(async move { c.increment_and_read().await.unwrap() })
        })
        .collect();
    for t in tasks {
        t.await.unwrap();
    }

    assert_eq!(counter.read().await.unwrap(), 50);
}
