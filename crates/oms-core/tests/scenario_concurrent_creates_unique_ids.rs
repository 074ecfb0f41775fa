//! Scenario: concurrent creates never share an id
//!
//! # Invariant under test
//! Id assignment and insertion are one indivisible step. With many callers
//! creating in parallel, the assigned ids are exactly `1..=N` with no gaps
//! or repeats, and every order is present in the store afterwards.

use std::collections::HashSet;
use std::sync::Arc;

use oms_core::{NewOrder, OrderStatus, OrderStore};

const CALLERS: usize = 32;
const CREATES_PER_CALLER: usize = 50;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn parallel_creates_produce_dense_unique_ids() {
    let store = Arc::new(OrderStore::new());

    let mut handles = Vec::with_capacity(CALLERS);
    for caller in 0..CALLERS {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            let mut ids = Vec::with_capacity(CREATES_PER_CALLER);
            for n in 0..CREATES_PER_CALLER {
                let order = store
                    .create(NewOrder::pending(format!("c{caller}-{n}"), 1.0))
                    .await;
                ids.push(order.id.get());
            }
            ids
        }));
    }

    let mut all = Vec::new();
    for handle in handles {
        all.extend(handle.await.unwrap());
    }

    let total = CALLERS * CREATES_PER_CALLER;
    let unique: HashSet<u64> = all.iter().copied().collect();
    assert_eq!(all.len(), total);
    assert_eq!(unique.len(), total, "duplicate ids assigned");

    all.sort_unstable();
    let expected: Vec<u64> = (1..=total as u64).collect();
    assert_eq!(all, expected, "ids must be dense starting at 1");

    let summary = store.summary().await;
    assert_eq!(summary.total_orders, total);
    assert_eq!(summary.total_amount, total as f64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn racing_updates_on_one_order_admit_exactly_one_winner() {
    let store = Arc::new(OrderStore::new());
    let id = store.create(NewOrder::pending("contended", 9.0)).await.id;

    let mut handles = Vec::new();
    for n in 0..16 {
        let store = Arc::clone(&store);
        let requested = if n % 2 == 0 {
            OrderStatus::Cancelled
        } else {
            OrderStatus::Successful
        };
        handles.push(tokio::spawn(async move {
            store
                .update_status(id, requested, Some("race"))
                .await
                .is_ok()
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1, "only the first update may leave Pending");

    let stored = store.get(id).await.unwrap();
    assert!(stored.status.is_terminal());
    match stored.status {
        OrderStatus::Cancelled => assert_eq!(stored.cancellation_reasons, vec!["race"]),
        _ => assert!(stored.cancellation_reasons.is_empty()),
    }
}
