//! Scenario: readers racing writers never see a half-applied mutation
//!
//! # Invariant under test
//! `list()` and `summary()` may run while creates and status updates are in
//! flight, but each call returns a consistent snapshot: every order is
//! either Pending with no reasons or Cancelled with exactly one reason, the
//! amount total matches the orders counted, and counts never go backwards.

use std::sync::Arc;

use oms_core::{NewOrder, OrderId, OrderStatus, OrderStore};

const WRITERS: usize = 8;
const CREATES_PER_WRITER: usize = 250;
const READERS: usize = 4;
const AMOUNT: f64 = 2.0;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn snapshots_stay_consistent_under_concurrent_writes() {
    let store = Arc::new(OrderStore::new());

    let mut writers = Vec::with_capacity(WRITERS);
    for writer in 0..WRITERS {
        let store = Arc::clone(&store);
        writers.push(tokio::spawn(async move {
            for n in 0..CREATES_PER_WRITER {
                let order = store
                    .create(NewOrder::pending(format!("w{writer}-{n}"), AMOUNT))
                    .await;
                if n % 2 == 0 {
                    store
                        .update_status(order.id, OrderStatus::Cancelled, Some("restock"))
                        .await
                        .unwrap();
                }
            }
        }));
    }

    let mut readers = Vec::with_capacity(READERS);
    for _ in 0..READERS {
        let store = Arc::clone(&store);
        readers.push(tokio::spawn(async move {
            let mut last_total = 0;
            let mut last_len = 0;
            let total = WRITERS * CREATES_PER_WRITER;
            while last_total < total {
                let summary = store.summary().await;
                assert_eq!(summary.total_amount, summary.total_orders as f64 * AMOUNT);
                assert!(summary.total_orders >= last_total, "total_orders went down");
                last_total = summary.total_orders;

                let orders = store.list().await;
                assert!(orders.len() >= last_len, "list shrank");
                last_len = orders.len();

                let listed: f64 = orders.iter().map(|o| o.amount).sum();
                assert_eq!(listed, orders.len() as f64 * AMOUNT);

                for order in &orders {
                    match order.status {
                        OrderStatus::Pending => assert!(order.cancellation_reasons.is_empty()),
                        OrderStatus::Cancelled => {
                            assert_eq!(order.cancellation_reasons, vec!["restock"])
                        }
                        OrderStatus::Successful => panic!("no writer completes orders"),
                    }
                }
                tokio::task::yield_now().await;
            }
        }));
    }

    for handle in writers {
        handle.await.unwrap();
    }
    for handle in readers {
        handle.await.unwrap();
    }

    let summary = store.summary().await;
    assert_eq!(summary.total_orders, WRITERS * CREATES_PER_WRITER);

    let cancelled = store
        .list()
        .await
        .iter()
        .filter(|o| o.status == OrderStatus::Cancelled)
        .count();
    assert_eq!(cancelled, WRITERS * CREATES_PER_WRITER / 2);
    assert!(store.get(OrderId(1)).await.is_ok());
}
