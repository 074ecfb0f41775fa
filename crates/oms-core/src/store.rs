//! In-memory order store.
//!
//! # Thread-safety
//! The id sequence and the order map sit behind one `RwLock`. `create` and
//! `update_status` hold the write side for their whole critical section, so
//! mutations are linearizable and no two creates can draw the same id.
//! `list`, `get` and `summary` take the read side and may run concurrently
//! with each other, never with a writer, so no caller observes a half-applied
//! update.
//!
//! Share the store as `Arc<OrderStore>`; there is no process-global instance.

use std::collections::BTreeMap;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::OmsError;
use crate::order::{NewOrder, Order, OrderId, OrderSummary};
use crate::status::OrderStatus;
use crate::transition;

#[derive(Debug)]
struct Book {
    orders: BTreeMap<OrderId, Order>,
    next_id: u64,
}

impl Default for Book {
    fn default() -> Self {
        Self {
            orders: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// Owns every order for the lifetime of the process.
#[derive(Debug, Default)]
pub struct OrderStore {
    book: RwLock<Book>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next id and store the order.
    ///
    /// The status is taken as given; creation does not run the transition
    /// rules, so an order may be seeded directly as Successful or Cancelled.
    pub async fn create(&self, new: NewOrder) -> Order {
        let mut book = self.book.write().await;

        let id = OrderId(book.next_id);
        book.next_id += 1;

        let order = Order {
            id,
            description: new.description,
            status: new.status,
            amount: new.amount,
            cancellation_reasons: Vec::new(),
        };
        book.orders.insert(id, order.clone());
        drop(book);

        info!(order_id = %id, status = %order.status, amount = order.amount, "order created");
        order
    }

    /// [`create`](Self::create) from an unvalidated status string.
    ///
    /// # Errors
    /// [`OmsError::InvalidStatus`]; no id is consumed.
    pub async fn create_raw(
        &self,
        description: impl Into<String>,
        status: &str,
        amount: f64,
    ) -> Result<Order, OmsError> {
        let status = OrderStatus::parse(status)?;
        Ok(self.create(NewOrder::new(description, status, amount)).await)
    }

    /// Snapshot of all orders in ascending id (insertion) order.
    pub async fn list(&self) -> Vec<Order> {
        let book = self.book.read().await;
        book.orders.values().cloned().collect()
    }

    /// # Errors
    /// [`OmsError::NotFound`] if `id` was never assigned.
    pub async fn get(&self, id: OrderId) -> Result<Order, OmsError> {
        let book = self.book.read().await;
        let order = book.orders.get(&id).cloned();
        drop(book);

        debug!(order_id = %id, found = order.is_some(), "order lookup");
        order.ok_or(OmsError::NotFound { id })
    }

    /// Order count and amount total, both read under the same guard.
    pub async fn summary(&self) -> OrderSummary {
        let book = self.book.read().await;
        OrderSummary {
            total_orders: book.orders.len(),
            total_amount: book.orders.values().map(|o| o.amount).sum(),
        }
    }

    /// Move a Pending order to Successful or Cancelled.
    ///
    /// Lookup, decision and write happen under one write guard. On error the
    /// order is left exactly as it was.
    ///
    /// # Errors
    /// - [`OmsError::NotFound`] for an unknown id.
    /// - [`OmsError::AlreadyTerminal`] / [`OmsError::InvalidTransition`] from
    ///   [`transition::decide`].
    pub async fn update_status(
        &self,
        id: OrderId,
        requested: OrderStatus,
        reason: Option<&str>,
    ) -> Result<Order, OmsError> {
        let mut book = self.book.write().await;

        let result = match book.orders.get_mut(&id) {
            None => Err(OmsError::NotFound { id }),
            Some(order) => transition::decide(id, order.status, requested, reason).map(|t| {
                t.apply(order);
                order.clone()
            }),
        };
        drop(book);

        match &result {
            Ok(order) => info!(order_id = %id, status = %order.status, "order status updated"),
            Err(err) => warn!(
                order_id = %id,
                requested = %requested,
                kind = err.kind().as_str(),
                "order status update refused"
            ),
        }
        result
    }

    /// [`update_status`](Self::update_status) from an unvalidated status
    /// string. The string is checked before the store is touched.
    ///
    /// # Errors
    /// [`OmsError::InvalidStatus`] plus everything `update_status` returns.
    pub async fn update_status_raw(
        &self,
        id: OrderId,
        requested: &str,
        reason: Option<&str>,
    ) -> Result<Order, OmsError> {
        let requested = OrderStatus::parse(requested)?;
        self.update_status(id, requested, reason).await
    }

    pub async fn len(&self) -> usize {
        self.book.read().await.orders.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.book.read().await.orders.is_empty()
    }
}
