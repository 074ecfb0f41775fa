use std::fmt;

use serde::{Deserialize, Serialize};

use crate::status::OrderStatus;

/// Store-assigned order identifier. Starts at 1, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl OrderId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single order record.
///
/// Callers only ever see clones; the authoritative copy lives inside
/// [`crate::OrderStore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "order_id")]
    pub id: OrderId,
    pub description: String,
    pub status: OrderStatus,
    /// Never mutated after creation.
    pub amount: f64,
    /// Append-only. Non-empty iff the order was cancelled via an update.
    #[serde(default)]
    pub cancellation_reasons: Vec<String>,
}

/// Caller-supplied fields for a new order; the id comes from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub description: String,
    pub status: OrderStatus,
    pub amount: f64,
}

impl NewOrder {
    pub fn new(description: impl Into<String>, status: OrderStatus, amount: f64) -> Self {
        Self {
            description: description.into(),
            status,
            amount,
        }
    }

    pub fn pending(description: impl Into<String>, amount: f64) -> Self {
        Self::new(description, OrderStatus::Pending, amount)
    }
}

/// Aggregate figures over every order currently held.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub total_orders: usize,
    pub total_amount: f64,
}
