//! Shared runtime state for oms-daemon.
//!
//! Handlers receive `State<Arc<AppState>>` from Axum. The order store is the
//! only mutable domain state; it is built once here and shared by reference.

use std::sync::Arc;
use std::time::Duration;

use oms_core::{Order, OrderStore};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::config::{DaemonConfig, DEFAULT_BUS_CAPACITY};

// ---------------------------------------------------------------------------
// BusMsg: SSE event bus payload
// ---------------------------------------------------------------------------

/// Messages broadcast over the internal event bus and surfaced as SSE events.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BusMsg {
    Heartbeat { ts_millis: i64 },
    OrderCreated { order: Order },
    OrderUpdated { order: Order },
}

impl BusMsg {
    /// SSE `event:` name.
    pub fn event_name(&self) -> &'static str {
        match self {
            BusMsg::Heartbeat { .. } => "heartbeat",
            BusMsg::OrderCreated { .. } => "order_created",
            BusMsg::OrderUpdated { .. } => "order_updated",
        }
    }
}

// ---------------------------------------------------------------------------
// BuildInfo
// ---------------------------------------------------------------------------

/// Static build metadata included in health responses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Cloneable handle shared across all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<OrderStore>,
    /// Broadcast bus for SSE.
    pub bus: broadcast::Sender<BusMsg>,
    pub build: BuildInfo,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_bus_capacity(DEFAULT_BUS_CAPACITY)
    }

    pub fn from_config(cfg: &DaemonConfig) -> Self {
        Self::with_bus_capacity(cfg.event_bus_capacity)
    }

    pub fn with_bus_capacity(capacity: usize) -> Self {
        let (bus, _rx) = broadcast::channel::<BusMsg>(capacity);
        Self {
            store: Arc::new(OrderStore::new()),
            bus,
            build: BuildInfo {
                service: "oms-daemon",
                version: env!("CARGO_PKG_VERSION"),
            },
        }
    }

    /// Publish to SSE subscribers. No subscribers is not an error.
    pub fn publish(&self, msg: BusMsg) {
        let _ = self.bus.send(msg);
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Spawn a background task that emits a heartbeat SSE every `interval`.
pub fn spawn_heartbeat(bus: broadcast::Sender<BusMsg>, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let ts = chrono::Utc::now().timestamp_millis();
            let _ = bus.send(BusMsg::Heartbeat { ts_millis: ts });
        }
    });
}
