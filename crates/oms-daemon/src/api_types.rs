//! Request and response types for the oms-daemon HTTP endpoints.
//!
//! Order and summary bodies reuse the `oms-core` types directly. Status
//! fields in request bodies are plain strings so that validation happens in
//! the store, which answers 400 rather than a JSON-extractor 422.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// /v1/health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: String,
    pub version: String,
    /// Orders currently held in memory.
    pub orders: usize,
}

// ---------------------------------------------------------------------------
// POST /orders/
// ---------------------------------------------------------------------------

/// Any `order_id` sent by the client is ignored; the store assigns ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub description: String,
    pub status: String,
    pub amount: f64,
}

// ---------------------------------------------------------------------------
// PUT /orders/{id}
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderRequest {
    pub status: String,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
}

// ---------------------------------------------------------------------------
// Errors (400 / 404)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub detail: String,
    /// "invalid_status" | "not_found" | "already_terminal" | "invalid_transition"
    pub kind: String,
}
