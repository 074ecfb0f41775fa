//! Axum router and all HTTP handlers for oms-daemon.
//!
//! `build_router` is the single entry point; `main.rs` calls it and attaches
//! middleware layers. Tests in `tests/` compose the bare router directly.

use std::{convert::Infallible, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::get,
    Json, Router,
};
use futures_util::{Stream, StreamExt};
use oms_core::{Order, OrderId, OrderSummary};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, info};

use crate::{
    api_types::{CreateOrderRequest, HealthResponse, UpdateOrderRequest},
    error::ApiError,
    state::{AppState, BusMsg},
};

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the complete application router wired to the given shared state.
///
/// Middleware layers (CORS, tracing) are **not** applied here.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/health", get(health))
        .route("/v1/stream", get(stream))
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/", get(list_orders).post(create_order))
        .route("/orders/summary", get(order_summary))
        .route("/orders/:order_id", get(get_order).put(update_order))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// GET /v1/health
// ---------------------------------------------------------------------------

pub(crate) async fn health(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            ok: true,
            service: st.build.service.to_string(),
            version: st.build.version.to_string(),
            orders: st.store.len().await,
        }),
    )
}

// ---------------------------------------------------------------------------
// POST /orders/
// ---------------------------------------------------------------------------

pub(crate) async fn create_order(
    State(st): State<Arc<AppState>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<Order>, ApiError> {
    let order = st
        .store
        .create_raw(req.description, &req.status, req.amount)
        .await?;

    info!(order_id = %order.id, "orders/create");
    st.publish(BusMsg::OrderCreated {
        order: order.clone(),
    });
    Ok(Json(order))
}

// ---------------------------------------------------------------------------
// GET /orders/
// ---------------------------------------------------------------------------

pub(crate) async fn list_orders(State(st): State<Arc<AppState>>) -> Json<Vec<Order>> {
    let orders = st.store.list().await;
    debug!(count = orders.len(), "orders/list");
    Json(orders)
}

// ---------------------------------------------------------------------------
// GET /orders/summary
// ---------------------------------------------------------------------------

pub(crate) async fn order_summary(State(st): State<Arc<AppState>>) -> Json<OrderSummary> {
    Json(st.store.summary().await)
}

// ---------------------------------------------------------------------------
// GET /orders/{id}
// ---------------------------------------------------------------------------

pub(crate) async fn get_order(
    State(st): State<Arc<AppState>>,
    Path(order_id): Path<u64>,
) -> Result<Json<Order>, ApiError> {
    let order = st.store.get(OrderId(order_id)).await?;
    Ok(Json(order))
}

// ---------------------------------------------------------------------------
// PUT /orders/{id}
// ---------------------------------------------------------------------------

pub(crate) async fn update_order(
    State(st): State<Arc<AppState>>,
    Path(order_id): Path<u64>,
    Json(req): Json<UpdateOrderRequest>,
) -> Result<Json<Order>, ApiError> {
    let order = st
        .store
        .update_status_raw(
            OrderId(order_id),
            &req.status,
            req.cancellation_reason.as_deref(),
        )
        .await?;

    info!(order_id = %order.id, status = %order.status, "orders/update");
    st.publish(BusMsg::OrderUpdated {
        order: order.clone(),
    });
    Ok(Json(order))
}

// ---------------------------------------------------------------------------
// GET /v1/stream  (SSE)
// ---------------------------------------------------------------------------

pub(crate) async fn stream(State(st): State<Arc<AppState>>) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));

    let rx = st.bus.subscribe();
    let events = broadcast_to_sse(rx);

    (headers, Sse::new(events).keep_alive(KeepAlive::new())).into_response()
}

fn broadcast_to_sse(
    rx: broadcast::Receiver<BusMsg>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    BroadcastStream::new(rx).filter_map(|msg| async move {
        match msg {
            Ok(m) => {
                let data = serde_json::to_string(&m).ok()?;
                Some(Ok(Event::default().event(m.event_name()).data(data)))
            }
            Err(_) => None, // lagged
        }
    })
}
