//! oms-daemon library target.
//!
//! Exposes the router, state and configuration for integration tests.
//! The binary `main.rs` depends on this library target.

pub mod api_types;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
