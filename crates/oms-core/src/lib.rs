//! oms-core
//!
//! In-memory order management: the order record, the closed status enum,
//! the Pending → Successful | Cancelled transition rules, and the
//! concurrency-safe `OrderStore` that owns every order for the process
//! lifetime.
//!
//! No HTTP or serialization-framework types live here beyond serde derives;
//! `oms-daemon` is the only crate that speaks HTTP.

mod error;
mod order;
mod status;
mod store;

// Status transition rules.
pub mod transition;

pub use error::{ErrorKind, OmsError};
pub use order::{NewOrder, Order, OrderId, OrderSummary};
pub use status::OrderStatus;
pub use store::OrderStore;
pub use transition::{Transition, DEFAULT_CANCELLATION_REASON};
