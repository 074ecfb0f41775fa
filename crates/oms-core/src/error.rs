use thiserror::Error;

use crate::order::OrderId;
use crate::status::OrderStatus;

/// Every way an order operation can be refused.
///
/// All variants are synchronous and leave store state exactly as it was
/// before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OmsError {
    /// A status string outside the recognised set (creation or update).
    #[error("Invalid status value.")]
    InvalidStatus { value: String },

    #[error("Order not found")]
    NotFound { id: OrderId },

    /// The order is Successful or Cancelled and may no longer change.
    #[error("{}", already_terminal_message(.status))]
    AlreadyTerminal { id: OrderId, status: OrderStatus },

    /// A recognised status that is not a legal next step (e.g. Pending → Pending).
    #[error("Invalid status update from {from}.")]
    InvalidTransition {
        id: OrderId,
        from: OrderStatus,
        requested: OrderStatus,
    },
}

fn already_terminal_message(status: &OrderStatus) -> &'static str {
    match status {
        OrderStatus::Cancelled => "Order is already cancelled. Please create a new order.",
        _ => "Order is already successful and cannot be updated.",
    }
}

/// Stable, payload-free discriminant of [`OmsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidStatus,
    NotFound,
    AlreadyTerminal,
    InvalidTransition,
}

impl ErrorKind {
    /// snake_case code surfaced on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidStatus => "invalid_status",
            ErrorKind::NotFound => "not_found",
            ErrorKind::AlreadyTerminal => "already_terminal",
            ErrorKind::InvalidTransition => "invalid_transition",
        }
    }
}

impl OmsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OmsError::InvalidStatus { .. } => ErrorKind::InvalidStatus,
            OmsError::NotFound { .. } => ErrorKind::NotFound,
            OmsError::AlreadyTerminal { .. } => ErrorKind::AlreadyTerminal,
            OmsError::InvalidTransition { .. } => ErrorKind::InvalidTransition,
        }
    }
}
