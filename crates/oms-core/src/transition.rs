//! Status transition rules.
//!
//! ```text
//!               Successful (term.)
//!              ▲
//!   Pending ───┤
//!              ▼
//!               Cancelled (term.)   + one cancellation reason appended
//! ```
//!
//! [`decide`] is pure: it inspects the current status and the request and
//! either returns a [`Transition`] to apply or the reason the request is
//! refused. The store calls it inside its write guard, so the read of the
//! current status, the decision and the write are one critical section.

use crate::error::OmsError;
use crate::order::{Order, OrderId};
use crate::status::OrderStatus;

/// Reason recorded when a cancellation arrives without one.
pub const DEFAULT_CANCELLATION_REASON: &str = "No reason provided";

/// An accepted status change, not yet written to the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub to: OrderStatus,
    /// Reason to append to `cancellation_reasons`; only set for cancellations.
    pub cancellation_reason: Option<String>,
}

impl Transition {
    /// Write the decision into `order`. Never fails.
    pub fn apply(self, order: &mut Order) {
        if let Some(reason) = self.cancellation_reason {
            order.cancellation_reasons.push(reason);
        }
        order.status = self.to;
    }
}

/// Decide whether `order` may move to `requested`.
///
/// An empty `reason` is treated the same as an absent one.
///
/// # Errors
/// - [`OmsError::AlreadyTerminal`] if the order is Successful or Cancelled.
/// - [`OmsError::InvalidTransition`] for Pending → Pending.
pub fn decide(
    id: OrderId,
    current: OrderStatus,
    requested: OrderStatus,
    reason: Option<&str>,
) -> Result<Transition, OmsError> {
    use OrderStatus::*;

    match (current, requested) {
        (Successful | Cancelled, _) => Err(OmsError::AlreadyTerminal {
            id,
            status: current,
        }),

        (Pending, Cancelled) => {
            let reason = reason
                .filter(|r| !r.is_empty())
                .unwrap_or(DEFAULT_CANCELLATION_REASON);
            Ok(Transition {
                to: Cancelled,
                cancellation_reason: Some(reason.to_string()),
            })
        }

        (Pending, Successful) => Ok(Transition {
            to: Successful,
            cancellation_reason: None,
        }),

        (Pending, Pending) => Err(OmsError::InvalidTransition {
            id,
            from: current,
            requested,
        }),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const ID: OrderId = OrderId(7);

    fn pending_order() -> Order {
        Order {
            id: ID,
            description: "widget".to_string(),
            status: OrderStatus::Pending,
            amount: 12.5,
            cancellation_reasons: Vec::new(),
        }
    }

    #[test]
    fn pending_to_successful_has_no_reason() {
        let t = decide(
            ID,
            OrderStatus::Pending,
            OrderStatus::Successful,
            Some("ignored"),
        )
        .unwrap();
        assert_eq!(t.to, OrderStatus::Successful);
        assert_eq!(t.cancellation_reason, None);
    }

    #[test]
    fn cancel_without_reason_uses_default() {
        let t = decide(ID, OrderStatus::Pending, OrderStatus::Cancelled, None).unwrap();
        assert_eq!(
            t.cancellation_reason.as_deref(),
            Some(DEFAULT_CANCELLATION_REASON)
        );

        let t = decide(ID, OrderStatus::Pending, OrderStatus::Cancelled, Some("")).unwrap();
        assert_eq!(
            t.cancellation_reason.as_deref(),
            Some("No reason provided"),
            "empty reason counts as absent"
        );
    }

    #[test]
    fn cancel_keeps_supplied_reason_verbatim() {
        let t = decide(
            ID,
            OrderStatus::Pending,
            OrderStatus::Cancelled,
            Some(" out of stock "),
        )
        .unwrap();
        assert_eq!(t.cancellation_reason.as_deref(), Some(" out of stock "));
    }

    #[test]
    fn pending_to_pending_is_invalid() {
        let err = decide(ID, OrderStatus::Pending, OrderStatus::Pending, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTransition);
    }

    #[test]
    fn terminal_states_refuse_every_request() {
        for current in [OrderStatus::Successful, OrderStatus::Cancelled] {
            for requested in OrderStatus::ALL {
                let err = decide(ID, current, requested, Some("again")).unwrap_err();
                assert_eq!(
                    err,
                    OmsError::AlreadyTerminal {
                        id: ID,
                        status: current
                    }
                );
            }
        }
    }

    #[test]
    fn apply_appends_reason_and_sets_status() {
        let mut order = pending_order();
        decide(ID, order.status, OrderStatus::Cancelled, Some("changed mind"))
            .unwrap()
            .apply(&mut order);
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert_eq!(order.cancellation_reasons, vec!["changed mind".to_string()]);
        assert_eq!(order.amount, 12.5);
    }
}
