use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OmsError;

// ---------------------------------------------------------------------------
// OrderStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of an order.
///
/// External strings enter only through [`OrderStatus::parse`]; once a value
/// of this type exists it is one of the three recognised statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Initial state. The only state that accepts an update.
    Pending,
    /// **Terminal.**
    Successful,
    /// **Terminal.** Always carries at least one cancellation reason.
    Cancelled,
}

impl OrderStatus {
    /// The recognised statuses, in lifecycle order.
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Successful,
        OrderStatus::Cancelled,
    ];

    /// Validate an external status string.
    ///
    /// Matching is exact and case-sensitive.
    ///
    /// # Errors
    /// [`OmsError::InvalidStatus`] when `value` is not a recognised status.
    pub fn parse(value: &str) -> Result<Self, OmsError> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| OmsError::InvalidStatus {
                value: value.to_string(),
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Successful => "Successful",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Returns `true` if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Successful | Self::Cancelled)
    }
}

impl FromStr for OrderStatus {
    type Err = OmsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
