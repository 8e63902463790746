//! Result values of book operations.
//!
//! Rejections and "nothing rested" are ordinary values here, not errors.

use crate::types::{filled_volume, Fill, Order, OrderId};

/// Why `add` refused an order without touching the book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Price was zero or negative
    NonPositivePrice,
    /// Price needs more than 8 decimal places or overflows the tick range
    UnrepresentablePrice,
    /// Volume was zero
    ZeroVolume,
}

/// Result of a limit order submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Fully matched on arrival; no order rests and no id was issued
    Filled {
        fills: Vec<Fill>,
    },
    /// Residual volume is now resting under `id`
    Resting {
        id: OrderId,
        remaining: u64,
        fills: Vec<Fill>,
    },
    /// Refused before any state change
    Rejected(RejectReason),
}

impl AddOutcome {
    /// Id of the resting residual, if any
    pub fn order_id(&self) -> Option<OrderId> {
        match self {
            AddOutcome::Resting { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Fills produced on arrival (empty when rejected)
    pub fn fills(&self) -> &[Fill] {
        match self {
            AddOutcome::Filled { fills } | AddOutcome::Resting { fills, .. } => fills,
            AddOutcome::Rejected(_) => &[],
        }
    }

    /// Volume matched on arrival
    pub fn filled_volume(&self) -> u64 {
        filled_volume(self.fills())
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, AddOutcome::Filled { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, AddOutcome::Rejected(_))
    }
}

/// Result of a market order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketOutcome {
    /// Volume that could not be matched; the caller decides what to do with it
    pub unfilled: u64,
    pub fills: Vec<Fill>,
}

impl MarketOutcome {
    pub fn filled_volume(&self) -> u64 {
        filled_volume(&self.fills)
    }
}

/// Result of a successful quantity amendment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Amendment {
    /// Volume changed in place; queue position kept
    Updated { previous: u64, current: u64 },
    /// New volume was zero, so the order was cancelled
    Cancelled(Order),
}
