//! Fill type: one match between the incoming order and a resting order.
//!
//! Fills are returned to the caller of the operation that produced them
//! and never stored by the book.

use crate::types::OrderId;

/// A single match against a resting (maker) order.
///
/// ## Price Discovery
///
/// The fill always executes at the maker's price (the resting level).
///
/// ## Example
///
/// ```
/// use limit_order_book::{Fill, OrderId};
///
/// let fill = Fill::new(OrderId::new(7).unwrap(), 10_000_000_000, 3, 2);
/// assert!(!fill.maker_done());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    /// Resting order that was hit
    pub maker_id: OrderId,

    /// Execution price in fixed-point ticks (the maker's price)
    pub price: u64,

    /// Executed volume
    pub volume: u64,

    /// Maker volume left after this fill; 0 means it left the book
    pub maker_remaining: u64,
}

impl Fill {
    /// Create a new fill
    pub fn new(maker_id: OrderId, price: u64, volume: u64, maker_remaining: u64) -> Self {
        Self {
            maker_id,
            price,
            volume,
            maker_remaining,
        }
    }

    /// Whether the maker was fully consumed and removed
    #[inline]
    pub fn maker_done(&self) -> bool {
        self.maker_remaining == 0
    }
}

/// Total volume executed across a set of fills
pub fn filled_volume(fills: &[Fill]) -> u64 {
    fills.iter().map(|f| f.volume).sum()
}
